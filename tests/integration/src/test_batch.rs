//! Batch contexts across tables.

#[cfg(test)]
mod tests {
    use dynomap_core::context::{BATCH_GET_LIMIT, BATCH_WRITE_LIMIT, BatchGet, BatchWrite};
    use dynomap_core::{Attribute, Collection, ConstructionError, Connection, Item, Key};
    use pretty_assertions::assert_eq;

    use crate::MemoryStore;

    fn store() -> Connection<MemoryStore> {
        Connection::new(
            MemoryStore::new()
                .with_table("users", "id", None)
                .with_table("teams", "name", None),
        )
    }

    fn record(table: &str, key: &str, value: &str, extra: i64) -> Item {
        let hash = if table == "users" { "id" } else { "name" };
        let mut item = Item::new(table);
        item.set_attribute(hash, value, None)
            .and_then(|i| i.set_attribute(key, extra, None))
            .expect("record");
        item
    }

    #[test]
    fn test_should_reject_write_past_limit() {
        let mut batch = BatchWrite::new();
        for n in 0..BATCH_WRITE_LIMIT {
            batch
                .add_item_to_put(record("users", "n", &format!("u{n}"), 0))
                .expect("within limit");
        }

        let err = batch
            .add_key_to_delete("users", Key::new("u0").expect("key"))
            .unwrap_err();

        assert_eq!(err, ConstructionError::LimitExceeded { limit: 25 });
        assert_eq!(batch.len(), BATCH_WRITE_LIMIT);
    }

    #[test]
    fn test_should_reject_get_past_limit() {
        let mut batch = BatchGet::new();
        for n in 0..BATCH_GET_LIMIT {
            let table = if n % 2 == 0 { "users" } else { "teams" };
            batch
                .add_key(table, Key::new(format!("k{n}")).expect("key"))
                .expect("within limit");
        }

        let err = batch
            .add_key("users", Key::new("k100").expect("key"))
            .unwrap_err();

        assert_eq!(err, ConstructionError::LimitExceeded { limit: 100 });
        assert_eq!(batch.len(), BATCH_GET_LIMIT);
    }

    #[test]
    fn test_should_write_and_read_across_tables() {
        let mut conn = store();
        let mut writes = BatchWrite::new();
        writes
            .add_item_to_put(record("users", "age", "ada", 36))
            .and_then(|b| b.add_item_to_put(record("teams", "size", "core", 4)))
            .and_then(|b| b.add_item_to_put(record("users", "age", "bob", 41)))
            .expect("writes");
        conn.batch_write(&writes).expect("batch write");

        let mut reads = BatchGet::new();
        reads
            .add_key("users", Key::new("ada").expect("key"))
            .and_then(|b| b.add_key("users", Key::new("bob").expect("key")))
            .and_then(|b| b.add_key("teams", Key::new("core").expect("key")))
            .and_then(|b| b.add_key("teams", Key::new("absent").expect("key")))
            .expect("reads");
        reads.set_attributes_to_get("users", ["age"]);

        let result = conn.batch_get(&reads).expect("batch get");

        assert!(!result.more());
        assert_eq!(result.iter().map(|(t, _)| t).collect::<Vec<_>>(), vec!["users", "teams"]);
        let users = result.get("users").expect("users");
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|item| item.len() == 1 && item.table() == "users"));
        let teams = result.get("teams").map(Collection::items).expect("teams");
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].get("name").and_then(Attribute::as_str), Some("core"));
    }

    #[test]
    fn test_should_keep_projection_on_unprocessed_keys() {
        let mut conn = store();
        conn.transport().set_batch_capacity(1);
        let mut reads = BatchGet::new();
        reads
            .add_key("users", Key::new("ada").expect("key"))
            .and_then(|b| b.add_key("users", Key::new("bob").expect("key")))
            .expect("reads");
        reads.set_attributes_to_get("users", ["age"]);

        let result = conn.batch_get(&reads).expect("batch get");

        let pending = result.next_context().expect("unprocessed keys");
        assert_eq!(pending.keys("users"), &[Key::new("bob").expect("key")]);
        assert_eq!(pending.attributes_to_get("users"), &["age".to_owned()]);
    }

    #[test]
    fn test_should_count_batch_write_units_per_table() {
        let mut conn = store();
        let mut writes = BatchWrite::new();
        writes
            .add_item_to_put(record("users", "age", "ada", 36))
            .and_then(|b| b.add_key_to_delete("teams", Key::new("core").expect("key")))
            .expect("writes");

        let rest = conn.batch_write(&writes).expect("batch write");

        assert!(rest.is_none());
        let units: Vec<_> = conn
            .consumed_units()
            .tables()
            .map(|(table, units)| (table, units.write))
            .collect();
        assert_eq!(units, vec![("users", 1.0), ("teams", 1.0)]);
    }
}
