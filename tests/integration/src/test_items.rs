//! Single-item operations through a connection.

#[cfg(test)]
mod tests {
    use dynomap_core::{
        Attribute, AttributeType, AttributeUpdate, Connection, Error, Expected, ExpectedAttribute,
        Item, Key, UpdateAction,
    };
    use dynomap_core::context::{Delete, Get, Put, Update};
    use dynomap_model::{DynamoDBErrorCode, ErrorKind};
    use dynomap_model::types::ReturnValue;
    use pretty_assertions::assert_eq;

    use crate::MemoryStore;

    fn users() -> Connection<MemoryStore> {
        Connection::new(MemoryStore::new().with_table("users", "id", None))
    }

    fn user(id: &str, name: &str) -> Item {
        let mut item = Item::new("users");
        item.set_attribute("id", id, None)
            .and_then(|i| i.set_attribute("name", name, None))
            .and_then(|i| i.set_attribute("visits", 1_i64, None))
            .expect("user item");
        item
    }

    #[test]
    fn test_should_put_then_get_item() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("put");

        let item = conn
            .get("users", &Key::new("u1").expect("key"), None)
            .expect("get")
            .expect("stored item");

        assert_eq!(item.table(), "users");
        assert_eq!(item.get("name").and_then(Attribute::as_str), Some("Ada"));
        assert_eq!(item.get("visits").map(Attribute::kind), Some(AttributeType::Number));
    }

    #[test]
    fn test_should_return_none_for_missing_item() {
        let mut conn = users();
        let item = conn
            .get("users", &Key::new("nobody").expect("key"), None)
            .expect("get");
        assert!(item.is_none());
    }

    #[test]
    fn test_should_project_requested_attributes() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("put");
        let mut ctx = Get::new();
        ctx.set_attributes_to_get(["name"]);

        let item = conn
            .get("users", &Key::new("u1").expect("key"), Some(&ctx))
            .expect("get")
            .expect("stored item");

        assert_eq!(item.len(), 1);
        assert!(item.contains("name"));
    }

    #[test]
    fn test_should_return_replaced_item_with_all_old() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("first put");
        let mut ctx = Put::new();
        ctx.set_return_values(ReturnValue::AllOld).expect("ALL_OLD");

        let old = conn
            .put(&user("u1", "Grace"), Some(&ctx))
            .expect("second put")
            .expect("previous item");

        assert_eq!(old.get("name").and_then(Attribute::as_str), Some("Ada"));
    }

    #[test]
    fn test_should_reject_put_when_item_must_not_exist() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("first put");
        let mut expected = Expected::new();
        expected.set("id", ExpectedAttribute::Exists(false));
        let mut ctx = Put::new();
        ctx.set_expected(expected);

        let err = conn.put(&user("u1", "Grace"), Some(&ctx)).unwrap_err();

        assert!(matches!(
            &err,
            Error::Boundary(e) if e.code == DynamoDBErrorCode::ConditionalCheckFailedException
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_should_increment_and_extend_with_update() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("put");
        let mut updates = AttributeUpdate::new();
        updates
            .set("visits", UpdateAction::add(2_i64).expect("add number"))
            .set(
                "tags",
                UpdateAction::add(vec!["admin", "ops"]).expect("add set"),
            )
            .set("name", UpdateAction::delete());
        let mut ctx = Update::new();
        ctx.set_return_values(ReturnValue::AllNew);

        let new = conn
            .update("users", &Key::new("u1").expect("key"), &updates, Some(&ctx))
            .expect("update")
            .expect("new attributes");

        assert_eq!(new.get("visits").map(ToString::to_string), Some("3".to_owned()));
        assert_eq!(new.get("tags").map(Attribute::kind), Some(AttributeType::StringSet));
        assert!(!new.contains("name"));
    }

    #[test]
    fn test_should_update_only_when_expected_value_matches() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("put");
        let mut updates = AttributeUpdate::new();
        updates.set("name", UpdateAction::put("Grace").expect("put"));
        let mut expected = Expected::new();
        expected.set("name", ExpectedAttribute::value("Ada").expect("expected"));
        let mut ctx = Update::new();
        ctx.set_expected(expected)
            .set_return_values(ReturnValue::UpdatedOld);

        let old = conn
            .update("users", &Key::new("u1").expect("key"), &updates, Some(&ctx))
            .expect("first update")
            .expect("old attributes");
        assert_eq!(old.get("name").and_then(Attribute::as_str), Some("Ada"));
        assert_eq!(old.len(), 1);

        let err = conn
            .update("users", &Key::new("u1").expect("key"), &updates, Some(&ctx))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Boundary(e) if e.code == DynamoDBErrorCode::ConditionalCheckFailedException
        ));
    }

    #[test]
    fn test_should_delete_and_return_old_item() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("put");
        let mut ctx = Delete::new();
        ctx.set_return_values(ReturnValue::AllOld).expect("ALL_OLD");

        let old = conn
            .delete("users", &Key::new("u1").expect("key"), Some(&ctx))
            .expect("delete")
            .expect("deleted item");

        assert_eq!(old.get("id").and_then(Attribute::as_str), Some("u1"));
        assert!(conn.transport().is_empty("users"));
    }

    #[test]
    fn test_should_classify_missing_table() {
        let mut conn = users();
        let err = conn
            .get("nope", &Key::new("u1").expect("key"), None)
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ResourceNotFound));
    }

    #[test]
    fn test_should_account_consumed_units_per_table() {
        let mut conn = users();
        conn.put(&user("u1", "Ada"), None).expect("put");
        conn.get("users", &Key::new("u1").expect("key"), None)
            .expect("get");

        let units = conn.consumed_units().table("users").expect("users units");
        assert!((units.write - 1.0).abs() < f64::EPSILON);
        assert!((units.read - 0.5).abs() < f64::EPSILON);
    }
}
