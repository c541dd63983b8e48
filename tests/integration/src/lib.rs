//! End-to-end tests for dynomap.
//!
//! [`MemoryStore`] is a [`Transport`] that keeps tables in memory and answers
//! the `2011-12-05` operations the client core issues. It can throttle the
//! next calls and cap how many requests one batch call processes, so the
//! repeater's retry and continuation paths run against realistic responses.
//!
//! Run the suite with:
//! ```text
//! cargo test -p dynomap-integration
//! ```

use std::cmp::Ordering;
use std::sync::Once;

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use dynomap_core::{Number, Transport};
use dynomap_model::input::{
    BatchGetItemInput, BatchWriteItemInput, DeleteItemInput, GetItemInput, PutItemInput,
    QueryInput, ScanInput, UpdateItemInput,
};
use dynomap_model::output::{
    BatchGetItemOutput, BatchGetTableResponse, BatchWriteItemOutput, BatchWriteTableResponse,
    DeleteItemOutput, GetItemOutput, PutItemOutput, QueryOutput, ScanOutput, UpdateItemOutput,
};
use dynomap_model::types::{
    AttributeAction, AttributeMap, AttributeValueUpdate, ComparisonOperator, Condition,
    ExpectedAttributeValue, Key, KeysAndAttributes, ReturnValue, WriteRequest,
};
use dynomap_model::{AttributeValue, DynamoDBError, DynamoDBOperation};

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

#[derive(Debug)]
struct Table {
    hash: String,
    range: Option<String>,
    items: IndexMap<Key, AttributeMap>,
}

impl Table {
    fn key_of(&self, item: &AttributeMap) -> Result<Key, DynamoDBError> {
        let hash_key_element = item
            .get(&self.hash)
            .cloned()
            .ok_or_else(|| DynamoDBError::validation(format!("missing hash key {}", self.hash)))?;
        let range_key_element = match &self.range {
            Some(name) => Some(
                item.get(name)
                    .cloned()
                    .ok_or_else(|| DynamoDBError::validation(format!("missing range key {name}")))?,
            ),
            None => None,
        };
        Ok(Key {
            hash_key_element,
            range_key_element,
        })
    }

    fn key_attributes(&self, key: &Key) -> AttributeMap {
        let mut map = AttributeMap::new();
        map.insert(self.hash.clone(), key.hash_key_element.clone());
        if let (Some(name), Some(range)) = (&self.range, &key.range_key_element) {
            map.insert(name.clone(), range.clone());
        }
        map
    }
}

/// An in-memory table store speaking the item-oriented protocol.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<IndexMap<String, Table>>,
    throttled: Mutex<u32>,
    batch_capacity: Mutex<Option<usize>>,
    calls: Mutex<Vec<DynamoDBOperation>>,
}

impl MemoryStore {
    /// An empty store without tables.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    /// Add a table keyed by `hash` and optionally `range`.
    #[must_use]
    pub fn with_table(self, name: &str, hash: &str, range: Option<&str>) -> Self {
        self.tables.lock().insert(
            name.to_owned(),
            Table {
                hash: hash.to_owned(),
                range: range.map(ToOwned::to_owned),
                items: IndexMap::new(),
            },
        );
        self
    }

    /// Reject the next `calls` requests with a throughput error.
    pub fn throttle(&self, calls: u32) {
        *self.throttled.lock() = calls;
    }

    /// Process at most `requests` keys or writes per batch call and report
    /// the rest as unprocessed.
    pub fn set_batch_capacity(&self, requests: usize) {
        *self.batch_capacity.lock() = Some(requests);
    }

    /// Every operation received, throttled ones included.
    #[must_use]
    pub fn calls(&self) -> Vec<DynamoDBOperation> {
        self.calls.lock().clone()
    }

    /// Number of items stored in `table`.
    #[must_use]
    pub fn len(&self, table: &str) -> usize {
        self.tables.lock().get(table).map_or(0, |t| t.items.len())
    }

    /// Whether `table` holds no item.
    #[must_use]
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }

    fn put_item(&self, input: PutItemInput) -> Result<PutItemOutput, DynamoDBError> {
        let mut tables = self.tables.lock();
        let table = lookup(&mut tables, &input.table_name)?;
        let key = table.key_of(&input.item)?;
        check_expected(table.items.get(&key), &input.expected)?;
        let old = table.items.insert(key, input.item);
        Ok(PutItemOutput {
            attributes: old.filter(|_| input.return_values == Some(ReturnValue::AllOld)),
            consumed_capacity_units: Some(1.0),
        })
    }

    fn get_item(&self, input: &GetItemInput) -> Result<GetItemOutput, DynamoDBError> {
        let mut tables = self.tables.lock();
        let table = lookup(&mut tables, &input.table_name)?;
        let item = table
            .items
            .get(&input.key)
            .map(|item| project(item, &input.attributes_to_get));
        Ok(GetItemOutput {
            item,
            consumed_capacity_units: Some(read_units(input.consistent_read)),
        })
    }

    fn update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, DynamoDBError> {
        let mut tables = self.tables.lock();
        let table = lookup(&mut tables, &input.table_name)?;
        check_expected(table.items.get(&input.key), &input.expected)?;

        let old = table.items.get(&input.key).cloned();
        let mut new = old
            .clone()
            .unwrap_or_else(|| table.key_attributes(&input.key));
        for (name, update) in &input.attribute_updates {
            apply_update(&mut new, name, update)?;
        }
        table.items.insert(input.key.clone(), new.clone());

        let updated = |item: &AttributeMap| -> AttributeMap {
            item.iter()
                .filter(|(name, _)| input.attribute_updates.contains_key(*name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        };
        let attributes = match input.return_values.unwrap_or_default() {
            ReturnValue::None => None,
            ReturnValue::AllOld => old,
            ReturnValue::UpdatedOld => old.as_ref().map(updated),
            ReturnValue::AllNew => Some(new),
            ReturnValue::UpdatedNew => Some(updated(&new)),
        };
        Ok(UpdateItemOutput {
            attributes,
            consumed_capacity_units: Some(1.0),
        })
    }

    fn delete_item(&self, input: &DeleteItemInput) -> Result<DeleteItemOutput, DynamoDBError> {
        let mut tables = self.tables.lock();
        let table = lookup(&mut tables, &input.table_name)?;
        check_expected(table.items.get(&input.key), &input.expected)?;
        let old = table.items.shift_remove(&input.key);
        Ok(DeleteItemOutput {
            attributes: old.filter(|_| input.return_values == Some(ReturnValue::AllOld)),
            consumed_capacity_units: Some(1.0),
        })
    }

    fn query(&self, input: &QueryInput) -> Result<QueryOutput, DynamoDBError> {
        let mut tables = self.tables.lock();
        let table = lookup(&mut tables, &input.table_name)?;
        let range_name = table.range.clone();

        let mut candidates: Vec<(&Key, &AttributeMap)> = table
            .items
            .iter()
            .filter(|(key, _)| key.hash_key_element == input.hash_key_value)
            .filter(|(_, item)| {
                input
                    .range_key_condition
                    .as_ref()
                    .is_none_or(|cond| {
                        range_name
                            .as_ref()
                            .is_some_and(|name| satisfies(item.get(name), cond))
                    })
            })
            .collect();
        candidates.sort_by(|(a, _), (b, _)| {
            compare(a.range_key_element.as_ref(), b.range_key_element.as_ref())
                .unwrap_or(Ordering::Equal)
        });
        if input.scan_index_forward == Some(false) {
            candidates.reverse();
        }

        let (page, last_evaluated_key) =
            paginate(&candidates, input.exclusive_start_key.as_ref(), input.limit);
        let count = page.len() as u64;
        let items = if input.count == Some(true) {
            Vec::new()
        } else {
            page.iter()
                .map(|(_, item)| project(item, &input.attributes_to_get))
                .collect()
        };
        Ok(QueryOutput {
            items,
            count,
            last_evaluated_key,
            consumed_capacity_units: Some(read_units(input.consistent_read) * count.max(1) as f64),
        })
    }

    fn scan(&self, input: &ScanInput) -> Result<ScanOutput, DynamoDBError> {
        let mut tables = self.tables.lock();
        let table = lookup(&mut tables, &input.table_name)?;
        let all: Vec<(&Key, &AttributeMap)> = table.items.iter().collect();

        let (evaluated, last_evaluated_key) =
            paginate(&all, input.exclusive_start_key.as_ref(), input.limit);
        let scanned_count = evaluated.len() as u64;
        let matched: Vec<&AttributeMap> = evaluated
            .iter()
            .map(|(_, item)| *item)
            .filter(|item| {
                input
                    .scan_filter
                    .iter()
                    .all(|(name, cond)| satisfies(item.get(name), cond))
            })
            .collect();
        let count = matched.len() as u64;
        let items = if input.count == Some(true) {
            Vec::new()
        } else {
            matched
                .into_iter()
                .map(|item| project(item, &input.attributes_to_get))
                .collect()
        };
        Ok(ScanOutput {
            items,
            count,
            scanned_count,
            last_evaluated_key,
            consumed_capacity_units: Some(0.5 * scanned_count.max(1) as f64),
        })
    }

    fn batch_get_item(
        &self,
        input: BatchGetItemInput,
    ) -> Result<BatchGetItemOutput, DynamoDBError> {
        let capacity = *self.batch_capacity.lock();
        let mut budget = capacity.unwrap_or(usize::MAX);
        let mut tables = self.tables.lock();
        let mut output = BatchGetItemOutput::default();

        for (name, request) in input.request_items {
            let table = lookup(&mut tables, &name)?;
            let split = budget.min(request.keys.len());
            budget -= split;
            let (processed, rest) = request.keys.split_at(split);

            let items: Vec<AttributeMap> = processed
                .iter()
                .filter_map(|key| table.items.get(key))
                .map(|item| project(item, &request.attributes_to_get))
                .collect();
            output.responses.insert(
                name.clone(),
                BatchGetTableResponse {
                    consumed_capacity_units: Some(0.5 * split.max(1) as f64),
                    items,
                },
            );
            if !rest.is_empty() {
                output.unprocessed_keys.insert(
                    name,
                    KeysAndAttributes {
                        keys: rest.to_vec(),
                        attributes_to_get: request.attributes_to_get,
                    },
                );
            }
        }
        Ok(output)
    }

    fn batch_write_item(
        &self,
        input: BatchWriteItemInput,
    ) -> Result<BatchWriteItemOutput, DynamoDBError> {
        let capacity = *self.batch_capacity.lock();
        let mut budget = capacity.unwrap_or(usize::MAX);
        let mut tables = self.tables.lock();
        let mut output = BatchWriteItemOutput::default();

        for (name, requests) in input.request_items {
            let table = lookup(&mut tables, &name)?;
            let split = budget.min(requests.len());
            budget -= split;
            let mut requests = requests;
            let rest: Vec<WriteRequest> = requests.split_off(split);

            for request in requests {
                if let Some(put) = request.put_request {
                    let key = table.key_of(&put.item)?;
                    table.items.insert(key, put.item);
                } else if let Some(delete) = request.delete_request {
                    table.items.shift_remove(&delete.key);
                }
            }
            output.responses.insert(
                name.clone(),
                BatchWriteTableResponse {
                    consumed_capacity_units: Some(split as f64),
                },
            );
            if !rest.is_empty() {
                output.unprocessed_items.insert(name, rest);
            }
        }
        Ok(output)
    }
}

impl Transport for MemoryStore {
    fn execute(
        &self,
        operation: DynamoDBOperation,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, DynamoDBError> {
        self.calls.lock().push(operation);
        {
            let mut throttled = self.throttled.lock();
            if *throttled > 0 {
                *throttled -= 1;
                debug!(%operation, "throttling request");
                return Err(DynamoDBError::capacity_exceeded(
                    "The level of configured provisioned throughput for the table was exceeded",
                ));
            }
        }
        debug!(%operation, "memory store request");

        match operation {
            DynamoDBOperation::PutItem => respond(&self.put_item(parse(request)?)?),
            DynamoDBOperation::GetItem => respond(&self.get_item(&parse(request)?)?),
            DynamoDBOperation::UpdateItem => respond(&self.update_item(parse(request)?)?),
            DynamoDBOperation::DeleteItem => respond(&self.delete_item(&parse(request)?)?),
            DynamoDBOperation::Query => respond(&self.query(&parse(request)?)?),
            DynamoDBOperation::Scan => respond(&self.scan(&parse(request)?)?),
            DynamoDBOperation::BatchGetItem => respond(&self.batch_get_item(parse(request)?)?),
            DynamoDBOperation::BatchWriteItem => {
                respond(&self.batch_write_item(parse(request)?)?)
            }
        }
    }
}

fn parse<T: DeserializeOwned>(request: serde_json::Value) -> Result<T, DynamoDBError> {
    serde_json::from_value(request).map_err(|e| DynamoDBError::validation(e.to_string()))
}

fn respond<T: Serialize>(output: &T) -> Result<serde_json::Value, DynamoDBError> {
    serde_json::to_value(output).map_err(|e| DynamoDBError::internal_error(e.to_string()))
}

fn lookup<'a>(
    tables: &'a mut IndexMap<String, Table>,
    name: &str,
) -> Result<&'a mut Table, DynamoDBError> {
    tables.get_mut(name).ok_or_else(|| {
        DynamoDBError::resource_not_found(format!(
            "Requested resource not found: Table: {name} not found"
        ))
    })
}

fn read_units(consistent: Option<bool>) -> f64 {
    if consistent == Some(true) { 1.0 } else { 0.5 }
}

fn project(item: &AttributeMap, names: &[String]) -> AttributeMap {
    if names.is_empty() {
        return item.clone();
    }
    names
        .iter()
        .filter_map(|name| item.get(name).map(|value| (name.clone(), value.clone())))
        .collect()
}

/// Skip past `start`, take up to `limit` entries, and report the last key
/// taken when entries remain.
fn paginate<'a>(
    entries: &[(&'a Key, &'a AttributeMap)],
    start: Option<&Key>,
    limit: Option<u32>,
) -> (Vec<(&'a Key, &'a AttributeMap)>, Option<Key>) {
    let start_idx = start
        .and_then(|start| entries.iter().position(|(key, _)| *key == start))
        .map_or(0, |idx| idx + 1);
    let limit = limit.map_or(usize::MAX, |l| l as usize);
    let page: Vec<_> = entries.iter().skip(start_idx).take(limit).copied().collect();
    let has_more = start_idx.saturating_add(limit) < entries.len();
    let last = if has_more {
        page.last().map(|(key, _)| (*key).clone())
    } else {
        None
    };
    (page, last)
}

fn check_expected(
    stored: Option<&AttributeMap>,
    expected: &IndexMap<String, ExpectedAttributeValue>,
) -> Result<(), DynamoDBError> {
    for (name, condition) in expected {
        let actual = stored.and_then(|item| item.get(name));
        let holds = match (&condition.value, condition.exists) {
            (Some(value), _) => actual == Some(value),
            (None, Some(false)) => actual.is_none(),
            (None, _) => actual.is_some(),
        };
        if !holds {
            return Err(DynamoDBError::conditional_check_failed(
                "The conditional request failed",
            ));
        }
    }
    Ok(())
}

fn apply_update(
    item: &mut AttributeMap,
    name: &str,
    update: &AttributeValueUpdate,
) -> Result<(), DynamoDBError> {
    match (update.action.unwrap_or_default(), &update.value) {
        (AttributeAction::Put, Some(value)) => {
            item.insert(name.to_owned(), value.clone());
        }
        (AttributeAction::Delete, None) => {
            item.shift_remove(name);
        }
        (
            AttributeAction::Delete,
            Some(AttributeValue::Ss(remove) | AttributeValue::Ns(remove)),
        ) => {
            let emptied = match item.get_mut(name) {
                Some(AttributeValue::Ss(members) | AttributeValue::Ns(members)) => {
                    members.retain(|m| !remove.contains(m));
                    members.is_empty()
                }
                _ => false,
            };
            if emptied {
                item.shift_remove(name);
            }
        }
        (AttributeAction::Add, Some(AttributeValue::N(delta))) => {
            let current = match item.get(name) {
                Some(AttributeValue::N(n)) => n.clone(),
                None => "0".to_owned(),
                Some(_) => return Err(DynamoDBError::validation("ADD on a non-number")),
            };
            item.insert(name.to_owned(), AttributeValue::N(add_numbers(&current, delta)?));
        }
        (
            AttributeAction::Add,
            Some(value @ (AttributeValue::Ss(add) | AttributeValue::Ns(add))),
        ) => {
            let entry = item
                .entry(name.to_owned())
                .or_insert_with(|| empty_like(value));
            if let AttributeValue::Ss(members) | AttributeValue::Ns(members) = entry {
                for member in add {
                    if !members.contains(member) {
                        members.push(member.clone());
                    }
                }
            }
        }
        (action, _) => {
            return Err(DynamoDBError::validation(format!(
                "unsupported update {} on {name}",
                action.as_str()
            )));
        }
    }
    Ok(())
}

fn empty_like(value: &AttributeValue) -> AttributeValue {
    match value {
        AttributeValue::Ns(_) => AttributeValue::Ns(Vec::new()),
        _ => AttributeValue::Ss(Vec::new()),
    }
}

fn add_numbers(a: &str, b: &str) -> Result<String, DynamoDBError> {
    let parse = |s: &str| {
        Number::parse(s).ok_or_else(|| DynamoDBError::validation(format!("invalid number {s}")))
    };
    let sum = match (parse(a)?, parse(b)?) {
        (Number::Int(x), Number::Int(y)) => x.checked_add(y).map(Number::Int),
        (x, y) => Number::from_f64(x.as_f64() + y.as_f64()),
    };
    sum.map(|n| n.to_string())
        .ok_or_else(|| DynamoDBError::validation("number overflow"))
}

fn compare(a: Option<&AttributeValue>, b: Option<&AttributeValue>) -> Option<Ordering> {
    match (a?, b?) {
        (AttributeValue::S(x), AttributeValue::S(y)) => Some(x.cmp(y)),
        (AttributeValue::N(x), AttributeValue::N(y)) => {
            Some(Number::parse(x)?.cmp(&Number::parse(y)?))
        }
        _ => None,
    }
}

fn satisfies(actual: Option<&AttributeValue>, condition: &Condition) -> bool {
    let args = &condition.attribute_value_list;
    let first = args.first();
    let ord = || compare(actual, first);
    match condition.comparison_operator {
        ComparisonOperator::Eq => actual.is_some() && actual == first,
        ComparisonOperator::Ne => actual != first,
        ComparisonOperator::Lt => ord() == Some(Ordering::Less),
        ComparisonOperator::Le => matches!(ord(), Some(Ordering::Less | Ordering::Equal)),
        ComparisonOperator::Gt => ord() == Some(Ordering::Greater),
        ComparisonOperator::Ge => matches!(ord(), Some(Ordering::Greater | Ordering::Equal)),
        ComparisonOperator::Null => actual.is_none(),
        ComparisonOperator::NotNull => actual.is_some(),
        ComparisonOperator::BeginsWith => match (actual, first) {
            (Some(AttributeValue::S(s)), Some(AttributeValue::S(prefix))) => {
                s.starts_with(prefix.as_str())
            }
            _ => false,
        },
        ComparisonOperator::Contains => contains(actual, first),
        ComparisonOperator::NotContains => actual.is_some() && !contains(actual, first),
        ComparisonOperator::In => actual.is_some_and(|value| args.contains(value)),
        ComparisonOperator::Between => {
            matches!(compare(actual, args.first()), Some(Ordering::Greater | Ordering::Equal))
                && matches!(compare(actual, args.get(1)), Some(Ordering::Less | Ordering::Equal))
        }
    }
}

fn contains(actual: Option<&AttributeValue>, needle: Option<&AttributeValue>) -> bool {
    match (actual, needle) {
        (Some(AttributeValue::S(s)), Some(AttributeValue::S(n))) => s.contains(n.as_str()),
        (Some(AttributeValue::Ss(set)), Some(AttributeValue::S(n)))
        | (Some(AttributeValue::Ns(set)), Some(AttributeValue::N(n))) => set.contains(n),
        _ => false,
    }
}

mod test_batch;
mod test_items;
