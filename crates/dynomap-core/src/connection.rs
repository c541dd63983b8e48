//! Operation dispatch.
//!
//! [`Connection`] renders a context into its typed input, hands the JSON
//! body to the [`Transport`], decodes the response into items and
//! collections, and accounts for the capacity each call consumed.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use dynomap_model::DynamoDBOperation;
use dynomap_model::output::{
    BatchGetItemOutput, BatchWriteItemOutput, DeleteItemOutput, GetItemOutput, PutItemOutput,
    QueryOutput, ScanOutput, UpdateItemOutput,
};
use dynomap_model::types::AttributeMap;

use crate::attribute::Attribute;
use crate::collection::{BatchCollection, Collection};
use crate::condition::AttributeUpdate;
use crate::config::ClientConfig;
use crate::context::{BatchGet, BatchWrite, Delete, Get, Put, Query, Scan, Update};
use crate::error::Result;
use crate::item::Item;
use crate::key::Key;
use crate::repeater::Repeater;
use crate::transport::Transport;
use crate::units::ConsumedUnits;

/// A client bound to one transport.
///
/// Calls take `&mut self`: a connection issues one request at a time and
/// updates its capacity counters after each.
#[derive(Debug)]
pub struct Connection<T> {
    transport: T,
    config: ClientConfig,
    consumed: ConsumedUnits,
}

impl<T: Transport> Connection<T> {
    /// A connection with the default configuration.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// A connection with an explicit configuration.
    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            consumed: ConsumedUnits::default(),
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Capacity consumed since creation or the last reset.
    #[must_use]
    pub fn consumed_units(&self) -> &ConsumedUnits {
        &self.consumed
    }

    /// Zero the capacity counters.
    pub fn reset_consumed_units(&mut self) {
        self.consumed.reset();
    }

    /// A repeater driving paginated and batch calls on this connection.
    pub fn repeater(&mut self) -> Repeater<'_, T> {
        Repeater::new(self)
    }

    // -- Single items --

    /// Write `item` to its table. Returns the previous item when the
    /// context asked for `ALL_OLD`.
    pub fn put(&mut self, item: &Item, context: Option<&Put>) -> Result<Option<Item>> {
        let input = context.unwrap_or(&Put::new()).to_wire(item)?;
        let output: PutItemOutput = self.call(DynamoDBOperation::PutItem, &input)?;
        self.consumed
            .add_write(item.table(), output.consumed_capacity_units.unwrap_or_default());
        attributes(item.table(), output.attributes.as_ref())
    }

    /// Fetch the item with `key`, or `None` if there is none.
    pub fn get(&mut self, table: &str, key: &Key, context: Option<&Get>) -> Result<Option<Item>> {
        let mut input = context.unwrap_or(&Get::new()).to_wire(table, key);
        if input.consistent_read.is_none() && self.config.consistent_read {
            input.consistent_read = Some(true);
        }
        let output: GetItemOutput = self.call(DynamoDBOperation::GetItem, &input)?;
        self.consumed
            .add_read(table, output.consumed_capacity_units.unwrap_or_default());
        attributes(table, output.item.as_ref())
    }

    /// Apply `updates` to the item with `key`. Returns the attributes
    /// selected by the context's `ReturnValues`.
    pub fn update(
        &mut self,
        table: &str,
        key: &Key,
        updates: &AttributeUpdate,
        context: Option<&Update>,
    ) -> Result<Option<Item>> {
        let input = context
            .unwrap_or(&Update::new())
            .to_wire(table, key, updates);
        let output: UpdateItemOutput = self.call(DynamoDBOperation::UpdateItem, &input)?;
        self.consumed
            .add_write(table, output.consumed_capacity_units.unwrap_or_default());
        attributes(table, output.attributes.as_ref())
    }

    /// Delete the item with `key`. Returns the deleted item when the
    /// context asked for `ALL_OLD`.
    pub fn delete(
        &mut self,
        table: &str,
        key: &Key,
        context: Option<&Delete>,
    ) -> Result<Option<Item>> {
        let input = context.unwrap_or(&Delete::new()).to_wire(table, key);
        let output: DeleteItemOutput = self.call(DynamoDBOperation::DeleteItem, &input)?;
        self.consumed
            .add_write(table, output.consumed_capacity_units.unwrap_or_default());
        attributes(table, output.attributes.as_ref())
    }

    // -- Collections --

    /// Fetch one page of the items under `hash`.
    pub fn query(
        &mut self,
        table: &str,
        hash: &Attribute,
        context: &Query,
    ) -> Result<Collection<Query>> {
        let mut input = context.to_wire(table, hash);
        if input.consistent_read.is_none() && self.config.consistent_read {
            input.consistent_read = Some(true);
        }
        let output: QueryOutput = self.call(DynamoDBOperation::Query, &input)?;
        self.consumed
            .add_read(table, output.consumed_capacity_units.unwrap_or_default());
        Ok(Collection::page(
            items(table, &output.items)?,
            output.count,
            0,
            output.last_evaluated_key.as_ref().map(Key::from_wire).transpose()?,
            context,
            context.count(),
        ))
    }

    /// Fetch one page of a table scan.
    pub fn scan(&mut self, table: &str, context: &Scan) -> Result<Collection<Scan>> {
        let input = context.to_wire(table);
        let output: ScanOutput = self.call(DynamoDBOperation::Scan, &input)?;
        self.consumed
            .add_read(table, output.consumed_capacity_units.unwrap_or_default());
        Ok(Collection::page(
            items(table, &output.items)?,
            output.count,
            output.scanned_count,
            output.last_evaluated_key.as_ref().map(Key::from_wire).transpose()?,
            context,
            context.count(),
        ))
    }

    // -- Batches --

    /// Fetch every key of `context`. Keys the server did not process are
    /// returned as the result's continuation.
    pub fn batch_get(&mut self, context: &BatchGet) -> Result<BatchCollection> {
        if context.is_empty() {
            return Ok(BatchCollection::new(None));
        }
        let output: BatchGetItemOutput =
            self.call(DynamoDBOperation::BatchGetItem, &context.to_wire())?;

        let pending = BatchGet::from_unprocessed(&output.unprocessed_keys)?;
        let mut result = BatchCollection::new(pending);
        for (table, response) in &output.responses {
            self.consumed
                .add_read(table, response.consumed_capacity_units.unwrap_or_default());
            let page = Collection::from_items(items(table, &response.items)?);
            result.set_items(table.as_str(), page);
        }
        Ok(result)
    }

    /// Execute every request of `context`. Returns the requests the server
    /// did not process, if any.
    pub fn batch_write(&mut self, context: &BatchWrite) -> Result<Option<BatchWrite>> {
        if context.is_empty() {
            return Ok(None);
        }
        let output: BatchWriteItemOutput =
            self.call(DynamoDBOperation::BatchWriteItem, &context.to_wire())?;
        for (table, response) in &output.responses {
            self.consumed
                .add_write(table, response.consumed_capacity_units.unwrap_or_default());
        }
        Ok(BatchWrite::from_unprocessed(&output.unprocessed_items)?)
    }

    fn call<I, O>(&self, operation: DynamoDBOperation, input: &I) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let request = serde_json::to_value(input)?;
        debug!(operation = %operation, "dispatching DynamoDB operation");
        let response = self.transport.execute(operation, request)?;
        Ok(serde_json::from_value(response)?)
    }
}

fn attributes(table: &str, attributes: Option<&AttributeMap>) -> Result<Option<Item>> {
    Ok(attributes
        .map(|map| Item::from_wire(table, map))
        .transpose()?)
}

fn items(table: &str, maps: &[AttributeMap]) -> Result<Vec<Item>> {
    Ok(maps
        .iter()
        .map(|map| Item::from_wire(table, map))
        .collect::<Result<_, _>>()?)
}
