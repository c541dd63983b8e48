//! Drive paginated and batch calls to completion.

use tracing::{debug, warn};

use dynomap_model::DynamoDBOperation;

use crate::attribute::Attribute;
use crate::collection::{BatchCollection, Collection};
use crate::connection::Connection;
use crate::context::{BatchGet, BatchWrite, Query, Scan};
use crate::error::Result;
use crate::transport::Transport;

/// Repeats a query, scan or batch call until no continuation remains.
///
/// Pages are merged into one result. A page rejected because provisioned
/// throughput was exceeded is re-requested with the same context and is
/// never merged; every other error is returned immediately.
#[derive(Debug)]
pub struct Repeater<'a, T> {
    connection: &'a mut Connection<T>,
}

impl<'a, T: Transport> Repeater<'a, T> {
    /// A repeater over `connection`.
    pub fn new(connection: &'a mut Connection<T>) -> Self {
        Self { connection }
    }

    /// Every item under `hash` matching `context`.
    pub fn query(
        &mut self,
        table: &str,
        hash: &Attribute,
        context: &Query,
    ) -> Result<Collection<Query>> {
        let mut result = Collection::new();
        let mut next = Some(context.clone());
        let mut attempt = 0_u32;
        while let Some(ctx) = next.take() {
            match self.connection.query(table, hash, &ctx) {
                Ok(mut page) => {
                    attempt = 0;
                    debug!(table, items = page.len(), more = page.more(), "query page");
                    next = page.take_next_context();
                    result.merge(page);
                }
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    warn!(
                        operation = %DynamoDBOperation::Query,
                        table,
                        attempt,
                        "throughput exceeded, retrying page"
                    );
                    next = Some(ctx);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }

    /// Every item of `table` matching `context`.
    pub fn scan(&mut self, table: &str, context: &Scan) -> Result<Collection<Scan>> {
        let mut result = Collection::new();
        let mut next = Some(context.clone());
        let mut attempt = 0_u32;
        while let Some(ctx) = next.take() {
            match self.connection.scan(table, &ctx) {
                Ok(mut page) => {
                    attempt = 0;
                    debug!(
                        table,
                        items = page.len(),
                        scanned = page.scanned_count(),
                        more = page.more(),
                        "scan page"
                    );
                    next = page.take_next_context();
                    result.merge(page);
                }
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    warn!(
                        operation = %DynamoDBOperation::Scan,
                        table,
                        attempt,
                        "throughput exceeded, retrying page"
                    );
                    next = Some(ctx);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }

    /// Every key of `context`, re-requesting unprocessed keys until none
    /// remain.
    pub fn batch_get(&mut self, context: &BatchGet) -> Result<BatchCollection> {
        let mut result = BatchCollection::new(None);
        let mut next = Some(context.clone());
        let mut attempt = 0_u32;
        while let Some(batch) = next.take() {
            match self.connection.batch_get(&batch) {
                Ok(mut response) => {
                    attempt = 0;
                    debug!(keys = batch.len(), more = response.more(), "batch get round");
                    next = response.take_next_context();
                    result.merge(response);
                }
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    warn!(
                        operation = %DynamoDBOperation::BatchGetItem,
                        attempt,
                        "throughput exceeded, retrying batch"
                    );
                    next = Some(batch);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }

    /// Execute every request of `context`, resubmitting the unprocessed
    /// remainder until the server has accepted all of them.
    pub fn batch_write(&mut self, context: &BatchWrite) -> Result<()> {
        let mut next = Some(context.clone());
        let mut attempt = 0_u32;
        while let Some(batch) = next.take() {
            match self.connection.batch_write(&batch) {
                Ok(rest) => {
                    attempt = 0;
                    debug!(
                        requests = batch.len(),
                        unprocessed = rest.as_ref().map_or(0, BatchWrite::len),
                        "batch write round"
                    );
                    next = rest;
                }
                Err(e) if e.is_retryable() => {
                    attempt += 1;
                    warn!(
                        operation = %DynamoDBOperation::BatchWriteItem,
                        attempt,
                        "throughput exceeded, retrying batch"
                    );
                    next = Some(batch);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
