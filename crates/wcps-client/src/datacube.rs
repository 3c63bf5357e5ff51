//! Datacube operator: a query bound to the transport that executes it.

use tracing::debug;
use wcps_query::Query;

use crate::decode::{decode, Decoded};
use crate::error::ClientResult;
use crate::transport::{Payload, QueryTransport};

/// Holds a transport and a query so the query can be refined and
/// re-executed in place.
pub struct Datacube<T> {
    transport: T,
    query: Query,
}

impl<T: QueryTransport> Datacube<T> {
    pub fn new(transport: T, query: Query) -> Self {
        Self { transport, query }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Render the current query and return the raw response.
    pub async fn execute_payload(&self) -> ClientResult<Payload> {
        let text = self.query.render()?;
        debug!(coverages = ?self.query.coverages(), "Executing datacube query");
        self.transport.submit(&text).await
    }

    /// Render the current query and decode the response.
    pub async fn execute(&self) -> ClientResult<Decoded> {
        let payload = self.execute_payload().await?;
        decode(&payload)
    }

    pub fn into_parts(self) -> (T, Query) {
        (self.transport, self.query)
    }
}
