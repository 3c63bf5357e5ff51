//! The seam between query rendering and the network.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{ClientError, ClientResult};

/// Raw response to a submitted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    /// `Content-Type` reported by the server, if any.
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Payload {
    pub fn new(content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            body: body.into(),
        }
    }

    /// Plain-text payload, mostly useful for stub transports.
    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::new(Some("text/plain".to_string()), body)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body as UTF-8 text.
    pub fn to_text(&self) -> ClientResult<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| ClientError::Nondecodable(format!("response is not UTF-8: {}", e)))
    }
}

/// Sends WCPS query text somewhere and returns the raw answer.
///
/// The query text is passed through untouched. Implementations decide how
/// it reaches a server and map failures into [`ClientError`].
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn submit(&self, query: &str) -> ClientResult<Payload>;
}

#[async_trait]
impl<T: QueryTransport + ?Sized> QueryTransport for Arc<T> {
    async fn submit(&self, query: &str) -> ClientResult<Payload> {
        (**self).submit(query).await
    }
}
