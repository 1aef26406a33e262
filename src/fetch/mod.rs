//! Backend access: transport seam, JSON adapter, and the recon API facade.

mod adapter;
mod api;
mod notify;
mod transport;

pub use adapter::FetchAdapter;
#[cfg(test)]
pub(crate) use adapter::mock;
pub use api::{ExportFormat, ReconApi, backend_link, query_string};
pub use notify::{MemoryNotifier, Notification, Notifier, TerminalNotifier};
pub use transport::{HttpTransport, Method, Payload, Request, Response, Transport};

use thiserror::Error;

/// Failure of a single backend request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered `["ERROR", message]`.
    #[error("{0}")]
    Backend(String),

    /// The body was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(String),
}
