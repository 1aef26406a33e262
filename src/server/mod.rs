mod routes;
mod state;

pub use routes::{router, serve};
pub use state::{AppState, BulkAction, NOTHING_SELECTED, SelectReply, SelectRequest};
