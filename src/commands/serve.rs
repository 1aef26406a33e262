use crate::cli::{GlobalArgs, ServeArgs};
use crate::fetch::{HttpTransport, Transport};
use crate::fs::FileSystem;
use crate::server::{self, AppState};
use crate::style;
use std::sync::Arc;

use super::{CommandContext, runtime};

pub fn cmd_serve(global: &GlobalArgs, args: ServeArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let port = args.port.unwrap_or(ctx.config.server.port);
    let open_browser = args.open || ctx.config.server.open_browser;

    let transport: Arc<dyn Transport> = match HttpTransport::new(&ctx.config.backend.url) {
        Ok(t) => Arc::new(t),
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };
    let fs: Arc<dyn FileSystem> = Arc::new(crate::fs::RealFs::new());

    let state = match AppState::new(transport, ctx.config, fs) {
        Ok(state) => state,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };
    if let Err(e) = rt.block_on(server::serve(state, port, open_browser)) {
        style::error(&format!("Server failed: {}", e));
        return 1;
    }
    0
}
