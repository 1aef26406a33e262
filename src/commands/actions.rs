use crate::cli::{ExportArgs, GlobalArgs, IdsArgs, SearchArgs};
use crate::fetch::TerminalNotifier;
use crate::style;
use std::path::PathBuf;

use super::{CommandContext, runtime};

pub fn cmd_search(global: &GlobalArgs, args: SearchArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let (api, rt) = match (ctx.api(), runtime()) {
        (Ok(api), Ok(rt)) => (api, rt),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    let result = rt.block_on(api.search(
        &args.id,
        args.event_type.as_deref(),
        args.value.as_deref(),
    ));
    match result.map(|value| serde_json::to_string_pretty(&value)) {
        Ok(Ok(json)) => {
            println!("{}", json);
            0
        }
        Ok(Err(e)) => {
            style::error(&format!("Failed to encode results: {}", e));
            1
        }
        Err(e) => {
            style::error(&format!("Search failed: {}", e));
            1
        }
    }
}

pub fn cmd_stop(global: &GlobalArgs, args: IdsArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let (api, rt) = match (ctx.api(), runtime()) {
        (Ok(api), Ok(rt)) => (api, rt),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    match rt.block_on(api.stop_scans(&args.ids, &TerminalNotifier)) {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

pub fn cmd_delete(global: &GlobalArgs, args: IdsArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let (api, rt) = match (ctx.api(), runtime()) {
        (Ok(api), Ok(rt)) => (api, rt),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    match rt.block_on(api.delete_scans(&args.ids, &TerminalNotifier)) {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

pub fn cmd_export(global: &GlobalArgs, args: ExportArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let (api, rt) = match (ctx.api(), runtime()) {
        (Ok(api), Ok(rt)) => (api, rt),
        (Err(code), _) | (_, Err(code)) => return code,
    };

    let bytes = match rt.block_on(api.export(args.format, &args.ids)) {
        Ok(bytes) => bytes,
        Err(e) => {
            style::error(&format!("Export failed: {}", e));
            return 1;
        }
    };

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("reconview-export.{}", args.format.extension())));
    if let Err(e) = ctx.fs.write_bytes(&path, &bytes) {
        style::error(&format!("Failed to write {}: {}", style::path(&path), e));
        return 1;
    }
    style::success(&format!(
        "Exported {} scan(s) to {}",
        args.ids.len(),
        style::path(&path)
    ));
    0
}
