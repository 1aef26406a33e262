use crate::analysis::TreeStats;
use crate::api;
use crate::cli::{ChartArgs, GlobalArgs, TreeArgs};
use crate::render::page;
use crate::style;

use super::{CommandContext, runtime};

pub fn cmd_chart(global: &GlobalArgs, args: ChartArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let input = match ctx.fs.read_to_string(&args.input) {
        Ok(input) => input,
        Err(e) => {
            style::error(&format!("Could not read {}: {}", style::path(&args.input), e));
            return 1;
        }
    };

    let chart = match api::render_chart(args.kind, &input, &ctx.config.charts) {
        Ok(chart) => chart,
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    };

    let content = if args.svg {
        chart.to_svg()
    } else {
        let theme = crate::prefs::Preferences::load(&ctx.config.prefs_path, ctx.fs)
            .map(|p| p.theme)
            .unwrap_or_default();
        page::chart(&format!("{} chart", args.kind), theme, &chart)
    };
    ctx.emit(args.output.as_deref(), &content)
}

pub fn cmd_tree(global: &GlobalArgs, args: TreeArgs) -> i32 {
    let ctx = CommandContext::new(global);

    let stats = match (&args.input, &args.scan, &args.event_type) {
        (Some(path), _, _) => {
            let loaded = ctx
                .fs
                .read_to_string(path)
                .map_err(|e| format!("Could not read {}: {}", style::path(path), e))
                .and_then(|input| api::tree_stats(&input).map_err(|e| e.to_string()));
            match loaded {
                Ok(stats) => stats,
                Err(msg) => {
                    style::error(&msg);
                    return 1;
                }
            }
        }
        (None, Some(scan), Some(event_type)) => {
            let (api, rt) = match (ctx.api(), runtime()) {
                (Ok(api), Ok(rt)) => (api, rt),
                (Err(code), _) | (_, Err(code)) => return code,
            };
            match rt.block_on(api.element_discovery(scan, event_type)) {
                Ok(tree) => TreeStats::of(&tree.tree),
                Err(e) => {
                    style::error(&format!("Could not fetch discovery tree: {}", e));
                    return 1;
                }
            }
        }
        _ => {
            style::error("Use --input FILE, or --scan ID with --event-type TYPE");
            return 1;
        }
    };

    style::section("Discovery tree");
    println!("{}", style::metric("Leaves", stats.leaves));
    println!("{}", style::metric("Nodes", stats.total));
    println!("{}", style::metric("Depth", stats.depth));
    0
}
