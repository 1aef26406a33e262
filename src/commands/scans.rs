use crate::cli::{GlobalArgs, ListFormat, ScansArgs};
use crate::model::{ScanRow, Severity};
use crate::render::page;
use crate::style;
use crate::view::{ScanFilter, ScanListView};

use super::{CommandContext, runtime};

pub fn cmd_scans(global: &GlobalArgs, args: ScansArgs) -> i32 {
    let ctx = CommandContext::new(global);
    let api = match ctx.api() {
        Ok(api) => api,
        Err(code) => return code,
    };
    let rt = match runtime() {
        Ok(rt) => rt,
        Err(code) => return code,
    };

    let rows = match rt.block_on(api.scan_list()) {
        Ok(rows) => rows,
        Err(e) => {
            style::error(&format!("Error loading scans: {}", e));
            return 1;
        }
    };

    let content = match args.format {
        ListFormat::Text => {
            print_rows(&rows, args.filter);
            return 0;
        }
        ListFormat::Json => {
            let kept = kept_rows(&rows, args.filter);
            match serde_json::to_string_pretty(&kept) {
                Ok(json) => json + "\n",
                Err(e) => {
                    style::error(&format!("Failed to encode scans: {}", e));
                    return 1;
                }
            }
        }
        ListFormat::Html => {
            let view = ScanListView::new(args.filter, Default::default());
            if rows.is_empty() {
                page::scan_list(&view, None, &[])
            } else {
                let table = crate::api::scan_table(&rows, args.filter, api.docroot());
                page::scan_list(&view, Some(&table), &[])
            }
        }
    };

    ctx.emit(args.output.as_deref(), &content)
}

fn kept_rows(rows: &[ScanRow], filter: ScanFilter) -> Vec<&ScanRow> {
    let exclude = filter.exclusions(rows);
    rows.iter()
        .filter(|row| {
            exclude
                .as_ref()
                .is_none_or(|set| !set.contains(row.status.as_str()))
        })
        .collect()
}

fn print_rows(rows: &[ScanRow], filter: ScanFilter) {
    if rows.is_empty() {
        style::status("No scan history. Start a scan from the backend to get started.");
        return;
    }

    let kept = kept_rows(rows, filter);
    style::header(&format!("Scans ({} shown, filter: {})", kept.len(), filter.label()));
    for row in &kept {
        let severities: Vec<String> = Severity::ALL
            .iter()
            .map(|s| format!("{}={}", s.as_str(), row.severities.get(*s)))
            .collect();
        println!(
            "{}  {}  {}  [{}]  {} elements  {}",
            row.id,
            row.name,
            row.target,
            style::scan_status(row.status.as_str()),
            row.element_count,
            severities.join(" ")
        );
    }
    let skipped = rows.len() - kept.len();
    if skipped > 0 {
        style::hint(&format!("{} scans hidden by the filter", skipped));
    }
}
