//! Full dashboard pages assembled from the table and chart renderers.

use super::assets::{CHART_SCRIPT, SCAN_LIST_SCRIPT, STYLE};
use super::markup::escape;
use super::table::RenderedTable;
use crate::fetch::{ExportFormat, Notification};
use crate::view::{ScanFilter, ScanListView, Theme};
use crate::viz::Chart;
use std::fmt::Write;

const FILTERS: [ScanFilter; 4] = [
    ScanFilter::All,
    ScanFilter::Running,
    ScanFilter::Finished,
    ScanFilter::Failed,
];

const EXPORTS: [(ExportFormat, &str); 4] = [
    (ExportFormat::Csv, "CSV"),
    (ExportFormat::Excel, "Excel"),
    (ExportFormat::Gexf, "GEXF"),
    (ExportFormat::Json, "JSON"),
];

pub const WELCOME: &str = "<div class='alert alert-info'>\
    <h4>No scan history</h4>\
    There is currently no history of previously run scans. \
    Please start a scan from the backend to get started.\
    </div>";

/// Wraps `body` in the shared page shell.
pub fn layout(title: &str, theme: Theme, body: &str) -> String {
    let title = escape(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <title>{title}</title>\n    {STYLE}\n</head>\n<body class=\"{class}\">\n\
         <form method='post' action='/theme' class='pull-right'>\
         <button id='theme-toggler' type='submit'>{toggle}</button></form>\n\
         <h1>{title}</h1>\n{body}\n{CHART_SCRIPT}\n</body>\n</html>\n",
        class = theme.css_class(),
        toggle = theme.toggler_text(),
    )
}

pub fn alert(class: &str, text: &str) -> String {
    format!("<div class='alert {}'>{}</div>", class, escape(text))
}

pub fn notices(items: &[Notification]) -> String {
    items
        .iter()
        .map(|item| match item {
            Notification::Success(text) => alert("alert-success", text),
            Notification::Error(text) => alert("alert-danger", text),
            Notification::Message(text) => alert("alert-info", text),
        })
        .collect()
}

/// Filter dropdown, bulk actions and export menu above the scan table.
pub fn toolbar(filter: ScanFilter) -> String {
    let mut html = String::from("<div class='btn-toolbar'><div class='btn-group'>");
    let _ = write!(
        html,
        "<span id='filter-label'>Filter: {}</span><ul class='dropdown-menu'>",
        filter.label()
    );
    for option in FILTERS {
        let _ = write!(
            html,
            "<li><a href='/?filter={}'>{}</a></li>",
            option.key(),
            option.label()
        );
    }
    html.push_str("</ul></div>");

    html.push_str(concat!(
        "<button id='btn-delete' type='button'>Delete</button>",
        "<button id='btn-refresh' type='button'>Refresh</button>",
        "<div class='btn-group'><span>Export</span><ul class='dropdown-menu'>",
    ));
    for (format, label) in EXPORTS {
        let _ = write!(
            html,
            "<li><a href='/selected/export?format={}'>{}</a></li>",
            format.key(),
            label
        );
    }
    html.push_str(concat!(
        "</ul></div>",
        "<button id='btn-rerun' type='button'>Re-run</button>",
        "<button id='btn-stop' type='button'>Stop</button>",
        "</div>"
    ));
    html
}

/// Scan list page. `table` is `None` when the backend returned no scans.
pub fn scan_list(view: &ScanListView, table: Option<&RenderedTable>, items: &[Notification]) -> String {
    let mut body = notices(items);
    match table {
        Some(table) => {
            body.push_str(&toolbar(view.filter));
            body.push_str(&table.html);
            body.push_str(SCAN_LIST_SCRIPT);
        }
        None => body.push_str(WELCOME),
    }
    layout("Scans", view.theme, &body)
}

pub fn chart(title: &str, theme: Theme, chart: &Chart) -> String {
    let body = format!("<div id='{}'>{}</div>", chart.kind.name(), chart.to_svg());
    layout(title, theme, &body)
}

pub fn error(title: &str, theme: Theme, message: &str) -> String {
    layout(title, theme, &alert("alert-danger", message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::ChartKind;

    #[test]
    fn test_empty_list_shows_welcome() {
        let html = scan_list(&ScanListView::default(), None, &[]);

        assert!(html.contains("No scan history"));
        assert!(!html.contains("btn-delete"));
    }

    #[test]
    fn test_toolbar_shows_current_filter() {
        let html = toolbar(ScanFilter::Failed);

        assert!(html.contains("Filter: Failed/Aborted"));
        assert!(html.contains("/?filter=running"));
        assert!(html.contains("/selected/export?format=gexf"));
    }

    #[test]
    fn test_notices_escape_text() {
        let html = notices(&[
            Notification::Error("<boom>".to_string()),
            Notification::Success("Scans Deleted: a".to_string()),
        ]);

        assert!(html.contains("alert-danger'>&lt;boom&gt;"));
        assert!(html.contains("alert-success'>Scans Deleted: a"));
    }

    #[test]
    fn test_dark_theme_toggler() {
        let html = layout("x", Theme::Dark, "");

        assert!(html.contains("class=\"dark-theme\""));
        assert!(html.contains(">Light Mode</button>"));
    }

    #[test]
    fn test_chart_page_embeds_svg() {
        let html = chart("Bar", Theme::Light, &Chart::new(ChartKind::Bar, 10.0, 10.0));

        assert!(html.contains("<div id='bar'><svg"));
        assert!(html.contains("messageToolTipDiv"));
    }
}
