//! Scan list table as an HTML string.
//!
//! Cell content is inserted verbatim. Callers that feed untrusted text must
//! escape it first.

use crate::fetch::backend_link;
use crate::model::{ScanRow, ScanStatus, Severity};
use std::collections::HashSet;
use std::fmt::Write;

/// Bootstrap alert style used for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Success,
    Warning,
    Info,
    Danger,
}

impl StatusBadge {
    /// Badge for a raw status string. Rules are checked in a fixed order and
    /// the first match wins, so `ABORTED_FAILED` is a warning.
    pub fn classify(status: &str) -> Self {
        const INFO: [&str; 5] = [
            ScanStatus::CREATED,
            ScanStatus::RUNNING,
            ScanStatus::STARTED,
            ScanStatus::STARTING,
            ScanStatus::INITIALIZING,
        ];

        if status == ScanStatus::FINISHED {
            StatusBadge::Success
        } else if status.contains("ABORT") {
            StatusBadge::Warning
        } else if INFO.contains(&status) {
            StatusBadge::Info
        } else if status.contains("FAILED") {
            StatusBadge::Danger
        } else {
            StatusBadge::Info
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusBadge::Success => "alert-success",
            StatusBadge::Warning => "alert-warning",
            StatusBadge::Info => "alert-info",
            StatusBadge::Danger => "alert-danger",
        }
    }

    fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => StatusBadge::Danger,
            Severity::Medium => StatusBadge::Warning,
            Severity::Low => StatusBadge::Info,
            Severity::Info => StatusBadge::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub html: String,
    /// Rows dropped by the status exclusion set.
    pub skipped: usize,
    /// Ids of the rendered rows, in order.
    pub ids: Vec<String>,
}

/// Renders scan rows with links rooted at the backend docroot.
#[derive(Debug, Clone, Default)]
pub struct ScanTable {
    docroot: String,
}

impl ScanTable {
    pub fn new(docroot: impl Into<String>) -> Self {
        Self {
            docroot: docroot.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn render_rows(&self, rows: &[ScanRow], exclude: Option<&HashSet<String>>) -> RenderedTable {
        let mut html = String::new();
        let mut skipped = 0;
        let mut ids = Vec::new();

        for row in rows {
            if exclude.is_some_and(|set| set.contains(row.status.as_str())) {
                skipped += 1;
                continue;
            }
            self.render_row(&mut html, row);
            ids.push(row.id.clone());
        }

        RenderedTable { html, skipped, ids }
    }

    /// Full `<table>` with header, body and pager footer.
    pub fn render_table(&self, rows: &[ScanRow], exclude: Option<&HashSet<String>>) -> RenderedTable {
        let body = self.render_rows(rows, exclude);

        let mut html = String::from("<table id='scanlist' class='table table-bordered table-striped'>");
        html.push_str(concat!(
            "<thead><tr><th class='sorter-false text-center'><input id='checkall' type='checkbox'></th>",
            " <th>Name</th> <th>Target</th> <th>Started</th> <th>Finished</th>",
            " <th class='text-center'>Status</th> <th class='text-center'>Elements</th>",
            "<th class='text-center'>Correlations</th><th class='sorter-false text-center'>Action</th>",
            " </tr></thead><tbody>"
        ));
        html.push_str(&body.html);
        html.push_str("</tbody>");
        html.push_str(PAGER_FOOTER);
        html.push_str("</table>");

        RenderedTable { html, ..body }
    }

    fn render_row(&self, out: &mut String, row: &ScanRow) {
        let id = row.id.as_str();
        let link = |path: &str| backend_link(&self.docroot, path, &[("id", id)]);
        let badge = StatusBadge::classify(row.status.as_str());

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "<tr><td class='text-center'><input type='checkbox' id='cb_{id}'></td>\
             <td><a href={info}>{name}</a></td>\
             <td>{target}</td><td>{created}</td><td>{finished}</td>\
             <td class='text-center'><span class='badge {class}'>{status}</span></td>\
             <td class='text-center'>{elements}</td><td class='text-center'>",
            info = link("/scaninfo"),
            name = row.name,
            target = row.target,
            created = row.created,
            finished = row.finished,
            class = badge.css_class(),
            status = row.status,
            elements = row.element_count,
        );

        for severity in Severity::ALL {
            let _ = write!(
                out,
                "<span class='badge {}'>{}</span>",
                StatusBadge::for_severity(severity).css_class(),
                row.severities.get(severity)
            );
        }
        out.push_str("</td><td class='text-center'>");

        if row.status.is_in_progress() {
            let _ = write!(
                out,
                "<a rel='tooltip' title='Stop Scan' href='javascript:stopScan(\"{id}\");'>\
                 <i class='glyphicon glyphicon-stop text-muted'></i></a>"
            );
        } else {
            let _ = write!(
                out,
                "<a rel='tooltip' title='Delete Scan' href='javascript:deleteScan(\"{id}\");'>\
                 <i class='glyphicon glyphicon-trash text-muted'></i></a>\
                 &nbsp;&nbsp;<a rel='tooltip' title='Re-run Scan' href={rerun}>\
                 <i class='glyphicon glyphicon-repeat text-muted'></i></a>",
                rerun = link("/rerunscan"),
            );
        }
        let _ = write!(
            out,
            "&nbsp;&nbsp;<a rel='tooltip' title='Clone Scan' href={clone}>\
             <i class='glyphicon glyphicon-plus-sign text-muted'></i></a></td></tr>",
            clone = link("/clonescan"),
        );
    }
}

const PAGER_FOOTER: &str = concat!(
    "<tfoot><tr><th colspan=\"8\" class=\"ts-pager form-inline\">",
    "<div class=\"btn-group btn-group-sm\" role=\"group\">",
    "<button type=\"button\" class=\"btn btn-default first\"><span class=\"glyphicon glyphicon-step-backward\"></span></button>",
    "<button type=\"button\" class=\"btn btn-default prev\"><span class=\"glyphicon glyphicon-backward\"></span></button>",
    "</div>",
    "<div class=\"btn-group btn-group-sm\" role=\"group\">",
    "<button type=\"button\" class=\"btn btn-default next\"><span class=\"glyphicon glyphicon-forward\"></span></button>",
    "<button type=\"button\" class=\"btn btn-default last\"><span class=\"glyphicon glyphicon-step-forward\"></span></button>",
    "</div>",
    "<select class=\"form-control input-sm pagesize\" title=\"Select page size\">",
    "<option selected=\"selected\" value=\"10\">10</option>",
    "<option value=\"20\">20</option>",
    "<option value=\"30\">30</option>",
    "<option value=\"all\">All Rows</option>",
    "</select>",
    "<select class=\"form-control input-sm pagenum\" title=\"Select page number\"></select>",
    "<span class=\"pagedisplay pull-right\"></span>",
    "</th></tr></tfoot>",
);
