use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Severity of a correlation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlation counts per severity. Missing keys count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(rename = "HIGH", default)]
    pub high: u64,
    #[serde(rename = "MEDIUM", default)]
    pub medium: u64,
    #[serde(rename = "LOW", default)]
    pub low: u64,
    #[serde(rename = "INFO", default)]
    pub info: u64,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

/// Scan lifecycle status as reported by the backend.
///
/// Kept as the raw string: compound values like `ABORT-REQUESTED` or
/// `ABORTED-DONE` must survive untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanStatus(pub String);

impl ScanStatus {
    pub const CREATED: &'static str = "CREATED";
    pub const STARTING: &'static str = "STARTING";
    pub const STARTED: &'static str = "STARTED";
    pub const RUNNING: &'static str = "RUNNING";
    pub const INITIALIZING: &'static str = "INITIALIZING";
    pub const FINISHED: &'static str = "FINISHED";
    pub const ABORTED: &'static str = "ABORTED";
    pub const FAILED: &'static str = "FAILED";

    /// Statuses for which a scan can still be stopped.
    pub const IN_PROGRESS: [&'static str; 4] = [
        Self::RUNNING,
        Self::STARTING,
        Self::STARTED,
        Self::INITIALIZING,
    ];

    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_in_progress(&self) -> bool {
        Self::IN_PROGRESS.contains(&self.as_str())
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the backend's scan list.
///
/// On the wire this is a positional array:
/// `[id, name, target, created, started, finished, status, elements, severities]`.
/// The severity map is optional; older backends stop after `elements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct ScanRow {
    pub id: String,
    pub name: String,
    pub target: String,
    pub created: String,
    pub started: String,
    pub finished: String,
    pub status: ScanStatus,
    pub element_count: u64,
    pub severities: SeverityCounts,
}

impl TryFrom<Vec<Value>> for ScanRow {
    type Error = String;

    fn try_from(fields: Vec<Value>) -> Result<Self, Self::Error> {
        if fields.len() < 8 {
            return Err(format!(
                "scan row has {} fields, expected at least 8",
                fields.len()
            ));
        }

        let severities = match fields.get(8) {
            Some(Value::Null) | None => SeverityCounts::default(),
            Some(v) => serde_json::from_value(v.clone())
                .map_err(|e| format!("invalid severity counts: {}", e))?,
        };

        Ok(Self {
            id: text(&fields[0]),
            name: text(&fields[1]),
            target: text(&fields[2]),
            created: text(&fields[3]),
            started: text(&fields[4]),
            finished: text(&fields[5]),
            status: ScanStatus(text(&fields[6])),
            element_count: count(&fields[7])?,
            severities,
        })
    }
}

impl From<ScanRow> for Vec<Value> {
    fn from(row: ScanRow) -> Self {
        vec![
            Value::String(row.id),
            Value::String(row.name),
            Value::String(row.target),
            Value::String(row.created),
            Value::String(row.started),
            Value::String(row.finished),
            Value::String(row.status.0),
            Value::from(row.element_count),
            serde_json::to_value(row.severities).unwrap_or(Value::Null),
        ]
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn count(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("element count is not a non-negative integer: {}", n)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| format!("element count is not numeric: {:?}", s)),
        Value::Null => Ok(0),
        other => Err(format!("element count has unexpected type: {}", other)),
    }
}
