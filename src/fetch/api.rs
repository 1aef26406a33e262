use super::{FetchAdapter, FetchError, Notifier, Payload, Transport};
use crate::model::{DiscoveryTree, ScanRow};
use reqwest::Url;
use serde_json::Value;
use tracing::info;

/// Export file formats offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Gexf,
    Json,
}

impl ExportFormat {
    /// Endpoint and extra parameters for a multi-scan export.
    pub fn endpoint(self) -> (&'static str, Option<(&'static str, &'static str)>) {
        match self {
            ExportFormat::Csv => ("/scaneventresultexportmulti", None),
            ExportFormat::Excel => ("/scaneventresultexportmulti", Some(("filetype", "excel"))),
            ExportFormat::Gexf => ("/scanvizmulti", None),
            ExportFormat::Json => ("/scanexportjsonmulti", None),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Gexf => "gexf",
            ExportFormat::Json => "json",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Gexf => "gexf",
            ExportFormat::Json => "json",
        }
    }
}

/// Typed access to the recon backend's web endpoints.
pub struct ReconApi<T> {
    adapter: FetchAdapter<T>,
    docroot: String,
}

impl<T: Transport> ReconApi<T> {
    /// `docroot` prefixes the navigation links handed to the browser
    /// (empty when the backend is mounted at `/`).
    pub fn new(transport: T, docroot: impl Into<String>) -> Self {
        Self {
            adapter: FetchAdapter::new(transport),
            docroot: docroot.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn adapter(&self) -> &FetchAdapter<T> {
        &self.adapter
    }

    pub fn docroot(&self) -> &str {
        &self.docroot
    }

    pub async fn scan_list(&self) -> Result<Vec<ScanRow>, FetchError> {
        let value = self.adapter.fetch("/scanlist", None).await?;
        serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
    }

    pub async fn search(
        &self,
        scan_id: &str,
        event_type: Option<&str>,
        value: Option<&str>,
    ) -> Result<Value, FetchError> {
        let mut payload = Payload::new();
        payload.insert("id".to_string(), scan_id.to_string());
        if let Some(event_type) = event_type {
            payload.insert("eventType".to_string(), event_type.to_string());
        }
        if let Some(value) = value {
            payload.insert("value".to_string(), value.to_string());
        }
        self.adapter.fetch("/search", Some(payload)).await
    }

    pub async fn element_discovery(
        &self,
        scan_id: &str,
        event_type: &str,
    ) -> Result<DiscoveryTree, FetchError> {
        let params = params([("id", scan_id), ("eventType", event_type)]);
        let value = self
            .adapter
            .get("/scanelementtypediscovery", Some(params))
            .await?;
        serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Delete scans and report the outcome through `notifier`.
    pub async fn delete_scans(&self, ids: &[String], notifier: &dyn Notifier) -> Result<(), FetchError> {
        let joined = ids.join(",");
        let result = self
            .adapter
            .get_ack("/scandelete", Some(params([("id", joined.as_str()), ("confirm", "1")])))
            .await;
        match &result {
            Ok(()) => {
                info!("Deleted scans: {}", joined);
                notifier.success(&format!("Scans Deleted: {}", ids.join(", ")));
            }
            Err(e) => notifier.error(&format!("Error deleting scans {}: {}", joined, e)),
        }
        result
    }

    /// Ask the backend to abort running scans.
    pub async fn stop_scans(&self, ids: &[String], notifier: &dyn Notifier) -> Result<(), FetchError> {
        let joined = ids.join(",");
        let result = self
            .adapter
            .get_ack("/stopscan", Some(params([("id", joined.as_str())])))
            .await;
        match &result {
            Ok(()) => {
                info!("Aborted scans: {}", joined);
                notifier.success(&format!("Scans Aborted: {}", ids.join(", ")));
            }
            Err(e) => notifier.error(&format!("Error stopping scans {}: {}", joined, e)),
        }
        result
    }

    pub async fn export(&self, format: ExportFormat, ids: &[String]) -> Result<Vec<u8>, FetchError> {
        let (endpoint, extra) = format.endpoint();
        let mut query = params([("ids", ids.join(",").as_str())]);
        if let Some((key, value)) = extra {
            query.insert(key.to_string(), value.to_string());
        }
        info!("Exporting scans as {:?}: {}", format, ids.join(","));
        self.adapter.get_raw(endpoint, Some(query)).await
    }

    pub fn scan_info_url(&self, id: &str) -> String {
        backend_link(&self.docroot, "/scaninfo", &[("id", id)])
    }

    pub fn rerun_url(&self, id: &str) -> String {
        backend_link(&self.docroot, "/rerunscan", &[("id", id)])
    }

    pub fn rerun_multi_url(&self, ids: &[String]) -> String {
        backend_link(&self.docroot, "/rerunscanmulti", &[("ids", &ids.join(","))])
    }

    pub fn clone_url(&self, id: &str) -> String {
        backend_link(&self.docroot, "/clonescan", &[("id", id)])
    }
}

/// Link to a backend page: `docroot` + `path`, with `pairs` form-encoded
/// into the query string.
pub fn backend_link(docroot: &str, path: &str, pairs: &[(&str, &str)]) -> String {
    format!("{}{}?{}", docroot.trim_end_matches('/'), path, query_string(pairs))
}

/// Form-encodes `pairs` (`&`, `#`, `=` and spaces are escaped in values).
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return String::new();
    };
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            query.append_pair(key, value);
        }
    }
    url.query().unwrap_or_default().to_string()
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> Payload {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
