use super::{FetchError, Payload, Request, Response, Transport};
use serde_json::Value;
use tracing::{debug, warn};

/// Turns transport responses into parsed JSON or a [`FetchError`].
///
/// Every call sends exactly one request and resolves exactly once. There is
/// no retry, timeout, or cancellation; overlapping calls are independent.
pub struct FetchAdapter<T> {
    transport: T,
}

impl<T: Transport> FetchAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `payload` as a form to `endpoint` and parse the JSON reply.
    pub async fn fetch(&self, endpoint: &str, payload: Option<Payload>) -> Result<Value, FetchError> {
        let response = self.send(Request::post(endpoint, payload)).await?;
        decode_json(&response)
    }

    /// GET `endpoint` with `params` as the query string and parse the JSON reply.
    pub async fn get(&self, endpoint: &str, params: Option<Payload>) -> Result<Value, FetchError> {
        let response = self.send(Request::get(endpoint, params)).await?;
        decode_json(&response)
    }

    /// GET `endpoint` for its side effect. A non-JSON 2xx body counts as
    /// success; a JSON `["ERROR", ..]` body does not.
    pub async fn get_ack(&self, endpoint: &str, params: Option<Payload>) -> Result<(), FetchError> {
        let response = self.send(Request::get(endpoint, params)).await?;
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(value) => backend_error(&value).map_or(Ok(()), Err),
            Err(_) => Ok(()),
        }
    }

    /// GET `endpoint` and return the raw body, for file exports.
    pub async fn get_raw(&self, endpoint: &str, params: Option<Payload>) -> Result<Vec<u8>, FetchError> {
        let response = self.send(Request::get(endpoint, params)).await?;
        Ok(response.body)
    }

    /// Callback form of [`fetch`](Self::fetch): exactly one of `on_success`
    /// or `on_error` runs, once.
    pub async fn fetch_with<S, E>(
        &self,
        endpoint: &str,
        payload: Option<Payload>,
        on_success: S,
        on_error: E,
    ) where
        S: FnOnce(Value),
        E: FnOnce(String),
    {
        match self.fetch(endpoint, payload).await {
            Ok(value) => on_success(value),
            Err(e) => on_error(e.to_string()),
        }
    }

    /// Send and reject non-2xx statuses.
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        debug!(request = %request, "backend request");
        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(request = %request, error = %e, "backend request failed");
                return Err(e);
            }
        };

        if !response.is_success() {
            warn!(request = %request, status = response.status, "backend returned error status");
            return Err(FetchError::Status {
                status: response.status,
                body: response.text(),
            });
        }
        Ok(response)
    }
}

fn decode_json(response: &Response) -> Result<Value, FetchError> {
    let value: Value =
        serde_json::from_slice(&response.body).map_err(|e| FetchError::Decode(e.to_string()))?;
    match backend_error(&value) {
        Some(e) => Err(e),
        None => Ok(value),
    }
}

/// The backend signals failures on its JSON API as `["ERROR", "message"]`.
fn backend_error(value: &Value) -> Option<FetchError> {
    let items = value.as_array()?;
    if items.first()?.as_str()? != "ERROR" {
        return None;
    }
    let message = items
        .get(1)
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string();
    Some(FetchError::Backend(message))
}
