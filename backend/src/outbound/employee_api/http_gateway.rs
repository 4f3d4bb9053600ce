//! Reqwest-backed employee gateway.
//!
//! This adapter owns transport details only: URL construction, request bodies,
//! timeout and status mapping, and decoding the backend envelope. Each call is
//! a single attempt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{CreateEmployeeBody, DeleteEmployeeBody, EmployeeRecordDto, EnvelopeDto};
use crate::domain::ports::{BackendResult, EmployeeGateway, EmployeeGatewayError, EmployeeRecord};
use crate::domain::{CreateEmployeeRequest, DeleteEmployeeRequest, EmployeeId};

const TARGET: &str = "employee-backend";

/// How a 404 without a decodable envelope is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingBody {
    /// Report an empty result; the caller decides what absence means.
    Empty,
    /// Report a failed result naming the status.
    Failed,
}

/// Employee gateway that talks to the backend over HTTP.
pub struct EmployeeHttpGateway {
    client: Client,
    base_url: Url,
}

impl EmployeeHttpGateway {
    /// Build a gateway using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Backend collection URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn item_url(&self, id: &EmployeeId) -> Result<Url, EmployeeGatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                EmployeeGatewayError::transport(format!(
                    "base url {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn execute<T>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        missing: MissingBody,
    ) -> Result<BackendResult<T>, EmployeeGatewayError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status.is_success() {
            debug!(operation, status = status.as_u16(), "downstream call succeeded");
        } else {
            warn!(
                status = status.as_u16(),
                target_service = TARGET,
                operation,
                uri = %url,
                "downstream call returned non-success status"
            );
        }
        decode_response(status, body.as_ref(), missing)
    }
}

#[async_trait]
impl EmployeeGateway for EmployeeHttpGateway {
    async fn list_all(&self) -> Result<BackendResult<Vec<EmployeeRecord>>, EmployeeGatewayError> {
        let request = self.client.get(self.base_url.clone());
        let result: BackendResult<Vec<EmployeeRecordDto>> = self
            .execute("list_all", request, MissingBody::Failed)
            .await?;
        Ok(convert(result, |records| {
            records.into_iter().map(EmployeeRecord::from).collect()
        }))
    }

    async fn fetch_by_id(
        &self,
        id: &EmployeeId,
    ) -> Result<BackendResult<EmployeeRecord>, EmployeeGatewayError> {
        let request = self.client.get(self.item_url(id)?);
        let result: BackendResult<EmployeeRecordDto> = self
            .execute("fetch_by_id", request, MissingBody::Empty)
            .await?;
        Ok(convert(result, EmployeeRecord::from))
    }

    async fn create(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<BackendResult<EmployeeRecord>, EmployeeGatewayError> {
        let request = self
            .client
            .post(self.base_url.clone())
            .json(&CreateEmployeeBody::from(request));
        let result: BackendResult<EmployeeRecordDto> = self
            .execute("create", request, MissingBody::Failed)
            .await?;
        Ok(convert(result, EmployeeRecord::from))
    }

    async fn delete_by_name(
        &self,
        request: &DeleteEmployeeRequest,
    ) -> Result<BackendResult<bool>, EmployeeGatewayError> {
        let request = self
            .client
            .request(Method::DELETE, self.base_url.clone())
            .json(&DeleteEmployeeBody {
                name: request.name(),
            });
        self.execute("delete_by_name", request, MissingBody::Failed)
            .await
    }
}

fn convert<T, U>(result: BackendResult<T>, map: impl FnOnce(T) -> U) -> BackendResult<U> {
    let status = result.status();
    let (data, error) = result.into_parts();
    BackendResult::new(data.map(map), status, error)
}

/// Turn a raw backend response into the gateway outcome.
fn decode_response<T>(
    status: StatusCode,
    body: &[u8],
    missing: MissingBody,
) -> Result<BackendResult<T>, EmployeeGatewayError>
where
    T: DeserializeOwned,
{
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(EmployeeGatewayError::rate_limited(status_message(status, body)));
    }

    if status.is_success() {
        let envelope: EnvelopeDto<T> = serde_json::from_slice(body).map_err(|error| {
            EmployeeGatewayError::decode(format!("invalid employee backend payload: {error}"))
        })?;
        return Ok(envelope.into_backend_result(|data| data));
    }

    match serde_json::from_slice::<EnvelopeDto<T>>(body) {
        Ok(envelope) if status == StatusCode::NOT_FOUND => {
            Ok(envelope.into_backend_result(|data| data))
        }
        Ok(envelope) => Ok(envelope
            .with_default_error(|| status_message(status, body))
            .into_backend_result(|data| data)),
        Err(_) if status == StatusCode::NOT_FOUND && missing == MissingBody::Empty => {
            Ok(BackendResult::empty())
        }
        Err(_) => Ok(BackendResult::failed(status_message(status, body))),
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn map_transport_error(error: reqwest::Error) -> EmployeeGatewayError {
    if error.is_timeout() {
        EmployeeGatewayError::timeout(error.to_string())
    } else {
        EmployeeGatewayError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
