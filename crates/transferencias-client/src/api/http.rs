use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ApiFailure, TransferApi};
use crate::config::ApiConfig;
use crate::contracts::types::{
    ApiErrorBody, FeeQuote, HealthStatus, TransferRequest, TransferResponse,
};
use crate::{ClientError, ClientResult};

/// Blocking HTTP client for the transfer service.
#[derive(Debug, Clone)]
pub struct HttpTransferApi {
    client: Client,
    base_url: String,
}

impl HttpTransferApi {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("transferencias/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| {
                ClientError::new(
                    "internal_http_client_error",
                    &format!("Could not build the HTTP client: {error}"),
                    Vec::new(),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn execute<T>(&self, route: &str, request: RequestBuilder) -> Result<T, ApiFailure>
    where
        T: DeserializeOwned,
    {
        debug!(route, "calling transfer service");
        let response = request.send().map_err(|error| {
            warn!(route, %error, "transfer service unreachable");
            ApiFailure::Connection {
                url: self.base_url.clone(),
                detail: error.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().map_err(|error| ApiFailure::Connection {
            url: self.base_url.clone(),
            detail: error.to_string(),
        })?;
        debug!(route, status = status.as_u16(), "transfer service answered");

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &text));
        }

        serde_json::from_str::<T>(&text).map_err(|error| ApiFailure::Decode {
            route: route.to_string(),
            detail: error.to_string(),
        })
    }
}

fn rejection(status: u16, text: &str) -> ApiFailure {
    match serde_json::from_str::<ApiErrorBody>(text) {
        Ok(body) => ApiFailure::Rejected { status, body },
        Err(_) => ApiFailure::Unstructured {
            status,
            detail: text.chars().take(200).collect(),
        },
    }
}

impl TransferApi for HttpTransferApi {
    fn schedule(&self, request: &TransferRequest) -> Result<TransferResponse, ApiFailure> {
        self.execute(
            "POST /transferencias",
            self.client.post(self.url("")).json(request),
        )
    }

    fn list(&self) -> Result<Vec<TransferResponse>, ApiFailure> {
        self.execute("GET /transferencias", self.client.get(self.url("")))
    }

    fn find_by_id(&self, id: i64) -> Result<TransferResponse, ApiFailure> {
        self.execute(
            "GET /transferencias/{id}",
            self.client.get(self.url(&format!("/{id}"))),
        )
    }

    fn list_by_account(&self, account: &str) -> Result<Vec<TransferResponse>, ApiFailure> {
        self.execute(
            "GET /transferencias/conta/{conta}",
            self.client.get(self.url(&format!("/conta/{account}"))),
        )
    }

    fn quote_fee(&self, amount: Decimal, date: NaiveDate) -> Result<FeeQuote, ApiFailure> {
        let query = [
            ("valor", amount.normalize().to_string()),
            ("dataTransferencia", date.format("%Y-%m-%d").to_string()),
        ];
        self.execute(
            "GET /transferencias/calcular-taxa",
            self.client.get(self.url("/calcular-taxa")).query(&query),
        )
    }

    fn health(&self) -> Result<HealthStatus, ApiFailure> {
        self.execute("GET /transferencias/health", self.client.get(self.url("/health")))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::rejection;
    use crate::api::ApiFailure;

    #[test]
    fn json_error_bodies_become_rejections() {
        let failure = rejection(
            400,
            r#"{"status":400,"error":"Bad Request","message":"Transferência negada","timestamp":"2026-10-19T10:00:00"}"#,
        );
        assert!(matches!(failure, ApiFailure::Rejected { status: 400, .. }));
        assert_eq!(failure.service_message(), Some("Transferência negada"));
    }

    #[test]
    fn empty_bodies_are_unstructured() {
        let failure = rejection(404, "");
        assert!(matches!(failure, ApiFailure::Unstructured { status: 404, .. }));
    }
}
