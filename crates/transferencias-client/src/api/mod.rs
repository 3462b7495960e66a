//! Seam between the command layer and the transfer service.

mod http;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use crate::ClientError;
use crate::contracts::types::{
    ApiErrorBody, FeeQuote, FieldMessage, HealthStatus, TransferRequest, TransferResponse,
};
use crate::schedule::field::Field;
use crate::schedule::messages::CONNECTION_ERROR_MESSAGE;

pub use http::HttpTransferApi;

/// Remote operations of the transfer service. Commands take a `&dyn
/// TransferApi` so tests can substitute a scripted service.
pub trait TransferApi {
    fn schedule(&self, request: &TransferRequest) -> Result<TransferResponse, ApiFailure>;
    fn list(&self) -> Result<Vec<TransferResponse>, ApiFailure>;
    fn find_by_id(&self, id: i64) -> Result<TransferResponse, ApiFailure>;
    fn list_by_account(&self, account: &str) -> Result<Vec<TransferResponse>, ApiFailure>;
    fn quote_fee(&self, amount: Decimal, date: NaiveDate) -> Result<FeeQuote, ApiFailure>;
    fn health(&self) -> Result<HealthStatus, ApiFailure>;
    fn base_url(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The service answered with a non-success status.
    Rejected { status: u16, body: ApiErrorBody },
    /// A non-success status without a parseable error body.
    Unstructured { status: u16, detail: String },
    /// No response at all.
    Connection { url: String, detail: String },
    /// A success status whose body did not match the expected shape.
    Decode { route: String, detail: String },
}

impl ApiFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Unstructured { status, .. } => Some(*status),
            Self::Connection { .. } | Self::Decode { .. } => None,
        }
    }

    /// The service's own message, when it sent a non-empty one.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => body
                .message
                .as_deref()
                .filter(|message| !message.trim().is_empty()),
            Self::Unstructured { .. } | Self::Connection { .. } | Self::Decode { .. } => None,
        }
    }

    /// Per-field messages, when the service sent a non-empty map.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Rejected { body, .. } => body.errors.as_ref().filter(|errors| !errors.is_empty()),
            Self::Unstructured { .. } | Self::Connection { .. } | Self::Decode { .. } => None,
        }
    }

    /// Text shown to the user: the service message, `fallback` for a rejection
    /// without one, or the generic connection message when there was no
    /// structured body at all.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected { .. } => self.service_message().unwrap_or(fallback).to_string(),
            Self::Unstructured { .. } | Self::Connection { .. } | Self::Decode { .. } => {
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn into_client_error(self, fallback: &str) -> ClientError {
        match &self {
            Self::Rejected { status, .. } => {
                let field_messages = self
                    .field_errors()
                    .map(field_messages_from)
                    .unwrap_or_default();
                ClientError::api_rejected(*status, &self.display_message(fallback), field_messages)
            }
            Self::Unstructured { status, detail } => {
                ClientError::api_rejected(*status, CONNECTION_ERROR_MESSAGE, Vec::new()).with_data(
                    json!({
                        "status": status,
                        "field_messages": [],
                        "detail": detail,
                    }),
                )
            }
            Self::Connection { url, detail } => ClientError::connection_failed(url, detail),
            Self::Decode { route, detail } => ClientError::internal_decode(route, detail),
        }
    }
}

pub fn field_messages_from(errors: &BTreeMap<String, String>) -> Vec<FieldMessage> {
    errors
        .iter()
        .map(|(name, message)| FieldMessage {
            field: name.clone(),
            label: Field::from_wire_name(name)
                .map(|field| field.label().to_string())
                .unwrap_or_else(|| name.clone()),
            message: message.clone(),
        })
        .collect()
}
