use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Wire types mirror the transfer service's JSON field names.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "contaOrigem")]
    pub source_account: String,
    #[serde(rename = "contaDestino")]
    pub destination_account: String,
    #[serde(rename = "valorTransferencia", with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "dataTransferencia")]
    pub transfer_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    pub id: i64,
    #[serde(rename = "contaOrigem")]
    pub source_account: String,
    #[serde(rename = "contaDestino")]
    pub destination_account: String,
    #[serde(rename = "valorTransferencia", with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "taxaTransferencia", with = "rust_decimal::serde::arbitrary_precision")]
    pub fee: Decimal,
    #[serde(rename = "dataTransferencia")]
    pub transfer_date: NaiveDate,
    #[serde(rename = "dataAgendamento")]
    pub scheduled_date: NaiveDate,
    #[serde(rename = "diasParaTransferencia")]
    pub days_out: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    #[serde(rename = "valorTransferencia", with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "dataTransferencia")]
    pub transfer_date: NaiveDate,
    #[serde(rename = "taxaCalculada", with = "rust_decimal::serde::arbitrary_precision")]
    pub computed_fee: Decimal,
    #[serde(rename = "diasParaTransferencia")]
    pub days_out: i64,
}

/// Error body produced by the service for every 4xx/5xx it handles itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub field: String,
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleData {
    pub transfer: TransferResponse,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub quoted_fee: Option<Decimal>,
    pub quote_warning: Option<String>,
    pub bucket: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteData {
    pub quote: FeeQuote,
    pub bucket: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckData {
    pub valid: bool,
    pub today: NaiveDate,
    pub days_out: Option<i64>,
    pub bucket: Option<String>,
    pub quote_eligible: bool,
    pub field_messages: Vec<FieldMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementRow {
    #[serde(flatten)]
    pub transfer: TransferResponse,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementTotals {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub fees: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementFilterEcho {
    pub account: Option<String>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementData {
    pub today: NaiveDate,
    pub filter: StatementFilterEcho,
    pub sort_column: String,
    pub sort_direction: String,
    pub total_loaded: usize,
    pub rows: Vec<StatementRow>,
    pub totals: StatementTotals,
    pub export_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferLookupData {
    pub today: NaiveDate,
    pub rows: Vec<StatementRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub api_url: String,
    pub health: HealthStatus,
}
