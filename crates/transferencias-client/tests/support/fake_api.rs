use std::cell::RefCell;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use transferencias_client::api::{ApiFailure, TransferApi};
use transferencias_client::contracts::types::{
    ApiErrorBody, FeeQuote, HealthStatus, TransferRequest, TransferResponse,
};

pub const NO_FEE_MESSAGE: &str =
    "Transferência negada, não há taxa percentual aplicável para esta data";

pub fn fake_fee() -> Decimal {
    Decimal::new(1000, 2)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn today() -> NaiveDate {
    date(2026, 10, 19)
}

pub fn rejected(status: u16, message: &str) -> ApiFailure {
    ApiFailure::Rejected {
        status,
        body: ApiErrorBody {
            status: Some(status),
            message: Some(message.to_string()),
            ..ApiErrorBody::default()
        },
    }
}

pub fn unreachable() -> ApiFailure {
    ApiFailure::Connection {
        url: "http://127.0.0.1:9/api/transferencias".to_string(),
        detail: "connection refused".to_string(),
    }
}

pub fn transfer(
    id: i64,
    source: &str,
    amount: Decimal,
    fee: Decimal,
    scheduled: NaiveDate,
    transfer_date: NaiveDate,
) -> TransferResponse {
    TransferResponse {
        id,
        source_account: source.to_string(),
        destination_account: "5555555555".to_string(),
        amount,
        fee,
        transfer_date,
        scheduled_date: scheduled,
        days_out: transfer_date.signed_duration_since(scheduled).num_days(),
    }
}

/// Scripted transfer service that records every call it receives.
#[derive(Default)]
pub struct FakeTransferApi {
    quote_failure: Option<ApiFailure>,
    schedule_failure: Option<ApiFailure>,
    list_failure: Option<ApiFailure>,
    transfers: Vec<TransferResponse>,
    calls: RefCell<Vec<String>>,
}

impl FakeTransferApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote_failure(mut self, failure: ApiFailure) -> Self {
        self.quote_failure = Some(failure);
        self
    }

    pub fn with_schedule_failure(mut self, failure: ApiFailure) -> Self {
        self.schedule_failure = Some(failure);
        self
    }

    pub fn with_list_failure(mut self, failure: ApiFailure) -> Self {
        self.list_failure = Some(failure);
        self
    }

    pub fn with_transfers(mut self, transfers: Vec<TransferResponse>) -> Self {
        self.transfers = transfers;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl TransferApi for FakeTransferApi {
    fn schedule(&self, request: &TransferRequest) -> Result<TransferResponse, ApiFailure> {
        self.record(format!(
            "schedule {}->{} {} {}",
            request.source_account, request.destination_account, request.amount, request.transfer_date
        ));
        if let Some(failure) = &self.schedule_failure {
            return Err(failure.clone());
        }
        let mut created = transfer(
            101,
            &request.source_account,
            request.amount,
            fake_fee(),
            today(),
            request.transfer_date,
        );
        created.destination_account = request.destination_account.clone();
        Ok(created)
    }

    fn list(&self) -> Result<Vec<TransferResponse>, ApiFailure> {
        self.record("list".to_string());
        if let Some(failure) = &self.list_failure {
            return Err(failure.clone());
        }
        Ok(self.transfers.clone())
    }

    fn find_by_id(&self, id: i64) -> Result<TransferResponse, ApiFailure> {
        self.record(format!("find {id}"));
        self.transfers
            .iter()
            .find(|transfer| transfer.id == id)
            .cloned()
            .ok_or(ApiFailure::Unstructured {
                status: 404,
                detail: String::new(),
            })
    }

    fn list_by_account(&self, account: &str) -> Result<Vec<TransferResponse>, ApiFailure> {
        self.record(format!("account {account}"));
        Ok(self
            .transfers
            .iter()
            .filter(|transfer| transfer.source_account == account)
            .cloned()
            .collect())
    }

    fn quote_fee(&self, amount: Decimal, date: NaiveDate) -> Result<FeeQuote, ApiFailure> {
        self.record(format!("quote {amount} {date}"));
        if let Some(failure) = &self.quote_failure {
            return Err(failure.clone());
        }
        Ok(FeeQuote {
            amount,
            transfer_date: date,
            computed_fee: fake_fee(),
            days_out: date.signed_duration_since(today()).num_days(),
        })
    }

    fn health(&self) -> Result<HealthStatus, ApiFailure> {
        self.record("health".to_string());
        Ok(HealthStatus {
            status: "UP".to_string(),
            timestamp: None,
            service: Some("Sistema de Agendamento de Transferências".to_string()),
        })
    }

    fn base_url(&self) -> &str {
        "http://fake/api/transferencias"
    }
}
