use chrono::{Local, NaiveDate};

use crate::api::HttpTransferApi;
use crate::config;
use crate::contracts::types::{StatementRow, TransferResponse};
use crate::schedule::field::Field;
use crate::schedule::form::{QuoteTicket, TransferForm};
use crate::schedule::rules::{is_account_number, parse_iso_date};
use crate::statement::status_label;
use crate::{ClientError, ClientResult};

/// Raw field text for one transfer, as typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferInput {
    pub source_account: String,
    pub destination_account: String,
    pub amount: String,
    /// `None` keeps the form's default of today.
    pub transfer_date: Option<String>,
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn connect(api_url: Option<&str>) -> ClientResult<HttpTransferApi> {
    let config = config::resolve(api_url)?;
    HttpTransferApi::new(&config)
}

/// Enters `input` into `form` the way a user would, field by field, and
/// returns the fee lookup matching the final values, if the form asked for
/// one. Lookups superseded by later edits are skipped.
pub(crate) fn fill_form(form: &mut TransferForm, input: &TransferInput) -> Option<QuoteTicket> {
    let mut entries = vec![
        (Field::SourceAccount, input.source_account.as_str()),
        (Field::DestinationAccount, input.destination_account.as_str()),
        (Field::Amount, input.amount.as_str()),
    ];
    if let Some(date) = input.transfer_date.as_deref() {
        entries.push((Field::TransferDate, date));
    }

    let mut ticket = None;
    for (field, value) in entries {
        if let Some(next) = form.set_value(field, value) {
            ticket = Some(next);
        }
        form.touch(field);
    }
    ticket.filter(|value| form.is_current(value))
}

pub(crate) fn parse_date_arg(value: &str, flag: &str, command: &str) -> ClientResult<NaiveDate> {
    parse_iso_date(value).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`{flag}` must be a calendar date in YYYY-MM-DD format, got `{value}`."),
            Some(command),
        )
    })
}

pub(crate) fn require_account(value: &str, command: &str) -> ClientResult<String> {
    let trimmed = value.trim();
    if !is_account_number(trimmed) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("Account `{value}` must have exactly 10 digits."),
            Some(command),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn statement_rows(transfers: Vec<TransferResponse>, today: NaiveDate) -> Vec<StatementRow> {
    transfers
        .into_iter()
        .map(|transfer| StatementRow {
            status: status_label(transfer.transfer_date, today),
            transfer,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{TransferInput, fill_form, parse_date_arg, require_account};
    use crate::schedule::form::TransferForm;

    #[test]
    fn fill_form_returns_the_quote_for_the_final_values() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default();
        let mut form = TransferForm::new(today);
        let ticket = fill_form(
            &mut form,
            &TransferInput {
                source_account: "1234567890".to_string(),
                destination_account: "0987654321".to_string(),
                amount: "500".to_string(),
                transfer_date: Some("2026-11-30".to_string()),
            },
        );

        assert!(ticket.is_some());
        if let Some(value) = ticket {
            assert_eq!(value.date, NaiveDate::from_ymd_opt(2026, 11, 30).unwrap_or_default());
        }
        assert!(form.is_valid());
    }

    #[test]
    fn argument_parsers_reject_loose_input() {
        assert!(parse_date_arg("2026-02-30", "--since", "statement").is_err());
        assert!(require_account("12345", "account").is_err());
        assert_eq!(
            require_account(" 1234567890 ", "account").unwrap_or_default(),
            "1234567890"
        );
    }
}
