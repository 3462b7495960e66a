use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::money::{absolute_minimum, parse_amount};
use crate::schedule::days::{DayBucket, classify, days_out};
use crate::schedule::field::{ErrorKind, Field, FieldErrors};

pub const ACCOUNT_DIGITS: usize = 10;

/// Raw text of the four form fields, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub source_account: String,
    pub destination_account: String,
    pub amount: String,
    pub transfer_date: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::SourceAccount => &self.source_account,
            Field::DestinationAccount => &self.destination_account,
            Field::Amount => &self.amount,
            Field::TransferDate => &self.transfer_date,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::SourceAccount => self.source_account = value,
            Field::DestinationAccount => self.destination_account = value,
            Field::Amount => self.amount = value,
            Field::TransferDate => self.transfer_date = value,
        }
    }

    pub fn parsed_amount(&self) -> Option<Decimal> {
        parse_amount(&self.amount)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.transfer_date)
    }
}

pub fn check_minimum(amount: Decimal, bucket: DayBucket) -> Option<ErrorKind> {
    let minimum = bucket.minimum()?;
    if amount >= minimum {
        return None;
    }
    match bucket {
        DayBucket::SameDay => Some(ErrorKind::MinimumSameDay),
        DayBucket::NearTerm => Some(ErrorKind::MinimumNearTerm),
        DayBucket::FarTerm => None,
    }
}

pub fn check_accounts_differ(source: &str, destination: &str) -> Option<ErrorKind> {
    if !source.is_empty() && !destination.is_empty() && source == destination {
        return Some(ErrorKind::AccountsEqual);
    }
    None
}

pub fn is_account_number(value: &str) -> bool {
    value.len() == ACCOUNT_DIGITS && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Strict `YYYY-MM-DD` with a real calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return None;
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Form-level validation pass. Cross-field rules read sibling values, so this
/// always evaluates the whole form rather than one field.
pub fn evaluate(values: &FormValues, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for field in [Field::SourceAccount, Field::DestinationAccount] {
        let value = values.get(field);
        if value.is_empty() {
            errors.insert(field, ErrorKind::Required);
        } else if !is_account_number(value) {
            errors.insert(field, ErrorKind::Pattern);
        }
    }
    if let Some(kind) =
        check_accounts_differ(&values.source_account, &values.destination_account)
    {
        errors.insert(Field::SourceAccount, kind);
        errors.insert(Field::DestinationAccount, kind);
    }

    let date = if values.transfer_date.is_empty() {
        errors.insert(Field::TransferDate, ErrorKind::Required);
        None
    } else {
        let parsed = values.parsed_date();
        if parsed.is_none() {
            errors.insert(Field::TransferDate, ErrorKind::Pattern);
        }
        parsed
    };
    let bucket = date.and_then(|value| classify(days_out(value, today)));
    if date.is_some() && bucket.is_none() {
        errors.insert(Field::TransferDate, ErrorKind::PastDate);
    }

    if values.amount.trim().is_empty() {
        errors.insert(Field::Amount, ErrorKind::Required);
    } else {
        match values.parsed_amount() {
            None => errors.insert(Field::Amount, ErrorKind::Pattern),
            Some(amount) => {
                if amount < absolute_minimum() {
                    errors.insert(Field::Amount, ErrorKind::BelowMinimum);
                }
                if let Some(kind) = bucket.and_then(|value| check_minimum(amount, value)) {
                    errors.insert(Field::Amount, kind);
                }
            }
        }
    }

    errors
}
