//! Exact currency amounts and pt-BR display formatting.
//!
//! Amounts never pass through binary floating point on their way into a
//! comparison: field text is parsed straight into a [`Decimal`].

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Smallest amount the service accepts, before any day-bucket rule applies.
pub fn absolute_minimum() -> Decimal {
    Decimal::new(1, 2)
}

/// Parses user-entered amount text.
///
/// Accepts an optional leading `-`, digits, and at most one `.` or `,` decimal
/// separator followed by at most two digits. Rejects exponents, thousands
/// separators, `+` prefixes and bare separators (`.5`, `5.`).
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let normalized = unsigned.replace(',', ".");
    let (integer_part, fraction_part) = match normalized.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (normalized.as_str(), None),
    };

    if integer_part.is_empty() || !integer_part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction_part
        && (fraction.is_empty()
            || fraction.len() > 2
            || !fraction.bytes().all(|byte| byte.is_ascii_digit()))
    {
        return None;
    }

    let parsed = Decimal::from_str(&normalized).ok()?;
    if negative {
        return Some(-parsed);
    }
    Some(parsed)
}

/// `R$ 1.234,56`
pub fn format_brl(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {}", format_grouped(amount.abs()))
}

/// Two-decimal amount with a comma separator and no grouping, e.g. `1234,56`.
pub fn format_decimal_comma(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}

/// `dd/mm/yyyy`
pub fn format_br_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn format_grouped(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = integer.chars().collect::<Vec<char>>();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    format!("{grouped},{fraction}")
}
