use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const NEAR_TERM_MAX_DAYS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBucket {
    SameDay,
    NearTerm,
    FarTerm,
}

impl DayBucket {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameDay => "same_day",
            Self::NearTerm => "near_term",
            Self::FarTerm => "far_term",
        }
    }

    /// Client-side minimum for the bucket. Far-term transfers have none here;
    /// the service may still reject them.
    pub fn minimum(self) -> Option<Decimal> {
        match self {
            Self::SameDay => Some(Decimal::new(300, 2)),
            Self::NearTerm => Some(Decimal::new(1200, 2)),
            Self::FarTerm => None,
        }
    }
}

/// Whole calendar days from `reference` to `transfer_date`. Both are plain
/// dates, so there is no time-of-day or timezone component to drift.
pub fn days_out(transfer_date: NaiveDate, reference: NaiveDate) -> i64 {
    transfer_date.signed_duration_since(reference).num_days()
}

/// `None` for past dates.
pub fn classify(days_out: i64) -> Option<DayBucket> {
    match days_out {
        value if value < 0 => None,
        0 => Some(DayBucket::SameDay),
        value if value <= NEAR_TERM_MAX_DAYS => Some(DayBucket::NearTerm),
        _ => Some(DayBucket::FarTerm),
    }
}
