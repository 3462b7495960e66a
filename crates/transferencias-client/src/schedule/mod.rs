pub mod days;
pub mod field;
pub mod form;
pub mod messages;
pub mod rules;

pub use days::{DayBucket, classify, days_out};
pub use field::{ErrorKind, Field, FieldErrors};
pub use form::{QuoteDisposition, QuoteTicket, SubmissionState, SubmitRefusal, TransferForm};
pub use rules::FormValues;
