use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::api::ApiFailure;
use crate::contracts::types::{FeeQuote, FieldMessage, TransferRequest, TransferResponse};
use crate::schedule::days::{DayBucket, classify, days_out};
use crate::schedule::field::{ErrorKind, Field, FieldErrors};
use crate::schedule::messages::{
    DEFAULT_QUOTE_ERROR, DEFAULT_SUBMIT_ERROR, indicates_fee_not_applicable, resolve_message,
};
use crate::schedule::rules::{FormValues, evaluate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "loading",
            Self::Succeeded => "success",
            Self::Failed => "error",
        }
    }
}

/// A fee lookup the driver should perform on the form's behalf. The outcome
/// goes back through [`TransferForm::apply_quote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTicket {
    pub seq: u64,
    pub amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteDisposition {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    InFlight,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteProgress {
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
struct LastQuote {
    seq: u64,
    amount: Decimal,
    date: NaiveDate,
    progress: QuoteProgress,
}

#[derive(Debug, Clone, Copy, Default)]
struct Interaction {
    dirty: bool,
    touched: bool,
}

/// Scheduling form: field values, validation state, the advisory fee quote and
/// the submission state machine. All remote calls happen outside; the form only
/// hands out requests and absorbs their outcomes.
#[derive(Debug, Clone)]
pub struct TransferForm {
    today: NaiveDate,
    values: FormValues,
    interaction: BTreeMap<Field, Interaction>,
    local_errors: FieldErrors,
    // Remote namespace, merged over local kinds only when read.
    fee_not_applicable: bool,
    server_messages: BTreeMap<Field, String>,
    global_error: Option<String>,
    computed_fee: Option<Decimal>,
    submission: SubmissionState,
    created: Option<TransferResponse>,
    next_seq: u64,
    last_quote: Option<LastQuote>,
}

impl TransferForm {
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Self {
            today,
            values: seeded_values(today),
            interaction: BTreeMap::new(),
            local_errors: FieldErrors::default(),
            fee_not_applicable: false,
            server_messages: BTreeMap::new(),
            global_error: None,
            computed_fee: None,
            submission: SubmissionState::Idle,
            created: None,
            next_seq: 0,
            last_quote: None,
        };
        form.revalidate();
        form
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Moves the reference date, e.g. when the form outlives midnight.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        self.revalidate();
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// Records an edit and re-evaluates the whole form. Returns a fee lookup to
    /// perform when amount and date are both usable.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> Option<QuoteTicket> {
        self.values.set(field, value.into());
        self.interaction.entry(field).or_default().dirty = true;
        self.on_change()
    }

    pub fn touch(&mut self, field: Field) {
        self.interaction.entry(field).or_default().touched = true;
    }

    pub fn touch_all(&mut self) {
        for field in Field::ALL {
            self.touch(field);
        }
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.interaction
            .get(&field)
            .is_some_and(|interaction| interaction.touched)
    }

    pub fn is_dirty(&self, field: Field) -> bool {
        self.interaction
            .get(&field)
            .is_some_and(|interaction| interaction.dirty)
    }

    pub fn days_out(&self) -> Option<i64> {
        self.values
            .parsed_date()
            .map(|date| days_out(date, self.today))
    }

    pub fn bucket(&self) -> Option<DayBucket> {
        self.days_out().and_then(classify)
    }

    /// Local kinds merged with the server-side override for `field`.
    pub fn errors(&self, field: Field) -> BTreeSet<ErrorKind> {
        let mut kinds = self.local_errors.kinds(field);
        if field == Field::TransferDate && self.fee_not_applicable {
            kinds.insert(ErrorKind::FeeNotApplicable);
        }
        kinds
    }

    pub fn has_error(&self, field: Field, kind: ErrorKind) -> bool {
        self.errors(field).contains(&kind)
    }

    /// Whether every locally checkable rule passes. The server override does
    /// not count: the quote lookup is advisory.
    pub fn is_valid(&self) -> bool {
        self.local_errors.is_empty()
    }

    pub fn can_quote(&self) -> bool {
        self.quote_params().is_some()
    }

    pub fn message(&self, field: Field) -> String {
        let interacted = self.is_touched(field) || self.is_dirty(field);
        resolve_message(
            field,
            self.server_messages.get(&field).map(String::as_str),
            &self.errors(field),
            interacted,
        )
    }

    pub fn visible_messages(&self) -> Vec<FieldMessage> {
        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let message = self.message(field);
                if message.is_empty() {
                    return None;
                }
                Some(FieldMessage {
                    field: field.wire_name().to_string(),
                    label: field.label().to_string(),
                    message,
                })
            })
            .collect()
    }

    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }

    pub fn computed_fee(&self) -> Option<Decimal> {
        self.computed_fee
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_loading(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    pub fn created_transfer(&self) -> Option<&TransferResponse> {
        self.created.as_ref()
    }

    /// Whether `ticket` still matches the current amount and date.
    pub fn is_current(&self, ticket: &QuoteTicket) -> bool {
        self.quote_params() == Some((ticket.amount, ticket.date))
    }

    /// Absorbs a fee lookup outcome. Outcomes for parameters that no longer
    /// match the current field values are dropped.
    pub fn apply_quote(
        &mut self,
        ticket: &QuoteTicket,
        outcome: Result<FeeQuote, ApiFailure>,
    ) -> QuoteDisposition {
        if !self.is_current(ticket) {
            debug!(seq = ticket.seq, "dropping stale fee quote");
            return QuoteDisposition::Stale;
        }

        let progress = match outcome {
            Ok(quote) => {
                debug!(seq = ticket.seq, fee = %quote.computed_fee, "fee quote applied");
                self.computed_fee = Some(quote.computed_fee);
                self.fee_not_applicable = false;
                QuoteProgress::Succeeded
            }
            Err(failure) => {
                let message = failure.display_message(DEFAULT_QUOTE_ERROR);
                debug!(seq = ticket.seq, %message, "fee quote rejected");
                self.computed_fee = None;
                if indicates_fee_not_applicable(&message) {
                    self.fee_not_applicable = true;
                }
                self.global_error = Some(message);
                QuoteProgress::Failed
            }
        };

        if let Some(last) = self.last_quote.as_mut()
            && last.amount == ticket.amount
            && last.date == ticket.date
        {
            last.progress = progress;
        }
        QuoteDisposition::Applied
    }

    /// Starts a submission and returns the request to send. An invalid form
    /// marks every field touched instead, so latent errors become visible.
    pub fn begin_submit(&mut self) -> Result<TransferRequest, SubmitRefusal> {
        if self.submission == SubmissionState::Submitting {
            warn!("submission already in flight");
            return Err(SubmitRefusal::InFlight);
        }
        let request = match self.transfer_request() {
            Some(request) if self.is_valid() => request,
            _ => {
                self.touch_all();
                return Err(SubmitRefusal::Invalid);
            }
        };

        self.clear_transient();
        self.submission = SubmissionState::Submitting;
        Ok(request)
    }

    pub fn complete_submit(&mut self, outcome: Result<TransferResponse, ApiFailure>) {
        if self.submission != SubmissionState::Submitting {
            warn!("submission outcome arrived with nothing in flight");
            return;
        }

        match outcome {
            Ok(transfer) => {
                info!(id = transfer.id, fee = %transfer.fee, "transfer scheduled");
                self.created = Some(transfer);
                self.reset_fields();
                self.submission = SubmissionState::Succeeded;
            }
            Err(failure) => {
                self.submission = SubmissionState::Failed;
                self.absorb_submit_failure(&failure);
            }
        }
    }

    /// Leaves the success state so another transfer can be entered.
    pub fn new_transfer(&mut self) {
        if self.submission == SubmissionState::Succeeded {
            self.submission = SubmissionState::Idle;
        }
        self.created = None;
        self.clear_transient();
    }

    fn on_change(&mut self) -> Option<QuoteTicket> {
        self.clear_transient();
        if self.submission == SubmissionState::Failed {
            self.submission = SubmissionState::Idle;
        }
        self.revalidate();
        self.next_quote_ticket()
    }

    fn clear_transient(&mut self) {
        self.global_error = None;
        self.server_messages.clear();
        self.fee_not_applicable = false;
    }

    fn revalidate(&mut self) {
        self.local_errors = evaluate(&self.values, self.today);
    }

    fn quote_params(&self) -> Option<(Decimal, NaiveDate)> {
        if !self.local_errors.field_is_clean(Field::Amount)
            || !self.local_errors.field_is_clean(Field::TransferDate)
        {
            return None;
        }
        let amount = self.values.parsed_amount()?;
        let date = self.values.parsed_date()?;
        if amount <= Decimal::ZERO {
            return None;
        }
        Some((amount, date))
    }

    fn next_quote_ticket(&mut self) -> Option<QuoteTicket> {
        let Some((amount, date)) = self.quote_params() else {
            self.computed_fee = None;
            return None;
        };

        if let Some(last) = &self.last_quote
            && last.amount == amount
            && last.date == date
        {
            if last.progress != QuoteProgress::Failed {
                debug!(seq = last.seq, "fee quote for these values already requested");
                return None;
            }
        } else {
            self.computed_fee = None;
        }

        self.next_seq += 1;
        self.last_quote = Some(LastQuote {
            seq: self.next_seq,
            amount,
            date,
            progress: QuoteProgress::Pending,
        });
        debug!(seq = self.next_seq, %amount, %date, "fee quote requested");
        Some(QuoteTicket {
            seq: self.next_seq,
            amount,
            date,
        })
    }

    fn transfer_request(&self) -> Option<TransferRequest> {
        Some(TransferRequest {
            source_account: self.values.source_account.clone(),
            destination_account: self.values.destination_account.clone(),
            amount: self.values.parsed_amount()?,
            transfer_date: self.values.parsed_date()?,
        })
    }

    fn absorb_submit_failure(&mut self, failure: &ApiFailure) {
        if let Some(errors) = failure.field_errors() {
            let mut unmatched = Vec::new();
            for (name, message) in errors {
                match Field::from_wire_name(name) {
                    Some(field) => {
                        self.server_messages.insert(field, message.clone());
                    }
                    None => unmatched.push(format!("{name}: {message}")),
                }
            }
            warn!(fields = errors.len(), "service rejected transfer fields");
            if !unmatched.is_empty() {
                self.global_error = Some(unmatched.join("; "));
            }
            return;
        }

        let message = failure.display_message(DEFAULT_SUBMIT_ERROR);
        warn!(%message, "service rejected transfer");
        if indicates_fee_not_applicable(&message) {
            self.fee_not_applicable = true;
        }
        self.global_error = Some(message);
    }

    fn reset_fields(&mut self) {
        self.values = seeded_values(self.today);
        self.interaction.clear();
        self.computed_fee = None;
        self.last_quote = None;
        self.clear_transient();
        self.revalidate();
    }
}

fn seeded_values(today: NaiveDate) -> FormValues {
    FormValues {
        transfer_date: today.format("%Y-%m-%d").to_string(),
        ..FormValues::default()
    }
}
