use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::api::TransferApi;
use crate::commands::common::{TransferInput, connect, fill_form, local_today};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{FieldMessage, ScheduleData};
use crate::schedule::form::{SubmitRefusal, TransferForm};
use crate::schedule::messages::DEFAULT_SUBMIT_ERROR;
use crate::{ClientError, ClientResult};

pub struct ScheduleRunOptions<'a> {
    pub input: TransferInput,
    pub api: &'a dyn TransferApi,
    pub today: NaiveDate,
}

pub fn run(input: TransferInput, api_url: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let api = connect(api_url)?;
    run_with_options(ScheduleRunOptions {
        input,
        api: &api,
        today: local_today(),
    })
}

/// Fills the form, asks for the advisory fee quote, then submits. Nothing is
/// sent when the form is invalid.
#[doc(hidden)]
pub fn run_with_options(options: ScheduleRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut form = TransferForm::new(options.today);
    let ticket = fill_form(&mut form, &options.input);

    if let Some(ticket) = ticket {
        let outcome = options.api.quote_fee(ticket.amount, ticket.date);
        form.apply_quote(&ticket, outcome);
    }
    let quoted_fee = form.computed_fee();
    let quote_warning = form.global_error().map(str::to_string);
    let bucket = form.bucket().map(|value| value.as_str().to_string());
    if let Some(warning) = &quote_warning {
        debug!(%warning, "fee quote unavailable; submitting anyway");
    }

    let request = match form.begin_submit() {
        Ok(request) => request,
        Err(SubmitRefusal::Invalid) => {
            return Err(ClientError::form_invalid(form.visible_messages()));
        }
        Err(SubmitRefusal::InFlight) => {
            return Err(ClientError::new(
                "internal_submit_state",
                "A submission was already in flight.",
                Vec::new(),
            ));
        }
    };

    let outcome = options.api.schedule(&request);
    let failure = outcome.as_ref().err().cloned();
    form.complete_submit(outcome);

    if let Some(failure) = failure {
        form.touch_all();
        let error = failure.into_client_error(DEFAULT_SUBMIT_ERROR);
        return Err(with_form_messages(error, form.visible_messages()));
    }
    let Some(transfer) = form.created_transfer() else {
        return Err(ClientError::new(
            "internal_submit_state",
            "The submission finished without a result.",
            Vec::new(),
        ));
    };
    info!(id = transfer.id, "schedule command completed");
    let data = ScheduleData {
        transfer: transfer.clone(),
        quoted_fee,
        quote_warning,
        bucket,
    };
    success("schedule", data)
}

/// Adds the form's per-field messages, e.g. a date with no applicable fee, to
/// the error data of a failed submission.
fn with_form_messages(mut error: ClientError, messages: Vec<FieldMessage>) -> ClientError {
    let Ok(rendered) = serde_json::to_value(&messages) else {
        return error;
    };
    match error.data.as_mut().and_then(Value::as_object_mut) {
        Some(object) => {
            object.insert("form_messages".to_string(), rendered);
        }
        None => {
            error.data = Some(json!({ "form_messages": rendered }));
        }
    }
    error
}
