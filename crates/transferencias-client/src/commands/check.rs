use chrono::NaiveDate;

use crate::ClientResult;
use crate::commands::common::{TransferInput, fill_form, local_today};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CheckData;
use crate::schedule::form::TransferForm;

pub struct CheckRunOptions {
    pub input: TransferInput,
    pub today: NaiveDate,
}

pub fn run(input: TransferInput) -> ClientResult<SuccessEnvelope> {
    run_with_options(CheckRunOptions {
        input,
        today: local_today(),
    })
}

/// Local validation only. Every field counts as touched, so all latent
/// messages are reported.
#[doc(hidden)]
pub fn run_with_options(options: CheckRunOptions) -> ClientResult<SuccessEnvelope> {
    let mut form = TransferForm::new(options.today);
    fill_form(&mut form, &options.input);
    form.touch_all();

    let data = CheckData {
        valid: form.is_valid(),
        today: options.today,
        days_out: form.days_out(),
        bucket: form.bucket().map(|value| value.as_str().to_string()),
        quote_eligible: form.can_quote(),
        field_messages: form.visible_messages(),
    };
    success("check", data)
}
