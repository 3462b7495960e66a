use chrono::NaiveDate;

use crate::api::TransferApi;
use crate::commands::common::{connect, local_today};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::QuoteData;
use crate::schedule::field::Field;
use crate::schedule::form::TransferForm;
use crate::schedule::messages::DEFAULT_QUOTE_ERROR;
use crate::{ClientError, ClientResult};

pub struct QuoteRunOptions<'a> {
    pub amount: String,
    pub transfer_date: String,
    pub api: &'a dyn TransferApi,
    pub today: NaiveDate,
}

pub fn run(
    amount: String,
    transfer_date: String,
    api_url: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    let api = connect(api_url)?;
    run_with_options(QuoteRunOptions {
        amount,
        transfer_date,
        api: &api,
        today: local_today(),
    })
}

/// Asks for a fee quote only when the form itself would: amount and date both
/// pass local rules.
#[doc(hidden)]
pub fn run_with_options(options: QuoteRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mut form = TransferForm::new(options.today);
    form.set_value(Field::TransferDate, options.transfer_date);
    let ticket = form.set_value(Field::Amount, options.amount);
    form.touch(Field::Amount);
    form.touch(Field::TransferDate);

    let Some(ticket) = ticket else {
        let messages = form
            .visible_messages()
            .into_iter()
            .filter(|message| {
                message.field == Field::Amount.wire_name()
                    || message.field == Field::TransferDate.wire_name()
            })
            .collect();
        return Err(ClientError::form_invalid(messages));
    };

    match options.api.quote_fee(ticket.amount, ticket.date) {
        Ok(quote) => {
            let data = QuoteData {
                quote,
                bucket: form.bucket().map(|value| value.as_str().to_string()),
            };
            success("quote", data)
        }
        Err(failure) => Err(failure.into_client_error(DEFAULT_QUOTE_ERROR)),
    }
}
