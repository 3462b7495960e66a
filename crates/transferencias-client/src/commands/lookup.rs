use chrono::NaiveDate;

use crate::api::TransferApi;
use crate::commands::common::{connect, local_today, require_account, statement_rows};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TransferLookupData;
use crate::statement::{LOAD_ERROR_MESSAGE, SortOrder};
use crate::{ClientError, ClientResult};

pub struct LookupRunOptions<'a> {
    pub api: &'a dyn TransferApi,
    pub today: NaiveDate,
}

pub fn show(id: i64, api_url: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let api = connect(api_url)?;
    show_with_options(
        id,
        LookupRunOptions {
            api: &api,
            today: local_today(),
        },
    )
}

pub fn account(account: &str, api_url: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let account = require_account(account, "account")?;
    let api = connect(api_url)?;
    account_with_options(
        &account,
        LookupRunOptions {
            api: &api,
            today: local_today(),
        },
    )
}

#[doc(hidden)]
pub fn show_with_options(id: i64, options: LookupRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let transfer = options.api.find_by_id(id).map_err(|failure| {
        if failure.status() == Some(404) {
            return ClientError::transfer_not_found(id);
        }
        failure.into_client_error(LOAD_ERROR_MESSAGE)
    })?;

    let data = TransferLookupData {
        today: options.today,
        rows: statement_rows(vec![transfer], options.today),
    };
    success("show", data)
}

#[doc(hidden)]
pub fn account_with_options(
    account: &str,
    options: LookupRunOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let account = require_account(account, "account")?;
    let mut transfers = options
        .api
        .list_by_account(&account)
        .map_err(|failure| failure.into_client_error(LOAD_ERROR_MESSAGE))?;
    SortOrder::default().sort(&mut transfers);

    let data = TransferLookupData {
        today: options.today,
        rows: statement_rows(transfers, options.today),
    };
    success("account", data)
}
