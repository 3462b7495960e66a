use std::path::PathBuf;

use chrono::NaiveDate;

use crate::api::TransferApi;
use crate::commands::common::{connect, local_today, parse_date_arg, statement_rows};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{StatementData, StatementFilterEcho};
use crate::statement::export::{default_export_file_name, export_to_path};
use crate::statement::{
    LOAD_ERROR_MESSAGE, SortColumn, SortDirection, SortOrder, StatementFilter, apply, totals,
};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// `extrato_transferencias_<today>.csv` in the working directory.
    DefaultName,
    Path(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementRequest {
    pub account: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    pub export: Option<ExportTarget>,
}

pub struct StatementRunOptions<'a> {
    pub request: StatementRequest,
    pub api: &'a dyn TransferApi,
    pub today: NaiveDate,
}

pub fn run(request: StatementRequest, api_url: Option<&str>) -> ClientResult<SuccessEnvelope> {
    let api = connect(api_url)?;
    run_with_options(StatementRunOptions {
        request,
        api: &api,
        today: local_today(),
    })
}

#[doc(hidden)]
pub fn run_with_options(options: StatementRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let request = options.request;
    let filter = StatementFilter {
        account: request.account,
        since: parse_optional_date(request.since.as_deref(), "--since")?,
        until: parse_optional_date(request.until.as_deref(), "--until")?,
    };
    if let (Some(since), Some(until)) = (filter.since, filter.until)
        && since > until
    {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`--since` ({since}) is after `--until` ({until})."),
            Some("statement"),
        ));
    }
    let order = resolve_order(request.sort.as_deref(), request.direction)?;

    let transfers = options
        .api
        .list()
        .map_err(|failure| failure.into_client_error(LOAD_ERROR_MESSAGE))?;
    let total_loaded = transfers.len();
    let filtered = apply(transfers, &filter, order);

    let export_path = match request.export {
        Some(target) => {
            let path = match target {
                ExportTarget::DefaultName => PathBuf::from(default_export_file_name(options.today)),
                ExportTarget::Path(path) => path,
            };
            export_to_path(&filtered, &path)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    let data = StatementData {
        today: options.today,
        filter: StatementFilterEcho {
            account: filter.account_needle().map(str::to_string),
            since: filter.since,
            until: filter.until,
        },
        sort_column: order.column.wire_name().to_string(),
        sort_direction: order.direction.as_str().to_string(),
        total_loaded,
        totals: totals(&filtered),
        rows: statement_rows(filtered, options.today),
        export_path,
    };
    success("statement", data)
}

fn parse_optional_date(value: Option<&str>, flag: &str) -> ClientResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_date_arg(raw, flag, "statement").map(Some),
        None => Ok(None),
    }
}

fn resolve_order(sort: Option<&str>, direction: Option<SortDirection>) -> ClientResult<SortOrder> {
    let mut order = SortOrder::default();
    if let Some(name) = sort {
        let column = SortColumn::from_wire_name(name).ok_or_else(|| {
            let known = SortColumn::ALL
                .iter()
                .map(|column| column.wire_name())
                .collect::<Vec<&str>>()
                .join(", ");
            ClientError::invalid_argument_with_recovery(
                &format!("Unknown sort column `{name}`."),
                vec![format!("Use one of: {known}.")],
            )
        })?;
        order = order.toggle(column);
    }
    if let Some(direction) = direction {
        order.direction = direction;
    }
    Ok(order)
}
