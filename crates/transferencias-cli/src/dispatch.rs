use transferencias_client::commands;
use transferencias_client::commands::common::TransferInput;
use transferencias_client::commands::statement::{ExportTarget, StatementRequest};
use transferencias_client::statement::SortDirection;
use transferencias_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    let api_url = cli.api_url.as_deref();
    match &cli.command {
        Commands::Schedule {
            from,
            to,
            amount,
            date,
            ..
        } => commands::schedule::run(transfer_input(from, to, amount, date), api_url),
        Commands::Quote { amount, date, .. } => {
            commands::quote::run(amount.clone(), date.clone(), api_url)
        }
        Commands::Check {
            from,
            to,
            amount,
            date,
            ..
        } => commands::check::run(transfer_input(from, to, amount, date)),
        Commands::Statement {
            account,
            since,
            until,
            sort,
            asc,
            desc,
            csv,
            ..
        } => {
            let request = StatementRequest {
                account: account.clone(),
                since: since.as_ref().map(|value| value.as_str().to_string()),
                until: until.as_ref().map(|value| value.as_str().to_string()),
                sort: sort.clone(),
                direction: sort_direction(*asc, *desc),
                export: csv.as_ref().map(|path| match path {
                    Some(path) => ExportTarget::Path(path.clone()),
                    None => ExportTarget::DefaultName,
                }),
            };
            commands::statement::run(request, api_url)
        }
        Commands::Show { id, .. } => commands::lookup::show(*id, api_url),
        Commands::Account { account, .. } => commands::lookup::account(account, api_url),
        Commands::Health { .. } => commands::health::run(api_url),
    }
}

fn transfer_input(
    from: &Option<String>,
    to: &Option<String>,
    amount: &Option<String>,
    date: &Option<String>,
) -> TransferInput {
    TransferInput {
        source_account: from.clone().unwrap_or_default(),
        destination_account: to.clone().unwrap_or_default(),
        amount: amount.clone().unwrap_or_default(),
        transfer_date: date.clone(),
    }
}

fn sort_direction(asc: bool, desc: bool) -> Option<SortDirection> {
    if asc {
        return Some(SortDirection::Ascending);
    }
    if desc {
        return Some(SortDirection::Descending);
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn check_dispatches_without_touching_the_network() {
        let parsed = parse_from([
            "transferencias",
            "check",
            "--from",
            "1234567890",
            "--to",
            "0987654321",
            "--amount",
            "1000",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let result = dispatch(&cli);
            assert!(result.is_ok());
            if let Ok(success) = result {
                assert_eq!(success.command, "check");
                assert_eq!(success.data["valid"], true);
            }
        }
    }

    #[test]
    fn invalid_api_url_is_reported_before_any_request() {
        let parsed = parse_from(["transferencias", "health", "--api-url", "localhost:8080"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let result = dispatch(&cli);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "config_invalid");
            }
        }
    }
}
