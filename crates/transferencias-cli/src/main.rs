mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use stdout_io::print_raw;
use transferencias_client::ClientError;

const ROOT_HELP: &str = "Transferências - schedule bank transfers from the terminal

Usage:
  transferencias <command>

Start here:
  transferencias health
  transferencias schedule --help
  transferencias statement
";

const TOP_LEVEL_HELP: &str = "Transferências - schedule bank transfers from the terminal

USAGE: transferencias <command>

Schedule a transfer:
  1. transferencias check --from <acct> --to <acct> --amount <valor>     Validate offline
  2. transferencias quote --amount <valor> --date <YYYY-MM-DD>           Ask the service for the fee
  3. transferencias schedule --from <acct> --to <acct> --amount <valor>  Quote and submit

Review what was scheduled:
  transferencias statement                                 All transfers, newest first
  transferencias statement --account <acct> --csv          Filter by account and export CSV
  transferencias show <id>                                 One transfer by id
  transferencias account <acct>                            Transfers touching one account

Service:
  transferencias health                                    Check the service is up

Every command accepts --json for machine-readable output and --api-url to
target another service (or set TRANSFERENCIAS_API_URL).
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if print_raw(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return Err(report_parse_error(&err, &raw_args)),
    };
    logging::init_logging();
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests exit successfully; everything else becomes an
/// `invalid_argument` failure in the requested output mode.
fn report_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string()
        };
        if print_raw(&text).is_err() {
            return ExitCode::from(2);
        }
        return ExitCode::SUCCESS;
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
            | ErrorKind::ArgumentConflict
            | ErrorKind::InvalidSubcommand
    ) {
        command_path_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::from(1)
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage block and "For more information" line.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// First subcommand name found in the raw args, for `--help` hints.
fn command_path_from_args(raw_args: &[String]) -> Option<&'static str> {
    raw_args
        .iter()
        .skip(1)
        .find_map(|value| match value.as_str() {
            "schedule" => Some("schedule"),
            "quote" => Some("quote"),
            "check" => Some("check"),
            "statement" => Some("statement"),
            "show" => Some("show"),
            "account" => Some("account"),
            "health" => Some("health"),
            _ => None,
        })
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

/// Failures the user cannot fix by changing the form input.
fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(error.code.as_str(), "connection_failed" | "config_invalid")
}
