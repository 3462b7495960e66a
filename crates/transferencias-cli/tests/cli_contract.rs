use std::fs;
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;

const EXPECTED_ROOT_HELP: &str = "Transferências - schedule bank transfers from the terminal

Usage:
  transferencias <command>

Start here:
  transferencias health
  transferencias schedule --help
  transferencias statement
";

fn run_cli(args: &[&str]) -> (Option<i32>, String) {
    run_cli_in(None, args)
}

fn run_cli_in(dir: Option<&Path>, args: &[&str]) -> (Option<i32>, String) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_transferencias"));
    command.args(args);
    if let Some(path) = dir {
        command.current_dir(path);
    }
    command.env_remove("TRANSFERENCIAS_API_URL");
    command.env_remove("TRANSFERENCIAS_TIMEOUT_SECS");
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let output = command.output();
    assert!(output.is_ok());
    if let Ok(result) = output {
        let stdout = String::from_utf8(result.stdout);
        assert!(stdout.is_ok());
        if let Ok(text) = stdout {
            return (result.status.code(), text);
        }
    }
    (None, String::new())
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "{body}");
    parsed.unwrap_or(Value::Null)
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0");
    assert!(listener.is_ok());
    let port = listener
        .ok()
        .and_then(|value| value.local_addr().ok())
        .map(|addr| addr.port())
        .unwrap_or(9);
    format!("http://127.0.0.1:{port}/api/transferencias")
}

#[test]
fn root_command_uses_short_plaintext_help() {
    let (code, body) = run_cli(&[]);
    assert_eq!(code, Some(0));
    assert_eq!(body, EXPECTED_ROOT_HELP);
}

#[test]
fn help_and_version_return_success_output() {
    let (help_code, help_body) = run_cli(&["--help"]);
    assert_eq!(help_code, Some(0));
    assert!(help_body.starts_with("Transferências - schedule bank transfers"));
    assert!(help_body.contains("transferencias statement --account <acct> --csv"));

    let (version_code, version_body) = run_cli(&["--version"]);
    assert_eq!(version_code, Some(0));
    assert_eq!(version_body.trim(), "transferencias 0.1.0");
}

#[test]
fn schedule_help_lists_the_minimum_rules() {
    let (code, body) = run_cli(&["schedule", "--help"]);
    assert_eq!(code, Some(0));
    assert!(body.contains("Same-day transfers need at least R$ 3,00."));
    assert!(body.contains("R$ 12,00"));
}

#[test]
fn valid_check_reports_json_success() {
    let (code, body) = run_cli(&[
        "check",
        "--from",
        "1234567890",
        "--to",
        "0987654321",
        "--amount",
        "100",
        "--json",
    ]);
    assert_eq!(code, Some(0));
    let value = parse_json(&body);
    assert_eq!(value["ok"], Value::Bool(true));
    assert_eq!(value["command"], "check");
    assert_eq!(value["data"]["valid"], Value::Bool(true));
    assert_eq!(value["data"]["bucket"], "same_day");
}

#[test]
fn invalid_check_lists_messages_in_text() {
    let (code, body) = run_cli(&[
        "check",
        "--from",
        "1234567890",
        "--to",
        "1234567890",
        "--amount",
        "100",
    ]);
    assert_eq!(code, Some(0));
    assert!(body.starts_with("Formulário com erros:"));
    assert!(body.contains("Conta de origem e destino devem ser diferentes"));
}

#[test]
fn unreachable_service_exits_with_connection_failed() {
    let url = closed_port_url();
    let (code, body) = run_cli(&["--api-url", &url, "health", "--json"]);
    assert_eq!(code, Some(2));
    let value = parse_json(&body);
    assert_eq!(value["error"]["code"], "connection_failed");
    assert_eq!(value["error"]["message"], "Erro de conexão com o servidor");
}

#[test]
fn non_http_api_url_is_a_config_error() {
    let (code, body) = run_cli(&["--api-url", "ftp://example.com", "health", "--json"]);
    assert_eq!(code, Some(2));
    let value = parse_json(&body);
    assert_eq!(value["error"]["code"], "config_invalid");
}

#[test]
fn unknown_flag_is_invalid_argument_with_command_hint() {
    let (code, body) = run_cli(&["statement", "--bogus", "--json"]);
    assert_eq!(code, Some(1));
    let value = parse_json(&body);
    assert_eq!(value["error"]["code"], "invalid_argument");
    assert_eq!(value["data"]["command_hint"], "statement");
}

#[test]
fn unknown_sort_column_is_rejected_in_text() {
    let (code, body) = run_cli(&["statement", "--sort", "valor"]);
    assert_eq!(code, Some(1));
    assert!(body.starts_with("Something went wrong."));
    assert!(body.contains("invalid_argument"));
    assert!(body.contains("Run `transferencias statement --help` for usage."));
}

#[test]
fn malformed_quote_date_fails_form_rules_without_contacting_service() {
    let url = closed_port_url();
    let (code, body) = run_cli(&[
        "--api-url",
        &url,
        "quote",
        "--amount",
        "10",
        "--date",
        "19/10/2026",
        "--json",
    ]);
    assert_eq!(code, Some(1));
    let value = parse_json(&body);
    assert_eq!(value["error"]["code"], "form_invalid");
    assert!(body.contains("Data deve usar o formato AAAA-MM-DD"));
}

#[test]
fn statement_export_writes_nothing_when_the_service_is_down() {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    if let Ok(value) = dir {
        let url = closed_port_url();
        let explicit = value.path().join("extrato.csv");
        let explicit_arg = explicit.display().to_string();

        let (code, body) = run_cli_in(
            Some(value.path()),
            &["--api-url", &url, "statement", "--csv", "--json"],
        );
        assert_eq!(code, Some(2));
        assert_eq!(parse_json(&body)["error"]["code"], "connection_failed");

        let (code, _) = run_cli_in(
            Some(value.path()),
            &["--api-url", &url, "statement", "--csv", &explicit_arg],
        );
        assert_eq!(code, Some(2));

        let entries = fs::read_dir(value.path())
            .map(|listing| listing.count())
            .unwrap_or(usize::MAX);
        assert_eq!(entries, 0);
    }
}
