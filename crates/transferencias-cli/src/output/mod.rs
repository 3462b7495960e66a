mod error_text;
mod format;
mod health_text;
mod json;
mod mode;
mod statement_text;
mod transfer_text;

use std::io;

use transferencias_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::print_block;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    print_block(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    print_block(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "schedule" => transfer_text::render_schedule(&success.data),
        "quote" => transfer_text::render_quote(&success.data),
        "check" => transfer_text::render_check(&success.data),
        "statement" => statement_text::render_statement(&success.data),
        "show" | "account" => statement_text::render_lookup(&success.data),
        "health" => health_text::render_health(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
