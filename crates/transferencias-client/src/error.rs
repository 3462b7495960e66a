use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::FieldMessage;
use crate::schedule::messages::CONNECTION_ERROR_MESSAGE;

pub(crate) const HELP_COMMAND: &str = "transferencias --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `transferencias {cmd} --help` for usage."),
            None => format!("Run `{HELP_COMMAND}` for usage."),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn config_invalid(variable: &str, detail: &str) -> Self {
        Self::new(
            "config_invalid",
            &format!("Configuration value `{variable}` is invalid: {detail}"),
            vec![format!(
                "Fix or unset `{variable}`, or pass `--api-url` explicitly."
            )],
        )
        .with_data(json!({
            "variable": variable,
        }))
    }

    pub fn connection_failed(url: &str, detail: &str) -> Self {
        Self::new(
            "connection_failed",
            CONNECTION_ERROR_MESSAGE,
            vec![
                format!("Check that the transfer service is reachable at `{url}`."),
                "Run `transferencias health` to confirm the service is up.".to_string(),
                "Set `TRANSFERENCIAS_API_URL` or pass `--api-url` to target another service."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "url": url,
            "detail": detail,
        }))
    }

    pub fn api_rejected(status: u16, message: &str, field_messages: Vec<FieldMessage>) -> Self {
        let mut recovery_steps = Vec::new();
        for field_message in &field_messages {
            recovery_steps.push(format!(
                "{}: {}",
                field_message.label, field_message.message
            ));
        }
        if recovery_steps.is_empty() {
            recovery_steps.push("Adjust the request and try again.".to_string());
        }

        Self::new("api_rejected", message, recovery_steps).with_data(json!({
            "status": status,
            "field_messages": field_messages,
        }))
    }

    pub fn form_invalid(field_messages: Vec<FieldMessage>) -> Self {
        let recovery_steps = field_messages
            .iter()
            .map(|field_message| format!("{}: {}", field_message.label, field_message.message))
            .collect::<Vec<String>>();

        Self::new(
            "form_invalid",
            "The transfer has validation errors. Nothing was sent to the service.",
            recovery_steps,
        )
        .with_data(json!({
            "field_messages": field_messages,
        }))
    }

    pub fn transfer_not_found(id: i64) -> Self {
        Self::new(
            "transfer_not_found",
            &format!("Transfer id `{id}` was not found."),
            vec!["Run `transferencias statement` to list scheduled transfers.".to_string()],
        )
        .with_data(json!({
            "id": id,
        }))
    }

    pub fn nothing_to_export() -> Self {
        Self::new(
            "nothing_to_export",
            "Não há transferências para exportar.",
            vec!["Relax the statement filters or schedule a transfer first.".to_string()],
        )
    }

    pub fn export_failed(path: &str, detail: &str) -> Self {
        Self::new(
            "export_failed",
            &format!("Could not write statement export to `{path}`: {detail}"),
            vec![format!("Choose a writable location for `{path}`.")],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn internal_decode(route: &str, detail: &str) -> Self {
        Self::new(
            "internal_decode_error",
            &format!("Unexpected response from `{route}`: {detail}"),
            vec!["Confirm the service version matches this client.".to_string()],
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;
    use crate::contracts::types::FieldMessage;

    #[test]
    fn form_invalid_lists_each_field_message_as_recovery_step() {
        let error = ClientError::form_invalid(vec![FieldMessage {
            field: "contaOrigem".to_string(),
            label: "Conta de origem".to_string(),
            message: "Conta de origem é obrigatório".to_string(),
        }]);

        assert_eq!(error.code, "form_invalid");
        assert_eq!(
            error.recovery_steps,
            vec!["Conta de origem: Conta de origem é obrigatório".to_string()]
        );
    }

    #[test]
    fn api_rejected_without_field_messages_still_offers_a_next_step() {
        let error = ClientError::api_rejected(400, "Dados inválidos", Vec::new());
        assert_eq!(error.recovery_steps.len(), 1);
        assert_eq!(error.message, "Dados inválidos");
    }
}
