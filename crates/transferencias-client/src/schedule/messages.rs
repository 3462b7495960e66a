use std::collections::BTreeSet;

use crate::schedule::field::{ErrorKind, Field};

pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão com o servidor";
pub const DEFAULT_SUBMIT_ERROR: &str = "Erro ao agendar transferência";
pub const DEFAULT_QUOTE_ERROR: &str = "Erro ao calcular a taxa da transferência";

/// Fragment the service uses when no percentage fee covers the requested date.
pub const FEE_NOT_APPLICABLE_FRAGMENT: &str = "não há taxa percentual aplicável";

pub fn indicates_fee_not_applicable(message: &str) -> bool {
    message.contains(FEE_NOT_APPLICABLE_FRAGMENT)
}

pub fn message_for(field: Field, kind: ErrorKind) -> String {
    match kind {
        ErrorKind::Required => format!("{} é obrigatório", field.label()),
        ErrorKind::Pattern => match field {
            Field::SourceAccount | Field::DestinationAccount => {
                format!("{} deve ter exatamente 10 dígitos", field.label())
            }
            Field::Amount => {
                "Valor deve ser um número com no máximo 2 casas decimais".to_string()
            }
            Field::TransferDate => "Data deve usar o formato AAAA-MM-DD".to_string(),
        },
        ErrorKind::BelowMinimum => "Valor deve ser maior que zero".to_string(),
        ErrorKind::AccountsEqual => "Conta de origem e destino devem ser diferentes".to_string(),
        ErrorKind::PastDate => "Data deve ser igual ou futura".to_string(),
        ErrorKind::MinimumSameDay => {
            "Valor deve ser maior ou igual a R$ 3,00 para transferências no mesmo dia".to_string()
        }
        ErrorKind::MinimumNearTerm => {
            "Valor deve ser maior ou igual a R$ 12,00 para transferências de 1 a 10 dias"
                .to_string()
        }
        ErrorKind::FeeNotApplicable => {
            "Transferência negada, não há taxa percentual aplicável para esta data".to_string()
        }
    }
}

/// First match wins: server message, then the highest-precedence error kind
/// (only once the field was touched or edited), then nothing.
pub fn resolve_message(
    field: Field,
    server_message: Option<&str>,
    kinds: &BTreeSet<ErrorKind>,
    interacted: bool,
) -> String {
    if let Some(message) = server_message {
        return message.to_string();
    }
    if !interacted {
        return String::new();
    }
    kinds
        .iter()
        .next()
        .map(|kind| message_for(field, *kind))
        .unwrap_or_default()
}
