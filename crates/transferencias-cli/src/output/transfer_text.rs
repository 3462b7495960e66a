use std::io;

use serde_json::Value;

use super::format::{self, br_date, brl, plain};

pub fn render_schedule(data: &Value) -> io::Result<String> {
    let transfer = data
        .get("transfer")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("schedule output requires transfer"))?;

    let mut lines = vec![
        "Transferência agendada com sucesso!".to_string(),
        String::new(),
    ];
    let entries = vec![
        ("ID:", plain(&transfer["id"])),
        ("Conta de origem:", plain(&transfer["contaOrigem"])),
        ("Conta de destino:", plain(&transfer["contaDestino"])),
        ("Valor:", brl(&transfer["valorTransferencia"])),
        ("Taxa:", brl(&transfer["taxaTransferencia"])),
        ("Data da transferência:", br_date(&transfer["dataTransferencia"])),
        ("Agendada em:", br_date(&transfer["dataAgendamento"])),
        ("Prazo:", bucket_label(data.get("bucket"))),
    ];
    lines.extend(format::key_value_rows(&entries, 2));

    if let Some(warning) = data.get("quote_warning").and_then(Value::as_str) {
        lines.push(String::new());
        lines.push(format!("Aviso: {warning}"));
    }

    Ok(lines.join("\n"))
}

pub fn render_quote(data: &Value) -> io::Result<String> {
    let quote = data
        .get("quote")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("quote output requires quote"))?;

    let mut lines = vec!["Taxa calculada.".to_string(), String::new()];
    let entries = vec![
        ("Valor:", brl(&quote["valorTransferencia"])),
        ("Data da transferência:", br_date(&quote["dataTransferencia"])),
        ("Dias até a transferência:", plain(&quote["diasParaTransferencia"])),
        ("Prazo:", bucket_label(data.get("bucket"))),
        ("Taxa:", brl(&quote["taxaCalculada"])),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

pub fn render_check(data: &Value) -> io::Result<String> {
    let valid = data
        .get("valid")
        .and_then(Value::as_bool)
        .ok_or_else(|| io::Error::other("check output requires valid"))?;

    let mut lines = Vec::new();
    if valid {
        lines.push("Formulário válido.".to_string());
        lines.push(String::new());
        let entries = vec![
            ("Dias até a transferência:", plain(&data["days_out"])),
            ("Prazo:", bucket_label(data.get("bucket"))),
        ];
        lines.extend(format::key_value_rows(&entries, 2));
        return Ok(lines.join("\n"));
    }

    lines.push("Formulário com erros:".to_string());
    lines.push(String::new());
    let messages = data
        .get("field_messages")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    for message in &messages {
        let label = message.get("label").and_then(Value::as_str).unwrap_or("");
        let text = message.get("message").and_then(Value::as_str).unwrap_or("");
        lines.push(format!("  {label}: {text}"));
    }
    Ok(lines.join("\n"))
}

fn bucket_label(bucket: Option<&Value>) -> String {
    match bucket.and_then(Value::as_str) {
        Some("same_day") => "Mesmo dia".to_string(),
        Some("near_term") => "1 a 10 dias".to_string(),
        Some("far_term") => "Mais de 10 dias".to_string(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}
