use std::io;

use serde_json::Value;
use transferencias_client::statement::SortColumn;

use super::format::{self, Align, Column, br_date, brl, plain};

const EMPTY_MESSAGE: &str = "Nenhuma transferência encontrada.";

pub fn render_statement(data: &Value) -> io::Result<String> {
    let rows = rows_of(data)?;

    let mut lines = vec!["Extrato de transferências".to_string(), String::new()];
    let mut entries = Vec::new();
    if let Some(account) = data.pointer("/filter/account").and_then(Value::as_str) {
        entries.push(("Conta:", account.to_string()));
    }
    if let Some(since) = data.pointer("/filter/since").filter(|value| !value.is_null()) {
        entries.push(("Desde:", br_date(since)));
    }
    if let Some(until) = data.pointer("/filter/until").filter(|value| !value.is_null()) {
        entries.push(("Até:", br_date(until)));
    }
    entries.push(("Ordenação:", sort_label(data)));
    entries.push((
        "Exibindo:",
        format!("{} de {}", rows.len(), plain(&data["total_loaded"])),
    ));
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());

    if rows.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
    } else {
        lines.extend(render_rows(rows));
        lines.push(String::new());
        let totals = vec![
            ("Total transferido:", brl(&data["totals"]["amount"])),
            ("Total em taxas:", brl(&data["totals"]["fees"])),
        ];
        lines.extend(format::key_value_rows(&totals, 2));
    }

    if let Some(path) = data.get("export_path").and_then(Value::as_str) {
        lines.push(String::new());
        lines.push(format!("Extrato exportado para {path}"));
    }

    Ok(lines.join("\n"))
}

/// Shared by `show` and `account`, which return the same row shape.
pub fn render_lookup(data: &Value) -> io::Result<String> {
    let rows = rows_of(data)?;
    if rows.is_empty() {
        return Ok(EMPTY_MESSAGE.to_string());
    }
    Ok(render_rows(rows).join("\n"))
}

fn rows_of(data: &Value) -> io::Result<&Vec<Value>> {
    data.get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("statement output requires rows"))
}

fn render_rows(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "ID",
            align: Align::Right,
        },
        Column {
            name: "Origem",
            align: Align::Left,
        },
        Column {
            name: "Destino",
            align: Align::Left,
        },
        Column {
            name: "Valor",
            align: Align::Right,
        },
        Column {
            name: "Taxa",
            align: Align::Right,
        },
        Column {
            name: "Transferência",
            align: Align::Left,
        },
        Column {
            name: "Agendamento",
            align: Align::Left,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
    ];
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                plain(&row["id"]),
                plain(&row["contaOrigem"]),
                plain(&row["contaDestino"]),
                brl(&row["valorTransferencia"]),
                brl(&row["taxaTransferencia"]),
                br_date(&row["dataTransferencia"]),
                br_date(&row["dataAgendamento"]),
                plain(&row["status"]),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table_or_blocks(&columns, &cells, format::terminal_width(), "Transferência")
}

fn sort_label(data: &Value) -> String {
    let column = data
        .get("sort_column")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let label = SortColumn::from_wire_name(column)
        .map(SortColumn::label)
        .unwrap_or(column);
    let direction = match data.get("sort_direction").and_then(Value::as_str) {
        Some("asc") => "crescente",
        _ => "decrescente",
    };
    format!("{label} ({direction})")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_lookup, render_statement};

    fn row() -> serde_json::Value {
        json!({
            "id": 3,
            "contaOrigem": "1234567890",
            "contaDestino": "0987654321",
            "valorTransferencia": 250.0,
            "taxaTransferencia": 8.25,
            "dataTransferencia": "2026-10-20",
            "dataAgendamento": "2026-10-18",
            "diasParaTransferencia": 2,
            "status": "Em 1 dia"
        })
    }

    #[test]
    fn statement_renders_rows_and_totals() {
        let payload = json!({
            "today": "2026-10-19",
            "filter": { "account": "1234567890", "since": null, "until": null },
            "sort_column": "dataAgendamento",
            "sort_direction": "desc",
            "total_loaded": 4,
            "rows": [row()],
            "totals": { "amount": 250.0, "fees": 8.25 },
            "export_path": "extrato_transferencias_2026-10-19.csv"
        });
        let rendered = render_statement(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Conta:"));
            assert!(text.contains("1 de 4"));
            assert!(text.contains("(decrescente)"));
            assert!(text.contains("Em 1 dia"));
            assert!(text.contains("Total em taxas:"));
            assert!(text.contains("R$ 8,25"));
            assert!(text.ends_with("Extrato exportado para extrato_transferencias_2026-10-19.csv"));
        }
    }

    #[test]
    fn empty_statement_says_so() {
        let payload = json!({
            "filter": { "account": null, "since": null, "until": null },
            "sort_column": "dataAgendamento",
            "sort_direction": "desc",
            "total_loaded": 0,
            "rows": [],
            "totals": { "amount": 0.0, "fees": 0.0 },
            "export_path": null
        });
        let rendered = render_statement(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.ends_with("Nenhuma transferência encontrada."));
            assert!(!text.contains("Total transferido:"));
        }
    }

    #[test]
    fn lookup_renders_table_or_empty_message() {
        let rendered = render_lookup(&json!({ "rows": [row()] }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("1234567890"));
            assert!(text.contains("20/10/2026"));
        }

        let empty = render_lookup(&json!({ "rows": [] }));
        assert!(matches!(empty.as_deref(), Ok("Nenhuma transferência encontrada.")));
        assert!(render_lookup(&json!({})).is_err());
    }
}
