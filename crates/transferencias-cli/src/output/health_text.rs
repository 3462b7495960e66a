use std::io;

use serde_json::Value;

use super::format::{self, plain};

pub fn render_health(data: &Value) -> io::Result<String> {
    let health = data
        .get("health")
        .filter(|value| value.is_object())
        .ok_or_else(|| io::Error::other("health output requires health"))?;

    let status = health.get("status").and_then(Value::as_str).unwrap_or("");
    let headline = if status == "UP" {
        "Serviço de transferências disponível."
    } else {
        "Serviço de transferências respondeu com status inesperado."
    };

    let mut lines = vec![headline.to_string(), String::new()];
    let entries = vec![
        ("API:", plain(&data["api_url"])),
        ("Status:", plain(&health["status"])),
        ("Serviço:", plain(&health["service"])),
        ("Horário:", plain(&health["timestamp"])),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_health;

    #[test]
    fn up_service_renders_details() {
        let payload = json!({
            "api_url": "http://localhost:8080/api/transferencias",
            "health": { "status": "UP", "timestamp": "2026-10-19T10:00:00", "service": "transferencias" }
        });
        let rendered = render_health(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Serviço de transferências disponível."));
            assert!(text.contains("http://localhost:8080/api/transferencias"));
        }
    }

    #[test]
    fn missing_optional_fields_render_as_dash() {
        let payload = json!({ "api_url": "http://x", "health": { "status": "DOWN" } });
        let rendered = render_health(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("status inesperado"));
            assert!(text.contains("Serviço:  -"));
        }
    }
}
