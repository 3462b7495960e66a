use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::contracts::types::TransferResponse;
use crate::money::{format_br_date, format_decimal_comma};
use crate::{ClientError, ClientResult};

pub const CSV_HEADER: [&str; 8] = [
    "ID",
    "Conta Origem",
    "Conta Destino",
    "Valor Transferência",
    "Taxa",
    "Data Agendamento",
    "Data Transferência",
    "Dias para Transferência",
];

pub fn default_export_file_name(today: NaiveDate) -> String {
    format!("extrato_transferencias_{}.csv", today.format("%Y-%m-%d"))
}

/// Writes the statement rows as CSV. Amounts use a comma decimal separator,
/// so the writer quotes them.
pub fn write_csv<W>(rows: &[TransferResponse], writer: W) -> csv::Result<()>
where
    W: Write,
{
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for row in rows {
        csv_writer.write_record([
            row.id.to_string(),
            row.source_account.clone(),
            row.destination_account.clone(),
            format_decimal_comma(row.amount),
            format_decimal_comma(row.fee),
            format_br_date(&row.scheduled_date),
            format_br_date(&row.transfer_date),
            row.days_out.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_to_path(rows: &[TransferResponse], path: &Path) -> ClientResult<()> {
    if rows.is_empty() {
        return Err(ClientError::nothing_to_export());
    }

    let shown = path.display().to_string();
    let file =
        File::create(path).map_err(|error| ClientError::export_failed(&shown, &error.to_string()))?;
    write_csv(rows, file).map_err(|error| ClientError::export_failed(&shown, &error.to_string()))?;
    info!(path = %shown, rows = rows.len(), "statement exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::{default_export_file_name, export_to_path, write_csv};
    use crate::contracts::types::TransferResponse;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap_or_default()
    }

    fn row() -> TransferResponse {
        TransferResponse {
            id: 42,
            source_account: "1234567890".to_string(),
            destination_account: "0987654321".to_string(),
            amount: Decimal::new(100050, 2),
            fee: Decimal::new(25, 0),
            transfer_date: date(11, 3),
            scheduled_date: date(10, 19),
            days_out: 15,
        }
    }

    #[test]
    fn rows_use_day_first_dates_and_comma_decimals() {
        let mut buffer = Vec::new();
        let written = write_csv(&[row()], &mut buffer);
        assert!(written.is_ok());

        let text = String::from_utf8(buffer).unwrap_or_default();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "ID,Conta Origem,Conta Destino,Valor Transferência,Taxa,Data Agendamento,Data Transferência,Dias para Transferência"
            )
        );
        assert_eq!(
            lines.next(),
            Some("42,1234567890,0987654321,\"1000,50\",\"25,00\",19/10/2026,03/11/2026,15")
        );
    }

    #[test]
    fn file_name_carries_the_date() {
        assert_eq!(
            default_export_file_name(date(10, 19)),
            "extrato_transferencias_2026-10-19.csv"
        );
    }

    #[test]
    fn empty_statement_is_not_exported() {
        let dir = tempfile::tempdir();
        assert!(dir.is_ok());
        if let Ok(value) = dir {
            let path = value.path().join("extrato.csv");
            let result = export_to_path(&[], &path);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "nothing_to_export");
                assert_eq!(error.message, "Não há transferências para exportar.");
            }
            assert!(!path.exists());
        }
    }

    #[test]
    fn export_writes_the_file_and_reports_unwritable_paths() {
        let dir = tempfile::tempdir();
        assert!(dir.is_ok());
        if let Ok(value) = dir {
            let path = value.path().join("extrato.csv");
            assert!(export_to_path(&[row()], &path).is_ok());
            let written = std::fs::read_to_string(&path).unwrap_or_default();
            assert!(written.starts_with("ID,Conta Origem,Conta Destino"));

            let missing_dir = value.path().join("nao-existe").join("extrato.csv");
            let result = export_to_path(&[row()], &missing_dir);
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "export_failed");
                assert!(error.message.contains("nao-existe"));
            }
        }
    }
}
