//! Statement of scheduled transfers: filtering, ordering, totals and status.

pub mod export;

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::contracts::types::{StatementTotals, TransferResponse};
use crate::schedule::days::days_out;

pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar transferências. Tente novamente.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementFilter {
    /// Substring of the source account.
    pub account: Option<String>,
    /// Inclusive bounds on the scheduling date.
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl StatementFilter {
    pub fn matches(&self, transfer: &TransferResponse) -> bool {
        if let Some(needle) = self.account_needle()
            && !transfer.source_account.contains(needle)
        {
            return false;
        }
        if let Some(since) = self.since
            && transfer.scheduled_date < since
        {
            return false;
        }
        if let Some(until) = self.until
            && transfer.scheduled_date > until
        {
            return false;
        }
        true
    }

    pub fn account_needle(&self) -> Option<&str> {
        self.account
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    SourceAccount,
    DestinationAccount,
    Amount,
    Fee,
    TransferDate,
    ScheduledDate,
    DaysOut,
}

impl SortColumn {
    pub const ALL: [SortColumn; 8] = [
        SortColumn::Id,
        SortColumn::SourceAccount,
        SortColumn::DestinationAccount,
        SortColumn::Amount,
        SortColumn::Fee,
        SortColumn::TransferDate,
        SortColumn::ScheduledDate,
        SortColumn::DaysOut,
    ];

    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::SourceAccount => "contaOrigem",
            Self::DestinationAccount => "contaDestino",
            Self::Amount => "valorTransferencia",
            Self::Fee => "taxaTransferencia",
            Self::TransferDate => "dataTransferencia",
            Self::ScheduledDate => "dataAgendamento",
            Self::DaysOut => "diasParaTransferencia",
        }
    }

    pub fn from_wire_name(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.wire_name() == value)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::SourceAccount => "Conta de origem",
            Self::DestinationAccount => "Conta de destino",
            Self::Amount => "Valor",
            Self::Fee => "Taxa",
            Self::TransferDate => "Data da transferência",
            Self::ScheduledDate => "Data de agendamento",
            Self::DaysOut => "Dias para transferência",
        }
    }

    fn compare(self, left: &TransferResponse, right: &TransferResponse) -> Ordering {
        match self {
            Self::Id => left.id.cmp(&right.id),
            Self::SourceAccount => left.source_account.cmp(&right.source_account),
            Self::DestinationAccount => left.destination_account.cmp(&right.destination_account),
            Self::Amount => left.amount.cmp(&right.amount),
            Self::Fee => left.fee.cmp(&right.fee),
            Self::TransferDate => left.transfer_date.cmp(&right.transfer_date),
            Self::ScheduledDate => left.scheduled_date.cmp(&right.scheduled_date),
            Self::DaysOut => left.days_out.cmp(&right.days_out),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            column: SortColumn::ScheduledDate,
            direction: SortDirection::Descending,
        }
    }
}

impl SortOrder {
    /// Selecting the current column flips direction; a new column starts
    /// ascending.
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            return Self {
                column,
                direction: self.direction.flipped(),
            };
        }
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn sort(self, rows: &mut [TransferResponse]) {
        rows.sort_by(|left, right| {
            let ordering = self.column.compare(left, right);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Filters then orders `transfers`.
pub fn apply(
    transfers: Vec<TransferResponse>,
    filter: &StatementFilter,
    order: SortOrder,
) -> Vec<TransferResponse> {
    let mut rows = transfers
        .into_iter()
        .filter(|transfer| filter.matches(transfer))
        .collect::<Vec<TransferResponse>>();
    order.sort(&mut rows);
    rows
}

pub fn totals(rows: &[TransferResponse]) -> StatementTotals {
    StatementTotals {
        amount: rows.iter().map(|row| row.amount).sum::<Decimal>(),
        fees: rows.iter().map(|row| row.fee).sum::<Decimal>(),
    }
}

/// `Em N dia(s)` while the transfer date is ahead of `today`, otherwise
/// `Realizada`.
pub fn status_label(transfer_date: NaiveDate, today: NaiveDate) -> String {
    match days_out(transfer_date, today) {
        1 => "Em 1 dia".to_string(),
        days if days > 1 => format!("Em {days} dias"),
        _ => "Realizada".to_string(),
    }
}
