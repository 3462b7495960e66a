use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    SourceAccount,
    DestinationAccount,
    Amount,
    TransferDate,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::SourceAccount,
        Field::DestinationAccount,
        Field::Amount,
        Field::TransferDate,
    ];

    /// Name used by the service in request bodies and per-field error maps.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::SourceAccount => "contaOrigem",
            Self::DestinationAccount => "contaDestino",
            Self::Amount => "valorTransferencia",
            Self::TransferDate => "dataTransferencia",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SourceAccount => "Conta de origem",
            Self::DestinationAccount => "Conta de destino",
            Self::Amount => "Valor da transferência",
            Self::TransferDate => "Data da transferência",
        }
    }

    pub fn from_wire_name(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == value)
    }
}

/// Error kinds in display precedence order: when a field carries several,
/// the smallest one is the one shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Required,
    Pattern,
    BelowMinimum,
    AccountsEqual,
    PastDate,
    MinimumSameDay,
    MinimumNearTerm,
    FeeNotApplicable,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern => "pattern",
            Self::BelowMinimum => "min",
            Self::AccountsEqual => "accountsEqual",
            Self::PastDate => "pastDate",
            Self::MinimumSameDay => "minimumSameDay",
            Self::MinimumNearTerm => "minimumNearTerm",
            Self::FeeNotApplicable => "feeNotApplicable",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    by_field: BTreeMap<Field, BTreeSet<ErrorKind>>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: Field, kind: ErrorKind) {
        self.by_field.entry(field).or_default().insert(kind);
    }

    pub fn has(&self, field: Field, kind: ErrorKind) -> bool {
        self.by_field
            .get(&field)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    pub fn kinds(&self, field: Field) -> BTreeSet<ErrorKind> {
        self.by_field.get(&field).cloned().unwrap_or_default()
    }

    pub fn field_is_clean(&self, field: Field) -> bool {
        self.by_field.get(&field).is_none_or(BTreeSet::is_empty)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(BTreeSet::is_empty)
    }
}
