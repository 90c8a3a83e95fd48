//! The module contains the `TransactionRecord` type representing a single
//! monetary event in a group.
//!
//! Both expenses and settlements are represented by the same record type,
//! mirroring how the surrounding document store keeps them in one list.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an expense is divided among the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    Equal,
    Unequal,
}

/// What a record represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Expense,
    Settlement,
}

/// A single monetary event.
///
/// For `kind = Expense` the optional `split_mode`/`splits` pair describes an
/// unequal division (member id → owed amount). For `kind = Settlement` the
/// `counterparty_id` names the member who *received* the payment and the
/// split fields are not applicable.
///
/// `amount > 0` is a caller-enforced precondition (see `Group`); the balance
/// computation itself treats records as trusted input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    /// The monetary originator: who handed over the money.
    pub payer_id: Uuid,
    pub amount: f64,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub kind: RecordKind,
    /// Receiver of a settlement payment. `None` for expenses.
    pub counterparty_id: Option<Uuid>,
    pub split_mode: Option<SplitMode>,
    /// Unequal-split map, kept for display and audit.
    pub splits: Option<HashMap<Uuid, f64>>,
    pub category: Option<String>,
}

impl TransactionRecord {
    /// Creates an equal-split expense.
    pub fn expense(payer_id: Uuid, amount: f64, note: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer_id,
            amount,
            note,
            created_at,
            kind: RecordKind::Expense,
            counterparty_id: None,
            split_mode: None,
            splits: None,
            category: None,
        }
    }

    /// Creates an expense carrying an explicit per-member split map.
    pub fn unequal_expense(
        payer_id: Uuid,
        amount: f64,
        note: String,
        created_at: DateTime<Utc>,
        splits: HashMap<Uuid, f64>,
    ) -> Self {
        Self {
            split_mode: Some(SplitMode::Unequal),
            splits: Some(splits),
            ..Self::expense(payer_id, amount, note, created_at)
        }
    }

    /// Creates a settlement: `payer_id` paid `amount` to `counterparty_id`.
    pub fn settlement(
        payer_id: Uuid,
        counterparty_id: Uuid,
        amount: f64,
        note: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer_id,
            amount,
            note,
            created_at,
            kind: RecordKind::Settlement,
            counterparty_id: Some(counterparty_id),
            split_mode: None,
            splits: None,
            category: None,
        }
    }

    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }

    #[must_use]
    pub fn is_settlement(&self) -> bool {
        self.kind == RecordKind::Settlement
    }
}
