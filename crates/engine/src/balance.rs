//! Net-balance computation for one group snapshot.
//!
//! The computation is a pure function of `(members, records)`: no I/O, no
//! internal state, identical inputs always produce identical outputs. The
//! surrounding application re-runs it on every snapshot refresh instead of
//! updating balances incrementally.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{Member, RecordKind, TransactionRecord};

/// Derived net position of one member.
///
/// Positive means the member is owed money (creditor), negative means the
/// member owes money (debtor). Never persisted; recomputed on every read.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetBalance {
    pub member_id: Uuid,
    pub name: String,
    /// Unrounded net amount. Rounding is a presentation concern.
    pub amount: f64,
}

/// Computes each member's net balance from the full transaction history.
///
/// Model:
/// - every expense contributes to a single pooled group cost, divided
///   equally among all members regardless of its split mode;
/// - the payer of every record (expense or settlement) is credited the full
///   amount;
/// - the counterparty of every settlement is debited the full amount.
///
/// So `balance(m) = paid_by(m) - received_by(m) - equal_share`.
///
/// Unequal-split data on an expense is retained for display and audit but
/// does not alter the division: the per-member deduction is always the
/// group-wide equal share. See DESIGN.md for the rationale behind keeping
/// this behavior.
///
/// Records whose `payer_id` or `counterparty_id` is not in `members` still
/// count toward the pooled cost, but their credit/debit steps are no-ops.
/// Stale references are therefore tolerated rather than rejected.
#[must_use]
pub fn compute_balances(members: &[Member], records: &[TransactionRecord]) -> Vec<NetBalance> {
    if members.is_empty() {
        return Vec::new();
    }

    let mut running: HashMap<Uuid, f64> = members.iter().map(|m| (m.id, 0.0)).collect();

    let group_cost: f64 = records
        .iter()
        .filter(|r| r.is_expense())
        .map(|r| r.amount)
        .sum();
    let equal_share = group_cost / members.len() as f64;

    for record in records {
        if let Some(balance) = running.get_mut(&record.payer_id) {
            *balance += record.amount;
        }
        if record.kind == RecordKind::Settlement
            && let Some(receiver_id) = record.counterparty_id
            && let Some(balance) = running.get_mut(&receiver_id)
        {
            *balance -= record.amount;
        }
    }

    members
        .iter()
        .map(|member| NetBalance {
            member_id: member.id,
            name: member.name.clone(),
            amount: running.get(&member.id).copied().unwrap_or_default() - equal_share,
        })
        .collect()
}
