//! Settlement planning: turning net balances into a short list of
//! peer-to-peer transfers that zero out all debts.

use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    NetBalance,
    money::{SETTLE_EPSILON, round_cents},
};

/// One payer → payee instruction of a settlement plan.
///
/// Amounts are rounded to two decimals. Ephemeral output, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransferInstruction {
    pub from_member_id: Uuid,
    pub from_name: String,
    pub to_member_id: Uuid,
    pub to_name: String,
    pub amount: f64,
}

struct Party {
    member_id: Uuid,
    name: String,
    owed: f64,
}

/// Produces a settlement plan via greedy largest-debtor/largest-creditor
/// matching.
///
/// Members within [`SETTLE_EPSILON`] of zero are excluded. Both partitions
/// are sorted descending by magnitude with a stable sort, so ties keep the
/// input order: the output is deterministic for a given input ordering but
/// not canonical across reorderings.
///
/// The greedy matching is not guaranteed minimal in instruction count for
/// every debt graph, but it terminates in at most `debtors + creditors - 1`
/// instructions and each debtor's emitted transfers sum to their original
/// debt (modulo rounding tolerance). No instruction has the same member as
/// source and destination, and no instruction carries an amount ≤ 0.01.
#[must_use]
pub fn plan_settlements(balances: &[NetBalance]) -> Vec<TransferInstruction> {
    let mut debtors: Vec<Party> = Vec::new();
    let mut creditors: Vec<Party> = Vec::new();

    for balance in balances {
        if balance.amount < -SETTLE_EPSILON {
            debtors.push(Party {
                member_id: balance.member_id,
                name: balance.name.clone(),
                owed: -balance.amount,
            });
        } else if balance.amount > SETTLE_EPSILON {
            creditors.push(Party {
                member_id: balance.member_id,
                name: balance.name.clone(),
                owed: balance.amount,
            });
        }
    }

    // Vec::sort_by is stable; NaN cannot occur for amounts built from sums.
    debtors.sort_by(|a, b| b.owed.partial_cmp(&a.owed).unwrap_or(Ordering::Equal));
    creditors.sort_by(|a, b| b.owed.partial_cmp(&a.owed).unwrap_or(Ordering::Equal));

    let mut plan = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].owed.min(creditors[j].owed);

        if amount > SETTLE_EPSILON {
            plan.push(TransferInstruction {
                from_member_id: debtors[i].member_id,
                from_name: debtors[i].name.clone(),
                to_member_id: creditors[j].member_id,
                to_name: creditors[j].name.clone(),
                amount: round_cents(amount),
            });
        }

        debtors[i].owed -= amount;
        creditors[j].owed -= amount;

        if debtors[i].owed < SETTLE_EPSILON {
            i += 1;
        }
        if creditors[j].owed < SETTLE_EPSILON {
            j += 1;
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(name: &str, amount: f64) -> NetBalance {
        NetBalance {
            member_id: Uuid::new_v4(),
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn pairs_largest_debtor_with_largest_creditor_first() {
        let balances = [
            balance("a", 150.0),
            balance("b", -50.0),
            balance("c", -100.0),
        ];
        let plan = plan_settlements(&balances);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].from_name, "c");
        assert_eq!(plan[0].amount, 100.0);
        assert_eq!(plan[1].from_name, "b");
        assert_eq!(plan[1].amount, 50.0);
        assert!(plan.iter().all(|t| t.to_name == "a"));
    }

    #[test]
    fn skips_members_within_tolerance() {
        let balances = [balance("a", 0.005), balance("b", -0.009)];
        assert!(plan_settlements(&balances).is_empty());
    }

    #[test]
    fn both_cursors_advance_on_exact_match() {
        let balances = [
            balance("a", 40.0),
            balance("b", -40.0),
            balance("c", 25.0),
            balance("d", -25.0),
        ];
        let plan = plan_settlements(&balances);
        assert_eq!(plan.len(), 2);
    }
}
