//! The `Group` aggregate: one shared-expense ledger with its members and
//! transaction records.
//!
//! The group is plain in-memory state. Persistence and synchronization live
//! in an external collaborator that hands the engine consistent snapshots;
//! the engine validates writes at the point of entry and derives balances,
//! settlement plans and statistics on demand.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Member, NetBalance, ResultEngine, TransactionRecord, TransferInstruction, balance,
    members::name_key,
    money::SETTLE_EPSILON,
    records::RecordKind,
    settlement, statistics,
    statistics::{MemberSpending, MonthlyTotal},
};

/// What kind of group this is. Affects presentation only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    #[default]
    Trip,
    Household,
}

/// A shared-expense group.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    /// Document id assigned by the external store; opaque to the engine.
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// User id of the group creator; used for ownership checks.
    pub created_by: String,
    pub kind: GroupKind,
    /// Monthly budget cap for households. Display only.
    pub budget: Option<f64>,
    pub is_settled: bool,
    pub members: Vec<Member>,
    pub records: Vec<TransactionRecord>,
}

impl Group {
    pub fn new(name: String, created_by: &str, kind: GroupKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: String::new(),
            created_at: Utc::now(),
            created_by: created_by.to_string(),
            kind,
            budget: None,
            is_settled: false,
            members: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Adds a member with a trimmed, group-unique name.
    ///
    /// Uniqueness is case- and diacritic-insensitive, checked only here at
    /// insertion; renames elsewhere are not re-validated.
    pub fn add_member(
        &mut self,
        name: &str,
        email: Option<String>,
        payout_id: Option<String>,
    ) -> ResultEngine<Uuid> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidName(
                "member name must not be empty".to_string(),
            ));
        }
        let key = name_key(trimmed);
        if self.members.iter().any(|m| m.name_key() == key) {
            return Err(EngineError::ExistingKey(trimmed.to_string()));
        }

        let member = Member::new(trimmed.to_string(), email, payout_id);
        let member_id = member.id;
        self.members.push(member);
        Ok(member_id)
    }

    /// Removes a member together with every record they paid.
    ///
    /// Records where the member appears only as a settlement counterparty
    /// are kept; the balance computation tolerates the stale reference.
    pub fn remove_member(&mut self, member_id: Uuid) -> ResultEngine<Member> {
        match self.members.iter().position(|m| m.id == member_id) {
            Some(index) => {
                let member = self.members.remove(index);
                self.records.retain(|r| r.payer_id != member_id);
                Ok(member)
            }
            None => Err(EngineError::KeyNotFound(member_id.to_string())),
        }
    }

    #[must_use]
    pub fn member(&self, member_id: Uuid) -> Option<&Member> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Records an equal-split expense paid by `payer_id`.
    pub fn add_expense(
        &mut self,
        payer_id: Uuid,
        amount: f64,
        note: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        self.ensure_amount(amount)?;
        self.ensure_member(payer_id)?;

        let record =
            TransactionRecord::expense(payer_id, amount, note.trim().to_string(), created_at);
        let record_id = record.id;
        self.records.push(record);
        Ok(record_id)
    }

    /// Records an expense with an explicit per-member split map.
    ///
    /// The map must reference known members, carry positive values and sum
    /// to `amount` within tolerance. The map is stored for display/audit;
    /// the balance division itself stays the group-wide equal share.
    pub fn add_unequal_expense(
        &mut self,
        payer_id: Uuid,
        amount: f64,
        note: &str,
        created_at: DateTime<Utc>,
        splits: HashMap<Uuid, f64>,
    ) -> ResultEngine<Uuid> {
        self.ensure_amount(amount)?;
        self.ensure_member(payer_id)?;
        self.validate_splits(amount, &splits)?;

        let record = TransactionRecord::unequal_expense(
            payer_id,
            amount,
            note.trim().to_string(),
            created_at,
            splits,
        );
        let record_id = record.id;
        self.records.push(record);
        Ok(record_id)
    }

    /// Updates payer, amount and note of an existing expense.
    ///
    /// Settlements are immutable once recorded; delete and re-record instead.
    pub fn update_expense(
        &mut self,
        record_id: Uuid,
        payer_id: Uuid,
        amount: f64,
        note: &str,
    ) -> ResultEngine<()> {
        self.ensure_amount(amount)?;
        self.ensure_member(payer_id)?;

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| EngineError::KeyNotFound(record_id.to_string()))?;
        if record.kind == RecordKind::Settlement {
            return Err(EngineError::InvalidAmount(
                "settlement records cannot be edited".to_string(),
            ));
        }

        record.payer_id = payer_id;
        record.amount = amount;
        record.note = note.trim().to_string();
        Ok(())
    }

    /// Removes a record (expense or settlement) by id.
    pub fn remove_record(&mut self, record_id: Uuid) -> ResultEngine<TransactionRecord> {
        match self.records.iter().position(|r| r.id == record_id) {
            Some(index) => Ok(self.records.remove(index)),
            None => Err(EngineError::KeyNotFound(record_id.to_string())),
        }
    }

    /// Records a settlement payment: `payer_id` paid `amount` to
    /// `counterparty_id`, offsetting both balances directly.
    pub fn record_settlement(
        &mut self,
        payer_id: Uuid,
        counterparty_id: Uuid,
        amount: f64,
        note: &str,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Uuid> {
        self.ensure_amount(amount)?;
        self.ensure_member(payer_id)?;
        self.ensure_member(counterparty_id)?;
        if payer_id == counterparty_id {
            return Err(EngineError::InvalidAmount(
                "payer and counterparty must differ".to_string(),
            ));
        }

        let record = TransactionRecord::settlement(
            payer_id,
            counterparty_id,
            amount,
            note.trim().to_string(),
            created_at,
        );
        let record_id = record.id;
        self.records.push(record);
        Ok(record_id)
    }

    pub fn mark_settled(&mut self, is_settled: bool) {
        self.is_settled = is_settled;
    }

    /// Net balance per member, in member insertion order.
    #[must_use]
    pub fn balances(&self) -> Vec<NetBalance> {
        balance::compute_balances(&self.members, &self.records)
    }

    /// Transfer plan that zeroes out the current balances.
    #[must_use]
    pub fn settlement_plan(&self) -> Vec<TransferInstruction> {
        settlement::plan_settlements(&self.balances())
    }

    #[must_use]
    pub fn total_spent(&self) -> f64 {
        statistics::total_spent(&self.records)
    }

    #[must_use]
    pub fn spending_by_member(&self) -> Vec<MemberSpending> {
        statistics::spending_by_member(&self.members, &self.records)
    }

    #[must_use]
    pub fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        statistics::monthly_totals(&self.records)
    }

    fn ensure_amount(&self, amount: f64) -> ResultEngine<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_member(&self, member_id: Uuid) -> ResultEngine<()> {
        if self.member(member_id).is_none() {
            return Err(EngineError::KeyNotFound(member_id.to_string()));
        }
        Ok(())
    }

    fn validate_splits(&self, amount: f64, splits: &HashMap<Uuid, f64>) -> ResultEngine<()> {
        if splits.is_empty() {
            return Err(EngineError::InvalidSplit(
                "unequal split requires at least one entry".to_string(),
            ));
        }
        for (member_id, owed) in splits {
            self.ensure_member(*member_id)?;
            if !owed.is_finite() || *owed <= 0.0 {
                return Err(EngineError::InvalidSplit(format!(
                    "split for {member_id} must be > 0"
                )));
            }
        }
        let sum: f64 = splits.values().sum();
        if (sum - amount).abs() > SETTLE_EPSILON {
            return Err(EngineError::InvalidSplit(format!(
                "split values sum to {sum}, expected {amount}"
            )));
        }
        Ok(())
    }
}
