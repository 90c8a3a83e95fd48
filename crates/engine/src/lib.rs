//! Balance and settlement engine for shared-expense groups.
//!
//! A group of members records expenses paid by individuals; the engine
//! derives each member's net position and a short list of peer-to-peer
//! transfers that zeroes out all debts. Everything here is synchronous,
//! in-memory computation: identity, persistence, receipts and payment links
//! are external collaborators that exchange plain snapshots with the engine.

use std::collections::HashMap;

pub use balance::{NetBalance, compute_balances};
pub use error::EngineError;
pub use group::{Group, GroupKind};
pub use members::Member;
pub use money::{CurrencySymbol, SETTLE_EPSILON, is_settled, round_cents};
pub use records::{RecordKind, SplitMode, TransactionRecord};
pub use settlement::{TransferInstruction, plan_settlements};
pub use statistics::{
    MemberSpending, MonthlyTotal, member_net_for_month, monthly_totals, spending_by_member,
    total_spent,
};

mod balance;
mod error;
mod group;
mod members;
mod money;
mod records;
mod settlement;
mod statistics;

type ResultEngine<T> = Result<T, EngineError>;

/// In-memory registry of groups, scoped by creator.
///
/// The external synchronization layer owns durability and refresh timing;
/// it pushes whole-group snapshots in via [`Engine::insert_group`]
/// (last-writer-wins) and reads derived results back out.
#[derive(Debug, Default)]
pub struct Engine {
    groups: HashMap<String, Group>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group owned by `created_by`, with the creator as its first
    /// member.
    pub fn create_group(
        &mut self,
        name: &str,
        creator_name: &str,
        created_by: &str,
        kind: GroupKind,
    ) -> ResultEngine<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidName(
                "group name must not be empty".to_string(),
            ));
        }

        let mut group = Group::new(trimmed.to_string(), created_by, kind);
        group.add_member(creator_name, None, None)?;

        let group_id = group.id.clone();
        self.groups.insert(group_id.clone(), group);
        Ok(group_id)
    }

    /// Replaces (or inserts) a group snapshot pushed by the persistence
    /// collaborator. Last writer wins; conflict resolution happens upstream.
    pub fn insert_group(&mut self, group: Group) {
        self.groups.insert(group.id.clone(), group);
    }

    /// Removes a group. Only its creator may delete it.
    pub fn delete_group(&mut self, group_id: &str, user_id: &str) -> ResultEngine<Group> {
        match self.groups.get(group_id) {
            Some(group) if group.created_by == user_id => {}
            _ => return Err(EngineError::KeyNotFound(group_id.to_string())),
        }
        self.groups
            .remove(group_id)
            .ok_or_else(|| EngineError::KeyNotFound(group_id.to_string()))
    }

    /// Returns a group, hiding its existence from non-owners.
    pub fn group(&self, group_id: &str, user_id: &str) -> ResultEngine<&Group> {
        match self.groups.get(group_id) {
            Some(group) if group.created_by == user_id => Ok(group),
            _ => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    pub fn group_mut(&mut self, group_id: &str, user_id: &str) -> ResultEngine<&mut Group> {
        match self.groups.get_mut(group_id) {
            Some(group) if group.created_by == user_id => Ok(group),
            _ => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    /// All groups created by `user_id`, newest first.
    #[must_use]
    pub fn groups_for(&self, user_id: &str) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self
            .groups
            .values()
            .filter(|g| g.created_by == user_id)
            .collect();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        groups
    }

    /// Flips the settled flag shown on group listings.
    pub fn set_settled(
        &mut self,
        group_id: &str,
        user_id: &str,
        is_settled: bool,
    ) -> ResultEngine<()> {
        self.group_mut(group_id, user_id)?.mark_settled(is_settled);
        Ok(())
    }
}
