//! Conversion between remote-store documents and engine types.
//!
//! The document shapes are lenient by design: legacy records omit `type`,
//! and a malformed settlement (missing receiver) is downgraded to an
//! expense instead of failing the whole snapshot.

use api_types::{
    expense::{ExpenseDoc, RecordType, SplitType},
    group::{GroupDoc, GroupType},
    member::MemberDoc,
    views::{BalanceView, GroupStatsView, MemberSpendingView, MonthlyTotalView, TransferView},
};
use engine::{
    Group, GroupKind, Member, NetBalance, RecordKind, SplitMode, TransactionRecord,
    TransferInstruction,
};

pub fn group_from_doc(doc: GroupDoc) -> Group {
    Group {
        id: doc.id,
        name: doc.name,
        description: doc.description.unwrap_or_default(),
        created_at: doc.created_at,
        created_by: doc.created_by,
        kind: match doc.group_type {
            GroupType::Trip => GroupKind::Trip,
            GroupType::Household => GroupKind::Household,
        },
        budget: doc.budget,
        is_settled: doc.is_settled,
        members: doc.members.into_iter().map(member_from_doc).collect(),
        records: doc.expenses.into_iter().map(record_from_doc).collect(),
    }
}

fn member_from_doc(doc: MemberDoc) -> Member {
    Member::with_id(doc.id, doc.name, doc.email, doc.upi_id)
}

fn record_from_doc(doc: ExpenseDoc) -> TransactionRecord {
    let kind = match (doc.record_type, doc.related_member_id) {
        (Some(RecordType::Settlement), Some(_)) => RecordKind::Settlement,
        (Some(RecordType::Settlement), None) => {
            tracing::warn!(record = %doc.id, "settlement without receiver, treating as expense");
            RecordKind::Expense
        }
        _ => RecordKind::Expense,
    };
    let is_settlement = kind == RecordKind::Settlement;

    TransactionRecord {
        id: doc.id,
        payer_id: doc.payer_id,
        amount: doc.amount,
        note: doc.note,
        created_at: doc.created_at,
        kind,
        counterparty_id: if is_settlement {
            doc.related_member_id
        } else {
            None
        },
        split_mode: if is_settlement {
            None
        } else {
            doc.split_type.map(|s| match s {
                SplitType::Equal => SplitMode::Equal,
                SplitType::Unequal => SplitMode::Unequal,
            })
        },
        splits: if is_settlement { None } else { doc.splits },
        category: doc.category_id,
    }
}

pub fn balance_view(balance: &NetBalance) -> BalanceView {
    BalanceView {
        member_id: balance.member_id,
        name: balance.name.clone(),
        amount: balance.amount,
    }
}

pub fn transfer_view(transfer: &TransferInstruction) -> TransferView {
    TransferView {
        from_member_id: transfer.from_member_id,
        from_name: transfer.from_name.clone(),
        to_member_id: transfer.to_member_id,
        to_name: transfer.to_name.clone(),
        amount: transfer.amount,
    }
}

pub fn stats_view(group: &Group) -> GroupStatsView {
    GroupStatsView {
        total_spent: group.total_spent(),
        spending_by_member: group
            .spending_by_member()
            .iter()
            .map(|s| MemberSpendingView {
                member_id: s.member_id,
                name: s.name.clone(),
                amount: s.amount,
            })
            .collect(),
        monthly_totals: group
            .monthly_totals()
            .iter()
            .map(|m| MonthlyTotalView {
                year: m.year,
                month: m.month,
                label: m.label(),
                amount: m.amount,
            })
            .collect(),
    }
}
