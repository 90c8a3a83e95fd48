//! Plain data shapes exchanged with the collaborators around the engine.
//!
//! Incoming documents mirror the JSON kept by the external document store
//! (camelCase field names, optional legacy fields), so a snapshot can be
//! deserialized as-is. Outgoing views are what the presentation and
//! payment-link collaborators consume. This crate deliberately has no
//! dependency on the engine; conversions live with the callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod group {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum GroupType {
        #[default]
        Trip,
        Household,
    }

    /// One group document as stored remotely.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupDoc {
        pub id: String,
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        /// User id of the creator (authentication collaborator).
        pub created_by: String,
        #[serde(default)]
        pub members: Vec<super::member::MemberDoc>,
        #[serde(default)]
        pub expenses: Vec<super::expense::ExpenseDoc>,
        #[serde(default)]
        pub is_settled: bool,
        #[serde(rename = "type", default)]
        pub group_type: GroupType,
        /// Monthly budget limit for households.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub budget: Option<f64>,
    }
}

pub mod member {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MemberDoc {
        pub id: Uuid,
        pub name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        /// Payment handle used for building external payment links.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub upi_id: Option<String>,
        /// Link to a registered account, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub user_id: Option<String>,
    }
}

pub mod expense {
    use super::*;
    use std::collections::HashMap;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RecordType {
        Expense,
        Settlement,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum SplitType {
        Equal,
        Unequal,
    }

    /// One transaction record as stored remotely.
    ///
    /// Legacy documents predate the settlement feature and omit `type`;
    /// absent means `expense`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseDoc {
        pub id: Uuid,
        pub payer_id: Uuid,
        pub amount: f64,
        #[serde(default)]
        pub note: String,
        pub created_at: DateTime<Utc>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub record_type: Option<RecordType>,
        /// For settlements: the member who received the money.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub related_member_id: Option<Uuid>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub split_type: Option<SplitType>,
        /// Member id → owed amount for unequal splits.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub splits: Option<HashMap<Uuid, f64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category_id: Option<String>,
    }
}

pub mod views {
    use super::*;

    /// Net position of one member, presentation-ready.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceView {
        pub member_id: Uuid,
        pub name: String,
        /// Positive: is owed money. Negative: owes money.
        pub amount: f64,
    }

    /// One instruction of a settlement plan.
    ///
    /// Member ids let the payment-link collaborator resolve payout handles;
    /// names are included so the plan renders without another lookup.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransferView {
        pub from_member_id: Uuid,
        pub from_name: String,
        pub to_member_id: Uuid,
        pub to_name: String,
        pub amount: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MemberSpendingView {
        pub member_id: Uuid,
        pub name: String,
        pub amount: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthlyTotalView {
        pub year: i32,
        pub month: u32,
        pub label: String,
        pub amount: f64,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GroupStatsView {
        pub total_spent: f64,
        pub spending_by_member: Vec<MemberSpendingView>,
        pub monthly_totals: Vec<MonthlyTotalView>,
    }
}

#[cfg(test)]
mod tests {
    use super::expense::{ExpenseDoc, RecordType};

    #[test]
    fn legacy_expense_doc_defaults_to_expense() {
        let raw = r#"{
            "id": "7f2c1d34-9a10-4a7e-b1d2-3c4d5e6f7a80",
            "payerId": "11111111-2222-3333-4444-555555555555",
            "amount": 300.0,
            "note": "Dinner",
            "createdAt": "2026-03-01T18:30:00Z"
        }"#;

        let doc: ExpenseDoc = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.record_type, None);
        assert_ne!(doc.record_type, Some(RecordType::Settlement));
        assert!(doc.splits.is_none());
    }
}
