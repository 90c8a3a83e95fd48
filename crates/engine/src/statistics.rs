//! Spending statistics derived from a group's transaction history.
//!
//! All figures are derived on demand from the record list; nothing here is
//! persisted. Settlements redistribute money rather than create cost, so
//! they are excluded from every spending total. The one exception is
//! [`member_net_for_month`], which reports a member's personal cash flow and
//! therefore counts settlements paid and received.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::{Member, RecordKind, TransactionRecord, money::round_cents};

/// Total paid per member, in member input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberSpending {
    pub member_id: Uuid,
    pub name: String,
    pub amount: f64,
}

/// Spending total for one calendar month (UTC).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub amount: f64,
}

impl MonthlyTotal {
    /// Human label, e.g. `"Mar 2026"`.
    #[must_use]
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

/// Sum of all expense amounts. Settlements excluded.
#[must_use]
pub fn total_spent(records: &[TransactionRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_expense())
        .map(|r| r.amount)
        .sum()
}

/// Expense totals paid by each member, zero for members who paid nothing.
#[must_use]
pub fn spending_by_member(
    members: &[Member],
    records: &[TransactionRecord],
) -> Vec<MemberSpending> {
    members
        .iter()
        .map(|member| MemberSpending {
            member_id: member.id,
            name: member.name.clone(),
            amount: records
                .iter()
                .filter(|r| r.is_expense() && r.payer_id == member.id)
                .map(|r| r.amount)
                .sum(),
        })
        .collect()
}

/// Expense totals per calendar month, covering every month between the
/// earliest and latest expense. Gap months appear with a zero total so
/// charts render a continuous axis. Totals are rounded to two decimals.
#[must_use]
pub fn monthly_totals(records: &[TransactionRecord]) -> Vec<MonthlyTotal> {
    let mut month_indices: Vec<i32> = records
        .iter()
        .filter(|r| r.is_expense())
        .map(|r| month_index(r.created_at.year(), r.created_at.month()))
        .collect();
    month_indices.sort_unstable();

    let (Some(&first), Some(&last)) = (month_indices.first(), month_indices.last()) else {
        return Vec::new();
    };

    (first..=last)
        .map(|index| {
            let (year, month) = from_month_index(index);
            let amount: f64 = records
                .iter()
                .filter(|r| {
                    r.is_expense()
                        && r.created_at.year() == year
                        && r.created_at.month() == month
                })
                .map(|r| r.amount)
                .sum();
            MonthlyTotal {
                year,
                month,
                amount: round_cents(amount),
            }
        })
        .collect()
}

/// Net amount a member personally moved in one calendar month: everything
/// they paid (expenses and settlements) minus settlements they received.
#[must_use]
pub fn member_net_for_month(
    member_id: Uuid,
    records: &[TransactionRecord],
    year: i32,
    month: u32,
) -> f64 {
    records
        .iter()
        .filter(|r| r.created_at.year() == year && r.created_at.month() == month)
        .fold(0.0, |net, record| {
            if record.payer_id == member_id {
                net + record.amount
            } else if record.kind == RecordKind::Settlement
                && record.counterparty_id == Some(member_id)
            {
                net - record.amount
            } else {
                net
            }
        })
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + (month as i32 - 1)
}

fn from_month_index(index: i32) -> (i32, u32) {
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense_at(amount: f64, year: i32, month: u32) -> TransactionRecord {
        let at = Utc
            .with_ymd_and_hms(year, month, 15, 12, 0, 0)
            .single()
            .unwrap_or_default();
        TransactionRecord::expense(Uuid::new_v4(), amount, String::new(), at)
    }

    #[test]
    fn monthly_totals_fill_gap_months() {
        let records = vec![expense_at(10.0, 2026, 1), expense_at(5.0, 2026, 4)];
        let totals = monthly_totals(&records);

        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0].amount, 10.0);
        assert_eq!(totals[1].amount, 0.0);
        assert_eq!(totals[2].amount, 0.0);
        assert_eq!(totals[3].amount, 5.0);
        assert_eq!(totals[0].label(), "Jan 2026");
    }

    #[test]
    fn monthly_totals_span_year_boundaries() {
        let records = vec![expense_at(1.0, 2025, 12), expense_at(2.0, 2026, 1)];
        let totals = monthly_totals(&records);

        assert_eq!(totals.len(), 2);
        assert_eq!((totals[0].year, totals[0].month), (2025, 12));
        assert_eq!((totals[1].year, totals[1].month), (2026, 1));
    }

    #[test]
    fn no_expenses_means_no_months() {
        assert!(monthly_totals(&[]).is_empty());
    }

    #[test]
    fn member_net_counts_payments_minus_settlements_received() {
        let member = Uuid::new_v4();
        let other = Uuid::new_v4();
        let march = Utc
            .with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
            .single()
            .unwrap_or_default();
        let february = Utc
            .with_ymd_and_hms(2026, 2, 10, 9, 0, 0)
            .single()
            .unwrap_or_default();

        let records = vec![
            TransactionRecord::expense(member, 80.0, String::new(), march),
            TransactionRecord::settlement(member, other, 20.0, String::new(), march),
            TransactionRecord::settlement(other, member, 30.0, String::new(), march),
            // Outside the queried month.
            TransactionRecord::expense(member, 999.0, String::new(), february),
        ];

        let net = member_net_for_month(member, &records, 2026, 3);
        assert!((net - 70.0).abs() < 1e-9);
        assert_eq!(member_net_for_month(member, &records, 2026, 5), 0.0);
    }
}
