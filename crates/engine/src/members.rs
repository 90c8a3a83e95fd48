//! The module contains the `Member` type, the identity unit of a group.

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use uuid::Uuid;

/// A participant in a shared-expense group.
///
/// The `id` is generated once and never changes, so a member can be renamed
/// without breaking the references held by transaction records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    /// Optional email used to associate the member with an external account.
    pub email: Option<String>,
    /// Optional payment handle (e.g. a UPI id).
    ///
    /// Consumed by external payment-link builders only; never used in any
    /// balance or settlement computation.
    pub payout_id: Option<String>,
}

impl Member {
    pub fn new(name: String, email: Option<String>, payout_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            payout_id,
        }
    }

    pub fn with_id(
        id: Uuid,
        name: String,
        email: Option<String>,
        payout_id: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            payout_id,
        }
    }

    /// Normalized key used for duplicate detection at insertion time.
    #[must_use]
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Normalizes a display name into a comparison key: NFKD, combining marks
/// stripped, lowercased, surrounding whitespace trimmed.
pub(crate) fn name_key(input: &str) -> String {
    let mut out = String::new();
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}
