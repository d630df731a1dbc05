//! Transaction types
//!
//! A transaction records an item and/or request moving between an owner
//! and a borrower, with an optional date range and the savings the
//! exchange produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of exchange took place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Item lent for a period
    Borrow,
    /// Item given away
    Donate,
    /// Borrowed item handed back
    Return,
}

/// Lifecycle status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Agreed but not started
    Pending,
    /// Item is with the borrower
    Active,
    /// Exchange finished
    Completed,
    /// Called off
    Cancelled,
}

/// Which side of a transaction a user is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    /// The user receiving the item
    Borrower,
    /// The user providing the item
    Owner,
}

impl PartyRole {
    /// Parse the `type` query parameter; anything else means both sides
    pub fn from_query(raw: &str) -> Option<Self> {
        match raw {
            "borrower" => Some(PartyRole::Borrower),
            "owner" => Some(PartyRole::Owner),
            _ => None,
        }
    }
}

/// A record of an item moving between owner and borrower
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,
    /// Item being exchanged, if any
    pub item_id: Option<Uuid>,
    /// Request being fulfilled, if any
    pub request_id: Option<Uuid>,
    /// The user receiving the item
    pub borrower_id: Uuid,
    /// The user providing the item
    pub owner_id: Uuid,
    /// What kind of exchange this is
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Lifecycle status, `pending` on creation
    pub status: TransactionStatus,
    /// When the exchange begins
    pub start_date: Option<DateTime<Utc>>,
    /// When the item is due back
    pub end_date: Option<DateTime<Utc>>,
    /// When the item actually came back
    pub actual_return_date: Option<DateTime<Utc>>,
    /// CO2 savings attributed to this exchange
    pub co2_saved: Option<String>,
    /// Money savings attributed to this exchange
    pub money_saved: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Payload for recording a new transaction
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Item being exchanged, if any
    #[serde(default)]
    pub item_id: Option<Uuid>,
    /// Request being fulfilled, if any
    #[serde(default)]
    pub request_id: Option<Uuid>,
    /// The user receiving the item
    pub borrower_id: Uuid,
    /// The user providing the item
    pub owner_id: Uuid,
    /// What kind of exchange this is
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the exchange begins
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// When the item is due back
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// CO2 savings attributed to this exchange
    #[serde(default)]
    pub co2_saved: Option<String>,
    /// Money savings attributed to this exchange
    #[serde(default)]
    pub money_saved: Option<String>,
}

/// Partial update for a transaction; unset fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionPatch {
    /// Advance or cancel the exchange
    pub status: Option<TransactionStatus>,
    /// Set when the exchange begins
    pub start_date: Option<DateTime<Utc>>,
    /// Set when the item is due back
    pub end_date: Option<DateTime<Utc>>,
    /// Record the actual hand-back time
    pub actual_return_date: Option<DateTime<Utc>>,
    /// Set the attributed CO2 savings
    pub co2_saved: Option<String>,
    /// Set the attributed money savings
    pub money_saved: Option<String>,
}

impl TransactionPatch {
    /// Merge this patch over a transaction, leaving unset fields untouched.
    /// The caller refreshes `updated_at`.
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(status) = self.status {
            transaction.status = status;
        }
        if let Some(start_date) = self.start_date {
            transaction.start_date = Some(start_date);
        }
        if let Some(end_date) = self.end_date {
            transaction.end_date = Some(end_date);
        }
        if let Some(actual_return_date) = self.actual_return_date {
            transaction.actual_return_date = Some(actual_return_date);
        }
        if let Some(co2_saved) = self.co2_saved {
            transaction.co2_saved = Some(co2_saved);
        }
        if let Some(money_saved) = self.money_saved {
            transaction.money_saved = Some(money_saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_under_the_type_key() {
        // Goal: the Rust-reserved word `type` still appears on the wire
        let payload = r#"{
            "borrowerId": "8c5b8f74-52dd-4b8c-ab31-3c5b47c36d12",
            "ownerId": "e1b7f7e6-9a51-43c7-8d44-0f1f41638f7b",
            "type": "borrow"
        }"#;
        let new: NewTransaction = serde_json::from_str(payload).unwrap();
        assert_eq!(new.kind, TransactionType::Borrow);
        assert!(new.item_id.is_none());
    }

    #[test]
    fn role_query_parsing_matches_the_route_contract() {
        assert_eq!(PartyRole::from_query("borrower"), Some(PartyRole::Borrower));
        assert_eq!(PartyRole::from_query("owner"), Some(PartyRole::Owner));
        assert_eq!(PartyRole::from_query("anything"), None);
    }
}
