//! Storage layer for the Shareloop marketplace
//!
//! This module provides the storage abstraction the boundary collaborators
//! (HTTP handlers, seeding, tests) call. The concrete backend keeps every
//! entity in an insertion-ordered in-memory map, so list and search
//! results come back in creation order without any ranking step.

use crate::core::error::Result;
use crate::types::{
    Category, ImpactPatch, ImpactStats, Item, ItemPatch, NewItem, NewRequest, NewTransaction,
    NewUser, PartyRole, Request, RequestPatch, Transaction, TransactionPatch, User, UserPatch,
};
use std::sync::Arc;
use uuid::Uuid;

/// Data operations of the marketplace core
///
/// Everything is synchronous in effect: no operation blocks or suspends
/// mid-mutation, and each call is atomic with respect to the store it
/// touches. Derived-stat bookkeeping (owner counters, CO2 impact) happens
/// inside the create operations.
pub trait Storage: Send + Sync {
    // --- Users ---

    /// Get a user by id
    fn get_user(&self, id: Uuid) -> Option<User>;

    /// Look a user up by their unique username
    fn get_user_by_username(&self, username: &str) -> Option<User>;

    /// Look a user up by their unique email
    fn get_user_by_email(&self, email: &str) -> Option<User>;

    /// Register a user; rejects a duplicate username or email
    fn create_user(&self, new: NewUser) -> Result<User>;

    /// Merge a patch over a user; `None` when the id is absent
    fn update_user(&self, id: Uuid, patch: UserPatch) -> Option<User>;

    /// All users in registration order
    fn get_all_users(&self) -> Vec<User>;

    // --- Items ---

    /// Get an item by id
    fn get_item(&self, id: Uuid) -> Option<Item>;

    /// All items listed by one user
    fn get_items_by_owner(&self, owner_id: Uuid) -> Vec<Item>;

    /// All items in one category, regardless of status
    fn get_items_by_category(&self, category: Category) -> Vec<Item>;

    /// All items currently available
    fn get_available_items(&self) -> Vec<Item>;

    /// Filter available items by query, category, and location
    fn search_items(&self, query: &str, category: Option<&str>, location: Option<&str>)
        -> Vec<Item>;

    /// List an item for `owner_id`, deriving CO2 impact and bumping the
    /// owner's donation counters
    fn create_item(&self, owner_id: Uuid, new: NewItem) -> Item;

    /// Merge a patch over an item and refresh `updatedAt`; `None` when absent
    fn update_item(&self, id: Uuid, patch: ItemPatch) -> Option<Item>;

    /// Remove an item; `false` when the id was absent
    fn delete_item(&self, id: Uuid) -> bool;

    // --- Requests ---

    /// Get a request by id
    fn get_request(&self, id: Uuid) -> Option<Request>;

    /// All requests posted by one user
    fn get_requests_by_owner(&self, owner_id: Uuid) -> Vec<Request>;

    /// All requests still open
    fn get_active_requests(&self) -> Vec<Request>;

    /// Filter active requests by a title/description query
    fn search_requests(&self, query: &str) -> Vec<Request>;

    /// Post a request for `owner_id`, bumping their request counter
    fn create_request(&self, owner_id: Uuid, new: NewRequest) -> Request;

    /// Merge a patch over a request and refresh `updatedAt`; `None` when absent
    fn update_request(&self, id: Uuid, patch: RequestPatch) -> Option<Request>;

    /// Remove a request; `false` when the id was absent
    fn delete_request(&self, id: Uuid) -> bool;

    // --- Transactions ---

    /// Get a transaction by id
    fn get_transaction(&self, id: Uuid) -> Option<Transaction>;

    /// Transactions a user took part in, optionally restricted to one side
    fn get_transactions_by_user(&self, user_id: Uuid, role: Option<PartyRole>)
        -> Vec<Transaction>;

    /// Record a transaction (status starts `pending`)
    fn create_transaction(&self, new: NewTransaction) -> Transaction;

    /// Merge a patch over a transaction and refresh `updatedAt`; `None` when absent
    fn update_transaction(&self, id: Uuid, patch: TransactionPatch) -> Option<Transaction>;

    // --- Impact ---

    /// The process-wide impact aggregate
    fn get_impact_stats(&self) -> ImpactStats;

    /// Merge a patch over the impact aggregate and refresh `updatedAt`
    fn update_impact_stats(&self, patch: ImpactPatch) -> ImpactStats;

    // --- Files ---

    /// Assign a synthetic URL to an uploaded file; no bytes are persisted
    fn save_file(&self, filename: &str) -> String;
}

/// File-reference stub
pub mod files;
/// In-memory store (the only backend)
pub mod mem_store;
/// Demo data loaded at startup
pub mod seed;

/// Re-export main storage types
pub use mem_store::MemStorage;

/// Shared handle to the process-wide store
pub type SharedStorage = Arc<dyn Storage>;

/// Create the storage backend
pub fn create_storage() -> SharedStorage {
    Arc::new(MemStorage::new())
}
