//! Type definitions for the Shareloop marketplace
//!
//! Entities serialize to the camelCase JSON the UI consumes. Every update
//! path goes through an explicit per-entity patch struct; there are no
//! duck-typed partial updates.

/// Community member records
pub mod user;
/// Shareable item listings
pub mod item;
/// Posted needs for items
pub mod request;
/// Item movements between owners and borrowers
pub mod transaction;
/// Community-wide impact aggregates
pub mod impact;

// Re-export commonly used types for convenience
pub use impact::{ImpactPatch, ImpactStats};
pub use item::{Availability, Category, Condition, Item, ItemPatch, ItemStatus, NewItem};
pub use request::{NewRequest, Request, RequestPatch, RequestStatus, Urgency};
pub use transaction::{
    NewTransaction, PartyRole, Transaction, TransactionPatch, TransactionStatus, TransactionType,
};
pub use user::{NewUser, User, UserPatch};
