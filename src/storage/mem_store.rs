//! In-memory entity store
//!
//! Entities live in insertion-ordered maps behind read/write locks. There
//! are no transactional guarantees across maps: each operation locks only
//! the map it mutates, and the derived-stat side effects on creation are
//! applied afterwards with no rollback, which is all the marketplace
//! needs.

use crate::core::error::{Error, Result};
use crate::storage::files::FileStore;
use crate::storage::Storage;
use crate::system::metrics::Metrics;
use crate::types::{
    Category, ImpactPatch, ImpactStats, Item, ItemPatch, ItemStatus, NewItem, NewRequest,
    NewTransaction, NewUser, PartyRole, Request, RequestPatch, RequestStatus, Transaction,
    TransactionPatch, TransactionStatus, User, UserPatch,
};
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Category filter value meaning "no filter"
const ALL_CATEGORIES: &str = "All Categories";
/// Location filter value meaning "no filter"
const ALL_LOCATIONS: &str = "All Locations";

/// In-memory marketplace store
///
/// `IndexMap` keeps iteration in insertion order, so every list and
/// search result comes back in creation order.
pub struct MemStorage {
    /// Registered users
    users: RwLock<IndexMap<Uuid, User>>,
    /// Listed items
    items: RwLock<IndexMap<Uuid, Item>>,
    /// Posted requests
    requests: RwLock<IndexMap<Uuid, Request>>,
    /// Recorded transactions
    transactions: RwLock<IndexMap<Uuid, Transaction>>,
    /// The process-wide impact aggregate
    impact: RwLock<ImpactStats>,
    /// Synthetic URL assignment for uploads
    file_store: FileStore,
}

impl MemStorage {
    /// Create an empty store with a zeroed impact aggregate
    pub fn new() -> Self {
        Self {
            users: RwLock::new(IndexMap::new()),
            items: RwLock::new(IndexMap::new()),
            requests: RwLock::new(IndexMap::new()),
            transactions: RwLock::new(IndexMap::new()),
            impact: RwLock::new(ImpactStats::empty()),
            file_store: FileStore::new(),
        }
    }

    /// Number of users currently registered
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Number of items currently listed
    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive an item's CO2 impact from its category and estimated value,
/// formatted to three decimal places ("18.000")
fn derive_co2_impact(category: Category, estimated_value: Option<&str>) -> String {
    let value = estimated_value
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0);
    format!("{:.3}", value * category.co2_multiplier())
}

impl Storage for MemStorage {
    fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    fn create_user(&self, new: NewUser) -> Result<User> {
        // Hold the write lock across the uniqueness check and the insert
        let mut users = self.users.write();

        if users.values().any(|user| user.username == new.username) {
            return Err(Error::validation(format!(
                "username '{}' is already taken",
                new.username
            )));
        }
        if users.values().any(|user| user.email == new.email) {
            return Err(Error::validation(format!(
                "email '{}' is already registered",
                new.email
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            name: new.name,
            location: new.location,
            profile_picture: new.profile_picture,
            community_score: 0,
            items_donated: 0,
            items_borrowed: 0,
            items_requested: 0,
            co2_saved: "0".to_string(),
            money_saved: "0".to_string(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        drop(users);

        debug!(user_id = %user.id, username = %user.username, "user registered");
        Metrics::global().operations.users_created.inc();
        Ok(user)
    }

    fn update_user(&self, id: Uuid, patch: UserPatch) -> Option<User> {
        let mut users = self.users.write();
        let user = users.get_mut(&id)?;
        patch.apply(user);
        Some(user.clone())
    }

    fn get_all_users(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    fn get_item(&self, id: Uuid) -> Option<Item> {
        self.items.read().get(&id).cloned()
    }

    fn get_items_by_owner(&self, owner_id: Uuid) -> Vec<Item> {
        self.items
            .read()
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn get_items_by_category(&self, category: Category) -> Vec<Item> {
        self.items
            .read()
            .values()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }

    fn get_available_items(&self) -> Vec<Item> {
        self.items
            .read()
            .values()
            .filter(|item| item.status == ItemStatus::Available)
            .cloned()
            .collect()
    }

    fn search_items(
        &self,
        query: &str,
        category: Option<&str>,
        location: Option<&str>,
    ) -> Vec<Item> {
        Metrics::global().operations.item_searches.inc();

        let query = query.to_lowercase();
        let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);
        let location = location
            .filter(|l| !l.is_empty() && *l != ALL_LOCATIONS)
            .map(str::to_lowercase);

        self.items
            .read()
            .values()
            .filter(|item| item.status == ItemStatus::Available)
            .filter(|item| {
                let matches_query = query.is_empty()
                    || item.title.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query);

                let matches_category =
                    category.map_or(true, |wanted| item.category.as_str() == wanted);

                let matches_location = location
                    .as_deref()
                    .map_or(true, |wanted| item.location.to_lowercase().contains(wanted));

                matches_query && matches_category && matches_location
            })
            .cloned()
            .collect()
    }

    fn create_item(&self, owner_id: Uuid, new: NewItem) -> Item {
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            owner_id,
            co2_impact: derive_co2_impact(new.category, new.estimated_value.as_deref()),
            title: new.title,
            description: new.description,
            category: new.category,
            condition: new.condition,
            availability: new.availability,
            status: ItemStatus::Available,
            location: new.location,
            images: new.images,
            estimated_value: new.estimated_value,
            created_at: now,
            updated_at: now,
        };
        self.items.write().insert(item.id, item.clone());

        // Donation bookkeeping; skipped silently when the owner is unknown
        if let Some(owner) = self.get_user(owner_id) {
            self.update_user(
                owner.id,
                UserPatch {
                    items_donated: Some(owner.items_donated + 1),
                    community_score: Some(owner.community_score + 10),
                    ..UserPatch::default()
                },
            );
        }

        debug!(item_id = %item.id, owner_id = %owner_id, category = item.category.as_str(), "item listed");
        Metrics::global().operations.items_created.inc();
        item
    }

    fn update_item(&self, id: Uuid, patch: ItemPatch) -> Option<Item> {
        let mut items = self.items.write();
        let item = items.get_mut(&id)?;
        patch.apply(item);
        item.updated_at = Utc::now();
        Some(item.clone())
    }

    fn delete_item(&self, id: Uuid) -> bool {
        // shift_remove keeps the remaining entries in insertion order
        self.items.write().shift_remove(&id).is_some()
    }

    fn get_request(&self, id: Uuid) -> Option<Request> {
        self.requests.read().get(&id).cloned()
    }

    fn get_requests_by_owner(&self, owner_id: Uuid) -> Vec<Request> {
        self.requests
            .read()
            .values()
            .filter(|request| request.owner_id == owner_id)
            .cloned()
            .collect()
    }

    fn get_active_requests(&self) -> Vec<Request> {
        self.requests
            .read()
            .values()
            .filter(|request| request.status == RequestStatus::Active)
            .cloned()
            .collect()
    }

    fn search_requests(&self, query: &str) -> Vec<Request> {
        let query = query.to_lowercase();
        self.requests
            .read()
            .values()
            .filter(|request| request.status == RequestStatus::Active)
            .filter(|request| {
                request.title.to_lowercase().contains(&query)
                    || request.description.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    fn create_request(&self, owner_id: Uuid, new: NewRequest) -> Request {
        let now = Utc::now();
        let request = Request {
            id: Uuid::new_v4(),
            owner_id,
            title: new.title,
            description: new.description,
            category: new.category,
            urgency: new.urgency,
            location: new.location,
            status: RequestStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.requests.write().insert(request.id, request.clone());

        // Request bookkeeping; skipped silently when the owner is unknown
        if let Some(owner) = self.get_user(owner_id) {
            self.update_user(
                owner.id,
                UserPatch {
                    items_requested: Some(owner.items_requested + 1),
                    ..UserPatch::default()
                },
            );
        }

        debug!(request_id = %request.id, owner_id = %owner_id, "request posted");
        Metrics::global().operations.requests_created.inc();
        request
    }

    fn update_request(&self, id: Uuid, patch: RequestPatch) -> Option<Request> {
        let mut requests = self.requests.write();
        let request = requests.get_mut(&id)?;
        patch.apply(request);
        request.updated_at = Utc::now();
        Some(request.clone())
    }

    fn delete_request(&self, id: Uuid) -> bool {
        self.requests.write().shift_remove(&id).is_some()
    }

    fn get_transaction(&self, id: Uuid) -> Option<Transaction> {
        self.transactions.read().get(&id).cloned()
    }

    fn get_transactions_by_user(
        &self,
        user_id: Uuid,
        role: Option<PartyRole>,
    ) -> Vec<Transaction> {
        self.transactions
            .read()
            .values()
            .filter(|transaction| match role {
                Some(PartyRole::Borrower) => transaction.borrower_id == user_id,
                Some(PartyRole::Owner) => transaction.owner_id == user_id,
                None => {
                    transaction.borrower_id == user_id || transaction.owner_id == user_id
                }
            })
            .cloned()
            .collect()
    }

    fn create_transaction(&self, new: NewTransaction) -> Transaction {
        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            item_id: new.item_id,
            request_id: new.request_id,
            borrower_id: new.borrower_id,
            owner_id: new.owner_id,
            kind: new.kind,
            status: TransactionStatus::Pending,
            start_date: new.start_date,
            end_date: new.end_date,
            actual_return_date: None,
            co2_saved: new.co2_saved,
            money_saved: new.money_saved,
            created_at: now,
            updated_at: now,
        };
        self.transactions
            .write()
            .insert(transaction.id, transaction.clone());

        debug!(transaction_id = %transaction.id, "transaction recorded");
        Metrics::global().operations.transactions_created.inc();
        transaction
    }

    fn update_transaction(&self, id: Uuid, patch: TransactionPatch) -> Option<Transaction> {
        let mut transactions = self.transactions.write();
        let transaction = transactions.get_mut(&id)?;
        patch.apply(transaction);
        transaction.updated_at = Utc::now();
        Some(transaction.clone())
    }

    fn get_impact_stats(&self) -> ImpactStats {
        self.impact.read().clone()
    }

    fn update_impact_stats(&self, patch: ImpactPatch) -> ImpactStats {
        let mut stats = self.impact.write();
        patch.apply(&mut stats);
        stats.updated_at = Utc::now();
        stats.clone()
    }

    fn save_file(&self, filename: &str) -> String {
        self.file_store.assign_url(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Availability, Condition, TransactionType, Urgency};
    use proptest::prelude::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn sample_user(store: &MemStorage, username: &str) -> User {
        store
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                name: username.to_string(),
                location: None,
                profile_picture: None,
            })
            .unwrap()
    }

    fn sample_item(title: &str, description: &str) -> NewItem {
        NewItem {
            title: title.to_string(),
            description: description.to_string(),
            category: Category::Furniture,
            condition: Condition::Good,
            availability: Availability::Permanent,
            location: "Downtown District".to_string(),
            images: Some(vec![]),
            estimated_value: Some("150.00".to_string()),
        }
    }

    #[test]
    fn created_item_is_available_with_populated_fields() {
        // Goal: create-then-get returns status available with id and timestamps set
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        let created = store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));

        let fetched = store.get_item(created.id).unwrap();
        assert_eq!(fetched.status, ItemStatus::Available);
        assert_eq!(fetched.owner_id, owner.id);
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert!(!fetched.id.is_nil());
    }

    #[test]
    fn furniture_co2_impact_uses_the_category_multiplier() {
        // Goal: 150.00 x 0.12 formats as "18.000"
        let store = MemStorage::new();
        let owner = sample_user(&store, "sarah_green");
        let item = store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));
        assert_eq!(item.co2_impact, "18.000");
    }

    #[test]
    fn missing_estimated_value_derives_zero_impact() {
        let store = MemStorage::new();
        let owner = sample_user(&store, "mike_share");
        let mut new = sample_item("Office Chair", "Mesh back");
        new.estimated_value = None;
        let item = store.create_item(owner.id, new);
        assert_eq!(item.co2_impact, "0.000");
        assert_eq!(derive_co2_impact(Category::BooksMedia, Some("not a number")), "0.000");
    }

    #[test]
    fn search_matches_title_and_description_case_insensitively() {
        // Goal: "chair" finds title and description matches, nothing else
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        store.create_item(owner.id, sample_item("Ergonomic Office CHAIR", "Height adjustable"));
        store.create_item(owner.id, sample_item("Coffee Maker", "Comes with a chairside manual"));
        store.create_item(owner.id, sample_item("Yoga Mat", "Perfect for beginners"));

        let results = store.search_items("chair", None, None);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Ergonomic Office CHAIR");
        assert_eq!(results[1].title, "Coffee Maker");
    }

    #[test]
    fn search_excludes_items_that_are_not_available() {
        // Goal: a borrowed item disappears from search results
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        let chair = store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));
        store.create_item(owner.id, sample_item("Garden Chair", "Foldable"));

        store.update_item(
            chair.id,
            ItemPatch {
                status: Some(ItemStatus::Borrowed),
                ..ItemPatch::default()
            },
        );

        let results = store.search_items("chair", None, None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Garden Chair");
    }

    #[test]
    fn search_filters_by_category_and_location() {
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        let mut books = sample_item("Picture Books", "Ages 3-8");
        books.category = Category::BooksMedia;
        books.location = "Riverside Neighborhood".to_string();
        store.create_item(owner.id, books);
        store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));

        let by_category = store.search_items("", Some("Books & Media"), None);
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].title, "Picture Books");

        let by_location = store.search_items("", None, Some("riverside"));
        assert_eq!(by_location.len(), 1);

        // The UI sentinels mean "no filter"
        let unfiltered = store.search_items("", Some(ALL_CATEGORIES), Some(ALL_LOCATIONS));
        assert_eq!(unfiltered.len(), 2);

        // An unknown category label simply matches nothing
        let unknown = store.search_items("", Some("Vehicles"), None);
        assert!(unknown.is_empty());
    }

    #[test]
    fn donations_accumulate_owner_counters() {
        // Goal: two items bump itemsDonated by 2 and communityScore by 20
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));
        store.create_item(owner.id, sample_item("Coffee Maker", "Barely used"));

        let owner = store.get_user(owner.id).unwrap();
        assert_eq!(owner.items_donated, 2);
        assert_eq!(owner.community_score, 20);
    }

    #[test]
    fn item_for_unknown_owner_still_lists() {
        // Goal: the stat side effect is skipped silently, not an error
        let store = MemStorage::new();
        let item = store.create_item(Uuid::new_v4(), sample_item("Office Chair", "Mesh back"));
        assert!(store.get_item(item.id).is_some());
    }

    #[test]
    fn lookups_by_owner_category_and_email_work() {
        // Goal: the secondary accessors agree with what was created
        let store = MemStorage::new();
        let john = sample_user(&store, "john_doe");
        let sarah = sample_user(&store, "sarah_green");

        store.create_item(john.id, sample_item("Office Chair", "Mesh back"));
        let mut books = sample_item("Picture Books", "Ages 3-8");
        books.category = Category::BooksMedia;
        store.create_item(sarah.id, books);

        assert_eq!(store.get_items_by_owner(john.id).len(), 1);
        assert_eq!(store.get_items_by_owner(sarah.id).len(), 1);
        assert_eq!(store.get_items_by_category(Category::BooksMedia).len(), 1);
        assert_eq!(store.get_items_by_category(Category::Electronics).len(), 0);

        assert_eq!(
            store
                .get_user_by_email("sarah_green@example.com")
                .unwrap()
                .id,
            sarah.id
        );
        assert!(store.get_user_by_email("nobody@example.com").is_none());

        store.create_request(
            john.id,
            NewRequest {
                title: "Power drill".to_string(),
                description: "Weekend shelf project".to_string(),
                category: Category::HomeGarden,
                urgency: Urgency::Medium,
                location: "Downtown District".to_string(),
            },
        );
        assert_eq!(store.get_requests_by_owner(john.id).len(), 1);
        assert!(store.get_requests_by_owner(sarah.id).is_empty());
    }

    #[test]
    fn delete_of_missing_item_returns_false() {
        let store = MemStorage::new();
        assert!(!store.delete_item(Uuid::new_v4()));

        let owner = sample_user(&store, "john_doe");
        let item = store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));
        assert!(store.delete_item(item.id));
        assert!(store.get_item(item.id).is_none());
    }

    #[test]
    fn duplicate_username_and_email_are_rejected() {
        // Goal: uniqueness is enforced at registration time
        let store = MemStorage::new();
        sample_user(&store, "john_doe");

        let dup_username = store.create_user(NewUser {
            username: "john_doe".to_string(),
            email: "other@example.com".to_string(),
            name: "Impostor".to_string(),
            location: None,
            profile_picture: None,
        });
        assert!(dup_username.is_err());

        let dup_email = store.create_user(NewUser {
            username: "jane_doe".to_string(),
            email: "john_doe@example.com".to_string(),
            name: "Jane".to_string(),
            location: None,
            profile_picture: None,
        });
        assert!(dup_email.is_err());
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn request_creation_bumps_the_request_counter() {
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        store.create_request(
            owner.id,
            NewRequest {
                title: "Power drill".to_string(),
                description: "Weekend shelf project".to_string(),
                category: Category::HomeGarden,
                urgency: Urgency::Medium,
                location: "Downtown District".to_string(),
            },
        );

        let owner = store.get_user(owner.id).unwrap();
        assert_eq!(owner.items_requested, 1);
        assert_eq!(owner.items_donated, 0);
    }

    #[test]
    fn request_search_is_limited_to_active_requests() {
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        let drill = store.create_request(
            owner.id,
            NewRequest {
                title: "Power drill".to_string(),
                description: "Weekend shelf project".to_string(),
                category: Category::HomeGarden,
                urgency: Urgency::Medium,
                location: "Downtown District".to_string(),
            },
        );
        store.create_request(
            owner.id,
            NewRequest {
                title: "Drill bits".to_string(),
                description: "Masonry set".to_string(),
                category: Category::HomeGarden,
                urgency: Urgency::Low,
                location: "Downtown District".to_string(),
            },
        );
        store.update_request(
            drill.id,
            RequestPatch {
                status: Some(RequestStatus::Fulfilled),
                ..RequestPatch::default()
            },
        );

        let results = store.search_requests("drill");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Drill bits");

        // Empty query matches every active request
        assert_eq!(store.search_requests("").len(), 1);
    }

    #[test]
    fn transaction_update_preserves_unrelated_fields_and_refreshes_updated_at() {
        // Goal: patching status leaves the parties alone and moves updatedAt forward
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        let borrower = sample_user(&store, "sarah_green");
        let transaction = store.create_transaction(NewTransaction {
            item_id: None,
            request_id: None,
            borrower_id: borrower.id,
            owner_id: owner.id,
            kind: TransactionType::Borrow,
            start_date: None,
            end_date: None,
            co2_saved: Some("2.100".to_string()),
            money_saved: None,
        });
        assert_eq!(transaction.status, TransactionStatus::Pending);

        sleep(Duration::from_millis(5));
        let updated = store
            .update_transaction(
                transaction.id,
                TransactionPatch {
                    status: Some(TransactionStatus::Active),
                    ..TransactionPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, TransactionStatus::Active);
        assert_eq!(updated.borrower_id, borrower.id);
        assert_eq!(updated.co2_saved.as_deref(), Some("2.100"));
        assert_eq!(updated.created_at, transaction.created_at);
        assert!(updated.updated_at > transaction.updated_at);
    }

    #[test]
    fn transactions_filter_by_party_role() {
        let store = MemStorage::new();
        let owner = sample_user(&store, "john_doe");
        let borrower = sample_user(&store, "sarah_green");
        store.create_transaction(NewTransaction {
            item_id: None,
            request_id: None,
            borrower_id: borrower.id,
            owner_id: owner.id,
            kind: TransactionType::Borrow,
            start_date: None,
            end_date: None,
            co2_saved: None,
            money_saved: None,
        });

        assert_eq!(
            store
                .get_transactions_by_user(borrower.id, Some(PartyRole::Borrower))
                .len(),
            1
        );
        assert!(store
            .get_transactions_by_user(borrower.id, Some(PartyRole::Owner))
            .is_empty());
        assert_eq!(store.get_transactions_by_user(owner.id, None).len(), 1);
    }

    #[test]
    fn impact_update_is_sparse_and_refreshes_updated_at() {
        let store = MemStorage::new();
        let before = store.get_impact_stats();

        sleep(Duration::from_millis(5));
        let after = store.update_impact_stats(ImpactPatch {
            total_items_shared: Some(before.total_items_shared + 1),
            ..ImpactPatch::default()
        });

        assert_eq!(after.total_items_shared, before.total_items_shared + 1);
        assert_eq!(after.total_co2_saved, before.total_co2_saved);
        assert_eq!(after.id, before.id);
        assert!(after.updated_at > before.updated_at);
    }

    proptest! {
        #[test]
        fn search_results_are_an_ordered_subset_of_available_items(query in "[a-zA-Z ]{0,12}") {
            // Goal: no query ever surfaces a non-available item, and order is
            // always insertion order
            let store = MemStorage::new();
            let owner = sample_user(&store, "john_doe");
            store.create_item(owner.id, sample_item("Office Chair", "Mesh back"));
            store.create_item(owner.id, sample_item("Coffee Maker", "Barely used Keurig"));
            let borrowed = store.create_item(owner.id, sample_item("Camping Chair", "Foldable"));
            store.update_item(borrowed.id, ItemPatch {
                status: Some(ItemStatus::Borrowed),
                ..ItemPatch::default()
            });

            let results = store.search_items(&query, None, None);
            let available = store.get_available_items();
            let available_order: Vec<Uuid> = available.iter().map(|item| item.id).collect();

            let mut last_position = 0;
            for item in &results {
                prop_assert_eq!(item.status, ItemStatus::Available);
                let needle = query.to_lowercase();
                prop_assert!(
                    needle.is_empty()
                        || item.title.to_lowercase().contains(&needle)
                        || item.description.to_lowercase().contains(&needle)
                );
                let position = available_order
                    .iter()
                    .position(|id| *id == item.id)
                    .expect("result must be an available item");
                prop_assert!(position >= last_position);
                last_position = position;
            }
        }
    }
}
