//! Item listing types
//!
//! An item is a shareable physical object donated into the community. Its
//! CO2 impact is derived at creation time from the estimated value and the
//! per-category multiplier below; the monetary and CO2 quantities stay
//! decimal strings on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of marketplace categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Electronics
    Electronics,
    /// Furniture
    Furniture,
    /// Books & Media
    #[serde(rename = "Books & Media")]
    BooksMedia,
    /// Clothing
    Clothing,
    /// Sports & Recreation
    #[serde(rename = "Sports & Recreation")]
    SportsRecreation,
    /// Kitchen & Dining
    #[serde(rename = "Kitchen & Dining")]
    KitchenDining,
    /// Home & Garden
    #[serde(rename = "Home & Garden")]
    HomeGarden,
    /// Toys & Games
    #[serde(rename = "Toys & Games")]
    ToysGames,
}

impl Category {
    /// Every category, in the order the marketplace lists them
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Furniture,
        Category::BooksMedia,
        Category::Clothing,
        Category::SportsRecreation,
        Category::KitchenDining,
        Category::HomeGarden,
        Category::ToysGames,
    ];

    /// Wire label for this category
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::BooksMedia => "Books & Media",
            Category::Clothing => "Clothing",
            Category::SportsRecreation => "Sports & Recreation",
            Category::KitchenDining => "Kitchen & Dining",
            Category::HomeGarden => "Home & Garden",
            Category::ToysGames => "Toys & Games",
        }
    }

    /// CO2-savings multiplier applied to an item's estimated value
    pub fn co2_multiplier(self) -> f64 {
        match self {
            Category::Electronics => 0.08,
            Category::Furniture => 0.12,
            Category::BooksMedia => 0.02,
            Category::Clothing => 0.05,
            Category::SportsRecreation => 0.04,
            Category::KitchenDining => 0.06,
            Category::HomeGarden => 0.07,
            Category::ToysGames => 0.03,
        }
    }
}

/// Physical condition of a listed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Unused
    New,
    /// Light wear
    Good,
    /// Usable with visible wear
    Fair,
}

/// How long the item is offered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Given away for good
    Permanent,
    /// Lent out for a while
    Temporary,
    /// Lent out against a fee
    Rental,
}

/// Lifecycle status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Listed and searchable
    Available,
    /// Currently with a borrower
    Borrowed,
    /// Withdrawn by the owner
    Unavailable,
}

/// A shareable physical object listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// The user who listed the item
    pub owner_id: Uuid,
    /// Short display title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Marketplace category
    pub category: Category,
    /// Physical condition
    pub condition: Condition,
    /// Sharing mode
    pub availability: Availability,
    /// Lifecycle status, `available` on creation
    pub status: ItemStatus,
    /// Neighborhood or distance label shown in search
    pub location: String,
    /// Synthetic URLs of uploaded images
    pub images: Option<Vec<String>>,
    /// Owner-estimated value as a decimal string, e.g. "150.00"
    pub estimated_value: Option<String>,
    /// Derived CO2 savings, three decimal places
    pub co2_impact: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Payload for listing a new item
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// Short display title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Marketplace category
    pub category: Category,
    /// Physical condition
    pub condition: Condition,
    /// Sharing mode
    pub availability: Availability,
    /// Neighborhood or distance label
    pub location: String,
    /// Synthetic URLs of uploaded images
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// Owner-estimated value as a decimal string
    #[serde(default)]
    pub estimated_value: Option<String>,
}

/// Partial update for an item; unset fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemPatch {
    /// Replace the title
    pub title: Option<String>,
    /// Replace the description
    pub description: Option<String>,
    /// Move to another category
    pub category: Option<Category>,
    /// Correct the condition
    pub condition: Option<Condition>,
    /// Change the sharing mode
    pub availability: Option<Availability>,
    /// Change the lifecycle status
    pub status: Option<ItemStatus>,
    /// Replace the location label
    pub location: Option<String>,
    /// Replace the image list
    pub images: Option<Vec<String>>,
    /// Replace the estimated value
    pub estimated_value: Option<String>,
}

impl ItemPatch {
    /// Merge this patch over an item, leaving unset fields untouched.
    /// The caller refreshes `updated_at`.
    pub fn apply(self, item: &mut Item) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(condition) = self.condition {
            item.condition = condition;
        }
        if let Some(availability) = self.availability {
            item.availability = availability;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(location) = self.location {
            item.location = location;
        }
        if let Some(images) = self.images {
            item.images = Some(images);
        }
        if let Some(estimated_value) = self.estimated_value {
            item.estimated_value = Some(estimated_value);
        }
    }
}
