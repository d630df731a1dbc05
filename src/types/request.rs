//! Item request types
//!
//! A request is a user's posted need for an item. Active requests are
//! searchable and can be matched against available items by title and
//! category.

use super::item::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How soon the requester needs the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Whenever
    Low,
    /// Within a few days
    Medium,
    /// As soon as possible
    High,
}

/// Lifecycle status of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Open and searchable
    Active,
    /// An item was found
    Fulfilled,
    /// Closed without a match
    Expired,
}

/// A user's posted need for an item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier
    pub id: Uuid,
    /// The user who posted the request
    pub owner_id: Uuid,
    /// Short display title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Marketplace category
    pub category: Category,
    /// How soon the item is needed
    pub urgency: Urgency,
    /// Neighborhood label
    pub location: String,
    /// Lifecycle status, `active` on creation
    pub status: RequestStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

/// Payload for posting a new request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    /// Short display title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Marketplace category
    pub category: Category,
    /// How soon the item is needed
    pub urgency: Urgency,
    /// Neighborhood label
    pub location: String,
}

/// Partial update for a request; unset fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequestPatch {
    /// Replace the title
    pub title: Option<String>,
    /// Replace the description
    pub description: Option<String>,
    /// Move to another category
    pub category: Option<Category>,
    /// Change the urgency
    pub urgency: Option<Urgency>,
    /// Replace the location label
    pub location: Option<String>,
    /// Close or reopen the request
    pub status: Option<RequestStatus>,
}

impl RequestPatch {
    /// Merge this patch over a request, leaving unset fields untouched.
    /// The caller refreshes `updated_at`.
    pub fn apply(self, request: &mut Request) {
        if let Some(title) = self.title {
            request.title = title;
        }
        if let Some(description) = self.description {
            request.description = description;
        }
        if let Some(category) = self.category {
            request.category = category;
        }
        if let Some(urgency) = self.urgency {
            request.urgency = urgency;
        }
        if let Some(location) = self.location {
            request.location = location;
        }
        if let Some(status) = self.status {
            request.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_and_status_use_lowercase_labels() {
        assert_eq!(serde_json::to_string(&Urgency::High).unwrap(), "\"high\"");
        let parsed: RequestStatus = serde_json::from_str("\"fulfilled\"").unwrap();
        assert_eq!(parsed, RequestStatus::Fulfilled);
    }

    #[test]
    fn new_request_parses_the_ui_payload() {
        // Goal: the JSON the request form submits maps onto NewRequest
        let payload = r#"{
            "title": "Power drill",
            "description": "Weekend shelf project",
            "category": "Home & Garden",
            "urgency": "medium",
            "location": "Downtown District"
        }"#;
        let new: NewRequest = serde_json::from_str(payload).unwrap();
        assert_eq!(new.category, Category::HomeGarden);
        assert_eq!(new.urgency, Urgency::Medium);
    }
}
