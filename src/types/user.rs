//! Community member types
//!
//! Users accumulate counters and savings figures as a side effect of
//! marketplace activity; nothing mutates a user directly except the
//! derived-stat updater and profile edits through `UserPatch`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Unique login handle
    pub username: String,
    /// Unique contact address
    pub email: String,
    /// Display name
    pub name: String,
    /// Neighborhood label
    pub location: Option<String>,
    /// Avatar URL
    pub profile_picture: Option<String>,
    /// Accumulated activity score (+10 per donated item)
    pub community_score: i32,
    /// Number of items this user has listed
    pub items_donated: i32,
    /// Number of items this user has borrowed
    pub items_borrowed: i32,
    /// Number of requests this user has posted
    pub items_requested: i32,
    /// Accumulated CO2 savings as a decimal string
    pub co2_saved: String,
    /// Accumulated money savings as a decimal string
    pub money_saved: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Unique login handle
    pub username: String,
    /// Unique contact address
    pub email: String,
    /// Display name
    pub name: String,
    /// Neighborhood label
    #[serde(default)]
    pub location: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Partial update for a user; unset fields keep their stored value.
///
/// Username and email are deliberately absent so the uniqueness check at
/// registration time holds for the lifetime of the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    /// Replace the display name
    pub name: Option<String>,
    /// Replace the neighborhood label
    pub location: Option<String>,
    /// Replace the avatar URL
    pub profile_picture: Option<String>,
    /// Set the accumulated activity score
    pub community_score: Option<i32>,
    /// Set the donated-items counter
    pub items_donated: Option<i32>,
    /// Set the borrowed-items counter
    pub items_borrowed: Option<i32>,
    /// Set the posted-requests counter
    pub items_requested: Option<i32>,
    /// Set the accumulated CO2 savings
    pub co2_saved: Option<String>,
    /// Set the accumulated money savings
    pub money_saved: Option<String>,
}

impl UserPatch {
    /// Merge this patch over a user, leaving unset fields untouched
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
        if let Some(profile_picture) = self.profile_picture {
            user.profile_picture = Some(profile_picture);
        }
        if let Some(community_score) = self.community_score {
            user.community_score = community_score;
        }
        if let Some(items_donated) = self.items_donated {
            user.items_donated = items_donated;
        }
        if let Some(items_borrowed) = self.items_borrowed {
            user.items_borrowed = items_borrowed;
        }
        if let Some(items_requested) = self.items_requested {
            user.items_requested = items_requested;
        }
        if let Some(co2_saved) = self.co2_saved {
            user.co2_saved = co2_saved;
        }
        if let Some(money_saved) = self.money_saved {
            user.money_saved = money_saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_camel_case() {
        // Goal: wire field names match what the UI reads
        let user = User {
            id: Uuid::new_v4(),
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            name: "John Doe".to_string(),
            location: None,
            profile_picture: None,
            community_score: 10,
            items_donated: 1,
            items_borrowed: 0,
            items_requested: 0,
            co2_saved: "0".to_string(),
            money_saved: "0".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["communityScore"], 10);
        assert_eq!(json["itemsDonated"], 1);
        assert!(json.get("community_score").is_none());
    }

    #[test]
    fn user_patch_has_no_identity_fields() {
        // Goal: a patch naming username or email is a schema mismatch
        assert!(serde_json::from_str::<UserPatch>("{\"username\": \"other\"}").is_err());
        assert!(serde_json::from_str::<UserPatch>("{\"email\": \"o@x.com\"}").is_err());
        let patch: UserPatch = serde_json::from_str("{\"name\": \"New Name\"}").unwrap();
        assert_eq!(patch.name.as_deref(), Some("New Name"));
    }
}
