//! Community impact aggregates
//!
//! A single process-wide record of what the community has shared and
//! saved. It only ever changes additively through `ImpactPatch`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate community-wide counters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactStats {
    /// Unique identifier of the singleton record
    pub id: Uuid,
    /// Items ever shared through the marketplace
    pub total_items_shared: i64,
    /// Community CO2 savings as a decimal string
    pub total_co2_saved: String,
    /// Community money savings as a decimal string
    pub total_money_saved: String,
    /// Members counted as active
    pub active_members: i64,
    /// Refreshed on every update
    pub updated_at: DateTime<Utc>,
}

impl ImpactStats {
    /// Zeroed aggregate with a fresh id
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            total_items_shared: 0,
            total_co2_saved: "0".to_string(),
            total_money_saved: "0".to_string(),
            active_members: 0,
            updated_at: Utc::now(),
        }
    }
}

/// Partial update for the impact aggregate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImpactPatch {
    /// Set the shared-items total
    pub total_items_shared: Option<i64>,
    /// Set the CO2 savings total
    pub total_co2_saved: Option<String>,
    /// Set the money savings total
    pub total_money_saved: Option<String>,
    /// Set the active-member count
    pub active_members: Option<i64>,
}

impl ImpactPatch {
    /// Merge this patch over the aggregate, leaving unset fields untouched.
    /// The caller refreshes `updated_at`.
    pub fn apply(self, stats: &mut ImpactStats) {
        if let Some(total_items_shared) = self.total_items_shared {
            stats.total_items_shared = total_items_shared;
        }
        if let Some(total_co2_saved) = self.total_co2_saved {
            stats.total_co2_saved = total_co2_saved;
        }
        if let Some(total_money_saved) = self.total_money_saved {
            stats.total_money_saved = total_money_saved;
        }
        if let Some(active_members) = self.active_members {
            stats.active_members = active_members;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_apply_is_sparse() {
        // Goal: bumping one total leaves the others alone
        let mut stats = ImpactStats::empty();
        let patch = ImpactPatch {
            total_items_shared: Some(42),
            ..ImpactPatch::default()
        };
        patch.apply(&mut stats);
        assert_eq!(stats.total_items_shared, 42);
        assert_eq!(stats.total_co2_saved, "0");
        assert_eq!(stats.active_members, 0);
    }
}
