//! Demo data loaded at startup
//!
//! Seeding runs through the normal create operations, so the sample
//! owners end up with real donation counters and every sample item gets
//! its CO2 impact derived like any other listing.

use crate::core::error::Result;
use crate::storage::Storage;
use crate::types::{Availability, Category, Condition, ImpactPatch, NewItem, NewUser};
use tracing::info;

/// Populate an empty store with the demo community
pub fn load_demo_data(storage: &dyn Storage) -> Result<()> {
    // Community-wide figures the marketplace launched with
    storage.update_impact_stats(ImpactPatch {
        total_items_shared: Some(15_247),
        total_co2_saved: Some("8.2".to_string()),
        total_money_saved: Some("84000".to_string()),
        active_members: Some(3_421),
    });

    let john = storage.create_user(NewUser {
        username: "john_doe".to_string(),
        email: "john@example.com".to_string(),
        name: "John Doe".to_string(),
        location: Some("Downtown District".to_string()),
        profile_picture: None,
    })?;
    let sarah = storage.create_user(NewUser {
        username: "sarah_green".to_string(),
        email: "sarah@example.com".to_string(),
        name: "Sarah Green".to_string(),
        location: Some("Riverside Neighborhood".to_string()),
        profile_picture: None,
    })?;
    let mike = storage.create_user(NewUser {
        username: "mike_share".to_string(),
        email: "mike@example.com".to_string(),
        name: "Mike Share".to_string(),
        location: Some("University Area".to_string()),
        profile_picture: None,
    })?;

    storage.create_item(
        john.id,
        NewItem {
            title: "Coffee Maker".to_string(),
            description: "Barely used Keurig coffee maker with pods included.".to_string(),
            category: Category::KitchenDining,
            condition: Condition::Good,
            availability: Availability::Permanent,
            location: "0.8 miles away".to_string(),
            images: Some(vec![]),
            estimated_value: Some("50.00".to_string()),
        },
    );
    storage.create_item(
        sarah.id,
        NewItem {
            title: "Children's Books Set".to_string(),
            description: "Collection of 25 picture books for ages 3-8.".to_string(),
            category: Category::BooksMedia,
            condition: Condition::New,
            availability: Availability::Permanent,
            location: "1.2 miles away".to_string(),
            images: Some(vec![]),
            estimated_value: Some("75.00".to_string()),
        },
    );
    storage.create_item(
        mike.id,
        NewItem {
            title: "Ergonomic Office Chair".to_string(),
            description: "Comfortable mesh back chair, height adjustable.".to_string(),
            category: Category::Furniture,
            condition: Condition::Good,
            availability: Availability::Temporary,
            location: "2.1 miles away".to_string(),
            images: Some(vec![]),
            estimated_value: Some("150.00".to_string()),
        },
    );
    storage.create_item(
        john.id,
        NewItem {
            title: "Yoga Equipment Set".to_string(),
            description: "Yoga mat, blocks, and strap. Perfect for beginners.".to_string(),
            category: Category::SportsRecreation,
            condition: Condition::New,
            availability: Availability::Permanent,
            location: "0.5 miles away".to_string(),
            images: Some(vec![]),
            estimated_value: Some("40.00".to_string()),
        },
    );

    info!("demo data seeded");
    Ok(())
}
