//! HTTP request handlers for the Shareloop API
//!
//! Validation happens here, before any store mutation: malformed JSON,
//! unknown patch fields, bad enum labels, and oversized or non-image
//! uploads all fail with a 400 and never touch the store.

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppState, Error, Result};
use crate::system::metrics;
use crate::types::{
    Category, ImpactPatch, ImpactStats, Item, ItemPatch, ItemStatus, NewItem, NewRequest,
    NewTransaction, NewUser, PartyRole, Request, Transaction, User,
};

/// File extensions/subtypes accepted for item images
const ALLOWED_IMAGE_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// Query parameters for item search
#[derive(Debug, Deserialize)]
pub struct ItemSearchQuery {
    /// Substring matched against title and description
    pub search: Option<String>,
    /// Category label filter
    pub category: Option<String>,
    /// Location substring filter
    pub location: Option<String>,
}

/// Query parameters for request search
#[derive(Debug, Deserialize)]
pub struct RequestSearchQuery {
    /// Substring matched against title and description
    pub search: Option<String>,
}

/// Query parameters for a user's transaction listing
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Restrict to one side of the exchange ("borrower" or "owner")
    #[serde(rename = "type")]
    pub role: Option<String>,
}

/// Health check payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Parse a path segment as an entity id
fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|_| Error::validation(format!("invalid id '{raw}'")))
}

/// Decode a JSON body into a typed value, mapping failures to 400s
fn decode<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(|e| Error::validation(e.to_string()))
}

/// The demo ownership rule: the first registered user owns new listings
fn demo_owner(state: &AppState) -> Result<User> {
    state
        .storage
        .get_all_users()
        .into_iter()
        .next()
        .ok_or_else(|| Error::validation("no users registered"))
}

// Item handlers

/// Search available items
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemSearchQuery>,
) -> Json<Vec<Item>> {
    let items = state.storage.search_items(
        params.search.as_deref().unwrap_or(""),
        params.category.as_deref(),
        params.location.as_deref(),
    );
    Json(items)
}

/// Get one item by id
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    state
        .storage
        .get_item(id)
        .map(Json)
        .ok_or_else(|| Error::not_found("Item"))
}

/// List a new item from a multipart form with up to 5 image parts
pub async fn create_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Item>)> {
    let limits = &state.config.storage;
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut images: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            if images.len() >= limits.max_images_per_item {
                return Err(Error::validation(format!(
                    "at most {} images are allowed",
                    limits.max_images_per_item
                )));
            }
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            if !is_allowed_image(&file_name, content_type.as_deref()) {
                return Err(Error::validation("Only image files are allowed"));
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::validation(format!("unreadable image '{file_name}': {e}")))?;
            if data.len() > limits.max_upload_bytes {
                return Err(Error::validation(format!(
                    "image '{file_name}' exceeds the {} byte limit",
                    limits.max_upload_bytes
                )));
            }
            images.push(state.storage.save_file(&file_name));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| Error::validation(format!("unreadable field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    let new = new_item_from_fields(fields, images)?;
    let owner = demo_owner(&state)?;
    let item = state.storage.create_item(owner.id, new);

    // The community aggregate mirrors every new listing
    let stats = state.storage.get_impact_stats();
    state.storage.update_impact_stats(ImpactPatch {
        total_items_shared: Some(stats.total_items_shared + 1),
        ..ImpactPatch::default()
    });

    info!(item_id = %item.id, "item created via API");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Patch an item
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Bytes,
) -> Result<Json<Item>> {
    let id = parse_id(&id)?;
    let patch: ItemPatch = decode(&payload)?;
    state
        .storage
        .update_item(id, patch)
        .map(Json)
        .ok_or_else(|| Error::not_found("Item"))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    if state.storage.delete_item(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found("Item"))
    }
}

// Request handlers

/// Active requests, filtered when a search term is present
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<RequestSearchQuery>,
) -> Json<Vec<Request>> {
    let requests = match params.search.as_deref() {
        Some(query) => state.storage.search_requests(query),
        None => state.storage.get_active_requests(),
    };
    Json(requests)
}

/// Get one request by id
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Request>> {
    let id = parse_id(&id)?;
    state
        .storage
        .get_request(id)
        .map(Json)
        .ok_or_else(|| Error::not_found("Request"))
}

/// Post a new request
pub async fn create_request(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Request>)> {
    let new: NewRequest = decode(&payload)?;
    let owner = demo_owner(&state)?;
    let request = state.storage.create_request(owner.id, new);
    Ok((StatusCode::CREATED, Json(request)))
}

/// Suggest available items matching a request's title and category
pub async fn request_matches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Item>>> {
    let id = parse_id(&id)?;
    let request = state
        .storage
        .get_request(id)
        .ok_or_else(|| Error::not_found("Request"))?;

    let matches =
        state
            .storage
            .search_items(&request.title, Some(request.category.as_str()), None);
    Ok(Json(matches))
}

// Transaction handlers

/// Record a transaction; an attached item flips to borrowed
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<Transaction>)> {
    let new: NewTransaction = decode(&payload)?;
    let transaction = state.storage.create_transaction(new);

    if let Some(item_id) = transaction.item_id {
        state.storage.update_item(
            item_id,
            ItemPatch {
                status: Some(ItemStatus::Borrowed),
                ..ItemPatch::default()
            },
        );
    }

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Transactions a user took part in, optionally one side only
pub async fn list_user_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>> {
    let user_id = parse_id(&user_id)?;
    let role = params.role.as_deref().and_then(PartyRole::from_query);
    Ok(Json(state.storage.get_transactions_by_user(user_id, role)))
}

// User handlers

/// All registered users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.storage.get_all_users())
}

/// Get one user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = parse_id(&id)?;
    state
        .storage
        .get_user(id)
        .map(Json)
        .ok_or_else(|| Error::not_found("User"))
}

/// Register a new user
pub async fn create_user(
    State(state): State<AppState>,
    payload: Bytes,
) -> Result<(StatusCode, Json<User>)> {
    let new: NewUser = decode(&payload)?;
    let user = state.storage.create_user(new)?;
    Ok((StatusCode::CREATED, Json(user)))
}

// Community handlers

/// The community impact aggregate
pub async fn get_impact(State(state): State<AppState>) -> Json<ImpactStats> {
    Json(state.storage.get_impact_stats())
}

/// The fixed category list
pub async fn list_categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.as_str()).collect())
}

// System handlers

/// Health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prometheus text exposition
pub async fn get_metrics() -> String {
    metrics::collect_metrics()
}

/// Assemble a NewItem from validated multipart text fields
fn new_item_from_fields(
    mut fields: HashMap<String, String>,
    images: Vec<String>,
) -> Result<NewItem> {
    let title = take_required(&mut fields, "title")?;
    let description = take_required(&mut fields, "description")?;
    let category = parse_label("category", &take_required(&mut fields, "category")?)?;
    let condition = parse_label("condition", &take_required(&mut fields, "condition")?)?;
    let availability = parse_label("availability", &take_required(&mut fields, "availability")?)?;
    let location = take_required(&mut fields, "location")?;
    let estimated_value = fields.remove("estimatedValue").filter(|v| !v.is_empty());

    Ok(NewItem {
        title,
        description,
        category,
        condition,
        availability,
        location,
        images: Some(images),
        estimated_value,
    })
}

/// Pull a required, non-empty text field out of the form
fn take_required(fields: &mut HashMap<String, String>, name: &str) -> Result<String> {
    fields
        .remove(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::validation(format!("missing required field '{name}'")))
}

/// Parse an enum wire label ("Books & Media", "good", ...) into its type
fn parse_label<T: serde::de::DeserializeOwned>(name: &str, raw: &str) -> Result<T> {
    serde_json::from_value(Value::String(raw.to_string()))
        .map_err(|_| Error::validation(format!("invalid {name} '{raw}'")))
}

/// Mirror of the upload boundary contract: image extension and MIME type
fn is_allowed_image(file_name: &str, content_type: Option<&str>) -> bool {
    let ext_ok = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            ALLOWED_IMAGE_TYPES.contains(&lower.as_str())
        })
        .unwrap_or(false);

    let mime_ok = content_type
        .map(|mime| {
            let lower = mime.to_ascii_lowercase();
            ALLOWED_IMAGE_TYPES.iter().any(|t| lower.contains(t))
        })
        .unwrap_or(false);

    ext_ok && mime_ok
}
