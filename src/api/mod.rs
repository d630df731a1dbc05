//! # API Module
//!
//! The HTTP boundary of the Shareloop marketplace. Handlers parse and
//! validate requests, then call the storage trait; no domain logic lives
//! here.
//!
//! ## Endpoints Overview
//!
//! ### Items
//! - `GET /api/items?search=&category=&location=` - Search available items
//! - `POST /api/items` - List an item (multipart form with up to 5 images)
//! - `GET /api/items/:id` - Get item by ID
//! - `PUT /api/items/:id` - Patch an item
//! - `DELETE /api/items/:id` - Delete an item
//!
//! ### Requests
//! - `GET /api/requests?search=` - Active requests, optionally filtered
//! - `POST /api/requests` - Post a request
//! - `GET /api/requests/:id` - Get request by ID
//! - `GET /api/requests/:id/matches` - Available items matching a request
//!
//! ### Transactions
//! - `POST /api/transactions` - Record a transaction
//! - `GET /api/transactions/user/:userId?type=` - A user's transactions
//!
//! ### Users
//! - `GET /api/users` - List users
//! - `POST /api/users` - Register a user
//! - `GET /api/users/:id` - Get user by ID
//!
//! ### Community
//! - `GET /api/impact` - Community impact aggregate
//! - `GET /api/categories` - The fixed category list
//!
//! ### System Essentials
//! - `GET /api/health` - Health check
//! - `GET /metrics` - Prometheus exposition

pub mod handlers;
pub mod server;

// Re-export commonly used items
pub use server::{create_app, start_server};

use crate::core::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable failure description
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server-side failures keep their detail in the logs only
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
