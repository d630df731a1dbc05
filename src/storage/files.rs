//! File-reference stub for uploaded images
//!
//! Uploads are validated at the HTTP boundary and never persisted here;
//! the store only hands out a synthetic `/uploads/...` URL built from a
//! timestamp, a monotonic counter, and the sanitized original filename.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Assigns synthetic URLs to uploaded files
pub struct FileStore {
    /// Monotonic suffix so simultaneous uploads never collide
    counter: AtomicU64,
}

impl FileStore {
    /// Create a file store with its counter at 1
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    /// Build the placeholder URL for one uploaded file
    pub fn assign_url(&self, original_name: &str) -> String {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed);
        let stamp = Utc::now().timestamp_millis();
        format!("/uploads/{}-{}-{}", stamp, serial, sanitize(original_name))
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip path components and anything that does not belong in a URL segment
fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_unique_and_keep_the_filename() {
        // Goal: consecutive uploads of the same file still get distinct URLs
        let store = FileStore::new();
        let first = store.assign_url("chair.png");
        let second = store.assign_url("chair.png");

        assert!(first.starts_with("/uploads/"));
        assert!(first.ends_with("-chair.png"));
        assert_ne!(first, second);
    }

    #[test]
    fn filenames_are_sanitized_for_url_use() {
        // Goal: path components and spaces cannot leak into the URL
        let store = FileStore::new();
        let url = store.assign_url("../../etc/my photo.png");
        assert!(url.ends_with("-my_photo.png"));
        assert!(!url.contains(".."));

        assert_eq!(sanitize(""), "upload");
        assert_eq!(sanitize("simple.jpg"), "simple.jpg");
    }
}
