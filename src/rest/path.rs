//! Path joining for REST resource URIs.
//!
//! Resource URIs are relative to the API host and built by joining
//! segments with `/`. Joining collapses the slashes at each seam, so
//! `join_path(&["api/v1/", "/messages", "emails"])` yields
//! `api/v1/messages/emails`.
//!
//! # Example
//!
//! ```rust
//! use verticalresponse_api::rest::join_path;
//!
//! assert_eq!(join_path(&["api/v1", "messages", "emails"]), "api/v1/messages/emails");
//! assert_eq!(join_path(&["api/v1/", "/lists/"]), "api/v1/lists/");
//! ```

/// Base path shared by every resource of the v1 API.
pub const API_BASE_PATH: &str = "api/v1";

/// Joins path segments with a single `/` between each pair.
///
/// Leading slashes of the first segment and trailing slashes of the last
/// segment are preserved; empty segments are skipped.
#[must_use]
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();

    for segment in segments.iter().map(AsRef::as_ref) {
        if segment.is_empty() {
            continue;
        }
        if joined.is_empty() {
            joined.push_str(segment);
            continue;
        }

        let trimmed_end = joined.trim_end_matches('/').len();
        joined.truncate(trimmed_end);
        joined.push('/');
        joined.push_str(segment.trim_start_matches('/'));
    }

    joined
}
