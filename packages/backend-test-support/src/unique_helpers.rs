//! Unique test data helpers
//!
//! ULID-suffixed values keep tests isolated when they share a store.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("book");
/// assert_ne!(a, unique_str("book"));
/// assert!(a.starts_with("book-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("reader");
/// assert!(email.starts_with("reader-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// A human-readable book title that will not collide with other tests.
pub fn unique_title(prefix: &str) -> String {
    format!("{} Vol. {}", prefix, Ulid::new())
}
