//! University email predicate and admin allowlist
//!
//! Access is granted to `@jainuniversity.ac.in` addresses plus a small
//! fixed set of admin addresses. The allowlist is compile time; it is not
//! configurable at runtime.

/// Domain suffix granting access.
pub const UNIVERSITY_EMAIL_DOMAIN: &str = "@jainuniversity.ac.in";

/// Exact-match lowercase admin addresses granted access regardless of domain.
const ADMIN_EMAIL_ALLOWLIST: &[&str] = &[
    "aaryan123cse@gmail.com",
    "admin-balu@campusmarket.in",
    "pkamil13@gmail.com",
];

/// Case-insensitive allowlist membership.
pub fn is_allowlisted_admin_email(email: &str) -> bool {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    ADMIN_EMAIL_ALLOWLIST.contains(&normalized.as_str())
}

/// Whether an email is access-granting: allowlisted, or on the university
/// domain. Total over all strings; insensitive to case and surrounding
/// whitespace.
pub fn is_valid_university_email(email: &str) -> bool {
    let normalized = email.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    if is_allowlisted_admin_email(&normalized) {
        return true;
    }
    normalized.ends_with(UNIVERSITY_EMAIL_DOMAIN)
}

/// Inline form error for an email field, or `None` when the email is valid.
pub fn university_email_error(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        return Some("Email is required.".to_string());
    }
    if is_valid_university_email(email) {
        return None;
    }
    Some(format!(
        "Only {UNIVERSITY_EMAIL_DOMAIN} email addresses are allowed. \
         Please use your Jain University email."
    ))
}
