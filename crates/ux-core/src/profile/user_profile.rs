use serde::{Deserialize, Serialize};

/// Marketplace user profile as stored by the backend.
///
/// `None` at the backend means "authenticated but no profile created yet",
/// which is a setup trigger, not an error. A present profile grants access
/// only if its email passes the university-domain predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub university: String,
}

impl UserProfile {
    /// Normalized copy ready for submission: fields trimmed, email lowercased.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            university: self.university.trim().to_string(),
        }
    }
}

/// Backend-assigned role. Roles never gate the app; access is decided by
/// the profile email alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}
