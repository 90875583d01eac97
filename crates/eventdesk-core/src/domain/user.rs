/// Role given to every account created through registration.
pub const DEFAULT_ROLE: &str = "USER";

/// User entity - an account in the credential store.
///
/// The password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

impl User {
    /// Create an unsaved user with the default role.
    pub fn new(username: String, password_hash: String, email: String) -> Self {
        Self {
            id: 0,
            username,
            password_hash,
            email,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}
