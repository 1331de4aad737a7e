//! Customer-related types
//!
//! This module defines the Customer record managed by the customer store.

/// One registered customer
///
/// Passwords are stored and compared in plaintext; this is a deliberate
/// property of the system (a teaching artifact), not an oversight to fix
/// here. Usernames and emails are unique across the store, enforced at
/// registration time; password uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique username, the key other records reference
    pub username: String,

    /// Plaintext password
    pub password: String,

    /// Unique email address
    pub email: String,
}

impl Customer {
    /// Create a customer record
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Customer {
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}
