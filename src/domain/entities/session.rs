//! Account credentials and the authenticated session issued by the backend.

use validator::Validate;

/// Minimum password length enforced before a registration request is sent.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Email/password pair submitted to the login and register endpoints.
#[derive(Clone, Validate)]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The account the session belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUser {
    pub id: String,
    pub email: String,
}

/// Bearer credential plus the account it was issued for.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: AccountUser,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"***")
            .field("user", &self.user)
            .finish()
    }
}
