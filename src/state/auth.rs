//! Doctor authentication state.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Session token plus the signed-in doctor, if any.
///
/// Starts in `loading` until the stored-token restore settles, so guarded
/// pages can hold their redirect instead of bouncing a returning doctor
/// to the login form.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn sign_in(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
        self.loading = false;
    }

    /// Clear the session. Also settles a restore that found no valid token.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
        self.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}
