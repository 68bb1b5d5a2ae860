//! Token persistence and the shared unauthenticated-redirect guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The doctor session token lives in `localStorage` so a page reload can
//! restore the session. All reads and writes are hydrate-only; native
//! builds see no token.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// `localStorage` key holding the doctor session token.
pub const TOKEN_KEY: &str = "medtriage_token";

/// Load the persisted session token, if any.
#[must_use]
pub fn read_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(TOKEN_KEY).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Persist the session token after a successful login.
pub fn store_token(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let _ = storage.set_item(TOKEN_KEY, token);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

/// Drop the persisted token on logout or when the server rejects it.
pub fn clear_token() {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

/// Redirect to `/login` whenever the auth restore has settled and no
/// doctor is signed in.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.user.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });
}
