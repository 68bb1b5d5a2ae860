//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::socket::SocketClient;
use crate::pages::{chat::ChatPage, dashboard::DashboardPage, home::HomePage, login::LoginPage};
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;
use crate::state::queue::QueueState;
use crate::state::session::SessionState;

/// Root application component.
///
/// Provides the shared state contexts, starts the socket lifecycle, restores
/// a persisted doctor session, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let session = RwSignal::new(SessionState::default());
    let chat = RwSignal::new(ChatState::default());
    let queue = RwSignal::new(QueueState::default());
    let socket = SocketClient::new();

    provide_context(auth);
    provide_context(session);
    provide_context(chat);
    provide_context(queue);
    provide_context(socket.clone());

    socket.connect();

    // Restore the doctor session from the persisted token, if any.
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            match crate::util::auth::read_token() {
                Some(token) => match crate::net::api::fetch_current_user(&token).await {
                    Some(user) => auth.update(|a| a.sign_in(token, user)),
                    None => {
                        crate::util::auth::clear_token();
                        auth.update(AuthState::sign_out);
                    }
                },
                None => auth.update(AuthState::sign_out),
            }
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/medtriage.css"/>
        <Title text="MedTriage"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("patient"), StaticSegment("chat")) view=ChatPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("doctor"), StaticSegment("dashboard")) view=DashboardPage/>
            </Routes>
        </Router>
    }
}
