//! Colored dot plus label reflecting the live-event connection.

#[cfg(test)]
#[path = "connection_badge_test.rs"]
mod connection_badge_test;

use leptos::prelude::*;

use crate::net::socket::SocketClient;
use crate::state::connection::ConnectionStatus;

/// Connection indicator for page headers. The labels are per-page ("Connected"
/// in the chat header, "Live" on the dashboard); the dot colors are shared.
#[component]
pub fn ConnectionBadge(
    #[prop(default = "Connected")] up_label: &'static str,
    #[prop(default = "Disconnected")] down_label: &'static str,
) -> impl IntoView {
    let socket = expect_context::<SocketClient>();
    let status = socket.status();

    view! {
        <span class="conn-badge">
            <span class=move || status_dot_class(status.get())></span>
            <span class="conn-badge__label">
                {move || status_label(status.get(), up_label, down_label)}
            </span>
        </span>
    }
}

fn status_dot_class(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "conn-badge__dot conn-badge__dot--connected",
        ConnectionStatus::Connecting => "conn-badge__dot conn-badge__dot--connecting",
        ConnectionStatus::Disconnected => "conn-badge__dot conn-badge__dot--disconnected",
    }
}

/// The label stays on `down_label` until the socket is fully open, matching
/// the send guard which also only unlocks on `Connected`.
fn status_label(
    status: ConnectionStatus,
    up_label: &'static str,
    down_label: &'static str,
) -> &'static str {
    if status.is_connected() { up_label } else { down_label }
}
