#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

/// Realtime connection lifecycle state.
///
/// Owned by the socket client, observed by every view. Views never drive the
/// transitions; they only gate affordances (send buttons, status badges) on
/// the current value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Not connected; socket is closed or not yet opened.
    #[default]
    Disconnected,
    /// Socket handshake is in progress.
    Connecting,
    /// Socket is open and events flow.
    Connected,
}

impl ConnectionStatus {
    /// True only when the socket is open.
    #[must_use]
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}
