use super::{status_dot_class, status_label};
use crate::state::connection::ConnectionStatus;

#[test]
fn dot_class_tracks_every_status() {
    assert!(status_dot_class(ConnectionStatus::Connected).ends_with("--connected"));
    assert!(status_dot_class(ConnectionStatus::Connecting).ends_with("--connecting"));
    assert!(status_dot_class(ConnectionStatus::Disconnected).ends_with("--disconnected"));
}

#[test]
fn label_is_down_until_fully_connected() {
    assert_eq!(status_label(ConnectionStatus::Connected, "Live", "Offline"), "Live");
    assert_eq!(status_label(ConnectionStatus::Connecting, "Live", "Offline"), "Offline");
    assert_eq!(status_label(ConnectionStatus::Disconnected, "Live", "Offline"), "Offline");
}
