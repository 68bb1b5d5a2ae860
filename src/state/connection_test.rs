use super::*;

// =============================================================
// ConnectionStatus defaults and predicates
// =============================================================

#[test]
fn connection_starts_disconnected() {
    assert_eq!(ConnectionStatus::default(), ConnectionStatus::Disconnected);
}

#[test]
fn only_connected_state_counts_as_connected() {
    assert!(ConnectionStatus::Connected.is_connected());
    assert!(!ConnectionStatus::Connecting.is_connected());
    assert!(!ConnectionStatus::Disconnected.is_connected());
}
