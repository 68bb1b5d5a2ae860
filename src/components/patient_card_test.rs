use super::{display_urgency, urgency_badge_class};

#[test]
fn badge_text_prefers_the_raw_label() {
    assert_eq!(display_urgency(Some("Critical")), "Critical");
    assert_eq!(display_urgency(Some("borderline")), "borderline");
}

#[test]
fn badge_text_defaults_when_the_label_is_missing_or_blank() {
    assert_eq!(display_urgency(None), "Medium");
    assert_eq!(display_urgency(Some("")), "Medium");
    assert_eq!(display_urgency(Some("   ")), "Medium");
}

#[test]
fn badge_class_follows_the_sort_band() {
    assert!(urgency_badge_class(Some("critical")).ends_with("--critical"));
    assert!(urgency_badge_class(Some("High")).ends_with("--high"));
    assert!(urgency_badge_class(Some("low")).ends_with("--low"));
    assert!(urgency_badge_class(Some("Medium")).ends_with("--medium"));
}

#[test]
fn unrecognized_labels_use_the_medium_color() {
    assert!(urgency_badge_class(Some("borderline")).ends_with("--medium"));
    assert!(urgency_badge_class(None).ends_with("--medium"));
}
