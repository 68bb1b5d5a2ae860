use super::{clock_time, entry_time, entry_timestamp, now_ms};

#[test]
fn clock_time_formats_epoch_millis() {
    // 2001-09-09T01:46:40Z
    assert_eq!(clock_time(1_000_000_000_000.0), "01:46");
}

#[test]
fn clock_time_falls_back_on_out_of_range_input() {
    assert_eq!(clock_time(f64::MAX), "--:--");
}

#[test]
fn native_clock_reads_zero() {
    assert_eq!(now_ms(), 0.0);
}

#[test]
fn entry_stamps_format_the_arrival_instant() {
    let created = "2025-03-01T09:05:00"
        .parse::<chrono::NaiveDateTime>()
        .expect("fixture timestamp");

    assert_eq!(entry_time(&created), "09:05");
    assert_eq!(entry_timestamp(&created), "2025-03-01 09:05");
}
