use backlog_catalog::playtime::{minutes_to_hours, seconds_to_hours};

#[test]
fn zero_minutes_is_zero_hours() {
    assert_eq!(minutes_to_hours(0), 0.0);
}

#[test]
fn minutes_round_to_one_decimal() {
    assert_eq!(minutes_to_hours(125), 2.1);
    assert_eq!(minutes_to_hours(60), 1.0);
    assert_eq!(minutes_to_hours(90), 1.5);
    assert_eq!(minutes_to_hours(1), 0.0);
    assert_eq!(minutes_to_hours(6), 0.1);
}

#[test]
fn large_playtimes_keep_precision() {
    assert_eq!(minutes_to_hours(60_000), 1000.0);
    assert_eq!(minutes_to_hours(61_234), 1020.6);
}

#[test]
fn seconds_to_hours_rounds() {
    assert_eq!(seconds_to_hours(0), 0.0);
    assert_eq!(seconds_to_hours(36_000), 10.0);
    assert_eq!(seconds_to_hours(45_720), 12.7);
}
