// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_monotonic_enough() {
    let clock = SystemClock;
    let t1 = clock.now();
    let t2 = clock.now();
    assert!(t2 >= t1);
}

#[test]
fn fake_clock_starts_at_epoch() {
    assert_eq!(FakeClock::new().now(), DateTime::<Utc>::UNIX_EPOCH);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::seconds(30));
    assert_eq!(clock1.now() - t1, Duration::seconds(30));
}

#[test]
fn fake_clock_can_be_set() {
    let clock = FakeClock::new();
    let target = DateTime::<Utc>::UNIX_EPOCH + Duration::days(2);
    clock.set(target);
    assert_eq!(clock.now(), target);
}
