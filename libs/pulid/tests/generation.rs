//! Generation through the active generator.
//!
//! These tests swap process-wide state and run serially.

use pulid::{
    active_generator, parse_strict, restore_generator, set_generator, DeterministicGenerator,
    MonotonicGenerator, Pulid, FIXTURE_TIMESTAMP_MS,
};
use serial_test::serial;

const FIXTURES: [&str; 3] = [
    "01FD7SJ7J006AFVGQT5ZYC0GEK",
    "01FD7SJ7J0ZW908PVKS1Q4ZYAZ",
    "01FD7SJ7J0YSHABVQ85AYZ8JHD",
];

#[test]
#[serial]
fn fixture_ids_through_active_generator() {
    let previous = set_generator(DeterministicGenerator::new());

    let aa: Vec<String> = (0..3)
        .map(|_| Pulid::new("AA").unwrap().into_string())
        .collect();
    set_generator(DeterministicGenerator::new());
    let bb: Vec<String> = (0..3)
        .map(|_| Pulid::new("BB").unwrap().into_string())
        .collect();

    restore_generator(previous);

    for (got, want) in aa.iter().zip(FIXTURES) {
        assert_eq!(got, &format!("AA:{want}"));
    }
    for (got, want) in bb.iter().zip(FIXTURES) {
        assert_eq!(got, &format!("BB:{want}"));
    }
}

#[test]
#[serial]
fn fresh_deterministic_generator_restarts_sequence() {
    let previous = set_generator(DeterministicGenerator::new());
    let first = Pulid::new("AA").unwrap();
    set_generator(DeterministicGenerator::new());
    let again = Pulid::new("AA").unwrap();
    restore_generator(previous);

    assert_eq!(first, again);
    assert_eq!(first.timestamp_ms().unwrap(), FIXTURE_TIMESTAMP_MS);
}

#[test]
#[serial]
fn restore_brings_back_previous_generator() {
    let previous = set_generator(DeterministicGenerator::new());
    restore_generator(previous);

    let a = Pulid::new("AA").unwrap();
    let b = Pulid::new("AA").unwrap();
    assert_ne!(a, b);
    assert_ne!(a.timestamp_ms().unwrap(), FIXTURE_TIMESTAMP_MS);
}

#[test]
#[serial]
fn active_generator_handle_is_usable() {
    let previous = set_generator(DeterministicGenerator::new());
    let handle = active_generator();
    let id = Pulid::new_with("CC", &handle).unwrap();
    restore_generator(previous);

    assert_eq!(id.as_str(), format!("CC:{}", FIXTURES[0]));
}

#[test]
#[serial]
fn default_generator_is_monotonic() {
    let ids: Vec<Pulid> = (0..1_000).map(|_| Pulid::new("AA").unwrap()).collect();
    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
    }
    for id in &ids {
        let (prefix, _) = parse_strict(id.as_str()).unwrap();
        assert_eq!(prefix, "AA");
    }
}

#[test]
fn explicit_generator_ignores_active_state() {
    let generator = DeterministicGenerator::new();
    let ids: Vec<Pulid> = (0..3)
        .map(|_| Pulid::new_with("ZZ", &generator).unwrap())
        .collect();
    for (id, want) in ids.iter().zip(FIXTURES) {
        assert_eq!(id.as_str(), format!("ZZ:{want}"));
    }

    let a = Pulid::new_with("ZZ", &MonotonicGenerator).unwrap();
    let b = Pulid::new_with("ZZ", &MonotonicGenerator).unwrap();
    assert!(a < b);
}
