use std::cell::Cell;
use std::convert::Infallible;

use archive_core::{Entry, GateDecision, PersistReason, VersionGate, VersionRecord};
use pretty_assertions::assert_eq;

fn entry(picture_url: &str, video_url: &str) -> Entry {
    Entry {
        url: "https://apod.nasa.gov/apod/ap210101.html".to_string(),
        date: "2021-01-01".to_string(),
        title: "Title".to_string(),
        explanation: "Text.".to_string(),
        picture_url: picture_url.to_string(),
        video_url: video_url.to_string(),
    }
}

fn init_logging() {
    harvest_logging::initialize_for_tests();
}

#[test]
fn entry_without_media_is_never_looked_up() {
    init_logging();
    let calls = Cell::new(0);
    for initialized in [false, true] {
        let gate = VersionGate::new("1.0.0", initialized);
        let decision = gate
            .evaluate(&entry("", ""), |_| {
                calls.set(calls.get() + 1);
                Ok::<_, Infallible>(Some("0.9".to_string()))
            })
            .unwrap();
        assert_eq!(decision, GateDecision::SkipNoMedia);
        assert!(!decision.should_persist());
    }
    assert_eq!(calls.get(), 0);
}

#[test]
fn bootstrap_persists_every_media_entry_without_lookup() {
    init_logging();
    let gate = VersionGate::new("1.0.0", false);
    for candidate in [
        entry("https://apod.nasa.gov/apod/image/2101/a.jpg", ""),
        entry("", "https://www.youtube.com/embed/x"),
        entry("https://apod.nasa.gov/apod/image/2101/a.jpg", "https://www.youtube.com/embed/x"),
    ] {
        let decision = gate
            .evaluate(&candidate, |_| -> Result<Option<String>, Infallible> {
                panic!("bootstrap must not look up")
            })
            .unwrap();
        assert_eq!(decision, GateDecision::Persist(PersistReason::Bootstrap));
    }
}

#[test]
fn missing_record_persists() {
    let gate = VersionGate::new("1.0.0", true);
    let decision = gate
        .evaluate(&entry("pic", ""), |_| Ok::<_, Infallible>(None))
        .unwrap();
    assert_eq!(decision, GateDecision::Persist(PersistReason::NewEntry));
}

#[test]
fn matching_version_skips() {
    let gate = VersionGate::new("1.0.0", true);
    let subject = entry("pic", "");
    let decision = gate
        .evaluate(&subject, |url| {
            assert_eq!(url, subject.url);
            Ok::<_, Infallible>(Some("1.0.0".to_string()))
        })
        .unwrap();
    assert_eq!(decision, GateDecision::SkipUpToDate);
}

#[test]
fn older_version_persists_with_previous_stamp() {
    let gate = VersionGate::new("1.1.0", true);
    let decision = gate
        .evaluate(&entry("", "vid"), |_| Ok::<_, Infallible>(Some("1.0.0".to_string())))
        .unwrap();
    assert_eq!(
        decision,
        GateDecision::Persist(PersistReason::VersionChanged {
            previous: "1.0.0".to_string()
        })
    );
}

#[test]
fn lookup_errors_propagate() {
    let gate = VersionGate::new("1.0.0", true);
    let result = gate.evaluate(&entry("pic", ""), |_| Err("store down"));
    assert_eq!(result, Err("store down"));
}

#[test]
fn version_record_is_stamped_with_entry_url() {
    let subject = entry("pic", "");
    let record = VersionRecord::stamp(&subject, "2.0.0");
    assert_eq!(record.url, subject.url);
    assert_eq!(record.data_version, "2.0.0");
}
