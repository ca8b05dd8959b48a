use proptest::prelude::*;
use vitals::{Dependency, LifecycleEvent, Status, StatusRegistry};

fn event_sequence() -> impl Strategy<Value = Vec<LifecycleEvent>> {
    prop::collection::vec(
        prop_oneof![
            Just(LifecycleEvent::Connect),
            Just(LifecycleEvent::Disconnect)
        ],
        1..24,
    )
}

fn every_kind() -> Vec<Dependency> {
    vec![
        Dependency::consumer("orders"),
        Dependency::producer("orders"),
        Dependency::Admin,
        Dependency::WebServer,
        Dependency::Database,
    ]
}

proptest! {
    #[test]
    fn last_write_wins_for_every_kind(sequence in event_sequence()) {
        let registry = StatusRegistry::new();
        for dependency in &every_kind() {
            for event in &sequence {
                registry.report_event(dependency, *event);
            }
        }

        let expected = sequence.last().copied().map(LifecycleEvent::status);
        for dependency in &every_kind() {
            prop_assert_eq!(registry.dependency_status(dependency), expected);
        }
    }

    #[test]
    fn keyed_maps_stay_independent(
        consumer_events in event_sequence(),
        producer_events in event_sequence(),
    ) {
        let registry = StatusRegistry::new();
        let consumer = Dependency::consumer("orders");
        let producer = Dependency::producer("orders");

        for event in &consumer_events {
            registry.report_event(&consumer, *event);
        }
        for event in &producer_events {
            registry.report_event(&producer, *event);
        }

        prop_assert_eq!(
            registry.dependency_status(&consumer),
            consumer_events.last().copied().map(LifecycleEvent::status)
        );
        prop_assert_eq!(
            registry.dependency_status(&producer),
            producer_events.last().copied().map(LifecycleEvent::status)
        );
    }

    #[test]
    fn snapshot_reflects_each_applied_transition(sequence in event_sequence()) {
        let registry = StatusRegistry::new();
        let payments = Dependency::consumer("payments");

        for event in &sequence {
            registry.report_event(&payments, *event);
            let snapshot = registry.status_snapshot();
            prop_assert_eq!(
                snapshot.topics.consumers["payments"].status,
                event.status()
            );
            prop_assert_eq!(snapshot.status, Status::Up);
        }
    }

    #[test]
    fn topic_entries_are_never_removed(sequence in event_sequence()) {
        let registry = StatusRegistry::new();
        let alpha = Dependency::consumer("alpha");
        let beta = Dependency::producer("beta");
        registry.report_event(&alpha, LifecycleEvent::Connect);
        registry.report_event(&beta, LifecycleEvent::Connect);

        for event in &sequence {
            registry.report_event(&alpha, *event);
            registry.report_event(&beta, *event);

            let snapshot = registry.status_snapshot();
            prop_assert!(snapshot.topics.consumers.contains_key("alpha"));
            prop_assert!(snapshot.topics.producers.contains_key("beta"));
        }
    }
}
