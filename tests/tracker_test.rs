//! 主题消息计数器测试

use flare_weighted_consumer::TopicMessageCountTracker;
use std::sync::Arc;

#[test]
fn records_and_snapshots_counts_per_topic() {
    let tracker = TopicMessageCountTracker::new();
    tracker.record_arrival("orders");
    tracker.record_arrival("orders");
    tracker.record_arrival("audit");

    let counts = tracker.snapshot_counts();
    assert_eq!(counts.get("orders"), Some(&2));
    assert_eq!(counts.get("audit"), Some(&1));
    assert_eq!(counts.len(), 2);

    tracker.clear();
    assert!(tracker.snapshot_counts().is_empty());
}

#[test]
fn concurrent_arrivals_are_not_lost() {
    let tracker = Arc::new(TopicMessageCountTracker::new());
    let mut handles = Vec::new();

    for _ in 0..8 {
        let tracker = Arc::clone(&tracker);
        handles.push(std::thread::spawn(move || {
            for i in 0..1000 {
                let topic = if i % 2 == 0 { "orders" } else { "audit" };
                tracker.record_arrival(topic);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread");
    }

    let counts = tracker.snapshot_counts();
    assert_eq!(counts.get("orders"), Some(&4000));
    assert_eq!(counts.get("audit"), Some(&4000));
}
