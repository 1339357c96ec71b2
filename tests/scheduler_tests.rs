mod common;

use std::time::Duration;

use common::FakeSource;
use hostpulse::scheduler::Scheduler;
use hostpulse::system::engine::SamplingEngine;
use hostpulse::system::source::SourceError;
use tokio::time::timeout;

const PERIOD: Duration = Duration::from_millis(10);
const PATIENCE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn delivers_snapshots_in_order() {
    let mut scheduler = Scheduler::spawn(SamplingEngine::default(), FakeSource::healthy(), PERIOD);

    let mut received = Vec::new();
    for _ in 0..3 {
        let snapshot = timeout(PATIENCE, scheduler.next())
            .await
            .expect("tick within patience")
            .expect("scheduler still running");
        received.push(snapshot);
    }

    assert!(received.iter().all(|s| s.is_ok()));
    assert!(received.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(received[2].processes.len(), 3);

    timeout(PATIENCE, scheduler.shutdown())
        .await
        .expect("shutdown is prompt")
        .expect("task joins cleanly");
}

#[tokio::test]
async fn failed_ticks_keep_the_schedule_running() {
    let mut source = FakeSource::healthy();
    source.cpu = Err(SourceError::Os("permission denied".into()));
    let mut scheduler = Scheduler::spawn(SamplingEngine::default(), source, PERIOD);

    for _ in 0..2 {
        let snapshot = timeout(PATIENCE, scheduler.next())
            .await
            .expect("tick within patience")
            .expect("scheduler still running");
        assert!(!snapshot.is_ok());
    }

    scheduler.shutdown().await.expect("task joins cleanly");
}

#[tokio::test]
async fn shutdown_without_a_consumer() {
    let scheduler = Scheduler::spawn(SamplingEngine::default(), FakeSource::healthy(), PERIOD);
    // Let a few ticks back up against the bounded hand-off.
    tokio::time::sleep(PERIOD * 5).await;

    timeout(PATIENCE, scheduler.shutdown())
        .await
        .expect("shutdown is prompt")
        .expect("task joins cleanly");
}
