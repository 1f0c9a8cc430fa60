#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use shorelark::simulation::auto_train::AutoTrainCoordinator;

fn active_coordinator(interval_secs: u64) -> AutoTrainCoordinator {
    let mut coordinator = AutoTrainCoordinator::new(interval_secs).unwrap();
    coordinator.set_enabled(true);
    coordinator.set_running(true);
    coordinator
}

/// Polls every `step_ms` over `[start, end]` and returns the times a train fired.
fn poll_range(
    coordinator: &mut AutoTrainCoordinator,
    start: u32,
    end: u32,
    step_ms: usize,
) -> Vec<u32> {
    (start..=end)
        .step_by(step_ms)
        .filter(|&t| coordinator.poll(f64::from(t)))
        .collect()
}

#[test]
fn test_fires_once_per_interval() {
    let mut coordinator = active_coordinator(5);

    let fired = poll_range(&mut coordinator, 0, 5000, 100);

    assert_eq!(fired, vec![5000]);
    assert_eq!(coordinator.elapsed_ms(), 0.0);
}

#[test]
fn test_frame_rate_polling_fires_once() {
    let mut coordinator = active_coordinator(5);

    let fired = poll_range(&mut coordinator, 0, 5100, 16);

    assert_eq!(fired.len(), 1);
    assert!(fired[0] >= 5000);
    assert!(coordinator.elapsed_ms() >= 0.0);
}

#[test]
fn test_pause_discards_partial_wait() {
    let mut coordinator = active_coordinator(5);
    assert!(poll_range(&mut coordinator, 0, 3000, 100).is_empty());

    coordinator.set_running(false);
    assert_eq!(coordinator.elapsed_ms(), 0.0);
    assert!(poll_range(&mut coordinator, 3100, 3400, 100).is_empty());

    coordinator.set_running(true);
    // a full interval after resuming at 3500, not 2000 ms
    let fired = poll_range(&mut coordinator, 3500, 9000, 100);
    assert_eq!(fired, vec![8500]);
}

#[test]
fn test_disable_discards_partial_wait() {
    let mut coordinator = active_coordinator(2);
    assert!(poll_range(&mut coordinator, 0, 1500, 100).is_empty());

    coordinator.set_enabled(false);
    coordinator.set_enabled(true);

    let fired = poll_range(&mut coordinator, 1600, 4000, 100);
    assert_eq!(fired, vec![3600]);
}

#[test]
fn test_interval_change_applies_to_running_check() {
    let mut coordinator = active_coordinator(10);
    assert!(poll_range(&mut coordinator, 0, 2000, 100).is_empty());

    coordinator.set_interval_secs(3).unwrap();
    let fired = poll_range(&mut coordinator, 2100, 3100, 100);
    assert_eq!(fired, vec![3000]);
}
