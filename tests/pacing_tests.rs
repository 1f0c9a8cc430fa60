#![allow(missing_docs)]

use shorelark::simulation::pacing::{FrameOutcome, FramePacer};

/// Feeds frames every `frame_ms` from `start` to `end` and returns the step times.
fn run_frames(pacer: &mut FramePacer, start: u32, end: u32, frame_ms: usize) -> Vec<f64> {
    let mut steps = Vec::new();
    let Some(mut request) = pacer.start() else {
        return steps;
    };

    for t in (start..end).step_by(frame_ms) {
        let now = f64::from(t);
        let outcome = pacer.on_frame(request, now);
        if outcome.is_step() {
            steps.push(now);
        }
        match outcome.next() {
            Some(next) => request = next,
            None => break,
        }
    }
    steps
}

#[test]
fn test_never_steps_twice_within_frame_delay() {
    let mut pacer = FramePacer::new(30.0).unwrap();
    let steps = run_frames(&mut pacer, 0, 10_000, 16);

    assert!(!steps.is_empty());
    for pair in steps.windows(2) {
        assert!(pair[1] - pair[0] >= 1000.0 / 30.0, "{pair:?}");
    }
    // 16 ms frames land a step every third frame
    assert_eq!(steps[1] - steps[0], 48.0);
}

#[test]
fn test_stop_cancels_scheduled_frame() {
    let mut pacer = FramePacer::default();
    let request = pacer.start().unwrap();
    pacer.stop();

    assert_eq!(pacer.on_frame(request, 1000.0), FrameOutcome::Cancelled);
}

#[test]
fn test_stale_request_cannot_step_after_restart() {
    let mut pacer = FramePacer::default();
    let stale = pacer.start().unwrap();
    pacer.stop();
    let fresh = pacer.start().unwrap();

    assert_eq!(pacer.on_frame(stale, 0.0), FrameOutcome::Cancelled);
    assert!(pacer.on_frame(fresh, 0.0).is_step());
}

#[test]
fn test_restart_does_not_replay_missed_ticks() {
    let mut pacer = FramePacer::new(10.0).unwrap();
    let request = pacer.start().unwrap();
    assert!(pacer.on_frame(request, 0.0).is_step());
    pacer.stop();

    // ten seconds paused, then resumed
    let request = pacer.start().unwrap();
    let outcome = pacer.on_frame(request, 10_000.0);
    assert!(outcome.is_step());
    let outcome = pacer.on_frame(outcome.next().unwrap(), 10_016.0);
    assert!(!outcome.is_step());
}

#[test]
fn test_rate_change_applies_to_next_decision() {
    let mut pacer = FramePacer::new(1.0).unwrap();
    let request = pacer.start().unwrap();
    let outcome = pacer.on_frame(request, 0.0);
    assert!(outcome.is_step());

    let outcome = pacer.on_frame(outcome.next().unwrap(), 500.0);
    assert!(!outcome.is_step());

    pacer.set_target_rate(2.0).unwrap();
    let outcome = pacer.on_frame(outcome.next().unwrap(), 500.0);
    assert!(outcome.is_step());
}

#[test]
fn test_rejected_rate_keeps_previous() {
    let mut pacer = FramePacer::new(20.0).unwrap();
    assert!(pacer.set_target_rate(120.0).is_err());
    assert!(pacer.set_target_rate(-1.0).is_err());
    assert_eq!(pacer.frame_delay_ms(), 50.0);
}
