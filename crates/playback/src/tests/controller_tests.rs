use super::*;

fn config() -> PlaybackConfig {
    PlaybackConfig {
        seed: Some(7),
        ..PlaybackConfig::default()
    }
}

fn controller_with(values: &[i64]) -> PlaybackController {
    PlaybackController::with_source(config(), InputSource::Values(values.to_vec()))
        .expect("valid config")
}

/// Starts, pauses at once, then steps manually until the trace runs out.
fn step_to_completion(controller: &mut PlaybackController) -> usize {
    controller.start();
    controller.pause();
    let mut applied = 0;
    while controller.step() {
        applied += 1;
        assert!(applied < 10_000, "trace did not terminate");
    }
    applied
}

#[test]
fn load_input_starts_idle_with_initialization_log() {
    let controller = controller_with(&[5, 3, 1]);

    let view = controller.view();
    assert_eq!(view.run_state, RunState::Idle);
    assert_eq!(view.array, vec![5, 3, 1]);
    assert!(view.highlights.is_empty());
    assert!(view.sorted_indices.is_empty());
    assert_eq!(
        view.log,
        vec![
            "System Ready. Algorithm: Bubble Sort".to_string(),
            "Data Loaded: [5, 3, 1]".to_string(),
        ]
    );
    assert_eq!(controller.pending_timer(), None);
}

#[test]
fn unparseable_text_loads_random_sequence() {
    let mut controller = controller_with(&[1]);
    controller.load_input(InputSource::Text("a, b, c".to_string()));

    let view = controller.view();
    assert_eq!(view.array.len(), 14);
    assert!(view.array.iter().all(|v| (2..=16).contains(v)));
    assert_eq!(view.run_state, RunState::Idle);
}

#[test]
fn start_arms_one_timer_and_ignores_double_start() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();

    let ticket = controller.pending_timer().expect("timer armed");
    assert_eq!(controller.run_state(), RunState::Running);
    assert_eq!(ticket.delay, config().delay_for_speed(50));

    controller.start();
    assert_eq!(controller.pending_timer(), Some(ticket));
}

#[test]
fn timer_fire_applies_one_step_and_rearms() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    let first = controller.pending_timer().expect("armed");

    assert!(controller.fire(first.id));
    let view = controller.view();
    assert_eq!(view.steps_applied, 1);
    assert_eq!(view.log.last().map(String::as_str), Some("Starting Bubble Sort..."));

    let second = controller.pending_timer().expect("re-armed");
    assert_ne!(second.id, first.id);

    assert!(!controller.fire(first.id), "old ticket must be ignored");
    assert_eq!(controller.view().steps_applied, 1);
    assert_eq!(controller.pending_timer(), Some(second));
}

#[test]
fn pause_then_step_applies_exactly_one_step() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    let ticket = controller.pending_timer().expect("armed");

    controller.pause();
    assert_eq!(controller.run_state(), RunState::Paused);
    assert_eq!(controller.pending_timer(), None);

    assert!(controller.step());
    assert_eq!(controller.view().steps_applied, 1);
    assert_eq!(controller.pending_timer(), None);

    assert!(!controller.fire(ticket.id));
    assert_eq!(controller.view().steps_applied, 1);
    assert_eq!(controller.run_state(), RunState::Paused);
}

#[test]
fn stepping_to_completion_sorts_and_logs_finish() {
    let mut controller = controller_with(&[5, 3, 1]);

    let applied = step_to_completion(&mut controller);
    assert_eq!(applied, 11);

    let view = controller.view();
    assert_eq!(view.run_state, RunState::Completed);
    assert_eq!(view.array, vec![1, 3, 5]);
    assert_eq!(view.sorted_indices, (0..3).collect::<BTreeSet<usize>>());
    assert!(view.highlights.is_empty());
    let tail: Vec<&str> = view.log.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(tail, vec![COMPLETION_LOG_LINE, "Bubble Sort Complete!"]);
}

#[test]
fn step_after_completion_changes_nothing() {
    let mut controller = controller_with(&[2, 1]);
    step_to_completion(&mut controller);
    controller.drain_events();

    let before = controller.view();
    assert!(!controller.step());
    assert!(!controller.step());
    assert_eq!(controller.view(), before);
    assert!(controller.drain_events().is_empty());
}

#[test]
fn start_from_completed_reloads_input_and_runs_again() {
    let mut controller = controller_with(&[5, 3, 1]);
    step_to_completion(&mut controller);

    controller.start();
    let view = controller.view();
    assert_eq!(view.run_state, RunState::Running);
    assert_eq!(view.array, vec![5, 3, 1]);
    assert_eq!(view.steps_applied, 0);
    assert_eq!(view.log.len(), 2);
    assert!(controller.pending_timer().is_some());
}

#[test]
fn reset_cancels_pending_timer_and_clears_highlights() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    let ticket = controller.pending_timer().expect("armed");
    controller.fire(ticket.id);
    let ticket = controller.pending_timer().expect("re-armed");
    controller.fire(ticket.id);
    assert!(!controller.view().highlights.is_empty());
    let ticket = controller.pending_timer().expect("re-armed");

    controller.reset();
    assert_eq!(controller.run_state(), RunState::Idle);
    assert!(controller.view().highlights.is_empty());
    assert_eq!(controller.pending_timer(), None);

    let before = controller.view();
    assert!(!controller.fire(ticket.id));
    assert_eq!(controller.view(), before);
}

#[test]
fn speed_change_while_running_rearms_with_shorter_delay() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    let slow = controller.pending_timer().expect("armed");

    controller.set_speed(90);
    let fast = controller.pending_timer().expect("re-armed");
    assert_ne!(fast.id, slow.id);
    assert!(fast.delay < slow.delay);
    assert!(!controller.fire(slow.id));

    controller.pause();
    controller.set_speed(10);
    assert_eq!(controller.pending_timer(), None);
    assert_eq!(controller.speed(), 10);
}

#[test]
fn speed_is_clamped_and_delay_strictly_decreasing() {
    let mut controller = controller_with(&[1]);
    controller.set_speed(0);
    assert_eq!(controller.speed(), 1);
    controller.set_speed(500);
    assert_eq!(controller.speed(), 100);

    let mut previous = None;
    for speed in 1..=100 {
        controller.set_speed(speed);
        let delay = controller.delay();
        assert!(delay > Duration::ZERO);
        if let Some(previous) = previous {
            assert!(delay < previous, "speed {speed}");
        }
        previous = Some(delay);
    }
}

#[test]
fn select_algorithm_resets_and_reloads() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    let ticket = controller.pending_timer().expect("armed");
    controller.fire(ticket.id);

    controller.select_algorithm(SortingMethod::Quick);
    let view = controller.view();
    assert_eq!(view.method, SortingMethod::Quick);
    assert_eq!(view.run_state, RunState::Idle);
    assert_eq!(view.array, vec![5, 3, 1]);
    assert_eq!(view.steps_applied, 0);
    assert_eq!(view.log[0], "System Ready. Algorithm: Quick Sort");
    assert_eq!(controller.pending_timer(), None);

    step_to_completion(&mut controller);
    assert!(controller
        .log()
        .iter()
        .any(|line| line.starts_with("Pivot chosen")));
}

#[test]
fn manual_step_while_running_pauses_auto_play() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    let ticket = controller.pending_timer().expect("armed");

    assert!(controller.step());
    assert_eq!(controller.run_state(), RunState::Paused);
    assert_eq!(controller.pending_timer(), None);
    assert!(!controller.fire(ticket.id));
    assert_eq!(controller.view().steps_applied, 1);
}

#[test]
fn step_without_active_trace_is_ignored() {
    let mut controller = controller_with(&[4, 2]);
    let loaded = controller.view();

    assert!(!controller.step());
    assert_eq!(controller.view(), loaded);
    assert_eq!(controller.run_state(), RunState::Idle);
}

#[test]
fn step_after_reset_mid_run_does_not_restart_narration() {
    let mut controller = controller_with(&[5, 3, 1]);
    controller.start();
    for _ in 0..3 {
        let ticket = controller.pending_timer().expect("armed");
        controller.fire(ticket.id);
    }
    assert_eq!(controller.view().array, vec![3, 5, 1]);

    controller.reset();
    controller.drain_events();
    let before = controller.view();

    assert!(!controller.step());
    assert_eq!(controller.view(), before);
    assert_eq!(controller.run_state(), RunState::Idle);
    assert!(controller.drain_events().is_empty());
}

#[test]
fn construction_queues_no_events() {
    let mut controller = controller_with(&[2, 1]);
    assert!(controller.drain_events().is_empty());
    assert_eq!(controller.log().len(), 2);

    controller.load_input(InputSource::Values(vec![3, 4]));
    assert_eq!(
        controller.drain_events(),
        vec![
            PlaybackEvent::LogAppended {
                line: "System Ready. Algorithm: Bubble Sort".to_string(),
            },
            PlaybackEvent::LogAppended {
                line: "Data Loaded: [3, 4]".to_string(),
            },
        ]
    );
}

#[test]
fn events_record_state_changes_and_log_lines() {
    let mut controller = controller_with(&[2, 1]);
    controller.drain_events();

    controller.start();
    let ticket = controller.pending_timer().expect("armed");
    controller.fire(ticket.id);

    assert_eq!(
        controller.drain_events(),
        vec![
            PlaybackEvent::RunStateChanged {
                from: RunState::Idle,
                to: RunState::Running,
            },
            PlaybackEvent::LogAppended {
                line: "Starting Bubble Sort...".to_string(),
            },
        ]
    );
}

#[test]
fn apply_routes_wire_commands() {
    let mut controller = controller_with(&[1]);

    controller.apply(&PlaybackCommand::LoadInput {
        text: Some("9, 8, 7".to_string()),
    });
    assert_eq!(controller.view().array, vec![9, 8, 7]);

    controller.apply(&PlaybackCommand::SetSpeed { speed: 75 });
    controller.apply(&PlaybackCommand::Start);
    assert_eq!(controller.run_state(), RunState::Running);
    assert_eq!(controller.speed(), 75);

    controller.apply(&PlaybackCommand::Pause);
    assert_eq!(controller.run_state(), RunState::Paused);

    controller.apply(&PlaybackCommand::Step);
    assert_eq!(controller.view().steps_applied, 1);

    controller.apply(&PlaybackCommand::Reset);
    assert_eq!(controller.run_state(), RunState::Idle);

    controller.apply(&PlaybackCommand::SelectAlgorithm {
        method: SortingMethod::Merge,
    });
    assert_eq!(controller.method(), SortingMethod::Merge);
    assert_eq!(controller.view().array, vec![9, 8, 7]);
}

#[test]
fn invalid_config_is_rejected() {
    let config = PlaybackConfig {
        fastest_delay_ms: 0,
        ..PlaybackConfig::default()
    };
    assert_eq!(
        PlaybackController::new(config).err(),
        Some(ConfigError::ZeroFastestDelay)
    );
}
