use playback::{PlaybackConfig, PlaybackController};
use shared::{
    domain::{InputSource, RunState, SortingMethod},
    protocol::PlaybackCommand,
};

#[test]
fn every_algorithm_plays_back_random_input_to_sorted_completion() {
    for (offset, method) in SortingMethod::ALL.into_iter().enumerate() {
        let config = PlaybackConfig {
            seed: Some(100 + offset as u64),
            algorithm: method,
            ..PlaybackConfig::default()
        };
        let mut controller = PlaybackController::new(config).expect("controller");
        let original = controller.view().array;
        assert_eq!(original.len(), 14);

        controller.apply(&PlaybackCommand::Start);
        controller.apply(&PlaybackCommand::Pause);
        let mut steps = 0;
        while controller.step() {
            steps += 1;
            let view = controller.view();
            let mut current = view.array.clone();
            let mut expected = original.clone();
            current.sort_unstable();
            expected.sort_unstable();
            assert_eq!(current, expected, "{method} step {steps}");
        }

        let view = controller.view();
        let mut sorted = original.clone();
        sorted.sort_unstable();
        assert_eq!(view.run_state, RunState::Completed, "{method}");
        assert_eq!(view.array, sorted, "{method}");
        assert_eq!(view.sorted_indices.len(), 14, "{method}");
        // two initialization lines, one per step, one completion line
        assert_eq!(view.log.len(), steps + 3, "{method}");
        assert_eq!(view.steps_applied, steps, "{method}");
    }
}

#[test]
fn custom_text_input_survives_restart() {
    let mut controller = PlaybackController::with_source(
        PlaybackConfig::default(),
        InputSource::Text("12, 5, 8, 3".to_string()),
    )
    .expect("controller");

    controller.start();
    controller.pause();
    while controller.step() {}
    assert_eq!(controller.view().array, vec![3, 5, 8, 12]);

    controller.apply(&PlaybackCommand::Start);
    let view = controller.view();
    assert_eq!(view.run_state, RunState::Running);
    assert_eq!(view.array, vec![12, 5, 8, 3]);
}
