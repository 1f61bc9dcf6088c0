//! Synchronous playback state machine.
//!
//! The controller never sleeps. While running it holds exactly one pending
//! [`TimerTicket`]; whoever drives it (see [`crate::PlaybackSession`]) waits
//! `ticket.delay` and calls [`PlaybackController::fire`] with the ticket id.
//! Every transition that must preempt auto-play replaces or clears the ticket,
//! so a late `fire` with an old id is ignored.

use std::{collections::BTreeSet, time::Duration};

use rand::{rngs::StdRng, SeedableRng};
use shared::{
    domain::{InputSource, PlaybackView, RunState, SortingMethod, Step},
    protocol::{PlaybackCommand, PlaybackEvent},
};
use tracer::Trace;
use tracing::{debug, info};

use crate::{
    config::{clamp_speed, ConfigError, PlaybackConfig},
    input,
};

pub const COMPLETION_LOG_LINE: &str = "Execution Finished.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub id: u64,
    pub delay: Duration,
}

#[derive(Debug, Default)]
struct TimerSlot {
    issued: u64,
    pending: Option<TimerTicket>,
}

pub struct PlaybackController {
    config: PlaybackConfig,
    rng: StdRng,
    method: SortingMethod,
    source: InputSource,
    speed: u8,
    state: RunState,
    array: Vec<i64>,
    highlights: Vec<usize>,
    sorted_indices: BTreeSet<usize>,
    log: Vec<String>,
    steps_applied: usize,
    trace: Option<Trace>,
    timer: TimerSlot,
    events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    pub fn new(config: PlaybackConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, InputSource::Random)
    }

    pub fn with_source(config: PlaybackConfig, source: InputSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            method: config.algorithm,
            speed: config.default_speed,
            config,
            rng,
            source: InputSource::Random,
            state: RunState::Idle,
            array: Vec::new(),
            highlights: Vec::new(),
            sorted_indices: BTreeSet::new(),
            log: Vec::new(),
            steps_applied: 0,
            trace: None,
            timer: TimerSlot::default(),
            events: Vec::new(),
        };
        controller.load_input(source);
        // the initial view already carries the load; only later changes are events
        controller.events.clear();
        Ok(controller)
    }

    pub fn apply(&mut self, command: &PlaybackCommand) {
        debug!(command = command.name(), state = %self.state, "applying playback command");
        if let Some(source) = command.input_source() {
            self.load_input(source);
            return;
        }
        match command {
            PlaybackCommand::Start => self.start(),
            PlaybackCommand::Pause => self.pause(),
            PlaybackCommand::Step => {
                self.step();
            }
            PlaybackCommand::Reset => self.reset(),
            PlaybackCommand::SetSpeed { speed } => self.set_speed(*speed),
            PlaybackCommand::SelectAlgorithm { method } => self.select_algorithm(*method),
            PlaybackCommand::Reload => self.reload(),
            PlaybackCommand::LoadInput { .. }
            | PlaybackCommand::LoadValues { .. }
            | PlaybackCommand::View => {}
        }
    }

    /// Replaces the working sequence and returns to `Idle` with a fresh log.
    pub fn load_input(&mut self, source: InputSource) {
        self.cancel_timer("input loaded");
        let loaded = input::resolve(&source, &self.config, &mut self.rng);
        if loaded.randomized {
            debug!(?source, "input empty or invalid; using random sequence");
        }
        self.source = source;
        self.array = loaded.values;
        self.highlights.clear();
        self.sorted_indices.clear();
        self.steps_applied = 0;
        self.trace = None;
        self.set_state(RunState::Idle);

        self.log.clear();
        self.append_log(format!("System Ready. Algorithm: {}", self.method.label()));
        self.append_log(format!("Data Loaded: [{}]", join_values(&self.array)));
        info!(method = %self.method, len = self.array.len(), "playback input loaded");
    }

    /// Loads the last input source again; random input gets fresh values.
    pub fn reload(&mut self) {
        let source = self.source.clone();
        self.load_input(source);
    }

    pub fn start(&mut self) {
        match self.state {
            RunState::Running => {
                debug!("start ignored; already running");
                return;
            }
            RunState::Completed => self.reload(),
            RunState::Idle | RunState::Paused => {}
        }

        self.ensure_trace();
        self.set_state(RunState::Running);
        self.arm_timer();
    }

    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.cancel_timer("paused");
        self.set_state(RunState::Paused);
    }

    /// Manual single step from the active trace. Stops auto-play first so only
    /// one cadence is live. Without a trace (idle, reset or completed) nothing
    /// happens. Returns whether a step was applied.
    pub fn step(&mut self) -> bool {
        if self.trace.is_none() {
            debug!(state = %self.state, "step ignored; no active trace");
            return false;
        }
        if self.state == RunState::Running {
            self.pause();
        }
        self.advance()
    }

    /// Timer callback. Ignored unless `ticket_id` is the pending ticket.
    pub fn fire(&mut self, ticket_id: u64) -> bool {
        if self.timer.pending.map(|ticket| ticket.id) != Some(ticket_id) {
            debug!(ticket_id, "stale timer ignored");
            return false;
        }
        self.timer.pending = None;
        if self.state != RunState::Running {
            return false;
        }

        let applied = self.advance();
        if self.state == RunState::Running {
            self.arm_timer();
        }
        applied
    }

    pub fn reset(&mut self) {
        self.cancel_timer("reset");
        self.trace = None;
        self.highlights.clear();
        self.set_state(RunState::Idle);
        info!(method = %self.method, "playback reset");
    }

    /// Clamps to 1..=100. A running timer is re-armed with the new delay.
    pub fn set_speed(&mut self, raw: i64) {
        let speed = clamp_speed(raw);
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        debug!(speed, delay_ms = self.delay().as_millis() as u64, "speed changed");
        if self.state == RunState::Running {
            self.cancel_timer("speed changed");
            self.arm_timer();
        }
    }

    pub fn select_algorithm(&mut self, method: SortingMethod) {
        self.reset();
        self.method = method;
        self.reload();
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn method(&self) -> SortingMethod {
        self.method
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn delay(&self) -> Duration {
        self.config.delay_for_speed(self.speed)
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn pending_timer(&self) -> Option<TimerTicket> {
        self.timer.pending
    }

    pub fn view(&self) -> PlaybackView {
        PlaybackView {
            method: self.method,
            run_state: self.state,
            speed: self.speed,
            array: self.array.clone(),
            highlights: self.highlights.clone(),
            sorted_indices: self.sorted_indices.clone(),
            log: self.log.clone(),
            steps_applied: self.steps_applied,
        }
    }

    /// Events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_trace(&mut self) {
        if self.trace.is_none() {
            self.trace = Some(tracer::trace(self.method, &self.array));
        }
    }

    fn advance(&mut self) -> bool {
        let Some(trace) = self.trace.as_mut() else {
            return false;
        };
        match trace.next() {
            Some(step) => {
                self.apply_step(step);
                true
            }
            None => {
                self.complete();
                false
            }
        }
    }

    fn apply_step(&mut self, step: Step) {
        let Step {
            array,
            highlights,
            sorted_indices,
            description,
            completed,
        } = step;
        self.array = array;
        self.highlights = highlights;
        self.sorted_indices = sorted_indices;
        self.steps_applied += 1;
        debug!(step = self.steps_applied, %description, "step applied");
        self.append_log(description);

        if completed {
            self.complete();
        }
    }

    fn complete(&mut self) {
        self.cancel_timer("completed");
        self.trace = None;
        self.set_state(RunState::Completed);
        self.append_log(COMPLETION_LOG_LINE.to_string());
        info!(method = %self.method, steps = self.steps_applied, "playback completed");
    }

    fn arm_timer(&mut self) {
        self.timer.issued += 1;
        let ticket = TimerTicket {
            id: self.timer.issued,
            delay: self.delay(),
        };
        self.timer.pending = Some(ticket);
        debug!(ticket = ticket.id, delay_ms = ticket.delay.as_millis() as u64, "timer armed");
    }

    fn cancel_timer(&mut self, reason: &'static str) {
        if let Some(ticket) = self.timer.pending.take() {
            debug!(ticket = ticket.id, reason, "timer cancelled");
        }
    }

    fn set_state(&mut self, next: RunState) {
        if self.state == next {
            return;
        }
        let previous = std::mem::replace(&mut self.state, next);
        debug!(from = %previous, to = %next, "run state changed");
        self.events.push(PlaybackEvent::RunStateChanged {
            from: previous,
            to: next,
        });
    }

    fn append_log(&mut self, line: String) {
        self.events.push(PlaybackEvent::LogAppended { line: line.clone() });
        self.log.push(line);
    }
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
