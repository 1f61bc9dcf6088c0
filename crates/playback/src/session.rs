//! Async driver around [`PlaybackController`] owning the auto-play timer task.

use std::sync::Arc;

use shared::{
    domain::PlaybackView,
    protocol::{PlaybackCommand, PlaybackEvent},
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::debug;

use crate::controller::{PlaybackController, TimerTicket};

const EVENT_CAPACITY: usize = 1024;

pub struct PlaybackSession {
    inner: Mutex<SessionState>,
    events: broadcast::Sender<PlaybackEvent>,
}

struct SessionState {
    controller: PlaybackController,
    armed: Option<ArmedTimer>,
}

struct ArmedTimer {
    ticket: TimerTicket,
    task: JoinHandle<()>,
}

impl PlaybackSession {
    pub fn new(controller: PlaybackController) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            inner: Mutex::new(SessionState {
                controller,
                armed: None,
            }),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    pub async fn dispatch(self: &Arc<Self>, command: PlaybackCommand) -> PlaybackView {
        let mut state = self.inner.lock().await;
        state.controller.apply(&command);
        self.settle(&mut state)
    }

    pub async fn view(&self) -> PlaybackView {
        self.inner.lock().await.controller.view()
    }

    /// Aborts any armed timer; the controller is left as is.
    pub async fn shutdown(&self) {
        let mut state = self.inner.lock().await;
        if let Some(armed) = state.armed.take() {
            armed.task.abort();
            debug!(ticket = armed.ticket.id, "timer task aborted on shutdown");
        }
    }

    async fn on_timer(self: Arc<Self>, ticket: TimerTicket) {
        let mut state = self.inner.lock().await;
        if state
            .armed
            .as_ref()
            .is_some_and(|armed| armed.ticket.id == ticket.id)
        {
            // this task is finishing on its own; nothing to abort
            state.armed = None;
        }
        if state.controller.fire(ticket.id) {
            debug!(ticket = ticket.id, "timer step applied");
        }
        self.settle(&mut state);
    }

    /// Brings the timer task in line with the controller's pending ticket and
    /// publishes what changed.
    fn settle(self: &Arc<Self>, state: &mut SessionState) -> PlaybackView {
        let wanted = state.controller.pending_timer();
        let armed_id = state.armed.as_ref().map(|armed| armed.ticket.id);
        if wanted.map(|ticket| ticket.id) != armed_id {
            if let Some(previous) = state.armed.take() {
                previous.task.abort();
                debug!(ticket = previous.ticket.id, "timer task aborted");
            }
            if let Some(ticket) = wanted {
                state.armed = Some(ArmedTimer {
                    ticket,
                    task: self.spawn_timer(ticket),
                });
            }
        }

        for event in state.controller.drain_events() {
            let _ = self.events.send(event);
        }
        let view = state.controller.view();
        let _ = self.events.send(PlaybackEvent::ViewUpdated { view: view.clone() });
        view
    }

    fn spawn_timer(self: &Arc<Self>, ticket: TimerTicket) -> JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(ticket.delay).await;
            session.on_timer(ticket).await;
        })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
