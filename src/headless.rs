//! Headless driver
//!
//! Plays the browser's part against a [`RecordingRenderer`]: every running
//! transition eventually ends and is reported back to the engine.

use crate::renderer::{RecordedTile, RecordingRenderer};
use crate::ripple::Rippler;

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing left in flight after this many finished transitions
    Idle { events: usize },
    /// Gave up with transitions still running
    Truncated { events: usize },
}

impl RunOutcome {
    pub fn events(&self) -> usize {
        match *self {
            RunOutcome::Idle { events } | RunOutcome::Truncated { events } => events,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RunOutcome::Idle { .. })
    }
}

/// Report the oldest running transition as finished
///
/// Returns the tile that finished, or None when nothing was in flight.
pub fn step(rippler: &mut Rippler<RecordingRenderer>) -> Option<RecordedTile> {
    let finished = rippler.renderer_mut().pop_finished()?;
    rippler.on_animation_complete(finished.generation, finished.tile);
    Some(finished)
}

/// Finish transitions oldest-first until idle or `max_events` is reached
pub fn run_until_idle(rippler: &mut Rippler<RecordingRenderer>, max_events: usize) -> RunOutcome {
    run_with(rippler, max_events, |_| true)
}

/// Like [`run_until_idle`], but finishes the oldest transition matching
/// `prefer` whenever one exists
pub fn run_with<F>(rippler: &mut Rippler<RecordingRenderer>, max_events: usize, mut prefer: F) -> RunOutcome
where
    F: FnMut(&RecordedTile) -> bool,
{
    let mut events = 0;
    while events < max_events {
        let renderer = rippler.renderer_mut();
        let Some(finished) = renderer
            .pop_finished_where(&mut prefer)
            .or_else(|| renderer.pop_finished())
        else {
            log::debug!("Headless run idle after {} events", events);
            return RunOutcome::Idle { events };
        };
        rippler.on_animation_complete(finished.generation, finished.tile);
        events += 1;
    }

    if rippler.renderer().is_idle() {
        RunOutcome::Idle { events }
    } else {
        log::warn!("Headless run stopped after {} events with work in flight", events);
        RunOutcome::Truncated { events }
    }
}
