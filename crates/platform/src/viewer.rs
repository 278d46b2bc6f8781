//! Rotating viewer: one load state, one spin, generation-counted loads.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use asset::model::LoadedModel;
use asset::reference::AssetReference;
use asset::{ModelFormat, diagnose};
use corelib::Mat4;
use corelib::error::LoadError;
use corelib::spin::Spin;
use corelib::state::LoadState;

/// Completion message from a loader worker.
struct LoadOutcome {
    generation: u64,
    result: Result<LoadedModel, LoadError>,
}

/// Owns exactly one [`LoadState`] and drives the spin once a model is
/// present.
///
/// Loads run on worker threads; completions come back over a channel and
/// are drained by [`RotatingViewer::poll`] on the event-loop thread, so
/// the state has a single writer. Each mount bumps a generation counter:
/// a completion carrying a stale generation is discarded without side
/// effects, which is what makes an in-flight load ignorable after its
/// owner has moved on.
pub struct RotatingViewer {
    state: LoadState<LoadedModel>,
    spin: Spin,
    generation: u64,
    sender: Sender<LoadOutcome>,
    receiver: Receiver<LoadOutcome>,
}

impl RotatingViewer {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            state: LoadState::Idle,
            spin: Spin::new(),
            generation: 0,
            sender,
            receiver,
        }
    }

    #[inline]
    pub fn state(&self) -> &LoadState<LoadedModel> {
        &self.state
    }

    #[inline]
    pub fn spin(&self) -> &Spin {
        &self.spin
    }

    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        self.spin.model_matrix()
    }

    /// Kick off a load for `reference`. On failure the worker also runs
    /// diagnostics before reporting, so the log carries the classified
    /// reason alongside the error.
    pub fn mount(&mut self, format: ModelFormat, reference: AssetReference) {
        self.mount_with(move || {
            let result = asset::load(format, &reference);
            if let Err(error) = &result {
                diagnose::diagnose(error, &reference);
            }
            result
        });
    }

    /// Teardown + fresh mount: the state returns to `Idle` first and the
    /// new attempt resolves independently of anything loaded before.
    pub fn remount(&mut self, format: ModelFormat, reference: AssetReference) {
        self.reset();
        self.mount(format, reference);
    }

    /// Back to `Idle` with a fresh spin. Any in-flight worker keeps
    /// running; its completion will be stale and discarded on arrival.
    pub fn reset(&mut self) {
        self.state = LoadState::Idle;
        self.spin = Spin::new();
    }

    /// Start a load with an injected load function. Used directly by
    /// tests; [`RotatingViewer::mount`] builds the real one.
    pub fn mount_with<F>(&mut self, load: F)
    where
        F: FnOnce() -> Result<LoadedModel, LoadError> + Send + 'static,
    {
        if !matches!(self.state, LoadState::Idle) {
            log::warn!(
                "mount requested while {}; restarting from idle",
                self.state.label()
            );
            self.reset();
        }
        self.state.begin();
        self.generation += 1;

        let generation = self.generation;
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = load();
            // The viewer may already be gone; the orphaned result is
            // simply dropped with the channel.
            let _ = sender.send(LoadOutcome { generation, result });
        });
    }

    /// Drain worker completions. Returns `true` when the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.receiver.try_recv() {
            if outcome.generation != self.generation {
                log::debug!(
                    "discarding stale load result (generation {} != {})",
                    outcome.generation,
                    self.generation
                );
                continue;
            }
            match &outcome.result {
                Ok(model) => log::info!(
                    "viewer loaded '{}' ({} triangles)",
                    model.name,
                    model.triangle_count()
                ),
                Err(error) => log::error!("viewer load failed: {error}"),
            }
            changed |= self.state.finish(outcome.result);
        }
        changed
    }

    /// Advance the spin by `dt` seconds. Spins only while a model is
    /// loaded; before that every tick is a no-op.
    pub fn advance(&mut self, dt: f32) {
        if self.state.is_loaded() {
            self.spin.advance(dt);
        }
    }
}

impl Default for RotatingViewer {
    fn default() -> Self {
        Self::new()
    }
}
