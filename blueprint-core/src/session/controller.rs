//! Headless generation session.

use super::phase::{PhaseTracker, Progress};
use crate::agent::AgentConfiguration;
use crate::error::GenerationError;
use crate::runtime::AgentDesigner;
use arc_swap::ArcSwapOption;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// State of one interactive session: the trigger, the phase animation, and
/// the latest result or error.
///
/// At most one generation is outstanding at a time. While it runs the
/// trigger is disabled and further calls to [`generate`](Self::generate)
/// return [`GenerationError::Busy`] without reaching the provider.
pub struct GenerationSession {
    designer: Arc<AgentDesigner>,
    tracker: PhaseTracker,
    generating: AtomicBool,
    progress: watch::Sender<Progress>,
    configuration: ArcSwapOption<AgentConfiguration>,
    error: ArcSwapOption<GenerationError>,
}

impl std::fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSession")
            .field("designer", &self.designer)
            .field("generating", &self.is_generating())
            .field("progress", &self.progress())
            .finish()
    }
}

/// Re-enables the trigger however the generation ends.
struct TriggerGuard<'a>(&'a AtomicBool);

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl GenerationSession {
    pub fn new(designer: impl Into<Arc<AgentDesigner>>) -> Self {
        let (progress, _) = watch::channel(Progress::Idle);
        Self {
            designer: designer.into(),
            tracker: PhaseTracker::default(),
            generating: AtomicBool::new(false),
            progress,
            configuration: ArcSwapOption::empty(),
            error: ArcSwapOption::empty(),
        }
    }

    /// Replace the phase animation
    pub fn with_tracker(mut self, tracker: PhaseTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn tracker(&self) -> &PhaseTracker {
        &self.tracker
    }

    /// Current progress
    pub fn progress(&self) -> Progress {
        *self.progress.borrow()
    }

    /// Watch progress changes
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    /// Latest revealed configuration
    pub fn configuration(&self) -> Option<Arc<AgentConfiguration>> {
        self.configuration.load_full()
    }

    /// Message to show the user, if any
    pub fn error(&self) -> Option<GenerationError> {
        self.error.load().as_deref().copied()
    }

    /// Whether a generation is outstanding
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::Acquire)
    }

    /// Whether the trigger is enabled for `goal`
    pub fn can_generate(&self, goal: &str) -> bool {
        !self.is_generating() && !goal.trim().is_empty()
    }

    /// Drop the result and error and return to idle.
    ///
    /// Ignored while a generation is outstanding.
    pub fn clear(&self) {
        if self.is_generating() {
            return;
        }
        self.configuration.store(None);
        self.error.store(None);
        self.progress.send_replace(Progress::Idle);
    }

    /// Run one generation for `goal`.
    ///
    /// A success is revealed only once the phase animation has played out;
    /// a failure is shown as soon as it happens, whichever phase is active.
    pub async fn generate(&self, goal: &str) -> Result<Arc<AgentConfiguration>, GenerationError> {
        if self.is_generating() {
            return Err(GenerationError::Busy);
        }
        if goal.trim().is_empty() {
            self.error.store(Some(Arc::new(GenerationError::InvalidGoal)));
            return Err(GenerationError::InvalidGoal);
        }
        if self
            .generating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GenerationError::Busy);
        }
        let _trigger = TriggerGuard(&self.generating);

        self.error.store(None);
        self.configuration.store(None);
        tracing::info!(phases = self.tracker.phases().len(), "generation started");

        let call = self.designer.generate_configuration(goal);
        let animation = self.tracker.run(&self.progress);
        tokio::pin!(call);
        tokio::pin!(animation);

        let mut animation_done = false;
        let outcome = loop {
            tokio::select! {
                result = &mut call => break result,
                _ = &mut animation, if !animation_done => animation_done = true,
            }
        };

        match outcome {
            Ok(config) => {
                if !animation_done {
                    animation.await;
                }
                let config = Arc::new(config);
                self.configuration.store(Some(config.clone()));
                self.progress.send_replace(Progress::Done);
                tracing::info!(
                    agent_creation_id = %config.agent_creation_id,
                    "generation revealed"
                );
                Ok(config)
            }
            Err(err) => {
                self.error.store(Some(Arc::new(err)));
                self.progress.send_replace(Progress::Failed);
                tracing::info!(error = %err, "generation failed");
                Err(err)
            }
        }
    }
}
