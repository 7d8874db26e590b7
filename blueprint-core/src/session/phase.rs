//! Cosmetic generation phases.
//!
//! The tracker advances on its own clock. It is not a progress signal: the
//! provider call is the only source of truth for success or failure.

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

/// A named, fixed-length phase with cycling sub-labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub name: &'static str,
    pub duration: Duration,
    pub substeps: &'static [&'static str],
}

impl Phase {
    pub const fn new(
        name: &'static str,
        duration: Duration,
        substeps: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            duration,
            substeps,
        }
    }
}

/// The five phases shown while a configuration is generated.
pub const PHASES: [Phase; 5] = [
    Phase::new(
        "Analyzing Goal",
        Duration::from_millis(2000),
        &["Decomposing requirements", "Estimating resources", "Parsing data sources"],
    ),
    Phase::new(
        "Designing Architecture",
        Duration::from_millis(2500),
        &["Selecting agent pattern", "Defining memory system", "Matching model architecture"],
    ),
    Phase::new(
        "Configuring Tools & Memory",
        Duration::from_millis(2200),
        &["Integrating APIs", "Setting up vector DB", "Configuring task loops"],
    ),
    Phase::new(
        "Generating Code & Deployment Specs",
        Duration::from_millis(3000),
        &[
            "Creating agent file",
            "Building Docker container spec",
            "Generating Kubernetes manifests",
        ],
    ),
    Phase::new(
        "Finalizing Agent Profile",
        Duration::from_millis(1500),
        &[
            "Setting up monitoring",
            "Calculating performance predictions",
            "Compiling final configuration",
        ],
    ),
];

/// Observable state of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Idle,
    /// Phase `index` is active, showing sub-label `substep`
    Step { index: usize, substep: usize },
    Done,
    Failed,
}

impl Progress {
    /// Whether phase `index` should be drawn as completed
    pub fn is_completed(&self, index: usize) -> bool {
        match self {
            Progress::Step { index: current, .. } => index < *current,
            Progress::Done => true,
            Progress::Idle | Progress::Failed => false,
        }
    }

    /// Whether phase `index` is the active one
    pub fn is_active(&self, index: usize) -> bool {
        matches!(self, Progress::Step { index: current, .. } if *current == index)
    }

    /// Whether the state is terminal
    pub fn is_settled(&self) -> bool {
        matches!(self, Progress::Done | Progress::Failed)
    }
}

/// Drives [`Progress::Step`] through a list of phases on a timer.
#[derive(Debug, Clone)]
pub struct PhaseTracker {
    phases: Vec<Phase>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new(PHASES.to_vec())
    }
}

impl PhaseTracker {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Time for the animation to reach its last tick
    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Walk every phase and sub-label, publishing each step.
    ///
    /// Resolves once the last phase's time has elapsed, leaving the final
    /// step published. Dropping the future stops the animation.
    pub async fn run(&self, progress: &watch::Sender<Progress>) {
        for (index, phase) in self.phases.iter().enumerate() {
            let start = Instant::now();
            let ticks = phase.substeps.len().max(1) as u32;

            for substep in 0..ticks {
                progress.send_replace(Progress::Step {
                    index,
                    substep: substep as usize,
                });
                sleep_until(start + phase.duration * (substep + 1) / ticks).await;
            }
        }
    }
}
