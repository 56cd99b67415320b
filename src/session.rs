//! # Recompute-on-Change Session
//!
//! Drives the pipeline for a live preview. Edits are submitted as they
//! happen; a pass runs only once the document has been quiet for the
//! debounce window, and a pass finishing for anything but the latest edit
//! is thrown away.
//!
//! Time is passed in by the caller, so the session holds no timers and
//! never sleeps.

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::labels::{LabelMap, Labels};
use crate::measure::MeasurementSurface;
use crate::model::{PageGeometry, ResumeDocument};
use crate::pagination::Pagination;
use crate::theme::ThemeId;

/// Quiet period before a submitted change is paginated.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Identifies one submitted change. Later submissions compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// What the preview should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewState<'a> {
    /// No pass has completed yet.
    Placeholder,
    Ready(&'a Pagination),
}

struct PendingChange {
    generation: Generation,
    document: ResumeDocument,
    theme: ThemeId,
    submitted_at: Instant,
}

pub struct PreviewSession<S: MeasurementSurface> {
    surface: S,
    geometry: PageGeometry,
    labels: Box<dyn Labels>,
    debounce: Duration,
    latest: u64,
    pending: Option<PendingChange>,
    current: Option<(Generation, Pagination)>,
}

impl<S: MeasurementSurface> PreviewSession<S> {
    pub fn new(surface: S, geometry: PageGeometry) -> Self {
        Self {
            surface,
            geometry,
            labels: Box::new(LabelMap::english()),
            debounce: DEFAULT_DEBOUNCE,
            latest: 0,
            pending: None,
            current: None,
        }
    }

    pub fn with_labels(mut self, labels: impl Labels + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Record a change. Restarts the quiet period and supersedes any
    /// change still waiting.
    pub fn submit(&mut self, document: ResumeDocument, theme: ThemeId, now: Instant) -> Generation {
        self.latest += 1;
        let generation = Generation(self.latest);
        if let Some(old) = self.pending.replace(PendingChange {
            generation,
            document,
            theme,
            submitted_at: now,
        }) {
            log::debug!("{:?} superseded by {generation:?}", old.generation);
        }
        generation
    }

    /// Run the waiting pass if the quiet period has elapsed.
    ///
    /// Returns the generation that became current, if any.
    pub fn poll(&mut self, now: Instant) -> Result<Option<Generation>> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now.saturating_duration_since(p.submitted_at) >= self.debounce);
        if due {
            self.flush()
        } else {
            Ok(None)
        }
    }

    /// Run the waiting pass now, ignoring the quiet period.
    ///
    /// A failed pass leaves its change pending, so the next `poll` or
    /// `flush` retries it unless a newer change replaces it first.
    pub fn flush(&mut self) -> Result<Option<Generation>> {
        let Some(change) = self.pending.take() else {
            return Ok(None);
        };
        let pass = crate::recompute_with(
            &change.document,
            change.theme,
            self.labels.as_ref(),
            &self.geometry,
            &mut self.surface,
        );
        match pass {
            Ok(pagination) => {
                Ok(self.accept(change.generation, pagination).then_some(change.generation))
            }
            Err(e) => {
                log::warn!("Pass for {:?} failed: {e}", change.generation);
                self.pending = Some(change);
                Err(e)
            }
        }
    }

    /// Install a pass result, unless a newer change has been submitted or
    /// accepted since `generation`.
    ///
    /// Hosts that measure asynchronously call this when their pass lands.
    pub fn accept(&mut self, generation: Generation, pagination: Pagination) -> bool {
        let stale = generation.0 < self.latest
            || self
                .current
                .as_ref()
                .is_some_and(|(current, _)| *current > generation);
        if stale {
            log::debug!("Discarding result for {generation:?}; latest is {}", self.latest);
            return false;
        }
        self.current = Some((generation, pagination));
        true
    }

    pub fn state(&self) -> PreviewState<'_> {
        match &self.current {
            Some((_, pagination)) => PreviewState::Ready(pagination),
            None => PreviewState::Placeholder,
        }
    }

    /// Whether a submitted change is still waiting for its pass.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn latest_generation(&self) -> Option<Generation> {
        (self.latest > 0).then_some(Generation(self.latest))
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
