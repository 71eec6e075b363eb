//! Injectable reporting of pipeline diagnostics
//!
//! Stages hand their summaries to a [`Reporter`] instead of printing, so the
//! pipeline stays pure. The default reporter drops everything.

mod diagnostic;

use std::sync::Arc;
use parking_lot::Mutex;

pub use diagnostic::{
    Diagnostic, FilterSortSummary, ColorSummary, HighlightSummary, VariableSummary,
};

/// Sink for diagnostics
pub trait Reporter: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Reporter that discards every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Reporter forwarding diagnostics as structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::FilterSort(s) => {
                tracing::info!(raw = s.raw, filtered = s.filtered, sorted = s.sorted, "filter/sort summary");
            }
            Diagnostic::Color(s) => {
                tracing::info!(name = %s.name, scale = %s.scale, ticks = ?s.ticks, observed = ?s.observed, "color axis");
            }
            Diagnostic::Highlight(s) => {
                tracing::info!(name = %s.name, color = %s.color, index = s.index, "highlight");
            }
            Diagnostic::Variable(s) => {
                tracing::info!(
                    name = %s.name,
                    color = %s.color,
                    range = %s.range,
                    scale = %s.scale,
                    observed = ?s.observed,
                    out_of_range = s.out_of_range,
                    highlights = ?s.highlights,
                    "variable"
                );
                if s.out_of_range > 0 {
                    tracing::warn!(name = %s.name, count = s.out_of_range, "samples outside declared range");
                }
            }
        }
    }
}

/// Reporter that keeps every diagnostic in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    entries: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Remove and return the collected diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.entries.lock().push(diagnostic.clone());
    }
}

/// Reporter built from a closure
pub struct FnReporter<F> {
    handler: F,
}

impl<F> Reporter for FnReporter<F>
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        (self.handler)(diagnostic);
    }
}

/// Create a reporter from a closure
///
/// # Example
/// ```
/// use pcp_core::{reporter_from_fn, Reporter};
///
/// let reporter = reporter_from_fn(|d| println!("{}", d));
/// # let _ = &reporter as &dyn Reporter;
/// ```
pub fn reporter_from_fn<F>(handler: F) -> FnReporter<F>
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    FnReporter { handler }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }
}
