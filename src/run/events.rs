//! Progress events emitted during a comparison run.

use crate::models::{PageStatus, RunSummary};

/// A progress notification emitted while a comparison run executes.
///
/// Events arrive in run order with one exception: `PageCompared` events
/// within a single batch arrive in completion order, not path order.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The run has started; `total` paths will be compared.
    Started {
        /// Number of paths in the run.
        total: usize,
    },
    /// One path finished comparing on both hosts.
    PageCompared {
        /// 1-based position of the path in the run.
        index: usize,
        /// Number of paths in the run.
        total: usize,
        /// The compared page path.
        path: String,
        /// Outcome classification for the path.
        status: PageStatus,
    },
    /// A batch finished; `completed` paths are done so far.
    BatchCompleted {
        /// Paths compared so far across all finished batches.
        completed: usize,
        /// Number of paths in the run.
        total: usize,
    },
    /// All batches are done; the results are being assembled.
    GeneratingReport,
    /// The run finished normally.
    Completed {
        /// Aggregate counts for the finished run.
        summary: RunSummary,
    },
    /// Cancellation stopped the run at a batch boundary.
    Stopped {
        /// Paths compared before the stop.
        completed: usize,
    },
    /// The run failed before producing a result.
    Failed {
        /// Rendered failure chain.
        message: String,
    },
}

/// Receives progress events from a comparison run.
///
/// Implemented for any `Fn(ProgressEvent) + Send + Sync` closure, so callers
/// can pass `&|event| { ... }` directly.
pub trait ProgressObserver: Send + Sync {
    /// Called once per event, in the order described on [`ProgressEvent`].
    fn on_event(&self, event: ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn on_event(&self, event: ProgressEvent) {
        self(event)
    }
}
