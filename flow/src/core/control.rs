// flow/src/core/control.rs

//! Flow signals returned by handlers and the outcome of a whole run.

/// Returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  /// Keep going with the remaining handlers and steps.
  Continue,
  /// Halt the workflow now. Nothing after this handler runs.
  Stop,
}

/// Outcome of [`crate::Workflow::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  Completed,
  /// A handler returned [`FlowControl::Stop`].
  Stopped,
}
