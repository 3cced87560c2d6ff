//! Deliberation progress port
//!
//! Lets the presentation layer show that a request is outstanding.

/// Callback for the single suspension point of a turn
pub trait DeliberationNotifier: Send + Sync {
    /// Called right before the request is dispatched
    fn on_deliberation_start(&self, round: u32);

    /// Called once the request has completed, successfully or not
    fn on_deliberation_end(&self, success: bool);
}

/// No-op notifier for when progress reporting is not needed
pub struct NoDeliberationProgress;

impl DeliberationNotifier for NoDeliberationProgress {
    fn on_deliberation_start(&self, _round: u32) {}
    fn on_deliberation_end(&self, _success: bool) {}
}
