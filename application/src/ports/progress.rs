//! Progress notification port
//!
//! Defines the interface for reporting progress during an orchestration.

/// Callback for progress updates during reasoning
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called once the persona fan-out is about to start
    fn on_fan_out_start(&self, total_personas: usize);

    /// Called when a persona task terminates, successfully or not
    fn on_persona_complete(&self, persona: &str, success: bool);

    /// Called after the fan-in barrier, before synthesis
    fn on_synthesis_start(&self) {}

    /// Called after the final-answer call returns
    fn on_final_answer(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_fan_out_start(&self, _total_personas: usize) {}
    fn on_persona_complete(&self, _persona: &str, _success: bool) {}
}
