//! Progress reporting for reasoning requests

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use personachain_application::ports::progress::ProgressNotifier;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an indicatif bar over the persona fan-out
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn fan_out_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn replace_bar(&self, next: Option<ProgressBar>) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.take() {
                previous.finish_and_clear();
            }
            *slot = next;
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_fan_out_start(&self, total_personas: usize) {
        let pb = ProgressBar::new(total_personas as u64);
        pb.set_style(Self::fan_out_style());
        pb.set_prefix("Personas");
        pb.set_message("Reasoning...");
        pb.enable_steady_tick(Duration::from_millis(100));
        self.replace_bar(Some(pb));
    }

    fn on_persona_complete(&self, persona: &str, success: bool) {
        if let Ok(slot) = self.bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), persona)
            } else {
                format!("{} {}", "x".red(), persona)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_synthesis_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Synthesis");
        pb.set_message("Combining perspectives and drafting the final answer...");
        pb.enable_steady_tick(Duration::from_millis(100));
        self.replace_bar(Some(pb));
    }

    fn on_final_answer(&self) {
        self.replace_bar(None);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_fan_out_start(&self, total_personas: usize) {
        eprintln!(
            "{} {} ({} personas)",
            "->".cyan(),
            "Reasoning".bold(),
            total_personas
        );
    }

    fn on_persona_complete(&self, persona: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), persona);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), persona);
        }
    }

    fn on_synthesis_start(&self) {
        eprintln!("{} {}", "->".cyan(), "Synthesis".bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle_without_terminal() {
        let reporter = ProgressReporter::new();
        reporter.on_fan_out_start(3);
        reporter.on_persona_complete("The Skeptic", true);
        reporter.on_persona_complete("The Optimist", false);
        if let Some(pb) = reporter.bar.lock().unwrap().as_ref() {
            assert_eq!(pb.position(), 2);
        }
        reporter.on_synthesis_start();
        reporter.on_final_answer();
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
