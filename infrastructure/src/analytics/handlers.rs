//! Built-in analytics handlers

use super::channel::{AnalyticsError, AnalyticsHandler};
use personachain_domain::AnalyticsEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Writes each event to the log under the `personachain::analytics` target
#[derive(Debug, Default)]
pub struct TracingAnalyticsHandler;

impl AnalyticsHandler for TracingAnalyticsHandler {
    fn handle(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(event)?;
        info!(target: "personachain::analytics", event = event.event_type(), "{}", payload);
        Ok(())
    }
}

/// JSONL analytics writer: one JSON object per line.
///
/// Each line carries the event fields plus a `type` and a `timestamp`.
/// Appends to an existing file. Thread-safe via `Mutex<BufWriter<File>>`.
pub struct JsonlAnalyticsHandler {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAnalyticsHandler {
    /// Open `path` for appending, creating it and its parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalyticsHandler for JsonlAnalyticsHandler {
    fn handle(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = serde_json::to_value(event)?;
        if let serde_json::Value::Object(map) = &mut record {
            map.remove("event");
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type().to_string()),
            );
            map.insert("timestamp".to_string(), serde_json::Value::String(timestamp));
        }
        let line = serde_json::to_string(&record)?;

        if let Ok(mut writer) = self.writer.lock() {
            writeln!(writer, "{}", line)?;
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for JsonlAnalyticsHandler {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personachain_domain::{
        DenialReason, ReasoningChain, ReasoningStep, SubscriberId, SubscriptionTier,
        SynthesisStrategy,
    };
    use std::time::Duration;

    fn completed() -> AnalyticsEvent {
        let steps = vec![
            ReasoningStep::success("The Skeptic", "doubt", 12, Duration::from_millis(5)),
            ReasoningStep::failure("The Optimist", "boom", Duration::from_millis(1)),
        ];
        let chain = ReasoningChain::assemble(
            "q",
            steps,
            "syn",
            "final",
            Duration::from_millis(40),
            SubscriptionTier::Free,
            SynthesisStrategy::Concatenative,
            false,
        );
        AnalyticsEvent::completed(&chain, &SubscriberId::new("u1").unwrap())
    }

    #[test]
    fn test_jsonl_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let handler = JsonlAnalyticsHandler::open(&path).unwrap();

        handler.handle(&completed()).unwrap();
        handler
            .handle(&AnalyticsEvent::denied(
                &SubscriberId::new("u2").unwrap(),
                SubscriptionTier::Pro,
                &DenialReason::PersonaLimitExceeded,
                4000,
            ))
            .unwrap();
        drop(handler);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
            assert!(line.get("event").is_none());
        }

        assert_eq!(lines[0]["type"], "reasoning_completed");
        assert_eq!(lines[0]["subscriber"], "u1");
        assert_eq!(lines[0]["personas"], 2);
        assert_eq!(lines[0]["failed_personas"], 1);
        assert_eq!(lines[0]["tokens"], 12);

        assert_eq!(lines[1]["type"], "quota_denied");
        assert_eq!(lines[1]["reason"], "Persona limit exceeded");
    }

    #[test]
    fn test_jsonl_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");

        for _ in 0..2 {
            let handler = JsonlAnalyticsHandler::open(&path).unwrap();
            handler.handle(&completed()).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_tracing_handler_accepts_events() {
        assert!(TracingAnalyticsHandler.handle(&completed()).is_ok());
    }
}
