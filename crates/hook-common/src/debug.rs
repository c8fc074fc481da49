//! Debug recording for hooks.
//!
//! Appends timestamped lines to a debug log file so decisions can be
//! inspected after the fact. Recording is observability only: a failed
//! write never reaches the decision path.

use camino::Utf8PathBuf;
use chrono::{SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

/// Sink for diagnostic messages.
///
/// Implementations must never fail from the caller's point of view.
pub trait Recorder {
    fn record(&self, message: &str);
}

/// Recorder appending `<ISO-8601 timestamp> <message>` lines to a file.
#[derive(Debug, Clone)]
pub struct FileRecorder {
    path: Utf8PathBuf,
    enabled: bool,
}

impl FileRecorder {
    /// Create a recorder that always writes to the given path.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }

    /// Create a recorder from the environment.
    ///
    /// Recording is enabled when `OPENCODE_HOOK_DEBUG` is set; the log
    /// path defaults to `/tmp/opencode-hook-debug.log` and can be
    /// overridden via `OPENCODE_HOOK_DEBUG_LOG`.
    pub fn from_env() -> Self {
        Self {
            path: debug_log_path(),
            enabled: is_debug_enabled(),
        }
    }

    fn append(&self, message: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        writeln!(file, "{} {}", timestamp, message)?;
        Ok(())
    }
}

impl Recorder for FileRecorder {
    fn record(&self, message: &str) {
        if !self.enabled {
            return;
        }
        let _ = self.append(message);
    }
}

/// Recorder capturing messages in memory, for tests.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    entries: Mutex<Vec<String>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Recorder for MemoryRecorder {
    fn record(&self, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(message.to_string());
        }
    }
}

/// Check if debug recording is enabled.
pub fn is_debug_enabled() -> bool {
    std::env::var("OPENCODE_HOOK_DEBUG").is_ok()
}

/// Get the debug log file path.
pub fn debug_log_path() -> Utf8PathBuf {
    match std::env::var("OPENCODE_HOOK_DEBUG_LOG") {
        Ok(path) if !path.is_empty() => Utf8PathBuf::from(path),
        _ => Utf8PathBuf::from("/tmp/opencode-hook-debug.log"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    #[test]
    fn test_file_recorder_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("debug.log");

        let recorder = FileRecorder::new(path.clone());
        recorder.record("[HEADERS] first line");
        recorder.record("[HEADERS] second line");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[HEADERS] first line"));
        assert!(lines[1].ends_with("[HEADERS] second line"));
        // ISO-8601 timestamp prefix, e.g. "2026-08-30T12:34:56.789Z"
        let timestamp = lines[0].split_whitespace().next().unwrap();
        assert!(timestamp.ends_with('Z'));
        assert!(timestamp.contains('T'));
    }

    #[test]
    fn test_disabled_recorder_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("debug.log");

        let recorder = FileRecorder {
            path: path.clone(),
            enabled: false,
        };
        recorder.record("[HEADERS] dropped");
        assert!(!path.exists());
    }

    #[test]
    fn test_record_swallows_write_errors() {
        let recorder = FileRecorder::new("/nonexistent-dir/debug.log");
        // Must not panic
        recorder.record("[HEADERS] unwritable");
    }

    #[test]
    fn test_memory_recorder_captures() {
        let recorder = MemoryRecorder::new();
        recorder.record("one");
        recorder.record("two");
        assert_eq!(recorder.entries(), vec!["one", "two"]);
    }
}
