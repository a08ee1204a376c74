use chrono::Local;
use log::debug;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// 追加写入的请求日志
///
/// 每行格式 `[2024-01-01T12:00:00.000000] MESSAGE`。写入失败只记 debug 日志。
pub struct Journal {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, message: impl AsRef<str>) {
        if let Err(e) = self.append(message.as_ref()) {
            debug!("Failed to write journal {}: {}", self.path.display(), e);
        }
    }

    /// 记录 `KIND <json>`
    pub fn record_json<T: Serialize>(&self, kind: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.record(format!("{} {}", kind, json)),
            Err(e) => debug!("Failed to encode {} journal entry: {}", kind, e),
        }
    }

    fn append(&self, message: &str) -> io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(
            file,
            "[{}] {}",
            Local::now().format("%Y-%m-%dT%H:%M:%S%.6f"),
            message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_appends_lines() {
        let dir = tempdir().unwrap();
        let journal = Journal::new(dir.path().join("netmon.log"));

        journal.record("DOCKER not available on PATH");
        journal.record_json("NETSTATS", &serde_json::json!({"lo": {"bytes_sent": 1}}));

        let contents = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] DOCKER not available on PATH"));
        assert!(lines[1].ends_with(r#"NETSTATS {"lo":{"bytes_sent":1}}"#));
    }

    #[test]
    fn test_unwritable_path_is_ignored() {
        let dir = tempdir().unwrap();
        let journal = Journal::new(dir.path().join("missing-dir").join("netmon.log"));

        journal.record("SYSSTATS {}");
        assert!(!journal.path().exists());
    }
}
