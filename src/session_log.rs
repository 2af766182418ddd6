//! Per-session log capture
//!
//! Tees log records into a session-local file next to the usual stderr
//! output, so each crawl leaves a plain-text log that the session store
//! can move into storage on completion.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct SessionLogger {
    file: Mutex<BufWriter<File>>,
    stderr: env_logger::Logger,
}

impl SessionLogger {
    /// Open a session log file under `logs_dir`, named after the compact
    /// session timestamp. Returns the logger and the file's path so the
    /// caller can later hand it to `SessionStore::persist_log`.
    pub fn create(logs_dir: &Path, timestamp: &str) -> std::io::Result<(Self, PathBuf)> {
        fs::create_dir_all(logs_dir)?;
        let path = logs_dir.join(format!("crawler_{}.log", timestamp));

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let stderr = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .target(env_logger::Target::Stderr)
        .build();

        let logger = Self {
            file: Mutex::new(BufWriter::new(file)),
            stderr,
        };
        Ok((logger, path))
    }

    /// Install as the process-wide logger. Callable once per process.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_max_level(self.stderr.filter());
        log::set_boxed_logger(Box::new(self))
    }
}

impl log::Log for SessionLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.stderr.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.stderr.log(record);

        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{} - {} - {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            );
            let _ = file.flush();
        }
    }

    fn flush(&self) {
        self.stderr.flush();
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
