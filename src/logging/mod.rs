
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;

pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    /// Bookkeeping noise such as individual slot toggles. Never shown on the console.
    Trace,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.pad(s)
    }
}

trait LogSink: Send + Sync {
    fn write_line(&self, level: LogLevel, line: &str);
}

struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Trace => {}
            LogLevel::Info => println!("{line}"),
            LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        }
    }
}

struct SessionFileSink {
    file: Mutex<File>,
}

impl SessionFileSink {
    fn open(dir: &Path) -> std::io::Result<(Self, PathBuf)> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("session-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok((
            Self {
                file: Mutex::new(file),
            },
            path,
        ))
    }
}

impl LogSink for SessionFileSink {
    fn write_line(&self, _level: LogLevel, line: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

/// Session logger shared by the prompt loop, commands and flows.
///
/// The log file is opened on the first write that targets it, so sessions
/// that never log to file leave no empty files behind.
#[derive(Clone)]
pub struct Logger {
    console: Arc<dyn LogSink>,
    session: Arc<Mutex<SessionFile>>,
    file_enabled: Arc<AtomicBool>,
}

struct SessionFile {
    dir: PathBuf,
    sink: Option<Arc<dyn LogSink>>,
    path: Option<PathBuf>,
    opened: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self::in_dir(DEFAULT_LOG_DIR)
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            console: Arc::new(ConsoleSink),
            session: Arc::new(Mutex::new(SessionFile {
                dir: dir.as_ref().to_path_buf(),
                sink: None,
                path: None,
                opened: false,
            })),
            file_enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    fn file_sink(&self) -> Option<Arc<dyn LogSink>> {
        let mut session = self.session.lock().ok()?;
        if session.opened {
            return session.sink.clone();
        }
        session.opened = true;

        match SessionFileSink::open(&session.dir) {
            Ok((sink, path)) => {
                let sink: Arc<dyn LogSink> = Arc::new(sink);
                session.path = Some(path);
                session.sink = Some(sink.clone());
                Some(sink)
            }
            Err(err) => {
                eprintln!("WARN: File logging unavailable; continuing without a log file. ({err})");
                None
            }
        }
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if matches!(target, LogTarget::ConsoleOnly | LogTarget::ConsoleAndFile) {
            self.console.write_line(level, message);
        }

        if matches!(target, LogTarget::ConsoleAndFile | LogTarget::FileOnly)
            && self.file_logging_enabled()
        {
            if let Some(sink) = self.file_sink() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                sink.write_line(level, &format!("[{timestamp}] {level:<5} {message}"));
            }
        }
    }

    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message.as_ref(), LogTarget::FileOnly);
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    /// Only takes effect before the session file has been opened.
    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut session) = self.session.lock() {
            if !session.opened {
                session.dir = dir.as_ref().to_path_buf();
            }
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.session.lock().ok().map(|s| s.dir.clone())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.session.lock().ok().and_then(|s| s.path.clone())
    }

    /// Lines written to this session's file so far; empty if nothing was written.
    pub fn session_lines(&self) -> std::io::Result<Vec<String>> {
        match self.log_path() {
            Some(path) => Ok(fs::read_to_string(path)?
                .lines()
                .map(str::to_string)
                .collect()),
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_path", &self.log_path())
            .field("file_enabled", &self.file_logging_enabled())
            .finish()
    }
}
