use crate::shared::constants;
use lazy_static::lazy_static;
use std::backtrace::Backtrace;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Clone)]
struct LogFiles {
    error_log: PathBuf,
    debug_log: PathBuf,
}

impl LogFiles {
    fn open() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self {
            error_log: cwd.join(constants::ERROR_LOG_FILE),
            debug_log: cwd.join(constants::DEBUG_LOG_FILE),
        }
    }

    fn truncate_with_header(&self) {
        for path in [&self.error_log, &self.debug_log] {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
            {
                let _ = writeln!(
                    file,
                    "=== {} log started: {} ===",
                    constants::APP_NAME,
                    chrono::Local::now()
                );
            }
        }
    }

    fn append(&self, level: Level, line: &str) {
        write_line(&self.debug_log, line);
        if level == Level::Error {
            write_line(&self.error_log, line);
        }
    }
}

lazy_static! {
    static ref FILES: Mutex<Option<LogFiles>> = Mutex::new(None);
}

fn write_line(path: &PathBuf, line: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", line);
    }
}

/// Truncates the log files and installs a panic hook, so a mid-run fault
/// still leaves a trail on disk.
pub fn init() {
    let files = LogFiles::open();
    files.truncate_with_header();
    *FILES.lock().unwrap() = Some(files.clone());

    panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::capture();
        let msg = match info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => &s[..],
                None => "Box<Any>",
            },
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let report = format!(
            "\nPANIC at {}:\nMessage: {}\nBacktrace:\n{:?}\n",
            location, msg, backtrace
        );
        files.append(Level::Error, &report);
        eprintln!(
            "{} crashed, see {} for details",
            constants::APP_NAME,
            files.error_log.display()
        );
    }));
}

pub fn log(level: Level, msg: &str) {
    if let Some(files) = FILES.lock().unwrap().as_ref() {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        files.append(level, &format!("[{}][{}] {}", timestamp, level, msg));
    }
}

pub fn info(msg: &str) {
    log(Level::Info, msg);
}

pub fn error(msg: &str) {
    log(Level::Error, msg);
}

pub fn debug(msg: &str) {
    log(Level::Debug, msg);
}
