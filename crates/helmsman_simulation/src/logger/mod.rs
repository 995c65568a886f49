//! Project logger: one global printer, timestamps, level threshold.
//!
//! Системы логируют только переходы состояний (status changes, arrivals,
//! shots), не каждый тик. Порог задаётся через `SimulationConfig::log_level`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// Глобальный printer (None пока никто не вызвал init_logger/set_logger)
static PRINTER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static THRESHOLD: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Куда уходят строки лога (консоль, буфер в тестах, внешний host)
pub trait LogPrinter: Send + Sync {
    fn print(&self, level: LogLevel, line: &str);
}

/// stdout/stderr printer по умолчанию
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn print(&self, level: LogLevel, line: &str) {
        if level >= LogLevel::Warning {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Буферизующий printer: строки копятся в shared Vec
#[derive(Clone, Default)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl LogPrinter for MemoryLogger {
    fn print(&self, _level: LogLevel, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

pub fn set_logger(printer: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = PRINTER.lock() {
        *slot = Some(printer);
    }
}

/// Ставит printer только если ещё никто не поставил
pub fn set_logger_if_needed(printer: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = PRINTER.lock() {
        if slot.is_none() {
            *slot = Some(printer);
        }
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut threshold) = THRESHOLD.lock() {
        *threshold = level;
    }
}

pub fn log_level() -> LogLevel {
    THRESHOLD
        .lock()
        .map(|threshold| *threshold)
        .unwrap_or_default()
}

/// `[2025-01-01 12:00:00.000] [INFO] message`
pub fn format_line(level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level.label(),
        message
    )
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    // Poisoned mutex → молча пропускаем, симуляция важнее лога
    let Ok(slot) = PRINTER.lock() else {
        return;
    };

    if let Some(printer) = slot.as_ref() {
        printer.print(level, &format_line(level, message));
    }
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}
