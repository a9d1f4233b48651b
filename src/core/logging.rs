//! Logging setup.
//!
//! `log` macros are used at call sites and routed into a `tracing`
//! subscriber. Logs land in a daily-rolling JSON file under the user data
//! directory; rotated files from earlier days are gzip-compressed in the
//! background. The miette report hook is tuned to the detected terminal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use console::Term;
use flate2::write::GzEncoder;
use flate2::Compression;
use supports_color::Stream;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "gambit-editor.log";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

pub fn terminal_capabilities() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLevel {
    TrueColor,
    Ansi256,
    Ansi16,
    NoColor,
}

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_level: ColorLevel,
    pub supports_unicode: bool,
    pub is_interactive: bool,
    pub width: u16,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let color_level = match supports_color::on(Stream::Stdout) {
            Some(support) if support.has_16m => ColorLevel::TrueColor,
            Some(support) if support.has_256 => ColorLevel::Ansi256,
            Some(support) if support.has_basic => ColorLevel::Ansi16,
            _ => ColorLevel::NoColor,
        };

        let is_interactive = io::stdout().is_terminal();
        let width = Term::stdout().size().1;

        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            color_level,
            supports_unicode,
            is_interactive,
            width,
        }
    }

    pub fn should_colorize(&self) -> bool {
        self.is_interactive && self.color_level != ColorLevel::NoColor
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Directory log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("gambit-editor").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn prepare_log_dir() -> PathBuf {
    let log_dir = log_dir();
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
    log_dir
}

fn finish_init(log_dir: PathBuf) {
    // The fmt subscriber may already have installed the bridge.
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("LogTracer already set: {}", e);
    }

    init_miette();

    let dir = log_dir.clone();
    std::thread::spawn(move || compress_old_logs(&dir));

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );
}

/// Initialize logging with a JSON file layer and a pretty stdout layer.
///
/// The returned guard must live until shutdown so buffered lines are flushed.
pub fn init() -> WorkerGuard {
    let log_dir = prepare_log_dir();

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .pretty()
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    finish_init(log_dir);
    guard
}

/// Initialize logging for TUI mode: file layer only, the terminal belongs to ratatui.
pub fn init_tui() -> WorkerGuard {
    let log_dir = prepare_log_dir();

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(file_layer).init();

    finish_init(log_dir);
    guard
}

// ============================================================================
// Rotation housekeeping
// ============================================================================

/// Whether a file in the log directory is a finished rotation to compress.
fn should_compress(file_name: &str, today_suffix: &str) -> bool {
    file_name
        .strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| date != today_suffix && !date.ends_with(".gz"))
}

fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}

fn init_miette() {
    let caps = terminal_capabilities();

    miette::set_hook(Box::new(move |_| {
        let mut opts = miette::MietteHandlerOpts::new();
        if caps.width > 0 {
            opts = opts.width(usize::from(caps.width));
        }
        Box::new(
            opts
                .terminal_links(caps.color_level == ColorLevel::TrueColor)
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(caps.should_colorize())
                .build(),
        )
    }))
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_should_compress_rotations_only() {
        let today = "2026-10-16";
        assert!(should_compress("gambit-editor.log.2026-10-15", today));
        assert!(!should_compress("gambit-editor.log.2026-10-16", today));
        assert!(!should_compress("gambit-editor.log.2026-10-15.gz", today));
        assert!(!should_compress("gambit-editor.log", today));
        assert!(!should_compress("other.log.2026-10-15", today));
    }

    #[test]
    fn test_compress_file_replaces_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gambit-editor.log.2026-01-01");
        fs::write(&path, "line one\nline two\n").unwrap();

        compress_file(&path).unwrap();

        assert!(!path.exists());
        let gz = dir.path().join("gambit-editor.log.2026-01-01.gz");
        let mut decoded = String::new();
        flate2::read::GzDecoder::new(fs::File::open(gz).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "line one\nline two\n");
    }

    #[test]
    fn test_log_dir_is_app_scoped() {
        let dir = log_dir();
        match dirs::data_dir() {
            Some(base) => {
                assert!(dir.starts_with(&base));
                assert_eq!(dir.strip_prefix(&base).unwrap(), Path::new("gambit-editor/logs"));
            }
            None => assert_eq!(dir, PathBuf::from("logs")),
        }
    }
}
