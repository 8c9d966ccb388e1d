//! Logger initialisation.
//!
//! Dispatches to stderr via `fern`, colored when attached to a terminal.
//! The level comes from the `WINDKALK_LOG` environment variable, falling
//! back to the configured level, then to `info`. Safe to call more than
//! once; only the first call takes effect.

use std::env;
use std::io::IsTerminal;
use std::sync::OnceLock;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// Fallback level when neither env var nor config specify one.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialises the global logger.
///
/// `level_from_config` is the `[log] level` value from the TOML config, if
/// any; `WINDKALK_LOG` takes precedence. Unknown level names fall back to
/// `info`.
pub fn init(level_from_config: Option<&str>) {
    if LOGGER_INIT.set(()).is_err() {
        return;
    }

    let level = env::var("WINDKALK_LOG").unwrap_or_else(|_| {
        level_from_config
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string()
    });
    let filter = match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let use_color = std::io::stderr().is_terminal();

    let result = Dispatch::new()
        .format(move |out, message, record| {
            let timestamp = chrono::Local::now().format("%H:%M:%S");
            if use_color {
                out.finish(format_args!(
                    "[{timestamp} {} {}] {message}",
                    colors.color(record.level()),
                    record.target(),
                ));
            } else {
                out.finish(format_args!(
                    "[{timestamp} {} {}] {message}",
                    record.level(),
                    record.target(),
                ));
            }
        })
        .level(filter)
        .chain(std::io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("warning: failed to initialise logger: {e}");
    }
}
