//! Console logging for the playlister service.
//!
//! The [`crate::info!`], [`crate::success!`], [`crate::warning!`], [`crate::debug!`]
//! and [`crate::error!`] macros emit `tracing` events. [`init`] installs a
//! subscriber that filters them through an [`EnvFilter`] built from
//! `--log-level` and prints each one as a single line behind a colored marker.
//!
//! Level names follow the panic/fatal/error/warn/info/debug/trace vocabulary;
//! `panic` and `fatal` filter like `error`. Setting `RUST_LOG` replaces the
//! generated filter entirely.

use std::{env, fmt};

use colored::{ColoredString, Colorize};
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    layer::{Context, SubscriberExt},
    util::SubscriberInitExt,
};

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Target of [`crate::success!`] events, printed with a checkmark.
pub const SUCCESS_TARGET: &str = "cick_playlister::success";

/// All level names accepted by `--log-level`.
pub fn all_levels() -> Vec<&'static str> {
    vec!["panic", "fatal", "error", "warning", "info", "debug", "trace"]
}

/// Parses a `--log-level` name.
pub fn parse_level(name: &str) -> Result<LevelFilter, String> {
    let name = name.trim().to_ascii_lowercase();
    let canonical = match name.as_str() {
        "panic" | "fatal" => "error",
        "warning" => "warn",
        other => other,
    };

    canonical
        .parse::<LevelFilter>()
        .map_err(|_| format!("not a valid log level: \"{}\"", name))
}

/// Filter for this crate at `level`; chatty dependencies stay at `warn`.
pub fn build_filter(level: LevelFilter) -> Result<EnvFilter, String> {
    let directives = match env::var("RUST_LOG") {
        Ok(custom) if !custom.trim().is_empty() => custom,
        _ => format!(
            "{}={},h2=warn,hyper=warn,reqwest=warn",
            env!("CARGO_CRATE_NAME"),
            level
        ),
    };

    EnvFilter::try_new(&directives).map_err(|e| format!("invalid log filter: {}", e))
}

/// Installs the console subscriber and returns the level in effect.
///
/// An unknown name is reported and replaced by [`DEFAULT_LOG_LEVEL`]. Calling
/// `init` again keeps the first subscriber.
pub fn init(level: &str) -> LevelFilter {
    let level = match parse_level(level) {
        Ok(level) => level,
        Err(e) => {
            println!("{} (expected one of: {})", e, all_levels().join(", "));
            println!("defaulting to '{}' log level", display_level(DEFAULT_LOG_LEVEL));
            DEFAULT_LOG_LEVEL
        }
    };

    let filter = match build_filter(level) {
        Ok(filter) => filter,
        Err(e) => {
            println!("{}", e);
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    if tracing_subscriber::registry()
        .with(filter)
        .with(MarkerLayer)
        .try_init()
        .is_ok()
    {
        println!("logging at level '{}'", display_level(level));
    }
    level
}

fn display_level(level: LevelFilter) -> String {
    level.to_string().to_lowercase()
}

/// Marker printed in front of an event of `level` sent to `target`.
pub fn marker(level: Level, target: &str) -> ColoredString {
    if level == Level::ERROR {
        "!".red().bold()
    } else if level == Level::WARN {
        "!".yellow().bold()
    } else if level == Level::INFO && target == SUCCESS_TARGET {
        "✓".green().bold()
    } else if level == Level::INFO {
        "o".blue().bold()
    } else {
        "~".dimmed()
    }
}

/// Prints every event that passes the filter as `[marker] message`.
struct MarkerLayer;

impl<S: Subscriber> Layer<S> for MarkerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = MessageVisitor::default();
        event.record(&mut message);

        let metadata = event.metadata();
        println!(
            "[{}] {}",
            marker(*metadata.level(), metadata.target()),
            message.0
        );
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}
