//! Logging and tracing setup.
//!
//! Everything logs through `tracing`. The binary installs a `fmt` subscriber
//! writing to stderr (plain or JSON), filtered by `RUST_LOG` when set. The
//! verbose flag lowers this crate's level to `debug` on top of either filter.
//! Library users install their own subscriber, or none.
//!
//! # Example
//!
//! ```rust,ignore
//! use paleo_query::telemetry::{init_tracing, store_span};
//!
//! init_tracing(true, false);
//! let span = store_span(endpoint, repository, query.text());
//! ```

pub mod spans;

pub use spans::{llm_span, record_outcome, record_returned_rows, store_span, LlmOperation};

use tracing_subscriber::EnvFilter;

const VERBOSE_DIRECTIVE: &str = "paleo_query=debug";

/// Default filter directive for a verbosity setting.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,paleo_query=debug"
    } else {
        "warn,paleo_query=info"
    }
}

/// Build the event filter from an optional `RUST_LOG` value.
///
/// `verbose` always wins for this crate's own target.
pub fn build_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

    if !verbose {
        return filter;
    }
    match VERBOSE_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
///
/// # Arguments
///
/// * `verbose` - Log this crate at `debug` instead of `info`
/// * `json` - Emit one JSON object per event
pub fn init_tracing(verbose: bool, json: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env.as_deref(), verbose);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
