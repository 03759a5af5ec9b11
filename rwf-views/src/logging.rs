//! Wrapper around `tracing_subscriber` for logging.
//!
//! Configures application-wide logging to go to stderr at the `INFO` level.
//! Set `RUST_LOG=rwf_views=debug` to see every page recompiled in debug mode.
//! If you prefer to use your own logging subscriber, don't initialize the `Logger`;
//! the engine only emits `tracing` events.
//!
//! ### Example
//!
//! ```rust
//! use rwf_views::prelude::*;
//!
//! Logger::init();
//! ```
use crate::config::get_config;
use once_cell::sync::OnceCell;
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Configure logging application-wide.
    ///
    /// Calling this multiple times is safe. Logger will be initialized only once.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            setup_logging();
            get_config().log_info();
        });
    }
}

fn setup_logging() {
    let result = fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(get_config().tty)
        .with_file(false)
        .with_target(false)
        .finish()
        .try_init();

    if let Err(err) = result {
        debug!("using the existing subscriber: {}", err);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_init_with_existing_subscriber() {
        let _ = fmt().with_test_writer().try_init();

        Logger::init();
        Logger::init();
    }
}
