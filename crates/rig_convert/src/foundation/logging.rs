//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with `default_level` as the filter.
///
/// `RUST_LOG` still takes precedence when it is set. Calling this more than
/// once is harmless; later calls keep the first logger.
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}

/// Check that `level` names a log level or `off`
pub fn is_valid_level(level: &str) -> bool {
    level.eq_ignore_ascii_case("off") || level.parse::<log::Level>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert!(is_valid_level("info"));
        assert!(is_valid_level("DEBUG"));
        assert!(is_valid_level("off"));
        assert!(!is_valid_level("loud"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("warn");
        init("debug");
    }
}
