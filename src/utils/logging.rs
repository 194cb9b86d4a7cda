use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::utils::error::EngineError;

/// Parses a level name, falling back to `Info` for anything unrecognised.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs the global logger. `RUST_LOG` overrides the configured level.
pub fn init(level: &str) -> Result<(), EngineError> {
    let filter = parse_level(level);
    SimpleLogger::new().with_level(filter).env().init()?;

    if filter == LevelFilter::Info && !level.trim().eq_ignore_ascii_case("info") {
        log::warn!("Unknown log level '{}', using info", level);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
