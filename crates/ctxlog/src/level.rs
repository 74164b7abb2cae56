//! Record severity
//!
//! Levels are plain integers so that callers can sit between the named
//! levels (`INFO+2`). Gaps of four between the named levels leave room for
//! that without colliding.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Severity of a record; larger is more severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    /// Lowest representable level; a handler configured with it is enabled for everything.
    pub const MIN: Level = Level(i32::MIN);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Level shifted by `delta`, saturating at the integer bounds
    pub const fn offset(self, delta: i32) -> Self {
        Self(self.0.saturating_add(delta))
    }

    fn base(self) -> (&'static str, Level) {
        if self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if self < Level::WARN {
            ("INFO", Level::INFO)
        } else if self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = self.base();
        let delta = i64::from(self.0) - i64::from(base.0);
        if delta == 0 {
            f.write_str(name)
        } else {
            write!(f, "{name}{delta:+}")
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Accepts the rendered form, case-insensitively: `info`, `WARN`, `error-2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || Error::UnknownLevel(s.to_string());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c == '+' || c == '-')
            .unwrap_or(trimmed.len());
        let (name, offset) = trimmed.split_at(split);

        let base = match name.to_ascii_uppercase().as_str() {
            "DEBUG" => Level::DEBUG,
            "INFO" => Level::INFO,
            "WARN" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => return Err(unknown()),
        };

        if offset.is_empty() {
            return Ok(base);
        }
        let delta: i32 = offset.parse().map_err(|_| unknown())?;
        Ok(base.offset(delta))
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        if level < Level::DEBUG {
            tracing::Level::TRACE
        } else if level < Level::INFO {
            tracing::Level::DEBUG
        } else if level < Level::WARN {
            tracing::Level::INFO
        } else if level < Level::ERROR {
            tracing::Level::WARN
        } else {
            tracing::Level::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(Level::DEBUG < Level::INFO);
        assert!(Level::INFO < Level::WARN);
        assert!(Level::WARN < Level::ERROR);
        assert!(Level::MIN < Level::DEBUG);
    }

    #[test]
    fn test_display_named_levels() {
        assert_eq!(Level::DEBUG.to_string(), "DEBUG");
        assert_eq!(Level::INFO.to_string(), "INFO");
        assert_eq!(Level::WARN.to_string(), "WARN");
        assert_eq!(Level::ERROR.to_string(), "ERROR");
    }

    #[test]
    fn test_display_offsets() {
        assert_eq!(Level::INFO.offset(2).to_string(), "INFO+2");
        assert_eq!(Level::ERROR.offset(-1).to_string(), "WARN+3");
        assert_eq!(Level::ERROR.offset(10).to_string(), "ERROR+10");
        assert_eq!(Level::DEBUG.offset(-2).to_string(), "DEBUG-2");
    }

    #[test]
    fn test_display_min_does_not_overflow() {
        assert!(Level::MIN.to_string().starts_with("DEBUG-"));
    }

    #[test]
    fn test_parse_roundtrips_rendered_form() {
        for level in [
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::INFO.offset(2),
            Level::DEBUG.offset(-3),
        ] {
            let parsed: Level = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::WARN);
        assert_eq!(" Info ".parse::<Level>().unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "verbose".parse::<Level>(),
            Err(Error::UnknownLevel(_))
        ));
        assert!("info+x".parse::<Level>().is_err());
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(tracing::Level::from(Level::DEBUG), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(Level::INFO.offset(1)), tracing::Level::INFO);
        assert_eq!(tracing::Level::from(Level::WARN), tracing::Level::WARN);
        assert_eq!(tracing::Level::from(Level::ERROR.offset(4)), tracing::Level::ERROR);
        assert_eq!(tracing::Level::from(Level::MIN), tracing::Level::TRACE);
    }
}
