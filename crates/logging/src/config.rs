//! crates/logging/src/config.rs
//! Verbosity configuration for the engine's subsystems.

use super::levels::{Subsystem, SubsystemLevels, filter_name};

/// Highest meaningful per-subsystem level.
pub const MAX_LEVEL: u8 = 3;

/// Error returned when a flag token cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    /// The token named no known subsystem.
    #[error("unknown subsystem flag: {0}")]
    UnknownSubsystem(String),
    /// The trailing level digits did not parse.
    #[error("invalid level in flag token: {0}")]
    InvalidLevel(String),
}

/// Per-subsystem verbosity, convertible into a tracing filter directive.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Subsystem levels.
    pub levels: SubsystemLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a verbose level (0-3).
    ///
    /// Level 0 only reports verdicts, level 1 adds seam and batch summaries,
    /// level 2 turns on debug output for everything except the per-step
    /// subsystems and level 3 traces everything.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();
        let levels = &mut config.levels;

        match level {
            0 => {
                levels.quality = 1;
            }
            1 => {
                levels.quality = 1;
                levels.seam = 1;
                levels.batch = 1;
            }
            2 => {
                levels.set_all(2);
                levels.hash = 1;
                levels.index = 1;
            }
            _ => levels.set_all(MAX_LEVEL),
        }

        config
    }

    /// Level of one subsystem.
    pub const fn level(&self, subsystem: Subsystem) -> u8 {
        self.levels.get(subsystem)
    }

    /// Apply a single flag token such as `"heal2"` or `"index"` (level 1).
    pub fn apply_flag(&mut self, token: &str) -> Result<(), FlagError> {
        let (name, level) = parse_flag_token(token)?;
        let subsystem =
            Subsystem::from_name(name).ok_or_else(|| FlagError::UnknownSubsystem(name.to_owned()))?;
        self.levels.set(subsystem, level.min(MAX_LEVEL));
        Ok(())
    }

    /// Apply a comma separated list of flag tokens.
    pub fn apply_flags(&mut self, tokens: &str) -> Result<(), FlagError> {
        tokens
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_flag(token))
    }

    /// Renders an `EnvFilter` directive: warnings everywhere plus one
    /// directive per subsystem.
    #[must_use]
    pub fn directive(&self) -> String {
        let mut directive = String::from("warn");
        for subsystem in Subsystem::ALL {
            directive.push(',');
            directive.push_str(subsystem.target());
            directive.push('=');
            directive.push_str(filter_name(self.level(subsystem)));
        }
        directive
    }
}

/// Splits `"seam2"` into `("seam", 2)`; a bare name means level 1.
fn parse_flag_token(token: &str) -> Result<(&str, u8), FlagError> {
    let digits = token.bytes().rev().take_while(u8::is_ascii_digit).count();
    let (name, level) = token.split_at(token.len() - digits);

    if level.is_empty() {
        return Ok((name, 1));
    }

    level
        .parse::<u8>()
        .map(|level| (name, level))
        .map_err(|_| FlagError::InvalidLevel(token.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_token_defaults_to_level_one() {
        assert_eq!(parse_flag_token("heal"), Ok(("heal", 1)));
        assert_eq!(parse_flag_token("heal3"), Ok(("heal", 3)));
        assert!(parse_flag_token("heal999").is_err());
    }

    #[test]
    fn apply_flag_clamps_to_max_level() {
        let mut config = VerbosityConfig::default();
        config.apply_flag("index9").unwrap();
        assert_eq!(config.level(Subsystem::Index), MAX_LEVEL);
    }

    #[test]
    fn apply_flag_rejects_unknown_names() {
        let mut config = VerbosityConfig::default();
        assert_eq!(
            config.apply_flag("delta2"),
            Err(FlagError::UnknownSubsystem("delta".to_owned()))
        );
    }
}
