//! Board configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DANGER_ROW, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_LOOKAHEAD, MAX_BOARD_HEIGHT,
    MAX_BOARD_WIDTH, MIN_LOOKAHEAD,
};

/// Smallest accepted width
pub const MIN_WIDTH: usize = 1;

/// Smallest accepted height: the danger row must exist
pub const MIN_HEIGHT: usize = DANGER_ROW + 1;

/// Dimensions and preview depth of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub lookahead: usize,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Reject configurations the board invariants cannot hold for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.width, self.height)?;
        if self.lookahead < MIN_LOOKAHEAD {
            return Err(ConfigError::LookaheadTooShort {
                lookahead: self.lookahead,
                min: MIN_LOOKAHEAD,
            });
        }
        Ok(())
    }

    /// Column where new pieces are placed (4 on a 10-wide board)
    pub fn spawn_x(&self) -> i32 {
        (self.width / 2).saturating_sub(1) as i32
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            lookahead: DEFAULT_LOOKAHEAD,
        }
    }
}

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), ConfigError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(ConfigError::InvalidDimensions {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    if width > MAX_BOARD_WIDTH || height > MAX_BOARD_HEIGHT {
        return Err(ConfigError::TooLarge {
            width,
            height,
            max_width: MAX_BOARD_WIDTH,
            max_height: MAX_BOARD_HEIGHT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ten_by_twenty_five() {
        let config = BoardConfig::default();
        assert_eq!((config.width, config.height, config.lookahead), (10, 25, 4));
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_x(), 4);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            BoardConfig::new(0, 25).validate(),
            Err(ConfigError::InvalidDimensions { width: 0, .. })
        ));
        assert!(matches!(
            BoardConfig::new(10, 0).validate(),
            Err(ConfigError::InvalidDimensions { height: 0, .. })
        ));
    }

    #[test]
    fn board_without_danger_row_is_rejected() {
        assert!(BoardConfig::new(10, 2).validate().is_err());
        assert!(BoardConfig::new(10, 3).validate().is_ok());
    }

    #[test]
    fn oversized_boards_are_rejected() {
        assert!(BoardConfig::new(MAX_BOARD_WIDTH, MAX_BOARD_HEIGHT).validate().is_ok());
        assert_eq!(
            BoardConfig::new(40_000, 25).validate(),
            Err(ConfigError::TooLarge {
                width: 40_000,
                height: 25,
                max_width: MAX_BOARD_WIDTH,
                max_height: MAX_BOARD_HEIGHT,
            })
        );
        assert!(matches!(
            BoardConfig::new(10, MAX_BOARD_HEIGHT + 1).validate(),
            Err(ConfigError::TooLarge { .. })
        ));
    }

    #[test]
    fn short_lookahead_is_rejected() {
        let err = BoardConfig::default().with_lookahead(2).validate();
        assert_eq!(
            err,
            Err(ConfigError::LookaheadTooShort {
                lookahead: 2,
                min: MIN_LOOKAHEAD
            })
        );
    }

    #[test]
    fn error_message_names_the_dimensions() {
        let err = BoardConfig::new(0, 1).validate().unwrap_err();
        assert_eq!(err.to_string(), "board must be at least 1x3 cells, got 0x1");
    }

    #[test]
    fn spawn_x_on_narrow_boards_does_not_underflow() {
        assert_eq!(BoardConfig::new(1, 5).spawn_x(), 0);
        assert_eq!(BoardConfig::new(2, 5).spawn_x(), 0);
        assert_eq!(BoardConfig::new(7, 5).spawn_x(), 2);
    }
}
