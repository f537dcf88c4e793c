//! Timing and copy for the greeting page.
//!
//! Every knob has a default matching the shipped page; with the `serde`
//! feature the struct can be deserialized with any subset of fields present.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::PageError;

pub const SEED_DROP_MS: u32 = 900;
pub const SPAWN_INTERVAL_MS: u32 = 55;
pub const MAX_ELEMENTS: u32 = 100;
pub const REVEAL_START_DELAY_MS: u32 = 220;
pub const REVEAL_SPEED_MS: u32 = 48;

pub const MESSAGE: &str = "YAŞ FARKI YERİNE \nÇİÇEKLERİ SAYABİLİRSİN";
pub const PROMPT: &str = "BANA TIKLA";
pub const RESET_LABEL: &str = "Sıfırla";

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreetingConfig {
    pub seed_drop_ms: u32,          // idle click -> bloom
    pub spawn_interval_ms: u32,     // one flower per tick
    pub max_elements: u32,          // flowers per bloom
    pub reveal_start_delay_ms: u32, // pause before the first character
    pub reveal_speed_ms: u32,       // pause between characters
    pub message: String,
    pub prompt: String,
    pub reset_label: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            seed_drop_ms: SEED_DROP_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_elements: MAX_ELEMENTS,
            reveal_start_delay_ms: REVEAL_START_DELAY_MS,
            reveal_speed_ms: REVEAL_SPEED_MS,
            message: MESSAGE.to_string(),
            prompt: PROMPT.to_string(),
            reset_label: RESET_LABEL.to_string(),
        }
    }
}

impl GreetingConfig {
    /// Reject settings the page cannot honour: at most `MAX_ELEMENTS` flowers per bloom.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.max_elements > MAX_ELEMENTS {
            return Err(PageError::Config(format!(
                "max_elements {} exceeds {}",
                self.max_elements, MAX_ELEMENTS
            )));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
