use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::ai::AiPolicy;
use crate::types::Color;

/// Settings the UI may change between move cycles.
///
/// Every field has a default, so a partial object from JS deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub computer_enabled: bool,
    pub computer_color: Color,
    pub policy: AiPolicy,
    pub seed: u64,
    pub timing: Timing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            computer_enabled: true,
            computer_color: Color::White,
            policy: AiPolicy::default(),
            seed: 0,
            timing: Timing::default(),
        }
    }
}

/// Playback pacing in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timing {
    /// Between consecutive flip reveals.
    pub flip_step_ms: u64,
    /// After the last reveal, before the move lock is released.
    pub flip_settle_ms: u64,
    /// Before the computer answers a human move.
    pub computer_delay_ms: u64,
    /// Between announcing a forced pass and handing the turn back.
    pub pass_notice_ms: u64,
}

impl Timing {
    pub fn flip_step(&self) -> Duration {
        Duration::from_millis(self.flip_step_ms)
    }

    pub fn flip_settle(&self) -> Duration {
        Duration::from_millis(self.flip_settle_ms)
    }

    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    pub fn pass_notice(&self) -> Duration {
        Duration::from_millis(self.pass_notice_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flip_step_ms: 100,
            flip_settle_ms: 200,
            computer_delay_ms: 800,
            pass_notice_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"computerEnabled": false, "policy": "basic"}"#).unwrap();

        assert!(!config.computer_enabled);
        assert_eq!(config.policy, AiPolicy::Basic);
        assert_eq!(config.computer_color, Color::White);
        assert_eq!(config.timing, Timing::default());
    }

    #[test]
    fn timing_converts_to_durations() {
        let timing = Timing {
            flip_step_ms: 10,
            ..Timing::default()
        };

        assert_eq!(timing.flip_step(), Duration::from_millis(10));
        assert_eq!(timing.computer_delay(), Duration::from_millis(800));
    }
}
