use nc_core::MIN_SCALE;
use serde::{Deserialize, Serialize};

/// Tuning for wheel gestures.
///
/// Missing fields take their defaults, so a host can override one value:
/// `{"pan_speed": 1.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Scale change per unit of wheel `dy` while zooming. Default: **0.01**.
    pub zoom_speed: f32,

    /// Offset change per unit of wheel delta while panning. Default: **2.0**.
    pub pan_speed: f32,

    /// Lower bound on the view scale. Raised to [`MIN_SCALE`] if set lower.
    pub min_scale: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 0.01,
            pan_speed: 2.0,
            min_scale: MIN_SCALE,
        }
    }
}

impl InteractionConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(text)?;
        config.min_scale = config.min_scale.max(MIN_SCALE);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = InteractionConfig::from_json(r#"{"pan_speed": 1.0}"#).unwrap();
        assert_eq!(config.pan_speed, 1.0);
        assert_eq!(config.zoom_speed, 0.01);
    }

    #[test]
    fn min_scale_cannot_reach_zero() {
        let config = InteractionConfig::from_json(r#"{"min_scale": 0.0}"#).unwrap();
        assert_eq!(config.min_scale, MIN_SCALE);
    }
}
