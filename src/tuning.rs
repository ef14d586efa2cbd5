//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads. Defaults reproduce the
//! shipped game; a JSON file may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::ObstacleVariant;

/// Why a tuning file was rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lane table must not be empty")]
    NoLanes,
    #[error("{name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f32 },
    #[error("obstacle scale range is inverted: [{min}, {max})")]
    InvertedScaleRange { min: f32, max: f32 },
    #[error("forest falloff needs near < far (near {near}, far {far})")]
    InvertedFalloff { near: f32, far: f32 },
}

/// Decorative forest ring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestTuning {
    /// Rows per road side
    pub rows: u32,
    /// Z gap between consecutive rows
    pub row_spacing: f32,
    /// Z of the first row
    pub start_z: f32,
    /// Trees behind this z wrap forward by the ring length
    pub wrap_z: f32,
    /// Road width; trees start at `road_width / 2 + verge`
    pub road_width: f32,
    pub verge: f32,
    /// At or nearer than this z, trees get `near_scale`
    pub near_z: f32,
    pub near_scale: f32,
    /// At or beyond this z, trees get `far_scale`
    pub far_z: f32,
    pub far_scale: f32,
}

impl Default for ForestTuning {
    fn default() -> Self {
        Self {
            rows: 32,
            row_spacing: 6.0,
            start_z: -20.0,
            wrap_z: -20.0,
            road_width: 10.0,
            verge: 2.0,
            near_z: 5.0,
            near_scale: 1.4,
            far_z: 120.0,
            far_scale: 0.4,
        }
    }
}

impl ForestTuning {
    /// Length of the wrap ring (rows * spacing)
    pub fn ring_length(&self) -> f32 {
        self.rows as f32 * self.row_spacing
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lateral lane offsets, left to right
    pub lane_x: Vec<f32>,
    /// Lateral lane-change speed (units/s)
    pub lane_speed: f32,
    /// Forward speed at run start
    pub base_speed: f32,
    /// Forward speed gain per second
    pub acceleration: f32,
    pub obstacle_interval: f32,
    pub collectible_interval: f32,
    /// Spawn look-ahead distance
    pub ahead_distance: f32,
    /// Gameplay entities behind this z are despawned
    pub recycle_z: f32,
    pub obstacle_half_extents: (f32, f32),
    pub collectible_half_extents: (f32, f32),
    /// Obstacle visual scale range `[min, max)`
    pub obstacle_scale: (f32, f32),
    /// Variants the spawner chooses from (empty = no obstacles)
    pub obstacle_variants: Vec<ObstacleVariant>,
    /// Camera lerp factor per frame
    pub camera_follow: f32,
    pub forest: ForestTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_x: LANE_X.to_vec(),
            lane_speed: LANE_SPEED,
            base_speed: BASE_SPEED,
            acceleration: ACCELERATION,
            obstacle_interval: OBSTACLE_INTERVAL,
            collectible_interval: COLLECTIBLE_INTERVAL,
            ahead_distance: AHEAD_DISTANCE,
            recycle_z: RECYCLE_Z,
            obstacle_half_extents: (OBSTACLE_HALF_WIDTH, OBSTACLE_HALF_DEPTH),
            collectible_half_extents: (COLLECTIBLE_HALF_WIDTH, COLLECTIBLE_HALF_DEPTH),
            obstacle_scale: (0.9, 1.3),
            obstacle_variants: ObstacleVariant::ALL.to_vec(),
            camera_follow: CAMERA_FOLLOW,
            forest: ForestTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_x.is_empty() {
            return Err(TuningError::NoLanes);
        }
        let positive = [
            ("lane_speed", self.lane_speed),
            ("base_speed", self.base_speed),
            ("obstacle_interval", self.obstacle_interval),
            ("collectible_interval", self.collectible_interval),
            ("forest.row_spacing", self.forest.row_spacing),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { name, value });
            }
        }
        let (min, max) = self.obstacle_scale;
        if !(min <= max) {
            return Err(TuningError::InvertedScaleRange { min, max });
        }
        if !(self.forest.near_z < self.forest.far_z) {
            return Err(TuningError::InvertedFalloff {
                near: self.forest.near_z,
                far: self.forest.far_z,
            });
        }
        Ok(())
    }

    /// Index of the middle lane
    pub fn center_lane(&self) -> usize {
        self.lane_x.len().saturating_sub(1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.center_lane(), CENTER_LANE);
        assert_eq!(tuning.forest.ring_length(), 192.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 20.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 20.0);
        assert_eq!(tuning.lane_x, LANE_X.to_vec());
        assert_eq!(tuning.obstacle_variants.len(), 4);
    }

    #[test]
    fn test_variants_by_name() {
        let tuning = Tuning::from_json(r#"{ "obstacle_variants": ["Log", "Rock"] }"#).unwrap();
        assert_eq!(
            tuning.obstacle_variants,
            vec![ObstacleVariant::Log, ObstacleVariant::Rock]
        );
    }

    #[test]
    fn test_rejects_bad_tuning() {
        assert!(matches!(
            Tuning::from_json(r#"{ "lane_x": [] }"#),
            Err(TuningError::NoLanes)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_interval": 0.0 }"#),
            Err(TuningError::NotPositive { name: "obstacle_interval", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "obstacle_scale": [1.5, 1.0] }"#),
            Err(TuningError::InvertedScaleRange { .. })
        ));
        assert!(matches!(Tuning::from_json("{"), Err(TuningError::Json(_))));
    }
}
