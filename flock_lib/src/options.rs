use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// neighbour inclusion distance (strict)
    pub vision_radius: f64,
    /// distance below which separation applies (strict)
    pub avoid_radius: f64,

    pub separation_gain: f64,
    pub alignment_gain: f64,
    pub cohesion_gain: f64,
    pub centering_gain: f64,

    /// point all agents are weakly attracted to
    pub center: DVec2,
    /// fraction of the new velocity applied to position per step
    pub position_gain: f64,

    /// `None` keeps the unbounded velocity growth of the plain rule
    pub max_speed: Option<f64>,
    pub search: SearchStrategy,
}

impl Default for SimParams {
    fn default() -> Self {
        SimParams {
            vision_radius: 50.,
            avoid_radius: 15.,
            separation_gain: 0.005,
            alignment_gain: 0.005,
            cohesion_gain: 0.003,
            centering_gain: 0.0005,
            // middle of a 1280x720 screen
            center: DVec2::new(640., 360.),
            position_gain: 0.005,
            max_speed: None,
            search: SearchStrategy::Naive,
        }
    }
}

impl SimParams {
    /// Checks that every value can drive a step without producing garbage
    /// from the parameters themselves.
    ///
    /// `avoid_radius` larger than `vision_radius` is accepted, it only means
    /// every neighbour is also avoided.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let scalars = [
            ("vision_radius", self.vision_radius),
            ("avoid_radius", self.avoid_radius),
            ("separation_gain", self.separation_gain),
            ("alignment_gain", self.alignment_gain),
            ("cohesion_gain", self.cohesion_gain),
            ("centering_gain", self.centering_gain),
            ("center.x", self.center.x),
            ("center.y", self.center.y),
            ("position_gain", self.position_gain),
        ];

        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { name, value });
            }
        }

        for (name, value) in [
            ("vision_radius", self.vision_radius),
            ("avoid_radius", self.avoid_radius),
        ] {
            if value < 0. {
                return Err(ParamsError::NegativeRadius { name, value });
            }
        }

        match self.max_speed {
            Some(m) if !m.is_finite() => Err(ParamsError::NonFinite {
                name: "max_speed",
                value: m,
            }),
            Some(m) if m <= 0. => Err(ParamsError::NonPositiveMaxSpeed(m)),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "SpatialHash"}
pub enum SearchStrategy {
    /// O(n^2) scan over the whole snapshot
    #[default]
    Naive,
    /// uniform grid keyed by cell coordinates, cell side = vision radius
    SpatialHash,
}
