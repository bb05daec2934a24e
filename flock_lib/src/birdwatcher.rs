use std::mem;

use glam::DVec2;
use serde::Serialize;

use crate::{agent::Agent, flock::Flock};

// this is a bird data accumulator: it owns no file format, the host decides
// what to do with the rows it pops
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AgentData {
    /// slot in the agent set at sampling time
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// sample number, not tick number
    pub time: u64,
}

pub struct Birdwatcher {
    locations: Vec<AgentData>,
    render_ticker: u64,
    sample_rate: u64,
}

impl Birdwatcher {
    /// A `sample_rate` of 0 is treated as 1.
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            render_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection, returns whether this call took a sample
    pub fn watch(&mut self, flock: &Flock) -> bool {
        self.watch_agents(flock.view())
    }

    pub fn watch_agents(&mut self, agents: &[Agent]) -> bool {
        if !self.should_sample() {
            return false;
        }

        let time = self.render_ticker / self.sample_rate;
        self.locations
            .extend(agents.iter().enumerate().map(|(id, a)| AgentData {
                id,
                x: a.position.x,
                y: a.position.y,
                vx: a.velocity.x,
                vy: a.velocity.y,
                time,
            }));

        true
    }

    pub fn restart(&mut self) {
        self.locations.clear();
        self.render_ticker = 0;
    }

    pub fn pop_data(&mut self) -> Vec<AgentData> {
        mem::take(&mut self.locations)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;

        self.render_ticker % self.sample_rate == 0
    }
}

/// Whole-flock summary for logging.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FlockStats {
    pub count: usize,
    pub centroid: DVec2,
    pub mean_speed: f64,
    pub max_speed: f64,
}

impl FlockStats {
    pub fn of(agents: &[Agent]) -> Self {
        if agents.is_empty() {
            return FlockStats {
                count: 0,
                centroid: DVec2::ZERO,
                mean_speed: 0.,
                max_speed: 0.,
            };
        }

        let n = agents.len() as f64;
        let (pos_sum, speed_sum, max_speed) = agents.iter().fold(
            (DVec2::ZERO, 0., 0_f64),
            |(pos_sum, speed_sum, max_speed), a| {
                let speed = a.velocity.length();
                (pos_sum + a.position, speed_sum + speed, max_speed.max(speed))
            },
        );

        FlockStats {
            count: agents.len(),
            centroid: pos_sum / n,
            mean_speed: speed_sum / n,
            max_speed,
        }
    }
}
