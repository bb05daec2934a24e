use glam::f64::DVec2;
use serde::{Deserialize, Serialize};

use crate::{
    math_helpers::{heading_to_unit, mean},
    options::SimParams,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: DVec2,
    /// not normalised, its length is the agent's speed
    pub velocity: DVec2,
}

impl Agent {
    /// Creates a new [`Agent`].
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Agent { position, velocity }
    }

    /// Creates an [`Agent`] moving at unit speed along `heading_deg` degrees.
    pub fn from_heading(position: DVec2, heading_deg: f64) -> Self {
        Agent {
            position,
            velocity: heading_to_unit(heading_deg),
        }
    }

    /// Velocity rescaled to `length`, for drawing a heading tick.
    ///
    /// An agent too slow to have a representable heading yields the zero vector.
    pub fn heading_indicator(&self, length: f64) -> DVec2 {
        self.velocity.normalize_or_zero() * length
    }

    /// Computes this agent's state for the next tick.
    ///
    /// `neighbours` must be taken from the same frozen snapshot as `self`,
    /// already filtered by vision radius and in canonical order.
    pub fn run_rules(&self, neighbours: &[&Agent], params: &SimParams) -> Agent {
        let mut velocity = self.velocity
            + self.separation(neighbours, params)
            + self.alignment(neighbours, params)
            + self.cohesion(neighbours, params)
            + self.centering(params);

        if let Some(max_speed) = params.max_speed {
            velocity = velocity.clamp_length_max(max_speed);
        }

        Agent {
            position: self.position + velocity * params.position_gain,
            velocity,
        }
    }

    pub fn separation(&self, neighbours: &[&Agent], params: &SimParams) -> DVec2 {
        let mut res = DVec2::ZERO;

        for other in neighbours {
            let away = self.position - other.position;
            // coincident agents push with a zero vector
            if away.length() < params.avoid_radius {
                res += away;
            }
        }

        res * params.separation_gain
    }

    pub fn alignment(&self, neighbours: &[&Agent], params: &SimParams) -> DVec2 {
        let avg = mean(neighbours.iter().map(|n| n.velocity)).unwrap_or(self.velocity);

        (avg - self.velocity) * params.alignment_gain
    }

    pub fn cohesion(&self, neighbours: &[&Agent], params: &SimParams) -> DVec2 {
        let avg = mean(neighbours.iter().map(|n| n.position)).unwrap_or(self.position);

        (avg - self.position) * params.cohesion_gain
    }

    pub fn centering(&self, params: &SimParams) -> DVec2 {
        (params.center - self.position) * params.centering_gain
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec2;

    use super::Agent;
    use crate::options::SimParams;

    fn params_centered_at(center: DVec2) -> SimParams {
        SimParams {
            center,
            ..Default::default()
        }
    }

    #[test]
    fn lone_agent_only_centers() {
        let agent = Agent::new(DVec2::new(3., 4.), DVec2::new(0.5, -0.25));
        let next = agent.run_rules(&[], &params_centered_at(DVec2::ZERO));

        assert_relative_eq!(next.velocity.x, 0.4985, epsilon = 1e-12);
        assert_relative_eq!(next.velocity.y, -0.252, epsilon = 1e-12);
        assert_relative_eq!(next.position.x, 3.0024925, epsilon = 1e-12);
        assert_relative_eq!(next.position.y, 3.99874, epsilon = 1e-12);
    }

    #[test]
    fn separation_ignores_agents_on_the_avoid_boundary() {
        let params = SimParams::default();
        let agent = Agent::new(DVec2::ZERO, DVec2::ZERO);
        let on_edge = Agent::new(DVec2::new(params.avoid_radius, 0.), DVec2::ZERO);
        let inside = Agent::new(DVec2::new(0., params.avoid_radius - 5.), DVec2::ZERO);

        assert_eq!(agent.separation(&[&on_edge], &params), DVec2::ZERO);
        assert_eq!(
            agent.separation(&[&on_edge, &inside], &params),
            DVec2::new(0., -10.) * params.separation_gain
        );
    }

    #[test]
    fn separation_of_coincident_agents_is_zero() {
        let params = SimParams::default();
        let agent = Agent::new(DVec2::new(7., 7.), DVec2::new(1., 0.));
        let twin = agent;

        let sep = agent.separation(&[&twin], &params);
        assert_eq!(sep, DVec2::ZERO);
        assert!(!sep.x.is_nan() && !sep.y.is_nan());
    }

    #[test]
    fn alignment_and_cohesion_vanish_without_neighbours() {
        let params = SimParams::default();
        let agent = Agent::new(DVec2::new(-2., 9.), DVec2::new(3., 1.));

        assert_eq!(agent.alignment(&[], &params), DVec2::ZERO);
        assert_eq!(agent.cohesion(&[], &params), DVec2::ZERO);
    }

    #[test]
    fn cohesion_pulls_towards_neighbour_centroid() {
        let params = SimParams::default();
        let agent = Agent::new(DVec2::ZERO, DVec2::ZERO);
        let a = Agent::new(DVec2::new(10., 0.), DVec2::ZERO);
        let b = Agent::new(DVec2::new(0., 10.), DVec2::ZERO);

        let coh = agent.cohesion(&[&a, &b], &params);
        assert_relative_eq!(coh.x, 5. * params.cohesion_gain);
        assert_relative_eq!(coh.y, 5. * params.cohesion_gain);
    }

    #[test]
    fn speed_cap_bounds_new_velocity() {
        let params = SimParams {
            max_speed: Some(0.5),
            ..Default::default()
        };
        let agent = Agent::new(DVec2::ZERO, DVec2::new(4., 3.));
        let next = agent.run_rules(&[], &params);

        assert_relative_eq!(next.velocity.length(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn from_heading_is_unit_length() {
        let agent = Agent::from_heading(DVec2::new(1., 2.), 123.);
        assert_relative_eq!(agent.velocity.length(), 1., epsilon = 1e-12);
        assert_eq!(agent.position, DVec2::new(1., 2.));
    }

    #[test]
    fn heading_indicator_of_subnormal_velocity_is_zero() {
        let agent = Agent::new(DVec2::ZERO, DVec2::new(1e-310, 0.));
        let tick = agent.heading_indicator(30.);

        assert!(tick.x.is_finite() && tick.y.is_finite());
        assert_eq!(tick, DVec2::ZERO);
    }

    #[test]
    fn heading_indicator_leaves_agent_untouched() {
        let agent = Agent::new(DVec2::ZERO, DVec2::new(0., 2.));
        let tick = agent.heading_indicator(30.);

        assert_relative_eq!(tick.y, 30.);
        assert_eq!(agent.velocity, DVec2::new(0., 2.));
        assert_eq!(
            Agent::new(DVec2::ZERO, DVec2::ZERO).heading_indicator(30.),
            DVec2::ZERO
        );
    }
}
