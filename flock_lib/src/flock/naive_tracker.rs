use crate::{agent::Agent, math_helpers::distance_agent, options::SimParams};

use super::tracker::Tracker;

/// A naive implementation of agent tracking, which uses an O(N^2) algorithm for
/// finding an agent's neighbours.
pub struct NaiveTracker<'a> {
    agents: &'a [Agent],
    vision_radius: f64,
}

impl<'a> NaiveTracker<'a> {
    pub fn get_neighbours_naive(
        index: usize,
        all_agents: &'a [Agent],
        vision_radius: f64,
        neighbours: &mut Vec<&'a Agent>,
    ) {
        let agent = &all_agents[index];

        for (i_other, a_other) in all_agents.iter().enumerate() {
            // identity is the slot, not the state: a coincident twin is still a neighbour
            if i_other == index {
                continue;
            }

            if distance_agent(agent, a_other) < vision_radius {
                neighbours.push(a_other);
            }
        }
    }
}

impl<'a> Tracker<'a> for NaiveTracker<'a> {
    fn new(snapshot: &'a [Agent], params: &SimParams) -> Self {
        NaiveTracker {
            agents: snapshot,
            vision_radius: params.vision_radius,
        }
    }

    fn get_neighbours(&self, index: usize, neighbours: &mut Vec<&'a Agent>) {
        NaiveTracker::get_neighbours_naive(index, self.agents, self.vision_radius, neighbours);
    }

    fn get_no_entities(&self) -> usize {
        self.agents.len()
    }
}
