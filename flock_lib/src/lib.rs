use agent::Agent;
use flock::Flock;
use options::SimParams;

pub mod agent;
pub mod flock;

pub mod arena;
pub mod birdwatcher;
pub mod error;
pub mod math_helpers;
pub mod options;

pub use flock::{step, AgentSet};

/// Runs `no_iter` ticks from `agents` and returns the last snapshot.
pub fn flock_base(no_iter: u64, params: &SimParams, agents: AgentSet) -> Vec<Agent> {
    let mut flock = Flock::from_agents(agents);

    (0..no_iter).for_each(|_| flock.update(params));

    flock.into_agents()
}
