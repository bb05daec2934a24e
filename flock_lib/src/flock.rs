use log::{debug, trace};

use crate::agent::Agent;
use crate::arena::{Arena, SpawnEvent};
use crate::math_helpers::cmp_agent_state;
use crate::options::{SearchStrategy, SimParams};

use self::naive_tracker::NaiveTracker;
use self::spathash_tracker::SpatHashTracker;
use self::tracker::Tracker;

pub mod naive_tracker;
pub mod spathash_tracker;
pub mod tracker;

/// The complete state of the flock at the start of a tick.
pub type AgentSet = Vec<Agent>;

/// Advances every agent by one tick.
///
/// All rules read the frozen `agents` snapshot; the input is left untouched and
/// the next snapshot is returned as a fresh set in the same order. Neighbours
/// are summed in [`cmp_agent_state`] order, so an agent's result depends only on
/// its own state and the states around it: the same for either
/// [`SearchStrategy`] and for any ordering of `agents`.
pub fn step(agents: &[Agent], params: &SimParams) -> AgentSet {
    match params.search {
        SearchStrategy::Naive => step_with(&NaiveTracker::new(agents, params), agents, params),
        SearchStrategy::SpatialHash => {
            step_with(&SpatHashTracker::new(agents, params), agents, params)
        }
    }
}

fn step_with<'a, T: Tracker<'a>>(tracker: &T, agents: &'a [Agent], params: &SimParams) -> AgentSet {
    let mut neighbours: Vec<&'a Agent> = Vec::with_capacity(16);
    trace!("stepping {} agents", tracker.get_no_entities());

    agents
        .iter()
        .enumerate()
        .map(|(i_cur, agent)| {
            neighbours.clear();
            tracker.get_neighbours(i_cur, &mut neighbours);
            neighbours.sort_by(|a, b| cmp_agent_state(a, b));

            agent.run_rules(&neighbours, params)
        })
        .collect()
}

/// Host-side owner of the agent set between ticks.
#[derive(Debug, Clone, Default)]
pub struct Flock {
    agents: AgentSet,
    tick: u64,
}

impl Flock {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_agents(agents: AgentSet) -> Self {
        Flock { agents, tick: 0 }
    }

    pub fn update(&mut self, params: &SimParams) {
        self.agents = step(&self.agents, params);
        self.tick += 1;

        debug!("tick {}: {} agents", self.tick, self.agents.len());
    }

    pub fn insert(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Adds an agent for `event` if it lands inside `arena`, returns whether it
    /// was added.
    pub fn try_spawn(&mut self, event: &SpawnEvent, arena: &Arena) -> bool {
        if !arena.contains(event.position) {
            debug!("spawn at {:?} rejected, outside arena", event.position);
            return false;
        }

        self.insert(Agent::from_heading(event.position, event.heading_deg));
        true
    }

    pub fn view(&self) -> &[Agent] {
        &self.agents
    }

    pub fn into_agents(self) -> AgentSet {
        self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// number of updates so far
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
