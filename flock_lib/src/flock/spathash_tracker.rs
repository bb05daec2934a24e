use std::collections::HashMap;

use itertools::Itertools;
use log::trace;

use crate::{agent::Agent, math_helpers::distance_agent, options::SimParams};

use super::{naive_tracker::NaiveTracker, tracker::Tracker};

/// Cell side is the vision radius padded by this factor, so float rounding in
/// the cell coordinate can't split a within-radius pair across cells that are
/// not adjacent.
const CELL_PADDING: f64 = 1. + 1e-6;

/// Uses a spatial hashing space division method over an unbounded plane: each
/// occupied cell maps its integer coordinates to the snapshot indices inside it.
///
/// Neighbour lookups only visit the 3x3 block of cells around the agent and
/// then apply the exact distance test, so they return the same set as
/// [`NaiveTracker`].
pub struct SpatHashTracker<'a> {
    agents: &'a [Agent],
    vision_radius: f64,
    table: HashMap<(i64, i64), Vec<usize>>,
    index: Vec<(i64, i64)>,
}

impl<'a> SpatHashTracker<'a> {
    #[rustfmt::skip]
    const LOOKUP: [(i64, i64); 9] = [
        (-1, 1), (0, 1), (1, 1),
        (-1, 0), (0, 0), (1, 0),
        (-1, -1), (0, -1), (1, -1),
    ];

    /// Cell holding `(p_x, p_y)`; saturates far out instead of wrapping.
    pub fn get_cell(p_x: f64, p_y: f64, cell_size: f64) -> (i64, i64) {
        (
            (p_x / cell_size).floor() as i64,
            (p_y / cell_size).floor() as i64,
        )
    }

    /// A degenerate radius can't be hashed; the naive scan handles it and
    /// returns the same (empty or all-in-one) answer.
    fn is_hashable(vision_radius: f64) -> bool {
        vision_radius > 0. && vision_radius.is_finite()
    }

    pub fn get_no_cells(&self) -> usize {
        self.table.len()
    }
}

impl<'a> Tracker<'a> for SpatHashTracker<'a> {
    fn new(snapshot: &'a [Agent], params: &SimParams) -> Self {
        let vision_radius = params.vision_radius;
        let cell_size = vision_radius * CELL_PADDING;

        let mut table: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        let mut index = Vec::with_capacity(snapshot.len());

        if Self::is_hashable(vision_radius) {
            for (i, agent) in snapshot.iter().enumerate() {
                let cell = Self::get_cell(agent.position.x, agent.position.y, cell_size);
                table.entry(cell).or_default().push(i);
                index.push(cell);
            }
        }

        let tracker = SpatHashTracker {
            agents: snapshot,
            vision_radius,
            table,
            index,
        };

        trace!(
            "spatial hash: {} agents in {} cells of side {}",
            tracker.get_no_entities(),
            tracker.get_no_cells(),
            cell_size
        );

        tracker
    }

    fn get_neighbours(&self, index: usize, neighbours: &mut Vec<&'a Agent>) {
        if !Self::is_hashable(self.vision_radius) {
            return NaiveTracker::get_neighbours_naive(
                index,
                self.agents,
                self.vision_radius,
                neighbours,
            );
        }

        let agent = &self.agents[index];
        let (c_x, c_y) = self.index[index];

        Self::LOOKUP
            .iter()
            .map(|(d_x, d_y)| (c_x.saturating_add(*d_x), c_y.saturating_add(*d_y)))
            // saturated cells at the far edge repeat
            .unique()
            .filter_map(|cell| self.table.get(&cell))
            .flatten()
            .filter(|i_other| **i_other != index)
            .map(|i_other| &self.agents[*i_other])
            .filter(|other| distance_agent(agent, other) < self.vision_radius)
            .for_each(|other| neighbours.push(other));
    }

    fn get_no_entities(&self) -> usize {
        self.agents.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use rstest::rstest;

    use super::SpatHashTracker;
    use crate::{
        agent::Agent,
        flock::{naive_tracker::NaiveTracker, tracker::Tracker},
        math_helpers::cmp_agent_state,
        options::SimParams,
    };

    #[rstest]
    #[case(0., 0., 10., (0, 0))]
    #[case(9.99, 19.99, 10., (0, 1))]
    #[case(-0.01, -10., 10., (-1, -1))]
    #[case(-10.01, 35., 10., (-2, 3))]
    fn should_produce_cell(
        #[case] p_x: f64,
        #[case] p_y: f64,
        #[case] cell_size: f64,
        #[case] expected: (i64, i64),
    ) {
        assert_eq!(SpatHashTracker::get_cell(p_x, p_y, cell_size), expected);
    }

    #[test]
    fn far_out_positions_saturate() {
        let (x, y) = SpatHashTracker::get_cell(f64::MAX, -f64::MAX, 1.);
        assert_eq!((x, y), (i64::MAX, i64::MIN));
    }

    fn sorted<'a>(mut v: Vec<&'a Agent>) -> Vec<&'a Agent> {
        v.sort_by(|a, b| cmp_agent_state(a, b));
        v
    }

    #[rstest]
    #[case(50.)]
    #[case(7.5)]
    #[case(0.)]
    #[case(f64::INFINITY)]
    fn matches_naive_neighbours(#[case] vision_radius: f64) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut snapshot: Vec<Agent> = (0..200)
            .map(|_| {
                Agent::new(
                    DVec2::new(rng.gen_range(-150.0..150.0), rng.gen_range(-150.0..150.0)),
                    DVec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
                )
            })
            .collect();
        // exact cell boundaries and a coincident pair
        snapshot.push(Agent::new(DVec2::new(50., 50.), DVec2::ZERO));
        snapshot.push(Agent::new(DVec2::new(100., 50.), DVec2::ZERO));
        snapshot.push(Agent::new(DVec2::new(100., 50.), DVec2::ZERO));

        let params = SimParams {
            vision_radius,
            ..Default::default()
        };
        let naive = NaiveTracker::new(&snapshot, &params);
        let hashed = SpatHashTracker::new(&snapshot, &params);

        for i in 0..snapshot.len() {
            let mut expected = Vec::new();
            let mut actual = Vec::new();
            naive.get_neighbours(i, &mut expected);
            hashed.get_neighbours(i, &mut actual);

            assert_eq!(sorted(actual), sorted(expected), "agent {i}");
        }
    }

    #[test]
    fn empty_snapshot_has_no_cells() {
        let snapshot: Vec<Agent> = Vec::new();
        let tracker = SpatHashTracker::new(&snapshot, &SimParams::default());

        assert_eq!(tracker.get_no_cells(), 0);
        assert_eq!(tracker.get_no_entities(), 0);
    }

    #[test]
    fn counts_occupied_cells_only() {
        let snapshot = vec![
            Agent::new(DVec2::new(1., 1.), DVec2::ZERO),
            Agent::new(DVec2::new(2., 2.), DVec2::ZERO),
            Agent::new(DVec2::new(-1., 1.), DVec2::ZERO),
            Agent::new(DVec2::new(500., 500.), DVec2::ZERO),
        ];
        let tracker = SpatHashTracker::new(&snapshot, &SimParams::default());

        assert_eq!(tracker.get_no_cells(), 3);
        assert_eq!(tracker.get_no_entities(), 4);
    }

    #[test]
    fn unhashable_radius_leaves_table_empty() {
        let snapshot = vec![Agent::new(DVec2::ZERO, DVec2::ZERO); 3];
        let params = SimParams {
            vision_radius: 0.,
            ..Default::default()
        };
        let tracker = SpatHashTracker::new(&snapshot, &params);

        assert_eq!(tracker.get_no_cells(), 0);
        assert_eq!(tracker.get_no_entities(), 3);
    }
}
