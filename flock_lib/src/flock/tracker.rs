use crate::{agent::Agent, options::SimParams};

// a tracker borrows one frozen snapshot of the flock and answers neighbour
// queries against it; it never sees the agents being produced for the next tick

pub trait Tracker<'a> {
    fn new(snapshot: &'a [Agent], params: &SimParams) -> Self
    where
        Self: Sized;

    /// Pushes every agent other than `snapshot[index]` that lies strictly
    /// within vision radius of it.
    fn get_neighbours(&self, index: usize, neighbours: &mut Vec<&'a Agent>);

    fn get_no_entities(&self) -> usize;
}
