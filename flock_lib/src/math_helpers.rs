use std::cmp::Ordering;

use glam::DVec2;

use crate::agent::Agent;

#[inline]
pub fn distance(p1: DVec2, p2: DVec2) -> f64 {
    (p1 - p2).length()
}

pub fn distance_agent(a1: &Agent, a2: &Agent) -> f64 {
    distance(a1.position, a2.position)
}

/// Unit vector pointing along `deg` degrees, measured counter-clockwise from +x
pub fn heading_to_unit(deg: f64) -> DVec2 {
    let rad = deg.to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

/// Arithmetic mean of the given vectors, `None` for an empty input
pub fn mean<I>(vectors: I) -> Option<DVec2>
where
    I: IntoIterator<Item = DVec2>,
{
    let (sum, count) = vectors
        .into_iter()
        .fold((DVec2::ZERO, 0_usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Total order over agent states: position first, then velocity.
///
/// Summing neighbours in this order makes a step depend only on the
/// neighbours' states, not on where they sit in the set.
pub fn cmp_agent_state(a: &Agent, b: &Agent) -> Ordering {
    a.position
        .x
        .total_cmp(&b.position.x)
        .then(a.position.y.total_cmp(&b.position.y))
        .then(a.velocity.x.total_cmp(&b.velocity.x))
        .then(a.velocity.y.total_cmp(&b.velocity.y))
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use approx::assert_relative_eq;
    use glam::DVec2;
    use rstest::rstest;

    use super::{cmp_agent_state, distance, heading_to_unit, mean};
    use crate::agent::Agent;

    macro_rules! assert_eqf64 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-9_f64)
        };
    }

    #[rstest]
    #[case(0., 1., 0.)]
    #[case(90., 0., 1.)]
    #[case(180., -1., 0.)]
    #[case(270., 0., -1.)]
    #[case(360., 1., 0.)]
    fn heading_to_unit_cardinals(#[case] deg: f64, #[case] x: f64, #[case] y: f64) {
        let v = heading_to_unit(deg);
        assert_eqf64!(v.x, x);
        assert_eqf64!(v.y, y);
        assert_eqf64!(v.length(), 1.);
    }

    #[test]
    fn distance_pythagorean() {
        assert_eqf64!(distance(DVec2::new(3., 0.), DVec2::new(0., 4.)), 5.);
        assert_eq!(distance(DVec2::new(1., 1.), DVec2::new(1., 1.)), 0.);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn mean_of_three() {
        let m = mean([DVec2::new(0., 0.), DVec2::new(3., 3.), DVec2::new(6., -3.)]).unwrap();
        assert_eq!(m, DVec2::new(3., 0.));
    }

    #[test]
    fn state_order_position_then_velocity() {
        let a = Agent::new(DVec2::new(0., 1.), DVec2::new(5., 5.));
        let b = Agent::new(DVec2::new(0., 2.), DVec2::new(-5., -5.));
        let c = Agent::new(DVec2::new(0., 1.), DVec2::new(6., 0.));

        assert_eq!(cmp_agent_state(&a, &b), Ordering::Less);
        assert_eq!(cmp_agent_state(&a, &c), Ordering::Less);
        assert_eq!(cmp_agent_state(&a, &a), Ordering::Equal);
    }
}
