//! Genetic operators for route chromosomes.
//!
//! The route vector is a fixed-endpoint permutation, so it needs an
//! order-preserving crossover; the speed and recharge vectors are
//! positionally independent and recombine uniformly.
//!
//! # Reference
//! Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (order
//! crossover)

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::models::Waypoint;

/// Order crossover (OX) over two parent routes with fixed depot endpoints.
///
/// Picks two distinct interior cut points, copies the segment between them
/// verbatim from each template parent, then fills the remaining interior
/// slots in order with the donor parent's waypoints, skipping the depot and
/// anything already present. A slot the donor cannot fill falls back to the
/// template's waypoint at that position, so no slot is ever left empty.
///
/// Routes with fewer than two interior positions cannot host two distinct
/// cut points; the parents are returned unchanged.
pub fn order_crossover<R: Rng>(
    route1: &[Waypoint],
    route2: &[Waypoint],
    depot_id: &str,
    rng: &mut R,
) -> (Vec<Waypoint>, Vec<Waypoint>) {
    let size = route1.len();
    if size < 4 || route2.len() != size {
        return (route1.to_vec(), route2.to_vec());
    }

    let interior: Vec<usize> = (1..size - 1).collect();
    let mut cuts: Vec<usize> = interior.choose_multiple(rng, 2).copied().collect();
    cuts.sort_unstable();
    let (start, end) = (cuts[0], cuts[1]);

    let child1 = ox_child(route1, route2, start, end, depot_id);
    let child2 = ox_child(route2, route1, start, end, depot_id);
    (child1, child2)
}

fn ox_child(
    template: &[Waypoint],
    donor: &[Waypoint],
    start: usize,
    end: usize,
    depot_id: &str,
) -> Vec<Waypoint> {
    let size = template.len();
    let mut slots: Vec<Option<Waypoint>> = vec![None; size];
    slots[0] = Some(template[0].clone());
    slots[size - 1] = Some(template[size - 1].clone());
    for i in start..=end {
        slots[i] = Some(template[i].clone());
    }

    let mut donor_pos = 0;
    for i in 1..size - 1 {
        if slots[i].is_some() {
            continue;
        }
        while donor_pos < size {
            let gene = &donor[donor_pos];
            donor_pos += 1;
            let already_placed = slots
                .iter()
                .flatten()
                .any(|placed| placed.id == gene.id);
            if gene.id != depot_id && !already_placed {
                slots[i] = Some(gene.clone());
                break;
            }
        }
    }

    // Back-fill anything the donor could not supply from the template.
    slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| slot.unwrap_or_else(|| template[i].clone()))
        .collect()
}

/// Per-position 50/50 recombination of two equal-length gene vectors.
pub fn uniform_crossover<T: Clone, R: Rng>(a: &[T], b: &[T], rng: &mut R) -> Vec<T> {
    a.iter()
        .zip(b)
        .map(|(x, y)| if rng.random_bool(0.5) { x.clone() } else { y.clone() })
        .collect()
}

/// Swaps two random interior route positions. Routes with fewer than two
/// interior waypoints are left unchanged.
pub fn swap_route_mutation<R: Rng>(route: &mut [Waypoint], rng: &mut R) {
    let len = route.len();
    if len < 4 {
        return;
    }
    let interior: Vec<usize> = (1..len - 1).collect();
    let picks: Vec<usize> = interior.choose_multiple(rng, 2).copied().collect();
    route.swap(picks[0], picks[1]);
}

/// Reassigns one random leg's speed to a uniformly random legal speed.
pub fn speed_mutation<R: Rng>(speeds: &mut [u32], available: &[u32], rng: &mut R) {
    if speeds.is_empty() || available.is_empty() {
        return;
    }
    let idx = rng.random_range(0..speeds.len());
    speeds[idx] = *available.choose(rng).unwrap();
}

/// Flips one random leg's forced-recharge flag.
pub fn recharge_flip_mutation<R: Rng>(recharges: &mut [bool], rng: &mut R) {
    if recharges.is_empty() {
        return;
    }
    let idx = rng.random_range(0..recharges.len());
    recharges[idx] = !recharges[idx];
}
