//! Movement System
//!
//! Each organism either stays put or scores every patch and picks one by
//! roulette selection. All decisions read the occupancy captured at the start
//! of the tick, and nothing is committed until every organism has decided.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::{Organism, PatchGrid};
use crate::config::{EngineConfig, OccupancyPolicy};
use crate::SimRng;

use super::{chance, TickTally};

/// Prey and predator counts of one patch at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchCensus {
    pub prey: usize,
    pub predators: usize,
}

/// One organism's choice for this tick
#[derive(Debug, Clone, Copy)]
struct MoveDecision {
    entity: Entity,
    origin: usize,
    /// `None` when the organism chose to stay
    destination: Option<usize>,
}

/// Count prey and predators on every patch.
pub fn patch_census(grid: &PatchGrid, organisms: &Query<&Organism>) -> Vec<PatchCensus> {
    grid.patches()
        .map(|patch| {
            let mut census = PatchCensus::default();
            for organism in patch.occupants().iter().filter_map(|&e| organisms.get(e).ok()) {
                if organism.is_prey() {
                    census.prey += 1;
                } else {
                    census.predators += 1;
                }
            }
            census
        })
        .collect()
}

/// Desirability of every patch for `organism`.
///
/// Prey weigh the patch resource level against predator presence; predators
/// weigh prey presence against competing predators. With zone locking on, a
/// predator scores every patch outside its birth zone as zero.
pub fn score_patches(
    organism: &Organism,
    census: &[PatchCensus],
    grid: &PatchGrid,
    zone_locking: bool,
) -> Vec<f64> {
    let alpha = organism.alpha();
    let tau = organism.tau();
    let locked_zone = if zone_locking && !organism.is_prey() {
        organism.birth_zone()
    } else {
        None
    };

    census
        .iter()
        .enumerate()
        .map(|(index, counts)| {
            if locked_zone.is_some_and(|zone| zone != grid.zone(index)) {
                return 0.0;
            }

            let danger = counts.predators as f64;
            let food = if organism.is_prey() {
                grid.resource_level(index)
            } else {
                counts.prey as f64
            };

            alpha * (tau * food - (1.0 - tau) * danger)
        })
        .collect()
}

/// Roulette selection over `scores`.
///
/// A non-positive total falls back to a uniform pick over every patch.
/// Otherwise a single draw in [0, 1) is covered by the running sum of
/// normalized scores, walking patches in index order.
pub fn select_patch<R: Rng + ?Sized>(rng: &mut R, scores: &[f64]) -> usize {
    let total: f64 = scores.iter().sum();
    if total <= 0.0 {
        return rng.gen_range(0..scores.len());
    }

    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (index, score) in scores.iter().enumerate() {
        cumulative += score / total;
        if cumulative >= roll {
            return index;
        }
    }

    // Rounding left the roll uncovered
    scores
        .iter()
        .rposition(|&score| score > 0.0)
        .unwrap_or(scores.len() - 1)
}

/// Turn decisions into per-patch occupant lists, returning how many moved.
fn resolve_moves(
    decisions: &[MoveDecision],
    patch_count: usize,
    policy: OccupancyPolicy,
) -> (Vec<Vec<Entity>>, usize) {
    let mut placements: Vec<Vec<Entity>> = vec![Vec::new(); patch_count];
    let mut moved = 0;

    match policy {
        OccupancyPolicy::Unbounded => {
            for decision in decisions {
                let target = decision.destination.unwrap_or(decision.origin);
                if target != decision.origin {
                    moved += 1;
                }
                placements[target].push(decision.entity);
            }
        }
        OccupancyPolicy::SingleOccupant => {
            // Every organism holds its own patch until it wins a destination.
            // Stayers are never evicted and a blocked mover can always go back.
            let mut claimed = vec![false; patch_count];
            for decision in decisions {
                claimed[decision.origin] = true;
            }

            for decision in decisions {
                let target = match decision.destination {
                    Some(dest) if dest != decision.origin && !claimed[dest] => {
                        claimed[dest] = true;
                        claimed[decision.origin] = false;
                        moved += 1;
                        dest
                    }
                    _ => decision.origin,
                };
                placements[target].push(decision.entity);
            }
        }
    }

    (placements, moved)
}

/// System: decide and commit every organism's movement for this tick
pub fn move_organisms(
    config: Res<EngineConfig>,
    mut rng: ResMut<SimRng>,
    mut grid: ResMut<PatchGrid>,
    mut tally: ResMut<TickTally>,
    organisms: Query<&Organism>,
) {
    let census = patch_census(&grid, &organisms);
    let occupants = grid.occupants_in_order();
    let mut decisions = Vec::with_capacity(occupants.len());

    for (origin, entity) in occupants {
        let destination = match organisms.get(entity) {
            Ok(organism) if chance(&mut rng.0, organism.move_rate()) => {
                let scores = score_patches(organism, &census, &grid, config.zone_locking);
                Some(select_patch(&mut rng.0, &scores))
            }
            _ => None,
        };

        decisions.push(MoveDecision {
            entity,
            origin,
            destination,
        });
    }

    let (placements, moved) = resolve_moves(&decisions, grid.len(), grid.policy());
    grid.replace_occupants(placements);
    tally.moved += moved;
}

#[cfg(test)]
mod tests {
    use super::*;
    use evo_events::Zone;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn test_prey_scores_trade_food_against_danger() {
        let grid = PatchGrid::new(&[0.2, 0.8], OccupancyPolicy::Unbounded);
        let census = vec![
            PatchCensus { prey: 0, predators: 0 },
            PatchCensus { prey: 0, predators: 1 },
        ];
        let prey = Organism::prey_a(0.5, 0.75, 0.5);

        let scores = score_patches(&prey, &census, &grid, true);
        assert!((scores[0] - 0.5 * 0.75 * 0.2).abs() < 1e-12);
        assert!((scores[1] - 0.5 * (0.75 * 0.8 - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_predator_scores_count_prey() {
        let grid = PatchGrid::new(&[0.1, 0.1], OccupancyPolicy::Unbounded);
        let census = vec![
            PatchCensus { prey: 3, predators: 1 },
            PatchCensus { prey: 0, predators: 0 },
        ];
        let predator = Organism::predator(1.0, 0.5, 0.5);

        let scores = score_patches(&predator, &census, &grid, false);
        assert_eq!(scores, vec![1.0, 0.0]);
    }

    #[test]
    fn test_zone_locked_predator_ignores_other_zones() {
        let grid = PatchGrid::new(&[0.1, 0.9], OccupancyPolicy::Unbounded);
        let census = vec![
            PatchCensus { prey: 1, predators: 0 },
            PatchCensus { prey: 5, predators: 0 },
        ];
        let mut predator = Organism::predator(1.0, 1.0, 1.0);
        predator.settle_birth_zone(Zone::Low);

        let locked = score_patches(&predator, &census, &grid, true);
        assert_eq!(locked, vec![1.0, 0.0]);

        let free = score_patches(&predator, &census, &grid, false);
        assert_eq!(free, vec![1.0, 5.0]);
    }

    #[test]
    fn test_zone_lock_does_not_apply_to_prey() {
        let grid = PatchGrid::new(&[0.1, 0.9], OccupancyPolicy::Unbounded);
        let census = vec![PatchCensus::default(); 2];
        let mut prey = Organism::prey_a(1.0, 1.0, 1.0);
        prey.settle_birth_zone(Zone::Low);

        let scores = score_patches(&prey, &census, &grid, true);
        assert!(scores[1] > 0.0);
    }

    #[test]
    fn test_select_single_positive_patch() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(select_patch(&mut rng, &[0.0, 0.0, 2.5, 0.0]), 2);
        }
    }

    #[test]
    fn test_select_is_roughly_proportional() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            counts[select_patch(&mut rng, &[1.0, 3.0])] += 1;
        }
        // Expect ~2500 vs ~7500
        assert!(counts[0] > 2200 && counts[0] < 2800, "{counts:?}");
    }

    #[test]
    fn test_select_non_positive_total_is_uniform_fallback() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[select_patch(&mut rng, &[-1.0, -2.0, 0.0, 0.5])] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_resolve_single_occupancy_keeps_stayers() {
        let ids = entities(3);
        let decisions = vec![
            MoveDecision { entity: ids[0], origin: 0, destination: Some(1) },
            MoveDecision { entity: ids[1], origin: 1, destination: None },
            MoveDecision { entity: ids[2], origin: 2, destination: Some(3) },
        ];

        let (placements, moved) =
            resolve_moves(&decisions, 4, OccupancyPolicy::SingleOccupant);
        assert_eq!(placements[0], vec![ids[0]]);
        assert_eq!(placements[1], vec![ids[1]]);
        assert!(placements[2].is_empty());
        assert_eq!(placements[3], vec![ids[2]]);
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_resolve_single_occupancy_first_mover_wins() {
        let ids = entities(2);
        let decisions = vec![
            MoveDecision { entity: ids[0], origin: 0, destination: Some(2) },
            MoveDecision { entity: ids[1], origin: 1, destination: Some(2) },
        ];

        let (placements, moved) =
            resolve_moves(&decisions, 3, OccupancyPolicy::SingleOccupant);
        assert_eq!(placements[2], vec![ids[0]]);
        assert_eq!(placements[1], vec![ids[1]]);
        assert_eq!(moved, 1);
    }

    #[test]
    fn test_resolve_single_occupancy_vacated_origin_is_open() {
        let ids = entities(2);
        let decisions = vec![
            MoveDecision { entity: ids[0], origin: 0, destination: Some(2) },
            MoveDecision { entity: ids[1], origin: 1, destination: Some(0) },
        ];

        let (placements, moved) =
            resolve_moves(&decisions, 3, OccupancyPolicy::SingleOccupant);
        assert_eq!(placements[0], vec![ids[1]]);
        assert!(placements[1].is_empty());
        assert_eq!(placements[2], vec![ids[0]]);
        assert_eq!(moved, 2);
    }

    #[test]
    fn test_resolve_single_occupancy_blocked_origin_stays_held() {
        let ids = entities(3);
        // The first mover is blocked by the stayer, so its origin is never freed
        let decisions = vec![
            MoveDecision { entity: ids[0], origin: 0, destination: Some(1) },
            MoveDecision { entity: ids[1], origin: 1, destination: None },
            MoveDecision { entity: ids[2], origin: 2, destination: Some(0) },
        ];

        let (placements, moved) =
            resolve_moves(&decisions, 3, OccupancyPolicy::SingleOccupant);
        assert_eq!(placements[0], vec![ids[0]]);
        assert_eq!(placements[1], vec![ids[1]]);
        assert_eq!(placements[2], vec![ids[2]]);
        assert_eq!(moved, 0);
        assert!(placements.iter().all(|p| p.len() <= 1));
    }

    #[test]
    fn test_resolve_unbounded_stacks() {
        let ids = entities(2);
        let decisions = vec![
            MoveDecision { entity: ids[0], origin: 0, destination: Some(1) },
            MoveDecision { entity: ids[1], origin: 1, destination: Some(1) },
        ];

        let (placements, moved) = resolve_moves(&decisions, 2, OccupancyPolicy::Unbounded);
        assert_eq!(placements[1], vec![ids[0], ids[1]]);
        assert_eq!(moved, 1);
    }
}
