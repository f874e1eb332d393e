//! Patch Grid
//!
//! The fixed, ordered set of patches and the entity ids living on each.
//! Organisms themselves are owned by the ECS world; patches only list ids.

use bevy_ecs::prelude::*;

use evo_events::Zone;

use crate::config::{clamp_unit, OccupancyPolicy};

/// A single patch of habitat
#[derive(Debug, Clone)]
pub struct Patch {
    resource_level: f64,
    zone: Zone,
    occupants: Vec<Entity>,
}

impl Patch {
    fn new(resource_level: f64) -> Self {
        let resource_level = clamp_unit(resource_level);
        Self {
            resource_level,
            zone: Zone::classify(resource_level),
            occupants: Vec::new(),
        }
    }

    pub fn resource_level(&self) -> f64 {
        self.resource_level
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn occupants(&self) -> &[Entity] {
        &self.occupants
    }

    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }
}

/// Resource: every patch in grid order
#[derive(Resource, Debug, Clone)]
pub struct PatchGrid {
    patches: Vec<Patch>,
    policy: OccupancyPolicy,
}

impl PatchGrid {
    /// Creates one patch per resource level. Levels are clamped into [0, 1].
    pub fn new(resource_levels: &[f64], policy: OccupancyPolicy) -> Self {
        Self {
            patches: resource_levels.iter().copied().map(Patch::new).collect(),
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn policy(&self) -> OccupancyPolicy {
        self.policy
    }

    /// Panics if `index` is outside the grid.
    pub fn patch(&self, index: usize) -> &Patch {
        match self.patches.get(index) {
            Some(patch) => patch,
            None => panic!(
                "patch index {} out of range for a grid of {} patches",
                index,
                self.patches.len()
            ),
        }
    }

    pub fn patches(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter()
    }

    pub fn resource_level(&self, index: usize) -> f64 {
        self.patch(index).resource_level
    }

    pub fn zone(&self, index: usize) -> Zone {
        self.patch(index).zone
    }

    pub fn occupants(&self, index: usize) -> &[Entity] {
        &self.patch(index).occupants
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.patch(index).is_occupied()
    }

    /// Total organisms on the grid.
    pub fn population(&self) -> usize {
        self.patches.iter().map(|p| p.occupants.len()).sum()
    }

    /// Every occupant paired with its patch index, in grid order.
    pub fn occupants_in_order(&self) -> Vec<(usize, Entity)> {
        self.patches
            .iter()
            .enumerate()
            .flat_map(|(index, patch)| patch.occupants.iter().map(move |&e| (index, e)))
            .collect()
    }

    /// Whether an inbound organism would be accepted at `index`.
    pub fn can_admit(&self, index: usize) -> bool {
        match self.policy {
            OccupancyPolicy::SingleOccupant => !self.is_occupied(index),
            OccupancyPolicy::Unbounded => {
                self.patch(index);
                true
            }
        }
    }

    /// Adds `entity` to the patch if the occupancy policy allows it.
    pub(crate) fn admit(&mut self, index: usize, entity: Entity) -> bool {
        if !self.can_admit(index) {
            return false;
        }
        self.patches[index].occupants.push(entity);
        true
    }

    /// Removes `entity` from the patch, returning whether it was present.
    pub(crate) fn remove(&mut self, index: usize, entity: Entity) -> bool {
        let occupants = &mut self.patches[index].occupants;
        match occupants.iter().position(|&e| e == entity) {
            Some(position) => {
                occupants.remove(position);
                true
            }
            None => false,
        }
    }

    /// Replaces every occupant list at once, used to commit movement.
    pub(crate) fn replace_occupants(&mut self, occupants: Vec<Vec<Entity>>) {
        assert_eq!(
            occupants.len(),
            self.patches.len(),
            "occupant lists must cover every patch"
        );
        for (patch, list) in self.patches.iter_mut().zip(occupants) {
            patch.occupants = list;
        }
    }
}
