//! Plants fetched so far, and the filtered view the grid shows.

use std::collections::HashSet;

use crate::model::{EnvironmentKey, Plant, PlantId};

/// Accumulated plants plus the subset matching the selected environment.
///
/// `visible` holds indices into `plants`, in order, of the plants suited to
/// `selected`. It is kept in step on every append and selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantCatalog {
    plants: Vec<Plant>,
    ids: HashSet<PlantId>,
    visible: Vec<usize>,
    selected: EnvironmentKey,
}

impl PlantCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn visible(&self) -> impl Iterator<Item = &Plant> + '_ {
        self.visible.iter().map(move |&i| &self.plants[i])
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn selected(&self) -> &EnvironmentKey {
        &self.selected
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn find(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    /// Installs the first page. The selected environment is kept.
    pub fn replace(&mut self, plants: Vec<Plant>) -> usize {
        self.plants.clear();
        self.ids.clear();
        self.visible.clear();
        self.append(plants)
    }

    /// Appends plants whose id is not already present and returns how many
    /// were added. Existing entries are never touched.
    pub fn append(&mut self, plants: Vec<Plant>) -> usize {
        let before = self.plants.len();

        for plant in plants {
            if !self.ids.insert(plant.id) {
                continue;
            }
            if plant.suits(&self.selected) {
                self.visible.push(self.plants.len());
            }
            self.plants.push(plant);
        }

        self.plants.len() - before
    }

    /// Recomputes the filtered view for `key` over everything fetched so far.
    pub fn select(&mut self, key: EnvironmentKey) {
        self.visible = self
            .plants
            .iter()
            .enumerate()
            .filter(|(_, plant)| plant.suits(&key))
            .map(|(i, _)| i)
            .collect();
        self.selected = key;
    }
}
