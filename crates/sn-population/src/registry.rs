//! Sites keyed by unique name, addressed by stable `SiteId`.

use std::collections::{BTreeMap, HashMap};

use sn_core::{Point, SiteId};

use crate::{PopulationError, PopulationResult, Site};

#[derive(Clone, Debug, Default)]
pub struct SiteRegistry {
    sites:   BTreeMap<SiteId, Site>,
    by_name: HashMap<String, SiteId>,
    next_id: u32,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a site.  Names must be unique and non-empty; the position
    /// must be finite and the size non-negative.
    pub fn add(&mut self, name: &str, position: Point, size_px: f64) -> PopulationResult<SiteId> {
        let invalid = |reason: &str| PopulationError::InvalidSite {
            name:   name.to_owned(),
            reason: reason.to_owned(),
        };
        if name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }
        if !position.is_finite() {
            return Err(invalid("position is not finite"));
        }
        if !size_px.is_finite() || size_px < 0.0 {
            return Err(invalid("size must be finite and >= 0"));
        }
        if self.by_name.contains_key(name) {
            return Err(PopulationError::DuplicateName(name.to_owned()));
        }

        let id = SiteId(self.next_id);
        self.next_id += 1;
        self.sites.insert(id, Site::new(name, position, size_px));
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Remove a site by name.  Its `SiteId` is not reused.
    pub fn remove(&mut self, name: &str) -> PopulationResult<Site> {
        let id = self
            .by_name
            .remove(name)
            .ok_or_else(|| PopulationError::UnknownSite(name.to_owned()))?;
        self.sites.remove(&id).ok_or_else(|| PopulationError::UnknownSite(name.to_owned()))
    }

    pub fn get(&self, id: SiteId) -> Option<&Site> {
        self.sites.get(&id)
    }

    pub fn get_mut(&mut self, id: SiteId) -> Option<&mut Site> {
        self.sites.get_mut(&id)
    }

    pub fn by_name(&self, name: &str) -> Option<SiteId> {
        self.by_name.get(name).copied()
    }

    /// Sites in ascending `SiteId` order.
    pub fn iter(&self) -> impl Iterator<Item = (SiteId, &Site)> + '_ {
        self.sites.iter().map(|(&id, s)| (id, s))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SiteId, &mut Site)> + '_ {
        self.sites.iter_mut().map(|(&id, s)| (id, s))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Every site back to `Calm`.
    pub fn reset_all(&mut self) {
        for site in self.sites.values_mut() {
            site.reset();
        }
    }
}
