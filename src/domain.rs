//! Per-cell sets of still-admissible tile types.

use bitvec::{bitvec, vec::BitVec};

use crate::{
    direction::Direction,
    tile::{TileCatalog, TileId},
};

/// The tile types still admissible for one cell.
///
/// Members are stored as one bit per catalog entry. Once generation starts a domain only ever
/// shrinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Domain {
    /// Bit `n` is set while [`TileId`] `n` is admissible.
    bits: BitVec,
}

impl Domain {
    /// A domain holding every entry of `catalog`.
    #[must_use]
    pub fn full(catalog: &TileCatalog) -> Self {
        Self {
            bits: bitvec![1; catalog.len()],
        }
    }

    /// Checks whether no tile is admissible anymore.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of admissible tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Checks whether `id` is still admissible.
    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.bits.get(id.0).is_some_and(|bit| *bit)
    }

    /// Removes `id` from the domain.
    pub fn remove(&mut self, id: TileId) {
        if let Some(mut bit) = self.bits.get_mut(id.0) {
            *bit = false;
        }
    }

    /// Keeps only the members for which `keep` holds.
    pub fn retain<F: FnMut(TileId) -> bool>(&mut self, mut keep: F) {
        let dropped: Vec<TileId> = self.iter().filter(|id| !keep(*id)).collect();
        for id in dropped {
            self.remove(id);
        }
    }

    /// Removes every tile that exposes `direction`.
    pub fn remove_exposing(&mut self, catalog: &TileCatalog, direction: Direction) {
        self.retain(|id| !catalog.exposes(id, direction));
    }

    /// Removes every tile that does not expose `direction`.
    pub fn remove_not_exposing(&mut self, catalog: &TileCatalog, direction: Direction) {
        self.retain(|id| catalog.exposes(id, direction));
    }

    /// Sum of the catalog weights of the members.
    #[must_use]
    pub fn total_weight(&self, catalog: &TileCatalog) -> f64 {
        self.iter().map(|id| catalog.weight(id)).sum()
    }

    /// Checks whether at least one member can actually be picked.
    #[must_use]
    pub fn is_selectable(&self, catalog: &TileCatalog) -> bool {
        self.total_weight(catalog) > 0.0
    }

    /// Iterates over the members in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId)
    }
}
