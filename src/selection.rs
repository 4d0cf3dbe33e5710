//! Weighted random selection of a tile from a domain.

use rand::Rng;

use crate::{
    domain::Domain,
    tile::{TileCatalog, TileId},
};

/// A half-open sub-interval of `[0, 1)` assigned to one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbabilityRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound, except for the last range which also holds `1.0`.
    pub max: f64,
}

/// Partitions `[0, 1)` among the members of `domain` in proportion to their weights.
///
/// Ranges follow catalog order. Zero-weight members get no range. An empty list means the domain
/// has nothing to pick from, either because it is empty or because its total weight is zero.
#[must_use]
pub fn probability_ranges(
    catalog: &TileCatalog,
    domain: &Domain,
) -> Vec<(TileId, ProbabilityRange)> {
    let total_weight = domain.total_weight(catalog);
    if !(total_weight > 0.0) {
        return Vec::new();
    }

    let mut previous_max = 0.0;
    domain
        .iter()
        .filter(|id| catalog.weight(*id) > 0.0)
        .map(|id| {
            let max = previous_max + catalog.weight(id) / total_weight;
            let range = ProbabilityRange {
                min: previous_max,
                max,
            };
            previous_max = max;
            (id, range)
        })
        .collect()
}

/// Picks one member of `domain` at random, weighted by the catalog weights.
///
/// Returns `None` when the domain has nothing to pick from. A draw that lands past the last
/// range because of rounding falls to the last range.
pub fn pick_weighted<R: Rng + ?Sized>(
    catalog: &TileCatalog,
    domain: &Domain,
    rng: &mut R,
) -> Option<TileId> {
    let ranges = probability_ranges(catalog, domain);
    let (last, _) = *ranges.last()?;
    let draw: f64 = rng.gen();

    let picked = ranges
        .iter()
        .find(|(_, range)| draw >= range.min && draw < range.max)
        .map_or(last, |(id, _)| *id);
    Some(picked)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{direction::Directions, tile::TileKind};

    fn weighted(weights: &[f64]) -> TileCatalog {
        weights
            .iter()
            .enumerate()
            .fold(TileCatalog::default(), |catalog, (index, weight)| {
                catalog.with(TileKind::new(format!("tile-{index}"), Directions::ALL), *weight)
            })
    }

    #[test]
    fn test_ranges_partition_unit_interval() {
        let catalog = weighted(&[1.0, 0.0, 3.0]);
        let ranges = probability_ranges(&catalog, &Domain::full(&catalog));

        assert_eq!(ranges.len(), 2, "zero-weight tiles get no range");
        let (first_id, first) = ranges.first().copied().expect("first range");
        let (last_id, last) = ranges.last().copied().expect("last range");
        assert_eq!(first_id, TileId(0));
        assert_eq!(last_id, TileId(2));
        assert!(first.min.abs() < f64::EPSILON);
        assert!((first.max - 0.25).abs() < 1e-12);
        assert!((last.min - 0.25).abs() < 1e-12);
        assert!((last.max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_zero_weight_domains_pick_nothing() {
        let catalog = weighted(&[0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(pick_weighted(&catalog, &Domain::full(&catalog), &mut rng), None);
        assert_eq!(pick_weighted(&catalog, &Domain::default(), &mut rng), None);
    }

    #[test]
    fn test_zero_weight_tile_is_never_picked() {
        let catalog = weighted(&[0.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            assert_eq!(
                pick_weighted(&catalog, &Domain::full(&catalog), &mut rng),
                Some(TileId(1))
            );
        }
    }

    #[test]
    fn test_weighted_distribution_three_to_one() {
        let catalog = weighted(&[3.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 40_000;

        let heavy = (0..trials)
            .filter(|_| {
                pick_weighted(&catalog, &Domain::full(&catalog), &mut rng) == Some(TileId(0))
            })
            .count();

        let share = f64::from(u32::try_from(heavy).expect("count fits in u32"))
            / f64::from(u32::try_from(trials).expect("trials fit in u32"));
        assert!(
            (share - 0.75).abs() < 0.01,
            "expected a 3:1 split, got a share of {share}"
        );
    }

    #[test]
    fn test_pick_respects_domain() {
        let catalog = weighted(&[5.0, 1.0, 1.0]);
        let mut domain = Domain::full(&catalog);
        domain.remove(TileId(0));
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let picked = pick_weighted(&catalog, &domain, &mut rng).expect("domain is not empty");
            assert_ne!(picked, TileId(0));
        }
    }
}
