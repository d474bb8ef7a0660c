//! Sparse voxel store keyed on the full 3D coordinate.
//!
//! World data touches a tiny neighbourhood of an unbounded coordinate space, so the store
//! is a hash map from [`VoxelPos`] to [`Voxel`]. All queries are single-point; there is no
//! spatial index. A coordinate absent from the map is empty space, which is distinct from
//! any placed voxel type.

use rustc_hash::FxHashMap;

use crate::voxel::{Voxel, VoxelPos};

/// Sparse mapping from integer coordinates to voxels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelStore {
    voxels: FxHashMap<VoxelPos, Voxel>,
}

impl VoxelStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the voxel at `(x, y, z)`, or `None` for empty space.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        self.voxels.get(&VoxelPos::new(x, y, z))
    }

    /// Returns the voxel at `pos`, or `None` for empty space.
    pub fn get_at(&self, pos: VoxelPos) -> Option<&Voxel> {
        self.voxels.get(&pos)
    }

    /// Places `voxel` at `(x, y, z)`, unconditionally replacing whatever was there.
    ///
    /// Returns the previous occupant, if any.
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) -> Option<Voxel> {
        self.set_at(VoxelPos::new(x, y, z), voxel)
    }

    /// Places `voxel` at `pos`, unconditionally replacing whatever was there.
    pub fn set_at(&mut self, pos: VoxelPos, voxel: Voxel) -> Option<Voxel> {
        tracing::trace!("set {} = {}", pos, voxel);
        self.voxels.insert(pos, voxel)
    }

    /// Returns `(x, y, z)` to empty space, returning the removed voxel if there was one.
    pub fn remove(&mut self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        self.remove_at(VoxelPos::new(x, y, z))
    }

    /// Returns `pos` to empty space.
    pub fn remove_at(&mut self, pos: VoxelPos) -> Option<Voxel> {
        self.voxels.remove(&pos)
    }

    /// Returns `true` if a voxel is present at `pos`.
    pub fn contains(&self, pos: VoxelPos) -> bool {
        self.voxels.contains_key(&pos)
    }

    /// Iterates over every occupied coordinate.
    ///
    /// The order is unspecified but fixed for the lifetime of the borrow. Because the
    /// iterator borrows the store, the borrow checker rules out mutation mid-enumeration.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelPos, &Voxel)> + '_ {
        self.voxels.iter().map(|(pos, voxel)| (*pos, voxel))
    }

    /// Returns the number of occupied coordinates.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Returns `true` if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Removes every voxel.
    pub fn clear(&mut self) {
        self.voxels.clear();
    }

    /// Returns the inclusive `(min, max)` corners of the occupied region, or `None` when
    /// the store is empty.
    pub fn bounds(&self) -> Option<(VoxelPos, VoxelPos)> {
        let mut positions = self.voxels.keys();
        let first = *positions.next()?;
        Some(positions.fold((first, first), |(lo, hi), p| {
            (
                VoxelPos::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                VoxelPos::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }
}

impl FromIterator<(VoxelPos, Voxel)> for VoxelStore {
    fn from_iter<I: IntoIterator<Item = (VoxelPos, Voxel)>>(iter: I) -> Self {
        Self {
            voxels: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_returns_none() {
        let store = VoxelStore::new();
        assert!(store.get(0, 0, 0).is_none());
        assert!(store.get(i32::MIN, i32::MAX, -7).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let mut store = VoxelStore::new();
        store.set(5, -10, 20, Voxel::new("grass"));
        assert_eq!(store.get(5, -10, 20), Some(&Voxel::new("grass")));
        // Neighbours remain empty.
        assert!(store.get(4, -10, 20).is_none());
        assert!(store.get(5, -10, 21).is_none());
    }

    #[test]
    fn test_set_overwrites_and_returns_previous() {
        let mut store = VoxelStore::new();
        assert!(store.set(1, 1, 1, Voxel::new("dirt")).is_none());
        let prev = store.set(1, 1, 1, Voxel::new("water"));
        assert_eq!(prev, Some(Voxel::new("dirt")));
        assert_eq!(store.get(1, 1, 1).map(Voxel::kind), Some("water"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_returns_to_absent() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("water"));
        assert_eq!(store.remove(0, 0, 0), Some(Voxel::new("water")));
        assert!(store.get(0, 0, 0).is_none());
        // Removing empty space is a no-op.
        assert!(store.remove(0, 0, 0).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_extreme_coordinates() {
        let mut store = VoxelStore::new();
        let corners = [
            (i32::MIN, i32::MIN, i32::MIN),
            (i32::MAX, i32::MAX, i32::MAX),
            (i32::MIN, 0, i32::MAX),
        ];
        for (x, y, z) in corners {
            store.set(x, y, z, Voxel::new("stone"));
        }
        for (x, y, z) in corners {
            assert_eq!(store.get(x, y, z).map(Voxel::kind), Some("stone"));
        }
    }

    #[test]
    fn test_get_after_set_then_remove_regardless_of_prior_state() {
        let mut store = VoxelStore::new();
        store.set(2, 2, 2, Voxel::new("old"));
        for (x, y, z) in [(2, 2, 2), (-3, 9, 0), (0, 0, -1)] {
            store.set(x, y, z, Voxel::new("new"));
            assert_eq!(store.get(x, y, z).map(Voxel::kind), Some("new"));
            store.remove(x, y, z);
            assert!(store.get(x, y, z).is_none());
        }
    }

    #[test]
    fn test_iter_visits_every_entry_once() {
        let mut store = VoxelStore::new();
        store.set(0, 0, 0, Voxel::new("a"));
        store.set(1, 0, 0, Voxel::new("b"));
        store.set(0, 0, 3, Voxel::new("c"));

        let mut seen: Vec<_> = store.iter().map(|(p, v)| (p, v.kind().to_string())).collect();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                (VoxelPos::new(0, 0, 0), "a".to_string()),
                (VoxelPos::new(0, 0, 3), "c".to_string()),
                (VoxelPos::new(1, 0, 0), "b".to_string()),
            ]
        );

        // Restartable: a second enumeration sees the same entries in the same order.
        let first: Vec<_> = store.iter().map(|(p, _)| p).collect();
        let second: Vec<_> = store.iter().map(|(p, _)| p).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bounds() {
        let mut store = VoxelStore::new();
        assert!(store.bounds().is_none());
        store.set(-2, 5, 0, Voxel::new("a"));
        store.set(3, -1, 4, Voxel::new("b"));
        assert_eq!(
            store.bounds(),
            Some((VoxelPos::new(-2, -1, 0), VoxelPos::new(3, 5, 4)))
        );
    }
}
