//! Per-feature coordinate collections.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use super::coord::{Coord, CoordKey, CELL_COUNT};

const WORDS: usize = CELL_COUNT.div_ceil(64);

/// A set of grid coordinates, stored as a bitset over [`CoordKey`]s.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CoordSet {
    bits: [u64; WORDS],
}

impl CoordSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a coordinate. Returns `true` if it was not already present.
    pub fn insert(&mut self, coord: Coord) -> bool {
        let (word, mask) = slot(coord.key());
        let fresh = self.bits[word] & mask == 0;
        self.bits[word] |= mask;
        fresh
    }

    /// Check membership.
    pub fn contains(&self, coord: Coord) -> bool {
        let (word, mask) = slot(coord.key());
        self.bits[word] & mask != 0
    }

    /// Number of coordinates in the set.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Coordinates present in both sets.
    pub fn intersection(&self, other: &CoordSet) -> CoordSet {
        let mut bits = [0u64; WORDS];
        for (i, word) in bits.iter_mut().enumerate() {
            *word = self.bits[i] & other.bits[i];
        }
        CoordSet { bits }
    }

    /// Iterate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| self.contains(c))
    }
}

fn slot(key: CoordKey) -> (usize, u64) {
    let index = key.index();
    (index / 64, 1u64 << (index % 64))
}

impl FromIterator<Coord> for CoordSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut set = CoordSet::new();
        for coord in iter {
            set.insert(coord);
        }
        set
    }
}

impl std::fmt::Debug for CoordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for CoordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Coordinates tagged with an opaque label from the input (treasure or boss IDs).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomFeatureMap {
    rooms: BTreeMap<Coord, String>,
}

impl RoomFeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a labelled room. A later label for the same cell replaces the earlier one.
    pub fn insert(&mut self, coord: Coord, label: impl Into<String>) {
        self.rooms.insert(coord, label.into());
    }

    /// Label for a cell, if the feature is present there.
    pub fn get(&self, coord: Coord) -> Option<&str> {
        self.rooms.get(&coord).map(|s| s.as_str())
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.rooms.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All coordinates carrying this feature.
    pub fn coords(&self) -> CoordSet {
        self.rooms.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &str)> {
        self.rooms.iter().map(|(c, l)| (*c, l.as_str()))
    }
}
