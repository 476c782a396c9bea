//! Ordered category hierarchy
//!
//! Categories are kept as an explicit ordered list of ids. Level `n` is the
//! id at position `n - 1`; relabeling a grid by hierarchy maps every id to its
//! level, so inserting a category at a level is a list splice.

use ndarray::Array2;
use rastergeo_core::raster::Raster;
use rastergeo_core::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryHierarchy {
    levels: Vec<u32>,
}

impl CategoryHierarchy {
    /// Hierarchy from an explicit ordering of category ids.
    ///
    /// # Errors
    /// Id 0 (reserved for "no category") or a duplicated id.
    pub fn new(levels: Vec<u32>) -> Result<Self> {
        for (i, id) in levels.iter().enumerate() {
            if *id == 0 || levels[..i].contains(id) {
                return Err(Error::InvalidParameter {
                    name: "levels",
                    value: format!("{:?}", levels),
                    reason: format!("id {} is reserved or duplicated", id),
                });
            }
        }
        Ok(Self { levels })
    }

    /// The identity hierarchy `1, 2, ..., max_id`
    pub fn from_max(max_id: u32) -> Self {
        Self {
            levels: (1..=max_id).collect(),
        }
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// 1-based level of a category id
    pub fn level_of(&self, id: u32) -> Option<usize> {
        self.levels.iter().position(|&l| l == id).map(|p| p + 1)
    }

    /// Append a category above every existing level
    pub fn push(&mut self, id: u32) {
        self.levels.retain(|&l| l != id);
        self.levels.push(id);
    }

    /// Insert `id` so that it occupies `level`; categories at or above that
    /// level move up by one. An id already present is moved.
    ///
    /// # Panics
    /// If `level` is 0 or more than one past the top of the hierarchy.
    pub fn insert_at(&mut self, level: usize, id: u32) {
        self.levels.retain(|&l| l != id);
        assert!(
            level >= 1 && level <= self.levels.len() + 1,
            "category level {} does not exist (hierarchy has levels 1..={})",
            level,
            self.levels.len() + 1
        );
        self.levels.insert(level - 1, id);
    }

    /// Lookup table indexed by category id giving its level.
    ///
    /// 0 maps to 0; ids outside the hierarchy keep their value.
    pub fn relabel_table(&self) -> Vec<u32> {
        let max_id = self.levels.iter().copied().max().unwrap_or(0) as usize;
        let mut table: Vec<u32> = (0..=max_id as u32).collect();
        for (position, &id) in self.levels.iter().enumerate() {
            table[id as usize] = position as u32 + 1;
        }
        table
    }

    /// Replace every category id in `grid` by its level
    pub fn relabel(&self, grid: &Raster<u32>) -> Raster<u32> {
        let table = self.relabel_table();
        let data: Array2<u32> = grid
            .data()
            .mapv(|id| table.get(id as usize).copied().unwrap_or(id));
        grid.with_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastergeo_core::GeoReference;

    #[test]
    fn test_from_max_is_identity() {
        let hierarchy = CategoryHierarchy::from_max(3);
        assert_eq!(hierarchy.levels(), &[1, 2, 3]);
        assert_eq!(hierarchy.relabel_table(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insert_shifts_upper_levels() {
        let mut hierarchy = CategoryHierarchy::from_max(2);
        hierarchy.push(3);
        hierarchy.insert_at(2, 3);
        assert_eq!(hierarchy.levels(), &[1, 3, 2]);
        assert_eq!(hierarchy.level_of(3), Some(2));
        assert_eq!(hierarchy.level_of(2), Some(3));
        // id -> level
        assert_eq!(hierarchy.relabel_table(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_insert_at_top_is_noop() {
        let mut hierarchy = CategoryHierarchy::from_max(2);
        hierarchy.push(3);
        hierarchy.insert_at(3, 3);
        assert_eq!(hierarchy.levels(), &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn test_insert_at_missing_level_panics() {
        let mut hierarchy = CategoryHierarchy::from_max(2);
        hierarchy.insert_at(5, 3);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn test_insert_at_level_zero_panics() {
        let mut hierarchy = CategoryHierarchy::from_max(2);
        hierarchy.insert_at(0, 3);
    }

    #[test]
    fn test_new_rejects_reserved_and_duplicates() {
        assert!(CategoryHierarchy::new(vec![1, 0]).is_err());
        assert!(CategoryHierarchy::new(vec![2, 1, 2]).is_err());
        assert!(CategoryHierarchy::new(vec![2, 1]).is_ok());
    }

    #[test]
    fn test_relabel_grid() {
        let grid = Raster::from_vec(vec![0, 1, 2, 3], 2, 2, GeoReference::default()).unwrap();
        let hierarchy = CategoryHierarchy::new(vec![3, 1, 2]).unwrap();
        let relabeled = hierarchy.relabel(&grid);
        assert_eq!(relabeled.data().iter().copied().collect::<Vec<_>>(), vec![0, 2, 3, 1]);
    }
}
