//! Disk-shaped structuring element for categorical dilation

use rastergeo_core::{Error, Result};

/// Circular structuring element: every integer offset `(dr, dc)` with
/// `dr² + dc² <= radius²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskElement {
    radius: usize,
}

impl DiskElement {
    /// Create a disk of the given radius in pixels
    pub fn new(radius: usize) -> Result<Self> {
        if radius == 0 {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: "0".to_string(),
                reason: "structuring element radius must be at least 1".to_string(),
            });
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Whether a relative position lies inside the disk
    pub fn contains(&self, dr: isize, dc: isize) -> bool {
        let r = self.radius as isize;
        dr * dr + dc * dc <= r * r
    }

    /// (dr, dc) offsets relative to the center for all active cells, row-major
    pub fn offsets(&self) -> Vec<(isize, isize)> {
        let r = self.radius as isize;
        let mut offsets = Vec::new();
        for dr in -r..=r {
            for dc in -r..=r {
                if self.contains(dr, dc) {
                    offsets.push((dr, dc));
                }
            }
        }
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_one_is_a_cross() {
        let offsets = DiskElement::new(1).unwrap().offsets();
        // Center + 4 cardinal; diagonals are sqrt(2) > 1
        assert_eq!(offsets.len(), 5);
        assert!(offsets.contains(&(0, 0)));
        assert!(offsets.contains(&(-1, 0)));
        assert!(offsets.contains(&(0, 1)));
        assert!(!offsets.contains(&(1, 1)));
    }

    #[test]
    fn test_radius_two() {
        let disk = DiskElement::new(2).unwrap();
        assert_eq!(disk.offsets().len(), 13);
        assert!(disk.contains(0, 2));
        assert!(disk.contains(1, 1));
        assert!(!disk.contains(2, 1));
    }

    #[test]
    fn test_offsets_are_symmetric_and_bounded() {
        let disk = DiskElement::new(5).unwrap();
        let offsets = disk.offsets();
        for &(dr, dc) in &offsets {
            assert!(dr.abs() <= 5 && dc.abs() <= 5);
            assert!(offsets.contains(&(-dr, -dc)));
        }
    }

    #[test]
    fn test_zero_radius_rejected() {
        assert!(DiskElement::new(0).is_err());
    }
}
