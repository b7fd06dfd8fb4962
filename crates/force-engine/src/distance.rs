//! Symmetric pairwise distance matrix

/// Dense N×N matrix of distances in meters.
///
/// Both `[i][j]` and `[j][i]` hold the same value and the diagonal is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    len: usize,
    // Row-major
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// All-zero matrix for `len` charges
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            values: vec![0.0; len * len],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance between charges `i` and `j`
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.len && j < self.len, "distance index out of range");
        self.values[i * self.len + j]
    }

    /// Store the distance of an unordered pair in both halves
    pub(crate) fn set_pair(&mut self, i: usize, j: usize, distance: f64) {
        self.values[i * self.len + j] = distance;
        self.values[j * self.len + i] = distance;
    }

    /// Unordered pairs `(i, j, distance)` with `i < j`, in row order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.len).flat_map(move |i| ((i + 1)..self.len).map(move |j| (i, j, self.get(i, j))))
    }

    /// Largest pairwise distance, zero for fewer than two charges
    pub fn max_distance(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}
