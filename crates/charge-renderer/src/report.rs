//! Textual summary of a solved configuration

use force_engine::ForceField;

use crate::format::{scientific, scientific_vector};

pub const DISTANCE_TABLE_HEADER: &str = "| Charges | Distance (m) |\n|---------|--------------|\n";

/// Row of the distance table, one per unordered pair
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRow {
    /// `q1-q2`
    pub pair: String,
    /// Distance in scientific notation
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceReport {
    /// `Net force on charge i (N): (x, y, z)` per charge
    pub force_lines: Vec<String>,
    pub distance_rows: Vec<DistanceRow>,
}

impl ForceReport {
    pub fn new(field: &ForceField) -> Self {
        let force_lines = field
            .net_forces()
            .iter()
            .enumerate()
            .map(|(i, f)| {
                format!(
                    "Net force on charge {} (N): {}",
                    i + 1,
                    scientific_vector(f.to_array())
                )
            })
            .collect();

        let distance_rows = field
            .distances()
            .pairs()
            .map(|(i, j, d)| DistanceRow {
                pair: format!("q{}-q{}", i + 1, j + 1),
                distance: scientific(d),
            })
            .collect();

        Self {
            force_lines,
            distance_rows,
        }
    }

    /// Distance table as markdown
    pub fn distance_table(&self) -> String {
        let mut table = String::from(DISTANCE_TABLE_HEADER);
        for row in &self.distance_rows {
            table.push_str(&format!("| {} | {} |\n", row.pair, row.distance));
        }
        table
    }
}
