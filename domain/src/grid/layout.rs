//! Grid layout (display-only cell spans)

use serde::{Deserialize, Serialize};

/// Number of columns the layout spans are expressed against
pub const GRID_COLUMNS: u8 = 12;

/// Column/row span of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSpan {
    pub cols: u8,
    pub rows: u8,
}

impl CellSpan {
    pub const fn new(cols: u8, rows: u8) -> Self {
        Self { cols, rows }
    }

    pub fn is_full_width(&self) -> bool {
        self.cols >= GRID_COLUMNS
    }
}

impl std::fmt::Display for CellSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

const REFERENCE_CELLS: [CellSpan; 9] = [
    // Opening showcase
    CellSpan::new(8, 8),
    CellSpan::new(4, 4),
    CellSpan::new(4, 4),
    // Feature pair
    CellSpan::new(6, 6),
    CellSpan::new(6, 6),
    // Mixed gallery
    CellSpan::new(4, 4),
    CellSpan::new(4, 4),
    CellSpan::new(4, 4),
    // Statement piece
    CellSpan::new(12, 6),
];

/// Ordered cell spans; the slot count of a gallery is the number of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    cells: Vec<CellSpan>,
}

impl GridLayout {
    pub fn new(cells: Vec<CellSpan>) -> Self {
        Self { cells }
    }

    /// The nine-cell masonry layout
    pub fn reference() -> Self {
        Self::new(REFERENCE_CELLS.to_vec())
    }

    /// A layout with `slot_count` cells, following the reference pattern and
    /// repeating it when more cells are needed
    pub fn with_slot_count(slot_count: usize) -> Self {
        Self::new(REFERENCE_CELLS.iter().copied().cycle().take(slot_count).collect())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn span(&self, index: usize) -> Option<CellSpan> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[CellSpan] {
        &self.cells
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::reference()
    }
}
