//! Table layout: how many rows and columns a deal occupies, and where each
//! slot sits on the table plane.
//!
//! ```
//! use arcana_match::cards::grid_layout;
//!
//! let layout = grid_layout(20);
//! assert_eq!((layout.rows, layout.cols), (4, 5));
//! ```

use serde::{Deserialize, Serialize};

use super::card::Position;
use crate::core::config::TableLayout;

/// Rows and columns of a deal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

impl GridLayout {
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of slots in the grid.
    #[must_use]
    pub const fn capacity(self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    /// Row and column of slot `index`, row-major.
    #[must_use]
    pub fn cell(self, index: usize) -> Option<(u32, u32)> {
        if self.cols == 0 || index as u64 >= self.capacity() {
            return None;
        }
        let cols = self.cols as usize;
        Some(((index / cols) as u32, (index % cols) as u32))
    }

    /// Slot index of `(row, col)`, row-major.
    #[must_use]
    pub fn index(self, row: u32, col: u32) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }
}

impl std::fmt::Display for GridLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Grid for `total_cards` cards.
///
/// The deal sizes used by early levels have hand-picked shapes; everything
/// else is as square as possible with columns filled first.
#[must_use]
pub fn grid_layout(total_cards: u32) -> GridLayout {
    match total_cards {
        0 => GridLayout::new(0, 0),
        8 => GridLayout::new(2, 4),
        12 => GridLayout::new(3, 4),
        16 => GridLayout::new(4, 4),
        20 => GridLayout::new(4, 5),
        n => {
            let cols = ceil_sqrt(n);
            GridLayout::new(n.div_ceil(cols), cols)
        }
    }
}

fn ceil_sqrt(n: u32) -> u32 {
    let n = u64::from(n);
    let mut root = (n as f64).sqrt() as u64;
    while root * root < n {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root as u32
}

/// Centres of the first `count` slots of `layout`, row-major, with the grid
/// centred on the origin.
#[must_use]
pub fn card_positions(layout: GridLayout, count: usize, table: &TableLayout) -> Vec<Position> {
    let x0 = -(layout.cols.saturating_sub(1) as f32) * table.spacing_x / 2.0;
    let y0 = (layout.rows.saturating_sub(1) as f32) * table.spacing_y / 2.0;

    (0..count)
        .map_while(|i| layout.cell(i))
        .map(|(row, col)| Position::new(x0 + col as f32 * table.spacing_x, y0 - row as f32 * table.spacing_y))
        .collect()
}
