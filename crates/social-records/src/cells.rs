//! Decision cells for the social graph sheet.
//!
//! The simulation only knows persona indices. A [`FollowCell`] says "the cell
//! for row persona `row`, column persona `column` holds `value`"; where that
//! lands in an actual sheet is decided by a [`CellLayout`].

use serde::{Deserialize, Serialize};

use crate::marker::FollowMarker;

/// A decision value keyed by roster indices (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowCell {
    pub row: usize,
    pub column: usize,
    pub value: FollowMarker,
}

impl FollowCell {
    pub fn new(row: usize, column: usize, value: FollowMarker) -> Self {
        Self { row, column, value }
    }
}

/// Where roster index 0 lands in the sheet (1-based row/column numbers).
///
/// The defaults match the social graph sheet: one header row, and decision
/// columns shifted right past the name/handle/faction columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellLayout {
    pub first_row: usize,
    pub first_column: usize,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            first_row: 2,
            first_column: 4,
        }
    }
}

impl CellLayout {
    pub fn new(first_row: usize, first_column: usize) -> Self {
        Self {
            first_row,
            first_column,
        }
    }

    pub fn address(&self, cell: &FollowCell) -> AddressedCell {
        let row = self.first_row + cell.row;
        let column = self.first_column + cell.column;
        AddressedCell {
            row,
            column,
            reference: format!("{}{}", column_letters(column), row),
            value: cell.value,
        }
    }
}

/// A cell with its absolute sheet position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressedCell {
    pub row: usize,
    pub column: usize,
    /// A1-style reference, e.g. `E3`
    pub reference: String,
    pub value: FollowMarker,
}

/// Everything a sheet writer needs to overwrite the decision cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSheet {
    pub layout: CellLayout,
    pub cells: Vec<AddressedCell>,
}

impl CellSheet {
    pub fn from_cells(layout: CellLayout, cells: &[FollowCell]) -> Self {
        Self {
            layout,
            cells: cells.iter().map(|c| layout.address(c)).collect(),
        }
    }
}

/// Spreadsheet column letters for a 1-based column number. Zero maps to an
/// empty string.
pub fn column_letters(column: usize) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(4), "D");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(703), "AAA");
        assert_eq!(column_letters(0), "");
    }

    #[test]
    fn test_default_layout_offsets() {
        let layout = CellLayout::default();
        let addressed = layout.address(&FollowCell::new(0, 1, FollowMarker::Inbound));

        assert_eq!(addressed.row, 2);
        assert_eq!(addressed.column, 5);
        assert_eq!(addressed.reference, "E2");
        assert_eq!(addressed.value, FollowMarker::Inbound);
    }

    #[test]
    fn test_cell_sheet_preserves_order() {
        let cells = vec![
            FollowCell::new(0, 2, FollowMarker::Mutual),
            FollowCell::new(2, 0, FollowMarker::Mutual),
        ];
        let sheet = CellSheet::from_cells(CellLayout::new(1, 1), &cells);

        assert_eq!(sheet.cells.len(), 2);
        assert_eq!(sheet.cells[0].reference, "C1");
        assert_eq!(sheet.cells[1].reference, "A3");
    }

    #[test]
    fn test_partial_layout_deserializes_with_defaults() {
        let layout: CellLayout = serde_json::from_str(r#"{"first_row": 5}"#).unwrap();
        assert_eq!(layout, CellLayout::new(5, 4));
    }
}
