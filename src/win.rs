//! Completed-line detection on the fixed 5x5 board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    grid::{BoardGrid, BOARD_SIDE},
    marks::MarkedCells,
};

/// The kind of line a win was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineType {
    #[serde(rename = "row")]
    Row,
    #[serde(rename = "col")]
    Column,
    #[serde(rename = "diag-main")]
    MainDiagonal,
    #[serde(rename = "diag-anti")]
    AntiDiagonal,
}

/// A complete row, column or diagonal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine {
    #[serde(rename = "type")]
    pub line_type: LineType,
    /// Row or column number; always 0 for diagonals.
    pub index: usize,
    /// Board indices on the line, in order.
    pub cells: [usize; BOARD_SIDE],
}

impl WinLine {
    fn from_points(
        line_type: LineType,
        index: usize,
        point: impl Fn(usize) -> (usize, usize),
    ) -> Self {
        let mut cells = [0; BOARD_SIDE];
        for (step, cell) in cells.iter_mut().enumerate() {
            let (x, y) = point(step);
            // all points are generated within the board
            *cell = BoardGrid::<bool>::idx(x, y).unwrap_or_default();
        }
        Self {
            line_type,
            index,
            cells,
        }
    }

    pub fn row(row: usize) -> Self {
        Self::from_points(LineType::Row, row, |x| (x, row))
    }

    pub fn column(column: usize) -> Self {
        Self::from_points(LineType::Column, column, |y| (column, y))
    }

    pub fn main_diagonal() -> Self {
        Self::from_points(LineType::MainDiagonal, 0, |step| (step, step))
    }

    pub fn anti_diagonal() -> Self {
        Self::from_points(LineType::AntiDiagonal, 0, |step| (BOARD_SIDE - 1 - step, step))
    }

    /// Every line on the board, rows first, then columns, then the diagonals.
    pub fn all() -> impl Iterator<Item = WinLine> {
        (0..BOARD_SIDE)
            .map(Self::row)
            .chain((0..BOARD_SIDE).map(Self::column))
            .chain([Self::main_diagonal(), Self::anti_diagonal()])
    }

    /// Position of this line in [`WinLine::all`]: rows 0-4, columns 5-9,
    /// main diagonal 10, anti-diagonal 11.
    pub fn ordinal(&self) -> usize {
        match self.line_type {
            LineType::Row => self.index,
            LineType::Column => BOARD_SIDE + self.index,
            LineType::MainDiagonal => 2 * BOARD_SIDE,
            LineType::AntiDiagonal => 2 * BOARD_SIDE + 1,
        }
    }

    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(&cell)
    }

    pub fn is_complete(&self, marked: &MarkedCells) -> bool {
        self.cells.iter().all(|&cell| marked.is_satisfied(cell))
    }
}

impl fmt::Display for WinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_type {
            LineType::Row => write!(f, "Row {}", self.index + 1),
            LineType::Column => write!(f, "Column {}", self.index + 1),
            LineType::MainDiagonal => f.write_str("Main Diagonal"),
            LineType::AntiDiagonal => f.write_str("Anti Diagonal"),
        }
    }
}

/// All lines currently complete, treating the free space as marked.
///
/// Recomputed from scratch on every call.
pub fn detect_wins(marked: &MarkedCells) -> Vec<WinLine> {
    WinLine::all().filter(|line| line.is_complete(marked)).collect()
}

pub fn is_cell_in_winning_line(cell: usize, wins: &[WinLine]) -> bool {
    wins.iter().any(|win| win.contains(cell))
}

/// `true` once every markable cell is marked.
pub fn is_blackout(marked: &MarkedCells) -> bool {
    marked.len() >= BOARD_SIDE * BOARD_SIDE - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn marks(cells: &[usize]) -> MarkedCells {
        cells.iter().copied().collect()
    }

    #[test]
    fn line_geometry() {
        assert_eq!(WinLine::row(2).cells, [10, 11, 12, 13, 14]);
        assert_eq!(WinLine::column(3).cells, [3, 8, 13, 18, 23]);
        assert_eq!(WinLine::main_diagonal().cells, [0, 6, 12, 18, 24]);
        assert_eq!(WinLine::anti_diagonal().cells, [4, 8, 12, 16, 20]);

        let ordinals: Vec<usize> = WinLine::all().map(|line| line.ordinal()).collect();
        assert_eq!(ordinals, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn nothing_marked_nothing_won() {
        assert!(detect_wins(&MarkedCells::new()).is_empty());
    }

    #[test]
    fn first_row() {
        let wins = detect_wins(&marks(&[0, 1, 2, 3, 4]));
        assert_eq!(wins.len(), 1);
        assert_eq!(wins[0].line_type, LineType::Row);
        assert_eq!(wins[0].index, 0);
        assert!(is_cell_in_winning_line(2, &wins));
        assert!(!is_cell_in_winning_line(10, &wins));
    }

    #[rstest]
    #[case(&[0, 6, 18, 24], LineType::MainDiagonal, 0)]
    #[case(&[4, 8, 16, 20], LineType::AntiDiagonal, 0)]
    #[case(&[10, 11, 13, 14], LineType::Row, 2)]
    #[case(&[2, 7, 17, 22], LineType::Column, 2)]
    #[case(&[1, 6, 11, 16, 21], LineType::Column, 1)]
    fn free_space_completes_lines(
        #[case] cells: &[usize],
        #[case] line_type: LineType,
        #[case] index: usize,
    ) {
        let wins = detect_wins(&marks(cells));
        assert_eq!(wins.len(), 1);
        assert_eq!((wins[0].line_type, wins[0].index), (line_type, index));
    }

    #[test]
    fn multiple_lines_at_once() {
        // first row and first column share cell 0
        let wins = detect_wins(&marks(&[0, 1, 2, 3, 4, 5, 10, 15, 20]));
        let names: Vec<String> = wins.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["Row 1", "Column 1"]);
    }

    #[test]
    fn descriptions() {
        assert_eq!(WinLine::row(4).to_string(), "Row 5");
        assert_eq!(WinLine::main_diagonal().to_string(), "Main Diagonal");
        assert_eq!(WinLine::anti_diagonal().to_string(), "Anti Diagonal");
    }

    #[test]
    fn blackout_needs_every_cell() {
        let almost = marks(&(0..24).collect::<Vec<_>>());
        assert!(!is_blackout(&almost));
        let all = marks(&(0..25).collect::<Vec<_>>());
        assert!(is_blackout(&all));
        assert_eq!(detect_wins(&all).len(), 12);
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_value(WinLine::main_diagonal()).unwrap();
        assert_eq!(json["type"], "diag-main");
        assert_eq!(json["cells"], serde_json::json!([0, 6, 12, 18, 24]));
    }
}
