use crate::{
    genre::Trope,
    grid::{BOARD_CELLS, FREE_SPACE},
    selector::BOARD_TROPES,
};

/// The cells of a bingo board in row-major order. `None` is the free space.
///
/// A standard board has [`BOARD_CELLS`] cells with the free space at [`FREE_SPACE`];
/// a board built from a short trope list is shorter, and callers must tolerate that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board(Vec<Option<Trope>>);

impl Board {
    /// Lay `tropes` out around a free space spliced in at the center.
    ///
    /// Tropes keep their order: the first twelve fill indices 0-11, the rest 13 onward.
    pub fn generate(tropes: Vec<Trope>) -> Self {
        if tropes.len() != BOARD_TROPES {
            tracing::warn!(
                expected = BOARD_TROPES,
                actual = tropes.len(),
                "unexpected trope count for board"
            );
        }

        let mut cells: Vec<Option<Trope>> = tropes.into_iter().map(Some).collect();
        let center = FREE_SPACE.min(cells.len());
        cells.insert(center, None);
        Self(cells)
    }

    /// A board from already laid out cells, as restored from storage.
    pub fn from_cells(cells: Vec<Option<Trope>>) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Option<Trope>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` for a full 5x5 board.
    pub fn is_complete(&self) -> bool {
        self.0.len() == BOARD_CELLS
    }

    /// The trope at `index`, or `None` for the free space or an index past the end.
    pub fn get(&self, index: usize) -> Option<&Trope> {
        self.0.get(index).and_then(Option::as_ref)
    }

    pub fn trope_by_id(&self, id: &str) -> Option<&Trope> {
        self.0.iter().flatten().find(|trope| trope.id == id)
    }

    /// The id of every cell, `None` for the free space.
    pub fn trope_ids(&self) -> Vec<Option<String>> {
        self.0
            .iter()
            .map(|cell| cell.as_ref().map(|trope| trope.id.clone()))
            .collect()
    }
}

impl From<Vec<Trope>> for Board {
    fn from(tropes: Vec<Trope>) -> Self {
        Self::generate(tropes)
    }
}

/// Lay 24 tropes out on a board around the free space.
pub fn generate_board(tropes: Vec<Trope>) -> Board {
    Board::generate(tropes)
}
