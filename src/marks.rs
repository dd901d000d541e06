use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::grid::{BoardGrid, BOARD_CELLS, FREE_SPACE};

/// The set of cells a viewer has marked.
///
/// The free space is implicitly marked and can never be toggled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedCells {
    marked: BoardGrid<bool>,
    count: usize,
}

impl MarkedCells {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(index: usize) -> Result<(), Error> {
        if index == FREE_SPACE {
            Err(Error::FreeSpace)
        } else if index >= BOARD_CELLS {
            Err(Error::OutOfBounds {
                index,
                cells: BOARD_CELLS,
            })
        } else {
            Ok(())
        }
    }

    /// Flip the mark on `index`, returning whether it is now marked.
    pub fn toggle(&mut self, index: usize) -> Result<bool, Error> {
        Self::check_index(index)?;
        // check_index guarantees the cell exists
        let Some(cell) = self.marked.at_mut(index) else {
            return Err(Error::OutOfBounds {
                index,
                cells: BOARD_CELLS,
            });
        };
        *cell = !*cell;
        if *cell {
            self.count += 1;
        } else {
            self.count -= 1;
        }
        Ok(*cell)
    }

    /// Whether `index` was marked by the viewer. The free space reports `false` here.
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.at(index).copied().unwrap_or(false)
    }

    /// Whether `index` counts towards a line: viewer marked, or the free space.
    pub fn is_satisfied(&self, index: usize) -> bool {
        index == FREE_SPACE || self.is_marked(index)
    }

    /// Number of viewer-marked cells.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Marked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.marked
            .cells()
            .filter_map(|(index, marked)| marked.then_some(index))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl FromIterator<usize> for MarkedCells {
    /// Collect indices into a set, silently dropping the free space and out of range values.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut cells = Self::new();
        for index in iter {
            if Self::check_index(index).is_ok() && !cells.is_marked(index) {
                // cannot fail: the index was just validated
                let _ = cells.toggle(index);
            }
        }
        cells
    }
}

impl Serialize for MarkedCells {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for MarkedCells {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<i64>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|index| usize::try_from(index).ok())
            .collect())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("the free space is always marked and can't be toggled")]
    FreeSpace,
    #[error("cell `{index}` is out of bounds. cells: `{cells}`")]
    OutOfBounds { index: usize, cells: usize },
}
