/// Side length of the bingo board.
pub const BOARD_SIDE: usize = 5;

/// Number of cells on the bingo board.
pub const BOARD_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// Index of the free space in the center of the board.
pub const FREE_SPACE: usize = 12;

/// A representation of a 2d grid, stored row-major.
///
/// `(0, 0)` is the top left corner; the point `(x, y)` is stored at `y * WIDTH + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T, const WIDTH: usize, const HEIGHT: usize>(Vec<T>);

/// The layout of a bingo board.
pub type BoardGrid<T> = Grid<T, BOARD_SIDE, BOARD_SIDE>;

impl<T, const WIDTH: usize, const HEIGHT: usize> Grid<T, WIDTH, HEIGHT>
where
    T: Default + Clone,
{
    pub fn new() -> Self {
        Grid(vec![T::default(); WIDTH * HEIGHT])
    }
}

impl<T, const WIDTH: usize, const HEIGHT: usize> Default for Grid<T, WIDTH, HEIGHT>
where
    T: Default + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const WIDTH: usize, const HEIGHT: usize> Grid<T, WIDTH, HEIGHT> {
    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    pub fn idx(x: usize, y: usize) -> Option<usize> {
        (x < WIDTH && y < HEIGHT).then_some((y * WIDTH) + x)
    }

    /// Access a cell by its flat index.
    pub fn at(&self, idx: usize) -> Option<&T> {
        self.0.get(idx)
    }

    pub fn at_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.0.get_mut(idx)
    }

    /// Iterate over `(flat index, value)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &T)> {
        self.0.iter().enumerate()
    }
}
