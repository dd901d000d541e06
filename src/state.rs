use crate::{
    board::Board,
    genre::{Answer, Answers, Genre, Question},
    library::GenreCatalog,
    marks::{self, MarkedCells},
    selector::select_tropes,
    win::{detect_wins, is_cell_in_winning_line, WinLine},
};

/// Everything about one play session.
///
/// The state owns no genre data: operations that need the genre take it as a parameter,
/// and operations that shuffle take the seed, so every transition is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub selected_genre: Option<String>,
    pub answers: Answers,
    pub current_question_index: usize,
    pub board: Option<Board>,
    pub marked_cells: MarkedCells,
    /// Seed the current board was generated with.
    pub board_seed: u64,
    /// Ordinals of the lines completed so far, see [`WinLine::ordinal`].
    pub completed_lines: Vec<usize>,
}

impl GameState {
    /// A state with nothing selected.
    pub fn new(seed: u64) -> Self {
        Self {
            selected_genre: None,
            answers: Answers::new(),
            current_question_index: 0,
            board: None,
            marked_cells: MarkedCells::new(),
            board_seed: seed,
            completed_lines: Vec::new(),
        }
    }

    /// A fresh state for `genre`. A genre without questions gets its board immediately.
    pub fn select_genre(genre: &Genre, seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.selected_genre = Some(genre.id.clone());
        if genre.questions.is_empty() {
            state.build_board(genre, seed);
        }
        state
    }

    fn check_genre(&self, genre: &Genre) -> Result<(), Error> {
        match &self.selected_genre {
            None => Err(Error::NoGenreSelected),
            Some(selected) if *selected != genre.id => Err(Error::GenreMismatch {
                selected: selected.clone(),
                given: genre.id.clone(),
            }),
            Some(_) => Ok(()),
        }
    }

    pub fn answer_question(&mut self, question_id: impl Into<String>, answer: Answer) {
        self.answers.insert(question_id.into(), answer);
    }

    pub fn current_question<'g>(&self, genre: &'g Genre) -> Option<&'g Question> {
        genre.questions.get(self.current_question_index)
    }

    /// `true` when the current question has a non-empty answer.
    pub fn can_proceed(&self, genre: &Genre) -> bool {
        self.current_question(genre)
            .and_then(|question| self.answers.get(&question.id))
            .is_some_and(|answer| !answer.is_empty())
    }

    /// Move to the next question, or build the board after the last one.
    pub fn next_question(&mut self, genre: &Genre, seed: u64) -> Result<(), Error> {
        self.check_genre(genre)?;
        if self.current_question_index + 1 >= genre.questions.len() {
            self.build_board(genre, seed);
        } else {
            self.current_question_index += 1;
        }
        Ok(())
    }

    pub fn previous_question(&mut self) {
        self.current_question_index = self.current_question_index.saturating_sub(1);
    }

    fn build_board(&mut self, genre: &Genre, seed: u64) {
        let tropes = select_tropes(genre, &self.answers, seed);
        self.board = Some(Board::generate(tropes));
        self.board_seed = seed;
        self.marked_cells.clear();
        self.completed_lines.clear();
    }

    /// Replace the board with a new one built from the current answers.
    ///
    /// Marks and completed lines are cleared.
    pub fn generate_board(&mut self, genre: &Genre, seed: u64) -> Result<(), Error> {
        self.check_genre(genre)?;
        self.build_board(genre, seed);
        Ok(())
    }

    pub fn regenerate_board(&mut self, genre: &Genre, seed: u64) -> Result<(), Error> {
        self.generate_board(genre, seed)
    }

    /// Flip the mark on a board cell, returning whether it is now marked.
    pub fn toggle_cell(&mut self, index: usize) -> Result<bool, Error> {
        if self.board.is_none() {
            return Err(Error::NoBoard);
        }
        // the following line modifies self, so we can't fail past that point
        let marked = self.marked_cells.toggle(index)?;
        self.completed_lines = self.wins().iter().map(WinLine::ordinal).collect();
        Ok(marked)
    }

    /// Lines currently complete. Without a board nothing can be won.
    pub fn wins(&self) -> Vec<WinLine> {
        if self.board.is_some() {
            detect_wins(&self.marked_cells)
        } else {
            Vec::new()
        }
    }

    pub fn has_won(&self) -> bool {
        !self.wins().is_empty()
    }

    pub fn is_cell_in_winning_line(&self, index: usize) -> bool {
        is_cell_in_winning_line(index, &self.wins())
    }

    /// Start over with nothing selected.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Make a state loaded from storage consistent with the genres available now.
    ///
    /// A state whose genre no longer exists is reset; marks and lines are dropped when
    /// there is no board, and recomputed from the marks otherwise.
    pub fn restore(mut self, catalog: &impl GenreCatalog) -> Self {
        let genre = match self.selected_genre.as_deref() {
            None => None,
            Some(id) => match catalog.genre(id) {
                Some(genre) => Some(genre),
                None => {
                    tracing::warn!(genre = id, "saved genre no longer exists, starting over");
                    return Self::new(self.board_seed);
                }
            },
        };

        if let Some(genre) = genre {
            let last = genre.questions.len().saturating_sub(1);
            self.current_question_index = self.current_question_index.min(last);
        }

        if self.board.is_none() {
            self.marked_cells.clear();
            self.completed_lines.clear();
        } else {
            self.completed_lines = self.wins().iter().map(WinLine::ordinal).collect();
        }
        self
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("no genre has been selected")]
    NoGenreSelected,
    #[error("genre `{given}` does not match the selected genre `{selected}`")]
    GenreMismatch { selected: String, given: String },
    #[error("there is no board yet")]
    NoBoard,
    #[error(transparent)]
    Cell(#[from] marks::Error),
}
