//! Movie trope bingo: boards of genre tropes, marked while watching.
//!
//! Boards are built deterministically from a genre, the viewer's answers and a seed.
//! [`GameState`] tracks a session; [`Store`] persists it into any [`Storage`].

mod board;
mod config;
mod custom;
mod genre;
mod grid;
mod library;
mod marks;
mod persistence;
mod pool;
mod rng;
mod selector;
mod share;
mod slug;
mod state;
mod storage;
mod theme;
mod win;

pub use board::{generate_board, Board};
pub use config::{BingoConfig, Error as ConfigError, StorageKeys};
pub use custom::Error as CustomGenreError;
pub use genre::{
    Answer, Answers, FilterValue, Filters, Genre, Question, QuestionKind, QuestionOption, Trope,
    TropeSet,
};
pub use grid::{BoardGrid, Grid, BOARD_CELLS, BOARD_SIDE, FREE_SPACE};
pub use library::{Error as LibraryError, GenreCatalog, GenreLibrary};
pub use marks::{Error as CellError, MarkedCells};
pub use persistence::{PersistedBoard, PersistedGameState, Store, CURRENT_VERSION};
pub use pool::TropePool;
pub use rng::{generate_seed, shuffle, SeededRandom};
pub use selector::{matching_sets, select_tropes, BOARD_TROPES};
pub use share::{
    create_share_url, decode_genre_from_url, encode_genre_to_url, export_genre,
    import_shared_genre, shared_genre_from_hash, Error as ShareError, GenreExport, SHARE_MARKER,
};
pub use slug::{slugify, unique_slug};
pub use state::{Error as StateError, GameState};
pub use storage::{DisabledStorage, Error as StorageError, FileStorage, MemoryStorage, Storage};
pub use theme::{GenreTheme, Theme, ThemeColors, UnknownTheme};
pub use win::{detect_wins, is_blackout, is_cell_in_winning_line, LineType, WinLine};
