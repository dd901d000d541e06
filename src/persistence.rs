//! Saving and restoring game state and preferences.
//!
//! Storage faults never escape from here: a failed save is skipped and a failed
//! load behaves as if nothing had been saved. Both are logged.

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    config::{BingoConfig, StorageKeys},
    genre::{Answers, Trope},
    library::GenreCatalog,
    marks::MarkedCells,
    pool::TropePool,
    rng::generate_seed,
    state::GameState,
    storage::Storage,
    theme::Theme,
};

/// Schema version written into every saved game.
pub const CURRENT_VERSION: u32 = 1;

/// The stored form of a board: trope ids (`None` for the free space) plus its seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBoard {
    pub tropes: Vec<Option<String>>,
    pub seed: Option<u64>,
}

/// The stored form of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGameState {
    pub version: u32,
    pub selected_genre: Option<String>,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default)]
    pub current_question_index: usize,
    pub board: Option<PersistedBoard>,
    #[serde(default)]
    pub marked_cells: MarkedCells,
    #[serde(default)]
    pub completed_lines: Vec<usize>,
    #[serde(default)]
    pub timestamp: i64,
}

impl PersistedGameState {
    /// Project `state` into its stored form, stamped with `timestamp` in epoch milliseconds.
    pub fn from_state(state: &GameState, timestamp: i64) -> Self {
        Self {
            version: CURRENT_VERSION,
            selected_genre: state.selected_genre.clone(),
            answers: state.answers.clone(),
            current_question_index: state.current_question_index,
            board: state.board.as_ref().map(|board| PersistedBoard {
                tropes: board.trope_ids(),
                seed: Some(state.board_seed),
            }),
            marked_cells: state.marked_cells.clone(),
            completed_lines: state.completed_lines.clone(),
            timestamp,
        }
    }

    /// Rebuild a [`GameState`], looking board tropes up in the genres available now.
    ///
    /// The board is dropped when the saved genre is gone. An id which is no longer in
    /// the genre's trope pool becomes an empty cell, the same as the free space.
    pub fn into_state(self, catalog: &impl GenreCatalog) -> GameState {
        let genre = self.selected_genre.as_deref().and_then(|id| catalog.genre(id));
        let board = match (&self.board, genre) {
            (Some(saved), Some(genre)) => {
                let pool = TropePool::for_genre(genre);
                Some(Board::from_cells(
                    saved
                        .tropes
                        .iter()
                        .map(|id| id.as_deref().and_then(|id| resolve(&pool, id)))
                        .collect(),
                ))
            }
            (Some(_), None) => {
                tracing::warn!(
                    genre = self.selected_genre.as_deref(),
                    "saved board references a missing genre, dropping it"
                );
                None
            }
            (None, _) => None,
        };

        GameState {
            board_seed: self
                .board
                .as_ref()
                .and_then(|board| board.seed)
                .unwrap_or_else(generate_seed),
            selected_genre: self.selected_genre,
            answers: self.answers,
            current_question_index: self.current_question_index,
            board,
            marked_cells: self.marked_cells,
            completed_lines: self.completed_lines,
        }
    }
}

fn resolve(pool: &TropePool<'_>, id: &str) -> Option<Trope> {
    let trope = pool.get(id).cloned();
    if trope.is_none() {
        tracing::warn!(trope = id, "saved trope no longer exists, leaving the cell empty");
    }
    trope
}

/// Game persistence on top of a [`Storage`].
#[derive(Debug, Clone)]
pub struct Store<S> {
    pub(crate) storage: S,
    pub(crate) keys: StorageKeys,
}

impl<S: Storage> Store<S> {
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    pub fn with_config(storage: S, config: &BingoConfig) -> Self {
        Self::new(storage, config.keys.clone())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Save `state`. Failures are logged and the save is skipped.
    pub fn save_game_state(&mut self, state: &GameState) {
        let persisted =
            PersistedGameState::from_state(state, chrono::Utc::now().timestamp_millis());
        let json = match serde_json::to_string(&persisted) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!("failed to encode game state: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.keys.game_state, &json) {
            tracing::error!("failed to save game state: {err}");
        }
    }

    /// Read the raw saved record, `None` when absent, unreadable or from another version.
    ///
    /// A record from another version is cleared.
    pub fn load_persisted(&mut self) -> Option<PersistedGameState> {
        let json = match self.storage.get(&self.keys.game_state) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                tracing::error!("failed to load game state: {err}");
                return None;
            }
        };

        let version = match serde_json::from_str::<serde_json::Value>(&json) {
            Ok(value) => value.get("version").and_then(serde_json::Value::as_u64),
            Err(err) => {
                tracing::error!("failed to load game state: {err}");
                return None;
            }
        };
        if version != Some(u64::from(CURRENT_VERSION)) {
            tracing::warn!(?version, "incompatible game state version, clearing");
            self.clear_game_state();
            return None;
        }

        serde_json::from_str(&json)
            .map_err(|err| tracing::error!("failed to load game state: {err}"))
            .ok()
    }

    /// Load the saved game, reconstructing its board against `catalog`.
    pub fn load_game_state(&mut self, catalog: &impl GenreCatalog) -> Option<GameState> {
        self.load_persisted()
            .map(|persisted| persisted.into_state(catalog))
    }

    pub fn clear_game_state(&mut self) {
        if let Err(err) = self.storage.remove(&self.keys.game_state) {
            tracing::error!("failed to clear game state: {err}");
        }
    }

    pub fn save_theme(&mut self, theme: Theme) {
        if let Err(err) = self.storage.set(&self.keys.theme, theme.as_str()) {
            tracing::error!("failed to save theme: {err}");
        }
    }

    /// The saved theme, or `default` when there is none.
    pub fn load_theme_or(&self, default: Theme) -> Theme {
        self.load_theme().unwrap_or(default)
    }

    /// The saved theme, `None` when absent, unreadable or not a known theme name.
    pub fn load_theme(&self) -> Option<Theme> {
        match self.storage.get(&self.keys.theme) {
            Ok(value) => value.and_then(|value| value.parse().ok()),
            Err(err) => {
                tracing::error!("failed to load theme: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        genre::Genre,
        grid::FREE_SPACE,
        library::GenreLibrary,
        storage::{DisabledStorage, MemoryStorage},
    };

    fn store() -> Store<MemoryStorage> {
        Store::new(MemoryStorage::new(), StorageKeys::default())
    }

    fn played(library: &GenreLibrary) -> GameState {
        let genre = library.genre("horror").unwrap();
        let mut state = GameState::select_genre(genre, 11);
        state.answer_question("decade", "80s".into());
        state.next_question(genre, 12).unwrap();
        state.answer_question("subgenre", ["slasher", "found-footage"].into());
        state.next_question(genre, 13).unwrap();
        for cell in [0, 1, 2, 3, 4, 9] {
            state.toggle_cell(cell).unwrap();
        }
        state
    }

    #[test]
    fn round_trip_restores_board() {
        let library = GenreLibrary::builtin();
        let state = played(&library);
        let mut store = store();

        store.save_game_state(&state);
        let loaded = store.load_game_state(&library).unwrap();

        assert_eq!(loaded, state);
        let ids = loaded.board.as_ref().unwrap().trope_ids();
        assert_eq!(ids, state.board.as_ref().unwrap().trope_ids());
        assert_eq!(ids[FREE_SPACE], None);
    }

    #[test]
    fn record_uses_wire_format() {
        let library = GenreLibrary::builtin();
        let state = played(&library);
        let mut store = store();
        store.save_game_state(&state);

        let json = store.storage().get("tropebingo_game_state").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["selectedGenre"], "horror");
        assert_eq!(value["answers"]["decade"], "80s");
        assert_eq!(value["currentQuestionIndex"], 1);
        assert_eq!(value["board"]["seed"], 13);
        assert_eq!(value["board"]["tropes"].as_array().unwrap().len(), 25);
        assert!(value["board"]["tropes"][FREE_SPACE].is_null());
        assert_eq!(value["markedCells"], serde_json::json!([0, 1, 2, 3, 4, 9]));
        assert_eq!(value["completedLines"], serde_json::json!([0]));
        assert!(value["timestamp"].as_i64().unwrap() > 0);
    }

    #[test]
    fn other_versions_are_discarded() {
        let library = GenreLibrary::builtin();
        let mut store = store();
        let record = r#"{"version":2,"selectedGenre":null,"answers":{},"currentQuestionIndex":0,
            "board":null,"markedCells":[],"completedLines":[],"timestamp":0}"#;
        store.storage.set("tropebingo_game_state", record).unwrap();

        assert!(store.load_game_state(&library).is_none());
        assert_eq!(store.storage().get("tropebingo_game_state").unwrap(), None);
    }

    #[test]
    fn corrupt_records_load_as_absent() {
        let mut store = store();
        store.storage.set("tropebingo_game_state", "{{{").unwrap();
        assert!(store.load_game_state(&GenreLibrary::builtin()).is_none());

        store
            .storage
            .set("tropebingo_game_state", r#"{"version":1,"markedCells":"nope"}"#)
            .unwrap();
        assert!(store.load_game_state(&GenreLibrary::builtin()).is_none());
    }

    #[test]
    fn original_records_load() {
        let record = r#"{"version":1,"selectedGenre":"horror",
            "answers":{"decade":"90s","subgenre":["slasher"]},
            "currentQuestionIndex":1,
            "board":{"tropes":["final-girl",null,"gone"],"seed":1700000000000},
            "markedCells":[0,2],"timestamp":1700000000000}"#;
        let mut store = store();
        store.storage.set("tropebingo_game_state", record).unwrap();

        let state = store.load_game_state(&GenreLibrary::builtin()).unwrap();
        let board = state.board.unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.get(0).unwrap().text, "The final girl");
        assert!(board.get(1).is_none());
        assert!(board.get(2).is_none());
        assert_eq!(state.board_seed, 1_700_000_000_000);
        assert!(state.completed_lines.is_empty());
        assert_eq!(state.marked_cells.len(), 2);
    }

    #[test]
    fn missing_genre_drops_board_only() {
        let library = GenreLibrary::builtin();
        let state = played(&library);
        let mut store = store();
        store.save_game_state(&state);

        let other: Vec<Genre> = Vec::new();
        let loaded = store.load_game_state(&other).unwrap();
        assert!(loaded.board.is_none());
        assert_eq!(loaded.answers, state.answers);
        assert_eq!(loaded.selected_genre.as_deref(), Some("horror"));
        assert_eq!(loaded.restore(&other), GameState::new(13));
    }

    #[test]
    fn storage_faults_degrade() {
        let library = GenreLibrary::builtin();
        let state = played(&library);
        let mut store = Store::new(DisabledStorage, StorageKeys::default());
        store.save_game_state(&state);
        store.clear_game_state();
        store.save_theme(Theme::Light);
        assert!(store.load_game_state(&library).is_none());
        assert!(store.load_theme().is_none());

        let mut full = Store::new(MemoryStorage::with_quota(16), StorageKeys::default());
        full.save_game_state(&state);
        assert!(full.load_game_state(&library).is_none());
    }

    #[test]
    fn theme_round_trip() {
        let mut store = store();
        assert_eq!(store.load_theme(), None);
        store.save_theme(Theme::Light);
        assert_eq!(store.storage().get("tropebingo_theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.load_theme(), Some(Theme::Light));

        store.storage.set("tropebingo_theme", "sepia").unwrap();
        assert_eq!(store.load_theme(), None);
        assert_eq!(store.load_theme_or(BingoConfig::default().default_theme), Theme::Dark);
    }
}
