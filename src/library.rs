//! Where genres come from: the bundled set, genre files on disk and user-made genres.

use std::{fs, io, path::Path};

use crate::{config::BingoConfig, genre::Genre, persistence::Store, storage::Storage};

const BUILTIN_GENRES: &[(&str, &str)] = &[("horror", include_str!("../genres/horror.json"))];

/// Read access to a list of genres.
pub trait GenreCatalog {
    /// All genres in a stable order.
    fn genres(&self) -> &[Genre];

    fn genre(&self, id: &str) -> Option<&Genre> {
        self.genres().iter().find(|genre| genre.id == id)
    }

    fn has_genre(&self, id: &str) -> bool {
        self.genre(id).is_some()
    }
}

impl GenreCatalog for [Genre] {
    fn genres(&self) -> &[Genre] {
        self
    }
}

impl GenreCatalog for Vec<Genre> {
    fn genres(&self) -> &[Genre] {
        self
    }
}

/// An ordered collection of genres assembled from several sources.
///
/// Genres are listed in the order their sources were added; lookups return the
/// first genre with a matching id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreLibrary(Vec<Genre>);

impl GenreLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding only the bundled genres.
    pub fn builtin() -> Self {
        let mut library = Self::new();
        library.add_builtin();
        library
    }

    /// Everything available to play: bundled genres, then the configured genre
    /// directory, then the custom genres saved in `store`.
    pub fn assemble<S: Storage>(config: &BingoConfig, store: &Store<S>) -> Self {
        let mut library = Self::builtin();
        if let Some(dir) = &config.genre_dir {
            if let Err(err) = library.load_dir(dir) {
                tracing::error!("{err}");
            }
        }
        library.extend(store.custom_genres());
        library
    }

    /// Add the genres bundled with the crate. A bundled genre which fails to parse is skipped.
    pub fn add_builtin(&mut self) {
        for (name, json) in BUILTIN_GENRES {
            match serde_json::from_str(json) {
                Ok(genre) => self.0.push(genre),
                Err(err) => tracing::error!(genre = name, "error loading bundled genre: {err}"),
            }
        }
    }

    /// Add every `*.json` file in `dir` as a genre, in file name order.
    ///
    /// Files which can't be read or parsed are logged and skipped. Returns how many
    /// genres were added.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, Error> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|source| Error::ReadDir {
            dir: dir.display().to_string(),
            source,
        })? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    tracing::error!(dir = %dir.display(), "error listing genre directory: {err}");
                    continue;
                }
            };
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut added = 0;
        for path in paths {
            match load_file(&path) {
                Ok(genre) => {
                    self.0.push(genre);
                    added += 1;
                }
                Err(err) => tracing::error!(path = %path.display(), "error loading genre: {err}"),
            }
        }
        Ok(added)
    }

    pub fn push(&mut self, genre: Genre) {
        self.0.push(genre);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn load_file(path: &Path) -> Result<Genre, Error> {
    let json = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::Parse {
        path: path.display().to_string(),
        source,
    })
}

impl GenreCatalog for GenreLibrary {
    fn genres(&self) -> &[Genre] {
        &self.0
    }
}

impl Extend<Genre> for GenreLibrary {
    fn extend<I: IntoIterator<Item = Genre>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Genre> for GenreLibrary {
    fn from_iter<I: IntoIterator<Item = Genre>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("can't read genre directory `{dir}`")]
    ReadDir {
        dir: String,
        #[source]
        source: io::Error,
    },
    #[error("can't read genre file `{path}`")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("genre file `{path}` is not a valid genre")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        genre::Answers,
        selector::{select_tropes, BOARD_TROPES},
        storage::MemoryStorage,
    };

    fn minimal(id: &str) -> Genre {
        Genre {
            id: id.into(),
            name: id.to_uppercase(),
            description: None,
            questions: Vec::new(),
            trope_sets: Vec::new(),
            theme: None,
        }
    }

    #[test]
    fn builtin_horror_is_playable() {
        let library = GenreLibrary::builtin();
        let horror = library.genre("horror").expect("bundled horror genre");
        assert!(!horror.questions.is_empty());
        assert!(horror.theme.is_some());
        assert_eq!(select_tropes(horror, &Answers::new(), 1).len(), BOARD_TROPES);
    }

    #[test]
    fn lookup_prefers_first_source() {
        let mut library = GenreLibrary::new();
        library.push(minimal("a"));
        library.extend([minimal("b"), Genre { name: "Shadow".into(), ..minimal("a") }]);
        assert_eq!(library.len(), 3);
        assert_eq!(library.genre("a").unwrap().name, "A");
        assert!(library.has_genre("b"));
        assert!(!library.has_genre("c"));
    }

    #[test]
    fn loads_json_files_and_skips_broken_ones() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b-western.json"),
            serde_json::to_string(&minimal("western")).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("a-noir.json"),
            serde_json::to_string(&minimal("noir")).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join(".gitkeep"), "").unwrap();

        let mut library = GenreLibrary::new();
        assert_eq!(library.load_dir(dir.path()).unwrap(), 2);
        let ids: Vec<&str> = library.genres().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["noir", "western"]);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut library = GenreLibrary::new();
        assert!(matches!(
            library.load_dir(dir.path().join("nope")),
            Err(Error::ReadDir { .. })
        ));
    }

    #[test]
    fn assemble_orders_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("noir.json"),
            serde_json::to_string(&minimal("noir")).unwrap(),
        )
        .unwrap();
        let config = BingoConfig {
            genre_dir: Some(dir.path().to_owned()),
            ..BingoConfig::default()
        };
        let mut store = Store::new(MemoryStorage::new(), config.keys.clone());
        store.save_custom_genre(&minimal("mine")).unwrap();

        let library = GenreLibrary::assemble(&config, &store);
        let ids: Vec<&str> = library.genres().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["horror", "noir", "mine"]);

        let missing = BingoConfig {
            genre_dir: Some(dir.path().join("nope")),
            ..BingoConfig::default()
        };
        assert_eq!(GenreLibrary::assemble(&missing, &store).len(), 2);
    }

    #[test]
    fn slices_are_catalogs() {
        let genres = vec![minimal("x")];
        assert!(genres.has_genre("x"));
        assert!(genres.as_slice().genre("y").is_none());
    }
}
