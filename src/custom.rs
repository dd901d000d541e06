//! User-created genres, stored together as one JSON array.

use crate::{genre::Genre, persistence::Store, storage::Storage};

impl<S: Storage> Store<S> {
    /// All saved custom genres. Unreadable or malformed data reads as no genres.
    pub fn custom_genres(&self) -> Vec<Genre> {
        let json = match self.storage.get(&self.keys.custom_genres) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::error!("error loading custom genres: {err}");
                return Vec::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|err| {
            tracing::error!("error loading custom genres: {err}");
            Vec::new()
        })
    }

    fn write_custom_genres(&mut self, genres: &[Genre]) -> Result<(), Error> {
        let json = serde_json::to_string(genres)?;
        self.storage.set(&self.keys.custom_genres, &json)?;
        Ok(())
    }

    /// Save `genre`, replacing a saved genre with the same id.
    pub fn save_custom_genre(&mut self, genre: &Genre) -> Result<(), Error> {
        let mut genres = self.custom_genres();
        match genres.iter_mut().find(|existing| existing.id == genre.id) {
            Some(existing) => *existing = genre.clone(),
            None => genres.push(genre.clone()),
        }
        self.write_custom_genres(&genres).inspect_err(|err| {
            tracing::error!(genre = %genre.id, "error saving custom genre: {err}")
        })
    }

    pub fn delete_custom_genre(&mut self, genre_id: &str) -> Result<(), Error> {
        let mut genres = self.custom_genres();
        genres.retain(|genre| genre.id != genre_id);
        self.write_custom_genres(&genres).inspect_err(|err| {
            tracing::error!(genre = genre_id, "error deleting custom genre: {err}")
        })
    }

    pub fn is_custom_genre(&self, genre_id: &str) -> bool {
        self.custom_genres().iter().any(|genre| genre.id == genre_id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to save genre to storage")]
    Storage(#[from] crate::storage::Error),
    #[error("failed to encode genre")]
    Encode(#[from] serde_json::Error),
}
