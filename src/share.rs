//! Sharing genres as links and exporting them as files.

use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose},
    Engine as _,
};

use crate::{custom, genre::Genre, persistence::Store, storage::Storage};

/// Marks the start of an encoded genre in a URL fragment.
pub const SHARE_MARKER: &str = "#share=";

/// URL-safe alphabet without padding; decoding accepts padded input too.
const SHARE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode `genre` as a URL-safe token.
pub fn encode_genre_to_url(genre: &Genre) -> Result<String, Error> {
    let json = serde_json::to_string(genre)?;
    Ok(SHARE_ENGINE.encode(json))
}

/// Decode a token produced by [`encode_genre_to_url`]. Any failure gives `None`.
///
/// Tokens in the standard base64 alphabet are accepted as well.
pub fn decode_genre_from_url(encoded: &str) -> Option<Genre> {
    let normalized: String = encoded
        .trim()
        .chars()
        .map(|ch| match ch {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = SHARE_ENGINE
        .decode(normalized)
        .map_err(|err| tracing::error!("error decoding genre from url: {err}"))
        .ok()?;
    let json = String::from_utf8(bytes)
        .map_err(|err| tracing::error!("error decoding genre from url: {err}"))
        .ok()?;
    serde_json::from_str(&json)
        .map_err(|err| tracing::error!("error decoding genre from url: {err}"))
        .ok()
}

/// A link to `base_url` carrying `genre` in its fragment.
pub fn create_share_url(base_url: &str, genre: &Genre) -> Result<String, Error> {
    let base = base_url.split('#').next().unwrap_or(base_url);
    Ok(format!("{base}{SHARE_MARKER}{}", encode_genre_to_url(genre)?))
}

/// The genre carried by a URL fragment such as `#share=...`, if any.
pub fn shared_genre_from_hash(hash: &str) -> Option<Genre> {
    decode_genre_from_url(hash.strip_prefix(SHARE_MARKER)?)
}

/// Save a genre received through a link among the custom genres.
///
/// The `Ok` message is meant for the user; so is the `Display` of the error.
pub fn import_shared_genre<S: Storage>(
    store: &mut Store<S>,
    genre: &Genre,
) -> Result<String, Error> {
    store.save_custom_genre(genre)?;
    Ok(format!("\"{}\" has been imported successfully!", genre.name))
}

/// A genre ready to be written out as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreExport {
    pub file_name: String,
    pub contents: String,
}

/// Pretty-printed JSON of `genre`, named `<id>-genre.json`.
pub fn export_genre(genre: &Genre) -> Result<GenreExport, Error> {
    Ok(GenreExport {
        file_name: format!("{}-genre.json", genre.id),
        contents: serde_json::to_string_pretty(genre)?,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to encode genre: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to import genre: {0}")]
    Import(#[from] custom::Error),
}
