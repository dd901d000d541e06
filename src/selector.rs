//! Choosing which tropes make it onto a board.

use std::collections::HashSet;

use crate::{
    genre::{Answers, Genre, Trope, TropeSet},
    rng::shuffle,
};

/// How many tropes a board holds besides the free space.
pub const BOARD_TROPES: usize = 24;

/// The answer key consulted when no set matches outright.
const SUBGENRE_ANSWER: &str = "subgenre";
/// The filter key compared against the subgenre answer.
const SUBGENRES_FILTER: &str = "subgenres";

/// Trope sets of `genre` whose filters are satisfied by `answers`, with fallbacks.
///
/// When nothing matches, sets declaring a `subgenres` filter overlapping the
/// `subgenre` answer are used instead; failing that, every set is.
pub fn matching_sets<'a>(genre: &'a Genre, answers: &Answers) -> Vec<&'a TropeSet> {
    let matching: Vec<&TropeSet> = genre
        .trope_sets
        .iter()
        .filter(|set| set.matches(answers))
        .collect();
    if !matching.is_empty() {
        return matching;
    }

    if let Some(subgenre) = answers.get(SUBGENRE_ANSWER) {
        let matching: Vec<&TropeSet> = genre
            .trope_sets
            .iter()
            .filter(|set| {
                set.filters
                    .get(SUBGENRES_FILTER)
                    .is_some_and(|filter| filter.as_slice().iter().any(|sg| subgenre.contains(sg)))
            })
            .collect();
        if !matching.is_empty() {
            return matching;
        }
    }

    tracing::warn!(
        genre = %genre.id,
        "no matching trope sets found, using all available tropes"
    );
    genre.trope_sets.iter().collect()
}

/// Select the tropes for a board from `genre`, filtered by `answers` and shuffled by `seed`.
///
/// Returns exactly [`BOARD_TROPES`] tropes unless the matching sets hold no tropes at all,
/// in which case the result is empty. Short pools are padded with copies whose ids
/// carry a numeric suffix, so the same text can appear more than once.
pub fn select_tropes(genre: &Genre, answers: &Answers, seed: u64) -> Vec<Trope> {
    let sets = matching_sets(genre, answers);

    let mut seen = HashSet::new();
    let mut unique: Vec<Trope> = sets
        .iter()
        .flat_map(|set| set.tropes.iter())
        .filter(|trope| seen.insert(trope.id.clone()))
        .cloned()
        .collect();

    if unique.len() < BOARD_TROPES {
        tracing::warn!(
            genre = %genre.id,
            available = unique.len(),
            "not enough unique tropes, padding to {BOARD_TROPES}"
        );
        pad(&mut unique, &mut seen);
    }

    let mut shuffled = shuffle(&unique, seed);
    shuffled.truncate(BOARD_TROPES);
    shuffled
}

/// Repeat tropes, in order, until there are enough to fill a board.
fn pad(tropes: &mut Vec<Trope>, seen: &mut HashSet<String>) {
    let source_len = tropes.len();
    if source_len == 0 {
        return;
    }

    let needed = BOARD_TROPES - source_len;
    for i in 0..needed {
        let source = &tropes[i % source_len];
        let mut suffix = i;
        let id = loop {
            let candidate = format!("{}-{suffix}", source.id);
            if !seen.contains(&candidate) {
                break candidate;
            }
            suffix += needed;
        };
        seen.insert(id.clone());

        let copy = Trope {
            id,
            ..source.clone()
        };
        tropes.push(copy);
    }
}
