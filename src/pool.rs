use crate::genre::{Genre, Trope};

/// A genre's combined trope pool, indexed by trope id.
///
/// The pool borrows from its genre, so the genre can't be modified while a pool
/// over it exists. When several tropes share an id, the first one in set order wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TropePool<'a>(
    // We maintain the invariant that this vector is sorted by id and free of duplicate ids
    Vec<&'a Trope>,
);

impl<'a> Default for TropePool<'a> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'a> TropePool<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pool over every trope of every set in `genre`.
    pub fn for_genre(genre: &'a Genre) -> Self {
        let mut pool = Self::new();
        pool.extend(genre.all_tropes().collect());
        pool
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look a trope up by id.
    pub fn get(&self, id: &str) -> Option<&'a Trope> {
        self.0
            .binary_search_by(|trope| trope.id.as_str().cmp(id))
            .ok()
            .map(|idx| self.0[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Insert a single trope. If its id is already present, the existing trope is kept.
    ///
    /// If there are many tropes to insert, [`extend`][Self::extend] will likely be more efficient.
    pub fn insert(&mut self, trope: &'a Trope) -> &'a Trope {
        match self.0.binary_search_by(|t| t.id.cmp(&trope.id)) {
            Ok(idx) => self.0[idx],
            Err(idx) => {
                self.0.insert(idx, trope);
                trope
            }
        }
    }

    /// Insert all provided tropes, preserving the first occurrence of each id.
    ///
    /// Tropes must be pre-collected into a vector; existing entries always take
    /// precedence over incoming ones.
    pub fn extend(&mut self, mut tropes: Vec<&'a Trope>) {
        // stable sort: equal ids stay in their incoming order, so dedup keeps the first
        tropes.sort_by(|a, b| a.id.cmp(&b.id));
        tropes.dedup_by(|later, earlier| later.id == earlier.id);

        let mut merged = Vec::with_capacity(self.0.len() + tropes.len());
        let mut left = std::mem::take(&mut self.0).into_iter().peekable();
        let mut right = tropes.into_iter().peekable();

        // merge sort
        while let (Some(existing), Some(incoming)) = (left.peek(), right.peek()) {
            match existing.id.cmp(&incoming.id) {
                std::cmp::Ordering::Less => merged.extend(left.next()),
                std::cmp::Ordering::Greater => merged.extend(right.next()),
                std::cmp::Ordering::Equal => {
                    right.next();
                    merged.extend(left.next());
                }
            }
        }

        merged.extend(left);
        merged.extend(right);
        self.0 = merged;
    }

    /// Iterate over the pool in id order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Trope> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::{FilterValue, TropeSet};

    fn genre() -> Genre {
        Genre {
            id: "horror".into(),
            name: "Horror".into(),
            description: None,
            questions: Vec::new(),
            trope_sets: vec![
                TropeSet::new(
                    Default::default(),
                    vec![Trope::new("jump-scare", "Jump scare"), Trope::new("cat", "Cat scare")],
                ),
                TropeSet::new(
                    [("decade".to_owned(), FilterValue::from("80s"))].into_iter().collect(),
                    vec![Trope::new("cat", "Second cat"), Trope::new("basement", "Basement")],
                ),
            ],
            theme: None,
        }
    }

    #[test]
    fn lookup_prefers_first_occurrence() {
        let genre = genre();
        let pool = TropePool::for_genre(&genre);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get("cat").unwrap().text, "Cat scare");
        assert!(pool.contains("basement"));
        assert!(pool.get("missing").is_none());
    }

    #[test]
    fn pool_is_sorted_by_id() {
        let genre = genre();
        let pool = TropePool::for_genre(&genre);
        let ids: Vec<&str> = pool.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["basement", "cat", "jump-scare"]);
    }

    #[test]
    fn insert_keeps_existing() {
        let first = Trope::new("a", "first");
        let second = Trope::new("a", "second");
        let mut pool = TropePool::new();
        pool.insert(&first);
        assert_eq!(pool.insert(&second).text, "first");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn extend_keeps_existing_over_incoming() {
        let (a, b, b2, c) = (
            Trope::new("a", "a"),
            Trope::new("b", "b"),
            Trope::new("b", "b2"),
            Trope::new("c", "c"),
        );
        let mut pool = TropePool::new();
        pool.extend(vec![&b, &a]);
        pool.extend(vec![&c, &b2]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get("b").unwrap().text, "b");
    }
}
