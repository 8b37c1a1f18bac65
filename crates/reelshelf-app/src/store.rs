// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;

use crate::ids::MovieId;
use crate::model::{FieldUpdate, Movie};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duplicate movie id {0} in listing")]
pub struct DuplicateMovieId(pub MovieId);

/// Anything that can hand over the full movie listing in one blocking call.
pub trait MovieSource {
    type Error: From<DuplicateMovieId>;

    fn list_movies(&self) -> Result<Vec<Movie>, Self::Error>;
}

/// Session-wide list of movies in server response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieStore {
    movies: Vec<Movie>,
    positions: HashMap<MovieId, usize>,
}

impl MovieStore {
    /// Blocks until the source returns the listing. Nothing else in the
    /// session runs before this succeeds.
    pub fn load<S: MovieSource>(source: &S) -> Result<Self, S::Error> {
        let movies = source.list_movies()?;
        Ok(Self::from_movies(movies)?)
    }

    pub fn from_movies(movies: Vec<Movie>) -> Result<Self, DuplicateMovieId> {
        let mut positions = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            if positions.insert(movie.id, position).is_some() {
                return Err(DuplicateMovieId(movie.id));
            }
        }
        Ok(Self { movies, positions })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub fn position_of(&self, id: MovieId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    pub fn find_by_id(&self, id: MovieId) -> Option<&Movie> {
        self.position_of(id).and_then(|position| self.movies.get(position))
    }

    /// Last write wins. Unknown ids are ignored since the remote store stays
    /// the system of record.
    /// Returns false when the id is absent or the field cannot hold the value.
    pub fn apply_field_update(&mut self, update: &FieldUpdate) -> bool {
        let Some(position) = self.position_of(update.id) else {
            return false;
        };
        self.movies
            .get_mut(position)
            .is_some_and(|movie| movie.apply(update.field, &update.value))
    }

    pub fn replace_record(&mut self, movie: Movie) -> bool {
        let Some(position) = self.position_of(movie.id) else {
            return false;
        };
        self.movies[position] = movie;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{DuplicateMovieId, MovieSource, MovieStore};
    use crate::{FieldUpdate, FieldValue, Movie, MovieField, MovieId};

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id: MovieId::new(id),
            path: String::new(),
            byte_length: 0,
            title: title.to_owned(),
            director: String::new(),
            year: 0,
            added_date: String::new(),
            watched: false,
            hash: String::new(),
        }
    }

    struct FixedSource(Vec<Movie>);

    impl MovieSource for FixedSource {
        type Error = anyhow::Error;

        fn list_movies(&self) -> anyhow::Result<Vec<Movie>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn load_keeps_response_order() -> anyhow::Result<()> {
        let store = MovieStore::load(&FixedSource(vec![movie(3, "C"), movie(1, "A")]))?;
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).map(|m| m.id), Some(MovieId::new(3)));
        assert_eq!(store.position_of(MovieId::new(1)), Some(1));
        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = MovieStore::from_movies(vec![movie(1, "A"), movie(1, "B")])
            .expect_err("duplicate ids should fail");
        assert_eq!(error, DuplicateMovieId(MovieId::new(1)));

        let error = MovieStore::load(&FixedSource(vec![movie(2, "A"), movie(2, "B")]))
            .expect_err("load should surface duplicates");
        assert!(error.to_string().contains("duplicate movie id 2"));
    }

    #[test]
    fn apply_field_update_overwrites_in_place() -> anyhow::Result<()> {
        let mut store = MovieStore::from_movies(vec![movie(1, "A"), movie(2, "B")])?;
        assert!(store.apply_field_update(&FieldUpdate {
            id: MovieId::new(2),
            field: MovieField::Title,
            value: FieldValue::Text("Bee".to_owned()),
        }));
        assert_eq!(
            store.find_by_id(MovieId::new(2)).map(|m| m.title.as_str()),
            Some("Bee")
        );
        Ok(())
    }

    #[test]
    fn apply_field_update_ignores_unknown_ids() -> anyhow::Result<()> {
        let mut store = MovieStore::from_movies(vec![movie(1, "A")])?;
        let before = store.clone();
        assert!(!store.apply_field_update(&FieldUpdate {
            id: MovieId::new(99),
            field: MovieField::Title,
            value: FieldValue::Text("ghost".to_owned()),
        }));
        assert_eq!(store, before);
        assert!(store.find_by_id(MovieId::new(99)).is_none());
        Ok(())
    }

    #[test]
    fn replace_record_requires_known_id() -> anyhow::Result<()> {
        let mut store = MovieStore::from_movies(vec![movie(1, "A")])?;
        let mut fresh = movie(1, "A");
        fresh.watched = true;
        assert!(store.replace_record(fresh));
        assert!(store.find_by_id(MovieId::new(1)).is_some_and(|m| m.watched));
        assert!(!store.replace_record(movie(5, "E")));
        Ok(())
    }
}
