// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::MovieId;
use crate::model::{MIN_YEAR, Movie};

/// Visual counterpart of one materialized movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: MovieId,
    pub title: String,
    pub director: String,
    pub year: u16,
    pub watched: bool,
    pub added: String,
    pub path: String,
}

impl RowView {
    pub fn cells(&self) -> [String; 6] {
        [
            self.title.clone(),
            self.director.clone(),
            if self.year == 0 {
                String::new()
            } else {
                self.year.to_string()
            },
            if self.watched { "[x]" } else { "[ ]" }.to_owned(),
            self.added.clone(),
            self.path.clone(),
        ]
    }
}

pub fn render_row(movie: &Movie) -> RowView {
    RowView {
        id: movie.id,
        title: movie.title.clone(),
        director: movie.director.clone(),
        year: movie.year,
        watched: movie.watched,
        added: movie.added_display().to_owned(),
        path: movie.path.clone(),
    }
}

/// Values offered by the year control: unknown first, then every year up to
/// `current_year`.
pub fn year_options(current_year: u16) -> Vec<u16> {
    std::iter::once(0)
        .chain(MIN_YEAR..=current_year.max(MIN_YEAR))
        .collect()
}

pub trait VisibleSurface {
    fn replace_rows(&mut self, rows: Vec<RowView>);
    fn append_rows(&mut self, rows: Vec<RowView>);
    fn replace_row(&mut self, position: usize, row: RowView);
    fn row_count(&self) -> usize;
    fn row(&self, position: usize) -> Option<&RowView>;

    fn row_id(&self, position: usize) -> Option<MovieId> {
        self.row(position).map(|row| row.id)
    }
}

impl VisibleSurface for Vec<RowView> {
    fn replace_rows(&mut self, rows: Vec<RowView>) {
        *self = rows;
    }

    fn append_rows(&mut self, rows: Vec<RowView>) {
        self.extend(rows);
    }

    fn replace_row(&mut self, position: usize, row: RowView) {
        if let Some(slot) = self.get_mut(position) {
            *slot = row;
        }
    }

    fn row_count(&self) -> usize {
        self.len()
    }

    fn row(&self, position: usize) -> Option<&RowView> {
        self.get(position)
    }
}
