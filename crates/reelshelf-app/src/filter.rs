// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::Movie;

/// Lowercased free-text filter split into whitespace tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    text: String,
    tokens: Vec<String>,
}

impl FilterQuery {
    pub fn parse(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let tokens = text.split_whitespace().map(str::to_owned).collect();
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when every record rejected by `previous` is also rejected by
    /// `self`, detected by substring containment of the raw text.
    pub fn narrows(&self, previous: &FilterQuery) -> bool {
        self.text.contains(previous.text.as_str())
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        if self.tokens.is_empty() {
            return true;
        }

        let title = movie.title.to_lowercase();
        let director = movie.director.to_lowercase();
        let year = movie.year.to_string();
        self.tokens.iter().all(|token| {
            title.contains(token.as_str())
                || director.contains(token.as_str())
                || year.contains(token.as_str())
        })
    }
}
