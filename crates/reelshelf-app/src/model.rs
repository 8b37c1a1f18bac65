// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::OffsetDateTime;

use crate::ids::MovieId;

pub const MIN_YEAR: u16 = 1920;
const ADDED_DISPLAY_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "Id")]
    pub id: MovieId,
    #[serde(rename = "Path", default)]
    pub path: String,
    #[serde(rename = "Byte_length", default)]
    pub byte_length: i64,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Year", default)]
    pub year: u16,
    #[serde(rename = "Added_date", default)]
    pub added_date: String,
    #[serde(rename = "Watched", default)]
    pub watched: bool,
    #[serde(rename = "Hash", default)]
    pub hash: String,
}

impl Movie {
    /// Date portion of the ISO-8601 added timestamp.
    pub fn added_display(&self) -> &str {
        match self.added_date.char_indices().nth(ADDED_DISPLAY_CHARS) {
            Some((end, _)) => &self.added_date[..end],
            None => &self.added_date,
        }
    }

    pub fn value(&self, field: MovieField) -> FieldValue {
        match field {
            MovieField::Title => FieldValue::Text(self.title.clone()),
            MovieField::Director => FieldValue::Text(self.director.clone()),
            MovieField::Year => FieldValue::Year(self.year),
            MovieField::Watched => FieldValue::Flag(self.watched),
            MovieField::AddedDate => FieldValue::Text(self.added_date.clone()),
            MovieField::Path => FieldValue::Text(self.path.clone()),
        }
    }

    /// Overwrites one editable field. Returns false when the value kind does
    /// not belong to the field or the field is read-only.
    pub fn apply(&mut self, field: MovieField, value: &FieldValue) -> bool {
        match (field, value) {
            (MovieField::Title, FieldValue::Text(text)) => self.title = text.clone(),
            (MovieField::Director, FieldValue::Text(text)) => self.director = text.clone(),
            (MovieField::Year, FieldValue::Year(year)) => self.year = *year,
            (MovieField::Watched, FieldValue::Flag(flag)) => self.watched = *flag,
            _ => return false,
        }
        true
    }

    pub fn cmp_field(&self, other: &Self, field: MovieField) -> Ordering {
        match field {
            MovieField::Title => cmp_text(&self.title, &other.title),
            MovieField::Director => cmp_text(&self.director, &other.director),
            MovieField::Year => self.year.cmp(&other.year),
            MovieField::Watched => self.watched.cmp(&other.watched),
            MovieField::AddedDate => self.added_date.cmp(&other.added_date),
            MovieField::Path => cmp_text(&self.path, &other.path),
        }
    }
}

// Case-insensitive, with raw bytes breaking ties.
fn cmp_text(left: &str, right: &str) -> Ordering {
    left.to_ascii_lowercase()
        .cmp(&right.to_ascii_lowercase())
        .then_with(|| left.cmp(right))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovieField {
    Title,
    Director,
    Year,
    Watched,
    AddedDate,
    Path,
}

impl MovieField {
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Director,
        Self::Year,
        Self::Watched,
        Self::AddedDate,
        Self::Path,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Director => "director",
            Self::Year => "year",
            Self::Watched => "watched",
            Self::AddedDate => "added_date",
            Self::Path => "path",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "director" => Some(Self::Director),
            "year" => Some(Self::Year),
            "watched" => Some(Self::Watched),
            "added_date" | "added" => Some(Self::AddedDate),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Director => "director",
            Self::Year => "year",
            Self::Watched => "watched",
            Self::AddedDate => "added",
            Self::Path => "path",
        }
    }

    pub const fn column(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Director => 1,
            Self::Year => 2,
            Self::Watched => 3,
            Self::AddedDate => 4,
            Self::Path => 5,
        }
    }

    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.get(column).copied()
    }

    pub const fn value_kind(self) -> Option<FieldValueKind> {
        match self {
            Self::Title | Self::Director => Some(FieldValueKind::Text),
            Self::Year => Some(FieldValueKind::Year),
            Self::Watched => Some(FieldValueKind::Flag),
            Self::AddedDate | Self::Path => None,
        }
    }

    pub const fn is_editable(self) -> bool {
        self.value_kind().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValueKind {
    Text,
    Year,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Year(u16),
    Flag(bool),
}

impl FieldValue {
    pub fn parse_for_field(field: MovieField, raw: &str, current_year: u16) -> Result<Self> {
        let Some(kind) = field.value_kind() else {
            bail!("{} is read-only", field.label());
        };

        match kind {
            FieldValueKind::Text => Ok(Self::Text(strip_line_breaks(raw))),
            FieldValueKind::Year => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(Self::Year(0));
                }
                let Ok(year) = trimmed.parse::<u16>() else {
                    bail!("year must be a number, got {trimmed:?}");
                };
                if year != 0 && !(MIN_YEAR..=current_year).contains(&year) {
                    bail!("year must be between {MIN_YEAR} and {current_year}, got {year}");
                }
                Ok(Self::Year(year))
            }
            FieldValueKind::Flag => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => Ok(Self::Flag(true)),
                "0" | "false" | "off" | "no" => Ok(Self::Flag(false)),
                other => bail!("watched must be true or false, got {other:?}"),
            },
        }
    }

    pub const fn kind(&self) -> FieldValueKind {
        match self {
            Self::Text(_) => FieldValueKind::Text,
            Self::Year(_) => FieldValueKind::Year,
            Self::Flag(_) => FieldValueKind::Flag,
        }
    }

    pub fn to_wire(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Year(year) => year.to_string(),
            Self::Flag(flag) => flag.to_string(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Year(0) => String::new(),
            Self::Year(year) => year.to_string(),
            Self::Flag(true) => "yes".to_owned(),
            Self::Flag(false) => "no".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub id: MovieId,
    pub field: MovieField,
    pub value: FieldValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Browse,
    Filter,
    Edit(MovieField),
}

pub fn current_year() -> u16 {
    u16::try_from(OffsetDateTime::now_utc().year()).unwrap_or(u16::MAX)
}

fn strip_line_breaks(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
