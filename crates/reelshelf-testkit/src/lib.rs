// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use reelshelf_app::{MIN_YEAR, Movie, MovieId};
use time::format_description::well_known::Rfc3339;
use time::{Date, Duration, Month, OffsetDateTime, Time};

const TITLE_OPENERS: [&str; 16] = [
    "The", "Last", "Night", "Silent", "Red", "Broken", "Lost", "Electric", "Paper", "Winter",
    "Hidden", "Golden", "Long", "Quiet", "Burning", "Empty",
];

const TITLE_NOUNS: [&str; 18] = [
    "Harbor", "Station", "Garden", "Horizon", "Signal", "Orchard", "Frontier", "Mirror",
    "Canyon", "Archive", "Lantern", "Voyage", "Island", "Circuit", "Meridian", "Theory", "Empire",
    "River",
];

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const VOLUMES: [&str; 3] = ["/vol1/movies", "/vol2/film", "/archive/video"];
const EXTENSIONS: [&str; 5] = ["mkv", "mp4", "m4v", "avi", "mpg"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

#[derive(Debug, Clone)]
pub struct MovieFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl MovieFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn movie(&mut self, id: i64) -> Movie {
        let title = self.title();
        let director = format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));
        // Roughly one in eight titles has no known year.
        let year = if self.rng.int_n(8) == 0 {
            0
        } else {
            self.int_range_u16(MIN_YEAR, 2024)
        };
        let extension = self.pick(&EXTENSIONS);
        let path = format!(
            "{}/{}.{extension}",
            self.pick(&VOLUMES),
            title.replace(' ', "_")
        );

        Movie {
            id: MovieId::new(id),
            path,
            byte_length: self.int_range_i64(300_000_000, 9_000_000_000),
            title,
            director: if self.rng.int_n(10) == 0 {
                String::new()
            } else {
                director
            },
            year,
            added_date: self.added_date(),
            watched: self.rng.bool(),
            hash: String::new(),
        }
    }

    /// `count` movies with ids `1..=count`.
    pub fn library(&mut self, count: usize) -> Vec<Movie> {
        (1..=count as i64).map(|id| self.movie(id)).collect()
    }

    fn title(&mut self) -> String {
        if self.rng.bool() {
            format!("{} {}", self.pick(&TITLE_OPENERS), self.pick(&TITLE_NOUNS))
        } else {
            format!(
                "{} {} {}",
                self.pick(&TITLE_OPENERS),
                self.pick(&TITLE_NOUNS),
                self.int_range_u16(2, 4)
            )
        }
    }

    fn added_date(&mut self) -> String {
        let start = reference_added();
        let offset = self.int_range_i64(0, 3 * 365 * 24 * 60 * 60);
        (start + Duration::seconds(offset))
            .format(&Rfc3339)
            .unwrap_or_else(|_| fixture_added_date().to_owned())
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_u16(&mut self, min: u16, max: u16) -> u16 {
        if max <= min {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (self.rng.next_u64() % span) as u16
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Three-movie library used by the filter/sort walkthrough.
pub fn sample_movies() -> Vec<Movie> {
    vec![
        sample_movie(1, "Alpha", "Smith", 2001),
        sample_movie(2, "Beta", "Jones", 1999),
        sample_movie(3, "Gamma", "Smith", 2010),
    ]
}

pub fn sample_movie(id: i64, title: &str, director: &str, year: u16) -> Movie {
    Movie {
        id: MovieId::new(id),
        path: format!("/vol1/movies/{title}.mkv"),
        byte_length: 700_000_000,
        title: title.to_owned(),
        director: director.to_owned(),
        year,
        added_date: fixture_added_date().to_owned(),
        watched: false,
        hash: String::new(),
    }
}

/// Listing body in the remote store's JSON shape.
pub fn listing_json(movies: &[Movie]) -> Result<String> {
    serde_json::to_string(movies).context("encode listing")
}

pub fn fixture_added_date() -> &'static str {
    "2014-03-09T18:22:01Z"
}

fn reference_added() -> OffsetDateTime {
    Date::from_calendar_date(2013, Month::January, 1)
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
