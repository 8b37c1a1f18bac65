// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reelshelf_app::{DuplicateMovieId, FieldUpdate, Movie, MovieId, MovieSource};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::Deserialize;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("cannot reach {url} -- is the movie server running? ({source})")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}{}", format_message(.message))]
    Status {
        url: String,
        status: u16,
        message: Option<String>,
    },
    #[error("decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate movie id {0} in listing")]
    DuplicateId(MovieId),
    #[error("invalid url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<DuplicateMovieId> for FetchError {
    fn from(error: DuplicateMovieId) -> Self {
        Self::DuplicateId(error.0)
    }
}

fn format_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

/// Blocking client for the remote movie store.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("server.base_url must not be empty");
        }
        Url::parse(&base_url).with_context(|| format!("parse server.base_url {base_url:?}"))?;

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn list_movies(&self) -> Result<Vec<Movie>, FetchError> {
        let url = self.endpoint("json", &[])?;
        tracing::debug!(%url, "fetching movie listing");
        let response = self.send(self.http.get(url.clone()), &url)?;
        let movies: Vec<Movie> = decode(response, &url)?;
        tracing::info!(count = movies.len(), "loaded movie listing");
        Ok(movies)
    }

    /// Current server copy of one movie, `None` when the server has no such id.
    pub fn fetch_movie(&self, id: MovieId) -> Result<Option<Movie>, FetchError> {
        let url = self.endpoint("update", &[("id", id.to_string())])?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| connect_error(&url, source))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, &url)?;
        decode(response, &url).map(Some)
    }

    pub fn update_field(&self, update: &FieldUpdate) -> Result<(), FetchError> {
        let url = self.endpoint(
            "update",
            &[
                ("id", update.id.to_string()),
                ("field", update.field.as_str().to_owned()),
                ("val", update.value.to_wire()),
            ],
        )?;
        self.send(self.http.put(url.clone()), &url)?;
        tracing::debug!(id = %update.id, field = update.field.as_str(), "update sent");
        Ok(())
    }

    /// Asks the server to re-index its library. Blocks until the scan ends.
    pub fn rescan(&self) -> Result<(), FetchError> {
        let url = self.endpoint("scan", &[])?;
        tracing::info!(%url, "requesting library rescan");
        self.send(self.http.get(url.clone()), &url)?;
        Ok(())
    }

    /// Sends `update` on a detached thread. The outcome goes to `on_done`;
    /// nothing is retried.
    pub fn spawn_update<F>(&self, update: FieldUpdate, on_done: F)
    where
        F: FnOnce(FieldUpdate, Result<(), FetchError>) + Send + 'static,
    {
        let client = self.clone();
        thread::spawn(move || {
            let result = client.update_field(&update);
            if let Err(error) = &result {
                tracing::warn!(id = %update.id, field = update.field.as_str(), %error, "update failed");
            }
            on_done(update, result);
        });
    }

    /// Link target for a movie's path column.
    pub fn movie_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/movies/{path}", self.base_url)
    }

    fn endpoint(&self, route: &str, query: &[(&str, String)]) -> Result<Url, FetchError> {
        let raw = format!("{}/{route}", self.base_url);
        let mut url = Url::parse(&raw).map_err(|source| FetchError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
        url: &Url,
    ) -> Result<Response, FetchError> {
        let response = request
            .send()
            .map_err(|source| connect_error(url, source))?;
        check_status(response, url)
    }
}

impl MovieSource for Client {
    type Error = FetchError;

    fn list_movies(&self) -> Result<Vec<Movie>, FetchError> {
        Client::list_movies(self)
    }
}

fn connect_error(url: &Url, source: reqwest::Error) -> FetchError {
    FetchError::Connect {
        url: without_query(url),
        source,
    }
}

fn check_status(response: Response, url: &Url) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(FetchError::Status {
        url: without_query(url),
        status: status.as_u16(),
        message: clean_error_message(&body),
    })
}

fn decode<T: for<'de> Deserialize<'de>>(response: Response, url: &Url) -> Result<T, FetchError> {
    let body = response.text().map_err(|source| connect_error(url, source))?;
    serde_json::from_str(&body).map_err(|source| FetchError::Decode {
        url: without_query(url),
        source,
    })
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

fn clean_error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return Some(error);
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return Some(trimmed.to_owned());
    }
    None
}

fn without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
