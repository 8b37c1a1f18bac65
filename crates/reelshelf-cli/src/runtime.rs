// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use reelshelf_app::{FieldUpdate, Movie, MovieId, MovieSource, MovieStore};
use reelshelf_client::Client;
use reelshelf_testkit::MovieFaker;
use reelshelf_tui::{AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;

pub struct HttpRuntime {
    client: Client,
}

impl HttpRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for HttpRuntime {
    fn spawn_field_update(
        &mut self,
        update: FieldUpdate,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        self.client.spawn_update(update, move |update, result| {
            let event = match result {
                Ok(()) => InternalEvent::UpdateSent {
                    id: update.id,
                    field: update.field,
                },
                Err(error) => InternalEvent::UpdateFailed {
                    id: update.id,
                    field: update.field,
                    error: error.to_string(),
                },
            };
            if tx.send(event).is_err() {
                tracing::debug!(
                    id = %update.id,
                    field = update.field.as_str(),
                    "event loop gone; dropping update outcome"
                );
            }
        });
        Ok(())
    }

    fn fetch_movie(&mut self, id: MovieId) -> Result<Option<Movie>> {
        self.client
            .fetch_movie(id)
            .with_context(|| format!("fetch movie #{id}"))
    }

    fn movie_link(&self, path: &str) -> String {
        self.client.movie_url(path)
    }
}

/// Stands in for the movie server with a generated library held in memory.
pub struct DemoRuntime {
    server: MovieStore,
}

impl DemoRuntime {
    pub const LIBRARY_SIZE: usize = 400;

    pub fn new(seed: u64) -> Result<Self> {
        let movies = MovieFaker::new(seed).library(Self::LIBRARY_SIZE);
        let server = MovieStore::from_movies(movies).context("seed demo library")?;
        Ok(Self { server })
    }
}

impl MovieSource for DemoRuntime {
    type Error = anyhow::Error;

    fn list_movies(&self) -> Result<Vec<Movie>> {
        Ok(self.server.iter().cloned().collect())
    }
}

impl AppRuntime for DemoRuntime {
    fn spawn_field_update(
        &mut self,
        update: FieldUpdate,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        self.server.apply_field_update(&update);
        tx.send(InternalEvent::UpdateSent {
            id: update.id,
            field: update.field,
        })
        .map_err(|_| anyhow!("internal event channel closed"))?;
        Ok(())
    }

    fn fetch_movie(&mut self, id: MovieId) -> Result<Option<Movie>> {
        Ok(self.server.find_by_id(id).cloned())
    }

    fn movie_link(&self, path: &str) -> String {
        format!("demo://movies{path}")
    }
}
