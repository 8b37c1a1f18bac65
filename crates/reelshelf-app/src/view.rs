// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::mpsc::Sender;

use crate::filter::FilterQuery;
use crate::ids::MovieId;
use crate::model::{FieldUpdate, FieldValue, Movie, MovieField, SortDirection};
use crate::row::{RowView, VisibleSurface, render_row};
use crate::store::MovieStore;

pub const DEFAULT_INITIAL_BATCH: usize = 50;
pub const DEFAULT_INCREMENT_BATCH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    pub initial: usize,
    pub increment: usize,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL_BATCH,
            increment: DEFAULT_INCREMENT_BATCH,
        }
    }
}

/// Receives write-through edits. Delivery is fire-and-forget: the controller
/// never waits on, retries, or rolls back a sent update.
pub trait UpdateSink {
    fn send_update(&mut self, update: FieldUpdate);
}

impl UpdateSink for Vec<FieldUpdate> {
    fn send_update(&mut self, update: FieldUpdate) {
        self.push(update);
    }
}

impl UpdateSink for Sender<FieldUpdate> {
    fn send_update(&mut self, update: FieldUpdate) {
        // A closed outbox means the event loop is shutting down.
        if let Err(error) = self.send(update) {
            let update = error.0;
            tracing::debug!(
                id = %update.id,
                field = update.field.as_str(),
                "update outbox closed; dropping edit"
            );
        }
    }
}

/// Keeps the visible projection of a [`MovieStore`] in step with filter,
/// sort, and incremental materialization.
///
/// `projection` holds store positions in display order and is always a
/// subsequence of `display_order`, the full permutation produced by every
/// sort applied so far. Visible rows on the surface correspond exactly to
/// `projection[..materialized]`.
///
/// Refining only holds while every record outside the projection still fails
/// the active filter. Any store change since the last rescan sets
/// `stale_filter` and forces the next filter through a rescan.
#[derive(Debug)]
pub struct TableViewController<S, U> {
    store: MovieStore,
    display_order: Vec<usize>,
    projection: Vec<usize>,
    materialized: usize,
    sort_memory: BTreeMap<MovieField, SortDirection>,
    filter: FilterQuery,
    stale_filter: bool,
    policy: BatchPolicy,
    surface: S,
    sink: U,
}

impl<S: VisibleSurface, U: UpdateSink> TableViewController<S, U> {
    pub fn new(store: MovieStore, surface: S, sink: U, policy: BatchPolicy) -> Self {
        let display_order: Vec<usize> = (0..store.len()).collect();
        Self {
            projection: display_order.clone(),
            display_order,
            store,
            materialized: 0,
            sort_memory: BTreeMap::new(),
            filter: FilterQuery::default(),
            stale_filter: false,
            policy,
            surface,
            sink,
        }
    }

    pub fn store(&self) -> &MovieStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn sink(&self) -> &U {
        &self.sink
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn projection(&self) -> &[usize] {
        &self.projection
    }

    pub fn projected_ids(&self) -> Vec<MovieId> {
        self.projection
            .iter()
            .filter_map(|position| self.store.get(*position).map(|movie| movie.id))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.projection.len()
    }

    pub fn materialized(&self) -> usize {
        self.materialized
    }

    pub fn is_exhausted(&self) -> bool {
        self.materialized == self.projection.len()
    }

    pub fn filter_text(&self) -> &str {
        self.filter.text()
    }

    pub fn next_direction(&self, field: MovieField) -> SortDirection {
        self.sort_memory
            .get(&field)
            .copied()
            .unwrap_or(SortDirection::Asc)
    }

    pub fn row_id(&self, row: usize) -> Option<MovieId> {
        self.surface.row_id(row)
    }

    pub fn movie_at_row(&self, row: usize) -> Option<&Movie> {
        if row >= self.materialized {
            return None;
        }
        self.projection
            .get(row)
            .and_then(|position| self.store.get(*position))
    }

    /// Returns false when the normalized text equals the active filter and
    /// nothing was recomputed.
    pub fn apply_filter(&mut self, raw: &str) -> bool {
        let query = FilterQuery::parse(raw);
        if query.text() == self.filter.text() {
            return false;
        }

        let projection = if query.narrows(&self.filter) && !self.stale_filter {
            self.refine(&query)
        } else {
            self.stale_filter = false;
            self.rescan(&query)
        };
        self.projection = projection;
        self.filter = query;
        self.materialize_initial();
        true
    }

    /// Sorts by `field` in its remembered direction, flips the memory for the
    /// next call, and returns the direction just applied.
    pub fn apply_sort(&mut self, field: MovieField) -> SortDirection {
        let direction = *self
            .sort_memory
            .entry(field)
            .or_insert(SortDirection::Asc);

        sort_positions(&self.store, &mut self.display_order, field, direction);
        sort_positions(&self.store, &mut self.projection, field, direction);

        self.sort_memory.insert(field, direction.toggled());
        self.materialize_initial();
        direction
    }

    pub fn materialize_initial(&mut self) -> usize {
        let count = self.policy.initial.min(self.projection.len());
        let rows = self.render_range(0..count);
        self.surface.replace_rows(rows);
        self.materialized = count;
        count
    }

    /// Appends the next batch and returns how many rows were added; zero once
    /// the projection is exhausted.
    pub fn materialize_more(&mut self) -> usize {
        let end = self
            .materialized
            .saturating_add(self.policy.increment)
            .min(self.projection.len());
        if end <= self.materialized {
            return 0;
        }

        let rows = self.render_range(self.materialized..end);
        self.surface.append_rows(rows);
        let added = end - self.materialized;
        self.materialized = end;
        added
    }

    /// Writes an edit through to the store and the sink. The projection is
    /// left alone even when `field` drives the active sort or filter; only the
    /// materialized row for `id` is redrawn.
    ///
    /// Returns false without side effects when `field` cannot hold `value`.
    pub fn record_edited(&mut self, id: MovieId, field: MovieField, value: FieldValue) -> bool {
        if field.value_kind() != Some(value.kind()) {
            return false;
        }

        let update = FieldUpdate { id, field, value };
        if self.store.apply_field_update(&update) {
            self.stale_filter = true;
        }
        self.sink.send_update(update);
        self.rerender_visible(id);
        true
    }

    pub fn refresh_record(&mut self, movie: Movie) -> bool {
        let id = movie.id;
        if !self.store.replace_record(movie) {
            return false;
        }
        self.stale_filter = true;
        self.rerender_visible(id);
        true
    }

    fn refine(&self, query: &FilterQuery) -> Vec<usize> {
        self.select(&self.projection, query)
    }

    fn rescan(&self, query: &FilterQuery) -> Vec<usize> {
        self.select(&self.display_order, query)
    }

    fn select(&self, candidates: &[usize], query: &FilterQuery) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|position| {
                self.store
                    .get(*position)
                    .is_some_and(|movie| query.matches(movie))
            })
            .collect()
    }

    fn render_range(&self, range: Range<usize>) -> Vec<RowView> {
        self.projection[range]
            .iter()
            .filter_map(|position| self.store.get(*position).map(render_row))
            .collect()
    }

    fn rerender_visible(&mut self, id: MovieId) {
        let Some(position) = self.store.position_of(id) else {
            return;
        };
        let Some(row) = self.projection[..self.materialized]
            .iter()
            .position(|candidate| *candidate == position)
        else {
            return;
        };
        if let Some(movie) = self.store.get(position) {
            self.surface.replace_row(row, render_row(movie));
        }
    }
}

// Descending is the reverse of the stable ascending order, so ties come out
// in reverse of their prior relative order.
fn sort_positions(
    store: &MovieStore,
    positions: &mut [usize],
    field: MovieField,
    direction: SortDirection,
) {
    positions.sort_by(|left, right| match (store.get(*left), store.get(*right)) {
        (Some(left), Some(right)) => left.cmp_field(right, field),
        _ => Ordering::Equal,
    });
    if direction == SortDirection::Desc {
        positions.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::{BatchPolicy, TableViewController};
    use crate::{
        FieldUpdate, FieldValue, FilterQuery, Movie, MovieField, MovieId, MovieStore, RowView,
        SortDirection,
    };
    use std::collections::BTreeSet;

    type Controller = TableViewController<Vec<RowView>, Vec<FieldUpdate>>;

    fn movie(id: i64, title: &str, director: &str, year: u16) -> Movie {
        Movie {
            id: MovieId::new(id),
            path: format!("/vol1/{id}.mkv"),
            byte_length: 0,
            title: title.to_owned(),
            director: director.to_owned(),
            year,
            added_date: format!("2014-01-{:02}T00:00:00Z", id % 28 + 1),
            watched: id % 2 == 0,
            hash: String::new(),
        }
    }

    fn scenario_movies() -> Vec<Movie> {
        vec![
            movie(1, "Alpha", "Smith", 2001),
            movie(2, "Beta", "Jones", 1999),
            movie(3, "Gamma", "Smith", 2010),
        ]
    }

    fn library() -> Vec<Movie> {
        vec![
            movie(1, "Alien", "Ridley Scott", 1979),
            movie(2, "Aliens", "James Cameron", 1986),
            movie(3, "Blade Runner", "Ridley Scott", 1982),
            movie(4, "The Terminator", "James Cameron", 1984),
            movie(5, "Heat", "Michael Mann", 1995),
            movie(6, "Thief", "Michael Mann", 1981),
            movie(7, "Brazil", "Terry Gilliam", 1985),
            movie(8, "Twelve Monkeys", "Terry Gilliam", 1995),
            movie(9, "Gladiator", "Ridley Scott", 2000),
            movie(10, "Collateral", "Michael Mann", 2004),
            movie(11, "Untitled", "", 0),
            movie(12, "Titanic", "James Cameron", 1997),
        ]
    }

    fn controller(movies: Vec<Movie>, policy: BatchPolicy) -> Controller {
        let store = MovieStore::from_movies(movies).expect("unique ids");
        let mut controller = TableViewController::new(store, Vec::new(), Vec::new(), policy);
        controller.materialize_initial();
        controller
    }

    fn ids(values: &[i64]) -> Vec<MovieId> {
        values.iter().copied().map(MovieId::new).collect()
    }

    fn surface_ids(controller: &Controller) -> Vec<MovieId> {
        controller.surface().iter().map(|row| row.id).collect()
    }

    #[test]
    fn example_scenario_filters_then_sorts_by_year() {
        let mut view = controller(scenario_movies(), BatchPolicy::default());

        assert!(view.apply_filter("smith"));
        assert_eq!(view.projected_ids(), ids(&[1, 3]));

        assert_eq!(view.apply_sort(MovieField::Year), SortDirection::Asc);
        assert_eq!(view.projected_ids(), ids(&[1, 3]));

        assert_eq!(view.apply_sort(MovieField::Year), SortDirection::Desc);
        assert_eq!(view.projected_ids(), ids(&[3, 1]));
        assert_eq!(surface_ids(&view), ids(&[3, 1]));
    }

    #[test]
    fn construction_projects_every_record_in_store_order() {
        let store = MovieStore::from_movies(scenario_movies()).expect("unique ids");
        let view: Controller =
            TableViewController::new(store, Vec::new(), Vec::new(), BatchPolicy::default());
        assert_eq!(view.projection(), &[0, 1, 2]);
        assert_eq!(view.materialized(), 0);
        assert!(view.surface().is_empty());
    }

    #[test]
    fn repeated_filter_text_is_a_no_op() {
        let mut view = controller(library(), BatchPolicy::default());
        assert!(view.apply_filter("Mann"));
        let projection = view.projection().to_vec();
        view.materialize_more();

        assert!(!view.apply_filter("mann"));
        assert!(!view.apply_filter("MANN"));
        assert_eq!(view.projection(), projection.as_slice());
        assert_eq!(view.filter_text(), "mann");
    }

    #[test]
    fn refine_and_rescan_agree_for_filter_sequences() {
        let sequences: [&[&str]; 6] = [
            &["r", "ri", "rid", "ridley", "ridley 19", "ridley 198"],
            &["scott", "sco", "cameron", "cameron 199"],
            &["a", "a b", "a bl", "", "mann 2"],
            &["19", "199", "1995", "99", "9"],
            &["terry", "terry  gil", "gil", "xyz", "xyz a"],
            &["  ", "0", "t", "the t", "the te"],
        ];

        for sequence in sequences {
            let mut view = controller(library(), BatchPolicy::default());
            for text in sequence {
                view.apply_filter(text);
                let query = FilterQuery::parse(text);
                assert_eq!(
                    view.projection(),
                    view.rescan(&query).as_slice(),
                    "sequence {sequence:?} diverged at {text:?}"
                );
            }
        }
    }

    #[test]
    fn refine_and_rescan_agree_after_sorting() {
        let mut refined = controller(library(), BatchPolicy::default());
        refined.apply_sort(MovieField::Year);
        refined.apply_sort(MovieField::Director);
        refined.apply_filter("m");
        refined.apply_filter("ma");
        refined.apply_filter("man");

        let mut rescanned = controller(library(), BatchPolicy::default());
        rescanned.apply_sort(MovieField::Year);
        rescanned.apply_sort(MovieField::Director);
        rescanned.apply_filter("zzz");
        rescanned.apply_filter("man");

        assert_eq!(refined.projection(), rescanned.projection());
        assert_eq!(refined.projected_ids(), ids(&[6, 5, 10]));
    }

    #[test]
    fn narrower_filters_return_subsets() {
        let pairs = [
            ("ridley", "ridley 198"),
            ("a", "a cameron"),
            ("19", "1995 mann"),
            ("", "the"),
        ];
        for (broad, narrow) in pairs {
            let mut broad_view = controller(library(), BatchPolicy::default());
            broad_view.apply_filter(broad);
            let mut narrow_view = controller(library(), BatchPolicy::default());
            narrow_view.apply_filter(narrow);

            let broad_ids: BTreeSet<_> = broad_view.projected_ids().into_iter().collect();
            let narrow_ids: BTreeSet<_> = narrow_view.projected_ids().into_iter().collect();
            assert!(
                narrow_ids.is_subset(&broad_ids),
                "{narrow:?} is not a subset of {broad:?}"
            );
        }
    }

    #[test]
    fn sort_toggle_reverses_and_keeps_ties_stable() {
        let mut view = controller(library(), BatchPolicy::default());

        view.apply_sort(MovieField::Director);
        let ascending = view.projected_ids();
        assert_eq!(ascending, ids(&[11, 2, 4, 12, 5, 6, 10, 1, 3, 9, 7, 8]));

        view.apply_sort(MovieField::Director);
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(view.projected_ids(), reversed);

        // Ties keep their current relative order, which is now reversed.
        view.apply_sort(MovieField::Director);
        assert_eq!(
            view.projected_ids(),
            ids(&[11, 12, 4, 2, 10, 6, 5, 9, 3, 1, 8, 7])
        );
    }

    #[test]
    fn third_sort_restores_ascending_order_for_distinct_keys() {
        let mut view = controller(library(), BatchPolicy::default());
        view.apply_sort(MovieField::Title);
        let ascending = view.projected_ids();
        assert_eq!(ascending.first(), Some(&MovieId::new(1)));

        view.apply_sort(MovieField::Title);
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(view.projected_ids(), reversed);

        view.apply_sort(MovieField::Title);
        assert_eq!(view.projected_ids(), ascending);
    }

    #[test]
    fn sort_memory_is_tracked_per_field_and_survives_filtering() {
        let mut view = controller(library(), BatchPolicy::default());
        assert_eq!(view.next_direction(MovieField::Year), SortDirection::Asc);
        view.apply_sort(MovieField::Year);
        assert_eq!(view.next_direction(MovieField::Year), SortDirection::Desc);
        assert_eq!(view.next_direction(MovieField::Title), SortDirection::Asc);

        view.apply_filter("scott");
        assert_eq!(view.next_direction(MovieField::Year), SortDirection::Desc);
        assert_eq!(view.projected_ids(), ids(&[1, 3, 9]));
        assert_eq!(view.apply_sort(MovieField::Year), SortDirection::Desc);
        assert_eq!(view.projected_ids(), ids(&[9, 3, 1]));
    }

    #[test]
    fn sort_orders_flags_and_dates() {
        let mut view = controller(scenario_movies(), BatchPolicy::default());
        view.apply_sort(MovieField::Watched);
        assert_eq!(view.projected_ids(), ids(&[1, 3, 2]));
        view.apply_sort(MovieField::AddedDate);
        assert_eq!(view.projected_ids(), ids(&[1, 2, 3]));
        view.apply_sort(MovieField::AddedDate);
        assert_eq!(view.projected_ids(), ids(&[3, 2, 1]));
    }

    #[test]
    fn materialization_is_bounded_by_batches() {
        let policy = BatchPolicy {
            initial: 3,
            increment: 2,
        };
        let mut view = controller(library(), policy);
        assert_eq!(view.materialized(), 3);
        assert_eq!(view.surface().len(), 3);

        for calls in 1..=6 {
            view.materialize_more();
            let expected = library().len().min(3 + calls * 2);
            assert_eq!(view.materialized(), expected);
            assert_eq!(view.surface().len(), expected);
        }
        assert!(view.is_exhausted());
        assert_eq!(view.materialize_more(), 0);
        assert_eq!(view.surface().len(), library().len());
        assert_eq!(surface_ids(&view), view.projected_ids());
    }

    #[test]
    fn filter_and_sort_reset_materialization() {
        let policy = BatchPolicy {
            initial: 2,
            increment: 5,
        };
        let mut view = controller(library(), policy);
        view.materialize_more();
        assert_eq!(view.materialized(), 7);

        view.apply_filter("a");
        assert_eq!(view.materialized(), 2);
        assert_eq!(surface_ids(&view), view.projected_ids()[..2].to_vec());

        view.materialize_more();
        view.apply_sort(MovieField::Title);
        assert_eq!(view.materialized(), 2);
        assert_eq!(surface_ids(&view), view.projected_ids()[..2].to_vec());
    }

    #[test]
    fn empty_projection_materializes_nothing() {
        let mut view = controller(library(), BatchPolicy::default());
        view.apply_filter("no such movie");
        assert_eq!(view.total(), 0);
        assert_eq!(view.materialized(), 0);
        assert!(view.surface().is_empty());
        assert_eq!(view.materialize_more(), 0);
        view.apply_sort(MovieField::Title);
        assert!(view.surface().is_empty());
    }

    #[test]
    fn edits_write_through_without_moving_rows() {
        let mut view = controller(library(), BatchPolicy::default());
        view.apply_filter("t");
        view.apply_sort(MovieField::Title);
        let before = view.projected_ids();
        assert!(before.contains(&MovieId::new(7)));

        assert!(view.record_edited(
            MovieId::new(7),
            MovieField::Title,
            FieldValue::Text("Zzz".to_owned()),
        ));

        assert_eq!(view.projected_ids(), before);
        assert_eq!(
            view.store()
                .find_by_id(MovieId::new(7))
                .map(|movie| movie.title.as_str()),
            Some("Zzz")
        );
        assert_eq!(
            view.sink(),
            &vec![FieldUpdate {
                id: MovieId::new(7),
                field: MovieField::Title,
                value: FieldValue::Text("Zzz".to_owned()),
            }]
        );
        let row = view
            .surface()
            .iter()
            .find(|row| row.id == MovieId::new(7))
            .expect("edited row stays visible");
        assert_eq!(row.title, "Zzz");
    }

    #[test]
    fn edits_that_break_the_filter_keep_membership() {
        let mut view = controller(library(), BatchPolicy::default());
        view.apply_filter("heat");
        assert_eq!(view.projected_ids(), ids(&[5]));
        view.record_edited(
            MovieId::new(5),
            MovieField::Title,
            FieldValue::Text("Cold".to_owned()),
        );
        assert_eq!(view.projected_ids(), ids(&[5]));
        assert_eq!(view.row_id(0), Some(MovieId::new(5)));
    }

    #[test]
    fn narrowing_after_an_edit_picks_up_new_matches() {
        let mut refined = controller(library(), BatchPolicy::default());
        refined.apply_filter("heat");
        assert_eq!(refined.projected_ids(), ids(&[5]));
        refined.record_edited(
            MovieId::new(6),
            MovieField::Title,
            FieldValue::Text("Heatwave".to_owned()),
        );
        refined.apply_filter("heatw");

        let mut rescanned = controller(library(), BatchPolicy::default());
        rescanned.apply_filter("zzz");
        rescanned.record_edited(
            MovieId::new(6),
            MovieField::Title,
            FieldValue::Text("Heatwave".to_owned()),
        );
        rescanned.apply_filter("heatw");

        assert_eq!(refined.projected_ids(), ids(&[6]));
        assert_eq!(refined.projected_ids(), rescanned.projected_ids());
        assert_eq!(surface_ids(&refined), ids(&[6]));

        // Once rescanned, further narrowing agrees with a full scan again.
        refined.apply_filter("heatwa");
        let query = FilterQuery::parse("heatwa");
        assert_eq!(refined.projection(), refined.rescan(&query).as_slice());
    }

    #[test]
    fn narrowing_after_a_refresh_picks_up_new_matches() {
        let mut view = controller(library(), BatchPolicy::default());
        view.apply_filter("aliens");
        assert_eq!(view.projected_ids(), ids(&[2]));

        assert!(view.refresh_record(movie(12, "Aliens of the Deep", "James Cameron", 2005)));
        view.apply_filter("aliens of");
        assert_eq!(view.projected_ids(), ids(&[12]));
        assert_eq!(
            view.projection(),
            view.rescan(&FilterQuery::parse("aliens of")).as_slice()
        );
    }

    #[test]
    fn resorting_after_an_edit_moves_the_record() {
        let mut view = controller(library(), BatchPolicy::default());
        view.apply_sort(MovieField::Year);
        assert_eq!(view.projected_ids().first(), Some(&MovieId::new(11)));

        assert!(view.record_edited(MovieId::new(11), MovieField::Year, FieldValue::Year(2010)));
        assert_eq!(view.projected_ids().first(), Some(&MovieId::new(11)));

        assert_eq!(view.apply_sort(MovieField::Year), SortDirection::Desc);
        assert_eq!(view.projected_ids().first(), Some(&MovieId::new(11)));
        assert_eq!(view.row_id(0), Some(MovieId::new(11)));

        assert_eq!(view.apply_sort(MovieField::Year), SortDirection::Asc);
        assert_eq!(view.projected_ids().last(), Some(&MovieId::new(11)));
        assert_eq!(view.projected_ids().first(), Some(&MovieId::new(1)));
    }

    #[test]
    fn mismatched_edit_is_rejected_before_write_through() {
        let mut view = controller(library(), BatchPolicy::default());
        assert!(!view.record_edited(
            MovieId::new(1),
            MovieField::Year,
            FieldValue::Text("1980".to_owned()),
        ));
        assert!(!view.record_edited(
            MovieId::new(1),
            MovieField::Path,
            FieldValue::Text("/tmp".to_owned()),
        ));
        assert!(view.sink().is_empty());
    }

    #[test]
    fn closed_outbox_does_not_block_local_edits() {
        let store = MovieStore::from_movies(library()).expect("unique ids");
        let (tx, rx) = std::sync::mpsc::channel::<FieldUpdate>();
        drop(rx);
        let mut view =
            TableViewController::new(store, Vec::<RowView>::new(), tx, BatchPolicy::default());
        view.materialize_initial();

        assert!(view.record_edited(MovieId::new(3), MovieField::Watched, FieldValue::Flag(true)));
        assert!(
            view.store()
                .find_by_id(MovieId::new(3))
                .is_some_and(|movie| movie.watched)
        );
        assert!(view.surface()[2].watched);
    }

    #[test]
    fn edits_for_unknown_ids_still_reach_the_remote() {
        let mut view = controller(library(), BatchPolicy::default());
        assert!(view.record_edited(MovieId::new(404), MovieField::Watched, FieldValue::Flag(true)));
        assert_eq!(view.sink().len(), 1);
        assert_eq!(view.store().len(), library().len());
    }

    #[test]
    fn refresh_record_redraws_visible_row() {
        let mut view = controller(library(), BatchPolicy::default());
        let mut fresh = movie(2, "Aliens (Special Edition)", "James Cameron", 1986);
        fresh.watched = true;
        assert!(view.refresh_record(fresh));
        let row = view.surface()[1].clone();
        assert_eq!(row.title, "Aliens (Special Edition)");
        assert!(row.watched);
        assert!(!view.refresh_record(movie(99, "Ghost", "", 0)));
    }

    #[test]
    fn movie_at_row_only_covers_materialized_rows() {
        let policy = BatchPolicy {
            initial: 1,
            increment: 1,
        };
        let view = controller(library(), policy);
        assert_eq!(view.movie_at_row(0).map(|m| m.id), Some(MovieId::new(1)));
        assert!(view.movie_at_row(1).is_none());
    }
}
