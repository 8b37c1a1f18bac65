// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use reelshelf_app::{
    AppCommand, AppMode, AppState, BatchPolicy, FieldUpdate, FieldValue, Movie, MovieField,
    MovieId, MovieStore, RowView, SortDirection, TableViewController, current_year, year_options,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const HALF_PAGE_ROWS: isize = 10;
// Rows kept materialized below the cursor before another batch is appended.
const LOAD_AHEAD_ROWS: usize = 5;

pub type MovieController = TableViewController<Vec<RowView>, Sender<FieldUpdate>>;

/// Builds a controller whose edits queue on the returned outbox until the
/// event loop hands them to the runtime.
pub fn movie_controller(
    store: MovieStore,
    policy: BatchPolicy,
) -> (MovieController, Receiver<FieldUpdate>) {
    let (tx, rx) = mpsc::channel();
    (TableViewController::new(store, Vec::new(), tx, policy), rx)
}

pub trait AppRuntime {
    /// Starts delivering `update` to the remote store without blocking the
    /// UI. The outcome comes back through `tx`.
    fn spawn_field_update(&mut self, update: FieldUpdate, tx: Sender<InternalEvent>)
    -> Result<()>;
    fn fetch_movie(&mut self, id: MovieId) -> Result<Option<Movie>>;
    fn movie_link(&self, path: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    UpdateSent {
        id: MovieId,
        field: MovieField,
    },
    UpdateFailed {
        id: MovieId,
        field: MovieField,
        error: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseCommand {
    MoveRow(isize),
    MoveColumn(isize),
    JumpFirstRow,
    JumpLastRow,
    SortColumn(usize),
    SortCurrentColumn,
    EnterFilter,
    EditCell,
    ToggleWatched,
    RefreshRecord,
    ShowLink,
    ToggleHelp,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditUiState {
    id: MovieId,
    buffer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    selected_row: usize,
    selected_col: usize,
    filter_input: String,
    edit: Option<EditUiState>,
    last_sort: Option<(MovieField, SortDirection)>,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    controller: &mut MovieController,
    outbox: &Receiver<FieldUpdate>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if controller.materialized() == 0 {
        controller.materialize_initial();
    }
    tracing::info!(
        movies = controller.store().len(),
        rows = controller.materialized(),
        "table view started"
    );

    let mut result = Ok(());
    loop {
        flush_outbox(state, runtime, &mut view_data, &internal_tx, outbox);
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, controller, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, runtime, controller, &mut view_data, &internal_tx, key)
                {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    // Edits made right before quitting still go out.
    flush_outbox(state, runtime, &mut view_data, &internal_tx, outbox);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn flush_outbox<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    outbox: &Receiver<FieldUpdate>,
) {
    while let Ok(update) = outbox.try_recv() {
        let (id, field) = (update.id, update.field);
        if let Err(error) = runtime.spawn_field_update(update, internal_tx.clone()) {
            tracing::warn!(%id, field = field.as_str(), %error, "update not dispatched");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("{} for #{id} not sent: {error}", field.label()),
            );
        }
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::UpdateSent { id, field } => {
                tracing::debug!(%id, field = field.as_str(), "update acknowledged");
            }
            InternalEvent::UpdateFailed { id, field, error } => {
                tracing::warn!(%id, field = field.as_str(), %error, "update rejected");
                emit_status(
                    state,
                    view_data,
                    tx,
                    format!("{} for #{id} not saved on server: {error}", field.label()),
                );
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            state.dispatch(AppCommand::ToggleHelp);
        }
        return false;
    }

    match state.mode {
        AppMode::Filter => {
            handle_filter_key(state, controller, view_data, internal_tx, key);
            false
        }
        AppMode::Edit(field) => {
            handle_edit_key(state, controller, view_data, internal_tx, field, key);
            false
        }
        AppMode::Browse => {
            let Some(command) = browse_command_for_key(key) else {
                return false;
            };
            apply_browse_command(state, runtime, controller, view_data, internal_tx, command)
        }
    }
}

fn browse_command_for_key(key: KeyEvent) -> Option<BrowseCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(BrowseCommand::MoveRow(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(BrowseCommand::MoveRow(-1)),
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => Some(BrowseCommand::MoveColumn(-1)),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => Some(BrowseCommand::MoveColumn(1)),
        (KeyCode::Char('d'), _) | (KeyCode::PageDown, _) => {
            Some(BrowseCommand::MoveRow(HALF_PAGE_ROWS))
        }
        (KeyCode::Char('u'), _) | (KeyCode::PageUp, _) => {
            Some(BrowseCommand::MoveRow(-HALF_PAGE_ROWS))
        }
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Some(BrowseCommand::JumpFirstRow),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(BrowseCommand::JumpLastRow),
        (KeyCode::Char(digit @ '1'..='6'), _) => digit
            .to_digit(10)
            .map(|column| BrowseCommand::SortColumn(column as usize - 1)),
        (KeyCode::Char('s'), KeyModifiers::NONE) => Some(BrowseCommand::SortCurrentColumn),
        (KeyCode::Char('/'), _) => Some(BrowseCommand::EnterFilter),
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
            Some(BrowseCommand::EditCell)
        }
        (KeyCode::Char(' '), _) => Some(BrowseCommand::ToggleWatched),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(BrowseCommand::RefreshRecord),
        (KeyCode::Char('o'), KeyModifiers::NONE) => Some(BrowseCommand::ShowLink),
        (KeyCode::Char('?'), _) => Some(BrowseCommand::ToggleHelp),
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(BrowseCommand::Quit),
        _ => None,
    }
}

fn apply_browse_command<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: BrowseCommand,
) -> bool {
    match command {
        BrowseCommand::MoveRow(delta) => move_row(controller, view_data, delta),
        BrowseCommand::MoveColumn(delta) => move_col(view_data, delta),
        BrowseCommand::JumpFirstRow => view_data.selected_row = 0,
        BrowseCommand::JumpLastRow => {
            view_data.selected_row = controller.materialized().saturating_sub(1);
            load_ahead(controller, view_data);
        }
        BrowseCommand::SortColumn(column) => {
            if let Some(field) = MovieField::from_column(column) {
                sort_by(state, controller, view_data, internal_tx, field);
            }
        }
        BrowseCommand::SortCurrentColumn => {
            let field = selected_field(view_data);
            sort_by(state, controller, view_data, internal_tx, field);
        }
        BrowseCommand::EnterFilter => {
            state.dispatch(AppCommand::EnterFilter);
        }
        BrowseCommand::EditCell => begin_edit(state, controller, view_data, internal_tx),
        BrowseCommand::ToggleWatched => toggle_watched(state, controller, view_data, internal_tx),
        BrowseCommand::RefreshRecord => {
            refresh_selected(state, runtime, controller, view_data, internal_tx);
        }
        BrowseCommand::ShowLink => {
            let Some(movie) = controller.movie_at_row(view_data.selected_row) else {
                emit_status(state, view_data, internal_tx, "no movie selected");
                return false;
            };
            let link = runtime.movie_link(&movie.path);
            emit_status(state, view_data, internal_tx, format!("link: {link}"));
        }
        BrowseCommand::ToggleHelp => {
            state.dispatch(AppCommand::ToggleHelp);
        }
        BrowseCommand::Quit => return true,
    }
    false
}

fn move_row(controller: &mut MovieController, view_data: &mut ViewData, delta: isize) {
    let row_count = controller.materialized();
    if row_count == 0 {
        view_data.selected_row = 0;
        return;
    }

    let current = view_data.selected_row;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.selected_row = next.min(row_count - 1);
    load_ahead(controller, view_data);
}

fn load_ahead(controller: &mut MovieController, view_data: &ViewData) -> usize {
    let mut added = 0;
    while view_data.selected_row + LOAD_AHEAD_ROWS >= controller.materialized() {
        let appended = controller.materialize_more();
        if appended == 0 {
            break;
        }
        added += appended;
    }
    added
}

fn move_col(view_data: &mut ViewData, delta: isize) {
    let last = MovieField::ALL.len() - 1;
    let current = view_data.selected_col;
    let next = if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize)
    };
    view_data.selected_col = next.min(last);
}

fn selected_field(view_data: &ViewData) -> MovieField {
    MovieField::from_column(view_data.selected_col).unwrap_or(MovieField::Title)
}

fn sort_by(
    state: &mut AppState,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: MovieField,
) {
    let direction = controller.apply_sort(field);
    view_data.last_sort = Some((field, direction));
    view_data.selected_row = 0;
    emit_status(
        state,
        view_data,
        internal_tx,
        format!("sorted by {} {}", field.label(), direction.label()),
    );
}

fn handle_filter_key(
    state: &mut AppState,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) | (KeyCode::Esc, _) => {
            state.dispatch(AppCommand::ExitToBrowse);
            let message = format!(
                "{} of {} movies match",
                controller.total(),
                controller.store().len()
            );
            emit_status(state, view_data, internal_tx, message);
            return;
        }
        (KeyCode::Backspace, _) => {
            view_data.filter_input.pop();
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.filter_input.clear();
        }
        (KeyCode::Char(ch), _) => view_data.filter_input.push(ch),
        _ => return,
    }

    if controller.apply_filter(&view_data.filter_input) {
        view_data.selected_row = 0;
        tracing::debug!(
            filter = %view_data.filter_input,
            matches = controller.total(),
            "filter applied"
        );
    }
}

fn begin_edit(
    state: &mut AppState,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let field = selected_field(view_data);
    let Some(movie) = controller.movie_at_row(view_data.selected_row) else {
        emit_status(state, view_data, internal_tx, "no movie selected");
        return;
    };
    if !field.is_editable() {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("{} is read-only", field.label()),
        );
        return;
    }
    if field == MovieField::Watched {
        toggle_watched(state, controller, view_data, internal_tx);
        return;
    }

    let edit = EditUiState {
        id: movie.id,
        buffer: movie.value(field).display(),
    };
    state.dispatch(AppCommand::BeginEdit(field));
    if state.mode == AppMode::Edit(field) {
        view_data.edit = Some(edit);
    }
}

fn handle_edit_key(
    state: &mut AppState,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: MovieField,
    key: KeyEvent,
) {
    let Some(edit) = view_data.edit.as_mut() else {
        state.dispatch(AppCommand::ExitToBrowse);
        return;
    };

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            view_data.edit = None;
            state.dispatch(AppCommand::ExitToBrowse);
            emit_status(state, view_data, internal_tx, "edit canceled");
        }
        (KeyCode::Enter, _) => commit_edit(state, controller, view_data, internal_tx, field),
        (KeyCode::Backspace, _) => {
            edit.buffer.pop();
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            edit.buffer.clear();
        }
        (KeyCode::Up, _) if field == MovieField::Year => {
            edit.buffer = step_year(&edit.buffer, 1, current_year());
        }
        (KeyCode::Down, _) if field == MovieField::Year => {
            edit.buffer = step_year(&edit.buffer, -1, current_year());
        }
        (KeyCode::Char(ch), _) if field == MovieField::Year => {
            if ch.is_ascii_digit() && edit.buffer.len() < 4 {
                edit.buffer.push(ch);
            }
        }
        (KeyCode::Char(ch), _) => edit.buffer.push(ch),
        _ => {}
    }
}

fn commit_edit(
    state: &mut AppState,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: MovieField,
) {
    let Some(edit) = view_data.edit.clone() else {
        return;
    };
    let value = match FieldValue::parse_for_field(field, &edit.buffer, current_year()) {
        Ok(value) => value,
        Err(error) => {
            emit_status(state, view_data, internal_tx, error.to_string());
            return;
        }
    };

    let shown = value.display();
    view_data.edit = None;
    state.dispatch(AppCommand::ExitToBrowse);
    if controller.record_edited(edit.id, field, value) {
        let shown = if shown.is_empty() {
            "unknown".to_owned()
        } else {
            shown
        };
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("{} set to {shown}", field.label()),
        );
    }
}

fn step_year(buffer: &str, delta: isize, current_year: u16) -> String {
    let options = year_options(current_year);
    let current = buffer.trim().parse::<u16>().unwrap_or(0);
    let index = options
        .iter()
        .position(|year| *year == current)
        .unwrap_or(0);
    let next = if delta.is_negative() {
        index.saturating_sub(delta.unsigned_abs())
    } else {
        index.saturating_add(delta as usize)
    };
    match options[next.min(options.len() - 1)] {
        0 => String::new(),
        year => year.to_string(),
    }
}

fn toggle_watched(
    state: &mut AppState,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(movie) = controller.movie_at_row(view_data.selected_row) else {
        emit_status(state, view_data, internal_tx, "no movie selected");
        return;
    };
    let (id, watched) = (movie.id, !movie.watched);
    if controller.record_edited(id, MovieField::Watched, FieldValue::Flag(watched)) {
        let message = if watched {
            "marked watched"
        } else {
            "marked unwatched"
        };
        emit_status(state, view_data, internal_tx, message);
    }
}

fn refresh_selected<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    controller: &mut MovieController,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(id) = controller.row_id(view_data.selected_row) else {
        emit_status(state, view_data, internal_tx, "no movie selected");
        return;
    };
    match runtime.fetch_movie(id) {
        Ok(Some(movie)) => {
            controller.refresh_record(movie);
            emit_status(state, view_data, internal_tx, format!("refreshed #{id}"));
        }
        Ok(None) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("#{id} is no longer on the server"),
        ),
        Err(error) => {
            tracing::warn!(%id, %error, "refresh failed");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("refresh failed: {error}"),
            );
        }
    }
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    controller: &MovieController,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let filter_bar = Paragraph::new(filter_bar_text(state, view_data))
        .block(Block::default().title("reelshelf").borders(Borders::ALL));
    frame.render_widget(filter_bar, layout[0]);

    render_table(frame, layout[1], controller, view_data);

    let status_widget = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let AppMode::Edit(field) = state.mode
        && let Some(edit) = &view_data.edit
    {
        let area = centered_rect(60, 20, frame.area());
        frame.render_widget(Clear, area);
        let editor = Paragraph::new(render_edit_overlay_text(field, edit)).block(
            Block::default()
                .title(format!("edit {}", field.label()))
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(editor, area);
    }

    if state.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    controller: &MovieController,
    view_data: &ViewData,
) {
    let header = Row::new(MovieField::ALL.iter().map(|field| {
        Cell::from(header_label(*field, view_data.last_sort)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = controller
        .surface()
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let selected_row = row_index == view_data.selected_row;
            let cells = row
                .cells()
                .into_iter()
                .enumerate()
                .map(|(column_index, text)| {
                    let style = if selected_row && column_index == view_data.selected_col {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Cell::from(text).style(style)
                })
                .collect::<Vec<_>>();
            Row::new(cells)
        });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(18),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(
            Block::default()
                .title(table_title(controller))
                .borders(Borders::ALL),
        );

    let selected = (controller.materialized() > 0).then_some(view_data.selected_row);
    let mut table_state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn header_label(field: MovieField, last_sort: Option<(MovieField, SortDirection)>) -> String {
    let mut label = format!("{} {}", field.column() + 1, field.label());
    if let Some((sorted, direction)) = last_sort
        && sorted == field
    {
        label.push_str(match direction {
            SortDirection::Asc => " ↑",
            SortDirection::Desc => " ↓",
        });
    }
    label
}

fn table_title(controller: &MovieController) -> String {
    let more = if controller.is_exhausted() { "" } else { "+" };
    if controller.filter_text().trim().is_empty() {
        format!(
            "movies {}{more} of {}",
            controller.materialized(),
            controller.total()
        )
    } else {
        format!(
            "movies {}{more} of {} matching ({} total)",
            controller.materialized(),
            controller.total(),
            controller.store().len()
        )
    }
}

fn filter_bar_text(state: &AppState, view_data: &ViewData) -> String {
    if state.mode == AppMode::Filter {
        return format!("/ {}_", view_data.filter_input);
    }
    if view_data.filter_input.trim().is_empty() {
        "press / to search title, director, and year".to_owned()
    } else {
        format!("filter: {}", view_data.filter_input)
    }
}

fn render_edit_overlay_text(field: MovieField, edit: &EditUiState) -> String {
    let mut out = format!("#{}\n\n{}_\n", edit.id, edit.buffer);
    if field == MovieField::Year {
        out.push_str("\nup/down step years | empty means unknown");
    }
    out
}

fn status_text(state: &AppState) -> String {
    let (mode, hints) = match state.mode {
        AppMode::Browse => (
            "BROWSE",
            "j/k g/G d/u | h/l col | 1-6 s sort | / filter | e edit | space watched | r refresh | o link | ? help | q quit",
        ),
        AppMode::Filter => ("FILTER", "type to filter | ctrl+u clear | enter/esc done"),
        AppMode::Edit(MovieField::Year) => (
            "EDIT",
            "digits | up/down step | enter save | esc cancel",
        ),
        AppMode::Edit(_) => ("EDIT", "type | ctrl+u clear | enter save | esc cancel"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k or arrows row | h/l column | g/G first/last | d/u half page\n\
sort: 1-6 by column | s current column | repeat to reverse\n\
filter: / then type | every word must match title, director, or year | enter/esc done\n\
edit: e or enter current cell | space toggle watched | r reload from server | o show link\n\
editor: enter save | esc cancel | ctrl+u clear | year: up/down step, empty = unknown"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
