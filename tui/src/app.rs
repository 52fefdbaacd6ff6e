use color_eyre::Result;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use fieldguide_core::Catalog;
use fieldguide_core::Config;
use fieldguide_core::available_languages;
use fieldguide_core::load_rows;
use ratatui::Frame;
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::StreamExt;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::detail_view;
use crate::list_view;
use crate::render::row_window::RowWindow;
use crate::state::AppState;
use crate::state::Screen;
use crate::tui::Tui;

pub(crate) struct App {
    app_event_tx: AppEventSender,
    state: AppState,
    config: Config,
    list_window: RowWindow,
    detail_window: RowWindow,
}

impl App {
    pub(crate) async fn run(tui: &mut Tui, config: Config) -> Result<()> {
        let (tx, mut rx) = unbounded_channel();
        let languages = available_languages(&config.locales_dir);
        let mut app = Self {
            app_event_tx: AppEventSender::new(tx),
            state: AppState::new(config.policy, &config.language, languages),
            config,
            list_window: RowWindow::default(),
            detail_window: RowWindow::default(),
        };

        app.spawn_dataset_load();
        app.issue_catalog_load(app.config.language.clone());

        let mut terminal_events = EventStream::new();
        loop {
            let App {
                state,
                list_window,
                detail_window,
                ..
            } = &mut app;
            tui.draw(|frame| render_screen(frame, state, list_window, detail_window))?;

            tokio::select! {
                Some(event) = rx.recv() => {
                    if !app.handle_event(event) {
                        return Ok(());
                    }
                }
                Some(event) = terminal_events.next() => {
                    match event {
                        Ok(event) => app.handle_terminal_event(event),
                        Err(err) => tracing::warn!("terminal event error: {err}"),
                    }
                }
            }
        }
    }

    /// Apply one app event to the state. Returns false to exit.
    fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::SelectSymptom(symptom_id) => self.state.select_symptom(symptom_id),
            AppEvent::SetFilter(filter) => self.state.set_filter(filter),
            AppEvent::SetLanguage(language) => self.issue_catalog_load(language),
            AppEvent::AdvanceEscalation => self.state.advance_escalation(),
            AppEvent::MarkResolved => self.state.mark_resolved(),
            AppEvent::ToggleStep => self.state.toggle_step(),
            AppEvent::MoveListSelection(delta) => self.state.move_list_selection(delta),
            AppEvent::MoveStepSelection(delta) => self.state.move_step_selection(delta),
            AppEvent::GoBack => self.state.go_back(),
            AppEvent::DatasetLoaded(rows) => self.state.set_rows(rows),
            AppEvent::CatalogLoaded {
                generation,
                catalog,
            } => {
                if !self.state.apply_catalog(generation, catalog) {
                    tracing::debug!("discarding stale catalog load");
                }
            }
            AppEvent::ExitRequest => return false,
        }
        true
    }

    fn handle_terminal_event(&self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                if matches!(self.state.screen, Screen::List) {
                    let mut filter = self.state.filter.clone();
                    filter.push_str(&text);
                    self.app_event_tx.send(AppEvent::SetFilter(filter));
                }
            }
            _ => {}
        }
    }

    fn handle_key(&self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.app_event_tx.send(AppEvent::ExitRequest),
                KeyCode::Char('l') => {
                    if let Some(language) = self.state.next_language() {
                        self.app_event_tx.send(AppEvent::SetLanguage(language));
                    }
                }
                _ => {}
            }
            return;
        }
        if matches!(self.state.screen, Screen::List) {
            self.handle_list_key(key);
        } else {
            self.handle_detail_key(key);
        }
    }

    fn handle_list_key(&self, key: KeyEvent) {
        let tx = &self.app_event_tx;
        match key.code {
            KeyCode::Up => tx.send(AppEvent::MoveListSelection(-1)),
            KeyCode::Down => tx.send(AppEvent::MoveListSelection(1)),
            KeyCode::PageUp => tx.send(AppEvent::MoveListSelection(-10)),
            KeyCode::PageDown => tx.send(AppEvent::MoveListSelection(10)),
            KeyCode::Enter => {
                if let Some(entry) = self.state.symptoms().get(self.state.list_selected) {
                    tx.send(AppEvent::SelectSymptom(entry.id.clone()));
                }
            }
            KeyCode::Backspace => {
                let mut filter = self.state.filter.clone();
                filter.pop();
                tx.send(AppEvent::SetFilter(filter));
            }
            KeyCode::Esc => {
                if self.state.filter.is_empty() {
                    tx.send(AppEvent::ExitRequest);
                } else {
                    tx.send(AppEvent::SetFilter(String::new()));
                }
            }
            KeyCode::Char(c) => {
                let mut filter = self.state.filter.clone();
                filter.push(c);
                tx.send(AppEvent::SetFilter(filter));
            }
            _ => {}
        }
    }

    fn handle_detail_key(&self, key: KeyEvent) {
        let tx = &self.app_event_tx;
        match key.code {
            KeyCode::Up => tx.send(AppEvent::MoveStepSelection(-1)),
            KeyCode::Down => tx.send(AppEvent::MoveStepSelection(1)),
            KeyCode::Char(' ') => tx.send(AppEvent::ToggleStep),
            KeyCode::Char('y') => tx.send(AppEvent::MarkResolved),
            KeyCode::Char('n') => tx.send(AppEvent::AdvanceEscalation),
            KeyCode::Char('b') | KeyCode::Esc => tx.send(AppEvent::GoBack),
            KeyCode::Char('q') => tx.send(AppEvent::ExitRequest),
            _ => {}
        }
    }

    /// One-shot dataset load; a failure degrades to an empty row table.
    fn spawn_dataset_load(&self) {
        let tx = self.app_event_tx.clone();
        let path = self.config.data_path.clone();
        tokio::spawn(async move {
            let rows = match load_rows(&path).await {
                Ok(rows) => rows,
                Err(err) => {
                    tracing::warn!("dataset load failed: {err}");
                    Vec::new()
                }
            };
            tx.send(AppEvent::DatasetLoaded(rows));
        });
    }

    /// Start a catalog load for `language`. The completion echoes the
    /// generation issued here; anything older is discarded on arrival.
    fn issue_catalog_load(&mut self, language: String) {
        let generation = self.state.next_catalog_generation();
        let tx = self.app_event_tx.clone();
        let locales_dir = self.config.locales_dir.clone();
        tokio::spawn(async move {
            let catalog = match Catalog::load(&locales_dir, &language).await {
                Ok(catalog) => catalog,
                Err(err) => {
                    tracing::warn!("catalog load failed: {err}");
                    Catalog::empty(language)
                }
            };
            tx.send(AppEvent::CatalogLoaded {
                generation,
                catalog,
            });
        });
    }
}

fn render_screen(
    frame: &mut Frame,
    state: &AppState,
    list_window: &mut RowWindow,
    detail_window: &mut RowWindow,
) {
    match state.screen {
        Screen::List => list_view::render(frame, state, list_window),
        Screen::Detail { .. } => detail_view::render(frame, state, detail_window),
    }
}
