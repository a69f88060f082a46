use {
    eframe::{
        Frame, Storage,
        egui::{Context, Key, Visuals},
    },
    serde::{Deserialize, Serialize},
    std::{
        mem,
        sync::{mpsc, mpsc::Receiver},
    },
};

use crate::{
    Cli,
    app::{
        AppState, DoneState, ErrorState, IdleState, PhaseView, UploadingState, ValidatingState,
    },
    config::{DF, PREDICTION_API},
    data::{FileSource, SessionEvent, UploadedFile, file_stem, spawn_session},
    domain::{PredictionRecord, TelemetrySummary},
    ui::{MapDataset, MapView, MapVisibility, UI_CONFIG, UploadAction, UploadBoxView},
    utils::AppInstant,
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub(crate) map_visibility: MapVisibility, // persists across sessions.
    pub(crate) show_how_it_works: bool,
    pub(crate) show_results_table: bool,
    #[serde(skip)]
    state: AppState,
    #[serde(skip)]
    pub(crate) session_rx: Option<Receiver<SessionEvent>>,
    #[serde(skip)]
    pub(crate) attempt_seq: u64,
    #[serde(skip)]
    pub(crate) map_view: MapView,
    #[serde(skip)]
    pub(crate) records: Vec<PredictionRecord>,
    #[serde(skip)]
    pub(crate) summary: Option<TelemetrySummary>,
    #[serde(skip)]
    pub(crate) endpoint_url: String,
    #[serde(skip)]
    pub(crate) path_input: String,
    #[serde(skip)]
    pub(crate) export_notice: Option<String>,
    #[serde(skip)]
    pub(crate) current_file_stem: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            map_visibility: MapVisibility::default(),
            show_how_it_works: false,
            show_results_table: false,
            state: AppState::default(),
            session_rx: None,
            attempt_seq: 0,
            map_view: MapView::new(),
            records: Vec::new(),
            summary: None,
            endpoint_url: PREDICTION_API.url.to_string(),
            path_input: String::new(),
            export_notice: None,
            current_file_stem: "upload".to_string(),
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.map_view = MapView::new();
        app.state = AppState::default();
        app.endpoint_url = args
            .endpoint
            .unwrap_or_else(|| PREDICTION_API.url.to_string());

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = args.csv {
            let validating = app.start_session(FileSource::Path(path));
            app.state = AppState::Validating(validating);
        }

        app
    }

    /// Kick off a new upload attempt. The attempt counter makes any report
    /// still in flight from an earlier attempt identifiable as stale.
    pub(crate) fn start_session(&mut self, source: FileSource) -> ValidatingState {
        self.attempt_seq += 1;
        let attempt = self.attempt_seq;
        let file_name = source.label();

        let (tx, rx) = mpsc::channel();
        self.session_rx = Some(rx);
        self.export_notice = None;

        if DF.log_session_events {
            log::info!("attempt {}: session started for {}", attempt, file_name);
        }

        spawn_session(source, self.endpoint_url.clone(), attempt, tx);

        ValidatingState { file_name }
    }

    /// Next live report from the worker, skipping anything a superseded
    /// attempt still managed to send.
    pub(crate) fn next_session_event(&mut self) -> Option<SessionEvent> {
        let rx = self.session_rx.as_ref()?;
        while let Ok(event) = rx.try_recv() {
            let attempt = match &event {
                SessionEvent::Validated { attempt, .. }
                | SessionEvent::Completed { attempt, .. }
                | SessionEvent::Failed { attempt, .. } => *attempt,
            };
            if attempt != self.attempt_seq {
                if DF.log_session_events {
                    log::info!("attempt {}: stale report dropped", attempt);
                }
                continue;
            }
            return Some(event);
        }
        None
    }

    /// Swap the new predictions in. The previous dataset stays on screen
    /// until this moment, so a failed upload never blanks the map.
    fn apply_results(&mut self, records: Vec<PredictionRecord>) -> DoneState {
        let row_count = self
            .summary
            .as_ref()
            .map(|s| s.row_count)
            .unwrap_or(records.len());
        if let Some(summary) = &self.summary {
            self.current_file_stem = file_stem(&summary.file_name).to_string();
        }

        let prediction_count = records.len();
        self.map_view.queue_dataset(MapDataset::from_records(&records));
        self.records = records;
        self.session_rx = None;

        if DF.log_session_events {
            log::info!(
                "attempt {}: {} predictions applied",
                self.attempt_seq,
                prediction_count
            );
        }

        DoneState {
            row_count,
            prediction_count,
        }
    }

    /// Back to the empty upload box. Keeps the current map on screen; only
    /// the next successful upload replaces it.
    fn reset_session(&mut self) -> IdleState {
        self.attempt_seq += 1; // orphan anything still in flight
        self.session_rx = None;
        self.path_input.clear();
        IdleState
    }

    fn source_from_action(&mut self, ctx: &Context, action: Option<UploadAction>) -> Option<FileSource> {
        if let Some(UploadAction::Start(source)) = action {
            return Some(source);
        }
        self.take_dropped_file(ctx)
    }

    fn take_dropped_file(&mut self, ctx: &Context) -> Option<FileSource> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let file = dropped.into_iter().next()?;

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = file.path {
            return Some(FileSource::Path(path));
        }

        let bytes = file.bytes?;
        Some(FileSource::Memory(UploadedFile::new(
            file.name,
            bytes.to_vec(),
        )))
    }

    // ============ PHASE TICKS ============

    pub(crate) fn tick_idle_state(&mut self, ctx: &Context, _state: &mut IdleState) -> AppState {
        self.handle_global_shortcuts(ctx);
        self.render_top_panel(ctx);
        let action = self.render_side_panel(ctx, UploadBoxView::Idle);
        self.render_status_panel(ctx, "Idle");
        self.render_central_panel(ctx);
        self.render_help_window(ctx);
        self.render_results_window(ctx);

        if let Some(source) = self.source_from_action(ctx, action) {
            return AppState::Validating(self.start_session(source));
        }
        AppState::Idle(IdleState)
    }

    pub(crate) fn tick_validating_state(
        &mut self,
        ctx: &Context,
        state: &mut ValidatingState,
    ) -> AppState {
        ctx.request_repaint();

        match self.next_session_event() {
            Some(SessionEvent::Validated { summary, .. }) => {
                self.summary = Some(summary);
                return AppState::Uploading(UploadingState {
                    file_name: state.file_name.clone(),
                });
            }
            Some(SessionEvent::Completed { records, .. }) => {
                // Both reports can land between two frames; take the shortcut.
                return AppState::Done(self.apply_results(records));
            }
            Some(SessionEvent::Failed { error, .. }) => {
                self.session_rx = None;
                return AppState::Error(ErrorState {
                    message: error.to_string(),
                });
            }
            None => {}
        }

        self.handle_global_shortcuts(ctx);
        self.render_top_panel(ctx);
        let _ = self.render_side_panel(
            ctx,
            UploadBoxView::Validating {
                file_name: &state.file_name,
            },
        );
        self.render_status_panel(ctx, "Validating");
        self.render_central_panel(ctx);
        self.render_help_window(ctx);
        self.render_results_window(ctx);

        AppState::Validating(state.clone())
    }

    pub(crate) fn tick_uploading_state(
        &mut self,
        ctx: &Context,
        state: &mut UploadingState,
    ) -> AppState {
        ctx.request_repaint();

        match self.next_session_event() {
            Some(SessionEvent::Completed { records, .. }) => {
                return AppState::Done(self.apply_results(records));
            }
            Some(SessionEvent::Failed { error, .. }) => {
                self.session_rx = None;
                return AppState::Error(ErrorState {
                    message: error.to_string(),
                });
            }
            Some(SessionEvent::Validated { .. }) | None => {}
        }

        self.handle_global_shortcuts(ctx);
        self.render_top_panel(ctx);
        let _ = self.render_side_panel(
            ctx,
            UploadBoxView::Uploading {
                file_name: &state.file_name,
            },
        );
        self.render_status_panel(ctx, "Uploading");
        self.render_central_panel(ctx);
        self.render_help_window(ctx);
        self.render_results_window(ctx);

        AppState::Uploading(state.clone())
    }

    pub(crate) fn tick_done_state(&mut self, ctx: &Context, state: &mut DoneState) -> AppState {
        self.handle_global_shortcuts(ctx);
        self.render_top_panel(ctx);
        let action = self.render_side_panel(
            ctx,
            UploadBoxView::Done {
                row_count: state.row_count,
                prediction_count: state.prediction_count,
            },
        );
        self.render_status_panel(ctx, "Done");

        let start = AppInstant::now();
        self.render_central_panel(ctx);
        let plot_time = start.elapsed().as_micros();
        if plot_time > 500_000 && DF.log_performance {
            log::warn!("🐢 SLOW FRAME: Map: {}us", plot_time);
        }

        self.render_help_window(ctx);
        self.render_results_window(ctx);

        match action {
            Some(UploadAction::Reset) => return AppState::Idle(self.reset_session()),
            Some(UploadAction::Start(source)) => {
                return AppState::Validating(self.start_session(source));
            }
            None => {}
        }
        if let Some(source) = self.take_dropped_file(ctx) {
            return AppState::Validating(self.start_session(source));
        }

        AppState::Done(state.clone())
    }

    pub(crate) fn tick_error_state(&mut self, ctx: &Context, state: &mut ErrorState) -> AppState {
        self.handle_global_shortcuts(ctx);
        self.render_top_panel(ctx);
        let action = self.render_side_panel(
            ctx,
            UploadBoxView::Error {
                message: &state.message,
            },
        );
        self.render_status_panel(ctx, "Error");
        self.render_central_panel(ctx);
        self.render_help_window(ctx);
        self.render_results_window(ctx);

        match action {
            Some(UploadAction::Reset) => return AppState::Idle(self.reset_session()),
            Some(UploadAction::Start(source)) => {
                return AppState::Validating(self.start_session(source));
            }
            None => {}
        }
        if let Some(source) = self.take_dropped_file(ctx) {
            return AppState::Validating(self.start_session(source));
        }

        AppState::Error(state.clone())
    }

    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() {
            // If the user is typing in a text box, don't trigger global hotkeys.
            return;
        }

        ctx.input(|i| {
            if i.key_pressed(Key::Num1) {
                self.map_visibility.route = !self.map_visibility.route;
            }
            if i.key_pressed(Key::Num2) {
                self.map_visibility.points = !self.map_visibility.points;
            }
            if i.key_pressed(Key::Num3) {
                self.map_visibility.speed = !self.map_visibility.speed;
            }
            if i.key_pressed(Key::Num4) {
                self.map_visibility.legend = !self.map_visibility.legend;
            }
            if i.key_pressed(Key::T) {
                self.show_results_table = !self.show_results_table;
            }
            if i.key_pressed(Key::H) {
                self.show_how_it_works = !self.show_how_it_works;
            }
            if i.key_pressed(Key::Escape) {
                self.show_how_it_works = false;
                self.show_results_table = false;
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Idle(mut s) => s.tick(self, ctx),
            AppState::Validating(mut s) => s.tick(self, ctx),
            AppState::Uploading(mut s) => s.tick(self, ctx),
            AppState::Done(mut s) => s.tick(self, ctx),
            AppState::Error(mut s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ValidationError;
    use crate::domain::PredictionLabel;

    fn record(lon: f64, lat: f64) -> PredictionRecord {
        PredictionRecord {
            lon,
            lat,
            timestamp: "2025-06-14 09:30:00".to_string(),
            speed_kmh: 20.0,
            label: PredictionLabel::Normal,
            extras: Vec::new(),
        }
    }

    #[test]
    fn test_stale_session_events_are_dropped() {
        let mut app = App::default();
        let (tx, rx) = mpsc::channel();
        app.session_rx = Some(rx);
        app.attempt_seq = 2;

        tx.send(SessionEvent::Failed {
            attempt: 1,
            error: ValidationError::NotCsv.into(),
        })
        .unwrap();
        tx.send(SessionEvent::Validated {
            attempt: 2,
            summary: TelemetrySummary::default(),
        })
        .unwrap();

        match app.next_session_event() {
            Some(SessionEvent::Validated { attempt, .. }) => assert_eq!(attempt, 2),
            other => panic!("expected the live Validated event, got {other:?}"),
        }
        assert!(app.next_session_event().is_none());
    }

    #[test]
    fn test_apply_results_reports_both_counts() {
        let mut app = App::default();
        app.summary = Some(TelemetrySummary {
            file_name: "trip.v2.csv".to_string(),
            row_count: 3,
            ..Default::default()
        });

        let done = app.apply_results(vec![record(8.68, 50.11), record(8.69, 50.12)]);
        assert_eq!(done.row_count, 3, "row count comes from the validated upload");
        assert_eq!(done.prediction_count, 2);
        assert_eq!(app.current_file_stem, "trip.v2");
        assert_eq!(app.records.len(), 2);
        assert!(app.map_view.has_data());
        assert!(app.session_rx.is_none());
    }

    #[test]
    fn test_reset_keeps_results_on_screen() {
        let mut app = App::default();
        app.records = vec![record(8.68, 50.11)];
        app.attempt_seq = 3;
        app.path_input = "trip.csv".to_string();

        app.reset_session();
        assert_eq!(app.attempt_seq, 4, "in-flight reports become stale");
        assert!(!app.records.is_empty(), "the map keeps the last results");
        assert!(app.path_input.is_empty());
    }
}
