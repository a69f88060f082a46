// app/phases/error.rs

use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::ErrorState};

impl PhaseView for ErrorState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_error_state(ctx, self)
    }
}
