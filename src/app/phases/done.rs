// app/phases/done.rs

use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::DoneState};

impl PhaseView for DoneState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_done_state(ctx, self)
    }
}
