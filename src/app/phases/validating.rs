// app/phases/validating.rs

use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::ValidatingState};

impl PhaseView for ValidatingState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_validating_state(ctx, self)
    }
}
