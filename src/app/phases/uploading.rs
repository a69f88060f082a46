// app/phases/uploading.rs

use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::UploadingState};

impl PhaseView for UploadingState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_uploading_state(ctx, self)
    }
}
