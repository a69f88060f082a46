// src/app/state.rs

pub(crate) enum AppState {
    Idle(IdleState),
    Validating(ValidatingState),
    Uploading(UploadingState),
    Done(DoneState),
    Error(ErrorState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Idle(IdleState)
    }
}

#[derive(Default, Clone)]
pub(crate) struct IdleState;

#[derive(Clone)]
pub(crate) struct ValidatingState {
    pub(crate) file_name: String,
}

#[derive(Clone)]
pub(crate) struct UploadingState {
    pub(crate) file_name: String,
}

#[derive(Clone)]
pub(crate) struct DoneState {
    pub(crate) row_count: usize,
    pub(crate) prediction_count: usize,
}

#[derive(Clone)]
pub(crate) struct ErrorState {
    pub(crate) message: String,
}
