mod phases;
mod root;
mod state;

pub(crate) use phases::PhaseView;
pub(crate) use state::{
    AppState, DoneState, ErrorState, IdleState, UploadingState, ValidatingState,
};

pub use root::App;
