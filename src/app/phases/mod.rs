pub(super) mod phase_view;

pub(super) mod done;
pub(super) mod error;
pub(super) mod idle;
pub(super) mod uploading;
pub(super) mod validating;

pub(crate) use phase_view::PhaseView;
