mod map_layers;
mod map_view;
mod styles;
mod ui_config;
mod ui_render;
mod ui_text;
mod upload_panel;

pub(crate) use map_view::{MapDataset, MapView, MapVisibility};

pub(crate) use ui_config::UI_CONFIG;

pub(crate) use upload_panel::{UploadAction, UploadBoxView};
