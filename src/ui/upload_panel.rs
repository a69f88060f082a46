// src/ui/upload_panel.rs

use eframe::egui::{Context, Grid, RichText, SidePanel, Ui};

use crate::app::App;
#[cfg(not(target_arch = "wasm32"))]
use {
    crate::data::write_csv_file,
    eframe::egui::TextEdit,
    std::path::PathBuf,
};
use crate::data::{FileSource, render_csv, sample_trip};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_config::{UI_CONFIG, UI_TEXT};
use crate::utils::format_duration;

/// What the upload box shows this frame. Borrowed from the active phase
/// state, so the tick methods stay the single owner of transition data.
pub(crate) enum UploadBoxView<'a> {
    Idle,
    Validating { file_name: &'a str },
    Uploading { file_name: &'a str },
    Done { row_count: usize, prediction_count: usize },
    Error { message: &'a str },
}

/// Session commands raised by the upload box buttons.
pub(crate) enum UploadAction {
    Start(FileSource),
    Reset,
}

impl App {
    pub(crate) fn render_side_panel(
        &mut self,
        ctx: &Context,
        view: UploadBoxView,
    ) -> Option<UploadAction> {
        let frame = UI_CONFIG.side_panel_frame();
        let mut action = None;

        SidePanel::left("upload_panel")
            .min_width(240.0)
            .resizable(false)
            .frame(frame)
            .show(ctx, |ui| {
                ui.add_space(5.0);
                action = self.render_upload_box(ui, view);

                ui.add_space(10.0);
                self.render_summary_card(ui);

                if !self.records.is_empty() {
                    ui.add_space(10.0);
                    self.render_export_controls(ui);
                }
            });

        action
    }

    fn render_upload_box(&mut self, ui: &mut Ui, view: UploadBoxView) -> Option<UploadAction> {
        let mut action = None;

        UI_CONFIG.upload_box_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| match view {
                UploadBoxView::Idle => {
                    ui.label(&UI_TEXT.up_drag_here);
                    ui.add_space(6.0);

                    #[cfg(not(target_arch = "wasm32"))]
                    {
                        ui.add(
                            TextEdit::singleline(&mut self.path_input)
                                .hint_text(UI_TEXT.up_path_hint.as_str()),
                        );
                        let label = ui.button_text_primary(&UI_TEXT.up_select_file);
                        if ui.button(label).clicked() && !self.path_input.trim().is_empty() {
                            let path = PathBuf::from(self.path_input.trim());
                            action = Some(UploadAction::Start(FileSource::Path(path)));
                        }
                        ui.add_space(6.0);
                    }

                    if ui.button(&UI_TEXT.up_load_sample).clicked() {
                        action = Some(UploadAction::Start(FileSource::Memory(sample_trip())));
                    }
                }
                UploadBoxView::Validating { file_name } => {
                    ui.spinner();
                    ui.add_space(6.0);
                    ui.label(&UI_TEXT.up_validating);
                    ui.label_subdued(file_name);
                }
                UploadBoxView::Uploading { file_name } => {
                    ui.spinner();
                    ui.add_space(6.0);
                    ui.label(&UI_TEXT.up_uploading);
                    ui.label_subdued(file_name);
                }
                UploadBoxView::Done {
                    row_count,
                    prediction_count,
                } => {
                    let message = format!(
                        "{} Processed successfully. Received {} predictions.",
                        UI_TEXT.icon_ok, prediction_count
                    );
                    ui.label(RichText::new(message).color(UI_CONFIG.colors.success));
                    ui.label_subdued(format!("{} {}", row_count, UI_TEXT.up_rows_processed));
                    ui.add_space(6.0);
                    if ui.button(&UI_TEXT.up_another).clicked() {
                        action = Some(UploadAction::Reset);
                    }
                }
                UploadBoxView::Error { message } => {
                    let message = format!("{} {}", UI_TEXT.icon_warning, message);
                    ui.label(RichText::new(message).color(UI_CONFIG.colors.error));
                    ui.add_space(6.0);
                    if ui.button(&UI_TEXT.up_another).clicked() {
                        action = Some(UploadAction::Reset);
                    }
                }
            });
        });

        action
    }

    fn render_summary_card(&self, ui: &mut Ui) {
        let Some(summary) = &self.summary else {
            return;
        };

        ui.label_subheader(&UI_TEXT.sum_heading);

        Grid::new("summary_grid")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label_subdued(&UI_TEXT.sum_file);
                ui.label(summary.file_name.as_str());
                ui.end_row();

                ui.label_subdued(&UI_TEXT.sum_size);
                ui.label(format_size(summary.file_size_bytes));
                ui.end_row();

                ui.label_subdued(&UI_TEXT.sum_rows);
                ui.label(summary.row_count.to_string());
                ui.end_row();

                if let Some(span_ms) = summary.span_ms {
                    ui.label_subdued(&UI_TEXT.sum_span);
                    ui.label(format_duration(span_ms.max(0)));
                    ui.end_row();
                }

                if let Some(median_ms) = summary.median_interval_ms {
                    ui.label_subdued(&UI_TEXT.sum_median);
                    ui.label(format!("{:.1} s", median_ms / 1000.0));
                    ui.end_row();
                }
            });

        if summary.has_warnings() {
            ui.add_space(4.0);
        }
        for warning in &summary.warnings {
            let text = format!("{} {}", UI_TEXT.icon_warning, warning);
            ui.label(
                RichText::new(text)
                    .small()
                    .color(UI_CONFIG.colors.warning),
            );
        }
    }

    fn render_export_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button(&UI_TEXT.ex_copy).clicked() {
                if let Some(text) = render_csv(&self.records) {
                    ui.ctx().copy_text(text);
                    self.export_notice = Some(UI_TEXT.ex_copied.clone());
                }
            }

            #[cfg(not(target_arch = "wasm32"))]
            if ui.button(&UI_TEXT.ex_save).clicked() {
                if let Some(text) = render_csv(&self.records) {
                    match write_csv_file(&self.current_file_stem, &text) {
                        Ok(path) => {
                            self.export_notice = Some(format!("Saved {}", path.display()));
                        }
                        Err(err) => {
                            log::error!("CSV save failed: {err:#}");
                            self.export_notice =
                                Some(format!("{} Save failed: {err}", UI_TEXT.icon_warning));
                        }
                    }
                }
            }
        });

        if let Some(notice) = &self.export_notice {
            ui.label_subdued(notice.as_str());
        }
    }
}

fn format_size(bytes: usize) -> String {
    if bytes >= 1_000_000 {
        format!("{:.1} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_picks_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2_048), "2.0 KB");
        assert_eq!(format_size(3_500_000), "3.5 MB");
    }
}
