use eframe::egui::{
    CentralPanel, Context, Grid, Order, RichText, TopBottomPanel, Ui, Window,
};
use egui_extras::{Column, TableBuilder};

use crate::app::App;
use crate::ui::styles::{LabelColor, UiStyleExt};
use crate::ui::ui_config::{UI_CONFIG, UI_TEXT};

impl App {
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.top_panel_frame();

        TopBottomPanel::top("top_toolbar")
            .frame(frame)
            .min_height(30.0)
            .resizable(false)
            .show(ctx, |ui| {
                // --- TOP TOOLBAR ---
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&UI_TEXT.app_title)
                            .strong()
                            .color(UI_CONFIG.colors.heading),
                    );

                    ui.separator();

                    // LAYER VISIBILITY
                    ui.checkbox(&mut self.map_visibility.route, UI_TEXT.tb_route.as_str());
                    ui.checkbox(&mut self.map_visibility.points, UI_TEXT.tb_points.as_str());
                    ui.checkbox(&mut self.map_visibility.speed, UI_TEXT.tb_speed.as_str());
                    ui.checkbox(&mut self.map_visibility.legend, UI_TEXT.tb_legend.as_str());

                    ui.separator();

                    // OVERLAYS
                    if ui
                        .selectable_label(self.show_results_table, UI_TEXT.tb_table.as_str())
                        .clicked()
                    {
                        self.show_results_table = !self.show_results_table;
                    }
                    if ui
                        .selectable_label(self.show_how_it_works, UI_TEXT.hiw_toggle.as_str())
                        .clicked()
                    {
                        self.show_how_it_works = !self.show_how_it_works;
                    }
                });

                ui.label_subdued(&UI_TEXT.app_tagline);
            });
    }

    pub(crate) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = UI_CONFIG.central_panel_frame();

        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if !self.map_view.has_data() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label_subdued(&UI_TEXT.map_empty_hint);
                        ui.add_space(6.0);
                    });
                }
                self.map_view.show(ui, &self.map_visibility);
            });
    }

    pub(crate) fn render_status_panel(&mut self, ctx: &Context, stage: &str) {
        let frame = UI_CONFIG.bottom_panel_frame();

        TopBottomPanel::bottom("status_panel")
            .frame(frame)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric(&UI_TEXT.sp_stage, stage, UI_CONFIG.colors.heading);
                    ui.separator();

                    if let Some(summary) = &self.summary {
                        ui.metric(
                            &UI_TEXT.sp_rows,
                            &summary.row_count.to_string(),
                            UI_CONFIG.colors.label,
                        );
                        ui.separator();
                    }

                    if !self.records.is_empty() {
                        ui.metric(
                            &UI_TEXT.sp_predictions,
                            &self.records.len().to_string(),
                            UI_CONFIG.colors.success,
                        );
                        ui.separator();
                    }

                    let host = self
                        .endpoint_url
                        .split('/')
                        .nth(2)
                        .unwrap_or(self.endpoint_url.as_str());
                    ui.metric(&UI_TEXT.sp_endpoint, host, UI_CONFIG.colors.text_subdued);
                });
            });
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong());
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(crate) fn render_help_window(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.hiw_title.as_str())
            .open(&mut self.show_how_it_works)
            .resizable(false)
            .order(Order::Tooltip) // The map plot redraws on Order::Foreground, windows must sit above it
            .collapsible(false)
            .default_width(420.0)
            .show(ctx, |ui| {
                for (lead, rest) in UI_TEXT.hiw_steps {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(*lead).strong());
                        ui.label(*rest);
                    });
                }

                ui.add_space(10.0);
                ui.separator();
                ui.label_subheader(&UI_TEXT.hiw_requirements);
                ui.add_space(5.0);

                ui.label(&UI_TEXT.hiw_required_columns);
                Grid::new("required_columns_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for (column, meaning) in UI_TEXT.hiw_req_rows {
                            ui.label(RichText::new(*column).monospace().strong());
                            ui.label(*meaning);
                            ui.end_row();
                        }
                    });
                ui.label_subdued(&UI_TEXT.hiw_additional_columns);

                ui.add_space(10.0);
                ui.separator();
                ui.label_subheader(&UI_TEXT.hiw_constraints);
                ui.add_space(5.0);

                for row in UI_TEXT.hiw_constraint_rows {
                    ui.label(format!("• {}", row));
                }

                ui.add_space(10.0);
                ui.separator();
                ui.label_subheader(&UI_TEXT.kbs_heading);
                ui.add_space(5.0);

                Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, UI_TEXT.kbs_rows);
                    });
            });
    }

    pub(crate) fn render_results_window(&mut self, ctx: &Context) {
        if self.records.is_empty() {
            return;
        }

        let mut open = self.show_results_table;
        Window::new(UI_TEXT.rt_heading.as_str())
            .open(&mut open)
            .order(Order::Tooltip)
            .default_width(480.0)
            .default_height(320.0)
            .show(ctx, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .column(Column::auto())
                    .column(Column::auto())
                    .column(Column::auto())
                    .column(Column::remainder())
                    .column(Column::auto())
                    .column(Column::auto())
                    .header(20.0, |mut header| {
                        for title in ["#", "lon", "lat", "timestamp", "speed_kmh", "label"] {
                            header.col(|ui| {
                                ui.label(RichText::new(title).monospace().strong());
                            });
                        }
                    })
                    .body(|body| {
                        let records = &self.records;
                        body.rows(18.0, records.len(), |mut row| {
                            let index = row.index();
                            let record = &records[index];
                            row.col(|ui| {
                                ui.label_subdued((index + 1).to_string());
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.5}", record.lon));
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.5}", record.lat));
                            });
                            row.col(|ui| {
                                ui.label(record.timestamp.as_str());
                            });
                            row.col(|ui| {
                                ui.label(format!("{:.1}", record.speed_kmh));
                            });
                            row.col(|ui| {
                                ui.label(
                                    RichText::new(record.label.to_string())
                                        .color(record.label.color()),
                                );
                            });
                        });
                    });
            });
        self.show_results_table = open;
    }
}
