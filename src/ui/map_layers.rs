use std::collections::BTreeMap;

use colorgrad::{CatmullRomGradient, Gradient};
use eframe::egui::Color32;
use egui_plot::{Line, MarkerShape, PlotPoints, PlotUi, Points};

use crate::config::MAP_CONFIG;
use crate::domain::PredictionLabel;

use crate::ui::map_view::{MapDataset, MapVisibility};
use crate::ui::styles::{LabelColor, apply_opacity};
use crate::ui::ui_text::UI_TEXT;

pub struct LayerContext<'a> {
    pub dataset: &'a MapDataset,
    pub visibility: &'a MapVisibility,
    pub speed_gradient: &'a CatmullRomGradient,
}

pub trait MapLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================
// 1. ROUTE LINE LAYER
// ============================================================

pub struct RouteLineLayer;

impl MapLayer for RouteLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if ctx.dataset.route.len() < 2 {
            return;
        }
        plot_ui.line(
            Line::new(
                UI_TEXT.layer_route.as_str(),
                PlotPoints::new(ctx.dataset.route.clone()),
            )
            .color(apply_opacity(
                MAP_CONFIG.route_color,
                MAP_CONFIG.route_opacity_pct,
            ))
            .width(MAP_CONFIG.route_width),
        );
    }
}

// ============================================================
// 2. PREDICTION POINTS LAYER
// ============================================================

pub struct PredictionPointsLayer;

impl MapLayer for PredictionPointsLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        // Speed shading replaces the label palette while it is on.
        if ctx.visibility.speed {
            return;
        }

        let mut normal = Vec::new();
        let mut searching = Vec::new();
        // Unknown labels get their own legend entries, in a stable order.
        let mut other: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();

        for point in &ctx.dataset.points {
            let coord = [point.lon, point.lat];
            match &point.label {
                PredictionLabel::Normal => normal.push(coord),
                PredictionLabel::Searching => searching.push(coord),
                PredictionLabel::Other(name) => other.entry(name.clone()).or_default().push(coord),
            }
        }

        draw_point_group(plot_ui, &UI_TEXT.legend_normal, normal, PredictionLabel::Normal.color());
        for (name, coords) in other {
            draw_point_group(plot_ui, &name, coords, MAP_CONFIG.other_color);
        }
        // Searching points go on top, they are the signal everyone came for.
        draw_point_group(
            plot_ui,
            &UI_TEXT.legend_searching,
            searching,
            PredictionLabel::Searching.color(),
        );
    }
}

fn draw_point_group(plot_ui: &mut PlotUi, name: &str, coords: Vec<[f64; 2]>, color: Color32) {
    if coords.is_empty() {
        return;
    }
    plot_ui.points(
        Points::new(name.to_string(), PlotPoints::new(coords))
            .shape(MarkerShape::Circle)
            .radius(MAP_CONFIG.point_radius)
            .color(apply_opacity(color, MAP_CONFIG.point_opacity_pct)),
    );
}

// ============================================================
// 3. SPEED GRADIENT LAYER
// ============================================================

pub struct SpeedGradientLayer;

impl MapLayer for SpeedGradientLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let (min_speed, max_speed) = ctx.dataset.speed_range;
        let range = (max_speed - min_speed).max(f64::EPSILON);
        let bins = MAP_CONFIG.speed_gradient_bins;

        let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); bins];
        for point in &ctx.dataset.points {
            let t = ((point.speed_kmh - min_speed) / range).clamp(0.0, 1.0);
            let idx = ((t * bins as f64) as usize).min(bins - 1);
            buckets[idx].push([point.lon, point.lat]);
        }

        for (idx, coords) in buckets.into_iter().enumerate() {
            if coords.is_empty() {
                continue;
            }
            // Sample each bucket at its center so the two end colors survive.
            let t = (idx as f32 + 0.5) / bins as f32;
            let color = to_egui_color(ctx.speed_gradient.at(t));
            plot_ui.points(
                Points::new(String::new(), PlotPoints::new(coords))
                    .shape(MarkerShape::Circle)
                    .radius(MAP_CONFIG.point_radius)
                    .color(apply_opacity(color, MAP_CONFIG.point_opacity_pct)),
            );
        }
    }
}

fn to_egui_color(colorgrad_color: colorgrad::Color) -> Color32 {
    let rgba8 = colorgrad_color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba8[0], rgba8[1], rgba8[2], 255)
}
