//! Map surface. Plots predictions in plain lon/lat with an equirectangular
//! aspect correction, which reads fine at city scale without tiles.

use {
    colorgrad::CatmullRomGradient,
    eframe::egui::Ui,
    egui_plot::{Legend, Plot, PlotBounds},
    itertools::Itertools,
    serde::{Deserialize, Serialize},
};

use crate::{
    config::{DF, MAP_CONFIG},
    domain::{BoundingBox, PredictionLabel, PredictionRecord},
    ui::map_layers::{
        LayerContext, MapLayer, PredictionPointsLayer, RouteLineLayer, SpeedGradientLayer,
    },
};

/// Which map layers are drawn. Persisted across sessions.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct MapVisibility {
    pub route: bool,
    pub points: bool,
    pub speed: bool,
    pub legend: bool,
}

impl Default for MapVisibility {
    fn default() -> Self {
        Self {
            route: true,
            points: true,
            speed: false,
            legend: true,
        }
    }
}

/// One record reduced to what the layers need.
pub struct MapPoint {
    pub lon: f64,
    pub lat: f64,
    pub speed_kmh: f64,
    pub label: PredictionLabel,
}

/// Snapshot of one processed upload, ready to draw.
#[derive(Default)]
pub struct MapDataset {
    pub points: Vec<MapPoint>,
    pub route: Vec<[f64; 2]>,
    pub bbox: Option<BoundingBox>,
    pub speed_range: (f64, f64),
}

impl MapDataset {
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        let points = records
            .iter()
            .map(|r| MapPoint {
                lon: r.lon,
                lat: r.lat,
                speed_kmh: r.speed_kmh,
                label: r.label.clone(),
            })
            .collect();
        let route: Vec<[f64; 2]> = records.iter().map(|r| r.coords()).collect();
        let bbox = BoundingBox::from_coords(route.iter());
        let speed_range = records
            .iter()
            .map(|r| r.speed_kmh)
            .minmax()
            .into_option()
            .unwrap_or((0.0, 0.0));
        Self {
            points,
            route,
            bbox,
            speed_range,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Viewport shown before any dataset arrives.
fn default_viewport() -> BoundingBox {
    let [lon, lat] = MAP_CONFIG.default_center;
    let half = MAP_CONFIG.default_span_deg / 2.0;
    BoundingBox {
        lon_min: lon - half,
        lon_max: lon + half,
        lat_min: lat - half,
        lat_max: lat + half,
    }
}

pub struct MapView {
    dataset: MapDataset,
    pending: Option<MapDataset>,
    fit_request: Option<BoundingBox>,
    surface_ready: bool,
    speed_gradient: CatmullRomGradient,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        let speed_gradient = colorgrad::GradientBuilder::new()
            .html_colors(MAP_CONFIG.speed_gradient_colors)
            .build::<CatmullRomGradient>()
            .expect("Failed to create color gradient");
        Self {
            dataset: MapDataset::default(),
            pending: None,
            fit_request: None,
            surface_ready: false,
            speed_gradient,
        }
    }

    /// Stage a dataset. It replaces whatever is on the map between frames,
    /// never mid-draw, and schedules a viewport fit around its bounds.
    pub fn queue_dataset(&mut self, dataset: MapDataset) {
        if DF.log_map_updates {
            log::info!("map dataset queued: {} points", dataset.points.len());
        }
        self.pending = Some(dataset);
    }

    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty() || self.pending.is_some()
    }

    /// Promote the staged dataset once the surface has been laid out at
    /// least once. Swapping between frames keeps every draw on one dataset.
    fn promote_pending(&mut self) {
        if !self.surface_ready {
            return;
        }
        if let Some(next) = self.pending.take() {
            self.fit_request = next
                .bbox
                .map(|b| b.padded(MAP_CONFIG.fit_padding_pct, MAP_CONFIG.min_span_deg));
            self.dataset = next;
        }
    }

    pub fn show(&mut self, ui: &mut Ui, visibility: &MapVisibility) {
        self.promote_pending();

        let viewport = self.dataset.bbox.unwrap_or_else(default_viewport);
        let first_frame = !self.surface_ready;

        let mut plot = Plot::new("map_plot")
            .data_aspect(viewport.equirect_aspect() as f32)
            .allow_double_click_reset(false)
            .label_formatter(|_name, point| format!("{:.5}, {:.5}", point.y, point.x));
        if visibility.legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            if let Some(fit) = self.fit_request.take() {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [fit.lon_min, fit.lat_min],
                    [fit.lon_max, fit.lat_max],
                ));
            } else if first_frame {
                let v = default_viewport();
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [v.lon_min, v.lat_min],
                    [v.lon_max, v.lat_max],
                ));
            }

            // --- LAYER STACK ---
            let ctx = LayerContext {
                dataset: &self.dataset,
                visibility,
                speed_gradient: &self.speed_gradient,
            };

            let mut layers: Vec<Box<dyn MapLayer>> = Vec::with_capacity(3);
            if visibility.route {
                layers.push(Box::new(RouteLineLayer));
            }
            // Note: 'speed' is handled internally by PredictionPointsLayer
            if visibility.points {
                layers.push(Box::new(PredictionPointsLayer));
            }
            if visibility.speed {
                layers.push(Box::new(SpeedGradientLayer));
            }

            for layer in layers {
                layer.render(plot_ui, &ctx);
            }
        });

        self.surface_ready = true;
    }
}
