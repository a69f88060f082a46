//! Map visualization configuration

use eframe::egui::Color32;

pub struct MapConfig {
    pub searching_color: Color32,
    pub normal_color: Color32,
    // Labels the service invented that we have no palette entry for
    pub other_color: Color32,
    pub route_color: Color32,
    pub route_width: f32,
    pub route_opacity_pct: f32,
    pub point_radius: f32,
    pub point_opacity_pct: f32,

    // Gradient colors for speed visualization (slow -> fast)
    pub speed_gradient_colors: &'static [&'static str],
    pub speed_gradient_bins: usize,

    /// Viewport shown before any dataset arrives (Frankfurt am Main)
    pub default_center: [f64; 2],
    pub default_span_deg: f64,

    /// Padding applied around the dataset bounding box when fitting the viewport
    pub fit_padding_pct: f64,
    /// Floor for degenerate bounding boxes (single point or single row)
    pub min_span_deg: f64,
}

pub const MAP_CONFIG: MapConfig = MapConfig {
    searching_color: Color32::from_rgb(231, 76, 60), // #e74c3c
    normal_color: Color32::from_rgb(39, 174, 96),    // #27ae60
    other_color: Color32::from_rgb(41, 128, 185),    // #2980b9

    route_color: Color32::from_rgb(52, 73, 94), // #34495e
    route_width: 3.0,
    route_opacity_pct: 0.6,

    point_radius: 6.0,
    point_opacity_pct: 0.85,

    // From slow (deep blue) to fast (bright yellow)
    speed_gradient_colors: &[
        "#000080", // Navy blue
        "#4b0082", // Indigo
        "#ff8c00", // Dark orange
        "#ffb703", // Amber
        "#fbb41a", // Bright yellow
    ],
    speed_gradient_bins: 16,

    default_center: [8.6821, 50.1109],
    default_span_deg: 0.08,

    fit_padding_pct: 0.08,
    min_span_deg: 0.002,
};
