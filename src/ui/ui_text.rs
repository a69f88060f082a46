use std::sync::LazyLock;

pub const ICON_WARNING: &str = "⚠";
pub const ICON_HELP: &str = "❓";
pub const ICON_CLIPBOARD: &str = "📋";
pub const ICON_SAVE: &str = "💾";
pub const ICON_OK: &str = "✔";
pub const ICON_UPLOAD: &str = "⬆";
pub const ICON_PIN: &str = "📍";
pub const ICON_TABLE: &str = "📊";

pub struct UiText {
    // --- App chrome ---
    pub app_title: String,
    pub app_tagline: String,

    // --- Upload box ---
    pub up_drag_here: String,
    pub up_select_file: String,
    pub up_load_sample: String,
    pub up_path_hint: String,
    pub up_validating: String,
    pub up_uploading: String,
    pub up_another: String,
    pub up_rows_processed: String,

    // --- Summary card ---
    pub sum_heading: String,
    pub sum_file: String,
    pub sum_size: String,
    pub sum_rows: String,
    pub sum_span: String,
    pub sum_median: String,

    // --- Map ---
    pub map_empty_hint: String,
    pub legend_normal: String,
    pub legend_searching: String,
    pub layer_route: String,

    // --- Toolbar ---
    pub tb_route: String,
    pub tb_points: String,
    pub tb_speed: String,
    pub tb_legend: String,
    pub tb_table: String,

    // --- Results table ---
    pub rt_heading: String,

    // --- Export ---
    pub ex_copy: String,
    pub ex_save: String,
    pub ex_copied: String,

    // --- How it works (static slices for the grids) ---
    pub hiw_toggle: String,
    pub hiw_title: String,
    pub hiw_steps: &'static [(&'static str, &'static str)],
    pub hiw_requirements: String,
    pub hiw_required_columns: String,
    pub hiw_req_rows: &'static [(&'static str, &'static str)],
    pub hiw_additional_columns: String,
    pub hiw_constraints: String,
    pub hiw_constraint_rows: &'static [&'static str],

    // --- Status panel ---
    pub sp_stage: String,
    pub sp_endpoint: String,
    pub sp_rows: String,
    pub sp_predictions: String,

    // --- Keyboard shortcuts ---
    pub kbs_heading: String,
    pub kbs_rows: &'static [(&'static str, &'static str)],

    // --- Icons ---
    pub icon_warning: String,
    pub icon_ok: String,
}

// THE SINGLETON
pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| {
    UiText {
        app_title: "Park Scout – Understanding parking search with AI".to_string(),
        app_tagline:
            "Upload your CSV file, analyze parking search behavior, and visualize the results on an interactive map."
                .to_string(),

        // Upload box
        up_drag_here: "Drag your CSV file here or".to_string(),
        up_select_file: ICON_UPLOAD.to_string() + " Select File",
        up_load_sample: "Try the sample trip".to_string(),
        up_path_hint: "path/to/trip.csv".to_string(),
        up_validating: "Validating file...".to_string(),
        up_uploading: "Uploading and processing file...".to_string(),
        up_another: "Upload another file".to_string(),
        up_rows_processed: "rows processed".to_string(),

        // Summary card
        sum_heading: "Upload Summary".to_string(),
        sum_file: "File".to_string(),
        sum_size: "Size".to_string(),
        sum_rows: "Rows".to_string(),
        sum_span: "Time span".to_string(),
        sum_median: "Median interval".to_string(),

        // Map
        map_empty_hint: "Predictions appear here once a file is processed.".to_string(),
        legend_normal: "Normal driving".to_string(),
        legend_searching: "Searching for parking".to_string(),
        layer_route: "Route".to_string(),

        // Toolbar
        tb_route: "Route".to_string(),
        tb_points: "Predictions".to_string(),
        tb_speed: "Speed".to_string(),
        tb_legend: "Legend".to_string(),
        tb_table: ICON_TABLE.to_string() + " Table",

        // Results table
        rt_heading: "Predictions".to_string(),

        // Export
        ex_copy: ICON_CLIPBOARD.to_string() + " Copy CSV",
        ex_save: ICON_SAVE.to_string() + " Save CSV",
        ex_copied: "Predictions copied to the clipboard.".to_string(),

        // How it works
        hiw_toggle: ICON_HELP.to_string() + " How It Works",
        hiw_title: "How It Works".to_string(),
        hiw_steps: &[
            ("Upload your CSV file:", "Click the upload button and select your CSV file."),
            ("Automatic validation:", "We quickly check the file against our criteria."),
            ("See the magic:", "Explore your data on the interactive map."),
        ],
        hiw_requirements: "Requirements".to_string(),
        hiw_required_columns: ICON_PIN.to_string() + " Required columns:",
        hiw_req_rows: &[
            ("lon", "Longitude (decimal)"),
            ("lat", "Latitude (decimal)"),
            ("timestamp", "Datetime (e.g. YYYY-MM-DD HH:MM:SS)"),
            ("speed_kmh", "Speed in km/h (non-negative)"),
        ],
        hiw_additional_columns: "Additional columns are allowed.".to_string(),
        hiw_constraints: "File Constraints".to_string(),
        hiw_constraint_rows: &[
            "Max file size: 10 MB",
            "Rows < 10 000",
            "Data span ≤ 30 days",
            "Median interval < 20 s between points",
        ],

        // Status panel
        sp_stage: "Stage".to_string(),
        sp_endpoint: "Endpoint".to_string(),
        sp_rows: "Rows".to_string(),
        sp_predictions: "Predictions".to_string(),

        // Keyboard shortcuts
        kbs_heading: "Keyboard Shortcuts".to_string(),
        kbs_rows: &[
            ("1", "Toggle route line"),
            ("2", "Toggle prediction points"),
            ("3", "Toggle speed shading"),
            ("4", "Toggle legend"),
            ("T", "Toggle predictions table"),
            ("H", "How It Works"),
            ("Esc", "Close overlays"),
        ],

        // Icons
        icon_warning: ICON_WARNING.to_string(),
        icon_ok: ICON_OK.to_string(),
    }
});
