use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry knobs for the diagram layout.
///
/// The defaults reproduce the dashboard's reference rendering; every value
/// is a pixel quantity except `char_width_ratio`, the width of one glyph as
/// a fraction of the summary font size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub box_width: f32,
    pub min_box_height: f32,
    pub vertical_gap: f32,
    pub horizontal_gap: f32,
    pub diagram_padding: f32,
    pub summary_font_size: f32,
    pub summary_line_height: f32,
    pub summary_padding: f32,
    pub char_width_ratio: f32,
    /// Fixed space above the summary for the key, type and status lines.
    pub box_header_height: f32,
    /// Fixed space below the summary for the assignee row.
    pub assignee_row_height: f32,
    /// Inset between a frame border and its first row / left column.
    pub frame_padding: f32,
    /// Gap between the dashed borders of consecutive frames.
    pub frame_gap: f32,
    /// Buffer on each side of a frame accounting for the border stroke.
    pub frame_border_buffer: f32,
    /// Extra depth added to a frame box for its label band.
    pub frame_label_allowance: f32,
    /// Vertical drop between the tallest frame and the unframed row.
    pub unframed_drop: f32,
    /// Height reserved for the unframed row when sizing the canvas.
    pub unframed_row_allowance: f32,
    pub bottom_margin: f32,
    /// Uniform vertical shift applied by the finalizer pass.
    pub y_offset: f32,
    /// Distance an arrow stops short below its target box.
    pub arrow_clearance: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            box_width: 200.0,
            min_box_height: 80.0,
            vertical_gap: 80.0,
            horizontal_gap: 40.0,
            diagram_padding: 60.0,
            summary_font_size: 14.0,
            summary_line_height: 16.0,
            summary_padding: 16.0,
            char_width_ratio: 0.6,
            box_header_height: 70.0,
            assignee_row_height: 36.0,
            frame_padding: 24.0,
            frame_gap: 30.0,
            frame_border_buffer: 10.0,
            frame_label_allowance: 60.0,
            unframed_drop: 120.0,
            unframed_row_allowance: 180.0,
            bottom_margin: 120.0,
            y_offset: 10.0,
            arrow_clearance: 20.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::dashboard(),
            layout: LayoutConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    surface: Option<String>,
    surface_border: Option<String>,
    default_fill: Option<String>,
    default_text: Option<String>,
    done_fill: Option<String>,
    done_text: Option<String>,
    story_fill: Option<String>,
    story_text: Option<String>,
    frame_stroke: Option<String>,
    arrow_stroke: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LayoutConfigFile {
    box_width: Option<f32>,
    min_box_height: Option<f32>,
    vertical_gap: Option<f32>,
    horizontal_gap: Option<f32>,
    diagram_padding: Option<f32>,
    summary_font_size: Option<f32>,
    summary_line_height: Option<f32>,
    summary_padding: Option<f32>,
    char_width_ratio: Option<f32>,
    box_header_height: Option<f32>,
    assignee_row_height: Option<f32>,
    frame_padding: Option<f32>,
    frame_gap: Option<f32>,
    frame_border_buffer: Option<f32>,
    frame_label_allowance: Option<f32>,
    unframed_drop: Option<f32>,
    unframed_row_allowance: Option<f32>,
    bottom_margin: Option<f32>,
    y_offset: Option<f32>,
    arrow_clearance: Option<f32>,
}

/// Load a config file (JSON5, so comments are allowed) over the defaults.
/// `None` yields the default configuration.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = match theme_name {
            "monochrome" => Theme::monochrome(),
            _ => Theme::dashboard(),
        };
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(layout) = parsed.layout {
        apply_layout_overrides(&mut config.layout, layout);
    }

    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.surface {
        theme.surface = v;
    }
    if let Some(v) = vars.surface_border {
        theme.surface_border = v;
    }
    if let Some(v) = vars.default_fill {
        theme.default_fill = v;
    }
    if let Some(v) = vars.default_text {
        theme.default_text = v;
    }
    if let Some(v) = vars.done_fill {
        theme.done_fill = v;
    }
    if let Some(v) = vars.done_text {
        theme.done_text = v;
    }
    if let Some(v) = vars.story_fill {
        theme.story_fill = v;
    }
    if let Some(v) = vars.story_text {
        theme.story_text = v;
    }
    if let Some(v) = vars.frame_stroke {
        theme.frame_stroke = v;
    }
    if let Some(v) = vars.arrow_stroke {
        theme.arrow_stroke = v;
    }
}

fn apply_layout_overrides(layout: &mut LayoutConfig, file: LayoutConfigFile) {
    if let Some(v) = file.box_width {
        layout.box_width = v;
    }
    if let Some(v) = file.min_box_height {
        layout.min_box_height = v;
    }
    if let Some(v) = file.vertical_gap {
        layout.vertical_gap = v;
    }
    if let Some(v) = file.horizontal_gap {
        layout.horizontal_gap = v;
    }
    if let Some(v) = file.diagram_padding {
        layout.diagram_padding = v;
    }
    if let Some(v) = file.summary_font_size {
        layout.summary_font_size = v;
    }
    if let Some(v) = file.summary_line_height {
        layout.summary_line_height = v;
    }
    if let Some(v) = file.summary_padding {
        layout.summary_padding = v;
    }
    if let Some(v) = file.char_width_ratio {
        layout.char_width_ratio = v;
    }
    if let Some(v) = file.box_header_height {
        layout.box_header_height = v;
    }
    if let Some(v) = file.assignee_row_height {
        layout.assignee_row_height = v;
    }
    if let Some(v) = file.frame_padding {
        layout.frame_padding = v;
    }
    if let Some(v) = file.frame_gap {
        layout.frame_gap = v;
    }
    if let Some(v) = file.frame_border_buffer {
        layout.frame_border_buffer = v;
    }
    if let Some(v) = file.frame_label_allowance {
        layout.frame_label_allowance = v;
    }
    if let Some(v) = file.unframed_drop {
        layout.unframed_drop = v;
    }
    if let Some(v) = file.unframed_row_allowance {
        layout.unframed_row_allowance = v;
    }
    if let Some(v) = file.bottom_margin {
        layout.bottom_margin = v;
    }
    if let Some(v) = file.y_offset {
        layout.y_offset = v;
    }
    if let Some(v) = file.arrow_clearance {
        layout.arrow_clearance = v;
    }
}
