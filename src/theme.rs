use crate::ir::Ticket;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Statuses that count as finished work for box styling.
static DONE_STATUSES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["released", "accepted", "approved"].into_iter().collect());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub surface: String,
    pub surface_border: String,
    pub default_fill: String,
    pub default_text: String,
    pub done_fill: String,
    pub done_text: String,
    pub story_fill: String,
    pub story_text: String,
    pub frame_stroke: String,
    pub arrow_stroke: String,
}

impl Theme {
    /// The dashboard's reference palette.
    pub fn dashboard() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            background: "#f8fafd".to_string(),
            surface: "#f8fafd".to_string(),
            surface_border: "#e0e4ea".to_string(),
            default_fill: "#fff".to_string(),
            default_text: "#222".to_string(),
            done_fill: "#4caf50".to_string(),
            done_text: "#fff".to_string(),
            story_fill: "#222".to_string(),
            story_text: "#fff".to_string(),
            frame_stroke: "#888".to_string(),
            arrow_stroke: "#333".to_string(),
        }
    }

    /// Print-friendly palette: no fills, everything outlined.
    pub fn monochrome() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 14.0,
            background: "#ffffff".to_string(),
            surface: "#ffffff".to_string(),
            surface_border: "#cccccc".to_string(),
            default_fill: "#ffffff".to_string(),
            default_text: "#000000".to_string(),
            done_fill: "#ffffff".to_string(),
            done_text: "#000000".to_string(),
            story_fill: "#ffffff".to_string(),
            story_text: "#000000".to_string(),
            frame_stroke: "#999999".to_string(),
            arrow_stroke: "#000000".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dashboard()
    }
}

/// Fill and text colors for one ticket box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxStyle {
    pub fill: String,
    pub text: String,
}

pub fn is_done(status: &str) -> bool {
    DONE_STATUSES.contains(status.to_lowercase().as_str())
}

/// Classify a ticket into its box colors. Finished tickets win over type
/// styling; stories get the emphasis fill; everything else is plain.
pub fn box_style(ticket: &Ticket, theme: &Theme) -> BoxStyle {
    if is_done(&ticket.status) {
        BoxStyle {
            fill: theme.done_fill.clone(),
            text: theme.done_text.clone(),
        }
    } else if ticket.kind == "Story" {
        BoxStyle {
            fill: theme.story_fill.clone(),
            text: theme.story_text.clone(),
        }
    } else {
        BoxStyle {
            fill: theme.default_fill.clone(),
            text: theme.default_text.clone(),
        }
    }
}
