pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod theme;

pub use config::{Config, LayoutConfig, load_config};
pub use ir::{Ticket, load_tickets, tickets_from_json};
pub use layout::{DiagramLayout, compute_diagram_layout};
pub use theme::{BoxStyle, Theme, box_style};
