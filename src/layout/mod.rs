mod arrow;
mod frame;
mod group;
mod level;
mod text;
pub(crate) mod types;

pub use types::*;

use arrow::build_arrows;
use frame::{layout_frame, layout_unframed, pack_frames};
use group::partition;
use level::{build_level_map, is_leaf};
use text::{estimate_box_height, summary_block};

use crate::config::LayoutConfig;
use crate::ir::Ticket;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Compute the full diagram layout for one ticket set.
///
/// This is a pure pass over the input: tickets are partitioned into
/// dependency frames, each frame's rows are placed by blocking level,
/// frames are packed side by side, loose tickets land in a row below, and
/// a final shift-and-envelope pass produces the canvas rectangle. The
/// input is never mutated and nothing is retained between calls.
pub fn compute_diagram_layout(tickets: &[Ticket], config: &LayoutConfig) -> DiagramLayout {
    if tickets.is_empty() {
        return DiagramLayout::empty(config.box_width);
    }

    let part = partition(tickets);
    debug!(
        "layout: {} tickets, {} frames, {} unframed",
        tickets.len(),
        part.groups.len(),
        part.unframed.len()
    );

    let mut boxes: BTreeMap<String, TicketLayout> = tickets
        .iter()
        .map(|ticket| {
            let summary = summary_block(&ticket.summary, config);
            let height = estimate_box_height(&summary, config);
            (
                ticket.key.clone(),
                TicketLayout {
                    key: ticket.key.clone(),
                    x: 0.0,
                    y: 0.0,
                    height,
                    level: None,
                    frame: None,
                    summary,
                },
            )
        })
        .collect();

    let frames_top = config.y_offset + config.diagram_padding;
    let mut frames: Vec<FrameLayout> = Vec::new();
    let mut frame_roots: BTreeSet<String> = BTreeSet::new();

    for (index, members) in part.groups.iter().enumerate() {
        let group_keys: HashSet<&str> =
            members.iter().map(|ticket| ticket.key.as_str()).collect();
        let levels = build_level_map(members, &group_keys);
        for ticket in members {
            if is_leaf(ticket, &group_keys) {
                frame_roots.insert(ticket.key.clone());
            }
        }
        let rows = rows_by_level(members, &levels);
        trace!("frame {index}: {} tickets in {} rows", members.len(), rows.len());
        frames.push(layout_frame(index, &rows, frames_top, config, &mut boxes));
    }

    let mut width = pack_frames(&mut frames, &mut boxes, config);
    let max_frame_height = frames
        .iter()
        .map(FrameLayout::height)
        .fold(0.0_f32, f32::max);

    layout_unframed(&part.unframed, frames_top, max_frame_height, config, &mut boxes);
    if !part.unframed.is_empty() {
        let count = part.unframed.len() as f32;
        let row_width = count * (config.box_width + config.horizontal_gap)
            - config.horizontal_gap
            + 2.0 * config.frame_padding;
        width = width.max(row_width + 2.0 * config.diagram_padding);
    }

    let height = max_frame_height
        + if part.unframed.is_empty() {
            0.0
        } else {
            config.unframed_drop + config.unframed_row_allowance
        }
        + 2.0 * config.diagram_padding
        + config.bottom_margin;

    // Finalizer: one uniform vertical shift, applied to boxes and frames
    // alike so relative layout is unchanged, plus the frame label band.
    for placed in boxes.values_mut() {
        placed.y += config.y_offset;
    }
    for frame in &mut frames {
        frame.min_y += config.y_offset;
        frame.max_y += config.y_offset + config.frame_label_allowance;
    }

    let arrows = build_arrows(tickets, &boxes, config);

    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for placed in boxes.values() {
        min_x = min_x.min(placed.x);
        max_x = max_x.max(placed.x + config.box_width);
        max_y = max_y.max(placed.y + placed.height);
    }
    min_x -= config.diagram_padding;
    max_x += config.diagram_padding;
    max_y += config.diagram_padding + config.bottom_margin;

    let grouped_keys: BTreeSet<String> = frames
        .iter()
        .flat_map(|frame| frame.keys.iter().cloned())
        .collect();
    let unframed: Vec<String> = part
        .unframed
        .iter()
        .map(|ticket| ticket.key.clone())
        .collect();

    DiagramLayout {
        tickets: boxes,
        frames,
        frame_roots,
        grouped_keys,
        unframed,
        arrows,
        box_width: config.box_width,
        width,
        height,
        min_x,
        max_x,
        max_y,
    }
}

/// Bucket a frame's tickets into rows by level value, preserving input
/// order inside each row. Levels can leave gaps when a blocking cycle got
/// clamped; such rows stay empty and still reserve vertical space.
fn rows_by_level<'a>(
    members: &[&'a Ticket],
    levels: &HashMap<&'a str, usize>,
) -> Vec<Vec<&'a Ticket>> {
    let max_level = levels.values().copied().max().unwrap_or(0);
    let mut rows: Vec<Vec<&'a Ticket>> = vec![Vec::new(); max_level + 1];
    for ticket in members {
        let level = levels.get(ticket.key.as_str()).copied().unwrap_or(0);
        rows[level].push(ticket);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::tickets_from_json;

    #[test]
    fn empty_input_yields_a_zero_canvas() {
        let layout = compute_diagram_layout(&[], &LayoutConfig::default());
        assert!(layout.tickets.is_empty());
        assert!(layout.frames.is_empty());
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.height, 0.0);
        assert_eq!(layout.max_y, 0.0);
    }

    #[test]
    fn every_input_key_is_placed_exactly_once() {
        let config = LayoutConfig::default();
        let tickets = tickets_from_json(
            r#"[
                {"key": "A", "blocks": ["B"]},
                {"key": "B"},
                {"key": "C", "blocks": ["MISSING-1"]},
                {"key": "D"}
            ]"#,
        )
        .unwrap();
        let layout = compute_diagram_layout(&tickets, &config);
        let placed: BTreeSet<&str> =
            layout.tickets.keys().map(String::as_str).collect();
        let input: BTreeSet<&str> =
            tickets.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(placed, input);
    }

    #[test]
    fn grouped_and_unframed_keys_partition_the_input() {
        let config = LayoutConfig::default();
        let tickets = tickets_from_json(
            r#"[
                {"key": "A", "blocks": ["B"]},
                {"key": "B"},
                {"key": "LOOSE-1"}
            ]"#,
        )
        .unwrap();
        let layout = compute_diagram_layout(&tickets, &config);
        assert!(layout.grouped_keys.contains("A"));
        assert!(layout.grouped_keys.contains("B"));
        assert_eq!(layout.unframed, vec!["LOOSE-1"]);
        for key in &layout.unframed {
            assert!(!layout.grouped_keys.contains(key));
        }
    }

    #[test]
    fn rows_by_level_keeps_input_order_within_a_row() {
        let tickets = tickets_from_json(
            r#"[
                {"key": "A", "blocks": ["C"]},
                {"key": "B", "blocks": ["C"]},
                {"key": "C"}
            ]"#,
        )
        .unwrap();
        let members: Vec<&Ticket> = tickets.iter().collect();
        let keys: HashSet<&str> = tickets.iter().map(|t| t.key.as_str()).collect();
        let levels = build_level_map(&members, &keys);
        let rows = rows_by_level(&members, &levels);
        assert_eq!(rows.len(), 2);
        let top: Vec<&str> = rows[1].iter().map(|t| t.key.as_str()).collect();
        assert_eq!(top, vec!["A", "B"]);
    }

    #[test]
    fn finalizer_shifts_boxes_and_frames_in_lockstep() {
        let config = LayoutConfig::default();
        let tickets =
            tickets_from_json(r#"[{"key": "A", "blocks": ["B"]}, {"key": "B"}]"#).unwrap();
        let layout = compute_diagram_layout(&tickets, &config);
        let frame = &layout.frames[0];
        let top_box = layout
            .tickets
            .values()
            .map(|b| b.y)
            .fold(f32::INFINITY, f32::min);
        assert_eq!(frame.min_y, top_box);
    }
}
