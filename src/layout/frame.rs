use crate::config::LayoutConfig;
use crate::ir::Ticket;
use std::collections::BTreeMap;

use super::{FrameLayout, TicketLayout};

/// Place one frame's rows. Rows are ordered by ascending level from `top`,
/// boxes run left to right from the frame padding, and each row advances
/// the cursor by its tallest box (never less than the minimum height) plus
/// the vertical gap. Returns the envelope of the placed boxes.
pub(super) fn layout_frame(
    index: usize,
    rows: &[Vec<&Ticket>],
    top: f32,
    config: &LayoutConfig,
    boxes: &mut BTreeMap<String, TicketLayout>,
) -> FrameLayout {
    let mut keys: Vec<String> = Vec::new();
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    let mut y_cursor = top + config.frame_padding;
    for (level, row) in rows.iter().enumerate() {
        let mut row_height = config.min_box_height;
        for ticket in row {
            if let Some(placed) = boxes.get(ticket.key.as_str()) {
                row_height = row_height.max(placed.height);
            }
        }

        let y = y_cursor;
        for (slot, ticket) in row.iter().enumerate() {
            let Some(placed) = boxes.get_mut(ticket.key.as_str()) else {
                continue;
            };
            let x = config.frame_padding
                + slot as f32 * (config.box_width + config.horizontal_gap);
            placed.x = x;
            placed.y = y;
            placed.level = Some(level);
            placed.frame = Some(index);
            keys.push(ticket.key.clone());

            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x + config.box_width);
            max_y = max_y.max(y + placed.height);
        }
        // An empty level (possible when a cycle clamps levels together)
        // still consumes a minimum-height row.
        y_cursor = y + row_height + config.vertical_gap;
    }

    FrameLayout {
        index,
        keys,
        min_x,
        min_y,
        max_x,
        max_y,
    }
}

/// Pack frames into side-by-side slots. Each slot is the frame's bounding
/// width plus the border buffer on both sides; moving a frame into its slot
/// is a rigid horizontal translation of every member box and of the
/// bounding box itself. Returns the canvas width the frames require.
pub(super) fn pack_frames(
    frames: &mut [FrameLayout],
    boxes: &mut BTreeMap<String, TicketLayout>,
    config: &LayoutConfig,
) -> f32 {
    let mut width = 0.0_f32;
    let mut current_x = config.diagram_padding;
    for frame in frames.iter_mut() {
        let slot_width = frame.width() + 2.0 * config.frame_border_buffer;
        let shift = current_x - (frame.min_x - config.frame_border_buffer);
        for key in &frame.keys {
            if let Some(placed) = boxes.get_mut(key) {
                placed.x += shift;
            }
        }
        frame.min_x += shift;
        frame.max_x += shift;
        current_x += slot_width + config.frame_gap;
        width = width.max(current_x + config.diagram_padding);
    }
    width
}

/// Place loose tickets in a single row below the tallest frame.
pub(super) fn layout_unframed(
    unframed: &[&Ticket],
    top: f32,
    max_frame_height: f32,
    config: &LayoutConfig,
    boxes: &mut BTreeMap<String, TicketLayout>,
) {
    let y = top + max_frame_height + config.unframed_drop + config.frame_padding;
    for (slot, ticket) in unframed.iter().enumerate() {
        let Some(placed) = boxes.get_mut(ticket.key.as_str()) else {
            continue;
        };
        placed.x = config.diagram_padding
            + config.frame_padding
            + slot as f32 * (config.box_width + config.horizontal_gap);
        placed.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Ticket, tickets_from_json};
    use crate::layout::text::{estimate_box_height, summary_block};

    fn boxes_for(tickets: &[Ticket], config: &LayoutConfig) -> BTreeMap<String, TicketLayout> {
        tickets
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
            .collect()
    }

    #[test]
    fn rows_advance_by_their_tallest_box() {
        let config = LayoutConfig::default();
        let tickets = tickets_from_json(
            r#"[
                {"key": "A", "summary": "short"},
                {"key": "B", "summary": "a much longer summary that wraps across several lines of the ticket box"}
            ]"#,
        )
        .unwrap();
        let mut boxes = boxes_for(&tickets, &config);
        let rows: Vec<Vec<&Ticket>> = vec![vec![&tickets[1]], vec![&tickets[0]]];
        let frame = layout_frame(0, &rows, 0.0, &config, &mut boxes);

        let tall = boxes["B"].height;
        assert!(tall > config.min_box_height);
        assert_eq!(boxes["A"].y - boxes["B"].y, tall + config.vertical_gap);
        assert_eq!(frame.min_y, config.frame_padding);
    }

    #[test]
    fn boxes_in_a_row_do_not_overlap() {
        let config = LayoutConfig::default();
        let tickets =
            tickets_from_json(r#"[{"key": "A"}, {"key": "B"}, {"key": "C"}]"#).unwrap();
        let mut boxes = boxes_for(&tickets, &config);
        let rows: Vec<Vec<&Ticket>> = vec![tickets.iter().collect()];
        layout_frame(0, &rows, 0.0, &config, &mut boxes);

        let mut xs: Vec<f32> = boxes.values().map(|b| b.x).collect();
        xs.sort_by(f32::total_cmp);
        for pair in xs.windows(2) {
            assert!(pair[0] + config.box_width <= pair[1]);
        }
    }

    #[test]
    fn packing_translates_members_rigidly() {
        let config = LayoutConfig::default();
        let tickets = tickets_from_json(
            r#"[
                {"key": "A", "blocks": ["B"]}, {"key": "B"},
                {"key": "C", "blocks": ["D"]}, {"key": "D"}
            ]"#,
        )
        .unwrap();
        let mut boxes = boxes_for(&tickets, &config);
        let rows_one: Vec<Vec<&Ticket>> = vec![vec![&tickets[1]], vec![&tickets[0]]];
        let rows_two: Vec<Vec<&Ticket>> = vec![vec![&tickets[3]], vec![&tickets[2]]];
        let mut frames = vec![
            layout_frame(0, &rows_one, 0.0, &config, &mut boxes),
            layout_frame(1, &rows_two, 0.0, &config, &mut boxes),
        ];

        let gap_before = boxes["A"].y - boxes["B"].y;
        pack_frames(&mut frames, &mut boxes, &config);

        // Relative geometry inside a frame is untouched.
        assert_eq!(boxes["A"].y - boxes["B"].y, gap_before);
        assert_eq!(boxes["A"].x, boxes["B"].x);

        // Slots (bounding box plus border buffer) must not overlap.
        let end_of_first = frames[0].max_x + config.frame_border_buffer;
        let start_of_second = frames[1].min_x - config.frame_border_buffer;
        assert!(start_of_second - end_of_first >= config.frame_gap);
    }

    #[test]
    fn unframed_row_uses_the_standard_gap() {
        let config = LayoutConfig::default();
        let tickets = tickets_from_json(r#"[{"key": "A"}, {"key": "B"}]"#).unwrap();
        let mut boxes = boxes_for(&tickets, &config);
        let loose: Vec<&Ticket> = tickets.iter().collect();
        layout_unframed(&loose, 70.0, 0.0, &config, &mut boxes);

        assert_eq!(boxes["A"].y, boxes["B"].y);
        assert_eq!(
            boxes["B"].x - boxes["A"].x,
            config.box_width + config.horizontal_gap
        );
    }
}
