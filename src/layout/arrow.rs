use crate::config::LayoutConfig;
use crate::ir::Ticket;
use std::collections::BTreeMap;

use super::{ArrowLayout, TicketLayout};

/// Anchor every `blocks` edge whose endpoints both have a placed box: the
/// arrow leaves the blocker's top center and lands below the blocked
/// ticket's bottom center, offset by the arrow clearance. Edges with a
/// missing endpoint are skipped silently.
pub(super) fn build_arrows(
    tickets: &[Ticket],
    boxes: &BTreeMap<String, TicketLayout>,
    config: &LayoutConfig,
) -> Vec<ArrowLayout> {
    let mut arrows = Vec::new();
    for ticket in tickets {
        for blocked in &ticket.blocks {
            let (Some(source), Some(target)) =
                (boxes.get(&ticket.key), boxes.get(blocked))
            else {
                continue;
            };
            arrows.push(ArrowLayout {
                from: ticket.key.clone(),
                to: blocked.clone(),
                x1: source.x + config.box_width / 2.0,
                y1: source.y,
                x2: target.x + config.box_width / 2.0,
                y2: target.y + target.height + config.arrow_clearance,
            });
        }
    }
    arrows
}
