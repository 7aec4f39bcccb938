use crate::ir::Ticket;
use std::collections::{HashMap, HashSet, VecDeque};

/// True when `ticket` blocks nothing else inside the group. Leaves sit at
/// level 0 and double as the frame's root tickets.
pub(super) fn is_leaf(ticket: &Ticket, group_keys: &HashSet<&str>) -> bool {
    !ticket
        .blocks
        .iter()
        .any(|key| group_keys.contains(key.as_str()))
}

/// Assign every ticket in `group` a row level.
///
/// Leaves seed at level 0; whenever `p.blocks` names an in-group ticket
/// `t`, `p` is lifted to at least `level(t) + 1`. Propagation re-enqueues
/// a ticket only when its level strictly increased, and levels are clamped
/// to `group.len() - 1`; together these bound the work even when the input
/// contains a blocking cycle, where the affected tickets simply stabilize
/// at the clamp. Tickets unreachable from any leaf (a closed cycle) settle
/// at level 0.
pub(super) fn build_level_map<'a>(
    group: &[&'a Ticket],
    group_keys: &HashSet<&str>,
) -> HashMap<&'a str, usize> {
    let max_level = group.len().saturating_sub(1);

    // blockers[t] = every p in the group with t in p.blocks
    let mut blockers: HashMap<&str, Vec<&'a Ticket>> = HashMap::new();
    for ticket in group {
        for blocked in &ticket.blocks {
            if group_keys.contains(blocked.as_str()) {
                blockers.entry(blocked.as_str()).or_default().push(ticket);
            }
        }
    }

    let mut levels: HashMap<&'a str, usize> = HashMap::new();
    let mut queue: VecDeque<&'a Ticket> = VecDeque::new();
    for ticket in group {
        if is_leaf(ticket, group_keys) {
            levels.insert(ticket.key.as_str(), 0);
            queue.push_back(ticket);
        }
    }

    while let Some(ticket) = queue.pop_front() {
        let base = levels.get(ticket.key.as_str()).copied().unwrap_or(0);
        let proposed = (base + 1).min(max_level);
        for blocker in blockers.get(ticket.key.as_str()).into_iter().flatten() {
            let current = levels.get(blocker.key.as_str()).copied();
            if current.is_none_or(|level| proposed > level) {
                levels.insert(blocker.key.as_str(), proposed);
                queue.push_back(blocker);
            }
        }
    }

    for ticket in group {
        levels.entry(ticket.key.as_str()).or_insert(0);
    }
    levels
}
