use crate::ir::Ticket;
use std::collections::{HashMap, HashSet};

/// The ticket set split into dependency clusters and loose tickets.
pub(super) struct Partition<'a> {
    /// Connected components of the undirected blocks/blockedBy graph, in
    /// discovery order; every group has at least two members.
    pub groups: Vec<Vec<&'a Ticket>>,
    /// Tickets with no usable blocking relation, in input order.
    pub unframed: Vec<&'a Ticket>,
}

/// Partition tickets into maximal connected groups under the undirected
/// union of `blocks` and `blockedBy`, restricted to keys present in the
/// input. References to absent keys and self-references carry no edge, so
/// a ticket linked only to ghosts (or to itself) ends up unframed.
pub(super) fn partition(tickets: &[Ticket]) -> Partition<'_> {
    let by_key: HashMap<&str, &Ticket> = tickets
        .iter()
        .map(|ticket| (ticket.key.as_str(), ticket))
        .collect();

    let mut visited: HashSet<&str> = HashSet::new();
    let mut groups: Vec<Vec<&Ticket>> = Vec::new();

    for ticket in tickets {
        if visited.contains(ticket.key.as_str()) || !has_in_set_edge(ticket, &by_key) {
            continue;
        }
        let mut members: Vec<&Ticket> = Vec::new();
        let mut stack: Vec<&str> = vec![ticket.key.as_str()];
        while let Some(key) = stack.pop() {
            if !visited.insert(key) {
                continue;
            }
            let Some(&current) = by_key.get(key) else {
                continue;
            };
            members.push(current);
            for linked in current.linked_keys() {
                if by_key.contains_key(linked) && !visited.contains(linked) {
                    stack.push(linked);
                }
            }
        }
        groups.push(members);
    }

    let grouped: HashSet<&str> = groups
        .iter()
        .flatten()
        .map(|ticket| ticket.key.as_str())
        .collect();
    let unframed = tickets
        .iter()
        .filter(|ticket| !grouped.contains(ticket.key.as_str()))
        .collect();

    Partition { groups, unframed }
}

fn has_in_set_edge(ticket: &Ticket, by_key: &HashMap<&str, &Ticket>) -> bool {
    ticket
        .linked_keys()
        .any(|key| key != ticket.key && by_key.contains_key(key))
}
