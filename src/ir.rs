use serde::{Deserialize, Serialize};
use std::path::Path;

/// One unit of work as delivered by the ticket-fetching layer.
///
/// `blocks` and `blocked_by` carry raw issue keys. They may reference
/// tickets that are absent from the current set; the layout treats such
/// references as data, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub key: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default)]
    pub blocked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_sprint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
}

impl Ticket {
    /// All keys this ticket links to, in either direction.
    pub fn linked_keys(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .chain(self.blocked_by.iter())
            .map(String::as_str)
    }
}

/// Jira surfaces the team either as a plain name or as a custom-field
/// object; accept both shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Team {
    Name(String),
    Field {
        value: String,
        id: String,
        #[serde(rename = "self")]
        self_url: String,
    },
}

impl Team {
    pub fn name(&self) -> &str {
        match self {
            Team::Name(name) => name,
            Team::Field { value, .. } => value,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("ticket JSON is not a valid ticket array: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the JSON ticket array produced by the fetch layer.
pub fn tickets_from_json(input: &str) -> Result<Vec<Ticket>, TicketError> {
    Ok(serde_json::from_str(input)?)
}

pub fn load_tickets(path: &Path) -> anyhow::Result<Vec<Ticket>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(tickets_from_json(&contents)?)
}
