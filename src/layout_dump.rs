use crate::layout::DiagramLayout;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serialize a computed layout to pretty JSON for downstream renderers
/// and for diffing layout changes between revisions.
pub fn layout_to_json(layout: &DiagramLayout) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

pub fn write_layout_dump(path: &Path, layout: &DiagramLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, layout)?;
    Ok(())
}
