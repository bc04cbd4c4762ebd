//! Diagram string preparation and editor id allocation.

use crate::errors::{Error, Result};

/// Leading token identifying a Mermaid entity-relationship diagram.
const DIAGRAM_MARKER: &str = "erDiagram";

/// Trims a diagram string and checks it carries the erDiagram marker.
///
/// Rendering is the diagram library's job; this only guards against handing
/// it something that is not an ER diagram at all.
pub fn prepare_diagram(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.starts_with(DIAGRAM_MARKER) {
        return Err(Error::InvalidDiagram(
            "Invalid or empty diagram string provided".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Sequential `table_N` id source for one editor session.
///
/// Owned by the caller; there is no process-wide counter. Restoring a
/// persisted session continues past the highest id already in use, so
/// restored nodes and new nodes never collide.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableIdAllocator {
    next: u64,
}

impl TableIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an allocator that continues after every id in `existing`.
    /// Ids that do not look like `table_N` are ignored.
    pub fn resuming_after<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let next = existing
            .into_iter()
            .filter_map(|id| id.strip_prefix("table_"))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .map(|n| n + 1)
            .max()
            .unwrap_or(0);
        Self { next }
    }

    /// Yields the next unused id.
    pub fn next_id(&mut self) -> String {
        let id = format!("table_{}", self.next);
        self.next += 1;
        id
    }
}
