use super::Field;

/// Outcome of patching a single territory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStatus {
    /// The block was found. `written` lists the fields that were rewritten,
    /// `missing` the requested fields whose marker was absent from the block.
    Updated {
        written: Vec<Field>,
        missing: Vec<Field>,
        changed: bool,
    },
    /// No block for this identifier exists in the document
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
    pub id: String,
    pub status: PatchStatus,
}

/// Per-territory results of a patch run, in the order territories were
/// processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub entries: Vec<PatchEntry>,
}

impl PatchReport {
    pub fn push(&mut self, id: &str, status: PatchStatus) {
        self.entries.push(PatchEntry {
            id: id.to_string(),
            status,
        });
    }

    pub fn get(&self, id: &str) -> Option<&PatchStatus> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.status)
    }

    pub fn updated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, PatchStatus::Updated { .. }))
            .count()
    }

    pub fn changed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, PatchStatus::Updated { changed: true, .. }))
            .count()
    }

    pub fn not_found(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.status == PatchStatus::NotFound)
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let not_found = self.not_found().len();
        if not_found == 0 {
            format!(
                "Updated {} territories ({} changed)",
                self.updated_count(),
                self.changed_count()
            )
        } else {
            format!(
                "Updated {} territories ({} changed), {} not found",
                self.updated_count(),
                self.changed_count(),
                not_found
            )
        }
    }
}
