use tabled::Table;

use crate::{success, types::NotImportedRow, warning};

/// Unmatched display names of one import target (a category or a playlist).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSection {
    pub name: String,
    pub unmatched: Vec<String>,
}

impl ImportSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unmatched: Vec::new(),
        }
    }

    pub fn push(&mut self, item: impl Into<String>) {
        self.unmatched.push(item.into());
    }
}

/// Everything that could not be imported during one run, in section order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    sections: Vec<ImportSection>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, section: ImportSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[ImportSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&ImportSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn unmatched_count(&self) -> usize {
        self.sections.iter().map(|s| s.unmatched.len()).sum()
    }

    pub fn rows(&self) -> Vec<NotImportedRow> {
        self.sections
            .iter()
            .flat_map(|s| {
                s.unmatched.iter().map(|item| NotImportedRow {
                    section: s.name.clone(),
                    item: item.clone(),
                })
            })
            .collect()
    }

    pub fn print(&self) {
        if self.unmatched_count() == 0 {
            success!("All items imported.");
            return;
        }

        warning!("Not imported items:");
        println!("{}", Table::new(self.rows()));
    }
}
