use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::CompanyRecord;

const BUNDLED_DIRECTORY: &str = include_str!("../data/companies.json5");

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read directory file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse directory: {0}")]
    Parse(#[from] json5::Error),
    #[error("duplicate company code in directory: {0}")]
    DuplicateCode(String),
    #[error("directory entry {index} has an empty code or name")]
    BlankField { index: usize },
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    code: String,
    name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    records: Vec<CompanyRecord>,
}

impl Directory {
    pub fn from_records(records: Vec<CompanyRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.code.trim().is_empty() || record.name.trim().is_empty() {
                return Err(DirectoryError::BlankField { index });
            }
            if !seen.insert(record.code.as_str()) {
                return Err(DirectoryError::DuplicateCode(record.code.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn parse(raw: &str) -> Result<Self, DirectoryError> {
        let parsed: Vec<RawRecord> = json5::from_str(raw)?;
        let records = parsed
            .into_iter()
            .map(|raw| {
                CompanyRecord::from_owned(raw.code.trim().to_string(), raw.name.trim().to_string())
            })
            .collect();
        Self::from_records(records)
    }

    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw)
    }

    pub fn bundled() -> Result<Self, DirectoryError> {
        Self::parse(BUNDLED_DIRECTORY)
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn get(&self, code: &str) -> Option<&CompanyRecord> {
        self.records.iter().find(|record| record.code == code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Directory;

    #[test]
    fn bundled_directory_parses() {
        let directory = Directory::bundled().unwrap();
        assert!(directory.len() >= 2);
        assert_eq!(directory.get("7203").unwrap().name, "トヨタ自動車");
    }
}
