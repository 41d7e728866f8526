use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub code: String,
    pub name: String,
    folded_code: String,
    folded_name: String,
}

impl CompanyRecord {
    pub fn new(code: &str, name: &str) -> Self {
        Self::from_owned(code.to_string(), name.to_string())
    }

    pub fn from_owned(code: String, name: String) -> Self {
        let folded_code = normalize_query(&code);
        let folded_name = normalize_query(&name);
        Self {
            code,
            name,
            folded_code,
            folded_name,
        }
    }

    pub fn folded_code(&self) -> &str {
        &self.folded_code
    }

    pub fn folded_name(&self) -> &str {
        &self.folded_name
    }

    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

impl From<&HistoryEntry> for CompanyRecord {
    fn from(value: &HistoryEntry) -> Self {
        Self::new(&value.code, &value.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Recent,
    Alphabetical,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Recent => Self::Alphabetical,
            Self::Alphabetical => Self::Recent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Alphabetical => "a-z",
        }
    }
}

pub fn normalize_query(input: &str) -> String {
    input.trim().to_lowercase()
}
