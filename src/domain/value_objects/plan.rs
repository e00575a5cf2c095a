use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Premium,
}

impl Plan {
    /// Maximum number of stored documents, `None` when unlimited.
    pub fn document_limit(&self, free_limit: usize) -> Option<usize> {
        match self {
            Plan::Free => Some(free_limit),
            Plan::Premium => None,
        }
    }

    pub fn allows_another_document(&self, current: usize, free_limit: usize) -> bool {
        match self.document_limit(free_limit) {
            Some(limit) => current < limit,
            None => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "premium" => Ok(Plan::Premium),
            other => Err(format!("Unknown plan: {}", other)),
        }
    }
}
