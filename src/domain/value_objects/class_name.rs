use serde::{Deserialize, Serialize};

pub const MAX_CLASS_NAME_CHARS: usize = 64;

/// A user-defined label grouping documents and chat sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    pub fn new(raw: &str) -> Result<Self, String> {
        let name = raw.trim();

        if name.is_empty() {
            return Err("Class name cannot be empty".to_string());
        }

        if name.chars().count() > MAX_CLASS_NAME_CHARS {
            return Err(format!(
                "Class name must be at most {} characters",
                MAX_CLASS_NAME_CHARS
            ));
        }

        if name.chars().any(|c| c.is_control() || c == '/') {
            return Err("Class name contains invalid characters".to_string());
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ClassName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClassName::new(&value)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
