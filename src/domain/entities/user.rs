use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ClassName, Plan};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: Option<String>,
    pub(crate) plan: Plan,
    pub(crate) classes: Vec<String>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

/// Emails are compared and stored trimmed and lower-cased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl User {
    pub fn new(name: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash: Some(password_hash),
            plan: Plan::Free,
            classes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.updated_at = Utc::now();
    }

    pub fn change_email(&mut self, email: &str) {
        self.email = normalize_email(email);
        self.updated_at = Utc::now();
    }

    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
        self.updated_at = Utc::now();
    }

    pub fn set_plan(&mut self, plan: Plan) {
        self.plan = plan;
        self.updated_at = Utc::now();
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Returns `false` when the class was already present.
    pub fn add_class(&mut self, class: &ClassName) -> bool {
        if self.has_class(class.as_str()) {
            return false;
        }
        self.classes.push(class.as_str().to_string());
        self.updated_at = Utc::now();
        true
    }

    pub fn remove_class(&mut self, name: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != name);
        let removed = self.classes.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}
