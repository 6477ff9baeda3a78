use serde::{Deserialize, Serialize};

/// Entry in the dashboard navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    #[serde(default)]
    pub href: Option<String>,
    /// Roles allowed to see this entry.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn link(label: impl Into<String>, href: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            children: Vec::new(),
        }
    }

    pub fn section(label: impl Into<String>, roles: &[&str], children: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            href: None,
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            children,
        }
    }

    pub fn allows(&self, role: &str) -> bool {
        self.roles.iter().any(|allowed| allowed == role)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
