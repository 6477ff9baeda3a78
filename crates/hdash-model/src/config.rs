use serde::{Deserialize, Serialize};

use crate::policy::ClassificationPolicy;
use crate::status::StyleMap;

/// Caller-supplied table configuration.
///
/// Every field is optional; unset fields keep the table preset's defaults.
/// `status_styles` is a partial map layered over the preset's styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status_styles: Option<StyleMap>,
    #[serde(default)]
    pub classification_policy: Option<ClassificationPolicy>,
}

impl TableConfig {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
