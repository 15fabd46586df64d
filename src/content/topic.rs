use serde::{Deserialize, Serialize};

use crate::utils::error::{BoxResult, KalemError};

/// A category posts can be filed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Badge colour, e.g. `#1f2937`
    pub color: String,
}

/// Fields an admin supplies for a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
}

impl TopicDraft {
    pub fn validate(&self) -> BoxResult<()> {
        if self.name.trim().is_empty() || self.color.trim().is_empty() {
            return Err(KalemError::Validation("name and color are required".to_string()).into());
        }
        Ok(())
    }

    pub(crate) fn into_topic(self, id: u32) -> Topic {
        Topic {
            id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            color: self.color.trim().to_string(),
        }
    }
}

/// Case-insensitive topic name comparison, Turkish dotted/dotless i included
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

fn normalize_name(name: &str) -> String {
    crate::slug::transliterate(name.trim()).to_lowercase()
}
