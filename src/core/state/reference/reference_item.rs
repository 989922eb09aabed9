use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Display descriptor for one resource instance.
///
/// Items are snapshots: a refresh replaces the whole item, fields are never
/// patched in place.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem<D = Value> {
    /// Canonical backend identifier (e.g. `project_id`, provider code)
    pub key: String,

    /// Display label, never the raw key
    pub label: Option<String>,

    /// Source name of the resource
    pub name: Option<String>,

    pub icon: Option<String>,
    pub color: Option<String>,

    /// Link with a `{key}` placeholder
    pub link_template: Option<String>,

    /// Type-specific extras (parent ids, provider, continent, ...)
    pub data: Option<D>,
}

/// Resource id → item, for one resource type.
pub type ReferenceMap<I = ReferenceItem> = HashMap<String, I>;

impl<D> ReferenceItem<D> {
    /// Item with both label and name set to the resource's name.
    pub fn named(key: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: key.into(),
            label: Some(name.clone()),
            name: Some(name),
            icon: None,
            color: None,
            link_template: None,
            data: None,
        }
    }

    /// Text to show for this item: label first, then name.
    pub fn display_label(&self) -> Option<&str> {
        self.label.as_deref().or(self.name.as_deref())
    }

    /// Render `link_template`, substituting the URL-encoded key.
    pub fn link(&self) -> Option<String> {
        self.link_template
            .as_ref()
            .map(|tpl| tpl.replace("{key}", &urlencoding::encode(&self.key)))
    }
}
