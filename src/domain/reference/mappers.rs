use serde_json::{Map, Value};
use tracing::warn;

use crate::core::state::reference::reference_item::{ReferenceItem, ReferenceMap};
use crate::domain::reference::reference_type::ReferenceType;

/// Result of turning one list response into a reference map.
#[derive(Debug, Default)]
pub struct MapBuild {
    pub items: ReferenceMap,
    /// Records dropped for lacking a usable id or name
    pub skipped: usize,
}

/// Build the reference map for `reference_type` from raw list records.
///
/// Malformed records are skipped one by one; they never abort the build.
pub fn build_reference_map(reference_type: ReferenceType, results: &[Value]) -> MapBuild {
    let mut build = MapBuild::default();

    for record in results {
        match to_reference_item(reference_type, record) {
            Some(item) => {
                build.items.insert(item.key.clone(), item);
            }
            None => {
                build.skipped += 1;
                warn!(%reference_type, "skipping record without id/name: {}", record);
            }
        }
    }

    build
}

/// Map one list record to a reference item. `None` when id or name is unusable.
pub fn to_reference_item(reference_type: ReferenceType, record: &Value) -> Option<ReferenceItem> {
    let desc = reference_type.descriptor();
    let key = non_empty_str(record, desc.id_field)?;
    let name = non_empty_str(record, desc.name_field)?;

    let mut item = ReferenceItem::named(key, name);
    item.link_template = desc.link_template.map(str::to_string);
    item.data = extra_data(record, desc.extra_fields);

    match reference_type {
        ReferenceType::Provider => {
            item.icon = tag(record, "icon");
            item.color = tag(record, "color");
            if let Some(link) = tag(record, "link") {
                item.link_template = Some(link);
            }
        }
        ReferenceType::Region => {
            if let Some(continent) = tag(record, "continent") {
                insert_data(&mut item, "continent", Value::String(continent));
            }
        }
        ReferenceType::Plugin | ReferenceType::Protocol | ReferenceType::Collector => {
            item.icon = tag(record, "icon");
            if reference_type == ReferenceType::Collector {
                if let Some(plugin_id) = record.pointer("/plugin_info/plugin_id").cloned() {
                    insert_data(&mut item, "plugin_id", plugin_id);
                }
            }
        }
        ReferenceType::CloudServiceType => {
            item.icon = tag(record, "spaceone:icon");
        }
        _ => {}
    }

    Some(item)
}

/// String field that is not blank. The value itself is returned as stored.
fn non_empty_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn tag(record: &Value, key: &str) -> Option<String> {
    record
        .get("tags")
        .and_then(|tags| tags.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Plain extra fields copied as-is; nested blobs (`tags`, `plugin_info`) are decorated separately.
fn extra_data(record: &Value, fields: &[&str]) -> Option<Value> {
    let data: Map<String, Value> = fields
        .iter()
        .filter(|f| !matches!(**f, "tags" | "plugin_info"))
        .filter_map(|f| {
            record
                .get(*f)
                .filter(|v| !v.is_null())
                .map(|v| (f.to_string(), v.clone()))
        })
        .collect();

    if data.is_empty() {
        None
    } else {
        Some(Value::Object(data))
    }
}

fn insert_data(item: &mut ReferenceItem, key: &str, value: Value) {
    if let Value::Object(map) = item.data.get_or_insert_with(|| Value::Object(Map::new())) {
        map.insert(key.to_string(), value);
    }
}
