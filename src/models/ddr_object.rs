//! DDR objects as exposed to API clients.

use serde_json::{Map, Value};

/// Most DDR objects returned per record.
pub const MAX_DDR_OBJECTS: usize = 5;

/// Top-level object fields passed through to clients.
pub const ALLOW_FIELDS_OBJECTS: &[&str] = &["id", "links", "title", "format", "credit"];

/// Link kinds passed through to clients.
pub const ALLOW_FIELDS_LINKS: &[&str] = &["html", "json", "img"];

/// A DDR object reduced to its public fields.
pub type DdrObject = Map<String, Value>;

/// Reduce raw DDR API objects to their public fields.
///
/// Keeps the first [`MAX_DDR_OBJECTS`] entries. Entries that are not JSON
/// objects are dropped, as is a `links` value that is not an object.
pub fn project_objects(objects: &[Value]) -> Vec<DdrObject> {
    objects
        .iter()
        .take(MAX_DDR_OBJECTS)
        .filter_map(Value::as_object)
        .map(project_object)
        .collect()
}

fn project_object(object: &Map<String, Value>) -> DdrObject {
    let mut projected = Map::new();
    for (key, value) in object {
        if !ALLOW_FIELDS_OBJECTS.contains(&key.as_str()) {
            continue;
        }
        if key == "links" {
            if let Some(links) = value.as_object() {
                projected.insert(key.clone(), Value::Object(project_links(links)));
            }
            continue;
        }
        projected.insert(key.clone(), value.clone());
    }
    projected
}

fn project_links(links: &Map<String, Value>) -> Map<String, Value> {
    links
        .iter()
        .filter(|(kind, _)| ALLOW_FIELDS_LINKS.contains(&kind.as_str()))
        .map(|(kind, url)| (kind.clone(), url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disallowed_fields_removed() {
        let raw = vec![json!({
            "id": "x1",
            "links": {"html": "h", "json": "j", "img": "i", "extra": "z"},
            "title": "T",
            "format": "F",
            "credit": "C",
            "secret": "S"
        })];

        let projected = project_objects(&raw);

        assert_eq!(
            Value::Array(projected.into_iter().map(Value::Object).collect()),
            json!([{
                "id": "x1",
                "links": {"html": "h", "json": "j", "img": "i"},
                "title": "T",
                "format": "F",
                "credit": "C"
            }])
        );
    }

    #[test]
    fn test_truncated_to_five_in_order() {
        let raw: Vec<Value> = (0..8).map(|n| json!({"id": format!("ddr-{n}")})).collect();

        let projected = project_objects(&raw);

        assert_eq!(projected.len(), 5);
        let ids: Vec<_> = projected.iter().map(|o| o["id"].as_str().unwrap()).collect();
        assert_eq!(ids, ["ddr-0", "ddr-1", "ddr-2", "ddr-3", "ddr-4"]);
    }

    #[test]
    fn test_missing_fields_stay_missing() {
        let raw = vec![json!({"id": "x1", "description": "not exposed"})];

        let projected = project_objects(&raw);

        assert_eq!(projected[0].len(), 1);
        assert!(!projected[0].contains_key("links"));
    }

    #[test]
    fn test_key_order_follows_input() {
        let raw = vec![json!({"title": "T", "credit": "C", "id": "x1"})];

        let projected = project_objects(&raw);

        let keys: Vec<_> = projected[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "credit", "id"]);
    }

    #[test]
    fn test_input_untouched() {
        let raw = vec![json!({"id": "x1", "secret": "S", "links": {"thumb": "t"}})];
        let before = raw.clone();

        let projected = project_objects(&raw);

        assert_eq!(raw, before);
        assert_eq!(projected[0]["links"], json!({}));
    }

    #[test]
    fn test_malformed_entries_dropped() {
        let raw = vec![json!("not-an-object"), json!({"id": "x2", "links": "nope"})];

        let projected = project_objects(&raw);

        assert_eq!(projected.len(), 1);
        assert_eq!(Value::Object(projected[0].clone()), json!({"id": "x2"}));
    }
}
