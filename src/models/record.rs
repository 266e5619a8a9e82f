//! Irei record model and the formatting of raw docstore documents.

use serde::Serialize;
use serde_json::{Map, Value};

use super::definitions::FIELD_DEFINITIONS;
use super::ddr_object::DdrObject;

/// Model name reported in every record.
pub const MODEL: &str = "ireirecord";

/// Path under which records are served.
pub const RECORD_PATH_PREFIX: &str = "/api/1.0/";

/// Where the current request was addressed, for building self links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// `scheme://host[:port]` of the request, if known.
    pub base_url: Option<String>,
}

impl RequestContext {
    pub fn new(base_url: Option<String>) -> Self {
        Self { base_url }
    }

    /// URL of the JSON detail view for a record.
    pub fn record_url(&self, irei_id: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}{}", base, RECORD_PATH_PREFIX, irei_id),
            None => format!("{}{}", RECORD_PATH_PREFIX, irei_id),
        }
    }
}

/// Person linked to an Irei record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonRef {
    /// Composite `naan/noid` identifier.
    pub nr_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
}

/// A parsed `naan/noid` person identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NrId {
    pub naan: String,
    pub noid: String,
}

impl NrId {
    /// Split an identifier of the form `naan/noid`.
    pub fn parse(nr_id: &str) -> Option<Self> {
        let (naan, noid) = nr_id.split_once('/')?;
        if naan.is_empty() || noid.is_empty() || noid.contains('/') {
            return None;
        }
        Some(Self {
            naan: naan.to_string(),
            noid: noid.to_string(),
        })
    }
}

impl std::fmt::Display for NrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.naan, self.noid)
    }
}

/// Links to other representations of a record.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordLinks {
    pub json: String,
}

/// An Irei record as returned by the API.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IreiRecord {
    pub irei_id: String,
    pub model: &'static str,
    pub links: RecordLinks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<PersonRef>,
    /// Remaining declared fields, in definition order.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub ddr_objects: Vec<DdrObject>,
}

impl IreiRecord {
    /// Format a docstore document.
    ///
    /// Accepts either a full hit (`_id`/`_source`) or a bare document that
    /// carries its own `irei_id`. Returns `None` if no identifier is found.
    pub fn from_document(document: Value, ctx: &RequestContext) -> Option<Self> {
        let Value::Object(mut document) = document else {
            return None;
        };

        let (irei_id, source) = match document.remove("_source") {
            Some(Value::Object(source)) => {
                let id = document.get("_id").and_then(Value::as_str)?.to_string();
                (id, source)
            }
            _ => {
                let id = document.get("irei_id").and_then(Value::as_str)?.to_string();
                (id, document)
            }
        };
        if irei_id.is_empty() {
            return None;
        }

        let mut person = None;
        let mut fields = Map::new();
        for definition in FIELD_DEFINITIONS.iter().filter(|d| d.display) {
            let Some(value) = source.get(definition.name).filter(|v| is_truthy(v)) else {
                continue;
            };
            match definition.name {
                "irei_id" => {}
                "person" => person = person_ref(value),
                name => {
                    fields.insert(name.to_string(), value.clone());
                }
            }
        }

        Some(Self {
            links: RecordLinks {
                json: ctx.record_url(&irei_id),
            },
            irei_id,
            model: MODEL,
            person,
            fields,
            ddr_objects: Vec::new(),
        })
    }
}

/// The docstore keeps the person identifier under `id`; clients see `nr_id`.
fn person_ref(raw: &Value) -> Option<PersonRef> {
    let raw = raw.as_object()?;
    let nr_id = raw.get("id").and_then(Value::as_str).filter(|s| !s.is_empty())?;
    Some(PersonRef {
        nr_id: nr_id.to_string(),
        name: raw.get("name").filter(|v| is_truthy(v)).cloned(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
