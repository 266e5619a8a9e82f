//! Field definitions for Irei records.

/// Display metadata for one record field.
///
/// The formatter only reads `name` and `display`; `label` and `description`
/// are kept for clients that render record details.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub display: bool,
}

const fn field(name: &'static str, label: &'static str, description: &'static str) -> FieldDefinition {
    FieldDefinition {
        name,
        label,
        description,
        display: true,
    }
}

/// Record fields in output order.
pub static FIELD_DEFINITIONS: &[FieldDefinition] = &[
    field("irei_id", "Irei ID", "Unique identifier from Ireizo database"),
    field("person", "Person", "Linked person record"),
    field("year", "Year of birth", "Year of birth"),
    field("birthday", "Date of birth", "Date of birth"),
    field("birthdate", "Date of birth", "Date of birth"),
    field("name", "Name", "Name"),
    field("lastname", "Last name", "Last name"),
    field("firstname", "First name", "First name"),
    field("middlename", "Middle name", "Middle name"),
    field("camps", "Camps", "Camps"),
    field("fetch_ts", "Fetched", "When the record was fetched from the Ireizo database"),
    field("timestamp", "Indexed", "When the record was indexed"),
];
