//! The Table Schema descriptor model.
//!
//! A descriptor is the canonical external representation of a tabular
//! resource: an ordered list of typed fields plus optional primary and
//! foreign keys. The serde mapping follows the JSON wire form exactly
//! (`primaryKey`, `foreignKeys`, keys as bare strings or lists), so a
//! descriptor loaded from disk round-trips byte-compatibly.
//!
//! Declared field types are kept as raw strings here; the mapping layer
//! owns the closed set of supported types so that an unsupported
//! declaration surfaces as a translation error naming the field, not as a
//! deserialization failure.

use serde::{Deserialize, Serialize};

/// A schema descriptor for one tabular resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Descriptor {
    /// Ordered field declarations. Names are unique within a descriptor.
    pub fields: Vec<Field>,
    /// Primary key: a single field name or an ordered list of them.
    #[serde(
        rename = "primaryKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_key: Option<KeyRef>,
    /// Foreign key declarations.
    #[serde(
        rename = "foreignKeys",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub foreign_keys: Vec<ForeignKeyRef>,
}

impl Descriptor {
    /// Create an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style).
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the primary key (builder style).
    #[must_use]
    pub fn primary_key(mut self, key: impl Into<KeyRef>) -> Self {
        self.primary_key = Some(key.into());
        self
    }

    /// Add a foreign key (builder style).
    #[must_use]
    pub fn foreign_key(mut self, fk: ForeignKeyRef) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name, unique within the descriptor.
    pub name: String,
    /// Declared logical type, kept verbatim.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Optional constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Constraints>,
}

impl Field {
    /// Create a field with the given name and declared type.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            constraints: None,
        }
    }

    /// Mark the field as required (non-nullable).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.constraints = Some(Constraints { required: true });
        self
    }

    /// Whether the field declares `constraints.required = true`.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.constraints.as_ref().is_some_and(|c| c.required)
    }
}

/// Field constraints. Only `required` participates in the SQL mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Required fields translate to non-nullable columns.
    #[serde(default)]
    pub required: bool,
}

/// A key reference: a bare field name or an ordered list of field names.
///
/// The JSON form allows both spellings; translation normalizes to a list
/// and the reverse direction collapses singleton lists back to the bare
/// form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyRef {
    /// A single field name.
    One(String),
    /// An ordered list of field names.
    Many(Vec<String>),
}

impl KeyRef {
    /// Normalize to an ordered list, promoting a bare name to a singleton.
    #[must_use]
    pub fn as_list(&self) -> Vec<String> {
        match self {
            KeyRef::One(name) => vec![name.clone()],
            KeyRef::Many(names) => names.clone(),
        }
    }

    /// Build from a list, collapsing singletons and dropping empties.
    #[must_use]
    pub fn from_list(mut names: Vec<String>) -> Option<KeyRef> {
        match names.len() {
            0 => None,
            1 => Some(KeyRef::One(names.remove(0))),
            _ => Some(KeyRef::Many(names)),
        }
    }
}

impl From<&str> for KeyRef {
    fn from(name: &str) -> Self {
        KeyRef::One(name.to_string())
    }
}

impl From<Vec<&str>> for KeyRef {
    fn from(names: Vec<&str>) -> Self {
        KeyRef::Many(names.into_iter().map(String::from).collect())
    }
}

/// A foreign key declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Local field name(s), parallel to `reference.fields`.
    pub fields: KeyRef,
    /// The referenced resource and fields.
    pub reference: Reference,
}

impl ForeignKeyRef {
    /// Create a foreign key binding local fields to a referenced resource.
    pub fn new(
        fields: impl Into<KeyRef>,
        resource: impl Into<String>,
        referenced: impl Into<KeyRef>,
    ) -> Self {
        Self {
            fields: fields.into(),
            reference: Reference {
                resource: resource.into(),
                fields: referenced.into(),
            },
        }
    }
}

/// The remote side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Logical resource name, or the sentinel `"self"` for the current
    /// table.
    pub resource: String,
    /// Referenced field name(s).
    pub fields: KeyRef,
}

impl Reference {
    /// Whether this reference points back at the declaring table.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.resource == "self"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let descriptor: Descriptor = serde_json::from_str(
            r#"{"fields": [{"name": "id", "type": "integer"}]}"#,
        )
        .unwrap();
        assert_eq!(descriptor.fields.len(), 1);
        assert_eq!(descriptor.fields[0].name, "id");
        assert_eq!(descriptor.fields[0].field_type, "integer");
        assert!(descriptor.primary_key.is_none());
        assert!(descriptor.foreign_keys.is_empty());
    }

    #[test]
    fn test_deserialize_bare_and_list_keys() {
        let bare: Descriptor = serde_json::from_str(
            r#"{"fields": [{"name": "id", "type": "integer"}], "primaryKey": "id"}"#,
        )
        .unwrap();
        assert_eq!(bare.primary_key, Some(KeyRef::One("id".to_string())));

        let listed: Descriptor = serde_json::from_str(
            r#"{"fields": [{"name": "a", "type": "integer"}, {"name": "b", "type": "integer"}],
                "primaryKey": ["a", "b"]}"#,
        )
        .unwrap();
        assert_eq!(
            listed.primary_key.unwrap().as_list(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_deserialize_foreign_keys() {
        let descriptor: Descriptor = serde_json::from_str(
            r#"{
                "fields": [{"name": "author_id", "type": "integer"}],
                "foreignKeys": [
                    {"fields": "author_id",
                     "reference": {"resource": "authors", "fields": "id"}}
                ]
            }"#,
        )
        .unwrap();
        let fk = &descriptor.foreign_keys[0];
        assert_eq!(fk.fields.as_list(), vec!["author_id".to_string()]);
        assert_eq!(fk.reference.resource, "authors");
        assert!(!fk.reference.is_self());
    }

    #[test]
    fn test_serialize_omits_absent_keys() {
        let descriptor = Descriptor::new().field(Field::new("id", "integer"));
        let json = serde_json::to_value(&descriptor).unwrap();
        assert!(json.get("primaryKey").is_none());
        assert!(json.get("foreignKeys").is_none());
        assert!(json.get("fields").is_some());
    }

    #[test]
    fn test_serialize_required_constraint() {
        let descriptor = Descriptor::new().field(Field::new("id", "integer").required());
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["fields"][0]["constraints"]["required"], true);
    }

    #[test]
    fn test_json_round_trip() {
        let descriptor = Descriptor::new()
            .field(Field::new("id", "integer").required())
            .field(Field::new("name", "string"))
            .primary_key("id")
            .foreign_key(ForeignKeyRef::new("name", "self", "name"));
        let json = serde_json::to_string(&descriptor).unwrap();
        let back: Descriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }

    #[test]
    fn test_key_ref_normalization() {
        assert_eq!(KeyRef::from_list(vec![]), None);
        assert_eq!(
            KeyRef::from_list(vec!["id".to_string()]),
            Some(KeyRef::One("id".to_string()))
        );
        assert_eq!(
            KeyRef::from_list(vec!["a".to_string(), "b".to_string()]),
            Some(KeyRef::Many(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(KeyRef::One("id".to_string()).as_list(), vec!["id"]);
    }

    #[test]
    fn test_is_required() {
        assert!(!Field::new("name", "string").is_required());
        assert!(Field::new("name", "string").required().is_required());
    }
}
