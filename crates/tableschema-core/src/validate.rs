//! Descriptor validation.
//!
//! Structural checks that run before translation: duplicate field names,
//! key references to fields that do not exist, and mismatched foreign key
//! cardinalities are all promoted to explicit errors with a message naming
//! the offending field. Cosmetic issues (field names that are not plain
//! identifiers) are only logged, since backends differ in what they accept.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};

/// Cached identifier pattern. Compiled once on first use.
fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

/// Whether a name is a plain SQL identifier (letters, digits, underscore,
/// not starting with a digit).
#[must_use]
pub fn is_plain_identifier(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

/// Validate a descriptor against the table (bucket) it will be translated
/// for.
///
/// Checks, in order:
/// - field names are unique,
/// - every `primaryKey` name exists in `fields`,
/// - every foreign key's local names exist in `fields`,
/// - each foreign key binds equally many local and referenced fields.
///
/// Field names that are not plain identifiers produce a `tracing` warning
/// but do not fail validation.
pub fn validate_descriptor(descriptor: &Descriptor, table: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for field in &descriptor.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(Error::DuplicateField {
                field: field.name.clone(),
            });
        }
        if !is_plain_identifier(&field.name) {
            tracing::warn!(
                field = %field.name,
                table,
                "field name is not a plain identifier; the backend may need quoting"
            );
        }
    }

    if let Some(key) = &descriptor.primary_key {
        for name in key.as_list() {
            require_field(descriptor, &name, table)?;
        }
    }

    for fk in &descriptor.foreign_keys {
        let local = fk.fields.as_list();
        let referenced = fk.reference.fields.as_list();
        if local.len() != referenced.len() {
            return Err(Error::MismatchedForeignKey {
                fields: local.len(),
                references: referenced.len(),
            });
        }
        for name in &local {
            require_field(descriptor, name, table)?;
        }
    }

    Ok(())
}

/// Check that `name` is declared in the descriptor's fields.
pub fn require_field(descriptor: &Descriptor, name: &str, table: &str) -> Result<()> {
    if descriptor.get_field(name).is_some() {
        Ok(())
    } else {
        Err(Error::UnknownField {
            field: name.to_string(),
            table: table.to_string(),
        })
    }
}
