//! The bidirectional descriptor/table translator.
//!
//! [`SchemaMapper`] carries the two pieces of configuration the mapping
//! depends on: the table-name prefix and the geometry backend used for
//! `geojson` fields. It is constructed once and passed to every
//! translation call, so there is no process-wide registration and no
//! load-order hazard; calls are pure functions over their inputs and are
//! safe to run concurrently.

use tableschema_core::descriptor::{Constraints, Descriptor, Field, ForeignKeyRef, KeyRef, Reference};
use tableschema_core::error::{Error, Result};
use tableschema_core::table::{Column, ColumnRef, ForeignKey, Index, PrimaryKey, Table};
use tableschema_core::types::{FieldType, GeometryKind, SqlType};
use tableschema_core::validate;

use crate::naming::{bucket_to_tablename, tablename_to_bucket};

/// Translates descriptors to tables and back.
#[derive(Debug, Clone, Default)]
pub struct SchemaMapper {
    prefix: String,
    geometry: Option<GeometryKind>,
}

impl SchemaMapper {
    /// Create a mapper with the given table-name prefix and no geometry
    /// backend (`geojson` fields fall back to JSONB columns).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            geometry: None,
        }
    }

    /// Select the geometry backend used for `geojson` fields.
    #[must_use]
    pub fn with_geometry(mut self, kind: GeometryKind) -> Self {
        self.geometry = Some(kind);
        self
    }

    /// The configured table-name prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The configured geometry backend, if any.
    #[must_use]
    pub fn geometry(&self) -> Option<GeometryKind> {
        self.geometry
    }

    /// Physical table name for a bucket.
    #[must_use]
    pub fn tablename(&self, bucket: &str) -> String {
        bucket_to_tablename(&self.prefix, bucket)
    }

    /// Bucket for a physical table name, if the prefix matches.
    #[must_use]
    pub fn bucket(&self, tablename: &str) -> Option<String> {
        tablename_to_bucket(&self.prefix, tablename)
    }

    /// Translate a descriptor into a table definition.
    ///
    /// `index_fields` is an ordered sequence of field-name groups, each
    /// becoming one composite index named `<table>_ix<nnn>` from its
    /// zero-based position. When `autoincrement` is given, a synthetic
    /// leading non-nullable integer column is added; it is prepended to a
    /// declared primary key, or becomes the sole primary key when none is
    /// declared.
    ///
    /// Fails with [`Error::UnsupportedType`] on an unknown declared type
    /// and with [`Error::UnknownField`] when a key or index group names a
    /// field that does not exist. A failed translation produces no partial
    /// table.
    pub fn descriptor_to_table(
        &self,
        bucket: &str,
        descriptor: &Descriptor,
        index_fields: &[Vec<String>],
        autoincrement: Option<&str>,
    ) -> Result<Table> {
        let tablename = self.tablename(bucket);
        tracing::debug!(
            bucket,
            table = %tablename,
            fields = descriptor.fields.len(),
            "translating descriptor to table"
        );

        validate::validate_descriptor(descriptor, &tablename)?;

        let mut table = Table::new(tablename.clone());

        if let Some(name) = autoincrement {
            table
                .columns
                .push(Column::new(name, SqlType::Integer).auto_increment());
        }

        for field in &descriptor.fields {
            let sql_type = self.column_type(field)?;
            let mut column = Column::new(&field.name, sql_type);
            if field.is_required() {
                column = column.not_null();
            }
            table.columns.push(column);
        }

        for (position, group) in index_fields.iter().enumerate() {
            for name in group {
                validate::require_field(descriptor, name, &tablename)?;
            }
            table.indexes.push(Index {
                name: format!("{tablename}_ix{position:03}"),
                columns: group.clone(),
            });
        }

        let mut key_columns = descriptor
            .primary_key
            .as_ref()
            .map(KeyRef::as_list)
            .unwrap_or_default();
        if let Some(name) = autoincrement {
            key_columns.insert(0, name.to_string());
        }
        if !key_columns.is_empty() {
            table.primary_key = Some(PrimaryKey {
                columns: key_columns,
            });
        }

        for fk in &descriptor.foreign_keys {
            table.foreign_keys.push(self.compose_foreign_key(
                &tablename,
                descriptor,
                fk,
            )?);
        }

        Ok(table)
    }

    /// Translate a table definition back into a descriptor.
    ///
    /// A column matching `autoincrement` is omitted entirely, from the
    /// fields and from the reconstructed primary key. Singleton key lists
    /// collapse back to bare strings, so this is an exact inverse of
    /// [`descriptor_to_table`](Self::descriptor_to_table) modulo the
    /// autoincrement column.
    pub fn table_to_descriptor(
        &self,
        table: &Table,
        autoincrement: Option<&str>,
    ) -> Result<Descriptor> {
        tracing::debug!(
            table = %table.name,
            columns = table.columns.len(),
            "translating table to descriptor"
        );

        let mut descriptor = Descriptor::new();

        for column in &table.columns {
            if Some(column.name.as_str()) == autoincrement {
                continue;
            }
            let field_type = column.sql_type.field_type_for_column(&column.name)?;
            let mut field = Field::new(&column.name, field_type.as_str());
            if !column.nullable {
                field.constraints = Some(Constraints { required: true });
            }
            descriptor.fields.push(field);
        }

        if let Some(key) = &table.primary_key {
            let names: Vec<String> = key
                .columns
                .iter()
                .filter(|name| Some(name.as_str()) != autoincrement)
                .cloned()
                .collect();
            descriptor.primary_key = KeyRef::from_list(names);
        }

        for fk in &table.foreign_keys {
            descriptor
                .foreign_keys
                .push(self.decompose_foreign_key(table, fk)?);
        }

        Ok(descriptor)
    }

    /// Forward type mapping for one field.
    fn column_type(&self, field: &Field) -> Result<SqlType> {
        let field_type =
            FieldType::parse(&field.field_type).ok_or_else(|| Error::UnsupportedType {
                type_name: field.field_type.clone(),
                field: field.name.clone(),
            })?;
        Ok(match field_type {
            FieldType::String => SqlType::Text,
            FieldType::Number => SqlType::Float,
            FieldType::Integer => SqlType::Integer,
            FieldType::Boolean => SqlType::Boolean,
            FieldType::Object | FieldType::Array => SqlType::Jsonb,
            FieldType::Date => SqlType::Date,
            FieldType::Time => SqlType::Time,
            FieldType::Datetime => SqlType::Timestamp,
            FieldType::Geojson => self
                .geometry
                .map_or(SqlType::Jsonb, SqlType::Geometry),
        })
    }

    /// Build one backend foreign key from a declared one.
    ///
    /// The referenced table is the current table for the `"self"` sentinel,
    /// otherwise the prefixed physical name of the referenced resource.
    /// Resolution is per-constraint.
    fn compose_foreign_key(
        &self,
        tablename: &str,
        descriptor: &Descriptor,
        fk: &ForeignKeyRef,
    ) -> Result<ForeignKey> {
        let local = fk.fields.as_list();
        let referenced = fk.reference.fields.as_list();
        // validate_descriptor already checked cardinality and local names;
        // recheck here so the composer is safe to call on its own.
        if local.len() != referenced.len() {
            return Err(Error::MismatchedForeignKey {
                fields: local.len(),
                references: referenced.len(),
            });
        }
        for name in &local {
            validate::require_field(descriptor, name, tablename)?;
        }

        let remote_table = if fk.reference.is_self() {
            tablename.to_string()
        } else {
            self.tablename(&fk.reference.resource)
        };

        let references = referenced
            .into_iter()
            .map(|column| ColumnRef::new(remote_table.clone(), column))
            .collect();

        Ok(ForeignKey {
            columns: local,
            references,
        })
    }

    /// Reconstruct one declared foreign key from a backend one.
    ///
    /// The resource is `"self"` unless an element references a table other
    /// than the current one; elements naming two distinct remote tables
    /// cannot be expressed as one descriptor reference and fail with
    /// [`Error::MixedForeignKeyTables`].
    fn decompose_foreign_key(&self, table: &Table, fk: &ForeignKey) -> Result<ForeignKeyRef> {
        if fk.columns.len() != fk.references.len() {
            return Err(Error::MismatchedForeignKey {
                fields: fk.columns.len(),
                references: fk.references.len(),
            });
        }

        let mut local = Vec::with_capacity(fk.columns.len());
        let mut referenced = Vec::with_capacity(fk.references.len());
        let mut remote_table: Option<&str> = None;

        for (column, reference) in fk.columns.iter().zip(&fk.references) {
            local.push(column.clone());
            referenced.push(reference.column.clone());
            if reference.table != table.name {
                match remote_table {
                    Some(seen) if seen != reference.table => {
                        return Err(Error::MixedForeignKeyTables {
                            table: table.name.clone(),
                        });
                    }
                    _ => remote_table = Some(&reference.table),
                }
            }
        }

        let resource = match remote_table {
            None => "self".to_string(),
            Some(name) => self.bucket(name).unwrap_or_else(|| {
                tracing::warn!(
                    table = %table.name,
                    remote = name,
                    "referenced table does not carry the configured prefix"
                );
                name.to_string()
            }),
        };

        let fields = KeyRef::from_list(local).ok_or(Error::MismatchedForeignKey {
            fields: 0,
            references: 0,
        })?;
        let referenced = KeyRef::from_list(referenced).ok_or(Error::MismatchedForeignKey {
            fields: 0,
            references: 0,
        })?;

        Ok(ForeignKeyRef {
            fields,
            reference: Reference {
                resource,
                fields: referenced,
            },
        })
    }
}
