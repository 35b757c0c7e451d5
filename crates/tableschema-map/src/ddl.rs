//! DDL statement generation.
//!
//! Renders a translated [`Table`] into the `CREATE`/`DROP` statements the
//! storage facade executes. Identifiers are always double-quoted; foreign
//! key references reuse the qualified table recorded on the constraint.

use tableschema_core::table::{Index, Table};

/// Quote an identifier for use in a statement, doubling embedded quotes.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Generate the `CREATE TABLE` statement for a translated table.
///
/// Emits column definitions in order, then the primary key constraint,
/// then one `FOREIGN KEY` clause per constraint. Index creation is
/// separate (see [`create_indexes`]) since indexes are statements of their
/// own on every backend.
#[must_use]
pub fn create_table(table: &Table) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(table.columns.len() + 1);

    for column in &table.columns {
        let mut definition = format!(
            "{} {}",
            quote_identifier(&column.name),
            column.sql_type.sql_name()
        );
        if column.auto_increment {
            definition.push_str(" GENERATED BY DEFAULT AS IDENTITY");
        }
        if !column.nullable {
            definition.push_str(" NOT NULL");
        }
        parts.push(definition);
    }

    if let Some(key) = &table.primary_key {
        let columns: Vec<String> = key.columns.iter().map(|c| quote_identifier(c)).collect();
        parts.push(format!("PRIMARY KEY ({})", columns.join(", ")));
    }

    for fk in &table.foreign_keys {
        // All elements of one constraint reference the same table; the
        // translator rejects mixed constraints before they get here.
        let Some(remote) = fk.references.first().map(|r| r.table.as_str()) else {
            continue;
        };
        let local: Vec<String> = fk.columns.iter().map(|c| quote_identifier(c)).collect();
        let referenced: Vec<String> = fk
            .references
            .iter()
            .map(|r| quote_identifier(&r.column))
            .collect();
        parts.push(format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            local.join(", "),
            quote_identifier(remote),
            referenced.join(", ")
        ));
    }

    let statement = format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_identifier(&table.name),
        parts.join(", ")
    );
    tracing::trace!(sql = %statement, "generated CREATE TABLE statement");
    statement
}

/// Generate one `CREATE INDEX` statement per translated index.
#[must_use]
pub fn create_indexes(table: &Table) -> Vec<String> {
    table
        .indexes
        .iter()
        .map(|index| create_index(&table.name, index))
        .collect()
}

fn create_index(table: &str, index: &Index) -> String {
    let columns: Vec<String> = index.columns.iter().map(|c| quote_identifier(c)).collect();
    let statement = format!(
        "CREATE INDEX {} ON {} ({})",
        quote_identifier(&index.name),
        quote_identifier(table),
        columns.join(", ")
    );
    tracing::trace!(sql = %statement, "generated CREATE INDEX statement");
    statement
}

/// Generate the `DROP TABLE` statement for a table name.
#[must_use]
pub fn drop_table(name: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_identifier(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableschema_core::table::{Column, ColumnRef, ForeignKey, PrimaryKey};
    use tableschema_core::types::{GeometryKind, SqlType};

    fn sample_table() -> Table {
        let mut table = Table::new("prefix_articles");
        table
            .columns
            .push(Column::new("id", SqlType::Integer).auto_increment());
        table.columns.push(Column::new("title", SqlType::Text).not_null());
        table.columns.push(Column::new("rating", SqlType::Float));
        table.primary_key = Some(PrimaryKey {
            columns: vec!["id".to_string()],
        });
        table
    }

    #[test]
    fn test_create_table_shape() {
        let sql = create_table(&sample_table());
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"prefix_articles\""));
        assert!(sql.contains("\"id\" INTEGER GENERATED BY DEFAULT AS IDENTITY NOT NULL"));
        assert!(sql.contains("\"title\" TEXT NOT NULL"));
        assert!(sql.contains("\"rating\" DOUBLE PRECISION"));
        assert!(sql.contains("PRIMARY KEY (\"id\")"));
    }

    #[test]
    fn test_create_table_foreign_key_clause() {
        let mut table = sample_table();
        table.foreign_keys.push(ForeignKey {
            columns: vec!["rating".to_string()],
            references: vec![ColumnRef::new("prefix_scores", "value")],
        });
        let sql = create_table(&table);
        assert!(sql.contains(
            "FOREIGN KEY (\"rating\") REFERENCES \"prefix_scores\" (\"value\")"
        ));
    }

    #[test]
    fn test_create_table_geometry_column_spec() {
        let mut table = Table::new("prefix_places");
        table.columns.push(Column::new(
            "location",
            SqlType::Geometry(GeometryKind::SdeSt),
        ));
        let sql = create_table(&table);
        assert!(sql.contains("\"location\" SDE.ST_GEOMETRY"));
    }

    #[test]
    fn test_create_indexes() {
        let mut table = sample_table();
        table.indexes.push(Index {
            name: "prefix_articles_ix000".to_string(),
            columns: vec!["title".to_string(), "rating".to_string()],
        });
        let statements = create_indexes(&table);
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0],
            "CREATE INDEX \"prefix_articles_ix000\" ON \"prefix_articles\" (\"title\", \"rating\")"
        );
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            drop_table("prefix_articles"),
            "DROP TABLE IF EXISTS \"prefix_articles\""
        );
    }

    #[test]
    fn test_quote_identifier_doubles_quotes() {
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }
}
