#![deny(missing_docs)]

//! # Column Plan
//!
//! One ordered list of columns per entity, built in a single pass over the
//! fields. Every SQL statement, bind list, scan list and the table DDL are
//! derived from this list, so they cannot drift out of step.
//!
//! The identifier column always comes first. `created_at` and `updated_at`
//! are filled by the database: they never appear in bind lists, but every
//! SELECT reads them back after the bound columns.

use crate::naming::{normalize, NameForms};
use crate::schema::{EntityDescriptor, FieldSpec, IMPLICIT_COLUMNS};

/// How a style reads values from, and scans values into, its record type.
pub trait ColumnAccess {
    /// Expression passed as the identifier bind argument.
    fn id_bind(&self) -> String;
    /// Expression passed as a field's bind argument.
    fn field_bind(&self, field: &FieldSpec) -> String;
    /// Pointer expression the identifier is scanned into.
    fn id_scan(&self) -> String;
    /// Pointer expression a field is scanned into.
    fn field_scan(&self, field: &FieldSpec) -> String;
    /// Pointer expression a database-maintained timestamp is scanned into.
    fn timestamp_scan(&self, names: &NameForms) -> String;
}

/// One column with every expression derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    /// Column name.
    pub column: String,
    /// Bind argument expression.
    pub bind_value: String,
    /// Scan target expression.
    pub scan_target: String,
    /// DDL column definition.
    pub definition: String,
}

/// A column written by the database and only ever read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampColumn {
    /// Column name.
    pub column: String,
    /// Scan target expression.
    pub scan_target: String,
    /// DDL column definition.
    pub definition: String,
}

/// Ordered columns of one entity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Table name.
    pub table: String,
    /// Identifier binding followed by one binding per field, in declaration order.
    pub bindings: Vec<ColumnBinding>,
    /// `created_at` then `updated_at`.
    pub timestamps: Vec<TimestampColumn>,
}

fn timestamp_definition(column: &str) -> String {
    if column == "updated_at" {
        "updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
            .to_string()
    } else {
        format!("{} TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP", column)
    }
}

impl ColumnPlan {
    /// Builds the plan for `entity` with a style's access expressions.
    pub fn build(entity: &EntityDescriptor, access: &impl ColumnAccess) -> Self {
        let id = ColumnBinding {
            column: "id".to_string(),
            bind_value: access.id_bind(),
            scan_target: access.id_scan(),
            definition: "id VARCHAR(36) PRIMARY KEY".to_string(),
        };

        let bindings = std::iter::once(id)
            .chain(entity.fields().iter().map(|field| ColumnBinding {
                column: field.column_name().to_string(),
                bind_value: access.field_bind(field),
                scan_target: access.field_scan(field),
                definition: format!("{} {} NOT NULL", field.column_name(), field.storage_type),
            }))
            .collect();

        let timestamps = IMPLICIT_COLUMNS
            .iter()
            .filter(|column| **column != "id")
            .map(|column| TimestampColumn {
                column: column.to_string(),
                scan_target: access.timestamp_scan(&normalize(column)),
                definition: timestamp_definition(column),
            })
            .collect();

        Self {
            table: entity.table_name(),
            bindings,
            timestamps,
        }
    }

    /// Number of bound columns (identifier included).
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Always false: the identifier column is always present.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn fields(&self) -> &[ColumnBinding] {
        &self.bindings[1..]
    }

    fn id(&self) -> &ColumnBinding {
        &self.bindings[0]
    }

    /// `id, name, price`
    pub fn column_list(&self) -> String {
        self.bindings
            .iter()
            .map(|b| b.column.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Bound columns followed by the timestamps, as read by every SELECT.
    pub fn select_list(&self) -> String {
        self.bindings
            .iter()
            .map(|b| b.column.as_str())
            .chain(self.timestamps.iter().map(|t| t.column.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `?, ?, ?`
    pub fn placeholders(&self) -> String {
        vec!["?"; self.bindings.len()].join(", ")
    }

    /// `name = ?, price = ?`
    pub fn update_assignments(&self) -> String {
        self.fields()
            .iter()
            .map(|b| format!("{} = ?", b.column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// INSERT statement.
    pub fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.column_list(),
            self.placeholders()
        )
    }

    /// UPDATE statement keyed by identifier.
    pub fn update_sql(&self) -> String {
        format!(
            "UPDATE {} SET {} WHERE id = ?",
            self.table,
            self.update_assignments()
        )
    }

    /// SELECT of one row by identifier.
    pub fn select_by_id_sql(&self) -> String {
        format!("SELECT {} FROM {} WHERE id = ?", self.select_list(), self.table)
    }

    /// Paginated SELECT, newest first.
    pub fn select_page_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            self.select_list(),
            self.table
        )
    }

    /// COUNT of all rows.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.table)
    }

    /// DELETE by identifier.
    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE id = ?", self.table)
    }

    /// Insert arguments, one per line with a trailing comma.
    pub fn insert_args(&self, indent: &str) -> String {
        arg_lines(self.bindings.iter().map(|b| b.bind_value.as_str()), indent)
    }

    /// Update arguments: every field, then the identifier.
    pub fn update_args(&self, indent: &str) -> String {
        arg_lines(
            self.fields()
                .iter()
                .chain(std::iter::once(self.id()))
                .map(|b| b.bind_value.as_str()),
            indent,
        )
    }

    /// Scan targets in select order: bound columns, then timestamps.
    pub fn scan_args(&self, indent: &str) -> String {
        arg_lines(
            self.bindings
                .iter()
                .map(|b| b.scan_target.as_str())
                .chain(self.timestamps.iter().map(|t| t.scan_target.as_str())),
            indent,
        )
    }

    /// MySQL DDL for the table, with database-maintained timestamps.
    pub fn create_table_statement(&self) -> String {
        let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", self.table);
        let definitions: Vec<&str> = self
            .bindings
            .iter()
            .map(|b| b.definition.as_str())
            .chain(self.timestamps.iter().map(|t| t.definition.as_str()))
            .collect();
        for (i, definition) in definitions.iter().enumerate() {
            let separator = if i + 1 < definitions.len() { "," } else { "" };
            sql.push_str(&format!("    {}{}\n", definition, separator));
        }
        sql.push_str(");");
        sql
    }
}

fn arg_lines<'a>(values: impl Iterator<Item = &'a str>, indent: &str) -> String {
    values.map(|v| format!("{}{},\n", indent, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityBuilder;
    use crate::type_mapping::MySqlTypeMapper;
    use pretty_assertions::assert_eq;

    struct Exported;

    impl ColumnAccess for Exported {
        fn id_bind(&self) -> String {
            "p.ID".into()
        }
        fn field_bind(&self, field: &FieldSpec) -> String {
            format!("p.{}", field.public_name())
        }
        fn id_scan(&self) -> String {
            "&p.ID".into()
        }
        fn field_scan(&self, field: &FieldSpec) -> String {
            format!("&p.{}", field.public_name())
        }
        fn timestamp_scan(&self, names: &NameForms) -> String {
            format!("&p.{}", names.pascal)
        }
    }

    fn plan() -> ColumnPlan {
        let mut builder = EntityBuilder::new("product", MySqlTypeMapper).unwrap();
        builder.add_field("name:VARCHAR(255)").unwrap();
        builder.add_field("price:DECIMAL(10,2)").unwrap();
        builder.add_field("stock:INT").unwrap();
        ColumnPlan::build(&builder.finish().unwrap(), &Exported)
    }

    #[test]
    fn test_counts_are_fields_plus_identifier() {
        let plan = plan();
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.placeholders().matches('?').count(), 4);
        assert_eq!(plan.insert_args("").lines().count(), 4);
        assert_eq!(plan.update_args("").lines().count(), 4);
    }

    #[test]
    fn test_scan_list_reads_timestamps_after_bound_columns() {
        let plan = plan();
        let scans: Vec<String> = plan
            .scan_args("")
            .lines()
            .map(|l| l.trim_end_matches(',').to_string())
            .collect();
        let select_list = plan.select_list();
        let selected: Vec<&str> = select_list.split(", ").collect();
        assert_eq!(scans.len(), selected.len());
        assert_eq!(
            scans,
            vec!["&p.ID", "&p.Name", "&p.Price", "&p.Stock", "&p.CreatedAt", "&p.UpdatedAt"]
        );
        assert_eq!(
            selected,
            vec!["id", "name", "price", "stock", "created_at", "updated_at"]
        );

        // bound columns keep the same relative order in every list
        let binds: Vec<String> = plan
            .insert_args("")
            .lines()
            .map(|l| l.trim_end_matches(',').to_string())
            .collect();
        assert_eq!(binds, vec!["p.ID", "p.Name", "p.Price", "p.Stock"]);
        for (bind, scan) in binds.iter().zip(&scans) {
            assert_eq!(format!("&{}", bind), *scan);
        }
        assert!(!plan.insert_sql().contains("created_at"));
        assert!(!plan.update_sql().contains("updated_at"));
    }

    #[test]
    fn test_statements() {
        let plan = plan();
        assert_eq!(
            plan.insert_sql(),
            "INSERT INTO products (id, name, price, stock) VALUES (?, ?, ?, ?)"
        );
        assert_eq!(
            plan.update_sql(),
            "UPDATE products SET name = ?, price = ?, stock = ? WHERE id = ?"
        );
        assert_eq!(
            plan.select_by_id_sql(),
            "SELECT id, name, price, stock, created_at, updated_at FROM products WHERE id = ?"
        );
        assert_eq!(plan.count_sql(), "SELECT COUNT(*) FROM products");
    }

    #[test]
    fn test_update_args_put_identifier_last() {
        assert_eq!(
            plan().update_args("\t"),
            "\tp.Name,\n\tp.Price,\n\tp.Stock,\n\tp.ID,\n"
        );
    }

    #[test]
    fn test_create_table_statement() {
        let ddl = plan().create_table_statement();
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS products (\n    id VARCHAR(36) PRIMARY KEY,\n"));
        assert!(ddl.contains("    price DECIMAL(10,2) NOT NULL,\n"));
        assert!(ddl.contains("    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\n"));
        assert!(ddl.ends_with("ON UPDATE CURRENT_TIMESTAMP\n);"));
        assert_eq!(ddl.lines().filter(|l| l.starts_with("    ")).count(), 6);
    }
}
