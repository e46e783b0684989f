#![deny(missing_docs)]

//! # Run Report
//!
//! Human-readable summary of one generator run: created directories and
//! files, patched composition files, the table DDL and the exposed
//! operations. The report is for people, not for parsers.

use crate::patcher::FilePatch;
use crate::schema::{ArchitectureStyle, EntityDescriptor};
use crate::templates::Operation;
use std::fmt::{self, Display};
use std::path::PathBuf;

/// One exposed REST operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationLine {
    /// HTTP verb.
    pub verb: &'static str,
    /// Route path.
    pub path: String,
    /// Handler name.
    pub handler: String,
}

impl OperationLine {
    /// The five operations of an entity, in fixed order.
    pub fn for_entity(entity: &EntityDescriptor) -> Vec<Self> {
        Operation::ALL
            .iter()
            .map(|op| Self {
                verb: op.verb(),
                path: op.route_path(entity),
                handler: op.action_name(entity),
            })
            .collect()
    }
}

/// How a composition file was touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchLine {
    /// File path relative to the project root.
    pub path: PathBuf,
    /// Inserted fragment labels.
    pub applied: Vec<String>,
    /// Fragments skipped because they were already present.
    pub skipped: Vec<String>,
}

impl From<&FilePatch> for PatchLine {
    fn from(patch: &FilePatch) -> Self {
        Self {
            path: patch.path.clone(),
            applied: patch.applied.clone(),
            skipped: patch.skipped.clone(),
        }
    }
}

/// Summary of a module or entity run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// What was generated, e.g. `entity Product in module catalog`.
    pub subject: String,
    /// Style used.
    pub style: ArchitectureStyle,
    /// True if nothing was written.
    pub dry_run: bool,
    /// Directories created.
    pub directories: Vec<PathBuf>,
    /// Files created.
    pub files: Vec<PathBuf>,
    /// Composition files patched.
    pub patches: Vec<PatchLine>,
    /// CREATE TABLE statement, for entity runs.
    pub table_statement: Option<String>,
    /// Exposed operations, for entity runs.
    pub operations: Vec<OperationLine>,
    /// Follow-up hints for the operator.
    pub next_steps: Vec<String>,
}

impl RunReport {
    /// Starts an empty report.
    pub fn new(subject: impl Into<String>, style: ArchitectureStyle, dry_run: bool) -> Self {
        Self {
            subject: subject.into(),
            style,
            dry_run,
            directories: Vec::new(),
            files: Vec::new(),
            patches: Vec::new(),
            table_statement: None,
            operations: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    /// Number of fragments skipped as already present across all files.
    pub fn skipped_count(&self) -> usize {
        self.patches.iter().map(|p| p.skipped.len()).sum()
    }

    fn status(&self) -> &'static str {
        if self.dry_run {
            "would create"
        } else {
            "created"
        }
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(f, "🔍 Dry run: nothing was written")?;
        }

        for dir in &self.directories {
            writeln!(f, "✅ {} directory {}", self.status(), dir.display())?;
        }
        for file in &self.files {
            writeln!(f, "✅ {} {}", self.status(), file.display())?;
        }
        for patch in &self.patches {
            if !patch.applied.is_empty() {
                let verb = if self.dry_run { "would update" } else { "updated" };
                writeln!(
                    f,
                    "✅ {} {} ({})",
                    verb,
                    patch.path.display(),
                    patch.applied.join(", ")
                )?;
            }
            for label in &patch.skipped {
                writeln!(
                    f,
                    "⚠️  {} already present in {}, skipped",
                    label,
                    patch.path.display()
                )?;
            }
        }

        if let Some(ddl) = &self.table_statement {
            writeln!(f)?;
            writeln!(f, "🗄️  Table:")?;
            writeln!(f, "{}", ddl)?;
        }

        if !self.operations.is_empty() {
            writeln!(f)?;
            writeln!(f, "🌐 Endpoints:")?;
            for op in &self.operations {
                writeln!(f, "   {:<7}{:<28}{}", op.verb, op.path, op.handler)?;
            }
        }

        if !self.next_steps.is_empty() {
            writeln!(f)?;
            writeln!(f, "💡 Next steps:")?;
            for (i, step) in self.next_steps.iter().enumerate() {
                writeln!(f, "   {}. {}", i + 1, step)?;
            }
        }

        writeln!(f)?;
        if self.dry_run {
            write!(f, "✅ Dry run for {} ({}) completed", self.subject, self.style)
        } else {
            write!(f, "✅ Generated {} ({})", self.subject, self.style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityBuilder;
    use crate::type_mapping::MySqlTypeMapper;

    fn product() -> EntityDescriptor {
        let mut builder = EntityBuilder::new("product", MySqlTypeMapper).unwrap();
        builder.add_field("name:VARCHAR(255)").unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_operation_lines() {
        let lines = OperationLine::for_entity(&product());
        let pairs: Vec<(&str, &str)> = lines.iter().map(|l| (l.verb, l.path.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("POST", "/products"),
                ("GET", "/products/:id"),
                ("GET", "/products"),
                ("PUT", "/products/:id"),
                ("DELETE", "/products/:id"),
            ]
        );
    }

    #[test]
    fn test_report_order_and_markers() {
        let mut report = RunReport::new("entity Product in module catalog", ArchitectureStyle::Flat, false);
        report.files.push(PathBuf::from("internal/catalog/models/product.go"));
        report.patches.push(PatchLine {
            path: PathBuf::from("internal/catalog/module.go"),
            applied: vec!["Product wiring".into()],
            skipped: vec!["import x".into()],
        });
        report.table_statement = Some("CREATE TABLE IF NOT EXISTS products (\n);".into());
        report.operations = OperationLine::for_entity(&product());

        let text = report.to_string();
        let created = text.find("✅ created internal/catalog/models/product.go").unwrap();
        let table = text.find("CREATE TABLE").unwrap();
        let endpoints = text.find("DELETE").unwrap();
        assert!(created < table && table < endpoints);
        assert!(text.contains("⚠️  import x already present in internal/catalog/module.go, skipped"));
        assert!(text.ends_with("✅ Generated entity Product in module catalog (flat)"));
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn test_dry_run_wording() {
        let mut report = RunReport::new("module billing", ArchitectureStyle::Layered, true);
        report.files.push(PathBuf::from("internal/billing/infra/module.go"));
        let text = report.to_string();
        assert!(text.starts_with("🔍 Dry run"));
        assert!(text.contains("✅ would create internal/billing/infra/module.go"));
    }
}
