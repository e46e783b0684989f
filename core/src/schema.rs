#![deny(missing_docs)]

//! # Field Schema
//!
//! Descriptors for the module and entity being scaffolded.
//!
//! `EntityBuilder` holds the collection rules independently of any prompt: it
//! parses one `name:TYPE` token at a time, derives every name form and the host
//! type once, and freezes the ordered field list on `finish`.

use crate::error::{AppError, AppResult};
use crate::naming::{is_host_keyword, normalize, NameForms};
use crate::type_mapping::{HostType, TypeMapper};
use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;

/// Column names that every generated table already carries.
pub const IMPLICIT_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

/// Identifiers referenced inside generated function bodies; a field parameter
/// with one of these names would shadow them.
pub const GENERATED_LOCALS: &[&str] = &[
    "ctx", "err", "entity", "existing", "s", "fmt", "models", "shared", "now", "time",
];

/// Package identifiers that a flat module's unaliased package name would
/// shadow in the composition root or in its own generated files.
pub const RESERVED_PACKAGE_NAMES: &[&str] = &[
    "advisor", "container", "context", "controllers", "dto", "errors", "fmt", "gin", "http",
    "main", "models", "repositories", "routes", "services", "shared", "sql", "time", "webcontext",
];

/// Literal token that ends field collection.
pub const FIELD_SENTINEL: &str = "done";

fn identifier_re() -> &'static Regex {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    IDENT_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_\-]*$").expect("Invalid identifier regex")
    })
}

fn storage_type_re() -> &'static Regex {
    static TYPE_RE: OnceLock<Regex> = OnceLock::new();
    TYPE_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_ ]*(\([^()]*\))?[A-Za-z ]*$")
            .expect("Invalid storage type regex")
    })
}

/// Validates and normalizes a module or entity name.
pub fn parse_identifier(kind: &str, raw: &str) -> AppResult<NameForms> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Input(format!("{} name cannot be empty", kind)));
    }
    if !identifier_re().is_match(trimmed) {
        return Err(AppError::Input(format!(
            "{} name '{}' must start with a letter and contain only letters, digits, '_' or '-'",
            kind, trimmed
        )));
    }
    Ok(normalize(trimmed))
}

/// Rejects module and entity names whose generated identifiers would be Go keywords.
fn reject_host_keyword(kind: &str, names: &NameForms) -> AppResult<()> {
    if is_host_keyword(&names.snake) || is_host_keyword(&names.camel) {
        return Err(AppError::Input(format!(
            "{} name '{}' is a reserved word in generated code",
            kind, names.snake
        )));
    }
    Ok(())
}

/// Generated layout convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchitectureStyle {
    /// Models, repositories, services and controllers in four flat packages.
    Flat,
    /// Domain entities, repository contracts, use cases and infrastructure layers.
    Layered,
}

impl ArchitectureStyle {
    /// All supported styles in menu order.
    pub const ALL: [ArchitectureStyle; 2] = [ArchitectureStyle::Flat, ArchitectureStyle::Layered];

    /// Parses the operator's menu selection (`1` = Flat, `2` = Layered).
    pub fn from_choice(choice: &str) -> AppResult<Self> {
        match choice.trim() {
            "1" => Ok(ArchitectureStyle::Flat),
            "2" => Ok(ArchitectureStyle::Layered),
            other => Err(AppError::Input(format!(
                "Unsupported architecture selection '{}' (expected 1 or 2)",
                other
            ))),
        }
    }

    /// Menu number for this style.
    pub fn choice(&self) -> &'static str {
        match self {
            ArchitectureStyle::Flat => "1",
            ArchitectureStyle::Layered => "2",
        }
    }

    /// Human readable description shown in menus and reports.
    pub fn description(&self) -> &'static str {
        match self {
            ArchitectureStyle::Flat => "Flat 4-tier (models / repositories / services / controllers)",
            ArchitectureStyle::Layered => "Layered DDD (domain / application / infrastructure)",
        }
    }
}

impl Display for ArchitectureStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchitectureStyle::Flat => write!(f, "flat"),
            ArchitectureStyle::Layered => write!(f, "layered"),
        }
    }
}

/// Validation applied to a field by generated constructors and services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Text must not be empty.
    Required,
    /// Numbers must not be negative.
    NonNegative,
}

/// One declared attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Exactly what the operator typed, e.g. `name:VARCHAR(255)`.
    pub raw_input: String,
    /// Upper-cased storage type, e.g. `VARCHAR(255)`.
    pub storage_type: String,
    /// Resolved host type.
    pub host_type: HostType,
    /// Canonical name forms, computed once.
    pub names: NameForms,
}

impl FieldSpec {
    /// Parses one `name:TYPE` token.
    pub fn parse(raw_input: &str, mapper: &impl TypeMapper) -> AppResult<Self> {
        let raw = raw_input.trim();
        let (name, storage) = raw.split_once(':').ok_or_else(|| {
            AppError::Input(format!(
                "'{}' is not a field declaration, expected name:TYPE (e.g. price:DECIMAL(10,2))",
                raw
            ))
        })?;

        let names = parse_identifier("Field", name)?;

        let storage_type = storage.trim().to_uppercase();
        if storage_type.is_empty() {
            return Err(AppError::Input(format!(
                "Field '{}' is missing a storage type",
                name.trim()
            )));
        }
        if !storage_type_re().is_match(&storage_type) {
            return Err(AppError::Input(format!(
                "'{}' is not a valid storage type",
                storage_type
            )));
        }

        if IMPLICIT_COLUMNS.contains(&names.snake.as_str()) {
            return Err(AppError::Input(format!(
                "'{}' is generated automatically and cannot be declared",
                names.snake
            )));
        }
        if is_host_keyword(&names.camel) {
            return Err(AppError::Input(format!(
                "'{}' is a reserved word in generated code",
                names.camel
            )));
        }

        if GENERATED_LOCALS.contains(&names.camel.as_str()) {
            return Err(AppError::Input(format!(
                "'{}' clashes with a variable of the generated code",
                names.camel
            )));
        }

        let host_type = mapper.resolve(&storage_type);

        Ok(Self {
            raw_input: raw.to_string(),
            storage_type,
            host_type,
            names,
        })
    }

    /// snake_case column name.
    pub fn column_name(&self) -> &str {
        &self.names.snake
    }

    /// camelCase name for private members, parameters and locals.
    pub fn private_name(&self) -> &str {
        &self.names.camel
    }

    /// PascalCase name for exported members and accessors.
    pub fn public_name(&self) -> &str {
        &self.names.pascal
    }

    /// Validation rule generated for this field, if any.
    pub fn rule(&self) -> Option<FieldRule> {
        if self.host_type.is_numeric() {
            Some(FieldRule::NonNegative)
        } else if self.host_type == HostType::Text {
            Some(FieldRule::Required)
        } else {
            None
        }
    }
}

/// One scaffolded business object with a frozen, ordered field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Name as typed by the operator.
    pub raw_name: String,
    /// Canonical name forms.
    pub names: NameForms,
    fields: Vec<FieldSpec>,
}

impl EntityDescriptor {
    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// camelCase entity name (`orderItem`).
    pub fn lower_name(&self) -> &str {
        &self.names.camel
    }

    /// PascalCase entity name (`OrderItem`).
    pub fn pascal_name(&self) -> &str {
        &self.names.pascal
    }

    /// snake_case entity name (`order_item`), used for file names.
    pub fn file_stem(&self) -> &str {
        &self.names.snake
    }

    /// Storage table name (`order_items`).
    pub fn table_name(&self) -> String {
        self.names.plural_snake()
    }

    /// REST collection path (`/order-items`).
    pub fn resource_path(&self) -> String {
        format!("/{}", self.names.plural_snake().replace('_', "-"))
    }

    /// True if any field maps to the temporal host type.
    pub fn has_temporal_field(&self) -> bool {
        self.fields.iter().any(|f| f.host_type.is_temporal())
    }
}

/// Accumulates fields for one entity until the operator signals completion.
#[derive(Debug)]
pub struct EntityBuilder<M> {
    raw_name: String,
    names: NameForms,
    fields: Vec<FieldSpec>,
    mapper: M,
}

impl<M: TypeMapper> EntityBuilder<M> {
    /// Starts an entity after validating its name.
    pub fn new(raw_name: &str, mapper: M) -> AppResult<Self> {
        let names = parse_identifier("Entity", raw_name)?;
        reject_host_keyword("Entity", &names)?;
        Ok(Self {
            raw_name: raw_name.trim().to_string(),
            names,
            fields: Vec::new(),
            mapper,
        })
    }

    /// Parses and appends one `name:TYPE` token.
    ///
    /// Rejected tokens leave the builder unchanged so the operator can retry.
    pub fn add_field(&mut self, raw_input: &str) -> AppResult<&FieldSpec> {
        let field = FieldSpec::parse(raw_input, &self.mapper)?;

        if self
            .fields
            .iter()
            .any(|f| f.column_name() == field.column_name())
        {
            return Err(AppError::Input(format!(
                "Field '{}' was already declared",
                field.column_name()
            )));
        }

        self.fields.push(field);
        Ok(&self.fields[self.fields.len() - 1])
    }

    /// Number of accepted fields so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Freezes the field list. At least one field is required.
    pub fn finish(self) -> AppResult<EntityDescriptor> {
        if self.fields.is_empty() {
            return Err(AppError::Precondition(format!(
                "Entity '{}' needs at least one field",
                self.names.pascal
            )));
        }
        Ok(EntityDescriptor {
            raw_name: self.raw_name,
            names: self.names,
            fields: self.fields,
        })
    }
}

/// The feature module that hosts generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Canonical name forms.
    pub names: NameForms,
    /// Hosting project's module identity, e.g. `github.com/acme/shop`.
    pub path_prefix: String,
    /// Directory (relative to the project root) holding feature modules.
    pub modules_dir: String,
    /// Layout convention of the module.
    pub style: ArchitectureStyle,
}

impl ModuleDescriptor {
    /// Builds a descriptor after validating the module name.
    pub fn new(
        raw_name: &str,
        path_prefix: &str,
        modules_dir: &str,
        style: ArchitectureStyle,
    ) -> AppResult<Self> {
        let names = parse_identifier("Module", raw_name)?;
        reject_host_keyword("Module", &names)?;
        if style == ArchitectureStyle::Flat && RESERVED_PACKAGE_NAMES.contains(&names.snake.as_str()) {
            return Err(AppError::Input(format!(
                "Module name '{}' would shadow the '{}' package in generated code",
                names.snake, names.snake
            )));
        }
        Ok(Self {
            names,
            path_prefix: path_prefix.trim_end_matches('/').to_string(),
            modules_dir: modules_dir.trim_matches('/').to_string(),
            style,
        })
    }

    /// Directory name and package name of the module (`simple_module`).
    pub fn dir_name(&self) -> &str {
        &self.names.snake
    }

    /// Type name of the module struct. `simple_module` stays `SimpleModule`.
    pub fn struct_name(&self) -> String {
        if self.names.pascal.ends_with("Module") {
            self.names.pascal.clone()
        } else {
            format!("{}Module", self.names.pascal)
        }
    }

    /// Module directory relative to the project root, with `/` separators.
    pub fn relative_dir(&self) -> String {
        format!("{}/{}", self.modules_dir, self.names.snake)
    }

    /// Import path of a package inside the module (`sub` may be empty).
    pub fn import_path(&self, sub: &str) -> String {
        let base = format!("{}/{}", self.path_prefix, self.relative_dir());
        if sub.is_empty() {
            base
        } else {
            format!("{}/{}", base, sub.trim_matches('/'))
        }
    }

    /// Import path of a shared package of the hosting project.
    pub fn shared_import(&self, sub: &str) -> String {
        format!("{}/{}/shared/{}", self.path_prefix, self.modules_dir, sub)
    }
}
