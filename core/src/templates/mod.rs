#![deny(missing_docs)]

//! # Template Sets
//!
//! Each architecture style registers one `TemplateSet`: a table of file
//! templates and patch-fragment templates keyed by `ArtifactKind`, plus the
//! directory layout its modules use. Styles share the descriptors from
//! `schema` and the column plan from `columns`; only the emitted tree differs.
//!
//! - **registry**: style lookup (the architecture dispatcher).
//! - **columns**: single-traversal column plan for SQL and scan code.
//! - **flat**: the flat 4-tier style.
//! - **layered**: the layered DDD style.

pub mod columns;
pub mod flat;
pub mod layered;
pub mod registry;

use crate::patcher::PatchTarget;
use crate::schema::{ArchitectureStyle, EntityDescriptor, ModuleDescriptor};
use crate::templates::columns::ColumnPlan;
use indexmap::IndexMap;
use std::fmt::Display;
use std::path::PathBuf;

pub use registry::TemplateRegistry;

/// One of the five REST operations generated per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /things`
    Create,
    /// `GET /things/:id`
    Get,
    /// `GET /things`
    List,
    /// `PUT /things/:id`
    Update,
    /// `DELETE /things/:id`
    Delete,
}

impl Operation {
    /// All operations in report order.
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Get,
        Operation::List,
        Operation::Update,
        Operation::Delete,
    ];

    /// HTTP verb.
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "POST",
            Operation::Get | Operation::List => "GET",
            Operation::Update => "PUT",
            Operation::Delete => "DELETE",
        }
    }

    /// True for operations addressed by identifier.
    pub fn takes_id(&self) -> bool {
        matches!(self, Operation::Get | Operation::Update | Operation::Delete)
    }

    /// Router path, e.g. `/products/:id`.
    pub fn route_path(&self, entity: &EntityDescriptor) -> String {
        if self.takes_id() {
            format!("{}/:id", entity.resource_path())
        } else {
            entity.resource_path()
        }
    }

    /// API documentation path, e.g. `/products/{id}`.
    pub fn doc_path(&self, entity: &EntityDescriptor) -> String {
        if self.takes_id() {
            format!("{}/{{id}}", entity.resource_path())
        } else {
            entity.resource_path()
        }
    }

    /// Exported handler / service method name, e.g. `ListProducts`.
    pub fn action_name(&self, entity: &EntityDescriptor) -> String {
        match self {
            Operation::Create => format!("Create{}", entity.pascal_name()),
            Operation::Get => format!("Get{}", entity.pascal_name()),
            Operation::List => format!("List{}", entity.names.plural_pascal()),
            Operation::Update => format!("Update{}", entity.pascal_name()),
            Operation::Delete => format!("Delete{}", entity.pascal_name()),
        }
    }

    /// File stem of the orchestration unit, e.g. `list_products`.
    pub fn file_stem(&self, entity: &EntityDescriptor) -> String {
        match self {
            Operation::List => format!("list_{}", entity.table_name()),
            other => format!("{}_{}", other, entity.file_stem()),
        }
    }

    /// Short human summary used in reports and doc annotations.
    pub fn summary(&self, entity: &EntityDescriptor) -> String {
        let lower = entity.names.snake.replace('_', " ");
        match self {
            Operation::Create => format!("Create a new {}", lower),
            Operation::Get => format!("Get {} by ID", lower),
            Operation::List => format!("List {} with pagination", entity.names.plural_snake().replace('_', " ")),
            Operation::Update => format!("Update an existing {}", lower),
            Operation::Delete => format!("Delete {} by ID", lower),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// Kinds of artifact a template set can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Data record / domain entity.
    Record,
    /// Domain error catalog.
    ErrorCatalog,
    /// Persistence port.
    RepositoryContract,
    /// Persistence adapter.
    RepositoryImplementation,
    /// Single use case (one per operation).
    OrchestrationUnit(Operation),
    /// Service aggregating every operation.
    Service,
    /// HTTP controller.
    HttpHandler,
    /// Route registrations patched into the module route table.
    RouteFragment,
    /// Dependency wiring patched into the module wiring file.
    ModuleWiringFragment,
    /// New module wiring file (module generator).
    ModuleWiring,
    /// New module route table (module generator).
    ModuleRoutes,
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Record => write!(f, "record"),
            ArtifactKind::ErrorCatalog => write!(f, "error catalog"),
            ArtifactKind::RepositoryContract => write!(f, "repository contract"),
            ArtifactKind::RepositoryImplementation => write!(f, "repository"),
            ArtifactKind::OrchestrationUnit(op) => write!(f, "{} use case", op),
            ArtifactKind::Service => write!(f, "service"),
            ArtifactKind::HttpHandler => write!(f, "handler"),
            ArtifactKind::RouteFragment => write!(f, "route fragment"),
            ArtifactKind::ModuleWiringFragment => write!(f, "module wiring fragment"),
            ArtifactKind::ModuleWiring => write!(f, "module wiring"),
            ArtifactKind::ModuleRoutes => write!(f, "module routes"),
        }
    }
}

/// A rendered source file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Artifact that produced it.
    pub kind: ArtifactKind,
    /// Target path relative to the project root.
    pub path: PathBuf,
    /// Full file contents.
    pub contents: String,
}

/// Directory conventions of a style, relative to the module directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleLayout {
    /// Package holding the module struct and factory (`""` = module root).
    pub wiring_package: &'static str,
    /// Package holding `RegisterRoutes`.
    pub routes_package: &'static str,
    /// Sub-directories created for a new module.
    pub directories: &'static [&'static str],
}

impl ModuleLayout {
    /// Wiring file path relative to the project root.
    pub fn wiring_file(&self, module: &ModuleDescriptor) -> PathBuf {
        package_file(module, self.wiring_package, "module.go")
    }

    /// Route table path relative to the project root.
    pub fn routes_file(&self, module: &ModuleDescriptor) -> PathBuf {
        package_file(module, self.routes_package, "routes.go")
    }

    /// Go package identifier of the wiring package, with the import alias if one is needed.
    pub fn wiring_import(&self, module: &ModuleDescriptor) -> PackageRef {
        PackageRef::new(module, self.wiring_package)
    }

    /// Go package identifier of the routes package, with the import alias if one is needed.
    pub fn routes_import(&self, module: &ModuleDescriptor) -> PackageRef {
        PackageRef::new(module, self.routes_package)
    }
}

fn package_file(module: &ModuleDescriptor, package: &str, file: &str) -> PathBuf {
    let mut path = PathBuf::from(module.relative_dir());
    if !package.is_empty() {
        path.push(package);
    }
    path.push(file);
    path
}

/// How composition files refer to a module package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    /// Full import path.
    pub import_path: String,
    /// Alias to import under, when the package name alone would be ambiguous.
    pub alias: Option<String>,
    /// Identifier used in code (`alias` or package name).
    pub ident: String,
}

impl PackageRef {
    fn new(module: &ModuleDescriptor, package: &str) -> Self {
        let import_path = module.import_path(package);
        if package.is_empty() {
            return Self {
                import_path,
                alias: None,
                ident: module.dir_name().to_string(),
            };
        }
        let last = package.rsplit('/').next().unwrap_or(package);
        let alias = format!("{}{}", module.names.camel, crate::naming::normalize(last).pascal);
        Self {
            import_path,
            alias: Some(alias.clone()),
            ident: alias,
        }
    }
}

/// Everything an entity template needs.
#[derive(Debug, Clone)]
pub struct EntityContext<'a> {
    /// Hosting module.
    pub module: &'a ModuleDescriptor,
    /// Entity being generated.
    pub entity: &'a EntityDescriptor,
    /// Column plan built once for this entity and style.
    pub columns: ColumnPlan,
    /// Layout of the chosen style.
    pub layout: ModuleLayout,
}

impl EntityContext<'_> {
    /// Path of a file inside the module directory.
    pub fn module_path(&self, sub: &str) -> PathBuf {
        PathBuf::from(self.module.relative_dir()).join(sub)
    }
}

/// Renders one complete entity file.
pub type FileTemplate = fn(&EntityContext<'_>) -> GeneratedFile;

/// Renders the patch targets for one fragment kind.
pub type FragmentTemplate = fn(&EntityContext<'_>) -> Vec<PatchTarget>;

/// Renders one file of a new, empty module.
pub type ModuleTemplate = fn(&ModuleDescriptor, &ModuleLayout) -> GeneratedFile;

/// Builds the per-column bind and scan expressions of a style.
pub type ColumnTemplate = fn(&EntityDescriptor) -> ColumnPlan;

/// A named collection of templates for one architecture style.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Style this set renders.
    pub style: ArchitectureStyle,
    /// Directory conventions.
    pub layout: ModuleLayout,
    /// Column plan builder.
    pub columns: ColumnTemplate,
    /// Entity files in emission order.
    pub entity_files: IndexMap<ArtifactKind, FileTemplate>,
    /// Patch fragments applied to the module's existing files.
    pub entity_fragments: IndexMap<ArtifactKind, FragmentTemplate>,
    /// Files of a new module.
    pub module_files: IndexMap<ArtifactKind, ModuleTemplate>,
}

impl TemplateSet {
    /// Starts an empty set for a style.
    pub fn new(style: ArchitectureStyle, layout: ModuleLayout, columns: ColumnTemplate) -> Self {
        Self {
            style,
            layout,
            columns,
            entity_files: IndexMap::new(),
            entity_fragments: IndexMap::new(),
            module_files: IndexMap::new(),
        }
    }

    /// Registers an entity file template.
    pub fn entity_file(mut self, kind: ArtifactKind, template: FileTemplate) -> Self {
        self.entity_files.insert(kind, template);
        self
    }

    /// Registers a patch fragment template.
    pub fn entity_fragment(mut self, kind: ArtifactKind, template: FragmentTemplate) -> Self {
        self.entity_fragments.insert(kind, template);
        self
    }

    /// Registers a module skeleton template.
    pub fn module_file(mut self, kind: ArtifactKind, template: ModuleTemplate) -> Self {
        self.module_files.insert(kind, template);
        self
    }

    /// Builds the render context for an entity.
    pub fn context<'a>(
        &self,
        module: &'a ModuleDescriptor,
        entity: &'a EntityDescriptor,
    ) -> EntityContext<'a> {
        EntityContext {
            module,
            entity,
            columns: (self.columns)(entity),
            layout: self.layout,
        }
    }

    /// Renders every entity file in registration order.
    pub fn render_entity(&self, ctx: &EntityContext<'_>) -> Vec<GeneratedFile> {
        self.entity_files
            .iter()
            .map(|(kind, template)| {
                log::debug!("Rendering {} for {}", kind, ctx.entity.pascal_name());
                template(ctx)
            })
            .collect()
    }

    /// Renders every patch fragment in registration order.
    pub fn render_fragments(&self, ctx: &EntityContext<'_>) -> Vec<PatchTarget> {
        self.entity_fragments
            .values()
            .flat_map(|template| template(ctx))
            .collect()
    }

    /// Renders the skeleton of a new module.
    pub fn render_module(&self, module: &ModuleDescriptor) -> Vec<GeneratedFile> {
        self.module_files
            .values()
            .map(|template| template(module, &self.layout))
            .collect()
    }
}

// --- Shared rendering helpers ---

/// Renders a Go import block from groups of lines, skipping empty groups.
pub(crate) fn import_block(groups: &[Vec<String>]) -> String {
    let groups: Vec<&Vec<String>> = groups.iter().filter(|g| !g.is_empty()).collect();
    let mut code = String::from("import (\n");
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            code.push('\n');
        }
        for line in group.iter() {
            code.push('\t');
            code.push_str(line);
            code.push('\n');
        }
    }
    code.push_str(")\n");
    code
}

/// Quoted import line, optionally aliased.
pub(crate) fn import_line(path: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{} \"{}\"", alias, path),
        None => format!("\"{}\"", path),
    }
}

/// Standard-library imports for an entity, adding `time` when needed.
pub(crate) fn std_imports(entity: &EntityDescriptor, base: &[&str]) -> Vec<String> {
    let mut imports: Vec<String> = base.iter().map(|s| format!("\"{}\"", s)).collect();
    if entity.has_temporal_field() {
        imports.push("\"time\"".to_string());
    }
    imports.sort();
    imports.dedup();
    imports
}

/// `name string, price float64`
pub(crate) fn typed_params(entity: &EntityDescriptor) -> String {
    entity
        .fields()
        .iter()
        .map(|f| format!("{} {}", f.private_name(), f.host_type))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Request / DTO struct body with JSON tags, one field per line.
pub(crate) fn json_struct_fields(entity: &EntityDescriptor, indent: &str) -> String {
    let mut code = String::new();
    for field in entity.fields() {
        code.push_str(&format!(
            "{}{} {} `json:\"{}\" example:\"{}\"`\n",
            indent,
            field.public_name(),
            field.host_type,
            field.column_name(),
            field.host_type.doc_example()
        ));
    }
    code
}

/// The five route registrations for an entity, shared by both styles.
pub(crate) fn route_registrations(entity: &EntityDescriptor) -> String {
    let mut code = String::new();
    for op in Operation::ALL {
        code.push_str(&format!(
            "\trouter.{}(\"{}\", func(ctx *gin.Context) {{\n\t\tmodule.{}Controller.{}(context.NewGinContextAdapter(ctx))\n\t}})\n",
            op.verb(),
            op.route_path(entity),
            entity.pascal_name(),
            op.action_name(entity)
        ));
    }
    code
}

/// Patch targets that add the entity's routes to the module route table.
pub(crate) fn route_fragment_targets(ctx: &EntityContext<'_>) -> Vec<PatchTarget> {
    let routes_file = ctx.layout.routes_file(ctx.module);
    vec![
        PatchTarget::import(
            routes_file.clone(),
            &ctx.module.shared_import("web/context"),
            None,
        ),
        PatchTarget::new(
            routes_file,
            "func RegisterRoutes(router *gin.Engine",
            crate::patcher::InsertionMode::After,
            route_registrations(ctx.entity),
            format!("{} routes", ctx.entity.pascal_name()),
        ),
    ]
}

/// Lower-case words for messages, e.g. `order item`.
pub(crate) fn human_name(entity: &EntityDescriptor) -> String {
    entity.names.snake.replace('_', " ")
}

/// The pieces an entity adds to its module's wiring file.
pub(crate) struct WiringFragment {
    /// Import paths of module packages the wiring now references.
    pub imports: Vec<String>,
    /// Struct member lines.
    pub fields: String,
    /// Constructor calls placed before the module literal.
    pub wiring: String,
    /// Literal member lines.
    pub literal: String,
}

/// Patch targets for a wiring fragment.
pub(crate) fn wiring_fragment_targets(
    ctx: &EntityContext<'_>,
    fragment: WiringFragment,
) -> Vec<PatchTarget> {
    use crate::patcher::InsertionMode;

    let wiring_file = ctx.layout.wiring_file(ctx.module);
    let struct_name = ctx.module.struct_name();
    let entity = ctx.entity.pascal_name();

    let mut targets: Vec<PatchTarget> = fragment
        .imports
        .iter()
        .map(|path| PatchTarget::import(wiring_file.clone(), path, None))
        .collect();
    targets.push(PatchTarget::new(
        wiring_file.clone(),
        format!("type {} struct {{", struct_name),
        InsertionMode::After,
        fragment.fields,
        format!("{} module fields", entity),
    ));
    targets.push(PatchTarget::new(
        wiring_file.clone(),
        format!("return &{}{{", struct_name),
        InsertionMode::Before,
        fragment.wiring,
        format!("{} wiring", entity),
    ));
    targets.push(PatchTarget::new(
        wiring_file,
        format!("return &{}{{", struct_name),
        InsertionMode::After,
        fragment.literal,
        format!("{} module literal", entity),
    ));
    targets
}

/// Godoc block with API annotations for one handler.
pub(crate) fn handler_doc(
    entity: &EntityDescriptor,
    op: Operation,
    body_type: Option<&str>,
    success_type: &str,
) -> String {
    let tag = entity.table_name();
    let mut doc = format!(
        "// {} godoc\n// @Summary      {}\n// @Tags         {}\n",
        op.action_name(entity),
        op.summary(entity),
        tag
    );
    if body_type.is_some() {
        doc.push_str("// @Accept       json\n");
    }
    doc.push_str("// @Produce      json\n");
    if op.takes_id() {
        doc.push_str(&format!(
            "// @Param        id       path      string  true  \"{} ID\"\n",
            entity.pascal_name()
        ));
    }
    if op == Operation::List {
        doc.push_str("// @Param        page     query     int     false  \"Page number\" default(1)\n");
        doc.push_str("// @Param        limit    query     int     false  \"Items per page\" default(10)\n");
    }
    if let Some(body) = body_type {
        doc.push_str(&format!(
            "// @Param        request  body      {}  true  \"{} data\"\n",
            body,
            entity.pascal_name()
        ));
    }
    match op {
        Operation::Create => doc.push_str(&format!("// @Success      201  {{object}}  {}\n", success_type)),
        Operation::Delete => doc.push_str("// @Success      204  \"No content\"\n"),
        _ => doc.push_str(&format!("// @Success      200  {{object}}  {}\n", success_type)),
    }
    if body_type.is_some() || op == Operation::List {
        doc.push_str("// @Failure      400  {object}  errors.ProblemDetails  \"Invalid input\"\n");
    }
    if op.takes_id() {
        doc.push_str(&format!(
            "// @Failure      404  {{object}}  errors.ProblemDetails  \"{} not found\"\n",
            entity.pascal_name()
        ));
    }
    doc.push_str("// @Failure      500  {object}  errors.ProblemDetails  \"Internal server error\"\n");
    doc.push_str(&format!(
        "// @Router       {} [{}]\n",
        op.doc_path(entity),
        op.verb().to_lowercase()
    ));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityBuilder;
    use crate::type_mapping::MySqlTypeMapper;

    fn category() -> EntityDescriptor {
        let mut builder = EntityBuilder::new("category", MySqlTypeMapper).unwrap();
        builder.add_field("title:VARCHAR(80)").unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_operation_paths_and_names() {
        let entity = category();
        assert_eq!(Operation::List.route_path(&entity), "/categories");
        assert_eq!(Operation::Get.route_path(&entity), "/categories/:id");
        assert_eq!(Operation::Delete.doc_path(&entity), "/categories/{id}");
        assert_eq!(Operation::List.action_name(&entity), "ListCategories");
        assert_eq!(Operation::Update.action_name(&entity), "UpdateCategory");
        assert_eq!(Operation::List.file_stem(&entity), "list_categories");
        assert_eq!(Operation::Create.file_stem(&entity), "create_category");
    }

    #[test]
    fn test_route_registrations_cover_all_operations() {
        let code = route_registrations(&category());
        assert_eq!(code.matches("router.").count(), 5);
        assert!(code.contains("router.POST(\"/categories\""));
        assert!(code.contains("router.GET(\"/categories/:id\""));
        assert!(code.contains("module.CategoryController.ListCategories("));
    }

    #[test]
    fn test_package_refs() {
        let module = ModuleDescriptor::new(
            "catalog",
            "example.com/shop",
            "internal",
            ArchitectureStyle::Layered,
        )
        .unwrap();
        let flat_root = PackageRef::new(&module, "");
        assert_eq!(flat_root.alias, None);
        assert_eq!(flat_root.ident, "catalog");

        let web = PackageRef::new(&module, "infra/web");
        assert_eq!(web.import_path, "example.com/shop/internal/catalog/infra/web");
        assert_eq!(web.ident, "catalogWeb");
    }

    #[test]
    fn test_import_block_groups() {
        let block = import_block(&[
            vec!["\"context\"".into()],
            vec![],
            vec!["\"example.com/x\"".into()],
        ]);
        assert_eq!(block, "import (\n\t\"context\"\n\n\t\"example.com/x\"\n)\n");
    }
}
