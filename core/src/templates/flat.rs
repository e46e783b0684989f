#![deny(missing_docs)]

//! # Flat Templates
//!
//! Four packages per module: `models`, `repositories`, `services` and
//! `controllers`. One service per entity aggregates validation and all five
//! operations directly over the repository.

use crate::naming::NameForms;
use crate::patcher::PatchTarget;
use crate::schema::{ArchitectureStyle, EntityDescriptor, FieldRule, FieldSpec, ModuleDescriptor};
use crate::templates::columns::{ColumnAccess, ColumnPlan};
use crate::templates::{
    handler_doc, human_name, import_block, import_line, json_struct_fields, route_fragment_targets,
    std_imports, typed_params, wiring_fragment_targets, ArtifactKind, EntityContext,
    GeneratedFile, ModuleLayout, Operation, TemplateSet, WiringFragment,
};

/// Flat modules keep wiring and routes in the module root package.
pub const LAYOUT: ModuleLayout = ModuleLayout {
    wiring_package: "",
    routes_package: "",
    directories: &["models", "repositories", "services", "controllers"],
};

/// Builds the flat template set.
pub fn template_set() -> TemplateSet {
    TemplateSet::new(ArchitectureStyle::Flat, LAYOUT, column_plan)
        .entity_file(ArtifactKind::Record, render_model)
        .entity_file(ArtifactKind::RepositoryImplementation, render_repository)
        .entity_file(ArtifactKind::Service, render_service)
        .entity_file(ArtifactKind::HttpHandler, render_controller)
        .entity_fragment(ArtifactKind::ModuleWiringFragment, wiring_fragment)
        .entity_fragment(ArtifactKind::RouteFragment, route_fragment_targets)
        .module_file(ArtifactKind::ModuleWiring, render_module_wiring)
        .module_file(ArtifactKind::ModuleRoutes, render_module_routes)
}

/// Models expose exported fields; repositories read and scan them directly.
struct ModelAccess;

impl ColumnAccess for ModelAccess {
    fn id_bind(&self) -> String {
        "entity.ID".to_string()
    }

    fn field_bind(&self, field: &FieldSpec) -> String {
        format!("entity.{}", field.public_name())
    }

    fn id_scan(&self) -> String {
        "&entity.ID".to_string()
    }

    fn field_scan(&self, field: &FieldSpec) -> String {
        format!("&entity.{}", field.public_name())
    }

    fn timestamp_scan(&self, names: &NameForms) -> String {
        format!("&entity.{}", names.pascal)
    }
}

fn column_plan(entity: &EntityDescriptor) -> ColumnPlan {
    ColumnPlan::build(entity, &ModelAccess)
}

// --- Entity files ---

fn render_model(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let mut code = String::from("package models\n\nimport \"time\"\n\n");

    code.push_str(&format!(
        "// {} represents a row of the {} table\ntype {} struct {{\n",
        entity.pascal_name(),
        entity.table_name(),
        entity.pascal_name()
    ));
    code.push_str("\tID string `json:\"id\" example:\"550e8400-e29b-41d4-a716-446655440000\"`\n");
    code.push_str(&json_struct_fields(entity, "\t"));
    code.push_str("\tCreatedAt time.Time `json:\"created_at\"`\n");
    code.push_str("\tUpdatedAt time.Time `json:\"updated_at\"`\n");
    code.push_str("}\n");

    GeneratedFile {
        kind: ArtifactKind::Record,
        path: ctx.module_path(&format!("models/{}.go", entity.file_stem())),
        contents: code,
    }
}

fn render_repository(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let human = human_name(entity);
    let plan = &ctx.columns;

    let mut code = String::from("package repositories\n\n");
    code.push_str(&import_block(&[
        vec!["\"context\"".into(), "\"database/sql\"".into()],
        vec![import_line(&ctx.module.import_path("models"), None)],
    ]));

    code.push_str(&format!(
        r#"
// {name}Repository handles database operations for {plural}
type {name}Repository struct {{
	db *sql.DB
}}

// New{name}Repository creates a new {human} repository instance
func New{name}Repository(db *sql.DB) *{name}Repository {{
	return &{name}Repository{{db: db}}
}}

// FindById retrieves a {human} by ID, or nil if it does not exist
func (r *{name}Repository) FindById(ctx context.Context, id string) (*models.{name}, error) {{
	query := `{select_one}`

	var entity models.{name}
	err := r.db.QueryRowContext(ctx, query, id).Scan(
{scan1}	)
	if err != nil {{
		if err == sql.ErrNoRows {{
			return nil, nil
		}}
		return nil, err
	}}

	return &entity, nil
}}

// FindAll retrieves one page of {plural}, newest first
func (r *{name}Repository) FindAll(ctx context.Context, limit, offset int) ([]*models.{name}, error) {{
	query := `{select_page}`

	rows, err := r.db.QueryContext(ctx, query, limit, offset)
	if err != nil {{
		return nil, err
	}}
	defer rows.Close()

	result := []*models.{name}{{}}
	for rows.Next() {{
		var entity models.{name}
		if err := rows.Scan(
{scan2}		); err != nil {{
			return nil, err
		}}
		result = append(result, &entity)
	}}

	return result, rows.Err()
}}

// Count returns the total number of {plural}
func (r *{name}Repository) Count(ctx context.Context) (int, error) {{
	query := `{count}`

	var count int
	if err := r.db.QueryRowContext(ctx, query).Scan(&count); err != nil {{
		return 0, err
	}}
	return count, nil
}}

// Save inserts a new {human}
func (r *{name}Repository) Save(ctx context.Context, entity *models.{name}) error {{
	query := `{insert}`

	_, err := r.db.ExecContext(
		ctx,
		query,
{insert_args}	)
	return err
}}

// Update modifies an existing {human}
func (r *{name}Repository) Update(ctx context.Context, entity *models.{name}) error {{
	query := `{update}`

	_, err := r.db.ExecContext(
		ctx,
		query,
{update_args}	)
	return err
}}

// Delete removes a {human} by ID
func (r *{name}Repository) Delete(ctx context.Context, id string) error {{
	query := `{delete}`

	_, err := r.db.ExecContext(ctx, query, id)
	return err
}}
"#,
        name = name,
        human = human,
        plural = entity.names.plural_snake().replace('_', " "),
        select_one = plan.select_by_id_sql(),
        select_page = plan.select_page_sql(),
        count = plan.count_sql(),
        insert = plan.insert_sql(),
        update = plan.update_sql(),
        delete = plan.delete_sql(),
        scan1 = plan.scan_args("\t\t"),
        scan2 = plan.scan_args("\t\t\t"),
        insert_args = plan.insert_args("\t\t"),
        update_args = plan.update_args("\t\t"),
    ));

    GeneratedFile {
        kind: ArtifactKind::RepositoryImplementation,
        path: ctx.module_path(&format!("repositories/{}_repository.go", entity.file_stem())),
        contents: code,
    }
}

/// `validateProduct` body: one check per ruled field.
fn validation_checks(entity: &EntityDescriptor) -> String {
    let human = human_name(entity);
    let mut code = String::new();
    for field in entity.fields() {
        let label = field.column_name().replace('_', " ");
        match field.rule() {
            Some(FieldRule::Required) => code.push_str(&format!(
                "\tif {} == \"\" {{\n\t\treturn fmt.Errorf(\"{} {} is required\")\n\t}}\n",
                field.private_name(),
                human,
                label
            )),
            Some(FieldRule::NonNegative) => code.push_str(&format!(
                "\tif {} < 0 {{\n\t\treturn fmt.Errorf(\"{} {} cannot be negative\")\n\t}}\n",
                field.private_name(),
                human,
                label
            )),
            None => {}
        }
    }
    code
}

fn render_service(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let human = human_name(entity);
    let plural = entity.names.plural_pascal();
    let args = entity
        .fields()
        .iter()
        .map(|f| f.private_name())
        .collect::<Vec<_>>()
        .join(", ");

    let mut literal = String::from("\t\tID: shared.GenerateId(),\n");
    let mut assignments = String::new();
    for field in entity.fields() {
        literal.push_str(&format!("\t\t{}: {},\n", field.public_name(), field.private_name()));
        assignments.push_str(&format!(
            "\texisting.{} = {}\n",
            field.public_name(),
            field.private_name()
        ));
    }
    literal.push_str("\t\tCreatedAt: now,\n\t\tUpdatedAt: now,\n");
    assignments.push_str("\texisting.UpdatedAt = time.Now().UTC()\n");

    let mut code = String::from("package services\n\n");
    code.push_str(&import_block(&[
        std_imports(entity, &["context", "fmt", "time"]),
        vec![
            import_line(ctx.module.shared_import("").trim_end_matches('/'), None),
            import_line(&ctx.module.shared_import("dto"), None),
            import_line(&ctx.module.import_path("models"), None),
            import_line(&ctx.module.import_path("repositories"), None),
        ],
    ]));

    code.push_str(&format!(
        r#"
// List{plural}Response is one page of {plural_human}
type List{plural}Response struct {{
	Data       []*models.{name}            `json:"data"`
	Pagination *dto.PaginationResponseDTO `json:"pagination"`
}}

// {name}Service handles business logic for {plural_human}
type {name}Service struct {{
	repository *repositories.{name}Repository
}}

// New{name}Service creates a new {human} service instance
func New{name}Service(repository *repositories.{name}Repository) *{name}Service {{
	return &{name}Service{{repository: repository}}
}}

func validate{name}({params}) error {{
{checks}	return nil
}}

// Get{name} retrieves a {human} by ID
func (s *{name}Service) Get{name}(ctx context.Context, id string) (*models.{name}, error) {{
	if id == "" {{
		return nil, fmt.Errorf("{human} ID is required")
	}}

	entity, err := s.repository.FindById(ctx, id)
	if err != nil {{
		return nil, fmt.Errorf("failed to get {human}: %w", err)
	}}
	if entity == nil {{
		return nil, fmt.Errorf("{human} not found")
	}}

	return entity, nil
}}

// List{plural} retrieves one page of {plural_human}
func (s *{name}Service) List{plural}(ctx context.Context, page, limit int) (*List{plural}Response, error) {{
	if page <= 0 {{
		page = 1
	}}
	if limit <= 0 {{
		limit = 10
	}}
	offset := (page - 1) * limit

	items, err := s.repository.FindAll(ctx, limit, offset)
	if err != nil {{
		return nil, fmt.Errorf("failed to list {plural_human}: %w", err)
	}}

	total, err := s.repository.Count(ctx)
	if err != nil {{
		return nil, fmt.Errorf("failed to count {plural_human}: %w", err)
	}}

	return &List{plural}Response{{
		Data:       items,
		Pagination: dto.NewPaginationResponseDTO(len(items), limit, total),
	}}, nil
}}

// Create{name} validates and stores a new {human}
func (s *{name}Service) Create{name}(ctx context.Context, {params}) (*models.{name}, error) {{
	if err := validate{name}({args}); err != nil {{
		return nil, err
	}}

	now := time.Now().UTC()
	entity := &models.{name}{{
{literal}	}}

	if err := s.repository.Save(ctx, entity); err != nil {{
		return nil, fmt.Errorf("failed to create {human}: %w", err)
	}}

	return entity, nil
}}

// Update{name} validates and replaces the fields of an existing {human}
func (s *{name}Service) Update{name}(ctx context.Context, id string, {params}) (*models.{name}, error) {{
	if id == "" {{
		return nil, fmt.Errorf("{human} ID is required")
	}}
	if err := validate{name}({args}); err != nil {{
		return nil, err
	}}

	existing, err := s.repository.FindById(ctx, id)
	if err != nil {{
		return nil, fmt.Errorf("failed to get {human}: %w", err)
	}}
	if existing == nil {{
		return nil, fmt.Errorf("{human} not found")
	}}

{assignments}
	if err := s.repository.Update(ctx, existing); err != nil {{
		return nil, fmt.Errorf("failed to update {human}: %w", err)
	}}

	return existing, nil
}}

// Delete{name} removes a {human} by ID
func (s *{name}Service) Delete{name}(ctx context.Context, id string) error {{
	if id == "" {{
		return fmt.Errorf("{human} ID is required")
	}}

	existing, err := s.repository.FindById(ctx, id)
	if err != nil {{
		return fmt.Errorf("failed to get {human}: %w", err)
	}}
	if existing == nil {{
		return fmt.Errorf("{human} not found")
	}}

	if err := s.repository.Delete(ctx, id); err != nil {{
		return fmt.Errorf("failed to delete {human}: %w", err)
	}}

	return nil
}}
"#,
        name = name,
        human = human,
        plural = plural,
        plural_human = entity.names.plural_snake().replace('_', " "),
        params = typed_params(entity),
        args = args,
        checks = validation_checks(entity),
        literal = literal,
        assignments = assignments,
    ));

    GeneratedFile {
        kind: ArtifactKind::Service,
        path: ctx.module_path(&format!("services/{}_service.go", entity.file_stem())),
        contents: code,
    }
}

/// `request.Name,` argument lines.
fn request_args(entity: &EntityDescriptor, indent: &str) -> String {
    entity
        .fields()
        .iter()
        .map(|f| format!("{}request.{},\n", indent, f.public_name()))
        .collect()
}

fn render_controller(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let human = human_name(entity);
    let plural = entity.names.plural_pascal();
    let model = format!("models.{}", name);

    let mut code = String::from("package controllers\n\n");
    code.push_str(&import_block(&[
        std_imports(entity, &["net/http"]),
        vec![
            import_line(&ctx.module.shared_import("dto"), None),
            import_line(&ctx.module.shared_import("web/advisor"), None),
            import_line(&ctx.module.shared_import("web/context"), Some("webcontext")),
            import_line(&ctx.module.import_path("services"), None),
        ],
    ]));

    let fields = json_struct_fields(entity, "\t");
    code.push_str(&format!(
        r#"
// {name}Controller handles HTTP requests for {plural_human}
type {name}Controller struct {{
	service *services.{name}Service
}}

// New{name}Controller creates a new {human} controller instance
func New{name}Controller(service *services.{name}Service) *{name}Controller {{
	return &{name}Controller{{service: service}}
}}

// Create{name}Request is the request body for creating a {human}
type Create{name}Request struct {{
{fields}}}

// Update{name}Request is the request body for updating a {human}
type Update{name}Request struct {{
{fields}}}

{create_doc}func (c *{name}Controller) Create{name}(ctx webcontext.WebContext) {{
	var request Create{name}Request
	if err := ctx.BindJSON(&request); err != nil {{
		advisor.ReturnBadRequestError(ctx, err)
		return
	}}

	entity, err := c.service.Create{name}(
		ctx.GetContext(),
{args}	)
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusCreated, entity)
}}

{get_doc}func (c *{name}Controller) Get{name}(ctx webcontext.WebContext) {{
	entity, err := c.service.Get{name}(ctx.GetContext(), ctx.Param("id"))
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusOK, entity)
}}

{list_doc}func (c *{name}Controller) List{plural}(ctx webcontext.WebContext) {{
	pagination, err := dto.NewPaginationRequestDTO(ctx.Query("page"), ctx.Query("limit"))
	if err != nil {{
		advisor.ReturnBadRequestError(ctx, err)
		return
	}}

	result, err := c.service.List{plural}(ctx.GetContext(), pagination.Page, pagination.Limit)
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusOK, result)
}}

{update_doc}func (c *{name}Controller) Update{name}(ctx webcontext.WebContext) {{
	var request Update{name}Request
	if err := ctx.BindJSON(&request); err != nil {{
		advisor.ReturnBadRequestError(ctx, err)
		return
	}}

	entity, err := c.service.Update{name}(
		ctx.GetContext(),
		ctx.Param("id"),
{args}	)
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusOK, entity)
}}

{delete_doc}func (c *{name}Controller) Delete{name}(ctx webcontext.WebContext) {{
	if err := c.service.Delete{name}(ctx.GetContext(), ctx.Param("id")); err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusNoContent, nil)
}}
"#,
        name = name,
        human = human,
        plural = plural,
        plural_human = entity.names.plural_snake().replace('_', " "),
        fields = fields,
        args = request_args(entity, "\t\t"),
        create_doc = handler_doc(entity, Operation::Create, Some(&format!("Create{}Request", name)), &model),
        get_doc = handler_doc(entity, Operation::Get, None, &model),
        list_doc = handler_doc(
            entity,
            Operation::List,
            None,
            &format!("services.List{}Response", plural)
        ),
        update_doc = handler_doc(entity, Operation::Update, Some(&format!("Update{}Request", name)), &model),
        delete_doc = handler_doc(entity, Operation::Delete, None, ""),
    ));

    GeneratedFile {
        kind: ArtifactKind::HttpHandler,
        path: ctx.module_path(&format!("controllers/{}_controller.go", entity.file_stem())),
        contents: code,
    }
}

// --- Fragments ---

fn wiring_fragment(ctx: &EntityContext<'_>) -> Vec<PatchTarget> {
    let name = ctx.entity.pascal_name();
    let lower = ctx.entity.lower_name();
    wiring_fragment_targets(
        ctx,
        WiringFragment {
            imports: vec![
                ctx.module.import_path("controllers"),
                ctx.module.import_path("repositories"),
                ctx.module.import_path("services"),
            ],
            fields: format!(
                "\t{name}Controller *controllers.{name}Controller\n\t{name}Service *services.{name}Service\n",
                name = name
            ),
            wiring: format!(
                "\t{lower}Repository := repositories.New{name}Repository(db)\n\t{lower}Service := services.New{name}Service({lower}Repository)\n\t{lower}Controller := controllers.New{name}Controller({lower}Service)\n\n",
                lower = lower,
                name = name
            ),
            literal: format!(
                "\t\t{name}Controller: {lower}Controller,\n\t\t{name}Service: {lower}Service,\n",
                name = name,
                lower = lower
            ),
        },
    )
}

// --- Module skeleton ---

fn render_module_wiring(module: &ModuleDescriptor, layout: &ModuleLayout) -> GeneratedFile {
    let struct_name = module.struct_name();
    let code = format!(
        r#"package {package}

import (
	"database/sql"
)

// {struct_name} holds the initialized dependencies of the {package} module
type {struct_name} struct {{
}}

// New{struct_name} creates and wires every dependency of the {package} module
func New{struct_name}(db *sql.DB) *{struct_name} {{
	return &{struct_name}{{
	}}
}}
"#,
        package = module.dir_name(),
        struct_name = struct_name,
    );

    GeneratedFile {
        kind: ArtifactKind::ModuleWiring,
        path: layout.wiring_file(module),
        contents: code,
    }
}

fn render_module_routes(module: &ModuleDescriptor, layout: &ModuleLayout) -> GeneratedFile {
    let code = format!(
        r#"package {package}

import (
	"github.com/gin-gonic/gin"
)

// RegisterRoutes registers every route of the {package} module
func RegisterRoutes(router *gin.Engine, module *{struct_name}) {{
}}
"#,
        package = module.dir_name(),
        struct_name = module.struct_name(),
    );

    GeneratedFile {
        kind: ArtifactKind::ModuleRoutes,
        path: layout.routes_file(module),
        contents: code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EntityBuilder;
    use crate::type_mapping::MySqlTypeMapper;
    use std::path::PathBuf;

    fn module() -> ModuleDescriptor {
        ModuleDescriptor::new("catalog", "example.com/shop", "internal", ArchitectureStyle::Flat)
            .unwrap()
    }

    fn product() -> EntityDescriptor {
        let mut builder = EntityBuilder::new("product", MySqlTypeMapper).unwrap();
        builder.add_field("name:VARCHAR(255)").unwrap();
        builder.add_field("price:DECIMAL(10,2)").unwrap();
        builder.add_field("stock:INT").unwrap();
        builder.finish().unwrap()
    }

    fn render(kind: ArtifactKind) -> GeneratedFile {
        let set = template_set();
        let module = module();
        let entity = product();
        let ctx = set.context(&module, &entity);
        set.render_entity(&ctx)
            .into_iter()
            .find(|f| f.kind == kind)
            .unwrap()
    }

    #[test]
    fn test_file_tree() {
        let set = template_set();
        let module = module();
        let entity = product();
        let ctx = set.context(&module, &entity);
        let paths: Vec<PathBuf> = set.render_entity(&ctx).into_iter().map(|f| f.path).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("internal/catalog/models/product.go"),
                PathBuf::from("internal/catalog/repositories/product_repository.go"),
                PathBuf::from("internal/catalog/services/product_service.go"),
                PathBuf::from("internal/catalog/controllers/product_controller.go"),
            ]
        );
    }

    #[test]
    fn test_model_has_one_member_per_field() {
        let model = render(ArtifactKind::Record).contents;
        assert!(model.starts_with("package models\n\nimport \"time\"\n\n// Product represents"));
        assert!(model.contains("\tName string `json:\"name\" example:\"sample\"`\n"));
        assert!(model.contains("\tPrice float64 `json:\"price\""));
        assert!(model.contains("\tStock int `json:\"stock\""));
        assert!(model.ends_with(
            "\tCreatedAt time.Time `json:\"created_at\"`\n\tUpdatedAt time.Time `json:\"updated_at\"`\n}\n"
        ));
    }

    #[test]
    fn test_repository_reads_back_timestamps() {
        let repo = render(ArtifactKind::RepositoryImplementation).contents;
        assert_eq!(
            repo.matches("SELECT id, name, price, stock, created_at, updated_at FROM products").count(),
            2
        );
        assert!(repo.contains("\t\t&entity.Stock,\n\t\t&entity.CreatedAt,\n\t\t&entity.UpdatedAt,\n\t)"));
        assert!(repo.contains("\t\t\t&entity.Stock,\n\t\t\t&entity.CreatedAt,\n\t\t\t&entity.UpdatedAt,\n\t\t); err"));
        assert!(!repo.contains("\tentity.CreatedAt,"));
        assert!(!repo.contains("\tentity.UpdatedAt,"));
    }

    #[test]
    fn test_service_stamps_create_and_update() {
        let service = render(ArtifactKind::Service).contents;
        assert!(service.contains("\t\"time\"\n"));
        assert!(service.contains("\tnow := time.Now().UTC()\n\tentity := &models.Product{\n"));
        assert!(service.contains("\t\tCreatedAt: now,\n\t\tUpdatedAt: now,\n\t}"));
        assert!(service.contains("\texisting.Stock = stock\n\texisting.UpdatedAt = time.Now().UTC()\n"));
    }

    #[test]
    fn test_repository_sql_matches_fields() {
        let repo = render(ArtifactKind::RepositoryImplementation).contents;
        assert!(repo.contains("INSERT INTO products (id, name, price, stock) VALUES (?, ?, ?, ?)"));
        assert!(repo.contains("UPDATE products SET name = ?, price = ?, stock = ? WHERE id = ?"));
        assert!(repo.contains("\t\tentity.Stock,\n\t\tentity.ID,\n\t)"));
        assert_eq!(repo.matches("&entity.Price,").count(), 2);
        assert!(repo.contains("\"example.com/shop/internal/catalog/models\""));
    }

    #[test]
    fn test_service_validation_and_operations() {
        let service = render(ArtifactKind::Service).contents;
        assert!(service.contains("func validateProduct(name string, price float64, stock int) error {"));
        assert!(service.contains("\tif name == \"\" {\n\t\treturn fmt.Errorf(\"product name is required\")"));
        assert!(service.contains("\tif price < 0 {"));
        assert!(service.contains("func (s *ProductService) ListProducts(ctx context.Context, page, limit int) (*ListProductsResponse, error) {"));
        assert!(service.contains("\t\"example.com/shop/internal/shared\"\n"));
        for op in Operation::ALL {
            assert!(service.contains(&format!("func (s *ProductService) {}(", op.action_name(&product()))));
        }
    }

    #[test]
    fn test_controller_annotations() {
        let controller = render(ArtifactKind::HttpHandler).contents;
        assert!(controller.contains("// @Router       /products/{id} [put]\n"));
        assert!(controller.contains("webcontext \"example.com/shop/internal/shared/web/context\""));
        assert!(controller.contains("\t\trequest.Price,\n"));
        assert_eq!(controller.matches(" godoc\n").count(), 5);
    }

    #[test]
    fn test_temporal_field_imports_time() {
        let mut builder = EntityBuilder::new("event", MySqlTypeMapper).unwrap();
        builder.add_field("starts_at:DATETIME").unwrap();
        let entity = builder.finish().unwrap();
        let set = template_set();
        let module = module();
        let ctx = set.context(&module, &entity);
        for file in set.render_entity(&ctx) {
            if file.kind == ArtifactKind::RepositoryImplementation {
                continue;
            }
            assert!(file.contents.contains("\"time\""), "{}", file.path.display());
        }
    }

    #[test]
    fn test_module_skeleton_anchors() {
        let files = template_set().render_module(&module());
        assert_eq!(files[0].path, PathBuf::from("internal/catalog/module.go"));
        assert!(files[0].contents.contains("type CatalogModule struct {\n}"));
        assert!(files[0].contents.contains("return &CatalogModule{\n\t}"));
        assert_eq!(files[1].path, PathBuf::from("internal/catalog/routes.go"));
        assert!(files[1].contents.contains("func RegisterRoutes(router *gin.Engine, module *CatalogModule) {\n}"));
    }
}
