#![deny(missing_docs)]

//! # Layered Templates
//!
//! Domain entities and error catalogs under `core/domain`, repository
//! contracts and one use case per operation under `core/application`, and
//! the MySQL adapter, controller and module wiring under `infra`.

use crate::naming::NameForms;
use crate::patcher::PatchTarget;
use crate::schema::{ArchitectureStyle, EntityDescriptor, FieldRule, FieldSpec, ModuleDescriptor};
use crate::templates::columns::{ColumnAccess, ColumnPlan};
use crate::templates::{
    handler_doc, human_name, import_block, import_line, json_struct_fields, route_fragment_targets,
    std_imports, typed_params, wiring_fragment_targets, ArtifactKind, EntityContext,
    GeneratedFile, ModuleLayout, Operation, TemplateSet, WiringFragment,
};

/// Layered modules keep wiring in `infra` and routes in `infra/web`.
pub const LAYOUT: ModuleLayout = ModuleLayout {
    wiring_package: "infra",
    routes_package: "infra/web",
    directories: &[
        "core/domain/entities",
        "core/domain/errors",
        "core/application/repositories",
        "core/application/usecases",
        "infra/repositories",
        "infra/web/controllers",
    ],
};

/// Builds the layered template set.
pub fn template_set() -> TemplateSet {
    TemplateSet::new(ArchitectureStyle::Layered, LAYOUT, column_plan)
        .entity_file(ArtifactKind::Record, render_entity)
        .entity_file(ArtifactKind::ErrorCatalog, render_errors)
        .entity_file(ArtifactKind::RepositoryContract, render_repository_contract)
        .entity_file(ArtifactKind::RepositoryImplementation, render_mysql_repository)
        .entity_file(ArtifactKind::OrchestrationUnit(Operation::Create), render_create)
        .entity_file(ArtifactKind::OrchestrationUnit(Operation::Get), render_get)
        .entity_file(ArtifactKind::OrchestrationUnit(Operation::List), render_list)
        .entity_file(ArtifactKind::OrchestrationUnit(Operation::Update), render_update)
        .entity_file(ArtifactKind::OrchestrationUnit(Operation::Delete), render_delete)
        .entity_file(ArtifactKind::HttpHandler, render_controller)
        .entity_fragment(ArtifactKind::ModuleWiringFragment, wiring_fragment)
        .entity_fragment(ArtifactKind::RouteFragment, route_fragment_targets)
        .module_file(ArtifactKind::ModuleWiring, render_module_wiring)
        .module_file(ArtifactKind::ModuleRoutes, render_module_routes)
}

/// Entities are written through getters and read back into a private row struct.
struct EntityAccess;

impl ColumnAccess for EntityAccess {
    fn id_bind(&self) -> String {
        "entity.GetId()".to_string()
    }

    fn field_bind(&self, field: &FieldSpec) -> String {
        format!("entity.Get{}()", field.public_name())
    }

    fn id_scan(&self) -> String {
        "&row.id".to_string()
    }

    fn field_scan(&self, field: &FieldSpec) -> String {
        format!("&row.{}", field.private_name())
    }

    fn timestamp_scan(&self, names: &NameForms) -> String {
        format!("&row.{}", names.camel)
    }
}

fn column_plan(entity: &EntityDescriptor) -> ColumnPlan {
    ColumnPlan::build(entity, &EntityAccess)
}

/// Error code prefix: the first three letters of the entity, upper-cased.
fn error_code_prefix(entity: &EntityDescriptor) -> String {
    entity.pascal_name().chars().take(3).collect::<String>().to_uppercase()
}

/// Private struct members, identifier first and timestamps last.
fn private_members(entity: &EntityDescriptor) -> String {
    let mut code = String::from("\tid string\n");
    for field in entity.fields() {
        code.push_str(&format!("\t{} {}\n", field.private_name(), field.host_type));
    }
    code.push_str("\tcreatedAt time.Time\n\tupdatedAt time.Time\n");
    code
}

/// `id: id,` style literal lines from private parameters.
fn private_literal(entity: &EntityDescriptor, id_expr: &str, created: &str, updated: &str) -> String {
    let mut code = format!("\t\tid: {},\n", id_expr);
    for field in entity.fields() {
        code.push_str(&format!(
            "\t\t{}: {},\n",
            field.private_name(),
            field.private_name()
        ));
    }
    code.push_str(&format!("\t\tcreatedAt: {},\n\t\tupdatedAt: {},\n", created, updated));
    code
}

fn file(ctx: &EntityContext<'_>, kind: ArtifactKind, sub: String, contents: String) -> GeneratedFile {
    GeneratedFile {
        kind,
        path: ctx.module_path(&sub),
        contents,
    }
}

// --- Domain ---

fn render_entity(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let human = human_name(entity);

    let mut checks = format!(
        "\tif e.id == \"\" {{\n\t\treturn domainErrors.Err{}IdRequired\n\t}}\n",
        name
    );
    let mut accessors = String::from("// Getters\n\n");
    accessors.push_str(&format!(
        "func (e *{}) GetId() string {{\n\treturn e.id\n}}\n\n",
        name
    ));
    let mut setters = String::from("// Setters\n");

    for field in entity.fields() {
        match field.rule() {
            Some(FieldRule::Required) => checks.push_str(&format!(
                "\tif e.{} == \"\" {{\n\t\treturn domainErrors.Err{}{}Required\n\t}}\n",
                field.private_name(),
                name,
                field.public_name()
            )),
            Some(FieldRule::NonNegative) => checks.push_str(&format!(
                "\tif e.{} < 0 {{\n\t\treturn domainErrors.Err{}{}Invalid\n\t}}\n",
                field.private_name(),
                name,
                field.public_name()
            )),
            None => {}
        }
        accessors.push_str(&format!(
            "func (e *{}) Get{}() {} {{\n\treturn e.{}\n}}\n\n",
            name,
            field.public_name(),
            field.host_type,
            field.private_name()
        ));
        setters.push_str(&format!(
            "\nfunc (e *{}) Set{}(value {}) {{\n\te.{} = value\n\te.updatedAt = time.Now().UTC()\n}}\n",
            name,
            field.public_name(),
            field.host_type,
            field.private_name()
        ));
    }

    accessors.push_str(&format!(
        "func (e *{name}) GetCreatedAt() time.Time {{\n\treturn e.createdAt\n}}\n\n\
         func (e *{name}) GetUpdatedAt() time.Time {{\n\treturn e.updatedAt\n}}\n\n",
        name = name
    ));

    let mut code = String::from("package entities\n\n");
    code.push_str(&import_block(&[
        std_imports(entity, &["time"]),
        vec![
            import_line(ctx.module.shared_import("").trim_end_matches('/'), None),
            import_line(
                &ctx.module.import_path("core/domain/errors"),
                Some("domainErrors"),
            ),
        ],
    ]));

    code.push_str(&format!(
        r#"
// {name} is the {human} aggregate
type {name} struct {{
{members}}}

// New{name} creates a validated {human} with a fresh ID
func New{name}({params}) (*{name}, error) {{
	now := time.Now().UTC()
	entity := &{name}{{
{new_literal}	}}
	if err := entity.Validate(); err != nil {{
		return nil, err
	}}
	return entity, nil
}}

// Restore{name} rebuilds a {human} from storage without validation
func Restore{name}(id string, {params}, createdAt, updatedAt time.Time) *{name} {{
	return &{name}{{
{restore_literal}	}}
}}

// Validate checks the invariants of the {human}
func (e *{name}) Validate() error {{
{checks}	return nil
}}

{accessors}{setters}"#,
        name = name,
        human = human,
        members = private_members(entity),
        params = typed_params(entity),
        new_literal = private_literal(entity, "shared.GenerateId()", "now", "now"),
        restore_literal = private_literal(entity, "id", "createdAt", "updatedAt"),
        checks = checks,
        accessors = accessors,
        setters = setters,
    ));

    file(
        ctx,
        ArtifactKind::Record,
        format!("core/domain/entities/{}.go", entity.file_stem()),
        code,
    )
}

fn problem(name: &str, status: u16, title: &str, detail: &str, code: &str) -> String {
    format!(
        "\t{} = sharedErrors.NewProblemDetails(\n\t\t{},\n\t\t\"{}\",\n\t\t\"{}\",\n\t\t\"{}\",\n\t\tsharedErrors.ErrorContextBusiness,\n\t)\n",
        name, status, title, detail, code
    )
}

fn render_errors(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let human = human_name(entity);
    let prefix = error_code_prefix(entity);
    let mut seq = 1000;
    let mut next_code = || {
        seq += 1;
        format!("{}{}", prefix, seq)
    };

    let mut vars = problem(
        &format!("Err{}NotFound", name),
        404,
        &format!("{} not found", name),
        &format!("The requested {} was not found", human),
        &next_code(),
    );
    vars.push_str(&problem(
        &format!("Err{}IdRequired", name),
        400,
        &format!("Invalid {} ID", human),
        &format!("{} ID is required", name),
        &next_code(),
    ));

    for field in entity.fields() {
        let label = field.column_name().replace('_', " ");
        match field.rule() {
            Some(FieldRule::Required) => vars.push_str(&problem(
                &format!("Err{}{}Required", name, field.public_name()),
                400,
                &format!("Invalid {} {}", human, label),
                &format!("{} {} is required", name, label),
                &next_code(),
            )),
            Some(FieldRule::NonNegative) => vars.push_str(&problem(
                &format!("Err{}{}Invalid", name, field.public_name()),
                400,
                &format!("Invalid {} {}", human, label),
                &format!("{} {} cannot be negative", name, label),
                &next_code(),
            )),
            None => {}
        }
    }

    let mut code = String::from("package errors\n\n");
    code.push_str(&import_block(&[vec![import_line(
        &ctx.module.shared_import("errors"),
        Some("sharedErrors"),
    )]]));
    code.push_str(&format!("\nvar (\n{})\n", vars));

    file(
        ctx,
        ArtifactKind::ErrorCatalog,
        format!("core/domain/errors/{}_errors.go", entity.file_stem()),
        code,
    )
}

// --- Persistence ---

fn render_repository_contract(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();

    let mut code = String::from("package repositories\n\n");
    code.push_str(&import_block(&[
        vec!["\"context\"".into()],
        vec![import_line(&ctx.module.import_path("core/domain/entities"), None)],
    ]));
    code.push_str(&format!(
        r#"
// {name}Repository is the persistence port for {plural}.
// FindById returns nil without an error when no row matches.
type {name}Repository interface {{
	Save(ctx context.Context, entity *entities.{name}) error
	FindById(ctx context.Context, id string) (*entities.{name}, error)
	FindAll(ctx context.Context, limit, offset int) ([]*entities.{name}, error)
	Count(ctx context.Context) (int, error)
	Update(ctx context.Context, entity *entities.{name}) error
	Delete(ctx context.Context, id string) error
}}
"#,
        name = name,
        plural = entity.names.plural_snake().replace('_', " "),
    ));

    file(
        ctx,
        ArtifactKind::RepositoryContract,
        format!("core/application/repositories/{}_repository.go", entity.file_stem()),
        code,
    )
}

fn render_mysql_repository(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let lower = entity.lower_name();
    let human = human_name(entity);
    let plan = &ctx.columns;

    let restore_args = std::iter::once("row.id".to_string())
        .chain(entity.fields().iter().map(|f| format!("row.{}", f.private_name())))
        .chain(["row.createdAt".to_string(), "row.updatedAt".to_string()])
        .collect::<Vec<_>>()
        .join(", ");

    let mut code = String::from("package repositories\n\n");
    code.push_str(&import_block(&[
        std_imports(entity, &["context", "database/sql", "time"]),
        vec![
            import_line(
                &ctx.module.import_path("core/application/repositories"),
                Some("appRepositories"),
            ),
            import_line(&ctx.module.import_path("core/domain/entities"), None),
        ],
    ]));

    code.push_str(&format!(
        r#"
var _ appRepositories.{name}Repository = (*{name}MySQLRepository)(nil)

type {lower}Row struct {{
{members}}}

func (row *{lower}Row) toEntity() *entities.{name} {{
	return entities.Restore{name}({restore_args})
}}

// {name}MySQLRepository stores {plural} in MySQL
type {name}MySQLRepository struct {{
	db *sql.DB
}}

// New{name}MySQLRepository creates a new {human} repository instance
func New{name}MySQLRepository(db *sql.DB) *{name}MySQLRepository {{
	return &{name}MySQLRepository{{db: db}}
}}

func (r *{name}MySQLRepository) Save(ctx context.Context, entity *entities.{name}) error {{
	query := `{insert}`

	_, err := r.db.ExecContext(
		ctx,
		query,
{insert_args}	)
	return err
}}

func (r *{name}MySQLRepository) FindById(ctx context.Context, id string) (*entities.{name}, error) {{
	query := `{select_one}`

	var row {lower}Row
	err := r.db.QueryRowContext(ctx, query, id).Scan(
{scan1}	)
	if err != nil {{
		if err == sql.ErrNoRows {{
			return nil, nil
		}}
		return nil, err
	}}

	return row.toEntity(), nil
}}

func (r *{name}MySQLRepository) FindAll(ctx context.Context, limit, offset int) ([]*entities.{name}, error) {{
	query := `{select_page}`

	rows, err := r.db.QueryContext(ctx, query, limit, offset)
	if err != nil {{
		return nil, err
	}}
	defer rows.Close()

	result := []*entities.{name}{{}}
	for rows.Next() {{
		var row {lower}Row
		if err := rows.Scan(
{scan2}		); err != nil {{
			return nil, err
		}}
		result = append(result, row.toEntity())
	}}

	return result, rows.Err()
}}

func (r *{name}MySQLRepository) Count(ctx context.Context) (int, error) {{
	query := `{count}`

	var count int
	if err := r.db.QueryRowContext(ctx, query).Scan(&count); err != nil {{
		return 0, err
	}}
	return count, nil
}}

func (r *{name}MySQLRepository) Update(ctx context.Context, entity *entities.{name}) error {{
	query := `{update}`

	_, err := r.db.ExecContext(
		ctx,
		query,
{update_args}	)
	return err
}}

func (r *{name}MySQLRepository) Delete(ctx context.Context, id string) error {{
	query := `{delete}`

	_, err := r.db.ExecContext(ctx, query, id)
	return err
}}
"#,
        name = name,
        lower = lower,
        human = human,
        plural = entity.names.plural_snake().replace('_', " "),
        members = private_members(entity),
        restore_args = restore_args,
        insert = plan.insert_sql(),
        update = plan.update_sql(),
        select_one = plan.select_by_id_sql(),
        select_page = plan.select_page_sql(),
        count = plan.count_sql(),
        delete = plan.delete_sql(),
        scan1 = plan.scan_args("\t\t"),
        scan2 = plan.scan_args("\t\t\t"),
        insert_args = plan.insert_args("\t\t"),
        update_args = plan.update_args("\t\t"),
    ));

    file(
        ctx,
        ArtifactKind::RepositoryImplementation,
        format!("infra/repositories/{}_mysql_repository.go", entity.file_stem()),
        code,
    )
}

// --- Use cases ---

/// Opening of a use case file: package, imports, struct and constructor.
fn use_case_header(
    ctx: &EntityContext<'_>,
    op: Operation,
    std: Vec<String>,
    extra: Vec<String>,
) -> String {
    let entity = ctx.entity;
    let use_case = format!("{}UseCase", op.action_name(entity));

    let mut project = vec![import_line(
        &ctx.module.import_path("core/application/repositories"),
        None,
    )];
    project.extend(extra);
    project.sort();

    let mut code = String::from("package usecases\n\n");
    code.push_str(&import_block(&[std, project]));
    code.push_str(&format!(
        r#"
// {use_case} handles the {op} operation for {plural_human}
type {use_case} struct {{
	repository repositories.{name}Repository
}}

func New{use_case}(repository repositories.{name}Repository) *{use_case} {{
	return &{use_case}{{repository: repository}}
}}
"#,
        use_case = use_case,
        op = op,
        plural_human = entity.names.plural_snake().replace('_', " "),
        name = entity.pascal_name(),
    ));
    code
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn use_case_path(ctx: &EntityContext<'_>, op: Operation) -> String {
    format!("core/application/usecases/{}.go", op.file_stem(ctx.entity))
}

/// Lookup guarded by the not-found error, shared by get, update and delete.
fn find_or_not_found(entity: &EntityDescriptor, var: &str, fail: &str) -> String {
    format!(
        "\t{var}, err := u.repository.FindById(ctx, input.Id)\n\tif err != nil {{\n\t\treturn {fail}err\n\t}}\n\tif {var} == nil {{\n\t\treturn {fail}domainErrors.Err{name}NotFound\n\t}}\n",
        var = var,
        fail = fail,
        name = entity.pascal_name()
    )
}

fn id_required(entity: &EntityDescriptor, fail: &str) -> String {
    format!(
        "\tif input.Id == \"\" {{\n\t\treturn {}domainErrors.Err{}IdRequired\n\t}}\n",
        fail,
        entity.pascal_name()
    )
}

fn render_create(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let args = entity
        .fields()
        .iter()
        .map(|f| format!("input.{}", f.public_name()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut code = use_case_header(
        ctx,
        Operation::Create,
        std_imports(entity, &["context"]),
        vec![import_line(&ctx.module.import_path("core/domain/entities"), None)],
    );
    code.push_str(&format!(
        r#"
// Create{name}InputDTO carries the fields of a new {human}
type Create{name}InputDTO struct {{
{fields}}}

func (u *Create{name}UseCase) Execute(ctx context.Context, input Create{name}InputDTO) (*{name}OutputDTO, error) {{
	entity, err := entities.New{name}({args})
	if err != nil {{
		return nil, err
	}}

	if err := u.repository.Save(ctx, entity); err != nil {{
		return nil, err
	}}

	return new{name}OutputDTO(entity), nil
}}
"#,
        name = name,
        human = human_name(entity),
        fields = json_struct_fields(entity, "\t"),
        args = args,
    ));

    file(
        ctx,
        ArtifactKind::OrchestrationUnit(Operation::Create),
        use_case_path(ctx, Operation::Create),
        code,
    )
}

fn render_get(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();

    let mut getters = String::from("\t\tId: entity.GetId(),\n");
    for field in entity.fields() {
        getters.push_str(&format!(
            "\t\t{}: entity.Get{}(),\n",
            field.public_name(),
            field.public_name()
        ));
    }
    getters.push_str("\t\tCreatedAt: entity.GetCreatedAt(),\n\t\tUpdatedAt: entity.GetUpdatedAt(),\n");

    let mut code = use_case_header(
        ctx,
        Operation::Get,
        std_imports(entity, &["context", "time"]),
        vec![
            import_line(&ctx.module.import_path("core/domain/entities"), None),
            import_line(
                &ctx.module.import_path("core/domain/errors"),
                Some("domainErrors"),
            ),
        ],
    );
    code.push_str(&format!(
        r#"
// {name}OutputDTO is the public representation of a {human}
type {name}OutputDTO struct {{
	Id string `json:"id" example:"550e8400-e29b-41d4-a716-446655440000"`
{fields}	CreatedAt time.Time `json:"created_at"`
	UpdatedAt time.Time `json:"updated_at"`
}}

func new{name}OutputDTO(entity *entities.{name}) *{name}OutputDTO {{
	return &{name}OutputDTO{{
{getters}	}}
}}

type Get{name}InputDTO struct {{
	Id string
}}

func (u *Get{name}UseCase) Execute(ctx context.Context, input Get{name}InputDTO) (*{name}OutputDTO, error) {{
{id_required}
{lookup}
	return new{name}OutputDTO(entity), nil
}}
"#,
        name = name,
        human = human_name(entity),
        fields = json_struct_fields(entity, "\t"),
        getters = getters,
        id_required = id_required(entity, "nil, "),
        lookup = find_or_not_found(entity, "entity", "nil, "),
    ));

    file(
        ctx,
        ArtifactKind::OrchestrationUnit(Operation::Get),
        use_case_path(ctx, Operation::Get),
        code,
    )
}

fn render_list(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let plural = entity.names.plural_pascal();

    let mut code = use_case_header(
        ctx,
        Operation::List,
        vec!["\"context\"".into()],
        vec![import_line(&ctx.module.shared_import("dto"), None)],
    );
    code.push_str(&format!(
        r#"
type List{plural}InputDTO struct {{
	Page  int
	Limit int
}}

// List{plural}OutputDTO is one page of {plural_human}
type List{plural}OutputDTO struct {{
	Data       []*{name}OutputDTO          `json:"data"`
	Pagination *dto.PaginationResponseDTO `json:"pagination"`
}}

func (u *List{plural}UseCase) Execute(ctx context.Context, input List{plural}InputDTO) (*List{plural}OutputDTO, error) {{
	page := input.Page
	if page <= 0 {{
		page = 1
	}}
	limit := input.Limit
	if limit <= 0 {{
		limit = 10
	}}
	offset := (page - 1) * limit

	items, err := u.repository.FindAll(ctx, limit, offset)
	if err != nil {{
		return nil, err
	}}

	total, err := u.repository.Count(ctx)
	if err != nil {{
		return nil, err
	}}

	data := make([]*{name}OutputDTO, 0, len(items))
	for _, item := range items {{
		data = append(data, new{name}OutputDTO(item))
	}}

	return &List{plural}OutputDTO{{
		Data:       data,
		Pagination: dto.NewPaginationResponseDTO(len(data), limit, total),
	}}, nil
}}
"#,
        name = name,
        plural = plural,
        plural_human = entity.names.plural_snake().replace('_', " "),
    ));

    file(
        ctx,
        ArtifactKind::OrchestrationUnit(Operation::List),
        use_case_path(ctx, Operation::List),
        code,
    )
}

fn render_update(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();

    let setters: String = entity
        .fields()
        .iter()
        .map(|f| format!("\tentity.Set{}(input.{})\n", f.public_name(), f.public_name()))
        .collect();

    let mut code = use_case_header(
        ctx,
        Operation::Update,
        std_imports(entity, &["context"]),
        vec![import_line(
            &ctx.module.import_path("core/domain/errors"),
            Some("domainErrors"),
        )],
    );
    code.push_str(&format!(
        r#"
// Update{name}InputDTO carries the replacement fields of a {human}
type Update{name}InputDTO struct {{
	Id string `json:"-"`
{fields}}}

func (u *Update{name}UseCase) Execute(ctx context.Context, input Update{name}InputDTO) (*{name}OutputDTO, error) {{
{id_required}
{lookup}
{setters}
	if err := entity.Validate(); err != nil {{
		return nil, err
	}}

	if err := u.repository.Update(ctx, entity); err != nil {{
		return nil, err
	}}

	return new{name}OutputDTO(entity), nil
}}
"#,
        name = name,
        human = human_name(entity),
        fields = json_struct_fields(entity, "\t"),
        id_required = id_required(entity, "nil, "),
        lookup = find_or_not_found(entity, "entity", "nil, "),
        setters = setters,
    ));

    file(
        ctx,
        ArtifactKind::OrchestrationUnit(Operation::Update),
        use_case_path(ctx, Operation::Update),
        code,
    )
}

fn render_delete(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();

    let mut code = use_case_header(
        ctx,
        Operation::Delete,
        vec!["\"context\"".into()],
        vec![import_line(
            &ctx.module.import_path("core/domain/errors"),
            Some("domainErrors"),
        )],
    );
    code.push_str(&format!(
        r#"
type Delete{name}InputDTO struct {{
	Id string
}}

func (u *Delete{name}UseCase) Execute(ctx context.Context, input Delete{name}InputDTO) error {{
{id_required}
{lookup}
	return u.repository.Delete(ctx, existing.GetId())
}}
"#,
        name = name,
        id_required = id_required(entity, ""),
        lookup = find_or_not_found(entity, "existing", ""),
    ));

    file(
        ctx,
        ArtifactKind::OrchestrationUnit(Operation::Delete),
        use_case_path(ctx, Operation::Delete),
        code,
    )
}

// --- HTTP ---

fn render_controller(ctx: &EntityContext<'_>) -> GeneratedFile {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let plural = entity.names.plural_pascal();

    let mut members = String::new();
    let mut params = String::new();
    let mut literal = String::new();
    for op in Operation::ALL {
        let use_case = format!("{}UseCase", op.action_name(entity));
        let var = lowercase_first(&use_case);
        members.push_str(&format!("\t{} *usecases.{}\n", var, use_case));
        params.push_str(&format!("\t{} *usecases.{},\n", var, use_case));
        literal.push_str(&format!("\t\t{}: {},\n", var, var));
    }

    let output = format!("usecases.{}OutputDTO", name);

    let mut code = String::from("package controllers\n\n");
    code.push_str(&import_block(&[
        vec!["\"net/http\"".into()],
        vec![
            import_line(&ctx.module.import_path("core/application/usecases"), None),
            import_line(&ctx.module.shared_import("dto"), None),
            import_line(&ctx.module.shared_import("web/advisor"), None),
            import_line(&ctx.module.shared_import("web/context"), Some("webcontext")),
        ],
    ]));

    code.push_str(&format!(
        r#"
// {name}Controller handles HTTP requests for {plural_human}
type {name}Controller struct {{
{members}}}

func New{name}Controller(
{params}) *{name}Controller {{
	return &{name}Controller{{
{literal}	}}
}}

{create_doc}func (c *{name}Controller) Create{name}(ctx webcontext.WebContext) {{
	var input usecases.Create{name}InputDTO
	if err := ctx.BindJSON(&input); err != nil {{
		advisor.ReturnBadRequestError(ctx, err)
		return
	}}

	output, err := c.create{name}UseCase.Execute(ctx.GetContext(), input)
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusCreated, output)
}}

{get_doc}func (c *{name}Controller) Get{name}(ctx webcontext.WebContext) {{
	output, err := c.get{name}UseCase.Execute(ctx.GetContext(), usecases.Get{name}InputDTO{{
		Id: ctx.Param("id"),
	}})
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusOK, output)
}}

{list_doc}func (c *{name}Controller) List{plural}(ctx webcontext.WebContext) {{
	pagination, err := dto.NewPaginationRequestDTO(ctx.Query("page"), ctx.Query("limit"))
	if err != nil {{
		advisor.ReturnBadRequestError(ctx, err)
		return
	}}

	output, err := c.list{plural}UseCase.Execute(ctx.GetContext(), usecases.List{plural}InputDTO{{
		Page:  pagination.Page,
		Limit: pagination.Limit,
	}})
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusOK, output)
}}

{update_doc}func (c *{name}Controller) Update{name}(ctx webcontext.WebContext) {{
	var input usecases.Update{name}InputDTO
	if err := ctx.BindJSON(&input); err != nil {{
		advisor.ReturnBadRequestError(ctx, err)
		return
	}}
	input.Id = ctx.Param("id")

	output, err := c.update{name}UseCase.Execute(ctx.GetContext(), input)
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusOK, output)
}}

{delete_doc}func (c *{name}Controller) Delete{name}(ctx webcontext.WebContext) {{
	err := c.delete{name}UseCase.Execute(ctx.GetContext(), usecases.Delete{name}InputDTO{{
		Id: ctx.Param("id"),
	}})
	if err != nil {{
		advisor.ReturnApplicationError(ctx, err)
		return
	}}

	ctx.JSON(http.StatusNoContent, nil)
}}
"#,
        name = name,
        plural = plural,
        plural_human = entity.names.plural_snake().replace('_', " "),
        members = members,
        params = params,
        literal = literal,
        create_doc = handler_doc(
            entity,
            Operation::Create,
            Some(&format!("usecases.Create{}InputDTO", name)),
            &output
        ),
        get_doc = handler_doc(entity, Operation::Get, None, &output),
        list_doc = handler_doc(
            entity,
            Operation::List,
            None,
            &format!("usecases.List{}OutputDTO", plural)
        ),
        update_doc = handler_doc(
            entity,
            Operation::Update,
            Some(&format!("usecases.Update{}InputDTO", name)),
            &output
        ),
        delete_doc = handler_doc(entity, Operation::Delete, None, ""),
    ));

    file(
        ctx,
        ArtifactKind::HttpHandler,
        format!("infra/web/controllers/{}_controller.go", entity.file_stem()),
        code,
    )
}

// --- Fragments ---

fn wiring_fragment(ctx: &EntityContext<'_>) -> Vec<PatchTarget> {
    let entity = ctx.entity;
    let name = entity.pascal_name();
    let lower = entity.lower_name();

    let use_cases: String = Operation::ALL
        .iter()
        .map(|op| {
            format!(
                "\t\tusecases.New{}UseCase({}Repository),\n",
                op.action_name(entity),
                lower
            )
        })
        .collect();

    wiring_fragment_targets(
        ctx,
        WiringFragment {
            imports: vec![
                ctx.module.import_path("core/application/usecases"),
                ctx.module.import_path("infra/repositories"),
                ctx.module.import_path("infra/web/controllers"),
            ],
            fields: format!("\t{name}Controller *controllers.{name}Controller\n", name = name),
            wiring: format!(
                "\t{lower}Repository := repositories.New{name}MySQLRepository(db)\n\t{lower}Controller := controllers.New{name}Controller(\n{use_cases}\t)\n\n",
                lower = lower,
                name = name,
                use_cases = use_cases
            ),
            literal: format!(
                "\t\t{name}Controller: {lower}Controller,\n",
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
        r#"package infra

import (
	"database/sql"
)

// {struct_name} encapsulates the dependencies of the {module} module
type {struct_name} struct {{
}}

// New{struct_name} creates and wires every dependency of the {module} module
func New{struct_name}(db *sql.DB) *{struct_name} {{
	return &{struct_name}{{
	}}
}}
"#,
        struct_name = struct_name,
        module = module.dir_name(),
    );

    GeneratedFile {
        kind: ArtifactKind::ModuleWiring,
        path: layout.wiring_file(module),
        contents: code,
    }
}

fn render_module_routes(module: &ModuleDescriptor, layout: &ModuleLayout) -> GeneratedFile {
    let code = format!(
        r#"package web

import (
	"github.com/gin-gonic/gin"
	"{infra}"
)

// RegisterRoutes registers every route of the {module} module
func RegisterRoutes(router *gin.Engine, module *infra.{struct_name}) {{
}}
"#,
        infra = module.import_path(layout.wiring_package),
        module = module.dir_name(),
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
        ModuleDescriptor::new("catalog", "example.com/shop", "internal", ArchitectureStyle::Layered)
            .unwrap()
    }

    fn product() -> EntityDescriptor {
        let mut builder = EntityBuilder::new("product", MySqlTypeMapper).unwrap();
        builder.add_field("name:VARCHAR(255)").unwrap();
        builder.add_field("price:DECIMAL(10,2)").unwrap();
        builder.add_field("active:BOOLEAN").unwrap();
        builder.finish().unwrap()
    }

    fn rendered() -> Vec<GeneratedFile> {
        let set = template_set();
        let module = module();
        let entity = product();
        let ctx = set.context(&module, &entity);
        set.render_entity(&ctx)
    }

    fn contents(kind: ArtifactKind) -> String {
        rendered().into_iter().find(|f| f.kind == kind).unwrap().contents
    }

    #[test]
    fn test_file_tree() {
        let paths: Vec<PathBuf> = rendered().into_iter().map(|f| f.path).collect();
        let expected: Vec<PathBuf> = [
            "core/domain/entities/product.go",
            "core/domain/errors/product_errors.go",
            "core/application/repositories/product_repository.go",
            "infra/repositories/product_mysql_repository.go",
            "core/application/usecases/create_product.go",
            "core/application/usecases/get_product.go",
            "core/application/usecases/list_products.go",
            "core/application/usecases/update_product.go",
            "core/application/usecases/delete_product.go",
            "infra/web/controllers/product_controller.go",
        ]
        .iter()
        .map(|p| PathBuf::from("internal/catalog").join(p))
        .collect();
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_entity_constructor_restore_and_accessors() {
        let code = contents(ArtifactKind::Record);
        assert!(code.contains("func NewProduct(name string, price float64, active bool) (*Product, error) {"));
        assert!(code.contains(
            "func RestoreProduct(id string, name string, price float64, active bool, createdAt, updatedAt time.Time) *Product {"
        ));
        assert!(code.contains("\tnow := time.Now().UTC()\n\tentity := &Product{\n\t\tid: shared.GenerateId(),\n"));
        assert!(code.contains("\t\tcreatedAt: now,\n\t\tupdatedAt: now,\n\t}"));
        assert!(code.contains("\t\tcreatedAt: createdAt,\n\t\tupdatedAt: updatedAt,\n\t}"));
        assert!(code.contains("\tcreatedAt time.Time\n\tupdatedAt time.Time\n}"));
        assert!(code.contains("func (e *Product) GetCreatedAt() time.Time {\n\treturn e.createdAt\n}"));
        assert!(code.contains("func (e *Product) GetUpdatedAt() time.Time {\n\treturn e.updatedAt\n}"));
        assert!(code.contains(
            "func (e *Product) SetPrice(value float64) {\n\te.price = value\n\te.updatedAt = time.Now().UTC()\n}"
        ));
        assert!(code.contains("\t\"time\"\n"));
        assert!(code.contains("\tif e.price < 0 {\n\t\treturn domainErrors.ErrProductPriceInvalid\n"));
        for field in ["Name", "Price", "Active"] {
            assert!(code.contains(&format!("func (e *Product) Get{}()", field)));
            assert!(code.contains(&format!("func (e *Product) Set{}(value ", field)));
        }
        assert!(code.contains("func (e *Product) GetId() string {"));
    }

    #[test]
    fn test_error_catalog_codes() {
        let code = contents(ArtifactKind::ErrorCatalog);
        assert!(code.contains("\tErrProductNotFound = sharedErrors.NewProblemDetails(\n\t\t404,"));
        assert!(code.contains("\"PRO1001\""));
        assert!(code.contains("ErrProductNameRequired"));
        assert!(code.contains("ErrProductPriceInvalid"));
        assert!(!code.contains("ErrProductActive"));
        assert!(code.contains("\"PRO1004\""));
    }

    #[test]
    fn test_contract_has_six_methods() {
        let code = contents(ArtifactKind::RepositoryContract);
        for method in ["Save(", "FindById(", "FindAll(", "Count(", "Update(", "Delete("] {
            assert!(code.contains(&format!("\t{}ctx context.Context", method)), "{}", method);
        }
    }

    #[test]
    fn test_mysql_repository_scans_into_row() {
        let code = contents(ArtifactKind::RepositoryImplementation);
        assert!(code.contains("var _ appRepositories.ProductRepository = (*ProductMySQLRepository)(nil)"));
        assert!(code.contains(
            "return entities.RestoreProduct(row.id, row.name, row.price, row.active, row.createdAt, row.updatedAt)"
        ));
        assert!(code.contains(
            "\t\t&row.id,\n\t\t&row.name,\n\t\t&row.price,\n\t\t&row.active,\n\t\t&row.createdAt,\n\t\t&row.updatedAt,\n\t)"
        ));
        assert!(code.contains("\tcreatedAt time.Time\n\tupdatedAt time.Time\n}"));
        assert_eq!(
            code.matches("SELECT id, name, price, active, created_at, updated_at FROM products").count(),
            2
        );
        assert!(code.contains("INSERT INTO products (id, name, price, active) VALUES (?, ?, ?, ?)"));
        assert!(code.contains("\t\tentity.GetActive(),\n\t\tentity.GetId(),\n\t)"));
    }

    #[test]
    fn test_use_cases() {
        let get = contents(ArtifactKind::OrchestrationUnit(Operation::Get));
        assert!(get.contains("type ProductOutputDTO struct {"));
        assert!(get.contains("\tCreatedAt time.Time `json:\"created_at\"`\n\tUpdatedAt time.Time `json:\"updated_at\"`\n}"));
        assert!(get.contains("\t\tCreatedAt: entity.GetCreatedAt(),\n\t\tUpdatedAt: entity.GetUpdatedAt(),\n\t}"));
        assert!(get.contains("\t\"time\"\n"));
        assert!(get.contains("return nil, domainErrors.ErrProductNotFound"));

        let list = contents(ArtifactKind::OrchestrationUnit(Operation::List));
        assert!(list.contains("func (u *ListProductsUseCase) Execute(ctx context.Context, input ListProductsInputDTO) (*ListProductsOutputDTO, error) {"));

        let update = contents(ArtifactKind::OrchestrationUnit(Operation::Update));
        assert!(update.contains("\tentity.SetPrice(input.Price)\n"));
        assert!(update.contains("if err := entity.Validate(); err != nil {"));

        let delete = contents(ArtifactKind::OrchestrationUnit(Operation::Delete));
        assert!(delete.contains("return u.repository.Delete(ctx, existing.GetId())"));
    }

    #[test]
    fn test_controller_holds_every_use_case() {
        let code = contents(ArtifactKind::HttpHandler);
        for op in Operation::ALL {
            let use_case = format!("{}UseCase", op.action_name(&product()));
            assert!(code.contains(&format!("*usecases.{}", use_case)));
        }
        assert_eq!(code.matches(" godoc\n").count(), 5);
    }

    #[test]
    fn test_wiring_fragment_targets_infra_module() {
        let set = template_set();
        let module = module();
        let entity = product();
        let ctx = set.context(&module, &entity);
        let targets = set.render_fragments(&ctx);
        assert!(targets
            .iter()
            .all(|t| t.file.starts_with("internal/catalog/infra")));
        assert!(targets
            .iter()
            .any(|t| t.payload.contains("repositories.NewProductMySQLRepository(db)")));
        assert!(targets
            .iter()
            .any(|t| t.file == PathBuf::from("internal/catalog/infra/web/routes.go")
                && t.payload.contains("router.DELETE(\"/products/:id\"")));
    }

    #[test]
    fn test_module_skeleton() {
        let files = template_set().render_module(&module());
        assert_eq!(files[0].path, PathBuf::from("internal/catalog/infra/module.go"));
        assert!(files[0].contents.starts_with("package infra\n"));
        assert_eq!(files[1].path, PathBuf::from("internal/catalog/infra/web/routes.go"));
        assert!(files[1].contents.contains("\t\"example.com/shop/internal/catalog/infra\"\n"));
        assert!(files[1].contents.contains("module *infra.CatalogModule) {\n}"));
    }
}
