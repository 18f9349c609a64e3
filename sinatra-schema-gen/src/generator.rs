//! SDL generation
//!
//! Produces the schema documents of a database-first API:
//! - `common`: scalars, schema block, `Node`, `PageInfo`, primitive filters
//! - `enum`: database enums with their filter inputs
//! - one document per model group (models sharing their first word), with
//!   queries, mutations, the object type, connection types, filters, inputs
//!   and payloads of every model in the group

use heck::{ToLowerCamelCase, ToShoutySnakeCase};

use sinatra_gen::catalog::{BoilerEnum, Catalog};
use sinatra_gen::config::{Config, MutationConfig};
use sinatra_gen::inflector::{first_word, plural};

use crate::hooks::Hooks;
use crate::model::{ParentType, SchemaField, SchemaModel, models_from_catalog};
use crate::writer::SdlWriter;

/// Fields never accepted in create and update inputs
const SERVER_MANAGED_FIELDS: [&str; 4] = ["id", "createdAt", "updatedAt", "deletedAt"];

const COMMON_SCALARS: [&str; 6] = ["Any", "AnyFilter", "Date", "DateTime", "Time", "JSON"];

const PRIMITIVE_FILTERS: &str = r#"
input IDFilter {
  isNull: Boolean
  notNull: Boolean
  equalTo: ID
  notEqualTo: ID
  in: [ID!]
  notIn: [ID!]
}

input StringFilter {
  isNullOrEmpty: Boolean
  isEmpty: Boolean
  isNull: Boolean
  notNullOrEmpty: Boolean
  notEmpty: Boolean
  notNull: Boolean
  equalTo: String
  notEqualTo: String
  in: [String!]
  notIn: [String!]
  startWith: String
  notStartWith: String
  endWith: String
  notEndWith: String
  contain: String
  notContain: String
  startWithStrict: String
  notStartWithStrict: String
  endWithStrict: String
  notEndWithStrict: String
  containStrict: String
  notContainStrict: String
}

input IntFilter {
  isNullOrZero: Boolean
  isNull: Boolean
  notNullOrZero: Boolean
  notNull: Boolean
  equalTo: Int
  notEqualTo: Int
  lessThan: Int
  lessThanOrEqualTo: Int
  moreThan: Int
  moreThanOrEqualTo: Int
  in: [Int!]
  notIn: [Int!]
}

input FloatFilter {
  isNullOrZero: Boolean
  isNull: Boolean
  notNullOrZero: Boolean
  notNull: Boolean
  equalTo: Float
  notEqualTo: Float
  lessThan: Float
  lessThanOrEqualTo: Float
  moreThan: Float
  moreThanOrEqualTo: Float
  in: [Float!]
  notIn: [Float!]
}

input BooleanFilter {
  isNull: Boolean
  notNull: Boolean
  equalTo: Boolean
  notEqualTo: Boolean
}

input TimeFilter {
  isNull: Boolean
  notNull: Boolean
  equalTo: Time
  notEqualTo: Time
  lessThan: Time
  lessThanOrEqualTo: Time
  moreThan: Time
  moreThanOrEqualTo: Time
}
"#;

/// One generated SDL document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Document name, e.g. `Common` or `User`
    pub name: String,
    pub content: String,
}

impl GeneratedFile {
    /// File name on disk, e.g. `user_gen.graphql`
    pub fn file_name(&self) -> String {
        format!("{}_gen.graphql", self.name.to_lowercase())
    }
}

/// `@a @b` with a leading space, or nothing
fn directives_suffix(directives: &[String]) -> String {
    directives.iter().map(|d| format!(" @{}", d)).collect()
}

fn any_mutation(mutations: &MutationConfig) -> bool {
    mutations.create
        || mutations.batch_create
        || mutations.update
        || mutations.batch_update
        || mutations.delete
        || mutations.batch_delete
}

/// Sort by name and split into runs sharing their first word
pub fn group_by_first_word(mut models: Vec<SchemaModel>) -> Vec<Vec<SchemaModel>> {
    models.sort_by(|a, b| a.name.cmp(&b.name));

    let mut groups: Vec<Vec<SchemaModel>> = Vec::new();
    for model in models {
        match groups.last_mut() {
            Some(group) if first_word(&group[0].name) == first_word(&model.name) => group.push(model),
            _ => groups.push(vec![model]),
        }
    }
    groups
}

/// Generate every schema document
pub fn generate_schema(catalog: &Catalog, config: &Config, hooks: &Hooks) -> Vec<GeneratedFile> {
    let models = hooks.apply_model_hooks(models_from_catalog(catalog, &config.federation.foreign_ids));
    let groups = group_by_first_word(models);
    tracing::debug!(groups = groups.len(), "grouped schema models");

    let mut files = vec![GeneratedFile {
        name: "Common".to_string(),
        content: common_document(&config.mutations),
    }];
    if !catalog.enums().is_empty() {
        files.push(GeneratedFile {
            name: "Enum".to_string(),
            content: enum_document(catalog.enums()),
        });
    }

    let emitter = GroupEmitter {
        config,
        hooks,
        directives: directives_suffix(&config.schema.directives),
    };
    let mut mutation_declared = false;
    for group in &groups {
        files.push(GeneratedFile {
            name: first_word(&group[0].name),
            content: emitter.group_document(group, &mut mutation_declared),
        });
    }

    files
}

fn common_document(mutations: &MutationConfig) -> String {
    let mut w = SdlWriter::new();
    for scalar in COMMON_SCALARS {
        w.line(&format!("scalar {}", scalar));
    }
    w.blank();

    w.line("schema {");
    w.field("query: Query");
    if any_mutation(mutations) {
        w.field("mutation: Mutation");
    }
    w.line("}");
    w.blank();

    w.line("type Query {");
    w.field("node(id: ID!): Node");
    w.line("}");
    w.blank();

    w.line("interface Node {");
    w.field("id: ID!");
    w.line("}");
    w.blank();

    w.line("type PageInfo {");
    w.field("hasNextPage: Boolean!");
    w.field("hasPreviousPage: Boolean!");
    w.field("startCursor: String");
    w.field("endCursor: String");
    w.line("}");
    w.blank();

    w.block(PRIMITIVE_FILTERS);
    w.blank();
    w.line("enum SortDirection { ASC, DESC }");
    w.finish()
}

fn enum_document(enums: &[BoilerEnum]) -> String {
    let mut w = SdlWriter::new();
    for boiler_enum in enums {
        let name = &boiler_enum.name;

        w.line(&format!("input {}Filter {{", name));
        w.field("isNull: Boolean");
        w.field("notNull: Boolean");
        w.field(&format!("equalTo: {}", name));
        w.field(&format!("notEqualTo: {}", name));
        w.field(&format!("in: [{}!]", name));
        w.field(&format!("notIn: [{}!]", name));
        w.line("}");
        w.blank();

        w.line(&format!("enum {} {{", name));
        for value in &boiler_enum.values {
            let short = value.name.strip_prefix(name.as_str()).unwrap_or(&value.name);
            w.field(&short.to_shouty_snake_case());
        }
        w.line("}");
        w.blank();
    }
    w.finish()
}

/// Sort enum values of a model: plain columns only
fn sortable_fields(fields: &[SchemaField]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| !f.skip_sort && !f.boiler_field.is_relation && !f.boiler_field.is_foreign_key)
        .map(|f| f.name.to_shouty_snake_case())
        .collect()
}

/// Relations can only be set through a foreign key column of the model itself
fn accepts_input(field: &SchemaField) -> bool {
    if SERVER_MANAGED_FIELDS.contains(&field.name.as_str()) {
        return false;
    }
    let relation = &field.boiler_field;
    !(relation.is_relation && (relation.is_array || !relation.name.ends_with("ID")))
}

struct GroupEmitter<'a> {
    config: &'a Config,
    hooks: &'a Hooks,
    /// Default directives appended to queries and mutations
    directives: String,
}

impl GroupEmitter<'_> {
    fn group_document(&self, group: &[SchemaModel], mutation_declared: &mut bool) -> String {
        let mut w = SdlWriter::new();
        let mutations = &self.config.mutations;

        w.line("extend type Query {");
        for model in group {
            self.queries(&mut w, model);
        }
        w.line("}");
        w.blank();

        if any_mutation(mutations) {
            w.line(if *mutation_declared { "extend type Mutation {" } else { "type Mutation {" });
            *mutation_declared = true;
            for model in group {
                self.mutations(&mut w, model);
            }
            w.line("}");
            w.blank();
        }

        for model in group {
            self.ordering(&mut w, model);
            self.object(&mut w, model);
            self.connection(&mut w, model);
            self.filter(&mut w, model);
            self.inputs(&mut w, model);
            self.payloads(&mut w, model);
        }

        w.finish()
    }

    fn queries(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let name = &model.name;
        let single = name.to_lower_camel_case();
        let list = plural(name).to_lower_camel_case();
        let d = &self.directives;

        w.field(&format!("{single}(id: ID!): {name}!{d}"));
        w.field(&format!(
            "{list}(first: Int!, after: String, ordering: [{name}Ordering!], filter: {name}Filter): {name}Connection!{d}"
        ));
    }

    fn mutations(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let m = &self.config.mutations;
        let name = &model.name;
        let plural_name = plural(name);
        let d = &self.directives;

        if m.create {
            w.field(&format!("create{name}(input: {name}CreateInput!): {name}Payload!{d}"));
        }
        if m.batch_create {
            w.field(&format!(
                "create{plural_name}(input: {plural_name}CreateInput!): {plural_name}Payload!{d}"
            ));
        }
        if m.update {
            w.field(&format!(
                "update{name}(id: ID!, input: {name}UpdateInput!): {name}Payload!{d}"
            ));
        }
        if m.batch_update {
            w.field(&format!(
                "update{plural_name}(filter: {name}Filter, input: {name}UpdateInput!): {plural_name}UpdatePayload!{d}"
            ));
        }
        if m.delete {
            w.field(&format!("delete{name}(id: ID!): {name}DeletePayload!{d}"));
        }
        if m.batch_delete {
            w.field(&format!(
                "delete{plural_name}(filter: {name}Filter): {plural_name}DeletePayload!{d}"
            ));
        }
    }

    fn ordering(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let name = &model.name;
        w.line(&format!("enum {}Sort {{", name));
        for value in sortable_fields(&model.fields) {
            w.field(&value);
        }
        w.field("RANDOM");
        w.line("}");
        w.blank();

        w.line(&format!("input {}Ordering {{", name));
        w.field(&format!("sort: {}Sort!", name));
        w.field("direction: SortDirection! = ASC");
        w.line("}");
        w.blank();
    }

    fn object(&self, w: &mut SdlWriter, model: &SchemaModel) {
        if self.config.federation.activate {
            let keys: Vec<String> = model
                .fields
                .iter()
                .filter(|f| f.name.eq_ignore_ascii_case("id"))
                .map(|f| format!(" @key(fields: \"{}\")", f.name))
                .collect();
            w.line(&format!("type {} implements Node{} {{", model.name, keys.concat()));
        } else {
            w.line(&format!("type {} implements Node {{", model.name));
        }

        let parent = ParentType::Normal;
        for field in self.hooks.fields_for(model, model.fields.clone(), parent) {
            let directives = directives_suffix(&field.directives);
            // foreign keys are exposed as their related object
            if field.boiler_field.is_relation {
                w.field(&format!(
                    "{}: {}{}",
                    field.relation_name(),
                    field.full_type_with_relation(parent),
                    directives
                ));
            } else {
                w.field(&format!("{}: {}{}", field.name, field.full_type(parent), directives));
            }
        }
        w.line("}");
        w.blank();
    }

    fn connection(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let name = &model.name;
        w.line(&format!("type {}Edge {{", name));
        w.field("cursor: String!");
        w.field(&format!("node: {}", name));
        w.line("}");
        w.blank();

        w.line(&format!("type {}Connection {{", name));
        w.field("count: Int");
        w.field(&format!("edges: [{}Edge]", name));
        w.field("pageInfo: PageInfo!");
        w.line("}");
        w.blank();
    }

    fn filter(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let name = &model.name;
        w.line(&format!("input {}Filter {{", name));
        w.field("search: String");
        w.field(&format!("where: {}Where", name));
        w.line("}");
        w.blank();

        w.line(&format!("input {}Where {{", name));
        let parent = ParentType::Where;
        for field in self.hooks.fields_for(model, model.fields.clone(), parent) {
            if field.skip_input || field.skip_where {
                continue;
            }
            let directives = directives_suffix(&field.input_directives);
            match (&field.boiler_field.relationship, field.boiler_field.is_relation) {
                (Some(related), true) => {
                    w.field(&format!("{}: {}Where{}", field.relation_name(), related, directives))
                }
                _ => w.field(&format!(
                    "{}: {}Filter{}",
                    field.name,
                    field.type_for(parent),
                    directives
                )),
            }
        }
        w.field(&format!("or: {}Where", name));
        w.field(&format!("and: {}Where", name));
        w.line("}");
        w.blank();
    }

    fn input(&self, w: &mut SdlWriter, model: &SchemaModel, fields: &[SchemaField], parent: ParentType) {
        let suffix = if parent == ParentType::Create { "CreateInput" } else { "UpdateInput" };
        w.line(&format!("input {}{} {{", model.name, suffix));
        for field in self.hooks.fields_for(model, fields.to_vec(), parent) {
            let skipped = match parent {
                ParentType::Create => field.skip_create,
                _ => field.skip_update,
            };
            if field.skip_input || skipped || !accepts_input(&field) {
                continue;
            }
            w.field(&format!(
                "{}: {}{}",
                field.name,
                field.full_type(parent),
                directives_suffix(&field.input_directives)
            ));
        }
        w.line("}");
        w.blank();
    }

    fn inputs(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let m = &self.config.mutations;
        let skip = &self.config.schema.skip_input_fields;
        let fields: Vec<SchemaField> = model
            .fields
            .iter()
            .filter(|f| !skip.contains(&f.name))
            .cloned()
            .collect();

        if m.create || m.batch_create {
            self.input(w, model, &fields, ParentType::Create);
        }
        if m.update || m.batch_update {
            self.input(w, model, &fields, ParentType::Update);
        }
        if m.batch_create {
            let plural_name = plural(&model.name);
            w.line(&format!("input {}CreateInput {{", plural_name));
            w.field(&format!(
                "{}: [{}CreateInput!]!",
                plural_name.to_lower_camel_case(),
                model.name
            ));
            w.line("}");
            w.blank();
        }
    }

    fn payloads(&self, w: &mut SdlWriter, model: &SchemaModel) {
        let m = &self.config.mutations;
        let name = &model.name;
        let plural_name = plural(name);

        if m.create || m.update {
            w.line(&format!("type {}Payload {{", name));
            w.field(&format!("{}: {}!", name.to_lower_camel_case(), name));
            w.line("}");
            w.blank();
        }
        if m.delete {
            w.line(&format!("type {}DeletePayload {{", name));
            w.field("id: ID!");
            w.line("}");
            w.blank();
        }
        if m.batch_create {
            w.line(&format!("type {}Payload {{", plural_name));
            w.field(&format!("{}: [{}!]!", plural_name.to_lower_camel_case(), name));
            w.line("}");
            w.blank();
        }
        if m.batch_delete {
            w.line(&format!("type {}DeletePayload {{", plural_name));
            w.field("ids: [ID!]!");
            w.line("}");
            w.blank();
        }
        if m.batch_update {
            w.line(&format!("type {}UpdatePayload {{", plural_name));
            w.field("ok: Boolean!");
            w.line("}");
            w.blank();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinatra_gen::SchemaDocument;
    use sinatra_gen::schema::TypeKind;

    fn catalog() -> Catalog {
        Catalog::from_json(
            &serde_json::json!({
                "models": [
                    {
                        "name": "User",
                        "tableName": "users",
                        "fields": [
                            { "name": "ID", "type": "int", "isRequired": true },
                            { "name": "FirstName", "type": "string", "isRequired": true },
                            { "name": "Role", "type": "string", "isEnum": true, "enum": "UserRole", "isRequired": true },
                            { "name": "OrganizationID", "type": "int", "isRelation": true, "isForeignKey": true,
                              "isRequired": true, "relationship": "Organization", "relationshipName": "Organization" },
                            { "name": "Posts", "type": "PostSlice", "isRelation": true, "isArray": true,
                              "relationship": "Post", "relationshipName": "Posts" },
                            { "name": "CreatedAt", "type": "time.Time", "isRequired": true }
                        ]
                    },
                    {
                        "name": "UserSetting",
                        "tableName": "user_settings",
                        "fields": [ { "name": "ID", "type": "int", "isRequired": true } ]
                    },
                    {
                        "name": "Organization",
                        "tableName": "organizations",
                        "fields": [
                            { "name": "ID", "type": "int", "isRequired": true },
                            { "name": "Name", "type": "null.String" }
                        ]
                    },
                    {
                        "name": "Post",
                        "tableName": "posts",
                        "fields": [ { "name": "ID", "type": "int", "isRequired": true } ]
                    }
                ],
                "enums": [
                    { "name": "UserRole", "values": [ { "name": "UserRoleAdmin" }, { "name": "UserRoleSuperUser" } ] }
                ]
            })
            .to_string(),
        )
        .unwrap()
    }

    fn file<'a>(files: &'a [GeneratedFile], name: &str) -> &'a str {
        &files.iter().find(|f| f.name == name).unwrap().content
    }

    /// Block of a definition, from its header line to the closing brace
    fn definition<'a>(content: &'a str, header: &str) -> &'a str {
        let start = content.find(header).unwrap();
        let end = content[start..].find("\n}").unwrap();
        &content[start..start + end + 2]
    }

    #[test]
    fn test_file_layout() {
        let files = generate_schema(&catalog(), &Config::with_defaults(), &Hooks::new());
        let names: Vec<String> = files.iter().map(GeneratedFile::file_name).collect();
        assert_eq!(
            names,
            vec![
                "common_gen.graphql",
                "enum_gen.graphql",
                "organization_gen.graphql",
                "post_gen.graphql",
                "user_gen.graphql",
            ]
        );
        assert!(file(&files, "User").contains("type UserSetting implements Node {"));
    }

    #[test]
    fn test_no_enum_document_without_enums() {
        let mut models = catalog().models().to_vec();
        for field in models.iter_mut().flat_map(|m| m.fields.iter_mut()) {
            field.is_enum = false;
            field.enum_name = None;
        }
        let catalog = Catalog::new(models, vec![]).unwrap();
        let files = generate_schema(&catalog, &Config::with_defaults(), &Hooks::new());
        assert!(files.iter().all(|f| f.name != "Enum"));
        assert_eq!(files[0].file_name(), "common_gen.graphql");
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_generated_documents_parse() {
        let files = generate_schema(&catalog(), &Config::with_defaults(), &Hooks::new());
        let sources: Vec<(String, &str)> = files
            .iter()
            .map(|f| (f.file_name(), f.content.as_str()))
            .collect();
        let sources: Vec<(&str, &str)> = sources.iter().map(|(n, c)| (n.as_str(), *c)).collect();

        let schema = SchemaDocument::parse(&sources).unwrap();
        assert_eq!(schema.get("UserRole").unwrap().kind, TypeKind::Enum);
        assert_eq!(schema.get("UserWhere").unwrap().kind, TypeKind::InputObject);
        assert_eq!(schema.get("Mutation").unwrap().kind, TypeKind::Object);
        assert!(schema.get("Query").unwrap().fields.iter().any(|f| f.name == "users"));
    }

    #[test]
    fn test_enum_document() {
        let files = generate_schema(&catalog(), &Config::with_defaults(), &Hooks::new());
        let enums = file(&files, "Enum");
        assert!(enums.contains("input UserRoleFilter {\n  isNull: Boolean"));
        assert!(enums.contains("enum UserRole {\n  ADMIN\n  SUPER_USER\n}"));
    }

    #[test]
    fn test_object_type() {
        let files = generate_schema(&catalog(), &Config::with_defaults(), &Hooks::new());
        let user = definition(file(&files, "User"), "type User implements Node {");
        assert_eq!(
            user,
            "type User implements Node {\n  id: ID!\n  firstName: String!\n  role: UserRole!\n  \
             organization: Organization!\n  posts: [Post!]\n  createdAt: Time!\n}"
        );
    }

    #[test]
    fn test_sort_where_and_inputs() {
        let files = generate_schema(&catalog(), &Config::with_defaults(), &Hooks::new());
        let content = file(&files, "User");

        assert_eq!(
            definition(content, "enum UserSort {"),
            "enum UserSort {\n  ID\n  FIRST_NAME\n  ROLE\n  CREATED_AT\n  RANDOM\n}"
        );

        let where_ = definition(content, "input UserWhere {");
        assert!(where_.contains("  id: IDFilter\n"));
        assert!(where_.contains("  role: UserRoleFilter\n"));
        assert!(where_.contains("  organization: OrganizationWhere\n"));
        assert!(where_.contains("  posts: PostWhere\n"));
        assert!(where_.ends_with("  or: UserWhere\n  and: UserWhere\n}"));

        let create = definition(content, "input UserCreateInput {");
        assert_eq!(
            create,
            "input UserCreateInput {\n  firstName: String!\n  role: UserRole!\n  organizationId: ID!\n}"
        );
        let update = definition(content, "input UserUpdateInput {");
        assert_eq!(
            update,
            "input UserUpdateInput {\n  firstName: String\n  role: UserRole\n  organizationId: ID\n}"
        );
    }

    #[test]
    fn test_queries_and_mutations() {
        let mut config = Config::with_defaults();
        config.schema.directives = vec!["isAuthenticated".to_string()];
        let files = generate_schema(&catalog(), &config, &Hooks::new());

        let organization = file(&files, "Organization");
        assert!(organization.contains("  organization(id: ID!): Organization! @isAuthenticated\n"));
        assert!(organization.contains(
            "  organizations(first: Int!, after: String, ordering: [OrganizationOrdering!], \
             filter: OrganizationFilter): OrganizationConnection! @isAuthenticated\n"
        ));
        assert!(organization.contains("type Mutation {"));
        assert!(organization.contains(
            "  createOrganization(input: OrganizationCreateInput!): OrganizationPayload! @isAuthenticated\n"
        ));

        let user = file(&files, "User");
        assert!(user.contains("extend type Mutation {"));
        assert!(!user.contains("\ntype Mutation {"));
        assert!(user.contains("  createUsers(input: UsersCreateInput!): UsersPayload! @isAuthenticated\n"));
        assert!(user.contains("  userSettings(first: Int!"));
    }

    #[test]
    fn test_mutations_are_gated_by_config() {
        let mut config = Config::with_defaults();
        config.mutations.batch_create = false;
        config.mutations.batch_update = false;
        config.mutations.batch_delete = false;
        config.mutations.delete = false;
        let files = generate_schema(&catalog(), &config, &Hooks::new());

        let user = file(&files, "User");
        assert!(user.contains("createUser(input"));
        assert!(!user.contains("createUsers("));
        assert!(!user.contains("deleteUser("));
        assert!(!user.contains("UsersCreateInput"));
        assert!(!user.contains("UserDeletePayload"));
        assert!(user.contains("type UserPayload {"));

        config.mutations.create = false;
        config.mutations.update = false;
        let files = generate_schema(&catalog(), &config, &Hooks::new());
        assert!(!file(&files, "Common").contains("mutation: Mutation"));
        assert!(!file(&files, "Organization").contains("Mutation"));
        assert!(!file(&files, "User").contains("CreateInput"));
    }

    #[test]
    fn test_skip_input_fields() {
        let mut config = Config::with_defaults();
        config.schema.skip_input_fields = vec!["organizationId".to_string()];
        let files = generate_schema(&catalog(), &config, &Hooks::new());

        let content = file(&files, "User");
        assert!(!definition(content, "input UserCreateInput {").contains("organizationId"));
        assert!(definition(content, "input UserWhere {").contains("organization: OrganizationWhere"));
    }

    #[test]
    fn test_federation_key() {
        let mut config = Config::with_defaults();
        config.federation.activate = true;
        let files = generate_schema(&catalog(), &config, &Hooks::new());
        assert!(file(&files, "Post").contains("type Post implements Node @key(fields: \"id\") {"));
    }

    #[test]
    fn test_hooks_shape_output() {
        let hooks = Hooks::new()
            .with_should_add_model(|m| m.name != "Post")
            .with_should_add_field(|_, f| f.name != "createdAt")
            .with_change_field(|_, f| {
                if f.name == "firstName" {
                    f.set_skip_for_all_inputs(true);
                }
            })
            .with_change_fields(|_, mut fields, parent| {
                if parent == ParentType::Normal {
                    for f in fields.iter_mut().filter(|f| f.name == "role") {
                        f.directives.push("deprecated".to_string());
                    }
                }
                fields
            });
        let files = generate_schema(&catalog(), &Config::with_defaults(), &hooks);

        assert!(files.iter().all(|f| f.name != "Post"));
        let content = file(&files, "User");
        assert!(!content.contains("createdAt"));
        assert!(content.contains("  role: UserRole! @deprecated\n"));
        assert!(definition(content, "type User implements Node {").contains("firstName: String!"));
        assert!(!definition(content, "input UserCreateInput {").contains("firstName"));
        assert!(!definition(content, "input UserWhere {").contains("firstName"));
    }

    #[test]
    fn test_group_by_first_word() {
        let model = |name: &str| SchemaModel {
            name: name.to_string(),
            fields: vec![],
        };
        let groups = group_by_first_word(vec![model("UserSetting"), model("Post"), model("User")]);
        let names: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|m| m.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["Post"], vec!["User", "UserSetting"]]);
    }
}
