//! Field reconciliation
//!
//! Turns the raw schema fields of every derived model into [`Field`]s:
//! resolves the Go type of each GraphQL type reference, matches the database
//! column, classifies identifiers and builds conversion expressions. Fields
//! with nowhere to read from or write to are dropped.
//!
//! Relationships are resolved in a second pass, once every model has its
//! fields, because a relation may point to a model processed later.

use std::collections::HashSet;

use crate::catalog::{BoilerField, BoilerModel, Catalog};
use crate::config::GenerationContext;
use crate::convert::convert_config;
use crate::error::{GeneratorError, Result};
use crate::inflector::{get_short_type, is_plural, plural, to_go};
use crate::ir::{Enum, Field, Model};
use crate::schema::{SchemaDocument, SchemaField, SchemaType, TypeKind, TypeRef};

/// Relay field that never maps to a column
const CLIENT_MUTATION_ID: &str = "clientMutationId";

/// Field names kept on filter and where types without a column
const FILTER_KEYWORDS: [&str; 4] = ["and", "or", "search", "where"];

/// Fill `fields` of every model from its schema fields, then resolve relationships
pub fn reconcile(
    models: &mut [Model],
    schema: &SchemaDocument,
    catalog: &Catalog,
    enums: &[Enum],
    ctx: &GenerationContext,
) -> Result<()> {
    for model in models.iter_mut() {
        let pure_fields = std::mem::take(&mut model.pure_fields);
        for schema_field in &pure_fields {
            if let Some(field) = reconcile_field(model, schema_field, schema, enums, ctx)? {
                model.fields.push(field);
            }
        }
        tracing::debug!(model = %model.name, fields = model.fields.len(), "reconciled model");
    }

    resolve_relationships(models, catalog);
    Ok(())
}

/// Structural role a column-less field plays in a generated shape
#[derive(Debug, Default, Clone, Copy)]
struct StructuralRoles {
    edges: bool,
    page_info: bool,
    sort: bool,
    sort_direction: bool,
    cursor: bool,
    node: bool,
}

impl StructuralRoles {
    fn of(model_name: &str, field_name: &str) -> Self {
        let connection = model_name.ends_with("Connection");
        let ordering = model_name.ends_with("Ordering");
        let edge = model_name.ends_with("Edge");
        Self {
            edges: connection && field_name == "Edges",
            page_info: connection && field_name == "PageInfo",
            sort: ordering && field_name == "Sort",
            sort_direction: ordering && field_name == "Direction",
            cursor: edge && field_name == "Cursor",
            node: edge && field_name == "Node",
        }
    }

    fn any(&self) -> bool {
        self.edges || self.page_info || self.sort || self.sort_direction || self.cursor || self.node
    }
}

fn reconcile_field(
    model: &mut Model,
    schema_field: &SchemaField,
    schema: &SchemaDocument,
    enums: &[Enum],
    ctx: &GenerationContext,
) -> Result<Option<Field>> {
    let type_name = schema_field.ty.name();
    let definition = schema.get(type_name).ok_or_else(|| GeneratorError::UndefinedType {
        model: model.name.clone(),
        field: schema_field.name.clone(),
        type_name: type_name.to_string(),
    })?;

    let json_name = ctx
        .field_name(&model.name, &schema_field.name)
        .unwrap_or(&schema_field.name)
        .to_string();
    let name = to_go(&json_name);

    if name.eq_ignore_ascii_case(CLIENT_MUTATION_ID) {
        return Ok(None);
    }

    let original_type = resolve_type_text(&schema_field.ty, definition, ctx);
    let short_type = get_short_type(&original_type, &ctx.ignore_prefixes());
    let is_object = definition.kind.is_object_like();

    let boiler_field = find_boiler_field(model.boiler_model.as_ref(), &name, is_object);
    let is_string = boiler_field.type_.to_lowercase().contains("string");
    let is_primary_id = name.eq_ignore_ascii_case("id");
    let is_primary_number_id = is_primary_id && !is_string;
    let is_primary_string_id = is_primary_id && is_string;
    let mut is_number_id = name.ends_with("ID") && !is_string;

    if is_primary_string_id {
        model.has_primary_string_id = true;
    }
    if is_primary_id && model.primary_key_type.is_empty() {
        model.primary_key_type = boiler_field.type_.clone();
    }

    let roles = StructuralRoles::of(&model.name, &name);

    let foreign_id = ctx.foreign_id(&name);
    if foreign_id.is_some() {
        is_number_id = true;
    }

    if boiler_field.type_.is_empty() {
        let filter_keyword = (model.is_filter || model.is_where)
            && FILTER_KEYWORDS.iter().any(|k| name.eq_ignore_ascii_case(k));
        if !(model.is_payload || is_plural(&name) || filter_keyword || roles.any()) {
            tracing::debug!(model = %model.name, field = %name, "no database type for field, dropping it");
            return Ok(None);
        }
    }

    if boiler_field.name.is_empty() {
        let shape_only = model.is_payload
            || model.is_filter
            || model.is_where
            || model.is_ordering
            || model.is_edge
            || roles.page_info
            || roles.edges;
        if !shape_only {
            tracing::debug!(model = %model.name, field = %name, "no database field for field, dropping it");
            return Ok(None);
        }
    }

    let type_without_pointer = short_type.trim_start_matches('*').replace('.', "Dot");
    let enum_name = enums
        .iter()
        .find(|e| e.name == type_without_pointer)
        .map(|e| e.name.clone());

    let mut field = Field {
        json_name,
        plural_name: plural(&name),
        type_: short_type,
        type_without_pointer,
        original_type,
        description: schema_field.description.clone(),
        is_primary_id,
        is_primary_number_id,
        is_primary_string_id,
        is_number_id,
        is_plural: is_plural(&name),
        is_relation: boiler_field.is_relation,
        is_object,
        is_or: name.eq_ignore_ascii_case("or"),
        is_and: name.eq_ignore_ascii_case("and"),
        is_json: boiler_field.type_.contains("JSON"),
        is_id: foreign_id.is_some(),
        id_table: foreign_id.map(|fk| fk.table.clone()).unwrap_or_default(),
        boiler_field,
        enum_name,
        name,
        ..Default::default()
    };
    field.convert_config = convert_config(
        &model.name,
        &field,
        field.enum_name.is_some(),
        &ctx.helper_package,
    );

    Ok(Some(field))
}

/// Find the database field for a GraphQL field
///
/// An exact name match wins. Object-typed fields without one fall back to
/// their foreign key column (`organization` -> `OrganizationID`).
fn find_boiler_field(model: Option<&BoilerModel>, name: &str, is_object: bool) -> BoilerField {
    let Some(model) = model else {
        return BoilerField::default();
    };
    model
        .find_field(name)
        .or_else(|| {
            is_object
                .then(|| model.find_field(&format!("{}ID", name)))
                .flatten()
        })
        .cloned()
        .unwrap_or_default()
}

/// Go type text for a GraphQL type reference
///
/// Bound types come from configuration; otherwise scalars map to `string`
/// and all named types to the generated GraphQL model package. Nullable
/// values become pointers (interfaces excepted), list elements of struct
/// type are pointers and object fields are always pointers.
pub fn resolve_type_text(ty: &TypeRef, definition: &SchemaType, ctx: &GenerationContext) -> String {
    let bound = ctx.binding(&definition.name);
    let base = match (bound, definition.kind) {
        (Some(go_type), _) => go_type.to_string(),
        (None, TypeKind::Scalar) => format!("{}.string", ctx.graph_package),
        (None, _) => format!("{}.{}", ctx.graph_package, to_go(&definition.name)),
    };

    let is_struct = bound.is_none() && definition.kind.is_object_like();
    let is_interface = bound.is_none()
        && matches!(definition.kind, TypeKind::Interface | TypeKind::Union);
    let is_nilable = bound.is_some_and(|go_type| {
        ["[]", "map[", "*", "interface{", "any"]
            .iter()
            .any(|p| go_type.starts_with(p))
    });

    let text = copy_modifiers(ty, &base, is_struct, is_interface || is_nilable, false);
    if is_struct && !text.starts_with('*') && !text.starts_with("[]") {
        format!("*{}", text)
    } else {
        text
    }
}

fn copy_modifiers(ty: &TypeRef, base: &str, is_struct: bool, nilable: bool, non_null: bool) -> String {
    match ty {
        TypeRef::NonNull(inner) => copy_modifiers(inner, base, is_struct, nilable, true),
        TypeRef::List(inner) => {
            let child = copy_modifiers(inner, base, is_struct, nilable, false);
            if is_struct && !child.starts_with('*') && !child.starts_with("[]") {
                format!("[]*{}", child)
            } else {
                format!("[]{}", child)
            }
        }
        TypeRef::Named(_) if !nilable && !non_null => format!("*{}", base),
        TypeRef::Named(_) => base.to_string(),
    }
}

/// Point relation fields at the model they reference
pub fn resolve_relationships(models: &mut [Model], catalog: &Catalog) {
    let names: HashSet<String> = models.iter().map(|m| m.name.clone()).collect();

    for model in models.iter_mut() {
        for field in &mut model.fields {
            field.relationship = catalog
                .relationship(&field.boiler_field)
                .map(|target| target.name.clone())
                .filter(|target| names.contains(target));
        }
    }
}
