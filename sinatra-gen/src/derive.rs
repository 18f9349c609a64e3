//! Model derivation from GraphQL types
//!
//! Every object and input type is classified by its name into a structural
//! role (entity, create/update input, filter, where clause, payload, edge,
//! connection, ordering) and matched against the database catalog by its
//! base name. Types without a database counterpart are skipped.

use crate::catalog::Catalog;
use crate::inflector::plural;
use crate::ir::Model;
use crate::schema::SchemaDocument;

/// Role suffixes stripped to find the base name, in precedence order
pub const ROLE_SUFFIXES: [&str; 9] = [
    "CreateInput",
    "UpdateInput",
    "Input",
    "Payload",
    "Where",
    "Filter",
    "Ordering",
    "Edge",
    "Connection",
];

/// Helper types generated for relay pagination
const PAGINATION_TYPES: [&str; 3] = [
    "ConnectionBackwardPagination",
    "ConnectionPagination",
    "ConnectionForwardPagination",
];

/// `s` ends with `suffix` and is not the suffix itself
fn ends_with_role(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix) && s != suffix
}

pub fn is_input(name: &str) -> bool {
    ends_with_role(name, "Input")
}

pub fn is_create_input(name: &str) -> bool {
    ends_with_role(name, "CreateInput")
}

pub fn is_update_input(name: &str) -> bool {
    ends_with_role(name, "UpdateInput")
}

pub fn is_filter(name: &str) -> bool {
    ends_with_role(name, "Filter")
}

pub fn is_where(name: &str) -> bool {
    ends_with_role(name, "Where")
}

pub fn is_payload(name: &str) -> bool {
    ends_with_role(name, "Payload")
}

pub fn is_edge(name: &str) -> bool {
    ends_with_role(name, "Edge")
}

pub fn is_connection(name: &str) -> bool {
    ends_with_role(name, "Connection")
}

pub fn is_ordering(name: &str) -> bool {
    ends_with_role(name, "Ordering")
}

pub fn is_page_info(name: &str) -> bool {
    name == "PageInfo"
}

pub fn is_pagination(name: &str) -> bool {
    PAGINATION_TYPES.contains(&name)
}

/// Strip the first matching role suffix, e.g. `UserCreateInput` -> `User`
///
/// A suffix equal to the whole name is never stripped, so a type named
/// `Payload` keeps its name.
pub fn base_model_name(name: &str) -> &str {
    ROLE_SUFFIXES
        .iter()
        .find_map(|suffix| {
            name.strip_suffix(suffix)
                .filter(|base| !base.is_empty())
        })
        .unwrap_or(name)
}

/// Build one model per object/input type backed by a database model
pub fn derive_models(schema: &SchemaDocument, catalog: &Catalog) -> Vec<Model> {
    let mut models = Vec::new();

    for schema_type in schema.types() {
        if !schema_type.kind.is_object_like() {
            continue;
        }
        let name = schema_type.name.as_str();
        if name.starts_with('_') || schema.is_root_operation(name) {
            continue;
        }

        let Some(boiler_model) = catalog.find_model(base_model_name(name)) else {
            if is_input(name)
                || is_where(name)
                || is_filter(name)
                || is_payload(name)
                || is_page_info(name)
                || is_pagination(name)
            {
                continue;
            }
            tracing::debug!(type_name = %name, "no database model found, skipping type");
            continue;
        };

        let input = is_input(name);
        let create_input = is_create_input(name);
        let update_input = is_update_input(name);
        let filter = is_filter(name);
        let where_ = is_where(name);
        let payload = is_payload(name);
        let edge = is_edge(name);
        let connection = is_connection(name);
        let ordering = is_ordering(name);
        let normal =
            !input && !where_ && !filter && !payload && !edge && !connection && !ordering;

        models.push(Model {
            name: name.to_string(),
            plural_name: plural(name),
            description: schema_type.description.clone(),
            boiler_model: Some(boiler_model.clone()),
            is_input: input,
            is_create_input: create_input,
            is_update_input: update_input,
            is_normal_input: input && !create_input && !update_input,
            is_payload: payload,
            is_connection: connection,
            is_edge: edge,
            is_ordering: ordering,
            is_where: where_,
            is_filter: filter,
            is_normal: normal,
            is_preloadable: normal,
            implements: schema
                .implements(schema_type)
                .into_iter()
                .map(|t| t.name.clone())
                .collect(),
            pure_fields: schema_type.fields.clone(),
            ..Default::default()
        });
    }

    models
}
