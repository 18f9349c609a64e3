//! Schema-side view of the database models
//!
//! Every database model becomes a [`SchemaModel`] whose fields carry one
//! GraphQL type per generated artifact (object, where clause, inputs), so
//! hooks can retype or hide a field for one artifact only.

use heck::ToLowerCamelCase;

use sinatra_gen::catalog::{BoilerField, BoilerModel, Catalog};
use sinatra_gen::config::ForeignIdColumn;

/// A database model as seen by the schema emitter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaModel {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

/// One column of a [`SchemaModel`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaField {
    /// GraphQL field name, e.g. `organizationId`
    pub name: String,
    /// GraphQL type on the object type, e.g. `ID`
    pub type_: String,
    pub input_where_type: String,
    pub input_create_type: String,
    pub input_update_type: String,
    pub input_batch_update_type: String,
    pub input_batch_create_type: String,
    pub boiler_field: BoilerField,
    pub skip_input: bool,
    pub skip_where: bool,
    pub skip_sort: bool,
    pub skip_create: bool,
    pub skip_update: bool,
    pub skip_batch_update: bool,
    pub skip_batch_create: bool,
    /// Directives (without `@`) on input fields
    pub input_directives: Vec<String>,
    /// Directives (without `@`) on the object field
    pub directives: Vec<String>,
}

/// Generated artifact a field list is being shaped for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentType {
    Normal,
    Where,
    Create,
    Update,
    BatchUpdate,
    BatchCreate,
}

impl ParentType {
    /// Update and filter inputs never require a value
    pub fn always_optional(self) -> bool {
        matches!(self, ParentType::Update | ParentType::Where | ParentType::BatchUpdate)
    }
}

impl SchemaField {
    /// A field typed `type_` in every artifact
    pub fn new(name: impl Into<String>, type_: impl Into<String>, boiler_field: BoilerField) -> Self {
        let type_ = type_.into();
        Self {
            name: name.into(),
            input_where_type: type_.clone(),
            input_create_type: type_.clone(),
            input_update_type: type_.clone(),
            input_batch_update_type: type_.clone(),
            input_batch_create_type: type_.clone(),
            type_,
            boiler_field,
            ..Default::default()
        }
    }

    pub fn set_input_type_for_all_inputs(&mut self, type_: &str) {
        self.input_where_type = type_.to_string();
        self.input_create_type = type_.to_string();
        self.input_update_type = type_.to_string();
        self.input_batch_update_type = type_.to_string();
        self.input_batch_create_type = type_.to_string();
    }

    pub fn set_skip_for_all_inputs(&mut self, skip: bool) {
        self.skip_input = skip;
        self.skip_where = skip;
        self.skip_create = skip;
        self.skip_update = skip;
        self.skip_batch_update = skip;
        self.skip_batch_create = skip;
    }

    /// GraphQL type name used for `parent`
    pub fn type_for(&self, parent: ParentType) -> &str {
        match parent {
            ParentType::Normal => &self.type_,
            ParentType::Where => &self.input_where_type,
            ParentType::Create => &self.input_create_type,
            ParentType::Update => &self.input_update_type,
            ParentType::BatchUpdate => &self.input_batch_update_type,
            ParentType::BatchCreate => &self.input_batch_create_type,
        }
    }

    /// Field name of the relation accessor, e.g. `organization`
    pub fn relation_name(&self) -> String {
        self.boiler_field.relationship_name.to_lower_camel_case()
    }

    /// Full GraphQL type with list and non-null modifiers
    pub fn full_type(&self, parent: ParentType) -> String {
        let required = self.boiler_field.is_required && !parent.always_optional();
        full_type(self.type_for(parent), self.boiler_field.is_array, required)
    }

    /// Like [`SchemaField::full_type`], typed with the related model for relations
    pub fn full_type_with_relation(&self, parent: ParentType) -> String {
        match &self.boiler_field.relationship {
            Some(related) => {
                let required = self.boiler_field.is_required && !parent.always_optional();
                full_type(related, self.boiler_field.is_array, required)
            }
            None => self.full_type(parent),
        }
    }
}

/// Wrap a type name: arrays become `[T!]`, required values get a trailing `!`
pub fn full_type(type_name: &str, is_array: bool, is_required: bool) -> String {
    let mut text = if is_array {
        format!("[{}!]", type_name)
    } else {
        type_name.to_string()
    };
    if is_required {
        text.push('!');
    }
    text
}

/// GraphQL field name of a Go struct field: `OrganizationID` -> `organizationId`
pub fn to_graphql_name(field_name: &str) -> String {
    let name = match field_name {
        "ID" => "id".to_string(),
        "URL" => "url".to_string(),
        other => other.replace("ID", "Id").replace("URL", "Url"),
    };
    name.to_lower_camel_case()
}

/// GraphQL type of a database column
///
/// Id columns (by name, or registered as foreign ids) are `ID`; anything
/// without a scalar counterpart falls back to `Any`.
pub fn to_graphql_type(field: &BoilerField, foreign_ids: &[ForeignIdColumn]) -> String {
    if field.is_enum {
        if let Some(enum_name) = &field.enum_name {
            return enum_name.clone();
        }
    }

    let lower_name = field.name.to_lowercase();
    let lower_type = field.type_.to_lowercase();
    let is_custom_id = foreign_ids
        .iter()
        .any(|fk| fk.column.eq_ignore_ascii_case(&field.name));

    let graphql_type = if lower_name.ends_with("id") || is_custom_id {
        "ID"
    } else if lower_type.contains("string") {
        "String"
    } else if lower_type.contains("int") {
        "Int"
    } else if lower_type.contains("byte") {
        "String"
    } else if lower_type.contains("decimal") || lower_type.contains("float") {
        "Float"
    } else if lower_type.contains("bool") {
        "Boolean"
    } else if lower_type.contains("time") {
        "Time"
    } else {
        "Any"
    };
    graphql_type.to_string()
}

impl SchemaModel {
    /// Schema view of one database model
    pub fn from_boiler(model: &BoilerModel, foreign_ids: &[ForeignIdColumn]) -> Self {
        Self {
            name: model.name.clone(),
            fields: model
                .fields
                .iter()
                .map(|f| {
                    SchemaField::new(to_graphql_name(&f.name), to_graphql_type(f, foreign_ids), f.clone())
                })
                .collect(),
        }
    }
}

/// Schema view of every catalog model, in catalog order
pub fn models_from_catalog(catalog: &Catalog, foreign_ids: &[ForeignIdColumn]) -> Vec<SchemaModel> {
    catalog
        .models()
        .iter()
        .map(|m| SchemaModel::from_boiler(m, foreign_ids))
        .collect()
}
