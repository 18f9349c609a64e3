//! Intermediate Representation (IR) of the unified model graph
//!
//! The IR merges GraphQL types and database models into one annotated graph
//! that template and resolver emitters consume. Everything here is plain
//! data: classification lives in `derive`, field resolution in `reconcile`.

use serde::{Deserialize, Serialize};

use crate::catalog::{BoilerEnum, BoilerEnumValue, BoilerField, BoilerModel};
use crate::convert::ConvertConfig;
use crate::schema::SchemaField;

/// A unified entity derived from one GraphQL object or input type
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// GraphQL type name, e.g. `UserCreateInput`
    pub name: String,

    /// Pluralized type name
    pub plural_name: String,

    /// Schema description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Database counterpart, matched by base name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boiler_model: Option<BoilerModel>,

    /// Database type of the primary key column
    pub primary_key_type: String,

    /// Reconciled fields
    pub fields: Vec<Field>,

    pub is_input: bool,
    pub is_create_input: bool,
    pub is_update_input: bool,
    pub is_normal_input: bool,
    pub is_payload: bool,
    pub is_connection: bool,
    pub is_edge: bool,
    pub is_ordering: bool,
    pub is_where: bool,
    pub is_filter: bool,
    pub is_normal: bool,
    pub is_preloadable: bool,

    /// Primary key column is string-typed
    pub has_primary_string_id: bool,

    /// First-level eager loads, sorted by key
    pub preload_array: Vec<Preload>,

    /// Cross-schema join hints (where-clause models only)
    pub join_array: Vec<JoinRelationship>,

    /// GraphQL interfaces this type implements
    pub implements: Vec<String>,

    /// Raw schema fields, consumed by the field reconciler
    #[serde(skip)]
    pub pure_fields: Vec<SchemaField>,
}

/// Structural purpose of a [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    Normal,
    CreateInput,
    UpdateInput,
    Input,
    Where,
    Filter,
    Payload,
    Edge,
    Connection,
    Ordering,
}

impl Model {
    /// The single shape role of this model
    pub fn role(&self) -> ModelRole {
        if self.is_create_input {
            ModelRole::CreateInput
        } else if self.is_update_input {
            ModelRole::UpdateInput
        } else if self.is_input {
            ModelRole::Input
        } else if self.is_where {
            ModelRole::Where
        } else if self.is_filter {
            ModelRole::Filter
        } else if self.is_payload {
            ModelRole::Payload
        } else if self.is_edge {
            ModelRole::Edge
        } else if self.is_connection {
            ModelRole::Connection
        } else if self.is_ordering {
            ModelRole::Ordering
        } else {
            ModelRole::Normal
        }
    }

    /// Table name of the database counterpart, if any
    pub fn table_name(&self) -> Option<&str> {
        self.boiler_model.as_ref().map(|m| m.table_name.as_str())
    }

    /// Find a reconciled field by Go name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One reconciled attribute of a [`Model`]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Go identifier, e.g. `OrganizationID`
    pub name: String,

    /// GraphQL field name, e.g. `organizationId`
    pub json_name: String,

    pub plural_name: String,

    /// Shortened Go type, e.g. `*Organization`
    #[serde(rename = "type")]
    pub type_: String,

    /// Type without pointer, dots replaced: `time.Time` -> `timeDotTime`
    pub type_without_pointer: String,

    /// Fully qualified Go type before shortening
    pub original_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_primary_id: bool,
    pub is_primary_number_id: bool,
    pub is_primary_string_id: bool,
    pub is_number_id: bool,
    pub is_plural: bool,
    pub is_relation: bool,
    pub is_object: bool,
    pub is_or: bool,
    pub is_and: bool,
    pub is_json: bool,

    /// Registered cross-schema foreign id
    pub is_id: bool,

    /// Table the foreign id override points to
    pub id_table: String,

    /// Database counterpart; the default value when there is none
    pub boiler_field: BoilerField,

    /// Name of the related model, resolved after all models are built
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,

    pub convert_config: ConvertConfig,

    /// Name of the GraphQL enum this field is typed with
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
}

/// A GraphQL enum with its database counterpart
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    pub plural_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boiler_enum: Option<BoilerEnum>,
}

/// One enum value
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// GraphQL name, e.g. `SUPER_USER`
    pub name: String,
    /// Lower camel alias, e.g. `superUser`
    pub name_lower: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boiler_enum_value: Option<BoilerEnumValue>,
}

/// A GraphQL interface or union
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An eager-load instruction keyed by GraphQL field name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preload {
    pub key: String,
    pub column_setting: ColumnSetting,
}

/// Target of a [`Preload`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSetting {
    /// Qualified relation accessor, e.g. `models.UserRels.Organization`
    pub name: String,
    /// A to-one relation has a single known id
    pub id_available: bool,
    /// Table of the related model
    pub relationship_model_name: String,
}

/// A join between tables living in different schemas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRelationship {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub via: String,
    #[serde(alias = "fromcolumn")]
    pub from_column: String,
    #[serde(alias = "tocolumn")]
    pub to_column: String,
}
