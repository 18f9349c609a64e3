//! Database model catalog
//!
//! In-memory view of the structs generated by the ORM tooling: tables as
//! models, columns as fields, database enums and relationships between
//! tables. The catalog is read from a JSON document once per run and is
//! immutable afterwards.
//!
//! Relationships are stored as model-name references and validated when the
//! catalog is built, so every lookup through [`Catalog::relationship`] is
//! guaranteed to resolve.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// A database-derived entity (one table)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerModel {
    /// Struct name, e.g. `User`
    pub name: String,
    /// Table name, e.g. `users`
    #[serde(default)]
    pub table_name: String,
    /// Columns and relation accessors
    #[serde(default)]
    pub fields: Vec<BoilerField>,
}

/// One column (or relation accessor) of a [`BoilerModel`]
///
/// `Default` is the "zero value" used when a GraphQL field has no database
/// counterpart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoilerField {
    /// Struct field name, e.g. `OrganizationID`
    pub name: String,
    /// Raw column type text, e.g. `null.String`, `int`, `time.Time`
    #[serde(rename = "type")]
    pub type_: String,
    pub is_relation: bool,
    pub is_array: bool,
    pub is_foreign_key: bool,
    pub is_required: bool,
    pub is_enum: bool,
    /// Name of the database enum when `is_enum` is set
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
    /// Name of the related [`BoilerModel`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    /// Accessor name of the relation, e.g. `Organization`
    pub relationship_name: String,
}

/// A database enum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoilerEnum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<BoilerEnumValue>,
}

/// One value of a [`BoilerEnum`], named with the enum prefix (`UserRoleAdmin`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoilerEnumValue {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    models: Vec<BoilerModel>,
    #[serde(default)]
    enums: Vec<BoilerEnum>,
}

/// Read-only catalog of database models and enums
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    models: Vec<BoilerModel>,
    enums: Vec<BoilerEnum>,
}

impl Catalog {
    /// Build a catalog, validating relationship and enum references
    pub fn new(models: Vec<BoilerModel>, enums: Vec<BoilerEnum>) -> Result<Self> {
        let catalog = Self { models, enums };

        for model in &catalog.models {
            for field in &model.fields {
                if let Some(target) = &field.relationship {
                    if catalog.find_model(target).is_none() {
                        return Err(GeneratorError::UnknownRelationship {
                            model: model.name.clone(),
                            field: field.name.clone(),
                            target: target.clone(),
                        });
                    }
                }
                if let Some(enum_name) = &field.enum_name {
                    if catalog.find_enum(enum_name).is_none() {
                        return Err(GeneratorError::CodeGenError(format!(
                            "field `{}.{}` references unknown enum `{}`",
                            model.name, field.name, enum_name
                        )));
                    }
                }
            }
        }

        Ok(catalog)
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.models, doc.enums)
    }

    /// Load a catalog file produced by the ORM tooling
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            models = catalog.models.len(),
            enums = catalog.enums.len(),
            "loaded database catalog"
        );
        Ok(catalog)
    }

    pub fn models(&self) -> &[BoilerModel] {
        &self.models
    }

    pub fn enums(&self) -> &[BoilerEnum] {
        &self.enums
    }

    /// Find a model by name, ignoring case
    pub fn find_model(&self, name: &str) -> Option<&BoilerModel> {
        self.models.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Find a database enum by its exact name
    pub fn find_enum(&self, name: &str) -> Option<&BoilerEnum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Resolve the model a relation field points to
    pub fn relationship(&self, field: &BoilerField) -> Option<&BoilerModel> {
        field
            .relationship
            .as_deref()
            .and_then(|name| self.find_model(name))
    }

    /// Enum of an enum-typed column
    pub fn field_enum(&self, field: &BoilerField) -> Option<&BoilerEnum> {
        field.enum_name.as_deref().and_then(|name| self.find_enum(name))
    }
}

impl BoilerModel {
    /// Find a field by name, ignoring case
    pub fn find_field(&self, name: &str) -> Option<&BoilerField> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

impl BoilerEnum {
    /// Find the database value matching a GraphQL enum value
    ///
    /// Database values carry the enum name as prefix (`UserRoleAdmin`), which
    /// is stripped before a case-insensitive comparison with `name` (`ADMIN`).
    /// A miss is logged and yields `None`.
    pub fn find_value(&self, name: &str) -> Option<&BoilerEnumValue> {
        let found = self.values.iter().find(|v| {
            v.name
                .strip_prefix(&self.name)
                .unwrap_or(&v.name)
                .replace('_', "")
                .eq_ignore_ascii_case(&name.replace('_', ""))
        });
        if found.is_none() {
            tracing::error!(enum_name = %self.name, value = %name, "could not find database enum value");
        }
        found
    }
}
