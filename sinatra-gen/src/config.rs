//! Generator configuration
//!
//! Loaded from a YAML file (`sinatra.yml` by default). The pipeline never
//! reads the file itself: [`Config::context`] builds a [`GenerationContext`]
//! that is passed explicitly to every stage.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GeneratorError, Result};
use crate::ir::JoinRelationship;

pub const DEFAULT_CONFIG_FILE: &str = "sinatra.yml";
pub const DEFAULT_MODEL_PACKAGE: &str = "models";
pub const DEFAULT_HELPER_PACKAGE: &str = "base_helpers";
pub const DEFAULT_GRAPH_PACKAGE: &str = "graphql_models";

/// Go types of the built-in GraphQL scalars
const DEFAULT_BINDINGS: [(&str, &str); 6] = [
    ("ID", "string"),
    ("String", "string"),
    ("Int", "int"),
    ("Float", "float64"),
    ("Boolean", "bool"),
    ("Time", "time.Time"),
];

/// Location and package name of a generated Go package
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    #[serde(alias = "dir")]
    pub dirname: String,
    pub package: String,
}

/// Schema emitter settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub dirname: String,
    pub package: String,
    /// Directives appended to every generated query and mutation
    pub directives: Vec<String>,
    /// Fields left out of create and update inputs
    #[serde(rename = "skipinputfields")]
    pub skip_input_fields: Vec<String>,
}

/// A column holding an id of a table in another schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ForeignIdColumn {
    #[serde(alias = "Column")]
    pub column: String,
    #[serde(alias = "Table")]
    pub table: String,
}

/// Apollo federation settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FederationConfig {
    pub activate: bool,
    #[serde(rename = "foreignids")]
    pub foreign_ids: Vec<ForeignIdColumn>,
    #[serde(rename = "joinrelationships")]
    pub join_relationships: Vec<JoinRelationship>,
}

/// One type name or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    One(String),
    Many(Vec<String>),
}

impl StringList {
    pub fn first(&self) -> Option<&str> {
        match self {
            StringList::One(s) => Some(s.as_str()),
            StringList::Many(list) => list.first().map(String::as_str),
        }
    }
}

/// Per-type overrides: a bound Go type and field renames
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypeMapEntry {
    pub model: Option<StringList>,
    pub fields: BTreeMap<String, TypeMapField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypeMapField {
    #[serde(rename = "fieldName")]
    pub field_name: String,
}

/// Which mutations the schema emitter generates
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub create: bool,
    #[serde(rename = "batchcreate")]
    pub batch_create: bool,
    pub update: bool,
    #[serde(rename = "batchupdate")]
    pub batch_update: bool,
    pub delete: bool,
    #[serde(rename = "batchdelete")]
    pub batch_delete: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            create: true,
            batch_create: true,
            update: true,
            batch_update: true,
            delete: true,
            batch_delete: true,
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database models generated by the ORM tooling
    pub model: PackageConfig,
    /// Conversion helpers
    pub helper: PackageConfig,
    /// Generated GraphQL models
    pub graph: PackageConfig,
    pub schema: SchemaConfig,
    pub federation: FederationConfig,
    /// GraphQL type name -> overrides
    pub models: BTreeMap<String, TypeMapEntry>,
    /// Extra package names stripped when shortening types
    #[serde(rename = "ignoreprefixes")]
    pub ignore_prefixes: Vec<String>,
    pub mutations: MutationConfig,
}

impl Config {
    /// Parse a YAML configuration
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Configuration used when no file exists
    pub fn with_defaults() -> Self {
        let mut config = Self::default();
        config.apply_defaults();
        config
    }

    /// Load the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("could not read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn apply_defaults(&mut self) {
        for (package, default) in [
            (&mut self.model.package, DEFAULT_MODEL_PACKAGE),
            (&mut self.helper.package, DEFAULT_HELPER_PACKAGE),
            (&mut self.graph.package, DEFAULT_GRAPH_PACKAGE),
        ] {
            if package.is_empty() {
                *package = default.to_string();
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (type_name, entry) in &self.models {
            if let Some(model) = &entry.model {
                match model.first() {
                    Some(go_type) if !go_type.is_empty() => {}
                    _ => {
                        return Err(GeneratorError::Config(format!(
                            "model {}: invalid type specifier - you need to specify a type to map to",
                            type_name
                        )));
                    }
                }
            }
        }
        for fk in &self.federation.foreign_ids {
            if fk.column.is_empty() || fk.table.is_empty() {
                return Err(GeneratorError::Config(
                    "federation.foreignids entries need both column and table".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Build the context threaded through the generation pipeline
    pub fn context(&self) -> GenerationContext {
        let mut ctx = GenerationContext::new(
            &self.graph.package,
            &self.model.package,
            &self.helper.package,
        );

        for (type_name, entry) in &self.models {
            if let Some(go_type) = entry.model.as_ref().and_then(StringList::first) {
                ctx.bindings.insert(type_name.clone(), go_type.to_string());
            }
            for (field, rename) in &entry.fields {
                if !rename.field_name.is_empty() {
                    ctx.field_names
                        .entry(type_name.clone())
                        .or_default()
                        .insert(field.clone(), rename.field_name.clone());
                }
            }
        }

        ctx.ignore_prefixes.extend(self.ignore_prefixes.iter().cloned());
        ctx.foreign_ids = self.federation.foreign_ids.clone();
        ctx.join_relationships = self.federation.join_relationships.clone();
        ctx
    }
}

/// Settings shared by every pipeline stage of one run
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Package of the generated GraphQL models
    pub graph_package: String,
    /// Package of the database models
    pub model_package: String,
    /// Package of the conversion helpers
    pub helper_package: String,
    /// GraphQL type name -> Go type
    pub bindings: BTreeMap<String, String>,
    /// Model name -> GraphQL field name -> renamed field
    pub field_names: BTreeMap<String, BTreeMap<String, String>>,
    /// Package names stripped from type references
    pub ignore_prefixes: Vec<String>,
    pub foreign_ids: Vec<ForeignIdColumn>,
    pub join_relationships: Vec<JoinRelationship>,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_PACKAGE, DEFAULT_MODEL_PACKAGE, DEFAULT_HELPER_PACKAGE)
    }
}

impl GenerationContext {
    pub fn new(graph_package: &str, model_package: &str, helper_package: &str) -> Self {
        let ignore_prefixes = [graph_package, model_package, helper_package]
            .iter()
            .map(|p| package_name(p).to_string())
            .collect();

        Self {
            graph_package: graph_package.to_string(),
            model_package: model_package.to_string(),
            helper_package: package_name(helper_package).to_string(),
            bindings: DEFAULT_BINDINGS
                .iter()
                .map(|(gql, go)| (gql.to_string(), go.to_string()))
                .collect(),
            field_names: BTreeMap::new(),
            ignore_prefixes,
            foreign_ids: Vec::new(),
            join_relationships: Vec::new(),
        }
    }

    /// Go type bound to a GraphQL type name
    pub fn binding(&self, type_name: &str) -> Option<&str> {
        self.bindings.get(type_name).map(String::as_str)
    }

    /// Renamed GraphQL field name for `model.field`, if configured
    pub fn field_name(&self, model: &str, field: &str) -> Option<&str> {
        self.field_names
            .get(model)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn ignore_prefixes(&self) -> Vec<&str> {
        self.ignore_prefixes.iter().map(String::as_str).collect()
    }

    /// Foreign id override registered for a Go field name
    pub fn foreign_id(&self, column: &str) -> Option<&ForeignIdColumn> {
        self.foreign_ids.iter().find(|fk| fk.column == column)
    }

    /// Package name used in qualified accessors, e.g. `models`
    pub fn model_package_name(&self) -> &str {
        package_name(&self.model_package)
    }
}

/// Last segment of an import path: `github.com/acme/app/models` -> `models`
pub fn package_name(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}
