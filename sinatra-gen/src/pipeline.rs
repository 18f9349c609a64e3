//! Model graph build
//!
//! Runs the stages in their fixed order over one schema and one catalog:
//!
//! - side lists (interfaces, enums, scalars)
//! - model derivation
//! - field reconciliation and relationship resolution
//! - preload planning
//! - join hints for where-clause models

use std::path::Path;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::GenerationContext;
use crate::derive::derive_models;
use crate::error::Result;
use crate::extras::{enums_from_schema, enums_without, interfaces_from_schema, scalars_from_schema};
use crate::ir::{Enum, Interface, Model};
use crate::joins::attach_join_relationships;
use crate::output::write_atomic;
use crate::preload::compute_preloads;
use crate::reconcile::reconcile;
use crate::schema::SchemaDocument;

/// Enums generated by the schema emitter for sorting, never backed by the database
const SORT_ENUM_SUFFIXES: [&str; 2] = ["SortDirection", "Sort"];

/// The finished model graph with its side lists, all sorted by name
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelBuild {
    pub models: Vec<Model>,
    pub enums: Vec<Enum>,
    pub interfaces: Vec<Interface>,
    pub scalars: Vec<String>,
}

impl ModelBuild {
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Write the graph as pretty JSON, returning whether anything was written
    ///
    /// An empty graph leaves an existing file at `path` untouched.
    pub fn write(&self, path: &Path) -> Result<bool> {
        if self.models.is_empty() {
            tracing::debug!(path = %path.display(), "empty model graph, skipping write");
            return Ok(false);
        }

        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json)?;
        tracing::info!(path = %path.display(), models = self.models.len(), "wrote model graph");
        Ok(true)
    }
}

/// Build the model graph
pub fn build(schema: &SchemaDocument, catalog: &Catalog, ctx: &GenerationContext) -> Result<ModelBuild> {
    let mut interfaces = interfaces_from_schema(schema);
    let enums = enums_from_schema(schema, catalog);
    let mut scalars = scalars_from_schema(schema);

    let mut models = derive_models(schema, catalog);
    reconcile(&mut models, schema, catalog, &enums, ctx)?;
    compute_preloads(&mut models, catalog, ctx);

    models.sort_by(|a, b| a.name.cmp(&b.name));
    attach_join_relationships(&mut models, &ctx.join_relationships);

    let mut enums = enums_without(enums, &SORT_ENUM_SUFFIXES);
    enums.sort_by(|a, b| a.name.cmp(&b.name));
    interfaces.sort_by(|a, b| a.name.cmp(&b.name));
    scalars.sort();

    if models.is_empty() {
        tracing::warn!("no models found in graphql schema");
    } else {
        tracing::info!(
            models = models.len(),
            enums = enums.len(),
            interfaces = interfaces.len(),
            "built model graph"
        );
    }

    Ok(ModelBuild {
        models,
        enums,
        interfaces,
        scalars,
    })
}
