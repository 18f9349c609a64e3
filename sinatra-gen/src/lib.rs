//! sinatra-gen: database-first model graph for GraphQL code generation
//!
//! Reconciles a GraphQL schema with the models generated by the database
//! ORM tooling into one annotated model graph:
//! - [`derive`] classifies schema types and matches them to database models
//! - [`reconcile`] resolves field types, identifiers and conversions
//! - [`preload`] plans first-level eager loads
//! - [`pipeline::build`] runs every stage in order
//!
//! Template and resolver emitters consume the resulting [`ModelBuild`].

pub mod catalog;
pub mod config;
pub mod convert;
pub mod derive;
pub mod error;
pub mod extras;
pub mod inflector;
pub mod ir;
pub mod joins;
pub mod output;
pub mod pipeline;
pub mod preload;
pub mod reconcile;
pub mod schema;

pub use catalog::{BoilerEnum, BoilerEnumValue, BoilerField, BoilerModel, Catalog};
pub use config::{Config, GenerationContext};
pub use error::{GeneratorError, Result};
pub use ir::{Enum, EnumValue, Field, Interface, Model, ModelRole, Preload};
pub use pipeline::{ModelBuild, build};
pub use schema::SchemaDocument;
