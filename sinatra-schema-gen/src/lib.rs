//! sinatra-schema-gen: GraphQL schema documents from database models
//!
//! Turns the database catalog into relay-style SDL: object types, connections,
//! filters, ordering, create/update inputs, payloads, queries and mutations.
//! Callers shape the output through [`Hooks`].

pub mod generator;
pub mod hooks;
pub mod model;
pub mod writer;

pub use generator::{GeneratedFile, generate_schema};
pub use hooks::Hooks;
pub use model::{ParentType, SchemaField, SchemaModel};
