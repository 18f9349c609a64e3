//! Side lists handed to emitters next to the models
//!
//! - Interfaces and unions
//! - Enums, matched against database enums
//! - Scalar names

use heck::ToLowerCamelCase;

use crate::catalog::Catalog;
use crate::inflector::plural;
use crate::ir::{Enum, EnumValue, Interface};
use crate::schema::{SchemaDocument, TypeKind};

/// Interfaces and unions of the schema
pub fn interfaces_from_schema(schema: &SchemaDocument) -> Vec<Interface> {
    schema
        .types()
        .filter(|t| matches!(t.kind, TypeKind::Interface | TypeKind::Union))
        .map(|t| Interface {
            name: t.name.clone(),
            description: t.description.clone(),
        })
        .collect()
}

/// Enums of the schema with their database counterparts
///
/// Introspection enums (`__TypeKind`) and other `_`-prefixed names are left out.
pub fn enums_from_schema(schema: &SchemaDocument, catalog: &Catalog) -> Vec<Enum> {
    schema
        .types()
        .filter(|t| t.kind == TypeKind::Enum && !t.name.starts_with('_'))
        .map(|t| {
            let boiler_enum = catalog.find_enum(&t.name);
            Enum {
                name: t.name.clone(),
                plural_name: plural(&t.name),
                description: t.description.clone(),
                values: t
                    .enum_values
                    .iter()
                    .map(|v| EnumValue {
                        name: v.name.clone(),
                        name_lower: v.name.to_lowercase().to_lower_camel_case(),
                        description: v.description.clone(),
                        boiler_enum_value: boiler_enum
                            .and_then(|e| e.find_value(&v.name))
                            .cloned(),
                    })
                    .collect(),
                boiler_enum: boiler_enum.cloned(),
            }
        })
        .collect()
}

/// Scalar names, built-ins included
pub fn scalars_from_schema(schema: &SchemaDocument) -> Vec<String> {
    schema
        .types()
        .filter(|t| t.kind == TypeKind::Scalar)
        .map(|t| t.name.clone())
        .collect()
}

/// Drop enums whose name ends with any of `skip`
pub fn enums_without(enums: Vec<Enum>, skip: &[&str]) -> Vec<Enum> {
    enums
        .into_iter()
        .filter(|e| !skip.iter().any(|s| e.name.ends_with(s)))
        .collect()
}
