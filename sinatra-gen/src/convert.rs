//! Conversion-expression synthesis
//!
//! Decides how a value travels between its database struct field and its
//! GraphQL struct field. The result is code text for the emitters, built as
//! a small expression tree ([`ConvertExpr`]) around a `VALUE` placeholder:
//!
//! - enum fields use generated enum converters (`UserRoleToGraphQL` style names)
//! - id fields normalize int/uint and nullability and encode ids for GraphQL
//! - other mismatching types use `<From>To<To>` helper functions
//! - JSON columns always go through the helper package

use heck::ToUpperCamelCase;
use serde::Serialize;

use crate::ir::Field;

/// Placeholder for the value being converted
pub const VALUE: &str = "VALUE";

/// Type pairs that need no conversion although their text differs
const COMPATIBLE_TYPES: [(&str, &str); 1] = [("types.StringArray", "[]string")];

/// A conversion expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ConvertExpr {
    /// The value itself
    #[default]
    Value,
    /// A function call, e.g. `base_helpers.IDToBoiler(VALUE)`
    Call {
        function: String,
        args: Vec<ConvertExpr>,
    },
    /// A quoted string literal argument
    Str(String),
}

impl ConvertExpr {
    pub fn call(function: impl Into<String>, args: Vec<ConvertExpr>) -> Self {
        ConvertExpr::Call {
            function: function.into(),
            args,
        }
    }

    /// Call `function` with `self` as the only argument
    pub fn wrap(self, function: impl Into<String>) -> Self {
        Self::call(function, vec![self])
    }

    /// Render as code text containing the `VALUE` placeholder
    pub fn render(&self) -> String {
        match self {
            ConvertExpr::Value => VALUE.to_string(),
            ConvertExpr::Call { function, args } => {
                let args: Vec<String> = args.iter().map(ConvertExpr::render).collect();
                format!("{}({})", function, args.join(", "))
            }
            ConvertExpr::Str(s) => format!("{:?}", s),
        }
    }

    /// Render with the placeholder replaced by `source`, e.g. `m.OrganizationID`
    pub fn render_with(&self, source: &str) -> String {
        match self {
            ConvertExpr::Value => source.to_string(),
            ConvertExpr::Call { function, args } => {
                let args: Vec<String> = args.iter().map(|a| a.render_with(source)).collect();
                format!("{}({})", function, args.join(", "))
            }
            ConvertExpr::Str(s) => format!("{:?}", s),
        }
    }

    /// Move the outermost function into `package`
    fn in_package(self, package: &str, fallback: impl FnOnce() -> String) -> Self {
        let prefix = format!("{}.", package);
        match self {
            ConvertExpr::Call { function, args } if !function.starts_with(&prefix) => {
                ConvertExpr::Call {
                    function: format!("{}{}", prefix, function),
                    args,
                }
            }
            ConvertExpr::Value => ConvertExpr::Value.wrap(format!("{}{}", prefix, fallback())),
            other => other,
        }
    }
}

impl From<ConvertExpr> for String {
    fn from(expr: ConvertExpr) -> Self {
        expr.render()
    }
}

/// Conversion bundle of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertConfig {
    /// A conversion is needed at all
    pub is_custom: bool,
    /// GraphQL value -> database value
    pub to_boiler: ConvertExpr,
    /// Database value -> GraphQL value
    pub to_graphql: ConvertExpr,
    pub graph_type_as_text: String,
    pub boiler_type_as_text: String,
}

/// GraphQL type as identifier text: `*string` -> `PointerString`
pub fn graph_type_as_text(graph_type: &str) -> String {
    match graph_type.strip_prefix('*') {
        Some(inner) => format!("Pointer{}", inner.to_upper_camel_case()),
        None => graph_type.to_upper_camel_case(),
    }
}

/// Database type as identifier text: `null.String` -> `NullDotString`
pub fn boiler_type_as_text(boiler_type: &str) -> String {
    let text = match boiler_type.strip_prefix("types.") {
        Some(inner) => format!("Types{}", inner.to_upper_camel_case()),
        None => boiler_type.to_string(),
    };
    text.replace('.', "Dot").to_upper_camel_case()
}

fn is_compatible(boiler_type: &str, graph_type: &str) -> bool {
    COMPATIBLE_TYPES
        .iter()
        .any(|(boiler, graph)| *boiler == boiler_type && *graph == graph_type)
}

/// Build the conversion bundle for `field` of model `model_name`
///
/// `is_enum` tells whether the field's type is a known GraphQL enum and
/// `helper` is the package holding the conversion helpers.
pub fn convert_config(model_name: &str, field: &Field, is_enum: bool, helper: &str) -> ConvertConfig {
    let graph_type = field.type_.as_str();
    let boiler_type = field.boiler_field.type_.as_str();
    let graph_text = graph_type_as_text(graph_type);
    let boiler_text = boiler_type_as_text(boiler_type);

    let mut config = ConvertConfig {
        graph_type_as_text: graph_text.clone(),
        boiler_type_as_text: boiler_text.clone(),
        ..Default::default()
    };

    if is_enum {
        config.is_custom = true;
        config.to_boiler = ConvertExpr::Value.wrap(format!("{}To{}", graph_text, boiler_text));
        config.to_graphql = ConvertExpr::Value.wrap(format!("{}To{}", boiler_text, graph_text));
    } else if graph_type != boiler_type && !is_compatible(boiler_type, graph_type) {
        config.is_custom = true;
        let is_relation_id = field.is_number_id && field.boiler_field.is_relation;
        if field.is_primary_id || is_relation_id || field.is_id {
            let (to_boiler, to_graphql) = id_conversion(model_name, field, helper);
            config.to_boiler = to_boiler;
            config.to_graphql = to_graphql;
        } else {
            config.to_boiler =
                ConvertExpr::Value.wrap(format!("{}.{}To{}", helper, graph_text, boiler_text));
            config.to_graphql =
                ConvertExpr::Value.wrap(format!("{}.{}To{}", helper, boiler_text, graph_text));
        }
    }

    // JSON columns are converted by user-supplied helpers
    if boiler_type.contains("JSON") {
        config.is_custom = true;
        config.to_boiler = config
            .to_boiler
            .in_package(helper, || format!("{}To{}", graph_text, boiler_text));
        config.to_graphql = config
            .to_graphql
            .in_package(helper, || format!("{}To{}", boiler_text, graph_text));
    }

    config
}

/// Conversions for primary ids, foreign number ids and registered foreign ids
fn id_conversion(model_name: &str, field: &Field, helper: &str) -> (ConvertExpr, ConvertExpr) {
    let graph_type = field.type_.as_str();
    let boiler_type = field.boiler_field.type_.as_str();
    let graph_is_pointer = graph_type.starts_with('*');

    // GraphQL ids are strings: unwrap the pointer first
    let mut to_boiler = if graph_is_pointer {
        ConvertExpr::Value.wrap(format!("{}.PointerStringToString", helper))
    } else {
        ConvertExpr::Value
    };

    let mut to_graphql = match format!("{}ToUint", boiler_type_as_text(boiler_type)).as_str() {
        "IntToUint" => ConvertExpr::Value.wrap("uint"),
        "UintToUint" => ConvertExpr::Value,
        to_uint => ConvertExpr::Value.wrap(format!("{}.{}", helper, to_uint)),
    };

    let relationship = field.boiler_field.relationship.as_deref();
    if field.is_primary_id {
        to_graphql = to_graphql.wrap(format!("{}IDToGraphQL", model_name));
    } else if let (true, true, Some(target)) =
        (field.is_number_id, field.boiler_field.is_relation, relationship)
    {
        to_graphql = to_graphql.wrap(format!("{}IDToGraphQL", target));
    } else if field.is_number_id && field.is_id {
        let function = if graph_is_pointer {
            "IDToGraphQLPointer"
        } else {
            "IDToGraphQL"
        };
        to_graphql = ConvertExpr::call(
            format!("{}.{}", helper, function),
            vec![to_graphql, ConvertExpr::Str(field.id_table.clone())],
        );
    }

    // int/time checks look through the nullable wrapper: null.Int -> int
    let lower = boiler_type.to_lowercase();
    let underlying = lower.strip_prefix("null.").unwrap_or(&lower);
    let is_int = underlying.starts_with("int");
    let is_time = underlying.starts_with("time");

    if boiler_type.starts_with("null") {
        to_boiler = to_boiler.wrap(format!("{}.IDToBoilerNullInt", helper));
        if is_int {
            to_boiler = to_boiler.wrap(format!("{}.NullUintToNullInt", helper));
        }
        if is_time {
            to_boiler = to_boiler.wrap(format!("{}.NullDotTimeToPointerTime", helper));
        }
    } else {
        to_boiler = to_boiler.wrap(format!("{}.IDToBoiler", helper));
        if is_int {
            to_boiler = to_boiler.wrap("int");
        }
    }

    (to_boiler, to_graphql)
}
