//! Read-only GraphQL schema model
//!
//! SDL documents are parsed with `graphql-parser` and folded into an owned
//! [`SchemaDocument`]:
//! - built-in scalars (ID, String, Int, Float, Boolean) are always present
//! - `extend type` definitions are merged into their base type
//! - root operation types follow the `schema { ... }` block, defaulting to
//!   Query/Mutation/Subscription

use std::collections::BTreeMap;

use graphql_parser::schema::{
    Definition, Document, EnumValue as AstEnumValue, Field as AstField, InputValue,
    Type as AstType, TypeDefinition, TypeExtension, parse_schema,
};

use crate::error::{GeneratorError, Result};

const BUILTIN_SCALARS: [&str; 5] = ["ID", "String", "Int", "Float", "Boolean"];

/// Kind of a schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Object or input object: types with a field list that can become models
    pub fn is_object_like(&self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::InputObject)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
        }
    }
}

/// A type reference with list/required modifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Innermost named type
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Whether a list wrapper appears anywhere
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::Named(_) => false,
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
        }
    }

    fn from_ast(ty: &AstType<'_, String>) -> Self {
        match ty {
            AstType::NamedType(name) => TypeRef::Named(name.clone()),
            AstType::ListType(inner) => TypeRef::List(Box::new(Self::from_ast(inner))),
            AstType::NonNullType(inner) => TypeRef::NonNull(Box::new(Self::from_ast(inner))),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// A field of an object, interface or input type
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
}

impl SchemaField {
    fn from_field(field: &AstField<'_, String>) -> Self {
        Self {
            name: field.name.clone(),
            description: field.description.clone(),
            ty: TypeRef::from_ast(&field.field_type),
        }
    }

    fn from_input(value: &InputValue<'_, String>) -> Self {
        Self {
            name: value.name.clone(),
            description: value.description.clone(),
            ty: TypeRef::from_ast(&value.value_type),
        }
    }
}

/// An enum value
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEnumValue {
    pub name: String,
    pub description: Option<String>,
}

impl From<&AstEnumValue<'_, String>> for SchemaEnumValue {
    fn from(value: &AstEnumValue<'_, String>) -> Self {
        Self {
            name: value.name.clone(),
            description: value.description.clone(),
        }
    }
}

/// A named schema type
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaType {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    /// Fields of objects, interfaces and input objects
    pub fields: Vec<SchemaField>,
    /// Values of enums
    pub enum_values: Vec<SchemaEnumValue>,
    /// Interfaces implemented by objects
    pub interfaces: Vec<String>,
    /// Members of unions
    pub possible_types: Vec<String>,
}

impl SchemaType {
    fn new(name: &str, kind: TypeKind, description: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description,
            fields: Vec::new(),
            enum_values: Vec::new(),
            interfaces: Vec::new(),
            possible_types: Vec::new(),
        }
    }
}

/// All types of a GraphQL schema, indexed by name
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    types: BTreeMap<String, SchemaType>,
    query: String,
    mutation: String,
    subscription: String,
}

impl Default for SchemaDocument {
    fn default() -> Self {
        let mut types = BTreeMap::new();
        for name in BUILTIN_SCALARS {
            types.insert(name.to_string(), SchemaType::new(name, TypeKind::Scalar, None));
        }
        Self {
            types,
            query: "Query".to_string(),
            mutation: "Mutation".to_string(),
            subscription: "Subscription".to_string(),
        }
    }
}

impl SchemaDocument {
    /// Parse one or more SDL sources, given as `(source name, text)` pairs
    pub fn parse(sources: &[(&str, &str)]) -> Result<Self> {
        let mut schema = Self::default();
        let mut extensions = Vec::new();

        for (source, text) in sources {
            let document: Document<'_, String> = parse_schema(text)
                .map_err(|e| GeneratorError::Parse(format!("{}: {}", source, e)))?;

            for definition in document.definitions {
                match definition {
                    Definition::SchemaDefinition(def) => {
                        if let Some(query) = def.query {
                            schema.query = query;
                        }
                        if let Some(mutation) = def.mutation {
                            schema.mutation = mutation;
                        }
                        if let Some(subscription) = def.subscription {
                            schema.subscription = subscription;
                        }
                    }
                    Definition::TypeDefinition(def) => schema.add_definition(def),
                    Definition::TypeExtension(ext) => extensions.push(ext),
                    Definition::DirectiveDefinition(_) => {}
                }
            }
        }

        // Extensions may precede their base definition in source order
        for ext in extensions {
            schema.apply_extension(ext)?;
        }

        Ok(schema)
    }

    fn add_definition(&mut self, def: TypeDefinition<'_, String>) {
        let ty = match def {
            TypeDefinition::Scalar(s) => SchemaType::new(&s.name, TypeKind::Scalar, s.description),
            TypeDefinition::Object(o) => {
                let mut ty = SchemaType::new(&o.name, TypeKind::Object, o.description);
                ty.fields = o.fields.iter().map(SchemaField::from_field).collect();
                ty.interfaces = o.implements_interfaces;
                ty
            }
            TypeDefinition::Interface(i) => {
                let mut ty = SchemaType::new(&i.name, TypeKind::Interface, i.description);
                ty.fields = i.fields.iter().map(SchemaField::from_field).collect();
                ty
            }
            TypeDefinition::Union(u) => {
                let mut ty = SchemaType::new(&u.name, TypeKind::Union, u.description);
                ty.possible_types = u.types;
                ty
            }
            TypeDefinition::Enum(e) => {
                let mut ty = SchemaType::new(&e.name, TypeKind::Enum, e.description);
                ty.enum_values = e.values.iter().map(SchemaEnumValue::from).collect();
                ty
            }
            TypeDefinition::InputObject(i) => {
                let mut ty = SchemaType::new(&i.name, TypeKind::InputObject, i.description);
                ty.fields = i.fields.iter().map(SchemaField::from_input).collect();
                ty
            }
        };
        self.types.insert(ty.name.clone(), ty);
    }

    fn apply_extension(&mut self, ext: TypeExtension<'_, String>) -> Result<()> {
        let (name, kind) = match &ext {
            TypeExtension::Scalar(s) => (s.name.clone(), TypeKind::Scalar),
            TypeExtension::Object(o) => (o.name.clone(), TypeKind::Object),
            TypeExtension::Interface(i) => (i.name.clone(), TypeKind::Interface),
            TypeExtension::Union(u) => (u.name.clone(), TypeKind::Union),
            TypeExtension::Enum(e) => (e.name.clone(), TypeKind::Enum),
            TypeExtension::InputObject(i) => (i.name.clone(), TypeKind::InputObject),
        };

        // `extend type Query` without a base definition is common in split schemas
        let ty = self
            .types
            .entry(name.clone())
            .or_insert_with(|| SchemaType::new(&name, kind, None));
        if ty.kind != kind {
            return Err(GeneratorError::Parse(format!(
                "extension of `{}` as {} does not match its {} definition",
                name,
                kind.as_str(),
                ty.kind.as_str()
            )));
        }

        match ext {
            TypeExtension::Scalar(_) => {}
            TypeExtension::Object(o) => {
                ty.fields.extend(o.fields.iter().map(SchemaField::from_field));
                ty.interfaces.extend(o.implements_interfaces);
            }
            TypeExtension::Interface(i) => {
                ty.fields.extend(i.fields.iter().map(SchemaField::from_field));
            }
            TypeExtension::Union(u) => ty.possible_types.extend(u.types),
            TypeExtension::Enum(e) => {
                ty.enum_values.extend(e.values.iter().map(SchemaEnumValue::from));
            }
            TypeExtension::InputObject(i) => {
                ty.fields.extend(i.fields.iter().map(SchemaField::from_input));
            }
        }
        Ok(())
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }

    /// All types, ordered by name
    pub fn types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.values()
    }

    /// Whether `name` is the query, mutation or subscription root type
    pub fn is_root_operation(&self, name: &str) -> bool {
        name == self.query || name == self.mutation || name == self.subscription
    }

    /// Interfaces and unions that `ty` belongs to
    pub fn implements(&self, ty: &SchemaType) -> Vec<&SchemaType> {
        self.types
            .values()
            .filter(|candidate| match candidate.kind {
                TypeKind::Interface => ty.interfaces.contains(&candidate.name),
                TypeKind::Union => candidate.possible_types.contains(&ty.name),
                _ => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
        interface Node { id: ID! }
        union SearchResult = User | Organization

        "A person using the app"
        type User implements Node {
            id: ID!
            name: String!
            friends: [User!]
        }

        type Organization implements Node { id: ID! }

        enum UserRole { ADMIN SUPER_USER }

        input UserCreateInput { name: String! }

        type Query { user(id: ID!): User }
    "#;

    #[test]
    fn test_parse_types() {
        let schema = SchemaDocument::parse(&[("schema.graphql", SDL)]).unwrap();

        let user = schema.get("User").unwrap();
        assert_eq!(user.kind, TypeKind::Object);
        assert_eq!(user.description.as_deref(), Some("A person using the app"));
        assert_eq!(user.fields.len(), 3);
        assert_eq!(user.fields[0].ty.to_string(), "ID!");
        assert_eq!(user.fields[2].ty.to_string(), "[User!]");
        assert!(user.fields[2].ty.is_list());
        assert!(!user.fields[2].ty.is_non_null());
        assert_eq!(user.fields[2].ty.name(), "User");

        let input = schema.get("UserCreateInput").unwrap();
        assert_eq!(input.kind, TypeKind::InputObject);
        assert_eq!(input.fields[0].name, "name");

        let role = schema.get("UserRole").unwrap();
        assert_eq!(role.enum_values.len(), 2);
        assert_eq!(role.enum_values[1].name, "SUPER_USER");
    }

    #[test]
    fn test_builtin_scalars_are_present() {
        let schema = SchemaDocument::parse(&[]).unwrap();
        for name in ["ID", "String", "Int", "Float", "Boolean"] {
            assert_eq!(schema.get(name).unwrap().kind, TypeKind::Scalar);
        }
    }

    #[test]
    fn test_implements() {
        let schema = SchemaDocument::parse(&[("schema.graphql", SDL)]).unwrap();
        let user = schema.get("User").unwrap();
        let names: Vec<&str> = schema.implements(user).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Node", "SearchResult"]);
    }

    #[test]
    fn test_extensions_are_merged() {
        let extension = "extend type User { email: String }\nextend type Query { users: [User!]! }";
        let schema =
            SchemaDocument::parse(&[("ext.graphql", extension), ("schema.graphql", SDL)]).unwrap();

        let user = schema.get("User").unwrap();
        assert!(user.fields.iter().any(|f| f.name == "email"));
        assert_eq!(schema.get("Query").unwrap().fields.len(), 2);
    }

    #[test]
    fn test_root_operation_names() {
        let sdl = "schema { query: RootQuery } type RootQuery { ok: Boolean }";
        let schema = SchemaDocument::parse(&[("schema.graphql", sdl)]).unwrap();
        assert!(schema.is_root_operation("RootQuery"));
        assert!(schema.is_root_operation("Mutation"));
        assert!(!schema.is_root_operation("Query"));
    }

    #[test]
    fn test_parse_error() {
        let err = SchemaDocument::parse(&[("broken.graphql", "type {")]).unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
        assert!(err.to_string().contains("broken.graphql"));
    }
}
