//! Preload planning
//!
//! Computes the first-level eager loads of every preloadable model from its
//! relation fields. The result is sorted by GraphQL field name so that
//! regenerated code is byte-stable.

use std::collections::BTreeMap;

use heck::ToUpperCamelCase;

use crate::catalog::Catalog;
use crate::config::GenerationContext;
use crate::ir::{ColumnSetting, Model, Preload};

/// Relation accessor name for a foreign key column: `OrganizationID` -> `Organization`
pub fn foreign_key_to_rel_name(column: &str) -> String {
    let camel = column.to_upper_camel_case();
    // heck renders the trailing initialism as "Id"
    camel
        .strip_suffix("Id")
        .or_else(|| camel.strip_suffix("ID"))
        .unwrap_or(&camel)
        .to_string()
}

/// Fill `preload_array` of every preloadable model
pub fn compute_preloads(models: &mut [Model], catalog: &Catalog, ctx: &GenerationContext) {
    let package = ctx.model_package_name();

    for model in models.iter_mut().filter(|m| m.is_preloadable) {
        let mut preloads: BTreeMap<String, ColumnSetting> = BTreeMap::new();

        for field in &model.fields {
            if !field.is_object || !field.boiler_field.is_relation {
                continue;
            }
            let relation = if field.boiler_field.relationship_name.is_empty() {
                foreign_key_to_rel_name(&field.boiler_field.name)
            } else {
                field.boiler_field.relationship_name.clone()
            };
            preloads.insert(
                field.json_name.clone(),
                ColumnSetting {
                    name: format!("{}.{}Rels.{}", package, model.name, relation),
                    id_available: !field.is_plural,
                    relationship_model_name: catalog
                        .relationship(&field.boiler_field)
                        .map(|target| target.table_name.clone())
                        .unwrap_or_default(),
                },
            );
        }

        model.preload_array = preloads
            .into_iter()
            .map(|(key, column_setting)| Preload {
                key,
                column_setting,
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BoilerField, BoilerModel};
    use crate::ir::Field;

    fn catalog() -> Catalog {
        let model = |name: &str, table: &str| BoilerModel {
            name: name.to_string(),
            table_name: table.to_string(),
            fields: vec![],
        };
        Catalog::new(
            vec![model("Organization", "organizations"), model("Post", "posts")],
            vec![],
        )
        .unwrap()
    }

    fn relation(json_name: &str, column: &str, target: &str, plural: bool) -> Field {
        Field {
            name: json_name.to_string(),
            json_name: json_name.to_string(),
            is_object: true,
            is_relation: true,
            is_plural: plural,
            boiler_field: BoilerField {
                name: column.to_string(),
                is_relation: true,
                relationship: Some(target.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn user() -> Model {
        Model {
            name: "User".to_string(),
            is_normal: true,
            is_preloadable: true,
            fields: vec![
                relation("posts", "Posts", "Post", true),
                relation("organization", "OrganizationID", "Organization", false),
                Field {
                    name: "Name".to_string(),
                    json_name: "name".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_foreign_key_to_rel_name() {
        assert_eq!(foreign_key_to_rel_name("OrganizationID"), "Organization");
        assert_eq!(foreign_key_to_rel_name("Posts"), "Posts");
        assert_eq!(foreign_key_to_rel_name("organization_id"), "Organization");
    }

    #[test]
    fn test_compute_preloads() {
        let mut models = vec![user()];
        compute_preloads(&mut models, &catalog(), &GenerationContext::default());

        let preloads = &models[0].preload_array;
        assert_eq!(preloads.len(), 2);
        assert_eq!(preloads[0].key, "organization");
        assert_eq!(preloads[0].column_setting.name, "models.UserRels.Organization");
        assert!(preloads[0].column_setting.id_available);
        assert_eq!(preloads[0].column_setting.relationship_model_name, "organizations");
        assert_eq!(preloads[1].key, "posts");
        assert!(!preloads[1].column_setting.id_available);
        assert_eq!(preloads[1].column_setting.name, "models.UserRels.Posts");
        assert_eq!(preloads[1].column_setting.relationship_model_name, "posts");
    }

    #[test]
    fn test_preloads_are_deterministic() {
        let mut first = vec![user()];
        let mut second = vec![user()];
        second[0].fields.reverse();

        let (catalog, ctx) = (catalog(), GenerationContext::default());
        compute_preloads(&mut first, &catalog, &ctx);
        compute_preloads(&mut second, &catalog, &ctx);
        assert_eq!(first[0].preload_array, second[0].preload_array);

        compute_preloads(&mut first, &catalog, &ctx);
        assert_eq!(first[0].preload_array, second[0].preload_array);
    }

    #[test]
    fn test_only_preloadable_models() {
        let mut payload = user();
        payload.name = "UserPayload".to_string();
        payload.is_normal = false;
        payload.is_preloadable = false;

        let mut models = vec![payload];
        compute_preloads(&mut models, &catalog(), &GenerationContext::default());
        assert!(models[0].preload_array.is_empty());
    }
}
