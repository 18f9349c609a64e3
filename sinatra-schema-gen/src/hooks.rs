//! Caller-supplied hooks over the schema models
//!
//! Hooks filter and reshape models before any SDL is written. They run in a
//! fixed order per model:
//!
//! 1. `should_add_model` decides whether the model is emitted at all
//! 2. `should_add_field` decides per field
//! 3. `change_field` mutates each accepted field
//! 4. `change_model` mutates the model with its accepted fields
//!
//! `change_fields` runs later, once per generated artifact ([`ParentType`]).

use crate::model::{ParentType, SchemaField, SchemaModel};

type ModelPredicate = Box<dyn Fn(&SchemaModel) -> bool>;
type FieldPredicate = Box<dyn Fn(&SchemaModel, &SchemaField) -> bool>;
type FieldMutator = Box<dyn Fn(&SchemaModel, &mut SchemaField)>;
type FieldsMapper = Box<dyn Fn(&SchemaModel, Vec<SchemaField>, ParentType) -> Vec<SchemaField>>;
type ModelMutator = Box<dyn Fn(&mut SchemaModel)>;

/// Optional hooks; an unset hook accepts everything and changes nothing
#[derive(Default)]
pub struct Hooks {
    pub should_add_model: Option<ModelPredicate>,
    pub should_add_field: Option<FieldPredicate>,
    pub change_field: Option<FieldMutator>,
    pub change_fields: Option<FieldsMapper>,
    pub change_model: Option<ModelMutator>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("should_add_model", &self.should_add_model.is_some())
            .field("should_add_field", &self.should_add_field.is_some())
            .field("change_field", &self.change_field.is_some())
            .field("change_fields", &self.change_fields.is_some())
            .field("change_model", &self.change_model.is_some())
            .finish()
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_should_add_model(mut self, hook: impl Fn(&SchemaModel) -> bool + 'static) -> Self {
        self.should_add_model = Some(Box::new(hook));
        self
    }

    pub fn with_should_add_field(
        mut self,
        hook: impl Fn(&SchemaModel, &SchemaField) -> bool + 'static,
    ) -> Self {
        self.should_add_field = Some(Box::new(hook));
        self
    }

    pub fn with_change_field(mut self, hook: impl Fn(&SchemaModel, &mut SchemaField) + 'static) -> Self {
        self.change_field = Some(Box::new(hook));
        self
    }

    pub fn with_change_fields(
        mut self,
        hook: impl Fn(&SchemaModel, Vec<SchemaField>, ParentType) -> Vec<SchemaField> + 'static,
    ) -> Self {
        self.change_fields = Some(Box::new(hook));
        self
    }

    pub fn with_change_model(mut self, hook: impl Fn(&mut SchemaModel) + 'static) -> Self {
        self.change_model = Some(Box::new(hook));
        self
    }

    /// Filter and mutate models and their fields
    ///
    /// Field hooks see the model as it was before any of its fields were
    /// filtered.
    pub fn apply_model_hooks(&self, models: Vec<SchemaModel>) -> Vec<SchemaModel> {
        let mut accepted = Vec::with_capacity(models.len());

        for mut model in models {
            if let Some(should_add) = &self.should_add_model {
                if !should_add(&model) {
                    tracing::debug!(model = %model.name, "model rejected by hook");
                    continue;
                }
            }

            let fields = std::mem::take(&mut model.fields);
            let original = SchemaModel {
                name: model.name.clone(),
                fields: fields.clone(),
            };

            for mut field in fields {
                if let Some(should_add) = &self.should_add_field {
                    if !should_add(&original, &field) {
                        continue;
                    }
                }
                if let Some(change) = &self.change_field {
                    change(&original, &mut field);
                }
                model.fields.push(field);
            }

            if let Some(change) = &self.change_model {
                change(&mut model);
            }
            accepted.push(model);
        }

        accepted
    }

    /// Fields of `model` as shaped for `parent`
    pub fn fields_for(&self, model: &SchemaModel, fields: Vec<SchemaField>, parent: ParentType) -> Vec<SchemaField> {
        match &self.change_fields {
            Some(change) => change(model, fields, parent),
            None => fields,
        }
    }
}
