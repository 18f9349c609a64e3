//! Cross-schema join hints for where-clause models
//!
//! A configured join `from -> to` applies to the model whose table is either
//! end. Seen from the `from` side the join is reversed.

use crate::inflector::to_snake;
use crate::ir::{JoinRelationship, Model};

/// Join hints applying to `model`, table names in snake_case
pub fn join_relationships_for(model: &Model, joins: &[JoinRelationship]) -> Vec<JoinRelationship> {
    let Some(table) = model.table_name() else {
        return Vec::new();
    };

    let mut hints = Vec::new();
    for join in joins {
        if join.to == table {
            hints.push(JoinRelationship {
                from: to_snake(&join.from),
                to: to_snake(&join.to),
                via: join.via.clone(),
                from_column: join.from_column.clone(),
                to_column: join.to_column.clone(),
            });
        }
        if join.from == table {
            hints.push(JoinRelationship {
                from: to_snake(&join.to),
                to: to_snake(&join.from),
                via: join.via.clone(),
                from_column: join.to_column.clone(),
                to_column: join.from_column.clone(),
            });
        }
    }
    hints
}

/// Attach join hints to every where-clause model
pub fn attach_join_relationships(models: &mut [Model], joins: &[JoinRelationship]) {
    if joins.is_empty() {
        return;
    }
    for model in models.iter_mut().filter(|m| m.is_where) {
        model.join_array = join_relationships_for(model, joins);
    }
}
