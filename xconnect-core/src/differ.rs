//! Differ - Compare desired state with current state to detect drift
//!
//! Compares the declared state with the state read back from the Provider
//! and decides what, if anything, has to happen to reconcile them.

use std::collections::HashMap;

use crate::resource::{Resource, ResourceId, State, Value};
use crate::schema::{AttributeType, ResourceSchema};

/// Result of a diff operation
#[derive(Debug, Clone, PartialEq)]
pub enum Diff {
    /// Resource does not exist -> needs creation
    Create(Resource),
    /// Resource exists with differences in mutable attributes -> needs update
    Update {
        id: ResourceId,
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
    },
    /// An immutable attribute changed -> delete and create again
    Replace {
        id: ResourceId,
        from: State,
        to: Resource,
        changed_attributes: Vec<String>,
        force_new_attributes: Vec<String>,
    },
    /// Resource exists with no differences -> no action needed
    NoChange(ResourceId),
}

impl Diff {
    /// Returns whether this Diff involves a change
    pub fn is_change(&self) -> bool {
        !matches!(self, Diff::NoChange(_))
    }
}

/// Compare desired state with current state to compute a Diff
///
/// Attributes absent from the declared state are not compared, so values the
/// remote system assigned (an auto-allocated VLAN, a generated BGP key) do not
/// show up as drift. A computed attribute declared as `0` or `""` counts as
/// absent. Enum values compare case-insensitively, and a block written as a
/// single-element list compares as the block itself.
pub fn diff(desired: &Resource, current: &State, schema: &ResourceSchema) -> Diff {
    if !current.exists {
        return Diff::Create(desired.clone());
    }

    let mut changed = Vec::new();
    find_changed_attributes(
        "",
        &desired.attributes,
        &current.attributes,
        schema,
        &mut changed,
    );
    changed.sort();

    if changed.is_empty() {
        return Diff::NoChange(desired.id.clone());
    }

    let force_new: Vec<String> = changed
        .iter()
        .filter(|path| schema.is_force_new(path))
        .cloned()
        .collect();

    if force_new.is_empty() {
        Diff::Update {
            id: desired.id.clone(),
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
        }
    } else {
        Diff::Replace {
            id: desired.id.clone(),
            from: current.clone(),
            to: desired.clone(),
            changed_attributes: changed,
            force_new_attributes: force_new,
        }
    }
}

/// Find changed attributes between desired and current state, descending
/// into nested blocks
fn find_changed_attributes(
    prefix: &str,
    desired: &HashMap<String, Value>,
    current: &HashMap<String, Value>,
    schema: &ResourceSchema,
    changed: &mut Vec<String>,
) {
    for (key, desired_value) in desired {
        // Skip internal attributes (starting with _)
        if key.starts_with('_') {
            continue;
        }

        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        let attribute = schema.lookup(&path);
        let desired_value = single_block(desired_value);

        if attribute.is_some_and(|a| a.computed) && is_unset(desired_value) {
            continue;
        }
        let is_enum = attribute.is_some_and(|a| matches!(a.attr_type, AttributeType::Enum(_)));

        match (desired_value, current.get(key).map(single_block)) {
            (Value::Map(d), Some(Value::Map(c))) => {
                find_changed_attributes(&path, d, c, schema, changed);
            }
            (Value::String(d), Some(Value::String(c)))
                if is_enum && d.eq_ignore_ascii_case(c) => {}
            (d, Some(c)) if d == c => {}
            _ => changed.push(path),
        }
    }
}

/// A block may be written as a list holding exactly one block
fn single_block(value: &Value) -> &Value {
    match value {
        Value::List(items) => match items.as_slice() {
            [block @ Value::Map(_)] => block,
            _ => value,
        },
        _ => value,
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Int(n) => *n == 0,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
