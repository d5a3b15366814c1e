use crate::{catalog::ProcedureParameters, schema::ModelSchema, Model, Params};

use indexmap::IndexMap;
use sprocket_core::driver::BoundParameter;
use sprocket_core::{Error, Result, Value};

use std::collections::HashMap;

/// Matches a model's flattened leaf fields against a procedure's declared
/// parameters and produces the execution-ready parameter set.
///
/// A leaf with no declared counterpart is skipped, so the output never
/// names a parameter absent from the descriptor list. An absent (`Null`)
/// value binds the explicit null marker when the descriptor is nullable
/// and is omitted entirely when it is not.
pub(crate) fn bind_model<M: Model>(
    schema: &ModelSchema<M>,
    model: &M,
    parameters: &ProcedureParameters,
    prefix: &str,
    exclude: &[&str],
) -> Vec<BoundParameter> {
    let mut leaves = IndexMap::new();
    for field in schema.fields() {
        if excluded(exclude, field.name) {
            continue;
        }
        collect(&mut leaves, field.name, (field.get)(model), exclude);
    }

    let mut bound = Vec::with_capacity(leaves.len());
    for (_, (name, value)) in leaves {
        let Some(descriptor) = parameters.find(&format!("{prefix}{name}")) else {
            continue;
        };
        if value.is_null() {
            if descriptor.nullable {
                bound.push(BoundParameter::null(descriptor.name.clone()));
            }
        } else {
            bound.push(BoundParameter::new(descriptor.name.clone(), value));
        }
    }
    bound
}

/// Depth-first pre-order walk over the flattened record tree. A later
/// branch's leaf overwrites an earlier leaf of the same name; names
/// collide case-insensitively, the way parameters match.
fn collect(
    leaves: &mut IndexMap<String, (String, Value)>,
    name: &str,
    value: Value,
    exclude: &[&str],
) {
    match value {
        Value::Record(fields) => {
            for (child, value) in fields {
                if excluded(exclude, &child) {
                    continue;
                }
                collect(leaves, &child, value, exclude);
            }
        }
        value => {
            leaves.insert(name.to_lowercase(), (name.to_owned(), value));
        }
    }
}

fn excluded(exclude: &[&str], name: &str) -> bool {
    exclude.iter().any(|excluded| *excluded == name)
}

/// Strict binding for the validated-update path: every declared parameter
/// must have a caller-supplied key before anything is bound. Extra caller
/// keys are dropped; output follows descriptor declaration order.
pub(crate) fn bind_strict(
    params: &Params,
    parameters: &ProcedureParameters,
    prefix: &str,
) -> Result<Vec<BoundParameter>> {
    let mut supplied: HashMap<String, Value> = HashMap::new();
    for (name, value) in params.iter() {
        supplied.insert(qualify(prefix, name).to_lowercase(), value.clone());
    }

    let missing: Vec<String> = parameters
        .descriptors()
        .iter()
        .filter(|descriptor| !supplied.contains_key(&descriptor.name.to_lowercase()))
        .map(|descriptor| descriptor.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(Error::missing_parameters(missing));
    }

    let mut bound = Vec::with_capacity(parameters.len());
    for descriptor in parameters.descriptors() {
        if let Some(value) = supplied.get(&descriptor.name.to_lowercase()) {
            bound.push(BoundParameter::new(descriptor.name.clone(), value.clone()));
        }
    }
    Ok(bound)
}

/// Ensures a caller-supplied name carries the backend prefix.
pub(crate) fn qualify(prefix: &str, name: &str) -> String {
    if name.starts_with(prefix) {
        name.to_owned()
    } else {
        format!("{prefix}{name}")
    }
}
