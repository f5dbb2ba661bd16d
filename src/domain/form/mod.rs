//! Declarative account form: field descriptors, validation rules and collected values.

mod field;
mod rules;
mod search;
mod value;

pub use field::{FieldDescriptor, FieldKind, FormField, MalformedField, humanize};
pub use rules::{Rule, RuleSet};
pub use search::filter_options;
pub use value::{FieldValue, FormSession};

/// Resolve every descriptor, separating renderable fields from malformed ones.
///
/// A confirmation is typed as a single string, so one that matches a list
/// field could never succeed and is reported as malformed.
pub fn resolve_fields(descriptors: &[FieldDescriptor]) -> (Vec<FormField>, Vec<MalformedField>) {
    let resolved: Vec<_> =
        descriptors.iter().enumerate().map(|(index, descriptor)| descriptor.resolve(index)).collect();
    let list_keys: Vec<&str> = resolved
        .iter()
        .filter_map(|result| result.as_ref().ok())
        .filter(|field| field.kind.is_list())
        .map(|field| field.key.as_str())
        .collect();

    let mut fields = Vec::new();
    let mut malformed = Vec::new();
    for (index, result) in resolved.iter().enumerate() {
        match result {
            Ok(FormField { key, kind: FieldKind::Confirm { matches }, .. })
                if list_keys.contains(&matches.as_str()) =>
            {
                malformed.push(MalformedField {
                    index,
                    key: Some(key.clone()),
                    reason: format!("'confirm' cannot match list field '{matches}'"),
                });
            }
            Ok(field) => fields.push(field.clone()),
            Err(err) => malformed.push(err.clone()),
        }
    }
    (fields, malformed)
}
