//! Variant code generation
//!
//! `{PREFIX}-{VALUE}-...-{UNIT}`: values follow attribute order, segments
//! are upper-cased with inner whitespace collapsed to `_`, empty segments are
//! dropped.

use shared::models::{Attribute, AttributeValues};

pub fn variant_code(
    prefix: &str,
    attributes: &[Attribute],
    values: &AttributeValues,
    unit: Option<&str>,
) -> String {
    let mut segments = Vec::with_capacity(values.len() + 2);
    segments.push(segment(prefix));
    for attr in attributes {
        if let Some(value) = values.get(&attr.name) {
            segments.push(segment(value));
        }
    }
    // Keys without a matching attribute (mid-rename, legacy data) still count.
    for (name, value) in values {
        if !attributes.iter().any(|a| &a.name == name) {
            segments.push(segment(value));
        }
    }
    if let Some(unit) = unit {
        segments.push(segment(unit));
    }
    segments.retain(|s| !s.is_empty());
    segments.join("-")
}

fn segment(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(names: &[&str]) -> Vec<Attribute> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Attribute::new(i as i64 + 1, *n, false))
            .collect()
    }

    fn values(pairs: &[(&str, &str)]) -> AttributeValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_code_follows_attribute_order() {
        let code = variant_code(
            "tee",
            &attrs(&["Size", "Color"]),
            &values(&[("Color", "Navy Blue"), ("Size", "m")]),
            Some("Piece"),
        );
        assert_eq!(code, "TEE-M-NAVY_BLUE-PIECE");
    }

    #[test]
    fn test_code_without_prefix_or_unit() {
        let code = variant_code("", &attrs(&["Color"]), &values(&[("Color", "Red")]), None);
        assert_eq!(code, "RED");
    }

    #[test]
    fn test_orphan_keys_are_appended() {
        let code = variant_code(
            "X",
            &attrs(&["Color"]),
            &values(&[("Color", "Red"), ("Fit", "Slim")]),
            Some("Box"),
        );
        assert_eq!(code, "X-RED-SLIM-BOX");
    }
}
