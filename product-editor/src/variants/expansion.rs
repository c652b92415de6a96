//! Cartesian expansion of attribute value sets

use shared::models::AttributeValues;

/// Every combination of one value per axis, first axis varying slowest
///
/// An empty axis list yields no combinations; an axis with no values
/// collapses the product to nothing.
pub fn cartesian(axes: &[(String, Vec<String>)]) -> Vec<AttributeValues> {
    if axes.is_empty() {
        return Vec::new();
    }
    let mut combos = vec![AttributeValues::new()];
    for (name, values) in axes {
        combos = combos
            .iter()
            .flat_map(|combo| {
                values.iter().map(move |value| {
                    let mut next = combo.clone();
                    next.insert(name.clone(), value.clone());
                    next
                })
            })
            .collect();
    }
    combos
}

/// `(∏ ni) × max(1, units)`
pub fn expected_variant_count(value_counts: &[usize], unit_count: usize) -> usize {
    value_counts.iter().product::<usize>() * unit_count.max(1)
}
