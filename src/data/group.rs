use std::collections::HashMap;

use super::model::Product;

/// Products sharing one type label, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGroup<'a> {
    pub label: String,
    pub products: Vec<&'a Product>,
}

/// Partition products by type label for the grouped selector.
///
/// Groups appear in the order their type is first seen. Products without a
/// type land in a group labelled `""`.
pub fn group_by_type(products: &[Product]) -> Vec<TypeGroup<'_>> {
    let mut groups: Vec<TypeGroup<'_>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for product in products {
        let label = product.type_label();
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(TypeGroup {
                label,
                products: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].products.push(product);
    }
    groups
}
