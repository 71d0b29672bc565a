use super::model::Product;

// ---------------------------------------------------------------------------
// Filter terms: free-text substrings typed by the user
// ---------------------------------------------------------------------------

/// Raw filter inputs, exactly as typed. Normalised on every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTerms {
    pub type_term: String,
    pub compliance_term: String,
}

impl FilterTerms {
    pub fn new(type_term: &str, compliance_term: &str) -> Self {
        FilterTerms {
            type_term: type_term.to_string(),
            compliance_term: compliance_term.to_string(),
        }
    }
}

/// Return the products whose type and compliance contain the given terms.
///
/// * Terms are trimmed and lower-cased; a blank term matches everything.
/// * A product lacking a text value for a field never matches a non-blank term.
/// * Input order is kept.
pub fn filter_products(products: &[Product], terms: &FilterTerms) -> Vec<Product> {
    let type_term = normalise(&terms.type_term);
    let compliance_term = normalise(&terms.compliance_term);

    products
        .iter()
        .filter(|p| {
            matches_term(p.type_text(), &type_term)
                && matches_term(p.compliance_text(), &compliance_term)
        })
        .cloned()
        .collect()
}

fn normalise(term: &str) -> String {
    term.trim().to_lowercase()
}

fn matches_term(field: Option<&str>, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    field.is_some_and(|value| value.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn product(name: &str, ty: Option<&str>, compliance: Option<&str>) -> Product {
        let mut record = Record::new().with("name", name);
        if let Some(ty) = ty {
            record = record.with("type", ty);
        }
        if let Some(c) = compliance {
            record = record.with("compliance", c);
        }
        Product::from_record(&record)
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![
            product("A", Some("Bimetallic"), Some("UL, CSA")),
            product("B", Some("Temperature Sensor"), Some("RoHS")),
            product("C", None, Some("UL")),
            product("D", Some("bimetallic disc"), None),
        ]
    }

    #[test]
    fn blank_terms_return_everything_in_order() {
        let products = sample();
        let out = filter_products(&products, &FilterTerms::new("   ", ""));
        assert_eq!(out, products);
    }

    #[test]
    fn terms_are_trimmed_and_case_insensitive() {
        let out = filter_products(&sample(), &FilterTerms::new("  BIMETALLIC ", ""));
        assert_eq!(names(&out), vec!["A", "D"]);
    }

    #[test]
    fn both_terms_must_match() {
        let out = filter_products(&sample(), &FilterTerms::new("bimetal", "ul"));
        assert_eq!(names(&out), vec!["A"]);
    }

    #[test]
    fn missing_type_never_matches_a_type_term() {
        let out = filter_products(&sample(), &FilterTerms::new("e", ""));
        assert!(!names(&out).contains(&"C"));
    }

    #[test]
    fn non_text_compliance_never_matches() {
        let mut p = product("N", Some("Bimetallic"), None);
        p.compliance = Some(CellValue::Int(60730));
        let out = filter_products(&[p], &FilterTerms::new("", "607"));
        assert!(out.is_empty());
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        let out = filter_products(&sample(), &FilterTerms::new("relay", ""));
        assert!(out.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let terms = FilterTerms::new("bimetallic", "");
        let once = filter_products(&sample(), &terms);
        let twice = filter_products(&once, &terms);
        assert_eq!(once, twice);
    }

    #[test]
    fn duplicate_names_are_preserved() {
        let products = vec![
            product("X", Some("Bimetallic"), None),
            product("X", Some("Bimetallic"), None),
        ];
        let out = filter_products(&products, &FilterTerms::new("bi", ""));
        assert_eq!(out.len(), 2);
    }
}
