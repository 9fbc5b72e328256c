//! Array predicates

use crate::registry::ElementType;
use serde_json::Value;

pub fn is_array(value: &Value) -> bool {
    value.is_array()
}

/// Every element has the given type; an empty array passes
pub fn is_of_type(items: &[Value], element_type: ElementType) -> bool {
    items.iter().all(|item| element_type.matches(item))
}

pub fn has_min_size(items: &[Value], min: usize) -> bool {
    items.len() >= min
}

pub fn has_max_size(items: &[Value], max: usize) -> bool {
    items.len() <= max
}

pub fn has_size(items: &[Value], size: usize) -> bool {
    items.len() == size
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_of_type() {
        let coords = vec![json!(-29.92), json!(57.3)];
        assert!(is_of_type(&coords, ElementType::Number));
        assert!(!is_of_type(&coords, ElementType::String));
        assert!(!is_of_type(&[json!(1), json!("2")], ElementType::Number));
        assert!(is_of_type(&[], ElementType::Object));
    }

    #[test]
    fn test_sizes() {
        let items = vec![json!(1), json!(2)];
        assert!(has_min_size(&items, 2));
        assert!(!has_min_size(&items, 3));
        assert!(has_max_size(&items, 2));
        assert!(!has_max_size(&items, 1));
        assert!(has_size(&items, 2));
        assert!(!has_size(&items, 0));
    }
}
