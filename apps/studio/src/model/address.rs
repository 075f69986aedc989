//! Typed field addresses for inline-edit routing.
//!
//! The renderer constructs a `FieldAddress` for every data-bound leaf it
//! emits in edit mode, and the same value travels back with the committed
//! edit. Building the address as a two-arm enum makes the invariant
//! "a collection address always carries an index" unrepresentable to violate,
//! so nothing is parsed at commit time.

use serde::{Deserialize, Serialize};

/// The ordered résumé collections an `Item` address may point into.
/// Cover letters have no indexed collections; their nested blocks are
/// addressed through `Scalar` leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Experience,
    Education,
    Skills,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Experience => "experience",
            Collection::Education => "education",
            Collection::Skills => "skills",
        }
    }
}

/// The structural address of exactly one scalar value inside a `Document`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "scope")]
pub enum FieldAddress {
    /// A top-level scalar (`summary`, `body`) or a field of one of the
    /// non-indexed info blocks (personal, recipient, job).
    Scalar { leaf: String },
    /// One field of one entry of an ordered collection.
    Item {
        collection: Collection,
        index: usize,
        leaf: String,
    },
}

impl FieldAddress {
    pub fn scalar(leaf: impl Into<String>) -> Self {
        FieldAddress::Scalar { leaf: leaf.into() }
    }

    pub fn item(collection: Collection, index: usize, leaf: impl Into<String>) -> Self {
        FieldAddress::Item {
            collection,
            index,
            leaf: leaf.into(),
        }
    }

    pub fn leaf(&self) -> &str {
        match self {
            FieldAddress::Scalar { leaf } => leaf,
            FieldAddress::Item { leaf, .. } => leaf,
        }
    }
}

impl std::fmt::Display for FieldAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldAddress::Scalar { leaf } => write!(f, "{leaf}"),
            FieldAddress::Item {
                collection,
                index,
                leaf,
            } => write!(f, "{}[{}].{}", collection.key(), index, leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats_item_path() {
        let addr = FieldAddress::item(Collection::Experience, 1, "description");
        assert_eq!(addr.to_string(), "experience[1].description");
    }

    #[test]
    fn test_display_formats_scalar_leaf() {
        let addr = FieldAddress::scalar("summary");
        assert_eq!(addr.to_string(), "summary");
    }

    #[test]
    fn test_leaf_accessor_covers_both_arms() {
        assert_eq!(FieldAddress::scalar("email").leaf(), "email");
        assert_eq!(
            FieldAddress::item(Collection::Skills, 0, "name").leaf(),
            "name"
        );
    }

    #[test]
    fn test_serde_tags_scope() {
        let addr = FieldAddress::item(Collection::Education, 2, "school");
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["scope"], "item");
        assert_eq!(json["collection"], "education");
        assert_eq!(json["index"], 2);
    }
}
