//! DreamSeed - propagation record for content travelling across the mesh

use crate::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier of a propagation record, generated at submission time.
pub type SeedId = uuid::Uuid;

/// A payload record tracking which nodes it was delivered to and an
/// accumulated transformation score.
///
/// Append-only: the path and score accrue during the single propagate call
/// and are never touched afterwards. The path keeps delivery order and is
/// never deduplicated. `origin_node` is a caller-supplied label and is
/// deliberately not validated against the registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DreamSeed {
    pub id: SeedId,
    /// Opaque payload; only its length is ever inspected.
    pub content: String,
    pub origin_node: NodeId,
    /// Millisecond timestamp of creation.
    pub created_at: u64,
    /// Passed through unchanged; the coordinator assigns it no meaning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_vector: Option<BTreeMap<String, f64>>,
    /// Node ids the seed has been delivered to, in call order.
    pub propagation_path: Vec<NodeId>,
    pub creativity_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_serializes_without_empty_vector() {
        let seed = DreamSeed {
            id: uuid::Uuid::new_v4(),
            content: "lucid".into(),
            origin_node: NodeId::from("alpha"),
            created_at: 42,
            emotional_vector: None,
            propagation_path: vec![NodeId::from("beta")],
            creativity_score: 0.0,
        };
        let json = serde_json::to_value(&seed).unwrap();
        assert!(json.get("emotional_vector").is_none());
        assert_eq!(json["propagation_path"][0], "beta");
    }
}
