//! PropagationTracker - dream-seed records and delivery scoring

use reverie_model::{DreamSeed, NodeId, SeedId, CREATIVITY_INCREMENT, TRANSFORMATION_MIN_LEN};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

/// Creates and stores propagation records ("dream seeds").
///
/// Records are append-only: the path and score accrue during the single
/// propagate call and are never touched again. There is no deletion API;
/// records live as long as the tracker.
#[derive(Debug, Default)]
pub struct PropagationTracker {
    seeds: BTreeMap<SeedId, DreamSeed>,
}

impl PropagationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record and deliver it to `targets` in order.
    ///
    /// Each delivery appends the target to the path; deliveries of content
    /// longer than the transformation minimum additionally accrue
    /// creativity. The origin is a caller-supplied label and is not checked
    /// against the registry.
    pub fn propagate(
        &mut self,
        content: String,
        origin: NodeId,
        targets: Vec<NodeId>,
        emotional_vector: Option<BTreeMap<String, f64>>,
        now_ms: u64,
    ) -> SeedId {
        let id = Uuid::new_v4();
        let mut seed = DreamSeed {
            id,
            content,
            origin_node: origin,
            created_at: now_ms,
            emotional_vector,
            propagation_path: Vec::with_capacity(targets.len()),
            creativity_score: 0.0,
        };

        let transforms = seed.content.len() > TRANSFORMATION_MIN_LEN;
        for target in targets {
            if transforms {
                seed.creativity_score += CREATIVITY_INCREMENT;
            }
            seed.propagation_path.push(target);
        }

        debug!(seed = %id, score = seed.creativity_score, "seed recorded");
        self.seeds.insert(id, seed);
        id
    }

    /// Pure lookup.
    pub fn get(&self, id: &SeedId) -> Option<&DreamSeed> {
        self.seeds.get(id)
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    #[test]
    fn test_propagate_records_path_in_order() {
        let mut tracker = PropagationTracker::new();
        let seed_id = tracker.propagate(
            "hello world, this is long enough".into(),
            id("a"),
            vec![id("b"), id("c")],
            None,
            1000,
        );

        let seed = tracker.get(&seed_id).unwrap();
        assert_eq!(seed.propagation_path, vec![id("b"), id("c")]);
        assert!((seed.creativity_score - 0.2).abs() < 1e-9);
        assert_eq!(seed.created_at, 1000);
    }

    #[test]
    fn test_short_content_never_transforms() {
        let mut tracker = PropagationTracker::new();
        let seed_id = tracker.propagate("short".into(), id("a"), vec![id("b")], None, 0);

        let seed = tracker.get(&seed_id).unwrap();
        assert_eq!(seed.creativity_score, 0.0);
        assert_eq!(seed.propagation_path, vec![id("b")]);
    }

    #[test]
    fn test_transformation_bound_is_strict() {
        let mut tracker = PropagationTracker::new();
        // Exactly 10 bytes: no transformation.
        let at_bound = tracker.propagate("0123456789".into(), id("a"), vec![id("b")], None, 0);
        // 11 bytes: transforms.
        let over = tracker.propagate("0123456789x".into(), id("a"), vec![id("b")], None, 0);

        assert_eq!(tracker.get(&at_bound).unwrap().creativity_score, 0.0);
        assert!((tracker.get(&over).unwrap().creativity_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_path_keeps_duplicates() {
        let mut tracker = PropagationTracker::new();
        let seed_id =
            tracker.propagate("echoes".into(), id("a"), vec![id("b"), id("b")], None, 0);
        assert_eq!(
            tracker.get(&seed_id).unwrap().propagation_path,
            vec![id("b"), id("b")]
        );
    }

    #[test]
    fn test_emotional_vector_passes_through() {
        let mut tracker = PropagationTracker::new();
        let mut vector = BTreeMap::new();
        vector.insert("wonder".to_string(), 0.8);

        let seed_id =
            tracker.propagate("drifting".into(), id("a"), vec![], Some(vector.clone()), 0);
        let seed = tracker.get(&seed_id).unwrap();
        assert_eq!(seed.emotional_vector.as_ref(), Some(&vector));
        assert!(seed.propagation_path.is_empty());
    }

    #[test]
    fn test_unknown_seed_lookup() {
        let tracker = PropagationTracker::new();
        assert!(tracker.get(&Uuid::new_v4()).is_none());
        assert!(tracker.is_empty());
    }
}
