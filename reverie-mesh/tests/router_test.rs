//! Event router dispatch and outcome shapes.

use reverie_mesh::{
    MeshActor, MeshConfig, MeshEvent, MeshHandle, MockClock, NodeId, NodeState, RouteOutcome,
    DEFAULT_CHANNEL_CAPACITY,
};
use std::sync::Arc;

fn spawn_mesh() -> MeshHandle {
    let (handle, _task) = MeshActor::spawn(
        MeshConfig::new(),
        Arc::new(MockClock::new(0)),
        DEFAULT_CHANNEL_CAPACITY,
    );
    handle
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

#[tokio::test]
async fn test_consciousness_sync_reports_health() {
    let mesh = spawn_mesh();
    mesh.register_node("A").await.unwrap();
    mesh.register_node("B").await.unwrap();

    let outcome = mesh
        .route_event(MeshEvent::ConsciousnessSync {
            target_nodes: vec![id("A"), id("ghost")],
        })
        .await
        .unwrap();

    // nodes_synced counts the requested targets; health counts what is
    // actually active after the walk.
    assert_eq!(
        outcome,
        RouteOutcome::Synchronized {
            nodes_synced: 2,
            mesh_health: 1,
        }
    );
}

#[tokio::test]
async fn test_dream_propagation_returns_seed() {
    let mesh = spawn_mesh();

    let outcome = mesh
        .route_event(MeshEvent::DreamPropagation {
            content: "short".into(),
            source_node: id("A"),
            targets: vec![id("B")],
            emotional_vector: None,
        })
        .await
        .unwrap();

    let (seed_id, propagation_paths) = match outcome {
        RouteOutcome::DreamPropagated {
            seed_id,
            propagation_paths,
        } => (seed_id, propagation_paths),
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(propagation_paths, 1);

    // "short" is under the transformation bound, so the stored seed
    // accrued no creativity.
    let seed = mesh.get_seed(seed_id).await.unwrap().expect("seed stored");
    assert_eq!(seed.creativity_score, 0.0);
    assert_eq!(seed.propagation_path, vec![id("B")]);
}

#[tokio::test]
async fn test_drift_detection_uses_default_threshold() {
    let mesh = spawn_mesh();
    mesh.register_node("steady").await.unwrap();
    mesh.register_node("adrift").await.unwrap();
    mesh.set_drift_score("adrift", 0.16).await.unwrap();

    let outcome = mesh
        .route_event(MeshEvent::DriftDetection { threshold: None })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::DriftMonitored {
            drifting_nodes: vec![id("adrift")],
            total_nodes: 2,
        }
    );

    // The sweep's queued resync has healed the node by the next response.
    let topology = mesh.get_topology().await.unwrap();
    assert_eq!(topology.nodes[&id("adrift")], NodeState::Active);
}

#[tokio::test]
async fn test_drift_detection_with_explicit_threshold() {
    let mesh = spawn_mesh();
    mesh.register_node("adrift").await.unwrap();
    mesh.set_drift_score("adrift", 0.16).await.unwrap();

    let outcome = mesh
        .route_event(MeshEvent::DriftDetection {
            threshold: Some(0.5),
        })
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RouteOutcome::DriftMonitored {
            drifting_nodes: vec![],
            total_nodes: 1,
        }
    );
}

#[tokio::test]
async fn test_unknown_event_degrades_to_acknowledgment() {
    let mesh = spawn_mesh();

    let outcome = mesh
        .route_event(MeshEvent::Other {
            event_type: "telepathy".into(),
        })
        .await
        .unwrap();

    assert_eq!(outcome, RouteOutcome::RoutedViaMesh { mesh_active: true });
}

#[tokio::test]
async fn test_outcomes_serialize_with_documented_statuses() {
    let mesh = spawn_mesh();
    mesh.register_node("A").await.unwrap();

    let sync = mesh
        .route_event(MeshEvent::ConsciousnessSync {
            target_nodes: vec![id("A")],
        })
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&sync).unwrap()["status"],
        "synchronized"
    );

    let drift = mesh
        .route_event(MeshEvent::DriftDetection { threshold: None })
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&drift).unwrap()["status"],
        "drift_monitored"
    );

    let dream = mesh
        .route_event(MeshEvent::DreamPropagation {
            content: "a dream beyond the bound".into(),
            source_node: id("A"),
            targets: vec![id("A")],
            emotional_vector: None,
        })
        .await
        .unwrap();
    let json = serde_json::to_value(&dream).unwrap();
    assert_eq!(json["status"], "dream_propagated");
    assert!(!json["seed_id"].as_str().unwrap().is_empty());

    let fallback = mesh
        .route_event(MeshEvent::Other {
            event_type: "unknown".into(),
        })
        .await
        .unwrap();
    let json = serde_json::to_value(&fallback).unwrap();
    assert_eq!(json["status"], "routed_via_mesh");
    assert_eq!(json["mesh_active"], true);
}
