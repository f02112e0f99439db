#![cfg(feature = "serde")]

use rebalance::{
    benchmarks::BenchmarkReport,
    cluster::{NodeInfo, PenaltyShape, PodInfo, RankedAssignment, WeightConfig},
    evolution::{LogLevel, Nsga2Options},
};

#[test]
fn test_options_from_json() {
    let options = Nsga2Options::builder()
        .population_size(50)
        .num_generations(20)
        .seed(99)
        .log_level(LogLevel::Verbose)
        .build();

    let json = serde_json::to_string(&options).unwrap();
    let restored: Nsga2Options = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.get_population_size(), 50);
    assert_eq!(restored.get_num_generations(), 20);
    assert_eq!(restored.get_seed(), Some(99));
    assert_eq!(restored.get_log_level(), LogLevel::Verbose);
}

#[test]
fn test_cluster_snapshot_from_json() {
    let json = r#"{
        "nodes": [
            {"name": "a", "cpu_capacity": 4000.0, "mem_capacity": 8e9, "hourly_cost": 0.2}
        ],
        "pods": [
            {
                "name": "web-0",
                "node": 0,
                "cpu_request": 250.0,
                "mem_request": 5e8,
                "replica_set": "web",
                "max_unavailable": 1,
                "cold_start_secs": 12.5
            },
            {
                "name": "cron",
                "node": 0,
                "cpu_request": 50.0,
                "mem_request": 1e8,
                "replica_set": null,
                "max_unavailable": 1,
                "cold_start_secs": 0.0
            }
        ]
    }"#;

    #[derive(serde::Deserialize)]
    struct Snapshot {
        nodes: Vec<NodeInfo>,
        pods: Vec<PodInfo>,
    }

    let snapshot: Snapshot = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.nodes[0], NodeInfo::new("a", 4000.0, 8e9, 0.2));
    assert_eq!(
        snapshot.pods[0],
        PodInfo::new("web-0", 0, 250.0, 5e8)
            .in_replica_set("web", 1)
            .with_cold_start(12.5)
    );
    assert_eq!(snapshot.pods[1].replica_set, None);
}

#[test]
fn test_results_serialize() {
    let candidate = RankedAssignment {
        assignment: vec![0, 2, 1],
        objectives: vec![0.25, 0.1, 0.4],
        weighted_score: 0.25,
        movement_count: 2,
    };
    let value = serde_json::to_value(&candidate).unwrap();
    assert_eq!(value["assignment"], serde_json::json!([0, 2, 1]));
    assert_eq!(value["movement_count"], 2);

    let report = BenchmarkReport {
        name: "ZDT1_30".to_string(),
        front_size: 12,
        igd: None,
    };
    let value = serde_json::to_value(&report).unwrap();
    assert!(value["igd"].is_null());
}

#[test]
fn test_weights_and_penalty_shape_from_json() {
    let weights: WeightConfig =
        serde_json::from_str(r#"{"cost": 0.5, "disruption": 0.3, "balance": 0.2}"#).unwrap();
    assert!(weights.validate().is_ok());

    let shape: PenaltyShape = serde_json::from_str(r#"{"Exponential": {"lambda": 0.5}}"#).unwrap();
    assert_eq!(shape, PenaltyShape::Exponential { lambda: 0.5 });
}
