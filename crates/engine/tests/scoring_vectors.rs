use engine::score;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use types::board::{Position, Vulnerability};
use types::contract::Contract;

#[derive(Debug, Deserialize)]
struct ScoringCase {
    contract: String,
    declarer: String,
    vulnerability: String,
    tricks: u8,
    side: String,
    points: i32,
}

#[test]
fn run_scoring_vectors() {
    let test_file = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../tests/scoring/contracts.yaml"
    );
    let file_content = fs::read_to_string(test_file).expect("Failed to read scoring vectors");
    let suites: BTreeMap<String, Vec<ScoringCase>> =
        serde_yaml::from_str(&file_content).expect("Failed to parse YAML");
    assert!(!suites.is_empty());

    let mut failures = Vec::new();
    for (suite_name, cases) in &suites {
        for case in cases {
            let declarer: Position = case.declarer.parse().unwrap();
            let vulnerability: Vulnerability = case.vulnerability.parse().unwrap();
            let contract = Contract::parse(&case.contract, declarer).unwrap();
            let result = score(&contract, case.tricks, vulnerability).unwrap();

            let side = result.partnership.to_string();
            if side != case.side || result.points != case.points {
                failures.push(format!(
                    "{suite_name}: {} by {} ({}) taking {}: expected {} {}, got {} {}",
                    case.contract,
                    case.declarer,
                    case.vulnerability,
                    case.tricks,
                    case.side,
                    case.points,
                    side,
                    result.points
                ));
            }
        }
    }

    for f in &failures {
        println!("{f}");
    }
    assert!(failures.is_empty(), "{} scoring vectors failed", failures.len());
}
