//! Saved report tests.

use chrono::Utc;
use paleo_query::output::{save_report, write_plan, REPORT_FILE};
use paleo_query::{ExtractedQuery, OverlapMode, QueryReport};
use tempfile::TempDir;
use uuid::Uuid;

fn report() -> QueryReport {
    QueryReport {
        request_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        question: Some("Holocene corals".to_string()),
        provider: Some("openai".to_string()),
        model: Some("gpt-4o-mini".to_string()),
        parameters: ExtractedQuery::new()
            .with_archive_type("Coral")
            .with_time_period("Holocene")
            .with_time_overlap(OverlapMode::Contained),
        sparql: "SELECT DISTINCT ?datasetName WHERE { }".to_string(),
        datasets: vec![
            "Ocn-Palmyra.Cobb.2003".to_string(),
            "Ocn-Tahiti.DeLong.2012".to_string(),
        ],
    }
}

#[test]
fn test_save_report_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("results").join("nested");
    let original = report();

    let path = save_report(&dir, &original).unwrap();

    assert_eq!(path, dir.join(REPORT_FILE));
    let loaded: QueryReport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_saved_json_layout() {
    let temp_dir = TempDir::new().unwrap();

    let path = save_report(temp_dir.path(), &report()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(value["datasets"].as_array().unwrap().len(), 2);
    assert_eq!(value["parameters"]["archive_type"], "Coral");
    assert_eq!(value["parameters"]["time_overlap"], "contained");
    assert!(value["request_id"].is_string());
}

#[test]
fn test_save_overwrites_previous_report() {
    let temp_dir = TempDir::new().unwrap();
    let mut first = report();
    first.datasets = vec!["old".to_string()];

    save_report(temp_dir.path(), &first).unwrap();
    let path = save_report(temp_dir.path(), &report()).unwrap();

    let loaded: QueryReport =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(loaded.datasets.len(), 2);
}

#[test]
fn test_plan_lists_parameters_then_query() {
    let report = report();
    let mut out = Vec::new();

    write_plan(
        &mut out,
        &serde_json::to_value(&report.parameters).unwrap(),
        &report.sparql,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let params = text.find("Parameters:").unwrap();
    let sparql = text.find("SPARQL:").unwrap();
    assert!(params < sparql);
    assert!(text.contains("\"archive_type\": \"Coral\""));
}
