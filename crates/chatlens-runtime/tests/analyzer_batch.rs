//! Batch analysis against a real workspace database.

use chatlens_runtime::{ChatLens, Error, NewAgent, SessionFilter, split_document};
use chatlens_testing::ConversationBuilder;
use serde_json::{Value, json};
use tempfile::TempDir;

fn workspace() -> (TempDir, ChatLens) {
    let temp_dir = TempDir::new().unwrap();
    let lens = ChatLens::open(temp_dir.path().join("data")).unwrap();
    lens.register_agent(NewAgent {
        id: Some("agent-1".to_string()),
        user_id: "user-1".to_string(),
        name: "Soporte".to_string(),
        model_name: "gpt-4".to_string(),
    })
    .unwrap();
    (temp_dir, lens)
}

fn happy(id: &str) -> Value {
    ConversationBuilder::new(id)
        .user("Hola, necesito ayuda con mi factura")
        .agent("Claro, ¿cuál es el número de factura?")
        .user("Es la 1234, muchas gracias")
        .agent("Listo, ya quedó corregida.")
        .user("Perfecto, gracias")
        .to_json()
}

#[test]
fn test_batch_continues_past_failures() {
    let (_tmp, lens) = workspace();
    let analyzer = lens.analyzer().unwrap();

    let input = json!([
        happy("c1"),
        { "conversation": { "_id": "c2", "userId": "user-1" } },
        ConversationBuilder::new("c3").user_id("stranger").user("hola").to_json(),
        "not an object",
        happy("c5"),
    ]);

    let report = analyzer.analyze_value(input).unwrap();

    let ids: Vec<_> = report.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c5"]);

    let failures: Vec<_> = report
        .failures
        .iter()
        .map(|f| (f.index, f.conversation_id.as_deref(), f.kind.as_str()))
        .collect();
    assert_eq!(
        failures,
        vec![
            (1, Some("c2"), "structural"),
            (2, Some("c3"), "lookup"),
            (3, None, "structural"),
        ]
    );
    assert!(report.failures[0].error.contains("messages"));
    assert!(!report.is_success());

    assert_eq!(lens.database().count_sessions().unwrap(), 2);
}

#[test]
fn test_stored_record_matches_returned_record() {
    let (_tmp, lens) = workspace();
    let analyzer = lens.analyzer().unwrap();

    let report = analyzer.analyze_value(happy("c1")).unwrap();
    assert!(report.is_success());
    let record = &report.records[0];

    assert_eq!(record.agent_data.agent_id, "agent-1");
    assert_eq!(record.agent_data.model_llm, "gpt-4");
    assert_eq!(record.message_count.total_count, 5);
    assert!(record.token_usage.prompt_tokens > 0);
    assert_eq!(record.token_usage.completion_tokens, 0);
    assert_eq!(
        record.token_usage.total_tokens,
        record.token_usage.prompt_tokens
    );
    assert!(record.token_usage.cost > 0.0);
    assert!(record.successful);
    assert_eq!(record.tags.last().map(String::as_str), Some("Successful"));

    assert_eq!(lens.session("c1").unwrap().as_ref(), Some(record));
}

#[test]
fn test_reanalyzing_a_conversation_is_a_store_failure() {
    let (_tmp, lens) = workspace();
    let analyzer = lens.analyzer().unwrap();

    analyzer.analyze_value(happy("c1")).unwrap();
    let report = analyzer.analyze_value(happy("c1")).unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.failures[0].kind, "collaborator");
    assert!(report.failures[0].error.contains("already exists"));
    assert_eq!(lens.database().count_sessions().unwrap(), 1);
}

#[test]
fn test_scalar_document_is_rejected_whole() {
    let (_tmp, lens) = workspace();
    let analyzer = lens.analyzer().unwrap();

    let err = analyzer.analyze_value(json!(42)).unwrap_err();
    assert!(matches!(err, Error::Engine(_)));

    let err = analyzer.analyze_reader("{ nope".as_bytes()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_split_documents_are_analyzed_item_by_item() {
    let (_tmp, lens) = workspace();
    let analyzer = lens.analyzer().unwrap();

    assert!(matches!(split_document(json!("x")), Err(Error::Engine(_))));
    assert_eq!(lens.database().count_sessions().unwrap(), 0);

    let items = split_document(json!([happy("c1"), { "messages": [] }])).unwrap();
    let report = analyzer.analyze_items(items);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(lens.database().count_sessions().unwrap(), 1);
}

#[test]
fn test_unpriced_model_fails_only_that_user() {
    let (_tmp, lens) = workspace();
    lens.register_agent(NewAgent {
        id: None,
        user_id: "user-2".to_string(),
        name: "Interno".to_string(),
        model_name: "in-house-llm".to_string(),
    })
    .unwrap();
    let analyzer = lens.analyzer().unwrap();

    let input = json!([
        ConversationBuilder::new("c1")
            .user_id("user-2")
            .user("hola")
            .agent("hola, ¿en qué te ayudo?")
            .to_json(),
        happy("c2"),
    ]);
    let report = analyzer.analyze_value(input).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].error.contains("in-house-llm"));
}

#[test]
fn test_export_and_stats_cover_stored_sessions() {
    let (_tmp, lens) = workspace();
    let analyzer = lens.analyzer().unwrap();
    analyzer
        .analyze_value(json!([happy("c1"), happy("c2")]))
        .unwrap();

    let mut csv = Vec::new();
    let rows = lens.export_csv(&SessionFilter::new(), &mut csv).unwrap();
    assert_eq!(rows, 2);
    assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 3);

    let stats = lens.stats(&SessionFilter::new().user("user-1")).unwrap();
    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.successful, 2);
    assert_eq!(stats.success_rate, Some(1.0));

    let none = lens.stats(&SessionFilter::new().user("nobody")).unwrap();
    assert_eq!(none.total_sessions, 0);
}
