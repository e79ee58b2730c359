/// Basic integration tests
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mood_journal_mcp::mcp::protocol::error_codes;
use mood_journal_mcp::*;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn noon(day: NaiveDate) -> DateTime<Utc> {
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn server_at(path: &std::path::Path) -> McpServer {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(noon(today())));
        let storage = SqliteStorage::new(path.to_path_buf()).expect("Failed to create storage");
        let analyzer = MoodAnalyzer::heuristic_only(Arc::clone(&clock));
        McpServer::new(JournalServer::with_parts(storage, analyzer, clock, UserId::new("tester")))
    }

    async fn call(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        let response = server
            .handle_line(&request.to_string())
            .await
            .expect("tools/call must be answered");
        assert!(response.error.is_none(), "{:?}", response.error);
        response.result.unwrap()
    }

    fn text_of(result: &Value) -> &str {
        result["content"][0]["text"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_handshake_and_tool_listing() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = server_at(temp_file.path());

        let init = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test","version":"1.0"}}}"#)
            .await
            .unwrap();
        let result = init.result.unwrap();
        assert_eq!(result["protocolVersion"], json!("2024-11-05"));
        assert_eq!(result["serverInfo"]["name"], json!("Mood Journal MCP"));

        let ack = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(ack.is_none());
        assert!(server.is_initialized());

        let list = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();
        let tools = list.result.unwrap()["tools"].as_array().unwrap().clone();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert!(names.contains(&"journal_create"));
        assert!(names.contains(&"journal_stats"));
        assert!(names.contains(&"profile_update"));
    }

    #[tokio::test]
    async fn test_journal_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = server_at(temp_file.path());

        let created = call(
            &mut server,
            1,
            "journal_create",
            json!({ "text": "Spent a wonderful afternoon with friends, I feel grateful.", "date": "2024-06-14" }),
        )
        .await;
        assert_eq!(created["isError"], json!(false));
        assert!(text_of(&created).contains("Journal entry saved"));

        let created = call(
            &mut server,
            2,
            "journal_create",
            json!({ "text": "A calm and peaceful morning walk by the lake." }),
        )
        .await;
        assert!(text_of(&created).contains("Streak: 2 days"));

        let listed = call(&mut server, 3, "journal_list", json!({ "limit": 1 })).await;
        assert!(text_of(&listed).contains("page 1 of 2, 2 total"));

        let stats = call(&mut server, 4, "journal_stats", json!({ "range": "week" })).await;
        let text = text_of(&stats);
        assert!(text.contains("\"totalEntries\": 2"));
        assert!(text.contains("\"currentStreak\": 2"));

        let export = call(&mut server, 5, "journal_export", json!({})).await;
        let body: Value = serde_json::from_str(text_of(&export)).unwrap();
        assert_eq!(body["count"], json!(2));
        assert_eq!(body["entries"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_tool_errors_are_reported_in_result() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = server_at(temp_file.path());

        let short = call(&mut server, 1, "journal_create", json!({ "text": "meh" })).await;
        assert_eq!(short["isError"], json!(true));
        assert!(text_of(&short).contains("at least 10 characters"));

        let unknown = call(&mut server, 2, "journal_burn", json!({})).await;
        assert_eq!(unknown["isError"], json!(true));
        assert!(text_of(&unknown).contains("Unknown tool"));

        let bad_range = call(&mut server, 3, "journal_stats", json!({ "range": "decade" })).await;
        assert_eq!(bad_range["isError"], json!(true));

        let missing = call(&mut server, 4, "journal_get", json!({})).await;
        assert_eq!(missing["isError"], json!(true));
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let mut server = server_at(temp_file.path());

        let parse = server.handle_line("{not json").await.unwrap();
        assert_eq!(parse.error.unwrap().code, error_codes::PARSE_ERROR);

        let method = server
            .handle_line(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(method.id, json!(7));
        assert_eq!(method.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

        assert!(server.handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");

        {
            let mut server = server_at(temp_file.path());
            call(
                &mut server,
                1,
                "journal_create",
                json!({ "text": "First entry that should survive a restart." }),
            )
            .await;
            call(&mut server, 2, "profile_update", json!({ "name": "Sam", "daily_reminder": "08:30" })).await;
        }

        let storage = SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to reopen storage");
        let user = UserId::new("tester");
        let entries = storage.find_all_entries_by_user(&user).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "First entry that should survive a restart.");

        let stats = storage.get_user_stats(&user).unwrap();
        assert_eq!(stats.total_entries, 1);

        let profile = storage.get_profile(&user).unwrap().unwrap();
        assert_eq!(profile.name, "Sam");
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf()).expect("Failed to create storage");

        let _: &dyn JournalStorage = &storage;
        assert!(storage.list_profiles().unwrap().is_empty());
    }
}
