// Skytap 客户端集成测试 (wiremock 模拟远端)
use std::time::Duration;

use serde_json::json;
use skytap_client::{
    AuditQuery, BitlyShortener, Credentials, NewUser, ReportOutcome, ScheduleRequest,
    ScheduleTarget, SkytapClient, SkytapConfig, SkytapError, UrlShortener, UsageQuery,
};
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 创建指向模拟服务器的客户端
fn test_client(server: &MockServer) -> SkytapClient {
    let config = SkytapConfig {
        poll_interval: Duration::from_millis(10),
        ..Default::default()
    };
    SkytapClient::new(&server.uri(), config).expect("Failed to create client")
}

// ==================== 请求约定 ====================

#[tokio::test]
async fn test_empty_body_returns_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.projects().delete("7").await.unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_request_failure_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/configurations/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such configuration"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.configurations().get("404").await.unwrap_err();

    assert!(err.is_request_failure());
    assert_eq!(err.status(), Some(404));

    let info = err.failure_info();
    assert_eq!(info.request_result_code, 404);
    assert_eq!(info.e_description, "Not Found");
    assert_eq!(info.e_message, "no such configuration");
    assert_eq!(info.method, "GET");
}

#[tokio::test]
async fn test_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header("Authorization", "Basic Zm9vOmJhcg=="))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "a"},
            {"id": "2", "name": "b"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    client.authorize(&Credentials::new("foo", "bar"));

    let projects = client.projects().list().await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, "1");
    assert_eq!(projects[1].id, "2");
}

#[tokio::test]
async fn test_unauthorized_client_sends_no_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.projects().list().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_unknown_fields_are_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/configurations/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5",
            "name": "env",
            "runstate": "busy",
            "region": "US-West"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let config = client.configurations().get("5").await.unwrap();
    assert!(config.is_busy());
    assert_eq!(config.extra["region"], "US-West");
}

// ==================== 标签 ====================

#[tokio::test]
async fn test_remove_all_tags_tolerates_item_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/configurations/c1/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "value": "a"},
            {"id": "t2", "value": "b"},
            {"id": "t3", "value": "c"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/configurations/c1/tags/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": "t1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/configurations/c1/tags/t2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/configurations/c1/tags/t3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": "t3"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client.tags().remove("c1", "all").await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Some(json!({"deleted": "t1"})));
    assert_eq!(results[1], None);
    assert_eq!(results[2], Some(json!({"deleted": "t3"})));
}

#[tokio::test]
async fn test_remove_single_tag_propagates_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/configurations/c1/tags/t9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.tags().remove("c1", "t9").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

// ==================== 发布集 ====================

#[tokio::test]
async fn test_update_access_grants_every_vm() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/configurations/c1/vms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "v1"}, {"id": 2}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/configurations/c1/publish_sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "p1"}])))
        .mount(&server)
        .await;

    let expected = json!({"vms": [
        {"vm_ref": format!("{}/vms/v1", server.uri()), "access": "run_and_use"},
        {"vm_ref": format!("{}/vms/2", server.uri()), "access": "run_and_use"}
    ]});
    Mock::given(method("PUT"))
        .and(path("/configurations/c1/publish_sets/p1"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client
        .publish_sets()
        .update_access("c1", "run_and_use")
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
}

// ==================== 报表 ====================

#[tokio::test]
async fn test_usage_report_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r1", "ready": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = client
        .reports()
        .get_usage(None, &UsageQuery::between("2024/01/01", "2024/02/01"))
        .await
        .unwrap();
    assert_eq!(outcome, ReportOutcome::Created(json!({"id": "r1", "ready": false})));
}

#[tokio::test]
async fn test_usage_report_pending_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r1", "ready": false})))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = UsageQuery::default();
    let first = client.reports().get_usage(Some("r1"), &query).await.unwrap();
    let second = client.reports().get_usage(Some("r1"), &query).await.unwrap();

    assert!(matches!(first, ReportOutcome::Pending(_)));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_usage_report_ready_returns_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r1", "ready": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/r1.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("user,hours\nalice,3\n"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let outcome = client
        .reports()
        .get_usage(Some("r1"), &UsageQuery::default())
        .await
        .unwrap();
    assert_eq!(outcome, ReportOutcome::Ready("user,hours\nalice,3\n".to_string()));
}

#[tokio::test]
async fn test_report_wait_polls_until_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auditing/exports/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ready": false})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auditing/exports/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ready": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auditing/exports/a1.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("csv"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let csv = client.reports().audit().wait("a1").await.unwrap();
    assert_eq!(csv, "csv");

    let polls = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/auditing/exports/a1")
        .count();
    assert_eq!(polls, 3);
}

#[tokio::test]
async fn test_audit_report_without_timestamps_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auditing/exports"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .reports()
        .get_audit_report(None, &AuditQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SkytapError::Config(_)));
}

// ==================== 短链接 ====================

#[tokio::test]
async fn test_bitly_shorten_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .and(header("Authorization", "Bearer tok"))
        .and(body_json(json!({"domain": "bit.ly", "long_url": "https://example.com/long"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"link": "https://bit.ly/abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let shortener = BitlyShortener::new(Some("tok".into()))
        .with_endpoint(format!("{}/v4/shorten", server.uri()));
    assert_eq!(
        shortener.shorten("https://example.com/long").await,
        "https://bit.ly/abc"
    );
}

#[tokio::test]
async fn test_bitly_failure_falls_back_to_long_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let shortener = BitlyShortener::new(Some("bad".into()))
        .with_endpoint(format!("{}/v4/shorten", server.uri()));
    assert_eq!(
        shortener.shorten("https://example.com/long").await,
        "https://example.com/long"
    );
}

#[tokio::test]
async fn test_bitly_missing_link_falls_back_to_long_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/shorten"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
        .mount(&server)
        .await;

    let shortener = BitlyShortener::new(Some("tok".into()))
        .with_endpoint(format!("{}/v4/shorten", server.uri()));
    assert_eq!(
        shortener.shorten("https://example.com/long").await,
        "https://example.com/long"
    );
}

// ==================== 其他资源 ====================

#[tokio::test]
async fn test_network_connect_creates_tunnel() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tunnels"))
        .and(body_json(json!({"source_network_id": "n1", "target_network_id": "n2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "tunnel-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let tunnel = client.networks().connect("n1", "n2").await.unwrap();
    assert_eq!(tunnel["id"], "tunnel-1");
}

#[tokio::test]
async fn test_create_user_with_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_partial_json(json!({
            "login_name": "jdoe",
            "account_role": "restricted_user",
            "region": "US-West",
            "time_zone": "Pacific Time (US & Canada)"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let user = NewUser::new("jdoe", "John", "Doe", "jdoe@example.com");
    client.users().create(&user).await.unwrap();
}

#[tokio::test]
async fn test_group_add_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups/g1/users/u1"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.groups().add_user("g1", "u1").await.unwrap().is_null());
}

#[tokio::test]
async fn test_schedule_create_for_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/schedules"))
        .and(body_partial_json(json!({
            "title": "nightly stop",
            "configuration_id": "c1",
            "start_at": "2024/01/01 18:00:00"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "s1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = ScheduleRequest::new(
        ScheduleTarget::Configuration("c1".into()),
        "nightly stop",
        vec![json!({"type": "suspend", "offset": 0})],
        "2024/01/01 18:00:00",
    );
    client.schedules().create(&req).await.unwrap();
}

#[tokio::test]
async fn test_unassigned_ips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"address": "1.1.1.1", "nics": [], "region": "US-West"},
            {"address": "2.2.2.2", "nics": [{"id": "n"}], "region": "US-West"}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let ips = client.ips().unassigned(Some("US-West")).await.unwrap();
    assert_eq!(ips.len(), 1);
    assert_eq!(ips[0]["address"], "1.1.1.1");
}
