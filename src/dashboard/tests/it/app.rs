use serde_json::json;
use wiremock::ResponseTemplate;

use crate::helper::TestHelper;

#[tokio::test]
async fn test_refresh_then_click_selects_vessel() {
    let helper = TestHelper::new().await;
    helper.mock_scenario().await;

    let output = helper.run("refresh\nclick 512 384\n").await;

    assert_eq!(output[0], "refresh applied 2");
    assert!(output.contains(&"selected 111 ALPHA".to_string()));
}

#[tokio::test]
async fn test_click_before_refresh_selects_nothing() {
    let helper = TestHelper::new().await;
    helper.mock_scenario().await;

    let output = helper.run("click 512 384\nquit\nrefresh\n").await;

    assert!(output.is_empty());
}

#[tokio::test]
async fn test_backend_failure_is_reported_not_fatal() {
    let helper = TestHelper::new().await;
    helper
        .respond("/api/vessels/in-park", ResponseTemplate::new(503))
        .await;
    helper
        .respond("/api/park-boundaries", ResponseTemplate::new(503))
        .await;
    helper
        .respond("/api/health", ResponseTemplate::new(503))
        .await;

    let output = helper.run("refresh\nhealth\n").await;

    assert_eq!(output, vec!["refresh failed bad_status", "health unavailable"]);
}

#[tokio::test]
async fn test_health_and_search() {
    let helper = TestHelper::new().await;
    helper.respond("/api/health", ResponseTemplate::new(200)).await;
    helper
        .respond_json(
            "/api/vessels",
            json!({ "vessels": [{ "mmsi": "333" }, { "mmsi": "444" }] }),
        )
        .await;

    let output = helper.run("health\nsearch name=DELTA max=2\n").await;

    assert_eq!(output, vec!["health ok", "found 2 333 444"]);
}

#[tokio::test]
async fn test_invalid_commands_are_answered_with_errors() {
    let helper = TestHelper::new().await;

    let output = helper.run("fly 1 2\nclick 1\n\n").await;

    assert_eq!(output.len(), 2);
    assert!(output.iter().all(|l| l.starts_with("error ")));
}
