use crate::mock_server::MockServerFixture;
use call_helper_client::analytics::AnalyticsClient;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_dashboard_fetches_all_three() {
    let mut fixture = MockServerFixture::new().await;
    let stats = fixture
        .server
        .mock("GET", "/api/analytics/stats")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total_queries": 10,
                "today_queries": 2,
                "week_queries": 6,
                "month_queries": 10,
                "success_rate": 70.0,
                "avg_response_time_ms": 12.5,
                "user_type_breakdown": [{"_id": "umrah", "count": 10}]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let popular = fixture
        .server
        .mock("GET", "/api/analytics/popular")
        .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"query":"login fails","count":4}]"#)
        .create_async()
        .await;
    let recent = fixture
        .server
        .mock("GET", "/api/analytics/recent")
        .match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"timestamp":"Mon, 19 Oct 2026 09:00:00 GMT","user_type":"umrah","query":"login fails","success":true,"matched_case_id":"U-7","response_time_ms":8.1}]"#,
        )
        .create_async()
        .await;

    let snapshot = AnalyticsClient::new(fixture.client())
        .dashboard()
        .await
        .unwrap();

    stats.assert_async().await;
    popular.assert_async().await;
    recent.assert_async().await;
    assert_eq!(snapshot.stats.successful_queries(), 7);
    assert_eq!(snapshot.popular[0].count, 4);
    assert_eq!(snapshot.recent[0].matched_case_id.as_deref(), Some("U-7"));
}

#[tokio::test]
async fn test_trends_and_hourly() {
    let mut fixture = MockServerFixture::new().await;
    let _trends = fixture
        .server
        .mock("GET", "/api/analytics/trends")
        .match_query(Matcher::UrlEncoded("days".into(), "7".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"date":"2026-10-18","total":5,"successful":4}]"#)
        .create_async()
        .await;
    let _hourly = fixture
        .mock_get("/api/analytics/hourly", 200, r#"[{"hour":0,"count":0},{"hour":9,"count":3}]"#)
        .await;

    let client = AnalyticsClient::new(fixture.client());
    let trends = client.trends(7).await.unwrap();
    assert_eq!(trends[0].successful, 4);
    let hourly = client.hourly().await.unwrap();
    assert_eq!(hourly.len(), 2);
    assert_eq!(hourly[1].hour, 9);
}

#[tokio::test]
async fn test_stats_failure_fails_dashboard() {
    let mut fixture = MockServerFixture::new().await;
    let _stats = fixture
        .mock_get("/api/analytics/stats", 500, r#"{"error":"mongo unavailable"}"#)
        .await;
    let _popular = fixture
        .server
        .mock("GET", "/api/analytics/popular")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let _recent = fixture
        .server
        .mock("GET", "/api/analytics/recent")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let err = AnalyticsClient::new(fixture.client())
        .dashboard()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.api().unwrap().message, "mongo unavailable");
}
