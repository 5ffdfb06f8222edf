//! RFC 3977 Section 6.1.1 - GROUP

use super::support::{TestClient, fixture_source, gapped_source};

#[tokio::test]
async fn test_group_reports_count_and_bounds() {
    let mut client = TestClient::connect(fixture_source()).await;
    assert_eq!(client.command("GROUP junk").await, "211 2 7 8 junk");
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_empty_group_reports_zeros() {
    let mut client = TestClient::connect(fixture_source()).await;
    assert_eq!(client.command("GROUP control").await, "211 0 0 0 control");
    // Selected but empty: lookups find nothing.
    assert_eq!(
        client.command("ARTICLE 7").await,
        "423 No message with that number"
    );
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_group_bounds_with_gaps() {
    let mut client = TestClient::connect(gapped_source()).await;
    assert_eq!(client.command("GROUP alt.test").await, "211 5 3 11 alt.test");
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_unknown_group() {
    let mut client = TestClient::connect(fixture_source()).await;
    assert_eq!(client.command("GROUP missing").await, "411 No such group");
    // Nothing was selected.
    assert_eq!(
        client.command("XOVER 7").await,
        "412 No newsgroup currently selected"
    );
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_failed_group_keeps_previous_selection() {
    let mut client = TestClient::connect(fixture_source()).await;
    assert_eq!(client.command("GROUP junk").await, "211 2 7 8 junk");
    assert_eq!(client.command("GROUP missing").await, "411 No such group");
    assert_eq!(
        client.command("ARTICLE 7").await,
        "220 7 <7@news.example.com>"
    );
    client.read_block().await;
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_reselect_switches_group() {
    let mut client = TestClient::connect(fixture_source()).await;
    client.command("GROUP junk").await;
    client.command("GROUP control").await;
    assert_eq!(
        client.command("ARTICLE 8").await,
        "423 No message with that number"
    );
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_group_names_are_case_sensitive() {
    let mut client = TestClient::connect(fixture_source()).await;
    assert_eq!(client.command("GROUP JUNK").await, "411 No such group");
    assert!(client.finish().await.is_ok());
}
