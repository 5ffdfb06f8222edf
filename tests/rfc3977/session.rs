//! Session lifecycle: selection state, hang-up, stream end, cancellation,
//! transport failure

use std::sync::Arc;
use std::time::Duration;

use nntpub::{Session, serve_connection};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use super::support::{DOMAIN, TestClient, fixture_source};

#[tokio::test]
async fn test_reference_scenario() {
    let mut client = TestClient::connect(fixture_source()).await;

    assert_eq!(client.command("GROUP junk").await, "211 2 7 8 junk");

    assert_eq!(
        client.command("XOVER 7-8").await,
        "224 Overview information follows"
    );
    let rows = client.read_block().await;
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("7\t"));
    assert!(rows[1].starts_with("8\t"));

    assert_eq!(
        client.command("ARTICLE 8").await,
        "220 8 <8@news.example.com>"
    );
    let article = client.read_block().await;
    assert!(article.contains(&"Subject: fii".to_string()));

    assert_eq!(client.command("GROUP missing").await, "411 No such group");

    assert_eq!(
        client.command("ARTICLE 7").await,
        "220 7 <7@news.example.com>"
    );
    client.read_block().await;

    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_empty_line_hangs_up() {
    let mut client = TestClient::connect(fixture_source()).await;
    client.send("").await;
    assert!(client.is_closed().await);
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_bare_lf_terminator_accepted() {
    let mut client = TestClient::connect(fixture_source()).await;
    client.send("GROUP junk\n").await;
    // "GROUP junk\n\r\n": the command, then an empty line that hangs up.
    assert_eq!(client.read_line().await, "211 2 7 8 junk");
    assert!(client.is_closed().await);
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_stream_end_finishes_cleanly() {
    let mut client = TestClient::connect(fixture_source()).await;
    client.command("GROUP junk").await;
    assert!(client.finish().await.is_ok());
}

#[tokio::test]
async fn test_cancel_while_idle() {
    let mut client = TestClient::connect(fixture_source()).await;
    client.command("GROUP junk").await;
    client.cancel.cancel();
    assert!(client.is_closed().await);
    let result = tokio::time::timeout(Duration::from_secs(5), &mut client.task)
        .await
        .expect("session did not stop")
        .expect("session task panicked");
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let mut first = TestClient::connect(fixture_source()).await;
    let mut second = TestClient::connect(fixture_source()).await;

    first.command("GROUP junk").await;
    assert_eq!(
        second.command("ARTICLE 7").await,
        "412 No newsgroup currently selected"
    );
    assert!(first.command("ARTICLE 7").await.starts_with("220 "));
    first.read_block().await;

    first.cancel.cancel();
    assert!(first.is_closed().await);
    assert_eq!(second.command("GROUP junk").await, "211 2 7 8 junk");
    assert!(second.finish().await.is_ok());
}

#[tokio::test]
async fn test_write_failure_ends_session_with_transport_error() {
    let (client_side, server_side) = tokio::io::duplex(64 * 1024);
    let (server_reader, server_writer) = tokio::io::split(server_side);
    let session = Session::new(Arc::from(DOMAIN), Arc::new(fixture_source()));
    let task = tokio::spawn(serve_connection(
        server_reader,
        server_writer,
        session,
        CancellationToken::new(),
    ));

    let mut client = BufReader::new(client_side);
    let mut banner = String::new();
    client.read_line(&mut banner).await.expect("banner");
    assert_eq!(banner, format!("201 {DOMAIN} NNTPub\r\n"));

    // The command is buffered before the client goes away, so the session
    // reads it and then fails writing the reply.
    client.get_mut().write_all(b"LIST\r\n").await.expect("send");
    drop(client);

    let err = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("session did not stop")
        .expect("session task panicked")
        .expect_err("write to a closed peer should fail");
    assert!(err.is_transport());

    let mut other = TestClient::connect(fixture_source()).await;
    assert_eq!(other.command("GROUP junk").await, "211 2 7 8 junk");
    assert!(other.finish().await.is_ok());
}
