//! Duplex-stream client used by the protocol tests

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use nntpub::{Article, MemoryGroup, MemorySource, NewsSource, Session, serve_connection};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DOMAIN: &str = "news.example.com";

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// `control` (empty) and `junk` with articles 7 and 8
pub fn fixture_source() -> MemorySource {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    MemorySource::new()
        .with_group(MemoryGroup::new("control", "News server internal group"))
        .with_group(
            MemoryGroup::new("junk", "News server internal group")
                .with_article(Article::with_date(
                    7,
                    "foo",
                    "fromguy",
                    "test msg 1\r\nyo!",
                    created,
                ))
                .with_article(Article::with_date(
                    8,
                    "fii",
                    "fromotherguy",
                    "test msg 2\r\nhello!",
                    created,
                )),
        )
}

/// `alt.test` with gaps: 3, 5, 6, 10, 11
pub fn gapped_source() -> MemorySource {
    let mut group = MemoryGroup::new("alt.test", "Testing");
    for id in [3, 5, 6, 10, 11] {
        group
            .insert(Article::new(
                id,
                format!("subject {id}"),
                "tester",
                format!("body of {id}"),
            ))
            .unwrap();
    }
    MemorySource::new().with_group(group)
}

pub struct TestClient {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
    pub cancel: CancellationToken,
    pub task: JoinHandle<nntpub::Result<()>>,
}

impl TestClient {
    /// Start a session over `source` and consume the greeting
    pub async fn connect(source: impl NewsSource + 'static) -> Self {
        let mut client = Self::connect_raw(source);
        let banner = client.read_line().await;
        assert_eq!(banner, format!("201 {DOMAIN} NNTPub"));
        client
    }

    /// Start a session without reading anything
    pub fn connect_raw(source: impl NewsSource + 'static) -> Self {
        let (client_side, server_side) = tokio::io::duplex(64 * 1024);
        let (server_reader, server_writer) = tokio::io::split(server_side);
        let (client_reader, client_writer) = tokio::io::split(client_side);

        let source: Arc<dyn NewsSource> = Arc::new(source);
        let session = Session::new(Arc::from(DOMAIN), source);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(serve_connection(
            server_reader,
            server_writer,
            session,
            cancel.clone(),
        ));

        Self {
            reader: BufReader::new(client_reader),
            writer: client_writer,
            cancel,
            task,
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{line}\r\n").as_bytes())
            .await
            .expect("send");
    }

    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.expect("send");
    }

    /// Read one line; panics unless it ends in CRLF
    pub async fn read_line(&mut self) -> String {
        let mut line = String::new();
        let n = tokio::time::timeout(IO_TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("timed out waiting for a line")
            .expect("read");
        assert!(n > 0, "connection closed while waiting for a line");
        line.strip_suffix("\r\n")
            .unwrap_or_else(|| panic!("line not CRLF terminated: {line:?}"))
            .to_string()
    }

    /// Read block lines up to (not including) the `.` terminator
    pub async fn read_block(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await;
            if line == "." {
                return lines;
            }
            lines.push(line);
        }
    }

    /// Send a command and return its status line
    pub async fn command(&mut self, line: &str) -> String {
        self.send(line).await;
        self.read_line().await
    }

    /// Whether the server side has closed the stream
    pub async fn is_closed(&mut self) -> bool {
        let mut buf = String::new();
        let n = tokio::time::timeout(IO_TIMEOUT, self.reader.read_line(&mut buf))
            .await
            .expect("timed out waiting for close")
            .expect("read");
        n == 0
    }

    /// Close our write side and wait for the session to finish
    pub async fn finish(mut self) -> nntpub::Result<()> {
        self.writer.shutdown().await.expect("shutdown");
        tokio::time::timeout(IO_TIMEOUT, self.task)
            .await
            .expect("session did not finish")
            .expect("session task panicked")
    }
}
