//! Connection loop and TCP listener
//!
//! Each accepted connection gets its own task running [`serve_connection`].
//! Sessions share nothing but the read-only news source, and each one can be
//! cancelled on its own through a child [`CancellationToken`].

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, BufReader};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, trace, warn};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::response::{Reply, codes};
use crate::session::{Flow, Session};
use crate::source::NewsSource;

/// Longest accepted command line, terminator included (RFC 3977 Section 3.1)
pub const MAX_LINE_LENGTH: usize = 512;

/// Run one NNTP session over a reader/writer pair
///
/// Sends the greeting, then reads one line at a time, dispatches it and
/// writes the reply before reading again. Returns when the client hangs up,
/// sends QUIT, closes the stream, sends a line longer than
/// [`MAX_LINE_LENGTH`], or `cancel` fires. Transport errors end the session
/// and are returned; protocol errors are logged and skipped.
pub async fn serve_connection<R, W>(
    reader: R,
    mut writer: W,
    mut session: Session,
    cancel: CancellationToken,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut reply = Reply::new();

    session.banner(&mut reply);
    write_reply(&mut reply, &mut writer, &cancel).await?;

    let mut line_bytes = Vec::with_capacity(MAX_LINE_LENGTH);
    loop {
        line_bytes.clear();
        let mut limited = (&mut reader).take(MAX_LINE_LENGTH as u64);
        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("session cancelled while waiting for a command");
                return Ok(());
            }
            read = limited.read_until(b'\n', &mut line_bytes) => read?,
        };

        if read == 0 {
            debug!("client closed the connection");
            return Ok(());
        }

        if line_bytes.len() == MAX_LINE_LENGTH && !line_bytes.ends_with(b"\n") {
            warn!(limit = MAX_LINE_LENGTH, "command line too long, closing session");
            reply.status(codes::COMMAND_SYNTAX_ERROR, "Line too long");
            write_reply(&mut reply, &mut writer, &cancel).await?;
            return Ok(());
        }

        let line = String::from_utf8_lossy(&line_bytes);
        let line = line.trim_end_matches(['\r', '\n']);
        trace!("Received: {}", line);

        let flow = match session.dispatch(line, &mut reply) {
            Ok(flow) => flow,
            Err(err) if err.is_transport() => return Err(err),
            Err(err) => {
                warn!(error = %err, group = ?session.selected_group(), "command failed");
                Flow::Continue
            }
        };

        write_reply(&mut reply, &mut writer, &cancel).await?;

        if flow == Flow::Close {
            debug!("closing session");
            return Ok(());
        }
    }
}

async fn write_reply<W>(reply: &mut Reply, writer: &mut W, cancel: &CancellationToken) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("session cancelled while writing a reply");
            reply.clear();
            Ok(())
        }
        written = reply.write_to(writer) => Ok(written?),
    }
}

/// NNTP listener serving one [`NewsSource`]
pub struct NntpServer {
    listener: TcpListener,
    domain: Arc<str>,
    source: Arc<dyn NewsSource>,
}

impl NntpServer {
    /// Bind to the configured address and port
    pub async fn bind(config: &ServerConfig, source: Arc<dyn NewsSource>) -> Result<Self> {
        let listener = TcpListener::bind((config.listen, config.port)).await?;
        Ok(Self::from_listener(listener, &config.domain, source))
    }

    /// Serve on an already bound listener
    pub fn from_listener(
        listener: TcpListener,
        domain: &str,
        source: Arc<dyn NewsSource>,
    ) -> Self {
        Self {
            listener,
            domain: Arc::from(domain),
            source,
        }
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` is cancelled
    ///
    /// Cancelling `shutdown` also cancels every running session.
    pub async fn serve(self, shutdown: CancellationToken) -> Result<()> {
        let addr = self.local_addr()?;
        info!(%addr, domain = %self.domain, "listening");

        loop {
            let (stream, peer) = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        error!(error = %err, "accept failed");
                        continue;
                    }
                },
            };

            let session = Session::new(Arc::clone(&self.domain), Arc::clone(&self.source));
            let cancel = shutdown.child_token();
            let span = info_span!("session", %peer);

            tokio::spawn(
                async move {
                    info!("connection accepted");
                    let (reader, writer) = stream.into_split();
                    match serve_connection(reader, writer, session, cancel).await {
                        Ok(()) => info!("connection closed"),
                        Err(err) => error!(error = %err, "session ended"),
                    }
                }
                .instrument(span),
            );
        }

        info!("listener shut down");
        Ok(())
    }
}
