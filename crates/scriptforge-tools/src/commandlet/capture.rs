//! Bounded accumulation of child process output

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::warn;

/// One capped output stream. Once the ceiling is reached the truncation
/// flag is set and further bytes are dropped; the reader keeps draining so
/// the child never blocks on a full pipe.
#[derive(Debug)]
pub(crate) struct CappedBuffer {
    data: Vec<u8>,
    limit: usize,
    truncated: bool,
}

impl CappedBuffer {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            data: Vec::new(),
            limit,
            truncated: false,
        }
    }

    pub(crate) fn push(&mut self, chunk: &[u8]) {
        if self.truncated {
            return;
        }
        let remaining = self.limit - self.data.len();
        if chunk.len() <= remaining {
            self.data.extend_from_slice(chunk);
        } else {
            self.data.extend_from_slice(&chunk[..remaining]);
            self.truncated = true;
        }
    }

    /// Rendered stream content; the marker is appended exactly once, and
    /// only when data was actually dropped.
    pub(crate) fn render(&self, marker: &str) -> (String, bool) {
        let mut text = String::from_utf8_lossy(&self.data).into_owned();
        if self.truncated {
            text.push_str(marker);
        }
        (text, self.truncated)
    }
}

/// Drain `stream` to EOF into `buffer`
pub(crate) async fn drain<R>(stream: Option<R>, buffer: Arc<Mutex<CappedBuffer>>)
where
    R: AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return;
    };

    let mut chunk = [0u8; 8192];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buffer.lock().push(&chunk[..n]),
            Err(e) => {
                warn!("Error draining commandlet output: {}", e);
                break;
            }
        }
    }
}
