//! Follow a growing file from its current end, like `tail -f`.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use super::WatchError;

/// Interval between checks for the log file to appear.
pub const EXISTENCE_POLL: Duration = Duration::from_millis(500);
/// Interval between reads once at end of file.
pub const READ_POLL: Duration = Duration::from_millis(200);

pub struct LogTail {
    path: PathBuf,
    reader: BufReader<File>,
    pending: Vec<u8>,
}

impl LogTail {
    /// Wait for `path` to exist, then position at its end.
    pub async fn open_at_end(path: &Path) -> Result<Self, WatchError> {
        let io_err = |source: std::io::Error| WatchError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut announced = false;
        while !tokio::fs::try_exists(path).await.map_err(io_err)? {
            if !announced {
                tracing::info!(path = %path.display(), "waiting for access log to appear");
                announced = true;
            }
            tokio::time::sleep(EXISTENCE_POLL).await;
        }

        let mut file = File::open(path).await.map_err(io_err)?;
        file.seek(SeekFrom::End(0)).await.map_err(io_err)?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            pending: Vec::new(),
        })
    }

    /// Next complete line, without its terminator. Partial lines are held back
    /// until the writer finishes them. Cancel safe: dropping the future loses no data.
    pub async fn next_line(&mut self) -> Result<String, WatchError> {
        loop {
            let buf = self.reader.fill_buf().await.map_err(|source| WatchError::Io {
                path: self.path.clone(),
                source,
            })?;
            if buf.is_empty() {
                tokio::time::sleep(READ_POLL).await;
                continue;
            }
            match buf.iter().position(|b| *b == b'\n') {
                Some(end) => {
                    self.pending.extend_from_slice(&buf[..end]);
                    self.reader.consume(end + 1);
                    let raw = std::mem::take(&mut self.pending);
                    let line = String::from_utf8_lossy(&raw);
                    return Ok(line.trim_end_matches('\r').to_string());
                }
                None => {
                    let len = buf.len();
                    self.pending.extend_from_slice(buf);
                    self.reader.consume(len);
                }
            }
        }
    }
}
