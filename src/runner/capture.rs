//! Background pipe readers.
//!
//! Each child pipe is drained on its own thread into a shared buffer, so a
//! chatty child can never block on a full pipe while we wait for it, and
//! whatever was read so far is still available if the child gets killed.

use std::io::{self, Read};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const READ_CHUNK: usize = 8 * 1024;
const FINISH_POLL: Duration = Duration::from_millis(5);

/// Failure while draining a child pipe.
#[derive(Debug)]
pub enum CaptureError {
    Io(io::Error),
    Panicked,
}

/// A pipe being drained in the background.
pub struct PipeReader {
    buffer: Arc<Mutex<Vec<u8>>>,
    handle: JoinHandle<io::Result<()>>,
}

impl PipeReader {
    /// Start draining `source` on a new thread.
    pub fn spawn<R>(name: &str, mut source: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);

        let handle = thread::Builder::new()
            .name(format!("cmdcap-{}", name))
            .spawn(move || {
                let mut chunk = [0u8; READ_CHUNK];
                loop {
                    match source.read(&mut chunk) {
                        Ok(0) => return Ok(()),
                        Ok(n) => lock(&sink).extend_from_slice(&chunk[..n]),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    }
                }
            })?;

        Ok(Self { buffer, handle })
    }

    /// Wait for EOF and return everything that was read.
    pub fn finish(self) -> Result<Vec<u8>, CaptureError> {
        match self.handle.join() {
            Ok(Ok(())) => Ok(take(&self.buffer)),
            Ok(Err(e)) => Err(CaptureError::Io(e)),
            Err(_) => Err(CaptureError::Panicked),
        }
    }

    /// Wait until the reader reaches EOF or `deadline` passes. Returns true
    /// if it reached EOF.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        while !self.handle.is_finished() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(FINISH_POLL);
        }
        true
    }

    /// Give the reader until `deadline` to reach EOF, then return whatever
    /// was read. A reader still blocked after that is left detached.
    pub fn snapshot(self, deadline: Instant) -> Vec<u8> {
        self.wait_until(deadline);
        take(&self.buffer)
    }
}

fn lock(buffer: &Mutex<Vec<u8>>) -> MutexGuard<'_, Vec<u8>> {
    buffer.lock().unwrap_or_else(|poison| poison.into_inner())
}

fn take(buffer: &Mutex<Vec<u8>>) -> Vec<u8> {
    std::mem::take(&mut *lock(buffer))
}

/// Decode captured bytes, replacing invalid UTF-8.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
