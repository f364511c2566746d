//! A scripted in-memory [`ByteSource`] for tests.

use std::collections::VecDeque;
use std::io;

use tokio::sync::oneshot;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::connection::ByteSource;

#[derive(Debug)]
pub(crate) enum Step {
    Data(Vec<u8>),
    Error(io::ErrorKind),
    Pending,
}

/// Replays `steps`, one per read, then reports EOF.
///
/// A `Data` step larger than the read buffer is split, the rest served by the next read.
/// Every requested buffer length is recorded.
#[derive(Debug)]
pub(crate) struct ScriptedSource {
    steps: VecDeque<Step>,
    requested: Vec<usize>,
    close_result: Option<io::ErrorKind>,
    on_close: Option<oneshot::Sender<()>>,
}

impl ScriptedSource {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        Self { steps: steps.into(), requested: Vec::new(), close_result: None, on_close: None }
    }

    pub(crate) fn whole(bytes: &[u8]) -> Self {
        Self::new(vec![Step::Data(bytes.to_vec())])
    }

    pub(crate) fn chunked(bytes: &[u8], chunk_size: usize) -> Self {
        Self::new(bytes.chunks(chunk_size).map(|chunk| Step::Data(chunk.to_vec())).collect())
    }

    pub(crate) fn notify_close(mut self, sender: oneshot::Sender<()>) -> Self {
        self.on_close = Some(sender);
        self
    }

    pub(crate) fn fail_close(mut self, kind: io::ErrorKind) -> Self {
        self.close_result = Some(kind);
        self
    }

    pub(crate) fn requested(&self) -> &[usize] {
        &self.requested
    }
}

impl ByteSource for ScriptedSource {
    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.requested.push(buf.len());

        match self.steps.pop_front() {
            None => Ok(0),
            Some(Step::Data(mut data)) => {
                let len = buf.len().min(data.len());
                buf[..len].copy_from_slice(&data[..len]);
                if len < data.len() {
                    self.steps.push_front(Step::Data(data.split_off(len)));
                }
                Ok(len)
            }
            Some(Step::Error(kind)) => Err(io::Error::new(kind, "scripted read failure")),
            Some(Step::Pending) => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> io::Result<()> {
        if let Some(sender) = self.on_close.take() {
            let _ = sender.send(());
        }

        match self.close_result {
            Some(kind) => Err(io::Error::new(kind, "scripted close failure")),
            None => Ok(()),
        }
    }
}

/// Encodes `fields` as one SCGI header frame.
pub(crate) fn encode_frame(fields: &[(&str, &str)]) -> Vec<u8> {
    let mut block = Vec::new();
    for (key, value) in fields {
        block.extend_from_slice(key.as_bytes());
        block.push(0);
        block.extend_from_slice(value.as_bytes());
        block.push(0);
    }

    let mut frame = format!("{}:", block.len()).into_bytes();
    frame.extend_from_slice(&block);
    frame.push(b',');
    frame
}

/// Routes log output of the running tests through the test harness.
pub(crate) fn init_tracing() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).with_test_writer().finish();
    // another test may have installed it already
    let _ = tracing::subscriber::set_global_default(subscriber);
}
