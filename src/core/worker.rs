//! Fixed-size pool of threads draining the dispatch queue

use super::error::{LoggerError, Result};
use super::log_record::LogRecord;
use crossbeam_channel::Receiver;
use std::any::Any;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default number of workers per file sink
pub const DEFAULT_WORKER_COUNT: usize = 5;

pub struct WorkerPool {
    handles: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `count` workers named `<name>-worker-<n>`.
    ///
    /// Each worker blocks on `receiver` and calls `handler` for every record
    /// it dequeues. Workers exit once the queue is closed and empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to start a thread. Workers that did
    /// start exit on their own once the queue's sender is dropped.
    pub fn spawn<F>(count: usize, name: &str, receiver: Receiver<LogRecord>, handler: F) -> Result<Self>
    where
        F: Fn(&LogRecord) + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let mut handles = Vec::with_capacity(count);

        for idx in 0..count {
            let receiver = receiver.clone();
            let handler = Arc::clone(&handler);
            let handle = thread::Builder::new()
                .name(format!("{}-worker-{}", name, idx))
                .spawn(move || Self::run(idx, receiver, handler))
                .map_err(|e| {
                    LoggerError::io_operation(
                        "spawning log worker",
                        format!("worker #{} of {}", idx, count),
                        e,
                    )
                })?;
            handles.push(handle);
        }

        Ok(Self { handles })
    }

    fn run<F>(idx: usize, receiver: Receiver<LogRecord>, handler: Arc<F>)
    where
        F: Fn(&LogRecord),
    {
        // recv blocks while the queue is empty and fails once it is closed
        // and drained
        for record in receiver.iter() {
            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| (*handler)(&record)));
            if let Err(panic_info) = result {
                eprintln!(
                    "[LOGGER CRITICAL] Log worker #{} panicked: {}. Worker continues.",
                    idx,
                    panic_message(&*panic_info)
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait up to `timeout` for every worker to exit.
    ///
    /// Only meaningful after the queue has been closed. Returns `false` if
    /// some worker was still running when the timeout expired; those threads
    /// are detached.
    pub fn join(self, timeout: Duration) -> bool {
        let start = Instant::now();
        let mut pending = self.handles;

        loop {
            let (finished, running): (Vec<_>, Vec<_>) =
                pending.into_iter().partition(|handle| handle.is_finished());

            for handle in finished {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Log worker panicked during shutdown: {}",
                        panic_message(&*e)
                    );
                }
            }

            if running.is_empty() {
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] {} log worker(s) did not finish within {:?} timeout. \
                     Some logs may be lost.",
                    running.len(),
                    timeout
                );
                return false;
            }

            pending = running;
            thread::sleep(Duration::from_millis(10));
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
