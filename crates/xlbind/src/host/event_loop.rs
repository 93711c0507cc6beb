//! Worker pool and completion delivery
//!
//! Work units run on the tokio blocking pool. Their completions are sent
//! back over a channel and run on whichever thread drives the
//! [`EventLoop`], which is the thread that owns the host runtime.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::Config;
use crate::error::{Error, Result};

type Completion = Box<dyn FnOnce() + Send>;

/// Cloneable handle used to queue work units
#[derive(Debug, Clone)]
pub struct WorkQueue {
    handle: Handle,
    tx: UnboundedSender<Completion>,
    in_flight: Arc<AtomicUsize>,
}

impl WorkQueue {
    /// Run `work` on the pool, then `complete` with its result on the loop thread
    pub fn queue<T, W, C>(&self, work: W, complete: C)
    where
        T: Send + 'static,
        W: FnOnce() -> Result<T> + Send + 'static,
        C: FnOnce(Result<T>) + Send + 'static,
    {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let tx = self.tx.clone();
        let in_flight = Arc::clone(&self.in_flight);

        let _task = self.handle.spawn_blocking(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(work))
                .unwrap_or_else(|_| Err(Error::Generic("worker panicked".to_string())));
            let completion: Completion = Box::new(move || {
                in_flight.fetch_sub(1, Ordering::SeqCst);
                complete(result);
            });
            if tx.send(completion).is_err() {
                tracing::warn!("event loop is gone, dropping completion");
            }
        });
    }
}

/// Owner of the worker pool and the completion channel
#[derive(Debug)]
pub struct EventLoop {
    runtime: Runtime,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
    in_flight: Arc<AtomicUsize>,
}

impl EventLoop {
    pub fn new(config: &Config) -> Result<Self> {
        let threads = config.worker_threads.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(threads)
            .thread_name(config.thread_name.clone())
            .build()
            .map_err(|e| Error::Generic(format!("failed to start worker pool: {e}")))?;
        let (tx, rx) = mpsc::unbounded_channel();
        tracing::debug!("worker pool started with {threads} threads");
        Ok(Self {
            runtime,
            tx,
            rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Queue handle sharing this loop's pool, channel and in-flight count
    pub fn queue(&self) -> WorkQueue {
        WorkQueue {
            handle: self.runtime.handle().clone(),
            tx: self.tx.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    /// Run completions that are already waiting, without blocking
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(completion) = self.rx.try_recv() {
            completion();
            ran += 1;
        }
        ran
    }

    /// Block until every queued work unit has completed and run its completion
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = self.run_pending();
        while self.in_flight.load(Ordering::SeqCst) > 0 {
            match self.rx.blocking_recv() {
                Some(completion) => {
                    completion();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[test]
    fn test_completion_runs_on_loop_thread() {
        let mut event_loop = EventLoop::new(&Config::default()).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let loop_thread = std::thread::current().id();

        for i in 0..4 {
            let seen = Arc::clone(&seen);
            event_loop.queue().queue(
                move || Ok(i * 2),
                move |result| {
                    assert_eq!(std::thread::current().id(), loop_thread);
                    seen.lock().unwrap().push(result.unwrap());
                },
            );
        }

        assert_eq!(event_loop.run_until_idle(), 4);
        assert_eq!(event_loop.in_flight.load(Ordering::SeqCst), 0);
        let mut values = seen.lock().unwrap().clone();
        values.sort_unstable();
        assert_eq!(values, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_panicking_work_still_completes() {
        let mut event_loop = EventLoop::new(&Config::default()).unwrap();
        let outcome = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&outcome);
        event_loop.queue().queue(
            || -> Result<()> { panic!("boom") },
            move |result| *slot.lock().unwrap() = Some(result),
        );

        event_loop.run_until_idle();
        assert_eq!(
            outcome.lock().unwrap().clone(),
            Some(Err(Error::Generic("worker panicked".into())))
        );
    }
}
