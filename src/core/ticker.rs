//! Periodic tick with an explicit start/cancel contract.
//!
//! The callback runs on a background thread: once immediately, then once
//! per period until it returns [`TickControl::Stop`] or the handle is
//! cancelled. Dropping a [`TickHandle`] cancels it and joins the thread,
//! so a tick can never outlive its owner.

use std::any::Any;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

pub struct TickHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Stop ticking and wait for the worker to exit.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    /// Block until the callback itself returns `Stop`. A panic inside the
    /// callback comes back as [`AppError::TickPanicked`].
    pub fn wait(mut self) -> AppResult<()> {
        match self.thread.take() {
            Some(t) => t
                .join()
                .map_err(|payload| AppError::TickPanicked(panic_message(payload.as_ref()))),
            None => Ok(()),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    fn shutdown(&mut self) {
        // closing the channel wakes the worker out of recv_timeout
        drop(self.stop.take());
        if let Some(t) = self.thread.take()
            && let Err(payload) = t.join()
        {
            tracing::error!(panic = %panic_message(payload.as_ref()), "tick callback panicked");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start ticking every `period`. The callback receives the tick number,
/// starting at 0.
pub fn spawn<F>(period: Duration, mut on_tick: F) -> TickHandle
where
    F: FnMut(u64) -> TickControl + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<()>();

    let thread = thread::spawn(move || {
        let mut n = 0_u64;
        loop {
            if on_tick(n) == TickControl::Stop {
                break;
            }
            n += 1;
            match rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::trace!(ticks = n, "ticker stopped");
    });

    TickHandle {
        stop: Some(tx),
        thread: Some(thread),
    }
}

/// Owner of at most one running tick.
#[derive(Default)]
pub struct TimerView {
    handle: Option<TickHandle>,
}

impl TimerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tick, cancelling the one already running.
    pub fn start<F>(&mut self, period: Duration, on_tick: F)
    where
        F: FnMut(u64) -> TickControl + Send + 'static,
    {
        if let Some(previous) = self.handle.take() {
            previous.cancel();
        }
        self.handle = Some(spawn(period, on_tick));
    }

    pub fn stop(&mut self) {
        if let Some(h) = self.handle.take() {
            h.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Block until the running tick stops on its own.
    pub fn wait(&mut self) -> AppResult<()> {
        match self.handle.take() {
            Some(h) => h.wait(),
            None => Ok(()),
        }
    }
}
