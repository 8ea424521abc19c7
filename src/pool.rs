// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A fixed pool of scoped worker threads fed from a task queue.
//!
//! All the work is queued up front.  Each worker pulls one item at a
//! time off the queue, runs it, and pushes the answer down a result
//! channel; the calling thread drains that channel, handing each
//! answer to a sink the moment it arrives.  Nothing is shared between
//! workers except the two channels and a failure flag, so no locks are
//! needed.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam::channel;
use log::{debug, warn};

use crate::errors::{JuliaError, Result};

/// Run `work` over every item on `workers` threads, feeding each
/// result to `sink` on the calling thread in completion order.
/// Returns the number of results delivered, which on success is
/// always the number of items.
///
/// If any worker panics the whole batch fails with
/// `ComputationFailed`.  The other workers stop at their next task and
/// the sink sees nothing more; results it already took are the
/// caller's to throw away.
pub fn run<T, R, F, S>(items: Vec<T>, workers: usize, work: F, mut sink: S) -> Result<usize>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync,
    S: FnMut(R),
{
    if workers == 0 {
        return Err(JuliaError::InvalidConfiguration(
            "worker count must be positive".to_string(),
        ));
    }

    let expected = items.len();
    let (task_tx, task_rx) = channel::unbounded();
    for item in items {
        task_tx
            .send(item)
            .map_err(|_| JuliaError::ComputationFailed("task queue closed".to_string()))?;
    }
    drop(task_tx);

    // More threads than tasks would only sit idle.
    let threads = workers.min(expected).max(1);
    let (result_tx, result_rx) = channel::unbounded();
    let mut delivered = 0;
    let work = &work;
    let failed = AtomicBool::new(false);
    let failed = &failed;

    let outcome = crossbeam::scope(|spawner| {
        for id in 0..threads {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            spawner.spawn(move |_| {
                let _flag = FailureFlag(failed);
                let mut done = 0;
                for task in task_rx.iter() {
                    if failed.load(Ordering::SeqCst) {
                        debug!("worker {} abandoning the queue", id);
                        break;
                    }
                    if result_tx.send(work(task)).is_err() {
                        break;
                    }
                    done += 1;
                }
                debug!("worker {} finished after {} tasks", id, done);
            });
        }
        // Only the workers may hold senders, or the drain below never ends.
        drop(result_tx);

        for result in result_rx.iter() {
            if failed.load(Ordering::SeqCst) {
                break;
            }
            sink(result);
            delivered += 1;
        }
    });

    if let Err(payload) = outcome {
        let reason = panic_message(&*payload);
        warn!("worker died: {}", reason);
        return Err(JuliaError::ComputationFailed(format!(
            "worker terminated abnormally: {}",
            reason
        )));
    }

    if delivered != expected {
        return Err(JuliaError::ComputationFailed(format!(
            "{} of {} tasks returned a result",
            delivered, expected
        )));
    }

    Ok(delivered)
}

/// Raises the shared flag if its worker unwinds.
struct FailureFlag<'a>(&'a AtomicBool);

impl Drop for FailureFlag<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.store(true, Ordering::SeqCst);
        }
    }
}

/// A scope hands back one payload per panicked thread.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(payloads) = payload.downcast_ref::<Vec<Box<dyn Any + Send + 'static>>>() {
        let reasons: Vec<String> = payloads.iter().map(|p| panic_message(&**p)).collect();
        reasons.join("; ")
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
