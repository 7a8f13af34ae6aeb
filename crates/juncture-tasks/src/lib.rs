//! # Background work tied to activations
//!
//! [`TaskRunner::do_async`] runs a task on an [`Executor`] and returns a
//! [`Scope`] that cancels it. Because an observer may return that scope, work
//! started when an observable activates is cancelled when it deactivates:
//!
//! ```rust
//! use juncture_core::Controller;
//! use juncture_tasks::{InlineExecutor, TaskRunner};
//!
//! let runner = TaskRunner::with_executor(InlineExecutor);
//! let online = Controller::<String>::new();
//! let fetched = Controller::<usize>::new();
//!
//! online.watch({
//!     let runner = runner.clone();
//!     let fetched = fetched.clone();
//!     move |host: &String| {
//!         let host = host.clone();
//!         let fetched = fetched.clone();
//!         runner.do_async(move || host.len(), move |len| fetched.set(len)).ok()
//!     }
//! });
//!
//! online.set("example.org".into());
//! online.reset();
//! assert_eq!(runner.run_pending(), 0);
//! assert!(!fetched.is_active());
//! ```
//!
//! Results are handed back on the thread that owns the runner, one batch per
//! [`TaskRunner::run_pending`] call, so callbacks may drive controllers.

pub mod error;
pub mod executor;

pub use error::*;
pub use executor::*;

use std::any::{Any, type_name};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use juncture_core::Scope;
use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    struct TaskKey;
}

type Payload = Box<dyn Any + Send>;
type Delivery = Box<dyn FnOnce(Payload)>;

#[derive(Clone)]
pub struct TaskRunner {
    executor: Rc<dyn Executor>,
    /// Callbacks still waiting for their result. Cancelling removes the entry.
    outstanding: Rc<RefCell<SlotMap<TaskKey, Delivery>>>,
    completed: Arc<Mutex<VecDeque<(TaskKey, Payload)>>>,
}

impl TaskRunner {
    /// Runner that spawns a worker thread per task.
    pub fn new() -> Self {
        Self::with_executor(ThreadExecutor::new())
    }

    pub fn with_executor(executor: impl Executor + 'static) -> Self {
        Self {
            executor: Rc::new(executor),
            outstanding: Rc::default(),
            completed: Arc::default(),
        }
    }

    /// Schedules `task` and arranges for `callback` to receive its result on
    /// a later [`run_pending`](Self::run_pending).
    ///
    /// Closing the returned scope cancels the task: the callback never runs,
    /// and a task that has not started yet is skipped. A task already running
    /// is not interrupted; its result is discarded.
    pub fn do_async<T, W, C>(&self, task: W, callback: C) -> Result<Scope, TaskError>
    where
        T: Send + 'static,
        W: FnOnce() -> T + Send + 'static,
        C: FnOnce(T) + 'static,
    {
        let deliver: Delivery = Box::new(move |payload: Payload| {
            match payload.downcast::<T>() {
                Ok(result) => callback(*result),
                Err(_) => log::error!("task result is not a {}", type_name::<T>()),
            }
        });
        let key = self.outstanding.borrow_mut().insert(deliver);
        let cancelled = Arc::new(AtomicBool::new(false));

        let job: Job = {
            let cancelled = cancelled.clone();
            let completed = self.completed.clone();
            Box::new(move || {
                if cancelled.load(Ordering::Acquire) {
                    return;
                }
                let result = task();
                if !cancelled.load(Ordering::Acquire) {
                    let payload: Payload = Box::new(result);
                    completed.lock().push_back((key, payload));
                }
            })
        };

        if let Err(err) = self.executor.execute(job) {
            log::error!("could not schedule task: {err}");
            self.outstanding.borrow_mut().remove(key);
            return Err(err);
        }

        let outstanding = Rc::downgrade(&self.outstanding);
        Ok(Scope::new(move || {
            cancelled.store(true, Ordering::Release);
            if let Some(outstanding) = outstanding.upgrade()
                && outstanding.borrow_mut().remove(key).is_some()
            {
                log::debug!("cancelled task returning {}", type_name::<T>());
            }
        }))
    }

    /// Delivers every result that has completed so far. Returns how many
    /// callbacks ran.
    pub fn run_pending(&self) -> usize {
        let ready: Vec<(TaskKey, Payload)> = self.completed.lock().drain(..).collect();
        let mut delivered = 0;
        for (key, payload) in ready {
            let Some(deliver) = self.outstanding.borrow_mut().remove(key) else {
                log::debug!("discarding result of cancelled task");
                continue;
            };
            deliver(payload);
            delivered += 1;
        }
        delivered
    }

    /// Tasks whose callback has neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.outstanding.borrow().len()
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}
