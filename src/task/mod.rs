//! Task-Ausführung: benannte Worker-Queues und entprellte Refreshes.

pub mod debounce;
pub mod worker;

pub use debounce::{DebounceScheduler, RefreshFn};
pub use worker::{TaskBody, TaskError, TaskHandle, WorkerQueue};
