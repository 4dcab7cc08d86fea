//! Benannte Worker-Queue: ein Thread, der seinen Zustand exklusiv besitzt.
//!
//! Alle Mutationen eines Zustands (z.B. der Karten-Ansicht) laufen als Tasks
//! über genau diese Queue und damit in Einreichungsreihenfolge. Fehler und
//! Panics eines Tasks werden an der Queue-Grenze geloggt; der Worker arbeitet
//! danach mit dem nächsten Task weiter.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use anyhow::Context;

/// Task-Körper: arbeitet auf dem Zustand des Workers.
pub type TaskBody<S> = Box<dyn FnOnce(&mut S) -> anyhow::Result<()> + Send>;

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Fehler, die ein Einreicher über [`TaskHandle::wait`] oder
/// [`WorkerQueue::query`] sehen kann.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Der Task-Körper hat einen Fehler zurückgegeben.
    #[error("Task '{task}' fehlgeschlagen: {message}")]
    Failed { task: String, message: String },
    /// Der Task-Körper hat eine Panic ausgelöst.
    #[error("Task '{task}' abgebrochen (Panic): {message}")]
    Panicked { task: String, message: String },
    /// Der Worker läuft nicht mehr, der Task wurde nie ausgeführt.
    #[error("Worker-Queue '{queue}' ist nicht mehr erreichbar")]
    Disconnected { queue: String },
    /// Blockierende Abfrage vom eigenen Worker-Thread aus.
    #[error("Blockierende Abfrage auf '{queue}' vom eigenen Worker-Thread")]
    Reentrant { queue: String },
}

/// Abschluss-Handle eines eingereichten Tasks.
///
/// Muss nicht abgewartet werden; Fire-and-forget ist der Normalfall.
#[must_use = "ohne wait() ist das Ergebnis nur im Log sichtbar"]
pub struct TaskHandle {
    task: String,
    queue: String,
    receiver: mpsc::Receiver<Result<(), TaskError>>,
}

impl TaskHandle {
    /// Name des Tasks.
    pub fn task_name(&self) -> &str {
        &self.task
    }

    /// Blockiert bis der Task gelaufen ist.
    pub fn wait(self) -> Result<(), TaskError> {
        self.receiver.recv().unwrap_or(Err(TaskError::Disconnected {
            queue: self.queue,
        }))
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("task", &self.task)
            .field("queue", &self.queue)
            .finish()
    }
}

struct QueueInner<S> {
    name: String,
    sender: Option<mpsc::Sender<Job<S>>>,
    join_handle: Option<JoinHandle<()>>,
    worker_thread: ThreadId,
}

impl<S> Drop for QueueInner<S> {
    fn drop(&mut self) {
        // Sender schließen, damit die Worker-Schleife endet
        self.sender.take();

        let Some(handle) = self.join_handle.take() else {
            return;
        };
        if thread::current().id() == self.worker_thread {
            // Letzte Referenz wurde in einem Task fallen gelassen
            return;
        }
        if handle.join().is_err() {
            log::error!("Worker-Thread '{}' ist abgestürzt", self.name);
        }
        log::debug!("Worker-Queue '{}' beendet", self.name);
    }
}

/// Klonbare Referenz auf eine benannte Worker-Queue über dem Zustand `S`.
///
/// Der Thread endet, sobald die letzte Referenz fällt; bereits eingereihte
/// Tasks werden vorher noch abgearbeitet.
pub struct WorkerQueue<S> {
    inner: Arc<QueueInner<S>>,
}

impl<S> Clone for WorkerQueue<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for WorkerQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerQueue")
            .field("name", &self.inner.name)
            .finish()
    }
}

impl<S: Send + 'static> WorkerQueue<S> {
    /// Startet den Worker-Thread, der ab jetzt `state` besitzt.
    pub fn spawn(name: impl Into<String>, state: S) -> anyhow::Result<Self> {
        let name = name.into();
        let (sender, receiver) = mpsc::channel::<Job<S>>();

        let thread_name = name.clone();
        let join_handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let mut state = state;
                log::debug!("Worker-Queue '{}' gestartet", thread_name);
                while let Ok(job) = receiver.recv() {
                    job(&mut state);
                }
            })
            .with_context(|| format!("Worker-Thread '{}' konnte nicht gestartet werden", name))?;

        let worker_thread = join_handle.thread().id();

        Ok(Self {
            inner: Arc::new(QueueInner {
                name,
                sender: Some(sender),
                join_handle: Some(join_handle),
                worker_thread,
            }),
        })
    }

    /// Name der Queue.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// `true`, wenn der Aufrufer gerade auf dem Worker-Thread läuft.
    pub fn is_worker_thread(&self) -> bool {
        thread::current().id() == self.inner.worker_thread
    }

    /// Reiht einen Task ein.
    ///
    /// Ist der Worker nicht mehr erreichbar, wird das geloggt und das Handle
    /// liefert beim Warten [`TaskError::Disconnected`].
    pub fn submit<F>(&self, task: &str, work: F) -> TaskHandle
    where
        F: FnOnce(&mut S) -> anyhow::Result<()> + Send + 'static,
    {
        match self.try_submit(task, Box::new(work)) {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("{}", e);
                let (_, receiver) = mpsc::channel();
                TaskHandle {
                    task: task.to_string(),
                    queue: self.inner.name.clone(),
                    receiver,
                }
            }
        }
    }

    /// Reiht einen Task ein und meldet einen toten Worker sofort.
    pub fn try_submit(&self, task: &str, work: TaskBody<S>) -> Result<TaskHandle, TaskError> {
        let (done_sender, done_receiver) = mpsc::channel();
        let queue_name = self.inner.name.clone();
        let task_name = task.to_string();

        let job: Job<S> = Box::new(move |state: &mut S| {
            let outcome = run_task(&queue_name, &task_name, work, state);
            // Einreicher wartet evtl. nicht
            let _ = done_sender.send(outcome);
        });

        let sender = self
            .inner
            .sender
            .as_ref()
            .ok_or_else(|| self.disconnected())?;
        sender.send(job).map_err(|_| self.disconnected())?;

        log::trace!("[{}] Task '{}' eingereiht", self.inner.name, task);

        Ok(TaskHandle {
            task: task.to_string(),
            queue: self.inner.name.clone(),
            receiver: done_receiver,
        })
    }

    /// Führt `f` auf dem Worker aus und liefert dessen Ergebnis (blockierend).
    pub fn query<T, F>(&self, task: &str, f: F) -> Result<T, TaskError>
    where
        T: Send + 'static,
        F: FnOnce(&mut S) -> T + Send + 'static,
    {
        if self.is_worker_thread() {
            return Err(TaskError::Reentrant {
                queue: self.inner.name.clone(),
            });
        }

        let (result_sender, result_receiver) = mpsc::channel();
        let handle = self.try_submit(
            task,
            Box::new(move |state: &mut S| {
                let _ = result_sender.send(f(state));
                Ok(())
            }),
        )?;
        handle.wait()?;

        result_receiver.recv().map_err(|_| self.disconnected())
    }

    /// Wartet bis alle bisher eingereihten Tasks gelaufen sind.
    pub fn flush(&self) -> Result<(), TaskError> {
        self.query("flush", |_| ())
    }

    fn disconnected(&self) -> TaskError {
        TaskError::Disconnected {
            queue: self.inner.name.clone(),
        }
    }
}

fn run_task<S>(queue: &str, task: &str, work: TaskBody<S>, state: &mut S) -> Result<(), TaskError> {
    log::trace!("[{}] Task '{}' startet", queue, task);

    match panic::catch_unwind(AssertUnwindSafe(|| work(state))) {
        Ok(Ok(())) => {
            log::trace!("[{}] Task '{}' fertig", queue, task);
            Ok(())
        }
        Ok(Err(err)) => {
            log::error!("[{}] Unerwarteter Fehler in Task '{}': {:#}", queue, task, err);
            Err(TaskError::Failed {
                task: task.to_string(),
                message: format!("{err:#}"),
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("[{}] Panic in Task '{}': {}", queue, task, message);
            Err(TaskError::Panicked {
                task: task.to_string(),
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unbekannte Panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_tasks_run_in_submission_order() {
        let queue = WorkerQueue::spawn("test-fifo", Vec::<u32>::new()).expect("Thread startet");

        for i in 0..20 {
            let _ = queue.submit("push", move |log| {
                log.push(i);
                Ok(())
            });
        }

        let seen = queue.query("read", |log| log.clone()).expect("Abfrage klappt");
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_failing_task_is_reported_and_worker_continues() {
        let queue = WorkerQueue::spawn("test-failure", 0u32).expect("Thread startet");

        let failed = queue.submit("boom", |_| anyhow::bail!("kaputt"));
        let after = queue.submit("inc", |count| {
            *count += 1;
            Ok(())
        });

        assert_eq!(
            failed.wait(),
            Err(TaskError::Failed {
                task: "boom".to_string(),
                message: "kaputt".to_string(),
            })
        );
        assert_eq!(after.wait(), Ok(()));
        assert_eq!(queue.query("read", |count| *count), Ok(1));
    }

    #[test]
    fn test_panicking_task_does_not_kill_worker() {
        let queue = WorkerQueue::spawn("test-panic", 0u32).expect("Thread startet");

        let panicked = queue.submit("panic", |_| panic!("absichtlich"));
        assert!(matches!(
            panicked.wait(),
            Err(TaskError::Panicked { ref message, .. }) if message == "absichtlich"
        ));

        let _ = queue.submit("inc", |count| {
            *count += 1;
            Ok(())
        });
        assert_eq!(queue.query("read", |count| *count), Ok(1));
    }

    #[test]
    fn test_queues_are_independent() {
        let slow = WorkerQueue::spawn("test-slow", ()).expect("Thread startet");
        let fast = WorkerQueue::spawn("test-fast", 0u32).expect("Thread startet");
        let gate = Arc::new(Mutex::new(()));

        let guard = gate.lock().expect("Lock frei");
        let blocked_gate = Arc::clone(&gate);
        let blocked = slow.submit("blocked", move |_| {
            let _held = blocked_gate.lock().map_err(|_| anyhow::anyhow!("vergiftet"))?;
            Ok(())
        });

        // Langsame Queue blockiert, die andere arbeitet weiter
        assert_eq!(fast.query("read", |count| *count), Ok(0));

        drop(guard);
        assert_eq!(blocked.wait(), Ok(()));
    }

    #[test]
    fn test_query_from_worker_thread_is_rejected() {
        let queue = WorkerQueue::spawn("test-reentrant", ()).expect("Thread startet");
        let inner = queue.clone();

        let result = queue
            .query("outer", move |_| inner.query("inner", |_| ()))
            .expect("äußere Abfrage klappt");

        assert_eq!(
            result,
            Err(TaskError::Reentrant {
                queue: "test-reentrant".to_string(),
            })
        );
    }
}
