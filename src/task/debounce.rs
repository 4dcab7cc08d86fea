//! Entprellter Refresh über einer Worker-Queue.
//!
//! Beliebig viele `request_refresh()`-Aufrufe, die eintreffen während ein
//! Refresh noch aussteht, führen zu genau einer Ausführung. Die Ausführung
//! liest den Zustand zum Zeitpunkt, an dem sie tatsächlich läuft.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::WorkerQueue;

/// Refresh-Funktion auf dem Zustand des Workers.
pub type RefreshFn<S> = Arc<dyn Fn(&mut S) -> anyhow::Result<()> + Send + Sync>;

/// Koalesziert Refresh-Anfragen zu einem ausstehenden Task.
pub struct DebounceScheduler<S> {
    name: String,
    pending: Arc<Mutex<bool>>,
    queue: WorkerQueue<S>,
    refresh: RefreshFn<S>,
}

impl<S> fmt::Debug for DebounceScheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceScheduler")
            .field("name", &self.name)
            .field("pending", &*lock(&self.pending))
            .finish()
    }
}

fn lock(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: Send + 'static> DebounceScheduler<S> {
    /// Erstellt einen Scheduler, der `refresh` auf `queue` ausführt.
    pub fn new<F>(name: impl Into<String>, queue: WorkerQueue<S>, refresh: F) -> Self
    where
        F: Fn(&mut S) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pending: Arc::new(Mutex::new(false)),
            queue,
            refresh: Arc::new(refresh),
        }
    }

    /// Name des Refresh-Tasks.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true`, solange ein eingereihter Refresh noch nicht begonnen hat.
    pub fn is_pending(&self) -> bool {
        *lock(&self.pending)
    }

    /// Fordert einen Refresh an.
    ///
    /// Gibt `true` zurück, wenn dafür ein neuer Task eingereiht wurde, und
    /// `false`, wenn die Anfrage in einem bereits ausstehenden aufgeht.
    pub fn request_refresh(&self) -> bool {
        {
            let mut pending = lock(&self.pending);
            if *pending {
                log::trace!("Refresh '{}' bereits ausstehend", self.name);
                return false;
            }
            *pending = true;
        }

        let pending = Arc::clone(&self.pending);
        let refresh = Arc::clone(&self.refresh);
        let submitted = self.queue.try_submit(
            &self.name,
            Box::new(move |state: &mut S| {
                *lock(&pending) = false;
                refresh(state)
            }),
        );

        match submitted {
            Ok(_) => {
                log::trace!("Refresh '{}' eingereiht", self.name);
                true
            }
            Err(e) => {
                *lock(&self.pending) = false;
                log::error!("Refresh '{}' nicht eingereiht: {}", self.name, e);
                false
            }
        }
    }
}
