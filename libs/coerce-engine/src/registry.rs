use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use coerce_api::ConverterHandler;

/// Immutable view of the handler list at one point in time.
pub type HandlerSnapshot = Arc<Vec<Arc<dyn ConverterHandler>>>;

/// Ordered registry of conversion handlers.
///
/// Registration order is dispatch order. Registration swaps in a new list
/// (copy-on-write) so a dispatch that already took a snapshot keeps seeing
/// the list it started with.
pub struct HandlerRegistry {
    handlers: RwLock<HandlerSnapshot>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            handlers: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HandlerSnapshot> {
        match self.handlers.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("handler registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HandlerSnapshot> {
        match self.handlers.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("handler registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Append a handler after every handler registered so far.
    pub fn register(&self, handler: Arc<dyn ConverterHandler>) {
        let mut guard = self.write();
        let mut next: Vec<Arc<dyn ConverterHandler>> = (**guard).clone();
        tracing::debug!(handler = handler.name(), position = next.len(), "registered handler");
        next.push(handler);
        *guard = Arc::new(next);
    }

    pub fn snapshot(&self) -> HandlerSnapshot {
        self.read().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.snapshot().iter().map(|h| h.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
