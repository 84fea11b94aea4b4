use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

/// Holds the linearization of a geometry made with its own tolerance.
///
/// The value is computed on first access and never changes afterwards, since the owning geometry is immutable.
/// Linearizations with other tolerances are never stored here.
pub(crate) struct LinearizationCache<T> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T> LinearizationCache<T> {
    pub(crate) fn new() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }

    /// Returns the stored value, computing it with `init` if it is not there yet.
    pub(crate) fn get_or_init(&self, init: impl FnOnce() -> T) -> Arc<T> {
        if let Some(value) = &*self.value.read() {
            return value.clone();
        }

        let mut value = self.value.write();
        if let Some(value) = &*value {
            return value.clone();
        }

        let computed = Arc::new(init());
        *value = Some(computed.clone());
        log::trace!("Linearization cache populated");

        computed
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.value.read().is_some()
    }
}

impl<T> Default for LinearizationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LinearizationCache<T> {
    fn clone(&self) -> Self {
        Self {
            value: RwLock::new(self.value.read().clone()),
        }
    }
}

impl<T> Debug for LinearizationCache<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearizationCache")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
