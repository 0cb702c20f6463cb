//! Internal implementation details.

pub(crate) mod circular;
pub(crate) mod fuzzy;
pub(crate) mod lock;

pub(crate) use circular::with_resolution_guard;
pub(crate) use lock::{Mutex, RwLock};
