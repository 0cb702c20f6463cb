//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

const MAX_DEPTH: usize = 1024;

// Thread-local resolution stack, one entry per service currently being built
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Guard for managing the thread-local resolution stack
pub(crate) struct StackGuard {
    id: String,
}

impl StackGuard {
    /// Pushes `id` onto the stack, failing if it is already being resolved.
    pub(crate) fn enter(id: &str) -> DiResult<Self> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            // Circular detection BEFORE pushing the new id
            if stack.iter().any(|entry| entry == id) {
                let mut path = stack.clone();
                path.push(id.to_string());
                return Err(DiError::Circular(path));
            }

            if stack.len() >= MAX_DEPTH {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push(id.to_string());
            Ok(())
        })?;

        Ok(Self { id: id.to_string() })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(last) = stack.pop() {
                debug_assert_eq!(last, self.id);
            }
        });
    }
}

/// Execute a closure with circular dependency detection
pub(crate) fn with_resolution_guard<T, F>(id: &str, f: F) -> DiResult<T>
where
    F: FnOnce() -> DiResult<T>,
{
    let _guard = StackGuard::enter(id)?;
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_distinct_ids_are_allowed() {
        let result = with_resolution_guard("a", || with_resolution_guard("b", || Ok(1)));
        assert_eq!(result, Ok(1));
    }

    #[test]
    fn reentering_an_id_reports_the_cycle() {
        let result: DiResult<()> = with_resolution_guard("a", || {
            with_resolution_guard("b", || with_resolution_guard("a", || Ok(())))
        });
        assert_eq!(
            result,
            Err(DiError::Circular(vec!["a".into(), "b".into(), "a".into()]))
        );
    }

    #[test]
    fn stack_is_unwound_after_an_error() {
        let _ = with_resolution_guard("x", || with_resolution_guard("x", || Ok(())));
        assert_eq!(with_resolution_guard("x", || Ok(2)), Ok(2));
    }
}
