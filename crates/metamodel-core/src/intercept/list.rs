use crate::errors::Result;
use std::sync::Arc;

/// A transform applied to a value before it is used
///
/// An interceptor receives the current value and returns the value to
/// continue with: the same one, a wrapped one or a replacement. Returning an
/// error vetoes the operation.
pub trait Interceptor<T>: Send + Sync {
    /// # Errors
    ///
    /// Any error aborts the chain and is returned to the caller unchanged.
    fn intercept(&self, input: T) -> Result<T>;
}

impl<T, F> Interceptor<T> for F
where
    F: Fn(T) -> Result<T> + Send + Sync,
{
    fn intercept(&self, input: T) -> Result<T> {
        self(input)
    }
}

/// Ordered interceptors for one kind of value
///
/// Application order is registration order. Cloning is cheap and yields an
/// independent snapshot: later registrations on the original do not show up
/// in the clone.
pub struct InterceptorList<T> {
    interceptors: Vec<Arc<dyn Interceptor<T>>>,
}

impl<T> InterceptorList<T> {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn add(&mut self, interceptor: Arc<dyn Interceptor<T>>) {
        self.interceptors.push(interceptor);
    }

    /// Remove a previously added interceptor, compared by identity
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, interceptor: &Arc<dyn Interceptor<T>>) -> bool {
        let before = self.interceptors.len();
        self.interceptors.retain(|i| !same(i, interceptor));
        self.interceptors.len() != before
    }

    pub fn contains(&self, interceptor: &Arc<dyn Interceptor<T>>) -> bool {
        self.interceptors.iter().any(|i| same(i, interceptor))
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn clear(&mut self) {
        self.interceptors.clear()
    }

    /// Fold every interceptor over `input`, left to right
    ///
    /// An empty list returns `input` untouched.
    ///
    /// # Errors
    ///
    /// Stops at the first interceptor that fails and returns its error.
    pub fn intercept_all(&self, input: T) -> Result<T> {
        self.interceptors
            .iter()
            .try_fold(input, |current, interceptor| interceptor.intercept(current))
    }
}

fn same<T>(a: &Arc<dyn Interceptor<T>>, b: &Arc<dyn Interceptor<T>>) -> bool {
    // Data pointers only: vtable addresses are not unique.
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

impl<T> Default for InterceptorList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InterceptorList<T> {
    fn clone(&self) -> Self {
        Self {
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T> std::fmt::Debug for InterceptorList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorList")
            .field("len", &self.interceptors.len())
            .finish()
    }
}
