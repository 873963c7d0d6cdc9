//! Resource pool
//!
//! A bounded pool of exclusively-owned workspaces. A resource is checked out
//! for the duration of one closure and returned afterwards, so two concurrent
//! callers never see the same instance. Resources are created lazily by the
//! factory, up to `capacity`; once that many exist, callers wait for one to
//! come back.

use parking_lot::{Condvar, Mutex};

struct State<T> {
    idle: Vec<T>,
    created: usize,
}

/// A bounded, lazily-filled pool of reusable resources.
pub struct ResourcePool<T> {
    capacity: usize,
    factory: Box<dyn Fn() -> T + Send + Sync>,
    state: Mutex<State<T>>,
    returned: Condvar,
}

impl<T> ResourcePool<T> {
    /// Create an empty pool holding at most `capacity` resources (minimum 1).
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        ResourcePool {
            capacity: capacity.max(1),
            factory: Box::new(factory),
            state: Mutex::new(State {
                idle: Vec::new(),
                created: 0,
            }),
            returned: Condvar::new(),
        }
    }

    /// Maximum number of resources this pool will create.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resources created so far.
    pub fn created(&self) -> usize {
        self.state.lock().created
    }

    /// Number of resources currently sitting in the pool.
    pub fn idle(&self) -> usize {
        self.state.lock().idle.len()
    }

    /// Run `f` with exclusive access to a pooled resource.
    ///
    /// Blocks while every resource is checked out and the pool is full. If `f`
    /// or the factory panics, the resource is dropped and its slot is freed.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (slot, mut resource) = self.acquire();
        let result = f(&mut resource);
        slot.release(resource);
        result
    }

    fn acquire(&self) -> (Slot<'_, T>, T) {
        let mut state = self.state.lock();
        loop {
            if let Some(resource) = state.idle.pop() {
                return (Slot { pool: self }, resource);
            }
            if state.created < self.capacity {
                state.created += 1;
                drop(state);
                let slot = Slot { pool: self };
                log::trace!("pool growing to hold a new resource");
                let resource = (self.factory)();
                return (slot, resource);
            }
            self.returned.wait(&mut state);
        }
    }
}

/// A reserved place in the pool.
///
/// Released slots put their resource back on the idle list. A slot dropped
/// without being released (the factory or the caller unwound) gives its
/// capacity back instead.
struct Slot<'a, T> {
    pool: &'a ResourcePool<T>,
}

impl<T> Slot<'_, T> {
    fn release(self, resource: T) {
        self.pool.state.lock().idle.push(resource);
        self.pool.returned.notify_one();
        std::mem::forget(self);
    }
}

impl<T> Drop for Slot<'_, T> {
    fn drop(&mut self) {
        self.pool.state.lock().created -= 1;
        self.pool.returned.notify_one();
    }
}

impl<T> std::fmt::Debug for ResourcePool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ResourcePool")
            .field("capacity", &self.capacity)
            .field("created", &state.created)
            .field("idle", &state.idle.len())
            .finish()
    }
}
