//! Instance arbiter — decides which chat widget mount owns the visible
//! chat surface.
//!
//! Several independent mount points (sidebar button, header button, mobile
//! menu) can each try to open a chat surface; the arbiter serializes them
//! to a single owner. It is an explicit handle created at the application
//! root and cloned into each mount point — no module-level static. Like
//! the event bus pattern this is built on, it is single-threaded and
//! clone-cheap via Rc.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(Option<&str>)>;

struct ArbiterInner {
    /// Id of the widget currently permitted to be open; None = closed.
    /// At most one non-null value exists; assignment fully replaces it.
    active: Option<String>,
    /// Registration order is notification order
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

impl ArbiterInner {
    fn snapshot(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

/// Shared arbiter handle — clone-cheap via Rc.
#[derive(Clone)]
pub struct InstanceArbiter {
    inner: Rc<RefCell<ArbiterInner>>,
}

impl InstanceArbiter {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ArbiterInner {
                active: None,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Grant ownership to `instance_id`, revoking any previous owner.
    /// Last caller wins; never errors. Returns the revoked owner's id so
    /// the caller can unmount it deterministically instead of having every
    /// mount point poll `is_owner`.
    ///
    /// Every subscriber is notified with the new owner after the pointer
    /// is updated, in registration order.
    pub fn open(&self, instance_id: &str) -> Option<String> {
        let (previous, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.active.replace(instance_id.to_string());
            (previous, inner.snapshot())
        };
        if previous.as_deref() != Some(instance_id) {
            log::debug!(
                "chat instance open: {} (was {:?})",
                instance_id,
                previous
            );
        }
        // Borrow released before callbacks run, so a listener may re-enter
        // the arbiter (is_owner, subscribe, even open) without panicking.
        for listener in listeners {
            listener(Some(instance_id));
        }
        previous
    }

    /// Release ownership. Idempotent: closing an already-closed arbiter is
    /// not an error, and subscribers are still notified of the call.
    pub fn close(&self) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.active = None;
            inner.snapshot()
        };
        for listener in listeners {
            listener(None);
        }
    }

    /// Whether `instance_id` is the current owner. Pure read.
    pub fn is_owner(&self, instance_id: &str) -> bool {
        self.inner.borrow().active.as_deref() == Some(instance_id)
    }

    /// Id of the current owner, if any. Pure read.
    pub fn active_instance(&self) -> Option<String> {
        self.inner.borrow().active.clone()
    }

    /// Register a callback invoked with the new owner on every `open` and
    /// `close`. The returned guard deregisters on drop; hold it for as
    /// long as the mount point lives.
    pub fn subscribe(&self, callback: impl Fn(Option<&str>) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, Rc::new(callback)));
            id
        };
        Subscription {
            arbiter: Rc::downgrade(&self.inner),
            id,
        }
    }
}

impl Default for InstanceArbiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped registration: dropping the guard deregisters the callback.
pub struct Subscription {
    arbiter: Weak<RefCell<ArbiterInner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.arbiter.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
