//! Per-thread activity tracking
//!
//! Records carry the activity id of the thread that produced them. A thread
//! enters an activity with [`enter`]; the returned guard restores the
//! previous activity when dropped, so activities nest.

use rollsink_core_types::ActivityId;
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static CURRENT_ACTIVITY: RefCell<ActivityId> = RefCell::new(ActivityId::nil());
}

/// Activity id of the calling thread, nil when none was entered
pub fn current() -> ActivityId {
    CURRENT_ACTIVITY.with(|current| current.borrow().clone())
}

/// Make `activity_id` current on this thread until the guard drops
pub fn enter(activity_id: ActivityId) -> ActivityGuard {
    let previous = CURRENT_ACTIVITY.with(|current| current.replace(activity_id));
    ActivityGuard {
        previous: Some(previous),
        _not_send: PhantomData,
    }
}

/// Run `f` with `activity_id` as the current activity
pub fn scope<R>(activity_id: ActivityId, f: impl FnOnce() -> R) -> R {
    let _guard = enter(activity_id);
    f()
}

/// Restores the previously current activity on drop
///
/// Bound to the thread that created it.
#[must_use = "the activity ends when the guard is dropped"]
pub struct ActivityGuard {
    previous: Option<ActivityId>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            CURRENT_ACTIVITY.with(|current| {
                *current.borrow_mut() = previous;
            });
        }
    }
}
