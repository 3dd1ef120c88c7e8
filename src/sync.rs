//! Spin lock used to make the runner's statics `Sync` without an OS.

use core::sync::atomic::{AtomicBool, Ordering};

use lock_api::RawMutex;

pub struct RawSpin {
    lock: AtomicBool,
}

unsafe impl RawMutex for RawSpin {
    type GuardMarker = lock_api::GuardSend;
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        lock: AtomicBool::new(false),
    };

    fn lock(&self) {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.lock.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.lock.load(Ordering::Relaxed)
    }
}

pub type Mutex<T> = lock_api::Mutex<RawSpin, T>;
pub type MutexGuard<'a, T> = lock_api::MutexGuard<'a, RawSpin, T>;
