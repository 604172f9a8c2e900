//! `critical-section` provider for ESP-IDF builds.
//!
//! The blink queue is an embassy channel guarded by
//! `CriticalSectionRawMutex`, which links against the two
//! `_critical_section_1_0_*` symbols below. On host the
//! `critical-section/std` dev-dependency provides them instead.
//!
//! Threads only ever hold the section for a push or pop, so a plain
//! process-wide mutex with a per-thread nesting depth is enough.

#[cfg(target_os = "espidf")]
use core::cell::{Cell, RefCell};
#[cfg(target_os = "espidf")]
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(target_os = "espidf")]
static QUEUE_SECTION: Mutex<()> = Mutex::new(());

#[cfg(target_os = "espidf")]
thread_local! {
    static DEPTH: Cell<u8> = const { Cell::new(0) };
    static GUARD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            // Guards `()`, so poisoning carries no state.
            let lock = QUEUE_SECTION.lock().unwrap_or_else(PoisonError::into_inner);
            GUARD.with(|guard| *guard.borrow_mut() = Some(lock));
        }
        let nested = d.saturating_add(1);
        depth.set(nested);
        nested
    })
}

#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    // The token is not trusted; nesting is tracked per thread.
    DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            return;
        }
        depth.set(d - 1);
        if d == 1 {
            GUARD.with(|guard| *guard.borrow_mut() = None);
        }
    })
}
