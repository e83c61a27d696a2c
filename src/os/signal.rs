// src/os/signal.rs

//! Interrupt-driven quit support.
//!
//! The harness owns a [`QuitFlag`] and hands clones of it to whoever needs to
//! observe it. [`install_interrupt_handler`] wires SIGINT to a flag; the handler
//! itself performs a single atomic store and nothing else.

use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};
use std::sync::Arc;

use log::debug;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

/// Shared, thread-safe quit request. Once raised it is never cleared.
#[derive(Debug, Clone, Default)]
pub struct QuitFlag(Arc<AtomicBool>);

impl QuitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// Points at the `AtomicBool` of the registered flag. Every pointer stored here
// carries a leaked strong count, so it stays valid for the life of the process.
static REGISTERED_FLAG: AtomicPtr<AtomicBool> = AtomicPtr::new(ptr::null_mut());

extern "C" fn handle_sigint(_signo: libc::c_int) {
    let flag = REGISTERED_FLAG.load(Ordering::Acquire);
    if !flag.is_null() {
        // SAFETY: see REGISTERED_FLAG; the pointee is never freed.
        unsafe { (*flag).store(true, Ordering::SeqCst) };
    }
}

/// Routes SIGINT to `flag`, replacing any previously registered flag.
///
/// Installing the same flag again only refreshes the signal disposition.
pub fn install_interrupt_handler(flag: &QuitFlag) -> nix::Result<()> {
    let wanted = Arc::as_ptr(&flag.0) as *mut AtomicBool;
    if REGISTERED_FLAG.load(Ordering::Acquire) != wanted {
        let leaked = Arc::into_raw(Arc::clone(&flag.0)) as *mut AtomicBool;
        REGISTERED_FLAG.store(leaked, Ordering::Release);
        debug!("Registered quit flag {:p} for SIGINT", leaked);
    }

    let action = SigAction::new(
        SigHandler::Handler(handle_sigint),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: the handler only loads an atomic pointer and stores an atomic
    // bool, both async-signal-safe.
    unsafe { sigaction(Signal::SIGINT, &action) }?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_flag_starts_lowered() {
        assert!(!QuitFlag::new().is_raised());
    }

    #[test]
    fn raising_is_visible_through_every_clone_and_sticks() {
        let flag = QuitFlag::new();
        let observer = flag.clone();
        flag.raise();
        assert!(observer.is_raised());
        flag.raise();
        assert!(observer.is_raised());
    }

    #[test]
    fn separate_flags_are_independent() {
        let a = QuitFlag::new();
        let b = QuitFlag::new();
        a.raise();
        assert!(!b.is_raised());
    }
}
