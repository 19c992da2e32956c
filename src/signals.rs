use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;

/// Pid of the child currently being waited on in the foreground, 0 when
/// there is none. Written only by the supervisor; the handlers only read.
static FOREGROUND_PID: AtomicI32 = AtomicI32::new(0);

/// Set by the SIGCHLD handler, consumed by the dispatcher's reap sweep.
static CHILD_EVENT: AtomicBool = AtomicBool::new(false);

/// Last interactive signal received, 0 when none is pending. The
/// acknowledgment is printed by the dispatcher, outside signal context.
static PENDING_SIGNAL: AtomicI32 = AtomicI32::new(0);

extern "C" fn on_interactive(signo: libc::c_int) {
    let pid = FOREGROUND_PID.load(Ordering::SeqCst);
    if pid > 0 {
        // kill(2) is async-signal-safe
        unsafe {
            libc::kill(pid, signo);
        }
    }
    PENDING_SIGNAL.store(signo, Ordering::SeqCst);
}

extern "C" fn on_child(_signo: libc::c_int) {
    CHILD_EVENT.store(true, Ordering::SeqCst);
}

/// Install the shell's handlers: SIGINT/SIGTSTP forward to the foreground
/// child, SIGCHLD records that a reap sweep is due.
pub fn install() -> nix::Result<()> {
    let interactive = SigAction::new(
        SigHandler::Handler(on_interactive),
        SaFlags::SA_RESTART,
        SigSet::all(),
    );
    let child = SigAction::new(
        SigHandler::Handler(on_child),
        SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
        SigSet::all(),
    );
    unsafe {
        signal::sigaction(Signal::SIGINT, &interactive)?;
        signal::sigaction(Signal::SIGTSTP, &interactive)?;
        signal::sigaction(Signal::SIGCHLD, &child)?;
    }
    Ok(())
}

/// Restore default dispositions in a freshly forked child, so a forwarded
/// SIGINT/SIGTSTP acts on the child instead of an inherited handler.
pub fn reset_for_child() {
    unsafe {
        let _ = signal::signal(Signal::SIGINT, SigHandler::SigDfl);
        let _ = signal::signal(Signal::SIGTSTP, SigHandler::SigDfl);
        let _ = signal::signal(Signal::SIGCHLD, SigHandler::SigDfl);
    }
}

/// Publish the foreground child. Must happen before the wait that could
/// race with signal delivery.
pub fn set_foreground(pid: Pid) {
    FOREGROUND_PID.store(pid.as_raw(), Ordering::SeqCst);
}

pub fn clear_foreground() {
    FOREGROUND_PID.store(0, Ordering::SeqCst);
}

/// Consume the pending child-state note, if any.
pub fn take_child_event() -> bool {
    CHILD_EVENT.swap(false, Ordering::SeqCst)
}

/// Consume the pending interactive-signal note, if any.
pub fn take_pending_signal() -> Option<Signal> {
    match PENDING_SIGNAL.swap(0, Ordering::SeqCst) {
        0 => None,
        signo => Signal::try_from(signo).ok(),
    }
}
