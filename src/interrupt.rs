use std::io;

use once_cell::sync::OnceCell;

use crate::{error::ScanError, scan::CancelToken};

static TOKEN: OnceCell<CancelToken> = OnceCell::new();

extern "C" fn on_signal(signal: libc::c_int) {
    if let Some(token) = TOKEN.get() {
        token.cancel();
    }

    // A second signal falls through to the default action and kills the process.
    unsafe {
        libc::signal(signal, libc::SIG_DFL);
    }
}

/// Routes SIGINT and SIGTERM to the returned token instead of killing the
/// process, so the scan can stop and report the interruption.
pub fn install() -> Result<CancelToken, ScanError> {
    let token = TOKEN.get_or_init(CancelToken::new).clone();

    for signal in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: the handler only touches an atomic flag and calls `signal`,
        // both async-signal-safe.
        let previous = unsafe {
            libc::signal(
                signal,
                on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t,
            )
        };
        if previous == libc::SIG_ERR {
            return Err(ScanError::SignalHandlerFailed(io::Error::last_os_error()));
        }
    }

    log::debug!("Interrupt handler installed");

    Ok(token)
}
