/// Error classification and reporting for the erase engine
///
/// Raw I/O errors are folded onto the crate's error taxonomy here, and every
/// failure is pushed through an injected `ErrorReporter` before it is
/// returned, so the engine itself never talks to a particular output surface.
use crate::EraseError;
use std::io;

/// Classify a raw I/O error into the erase failure taxonomy.
///
/// `path` names the file the operation was touching when it failed; it ends
/// up in the human-readable description.
pub fn classify_io(err: io::Error, path: &str) -> EraseError {
    match err.kind() {
        io::ErrorKind::NotFound => EraseError::FileNotFound(path.to_string()),
        io::ErrorKind::PermissionDenied => {
            EraseError::AccessDenied(format!("{}: {}", path, err))
        }
        _ if is_sharing_violation(&err) => {
            EraseError::SharingViolation(format!("{}: {}", path, err))
        }
        _ => EraseError::Io(err),
    }
}

/// Lock or share-mode contention shows up as a raw OS error, not as a
/// dedicated `ErrorKind`.
fn is_sharing_violation(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        // EWOULDBLOCK/EAGAIN from a non-blocking flock on a held lock
        matches!(err.raw_os_error(), Some(code) if code == libc_ewouldblock())
    }
    #[cfg(windows)]
    {
        // ERROR_SHARING_VIOLATION from an open with share mode 0
        err.raw_os_error() == Some(32)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = err;
        false
    }
}

#[cfg(unix)]
fn libc_ewouldblock() -> i32 {
    nix::errno::Errno::EWOULDBLOCK as i32
}

/// Sink for classified erase failures. The engine reports every failure
/// through this exactly once before returning it.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &EraseError);
}

/// Default reporter: hands the failure to the tracing subscriber.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, error: &EraseError) {
        tracing::error!(error = %error, "erase failed");
    }
}
