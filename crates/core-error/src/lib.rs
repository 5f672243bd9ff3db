//! Shared error taxonomy for the Celina core engine.
//!
//! Every fallible operation in the core crates returns [`Error`]. The variants
//! group failures by the subsystem that raised them (`IO`, `Terminal`,
//! `System`, `Memory`, `InvalidInput`, `Async`) rather than by crate, since a
//! single tick can cross several crates before an error surfaces to the
//! application's render/event callbacks.
//!
//! Propagation policy (see the specification's "Error Handling Design"):
//! setup failures abort the run, render-write failures are mostly absorbed by
//! the terminal's retry loop, and input parsing never raises - malformed
//! sequences resolve to a safe default event instead.

use std::fmt;

/// Convenience alias used throughout the core crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Read/write/timeout subdivision of [`ErrorKind::Io`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoKind {
    Read,
    Write,
    Timeout,
}

/// Config/render/size subdivision of [`ErrorKind::Terminal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Config,
    Render,
    Size,
}

/// Permission/resource-unavailable subdivision of [`ErrorKind::System`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    Syscall,
    Permission,
    ResourceUnavailable,
}

/// Unicode/color/out-of-bounds subdivision of [`ErrorKind::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputKind {
    Unicode,
    Color,
    OutOfBounds,
}

/// Timeout/cancelled subdivision of [`ErrorKind::Async`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncKind {
    Timeout,
    Cancelled,
}

/// The top-level kind tag. Each variant carries its own sub-kind so callers
/// can match broadly (`ErrorKind::Io(_)`) or precisely (`ErrorKind::Io(IoKind::Timeout)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io(IoKind),
    Terminal(TerminalKind),
    System(SystemKind),
    Memory,
    InvalidInput(InvalidInputKind),
    Async(AsyncKind),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Io(IoKind::Read) => write!(f, "io/read"),
            ErrorKind::Io(IoKind::Write) => write!(f, "io/write"),
            ErrorKind::Io(IoKind::Timeout) => write!(f, "io/timeout"),
            ErrorKind::Terminal(TerminalKind::Config) => write!(f, "terminal/config"),
            ErrorKind::Terminal(TerminalKind::Render) => write!(f, "terminal/render"),
            ErrorKind::Terminal(TerminalKind::Size) => write!(f, "terminal/size"),
            ErrorKind::System(SystemKind::Syscall) => write!(f, "system/syscall"),
            ErrorKind::System(SystemKind::Permission) => write!(f, "system/permission"),
            ErrorKind::System(SystemKind::ResourceUnavailable) => {
                write!(f, "system/resource-unavailable")
            }
            ErrorKind::Memory => write!(f, "memory"),
            ErrorKind::InvalidInput(InvalidInputKind::Unicode) => write!(f, "invalid-input/unicode"),
            ErrorKind::InvalidInput(InvalidInputKind::Color) => write!(f, "invalid-input/color"),
            ErrorKind::InvalidInput(InvalidInputKind::OutOfBounds) => {
                write!(f, "invalid-input/out-of-bounds")
            }
            ErrorKind::Async(AsyncKind::Timeout) => write!(f, "async/timeout"),
            ErrorKind::Async(AsyncKind::Cancelled) => write!(f, "async/cancelled"),
        }
    }
}

/// A single error, with a kind tag, a human message, a breadcrumb chain of
/// context added as the error propagated upward, and an optional wrapped
/// cause (e.g. the `std::io::Error` that triggered a `Terminal` failure).
#[derive(Debug, thiserror::Error)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    breadcrumbs: Vec<String>,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            breadcrumbs: Vec::new(),
            cause: None,
        }
    }

    pub fn with_cause(
        kind: ErrorKind,
        message: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            breadcrumbs: Vec::new(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Push a contextual breadcrumb (e.g. "during raw-mode setup") and return self.
    pub fn context(mut self, breadcrumb: impl Into<String>) -> Self {
        self.breadcrumbs.push(breadcrumb.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }

    pub fn io(kind: IoKind, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(kind), message)
    }

    pub fn terminal(kind: TerminalKind, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal(kind), message)
    }

    pub fn system(kind: SystemKind, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::System(kind), message)
    }

    pub fn invalid_input(kind: InvalidInputKind, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput(kind), message)
    }

    pub fn r#async(kind: AsyncKind, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Async(kind), message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        for crumb in self.breadcrumbs.iter().rev() {
            write!(f, "\n  while {crumb}")?;
        }
        Ok(())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::TimedOut => IoKind::Timeout,
            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::Interrupted => IoKind::Write,
            _ => IoKind::Write,
        };
        Self::with_cause(ErrorKind::Io(kind), err.to_string(), err)
    }
}
