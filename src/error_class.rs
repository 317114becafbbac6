//! Failure taxonomy for backend calls.
//!
//! | Class        | Status      | Retryable | Caused by                  |
//! |--------------|-------------|-----------|----------------------------|
//! | `ClientData` | 400..=499   | no        | input the caller must fix  |
//! | `Server`     | 500..=599   | yes       | backend, transient         |
//! | `Network`    | 0           | yes       | no response received       |
//! | `Unexpected` | anything else | yes     | local or unclassified      |
//!
//! ## Example
//!
//! ```rust
//! use call_helper_client::error_class::ErrorClass;
//!
//! let class = ErrorClass::from_status(503);
//! assert_eq!(class, ErrorClass::Server);
//! assert!(class.retryable());
//! assert_eq!(class.name(), "server_error");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// 4xx: the request itself is wrong; retrying cannot help.
    ClientData,
    /// 5xx: the backend failed; may succeed later.
    Server,
    /// No HTTP response arrived (status 0).
    Network,
    /// Anything that does not fit the classes above.
    Unexpected,
}

impl ErrorClass {
    /// Classify a normalized status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            0 => Self::Network,
            400..=499 => Self::ClientData,
            500..=599 => Self::Server,
            _ => Self::Unexpected,
        }
    }

    /// Returns the standard name (e.g., `"client_data"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClientData => "client_data",
            Self::Server => "server_error",
            Self::Network => "network_error",
            Self::Unexpected => "unexpected",
        }
    }

    /// Only client-caused failures are excluded from retries.
    #[inline]
    pub fn retryable(&self) -> bool {
        !matches!(self, Self::ClientData)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
