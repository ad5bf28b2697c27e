use std::fmt;

/// Lifecycle phase of an [`HmdSession`](crate::frame::HmdSession).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Configured,
    Destroyed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Configured => "configured",
            SessionState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// Errors raised by the HMD session and its collaborators.
///
/// Setup-phase variants (`DeviceInit`, `ResourceAllocation`) are fatal: the
/// session never reaches a renderable state. `DeviceQuery` is raised per
/// frame and is never retried internally.
#[derive(Debug, Clone, PartialEq)]
pub enum HmdError {
    /// The device refused tracking or rendering configuration.
    DeviceInit(String),

    /// A per-frame device call produced no usable data.
    DeviceQuery {
        frame: i64,
        call: &'static str,
    },

    /// A render target or texture could not be allocated.
    ResourceAllocation(String),

    /// An operation was attempted in the wrong lifecycle phase.
    InvalidState {
        op: &'static str,
        state: SessionState,
    },
}

impl HmdError {
    pub(crate) fn device_init(msg: impl Into<String>) -> Self {
        Self::DeviceInit(msg.into())
    }

    pub fn resource_allocation(msg: impl Into<String>) -> Self {
        Self::ResourceAllocation(msg.into())
    }

    /// Whether the session can keep running after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, HmdError::DeviceQuery { .. })
    }
}

impl fmt::Display for HmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HmdError::DeviceInit(msg) => write!(f, "hmd device init failed: {msg}"),
            HmdError::DeviceQuery { frame, call } => {
                write!(f, "hmd device returned no data for `{call}` at frame {frame}")
            }
            HmdError::ResourceAllocation(msg) => {
                write!(f, "render resource allocation failed: {msg}")
            }
            HmdError::InvalidState { op, state } => {
                write!(f, "cannot {op} while session is {state}")
            }
        }
    }
}

impl std::error::Error for HmdError {}
