use crate::window::WindowId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceError {
    /// The host has no window for this handle.
    UnknownWindow(WindowId),

    /// A persisted state written by a different format version.
    UnsupportedVersion { found: u32, expected: u32 },
}

impl std::fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownWindow(id) => write!(f, "unknown window: {id}"),
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported workspace state version: {found} (expected {expected})"
                )
            }
        }
    }
}

impl std::error::Error for WorkspaceError {}
