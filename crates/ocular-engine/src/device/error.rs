/// What the runtime should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; mirroring resumes next frame.
    Reconfigured,
    /// Transient; skip this mirror frame.
    SkipFrame,
    /// Out of memory; shut down.
    Fatal,
}
