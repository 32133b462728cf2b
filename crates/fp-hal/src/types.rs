use core::fmt;

/// One enrolled template, identified within its enrollment group.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Finger {
    pub id: u32,
    pub group: u32,
}

impl Finger {
    pub fn new(id: u32, group: u32) -> Self {
        Self { id, group }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fid {fid} gid {gid}", fid = self.id, gid = self.group)
    }
}

/// Opaque hardware auth token handed back on a successful match.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthToken(pub Vec<u8>);

/// Error codes a backend can report through its notification channel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HalErrorCode {
    HwUnavailable,
    UnableToProcess,
    Timeout,
    NoSpace,
    Canceled,
    UnableToRemove,
    Lockout,
    LockoutPermanent,
    Vendor(i32),
}

/// Image acquisition feedback reported during capture.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AcquiredInfo {
    Good,
    Partial,
    Insufficient,
    ImagerDirty,
    TooSlow,
    TooFast,
    Vendor(i32),
}

/// One hardware-originated message from the sensing backend. Delivered on
/// backend-chosen threads, fire-and-forget.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendEvent {
    Error(HalErrorCode),
    Acquired(AcquiredInfo),
    EnrollProgress {
        finger: Finger,
        samples_remaining: u32,
    },
    /// A finger id of zero means no match.
    Authenticated {
        finger: Finger,
        token: Option<AuthToken>,
    },
    Enumerated {
        fingers: Vec<Finger>,
        remaining: u32,
    },
    Removed {
        fingers: Vec<Finger>,
        remaining: u32,
    },
}
