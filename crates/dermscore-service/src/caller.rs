/// The identified user making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub uid: String,
    /// Admins may export results owned by any user.
    pub admin: bool,
}

impl Caller {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            admin: false,
        }
    }

    pub fn admin(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            admin: true,
        }
    }
}

/// Fail with `Unauthenticated` unless a caller was identified.
pub(crate) fn require(caller: Option<&Caller>) -> Result<&Caller, crate::ServiceError> {
    caller.ok_or(crate::ServiceError::Unauthenticated)
}
