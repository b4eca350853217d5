use std::fmt;

/// An opaque bearer credential issued by the authentication service.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// The account context of the current user.
///
/// Without a credential the user is anonymous and named
/// address slots cannot be persisted remotely.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub credential: Option<BearerToken>,
}

impl Session {
    pub const fn anonymous() -> Self {
        Self { credential: None }
    }

    pub fn authenticated(token: BearerToken) -> Self {
        Self {
            credential: Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
