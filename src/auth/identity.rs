use serde::{Deserialize, Serialize};

/// Opaque reference to a signed-in user. Every owned entity carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Holds the currently active identity, if any.
///
/// Nothing here authenticates: the sign-in flow lives outside the engine and
/// only tells the holder who is active.
#[derive(Debug, Clone, Default)]
pub struct IdentityHolder {
    current: Option<UserId>,
}

impl IdentityHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(id: UserId) -> Self {
        Self { current: Some(id) }
    }

    pub fn sign_in(&mut self, id: UserId) {
        tracing::debug!(user_id = %id, "Identity signed in");
        self.current = Some(id);
    }

    pub fn sign_out(&mut self) {
        if let Some(id) = self.current.take() {
            tracing::debug!(user_id = %id, "Identity signed out");
        }
    }

    pub fn current(&self) -> Option<&UserId> {
        self.current.as_ref()
    }
}
