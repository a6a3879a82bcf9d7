//! Snapshot of the identity provider's session as seen by the page.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity {
    pub loaded: bool,
    pub signed_in: bool,
    pub user_id: Option<String>,
}

impl Identity {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            loaded: true,
            signed_in: true,
            user_id: Some(user_id.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            loaded: true,
            signed_in: false,
            user_id: None,
        }
    }

    /// User id usable for data access, only once the session is loaded and signed in.
    pub fn active_user(&self) -> Option<&str> {
        if self.loaded && self.signed_in {
            self.user_id.as_deref().filter(|id| !id.is_empty())
        } else {
            None
        }
    }
}
