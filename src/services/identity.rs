//! Identity taken from the configured session.

use super::IdentityProvider;
use crate::models::Identity;

#[derive(Debug, Clone)]
pub struct SessionIdentity {
    user_id: Option<String>,
}

impl SessionIdentity {
    pub fn new(user_id: Option<String>) -> Self {
        Self { user_id }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current(&self) -> Identity {
        match &self.user_id {
            Some(id) => Identity::signed_in(id.clone()),
            None => Identity::signed_out(),
        }
    }
}
