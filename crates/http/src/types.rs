//! Request types for the demo API

use crate::client::error::ClientError;
use serde::{Deserialize, Serialize};

/// Body for `POST /user/data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDataRequest {
    pub name: String,
    pub message: String,
}

impl UserDataRequest {
    /// Reject missing input before any network action.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.name.is_empty() || self.message.is_empty() {
            return Err(ClientError::InvalidRequest(
                "Please fill in both name and message fields".to_string(),
            ));
        }
        Ok(())
    }
}
