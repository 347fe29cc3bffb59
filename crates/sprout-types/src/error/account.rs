//! Account capability errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::AccountFlag;

/// Local precondition failures of account operations.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum AccountError {
    /// The account was not loaded by token, so it cannot act on the server
    #[error("Cannot {operation} without an account token")]
    MissingToken {
        /// Operation that was refused
        operation: String,
    },

    /// The account lacks a flag the operation requires
    #[error("Account {username} lacks the {flag:?} flag")]
    MissingFlag {
        /// Username of the refused account
        username: String,
        /// Flag the operation requires
        flag: AccountFlag,
    },
}

impl AccountError {
    pub fn missing_token(operation: impl Into<String>) -> Self {
        Self::MissingToken { operation: operation.into() }
    }
}
