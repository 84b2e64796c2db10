//! Account roles
//!
//! Every account is exactly one of client or seller. At the API boundary the
//! roles are spelled `cliente` and `vendedor`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Buyer account (`cliente`)
    #[serde(rename = "cliente")]
    Client,
    /// Vendor account (`vendedor`)
    #[serde(rename = "vendedor")]
    Seller,
}

impl Role {
    /// Every role, in the order partitions are searched
    pub const ALL: [Role; 2] = [Role::Client, Role::Seller];

    pub fn is_seller(self) -> bool {
        matches!(self, Role::Seller)
    }

    /// Boundary spelling of the role
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "cliente",
            Role::Seller => "vendedor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
