/// Notification contact model
use serde::{Deserialize, Serialize};

use super::Audience;

/// An address that receives notifications for one or both audiences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub is_chapel: bool,
    pub is_praise: bool,
}

impl Contact {
    pub fn receives(&self, audience: Audience) -> bool {
        match audience {
            Audience::Chapel => self.is_chapel,
            Audience::Praise => self.is_praise,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_chapel: bool,
    #[serde(default)]
    pub is_praise: bool,
}
