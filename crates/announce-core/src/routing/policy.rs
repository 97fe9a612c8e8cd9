/// Recipient policies
use crate::error::AnnounceError;
use crate::models::Audience;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule mapping a submission's audience flags to contact groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientPolicy {
    /// Contacts of every selected audience, chapel first
    #[default]
    ByAudience,
    /// Praise contacts only, whatever the submission selected
    AllPraise,
}

impl RecipientPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByAudience => "by_audience",
            Self::AllPraise => "all_praise",
        }
    }

    /// Contact groups to notify, in resolution order
    pub fn audiences(&self, selected: &[Audience]) -> Vec<Audience> {
        match self {
            Self::ByAudience => {
                let mut audiences = Vec::with_capacity(2);
                for audience in [Audience::Chapel, Audience::Praise] {
                    if selected.contains(&audience) {
                        audiences.push(audience);
                    }
                }
                audiences
            }
            Self::AllPraise => vec![Audience::Praise],
        }
    }
}

impl fmt::Display for RecipientPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientPolicy {
    type Err = AnnounceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "by_audience" => Ok(Self::ByAudience),
            "all_praise" => Ok(Self::AllPraise),
            other => Err(AnnounceError::Config(format!(
                "Unknown recipient policy: {}",
                other
            ))),
        }
    }
}
