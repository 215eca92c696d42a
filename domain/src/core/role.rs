//! Role value object representing a specialist councillor

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Specialist identities on the council (Value Object)
///
/// The set is fixed at compile time. Declaration order is the assembly order
/// used by [`ResultBundle`](crate::ResultBundle) and the synthesis prompt; it
/// never influences execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// The Empath: emotional validation of the user's situation
    EmotionalAssessment,
    /// The Chronicler: current context and trends
    ContextualResearch,
    /// The Analyst: a stepwise plan
    ActionPlanning,
    /// The Sentinel: cautions and risks
    RiskAssessment,
}

impl Role {
    /// Every role, in assembly order
    pub const ALL: [Role; 4] = [
        Role::EmotionalAssessment,
        Role::ContextualResearch,
        Role::ActionPlanning,
        Role::RiskAssessment,
    ];

    /// Get the string identifier for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::EmotionalAssessment => "emotional-assessment",
            Role::ContextualResearch => "contextual-research",
            Role::ActionPlanning => "action-planning",
            Role::RiskAssessment => "risk-assessment",
        }
    }

    /// Name of the councillor holding this role
    pub fn council_name(&self) -> &'static str {
        match self {
            Role::EmotionalAssessment => "The Empath",
            Role::ContextualResearch => "The Chronicler",
            Role::ActionPlanning => "The Analyst",
            Role::RiskAssessment => "The Sentinel",
        }
    }

    /// Placeholder carried by a degraded result for this role
    pub fn placeholder(&self) -> String {
        format!("{} could not provide an assessment.", self.council_name())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "emotional-assessment" => Ok(Role::EmotionalAssessment),
            "contextual-research" => Ok(Role::ContextualResearch),
            "action-planning" => Ok(Role::ActionPlanning),
            "risk-assessment" => Ok(Role::RiskAssessment),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
