//! Result bundle - the fixed-shape output of the fan-out phase

use super::outcome::SpecialistResult;
use crate::core::role::Role;
use serde::Serialize;
use std::collections::BTreeMap;

/// Reason recorded for a branch that never reported back
pub const UNSETTLED_REASON: &str = "branch did not settle";

/// Every branch outcome of one deliberation, keyed by role.
///
/// Total over [`Role::ALL`]: every role has an entry once assembled, even if
/// that entry is a failure. Contents depend only on which outcome each role
/// produced, never on the order branches completed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultBundle {
    specialists: BTreeMap<Role, SpecialistResult>,
    research: SpecialistResult,
}

impl ResultBundle {
    /// Assemble a bundle from settled branches.
    ///
    /// Roles without an entry, and a missing search outcome, are recorded as
    /// failures so the result is always total.
    pub fn assemble(
        specialists: impl IntoIterator<Item = (Role, SpecialistResult)>,
        research: Option<SpecialistResult>,
    ) -> Self {
        let mut settled: BTreeMap<Role, SpecialistResult> = specialists.into_iter().collect();
        for role in Role::ALL {
            settled
                .entry(role)
                .or_insert_with(|| SpecialistResult::failure(UNSETTLED_REASON));
        }

        Self {
            specialists: settled,
            research: research.unwrap_or_else(|| SpecialistResult::failure(UNSETTLED_REASON)),
        }
    }

    /// Outcome for a role
    pub fn get(&self, role: Role) -> &SpecialistResult {
        // assemble() guarantees every role is present
        &self.specialists[&role]
    }

    /// Specialist outcomes in role order
    pub fn specialists(&self) -> impl Iterator<Item = (Role, &SpecialistResult)> {
        self.specialists.iter().map(|(role, result)| (*role, result))
    }

    /// Outcome of the search branch
    pub fn research(&self) -> &SpecialistResult {
        &self.research
    }

    /// Number of specialist entries (always `Role::ALL.len()`)
    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }

    /// Returns `true` if no specialist produced a successful result.
    pub fn all_specialists_failed(&self) -> bool {
        self.specialists.values().all(|r| !r.is_success())
    }

    /// Number of successful specialist branches
    pub fn successful_specialists(&self) -> usize {
        self.specialists.values().filter(|r| r.is_success()).count()
    }
}
