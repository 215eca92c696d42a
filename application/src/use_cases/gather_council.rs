//! Gather Council use case
//!
//! Fans one query out to every specialist and the search provider at once
//! and assembles the settled outcomes into a [`ResultBundle`].

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::invoke::{SearchInvoker, SpecialistInvoker};
use astris_domain::{Phase, Query, ResultBundle, Role, SpecialistResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Reason recorded for a role that has no invoker
pub const NO_PROVIDER_REASON: &str = "no provider configured for role";

/// Which branch a settled task belongs to
enum Branch {
    Specialist(Role),
    Search,
}

/// Runs every council branch concurrently for one request.
///
/// Branches never see each other's output. The returned bundle is total over
/// [`Role::ALL`] and independent of completion order.
pub struct FanOutCoordinator {
    specialists: BTreeMap<Role, Arc<SpecialistInvoker>>,
    search: Arc<SearchInvoker>,
}

impl FanOutCoordinator {
    pub fn new(
        specialists: impl IntoIterator<Item = SpecialistInvoker>,
        search: SearchInvoker,
    ) -> Self {
        Self {
            specialists: specialists
                .into_iter()
                .map(|invoker| (invoker.role(), Arc::new(invoker)))
                .collect(),
            search: Arc::new(search),
        }
    }

    /// Roles that have an invoker
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.specialists.keys().copied()
    }

    /// Worst-case duration of [`gather`](Self::gather): the largest branch timeout
    pub fn worst_case(&self) -> Duration {
        self.specialists
            .values()
            .map(|invoker| invoker.timeout())
            .fold(self.search.timeout(), Duration::max)
    }

    /// Gather all branches with default (no-op) progress
    pub async fn gather(&self, query: &Query) -> ResultBundle {
        self.gather_with_progress(query, &NoProgress).await
    }

    /// Gather all branches with progress callbacks.
    ///
    /// Waits until every branch has settled. Never fails: a branch that fails,
    /// times out or panics is recorded as a `Failure` entry. Dropping the
    /// returned future aborts every outstanding branch.
    pub async fn gather_with_progress(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> ResultBundle {
        info!(
            "Gathering council: {} specialists + search",
            self.specialists.len()
        );
        progress.on_phase_start(&Phase::Council, self.specialists.len() + 1);

        let mut join_set = JoinSet::new();

        for (role, invoker) in &self.specialists {
            let role = *role;
            let invoker = Arc::clone(invoker);
            let query = query.clone();

            join_set.spawn(async move {
                let result = invoker.invoke(&query).await;
                (Branch::Specialist(role), result)
            });
        }

        {
            let search = Arc::clone(&self.search);
            let query = query.clone();

            join_set.spawn(async move {
                let result = search.invoke(&query).await;
                (Branch::Search, result)
            });
        }

        let mut settled: BTreeMap<Role, SpecialistResult> = Role::ALL
            .into_iter()
            .filter(|role| !self.specialists.contains_key(role))
            .map(|role| (role, SpecialistResult::failure(NO_PROVIDER_REASON)))
            .collect();
        let mut research = None;

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((Branch::Specialist(role), result)) => {
                    progress.on_task_complete(&Phase::Council, role.council_name(), result.is_success());
                    settled.insert(role, result);
                }
                Ok((Branch::Search, result)) => {
                    progress.on_task_complete(&Phase::Council, "search", result.is_success());
                    research = Some(result);
                }
                Err(e) => {
                    // Leaves the branch unsettled; assemble() records it as a failure.
                    error!("Council branch aborted: {}", e);
                }
            }
        }

        let bundle = ResultBundle::assemble(settled, research);
        info!(
            "Council gathered: {}/{} specialists succeeded, search {}",
            bundle.successful_specialists(),
            bundle.len(),
            bundle.research().label()
        );
        progress.on_phase_complete(&Phase::Council);
        bundle
    }
}
