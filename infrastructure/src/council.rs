//! Council assembly
//!
//! Builds a ready [`DeliberationOrchestrator`] from validated configuration
//! and resolved credentials. This is the only place that knows which
//! adapter backs which role.

use crate::config::{ConfigError, Credentials, FileConfig, ProviderRoute};
use crate::providers::{ChatGateway, InferenceGateway, ProviderKind, WebSearchGateway, build_client};
use astris_application::{
    DeliberationOrchestrator, FanOutCoordinator, LlmGateway, SearchInvoker, SpecialistInvoker,
    SynthesisInvoker, SynthesisProvider,
};
use astris_domain::{ConfigIssue, ConfigIssueCode, Role};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Factory for the deliberation pipeline
pub struct CouncilFactory<'a> {
    config: &'a FileConfig,
    credentials: &'a Credentials,
    client: reqwest::Client,
    gateways: HashMap<(ProviderKind, String), Arc<dyn LlmGateway>>,
}

impl<'a> CouncilFactory<'a> {
    pub fn new(config: &'a FileConfig, credentials: &'a Credentials) -> Result<Self, ConfigError> {
        let client = build_client().map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self::with_client(config, credentials, client))
    }

    pub fn with_client(
        config: &'a FileConfig,
        credentials: &'a Credentials,
        client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            credentials,
            client,
            gateways: HashMap::new(),
        }
    }

    /// Validate the configuration and wire every invoker.
    ///
    /// Warnings are logged; any error aborts with [`ConfigError::Invalid`].
    pub fn build(mut self) -> Result<DeliberationOrchestrator, ConfigError> {
        let issues = self.config.validate();
        if ConfigIssue::has_errors(&issues) {
            return Err(ConfigError::Invalid(issues));
        }
        for issue in &issues {
            warn!("{}", issue);
        }

        let params = self.config.council.to_params();

        let mut specialists = Vec::with_capacity(Role::ALL.len());
        for role in Role::ALL {
            let route = self.config.specialist_route(role).map_err(invalid)?;
            info!("{} -> {}", role.council_name(), route.label());
            let gateway = self.gateway(&route);
            specialists.push(
                SpecialistInvoker::new(role, gateway, &params).with_timeout(route.timeout),
            );
        }

        let search_config = &self.config.providers.search;
        let search = SearchInvoker::new(
            Arc::new(
                WebSearchGateway::new(
                    self.client.clone(),
                    &search_config.base_url,
                    self.credentials.search.clone(),
                )
                .with_max_results(search_config.max_results)
                .with_search_depth(search_config.search_depth.clone()),
            ),
            &params,
        );

        let mut chain = Vec::with_capacity(self.config.synthesis.chain.len());
        for route in self.config.synthesis_routes().map_err(invalid)? {
            info!("Synthesis link {} -> {}", chain.len() + 1, route.label());
            let gateway = self.gateway(&route);
            chain.push(SynthesisProvider::new(route.label(), gateway, route.timeout));
        }

        let synthesizer = SynthesisInvoker::new(chain, &params).map_err(|e| {
            invalid(ConfigIssue::error(
                ConfigIssueCode::EmptySynthesisChain,
                e.to_string(),
            ))
        })?;

        Ok(DeliberationOrchestrator::new(
            FanOutCoordinator::new(specialists, search),
            synthesizer,
        ))
    }

    /// Gateway for a route, shared between roles and chain links that use the
    /// same family and model
    fn gateway(&mut self, route: &ProviderRoute) -> Arc<dyn LlmGateway> {
        let providers = &self.config.providers;
        let credentials = self.credentials;
        let client = &self.client;

        self.gateways
            .entry((route.kind, route.model.clone()))
            .or_insert_with(|| -> Arc<dyn LlmGateway> {
                match route.kind {
                    ProviderKind::Inference => Arc::new(InferenceGateway::new(
                        client.clone(),
                        &providers.inference.base_url,
                        credentials.inference.clone(),
                        &route.model,
                    )),
                    ProviderKind::Chat => Arc::new(ChatGateway::new(
                        client.clone(),
                        &providers.chat.base_url,
                        credentials.chat.clone(),
                        route.model.clone(),
                    )),
                }
            })
            .clone()
    }
}

fn invalid(issue: ConfigIssue) -> ConfigError {
    ConfigError::Invalid(vec![issue])
}
