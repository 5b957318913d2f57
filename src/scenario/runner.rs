use log::{error, info, warn};
use std::time::{Duration, Instant};

use super::model::{AuthMode, Scenario};
use crate::api::{ApiClient, TimedResponse};
use crate::auth::{HeaderSet, TokenCache, basic_auth_header, bearer_header};
use crate::compare::{self, LatencyCheck, StructuralMatch};
use crate::config::{ParityConfig, System};
use crate::error::{ParityError, Result, Side};

/// Final state of one scenario
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Passed,
    Failed(String),
    Skipped(String),
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Passed => "PASSED",
            Verdict::Failed(_) => "FAILED",
            Verdict::Skipped(_) => "SKIPPED",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Passed => None,
            Verdict::Failed(msg) | Verdict::Skipped(msg) => Some(msg),
        }
    }
}

/// Everything observed while running one scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub verdict: Verdict,
    pub legacy_status: Option<u16>,
    pub gateway_status: Option<u16>,
    pub legacy_elapsed: Option<Duration>,
    pub gateway_elapsed: Option<Duration>,
    pub latency: Option<LatencyCheck>,
    pub structure: Option<StructuralMatch>,
    pub duration: Duration,
}

impl ScenarioOutcome {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            verdict: Verdict::Passed,
            legacy_status: None,
            gateway_status: None,
            legacy_elapsed: None,
            gateway_elapsed: None,
            latency: None,
            structure: None,
            duration: Duration::ZERO,
        }
    }

    /// True when the latency check ran and breached its threshold
    pub fn latency_warning(&self) -> bool {
        self.latency.map(|l| !l.within_threshold).unwrap_or(false)
    }
}

/// Pass/fail/skip counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[ScenarioOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.verdict {
                Verdict::Passed => summary.passed += 1,
                Verdict::Failed(_) => summary.failed += 1,
                Verdict::Skipped(_) => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runs scenarios against the legacy and gateway backends
///
/// Configuration and the token cache belong to the caller; one runner per
/// process shares a single cache across all scenarios.
pub struct ScenarioRunner<'a> {
    config: &'a ParityConfig,
    tokens: &'a TokenCache,
    client: ApiClient,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(config: &'a ParityConfig, tokens: &'a TokenCache) -> Result<Self> {
        let client = ApiClient::new(&config.http)?;
        Ok(Self { config, tokens, client })
    }

    pub fn with_client(config: &'a ParityConfig, tokens: &'a TokenCache, client: ApiClient) -> Self {
        Self { config, tokens, client }
    }

    /// Run every scenario in order; a failure never stops the ones after it
    pub async fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(self.run(scenario).await);
        }
        outcomes
    }

    pub async fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        info!("▶ Running scenario {}", scenario.name);
        let start = Instant::now();
        let mut outcome = ScenarioOutcome::new(&scenario.name);

        let result = self.execute(scenario, &mut outcome).await;
        outcome.verdict = match result {
            Ok(()) => {
                info!("🎯 {}: legacy vs gateway comparison completed", scenario.name);
                Verdict::Passed
            }
            Err(ParityError::Skipped(reason)) => {
                warn!("⏭ {} skipped: {}", scenario.name, reason);
                Verdict::Skipped(reason)
            }
            Err(err) => {
                if err.is_mismatch() {
                    error!("❌ {} backends disagree: {}", scenario.name, err);
                } else {
                    error!("❌ {} failed: {}", scenario.name, err);
                }
                Verdict::Failed(err.to_string())
            }
        };

        outcome.duration = start.elapsed();
        outcome
    }

    async fn execute(&self, scenario: &Scenario, outcome: &mut ScenarioOutcome) -> Result<()> {
        let legacy_url = self.target_url(self.config.legacy_url.as_deref(), "MULE_URL", scenario)?;
        let gateway_url = self.target_url(self.config.gateway_url.as_deref(), "AZURE_URL", scenario)?;

        let mut legacy_headers = self.resolve_headers(scenario.auth, scenario.legacy_system).await?;
        let mut gateway_headers = self.resolve_headers(scenario.auth, scenario.gateway_system).await?;
        if let Some(value) = &scenario.authorization_override {
            legacy_headers = legacy_headers.with_authorization(value.clone());
            gateway_headers = gateway_headers.with_authorization(value.clone());
        }

        let legacy = self
            .send(Side::Legacy, scenario, &legacy_url, &legacy_headers)
            .await?;
        outcome.legacy_status = Some(legacy.response.status());
        outcome.legacy_elapsed = Some(legacy.elapsed);

        let gateway = self
            .send(Side::Gateway, scenario, &gateway_url, &gateway_headers)
            .await?;
        outcome.gateway_status = Some(gateway.response.status());
        outcome.gateway_elapsed = Some(gateway.elapsed);

        compare::check_status(&legacy.response, &gateway.response)?;
        outcome.latency = Some(compare::check_latency(
            legacy.elapsed_secs(),
            gateway.elapsed_secs(),
            self.config.response_time_threshold,
        ));
        outcome.structure = Some(compare::check_structure(&legacy.response, &gateway.response)?);
        Ok(())
    }

    async fn send(
        &self,
        side: Side,
        scenario: &Scenario,
        url: &str,
        headers: &HeaderSet,
    ) -> Result<TimedResponse> {
        let timed = self
            .client
            .timed_request(
                &scenario.method,
                url,
                headers,
                scenario.params.as_ref(),
                scenario.payload.as_ref(),
            )
            .await?;
        info!(
            "{} → Status: {} | Time: {:.3}s | Response: {}",
            side,
            timed.response.status(),
            timed.elapsed_secs(),
            timed.response.log_body()
        );
        Ok(timed)
    }

    fn target_url(&self, base: Option<&str>, variable: &str, scenario: &Scenario) -> Result<String> {
        let base = base.ok_or_else(|| ParityError::Config(format!("{} is not configured", variable)))?;
        Ok(format!("{}{}", base, scenario.path_suffix))
    }

    /// Headers for one side; the session template is copied, never modified
    async fn resolve_headers(&self, auth: AuthMode, system: System) -> Result<HeaderSet> {
        match auth {
            AuthMode::None => Ok(self.config.headers.clone()),
            AuthMode::Basic => {
                let creds = self.config.credentials(system);
                basic_auth_header(
                    &self.config.headers,
                    creds.username.as_deref(),
                    creds.password.as_deref(),
                )
                .map_err(|err| match err {
                    ParityError::Skipped(_) => {
                        ParityError::Skipped(format!("Missing credentials for {} basic auth.", system))
                    }
                    other => other,
                })
            }
            AuthMode::OAuth2 => {
                let key = self.config.token_key(system);
                let token = self.tokens.get_token(self.client.http_client(), &key).await?;
                Ok(bearer_header(&self.config.headers, &token, Some(&self.config.token_type)))
            }
        }
    }
}
