//! Reason use case
//!
//! Orchestrates one query across the eligible personas:
//!
//! ```text
//! admission ─▶ bounded fan-out ─▶ fan-in barrier ─▶ synthesis ─▶ final answer
//!                                                                  │
//!                          record usage + analytics ◀── ReasoningChain
//! ```

use crate::config::OrchestratorConfig;
use crate::ports::analytics::{AnalyticsSink, NoAnalytics};
use crate::ports::generation::{Generation, GenerationError, GenerationPort};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::quota_ledger::QuotaLedger;
use personachain_domain::{
    Admission, AnalyticsEvent, DenialReason, PersonaConfig, PersonaRegistry, Query,
    ReasoningChain, ReasoningStep, SubscriberId, SubscriptionTier, SynthesisStrategy,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors that can occur during reasoning
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReasonError {
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(DenialReason),

    #[error("Usage storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl ReasonError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, ReasonError::QuotaExceeded(_))
    }
}

/// Input for the Reason use case
#[derive(Debug, Clone)]
pub struct ReasonInput {
    pub query: Query,
    pub subscriber: SubscriberId,
    pub tier: SubscriptionTier,
    /// Persona ids to run; `None` runs every eligible persona
    pub personas: Option<Vec<String>>,
    /// Per-persona token budget; `None` uses the configured default
    pub max_tokens_per_persona: Option<u64>,
    pub strategy: SynthesisStrategy,
}

impl ReasonInput {
    pub fn new(query: Query, subscriber: SubscriberId, tier: SubscriptionTier) -> Self {
        Self {
            query,
            subscriber,
            tier,
            personas: None,
            max_tokens_per_persona: None,
            strategy: SynthesisStrategy::default(),
        }
    }

    pub fn with_personas(mut self, personas: Vec<String>) -> Self {
        self.personas = Some(personas);
        self
    }

    pub fn with_max_tokens_per_persona(mut self, tokens: u64) -> Self {
        self.max_tokens_per_persona = Some(tokens);
        self
    }

    pub fn with_strategy(mut self, strategy: SynthesisStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Counters owned by one orchestrator instance, updated after each
/// completed request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    pub queries_processed: u64,
    pub total_tokens: u64,
}

/// Use case for reasoning about a query with multiple personas
pub struct ReasonUseCase<G: GenerationPort + 'static> {
    generator: Arc<G>,
    registry: Arc<PersonaRegistry>,
    ledger: Arc<QuotaLedger>,
    analytics: Arc<dyn AnalyticsSink>,
    config: OrchestratorConfig,
    stats: Mutex<UsageStats>,
}

impl<G: GenerationPort + 'static> ReasonUseCase<G> {
    pub fn new(generator: Arc<G>, registry: Arc<PersonaRegistry>, ledger: Arc<QuotaLedger>) -> Self {
        Self {
            generator,
            registry,
            ledger,
            analytics: Arc::new(NoAnalytics),
            config: OrchestratorConfig::default(),
            stats: Mutex::new(UsageStats::default()),
        }
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    /// Snapshot of the session counters
    pub fn stats(&self) -> UsageStats {
        self.stats.lock().map(|s| *s).unwrap_or_default()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: ReasonInput) -> Result<ReasoningChain, ReasonError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: ReasonInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ReasoningChain, ReasonError> {
        let started = Instant::now();

        let personas = self
            .registry
            .eligible_personas(input.tier, input.personas.as_deref());
        let max_tokens = input
            .max_tokens_per_persona
            .unwrap_or(self.config.max_tokens_per_persona);
        // Saturates so an oversized budget is denied instead of wrapping
        let tokens_requested = (personas.len() as u64).saturating_mul(max_tokens);

        let admission = self
            .ledger
            .check_admission(&input.subscriber, input.tier, tokens_requested, personas.len())
            .await;
        if let Admission::Denied(reason) = admission {
            warn!("Request from {} denied: {}", input.subscriber, reason);
            self.analytics.publish(AnalyticsEvent::denied(
                &input.subscriber,
                input.tier,
                &reason,
                tokens_requested,
            ));
            return Err(match reason {
                DenialReason::StorageUnavailable(e) => ReasonError::StorageUnavailable(e),
                other => ReasonError::QuotaExceeded(other),
            });
        }

        info!(
            "Reasoning with {} personas (tier: {}, strategy: {})",
            personas.len(),
            input.tier,
            input.strategy
        );

        let deadline = self
            .config
            .request_timeout
            .map(|limit| RequestDeadline::starting_at(started, limit));
        let (steps, partial) = self
            .fan_out(&input.query, &personas, max_tokens, deadline, progress)
            .await;

        progress.on_synthesis_start();
        let synthesis = input.strategy.apply(input.query.content(), &steps);
        let final_answer = self.final_answer(&input.query, &synthesis, deadline).await;
        progress.on_final_answer();

        let chain = ReasoningChain::assemble(
            input.query.content(),
            steps,
            synthesis,
            final_answer,
            started.elapsed(),
            input.tier,
            input.strategy,
            partial,
        );

        debug!(
            estimated = tokens_requested,
            actual = chain.total_tokens,
            "Token usage for chain {}",
            chain.chain_id
        );
        self.ledger
            .record_usage(&input.subscriber, chain.total_tokens)
            .await;
        self.record_stats(chain.total_tokens);
        self.analytics
            .publish(AnalyticsEvent::completed(&chain, &input.subscriber));

        info!(
            "Chain {} complete: {} steps, confidence {:.2}, {} tokens",
            chain.chain_id,
            chain.persona_steps.len(),
            chain.confidence_score,
            chain.total_tokens
        );
        Ok(chain)
    }

    /// Run every persona with at most `max_concurrent_personas` in flight
    /// and wait for all of them.
    ///
    /// Returns the steps in persona order and whether the request deadline
    /// cut the fan-out short.
    async fn fan_out(
        &self,
        query: &Query,
        personas: &[PersonaConfig],
        max_tokens: u64,
        deadline: Option<RequestDeadline>,
        progress: &dyn ProgressNotifier,
    ) -> (Vec<ReasoningStep>, bool) {
        progress.on_fan_out_start(personas.len());
        if personas.is_empty() {
            debug!("No eligible personas; skipping fan-out");
            return (Vec::new(), false);
        }

        let permits = Arc::new(Semaphore::new(self.config.max_concurrent_personas.max(1)));
        let mut join_set = JoinSet::new();
        let mut task_slots = HashMap::with_capacity(personas.len());

        for (index, persona) in personas.iter().enumerate() {
            let generator = Arc::clone(&self.generator);
            let permits = Arc::clone(&permits);
            let name = persona.name.clone();
            let prompt = persona.render_prompt(query.content());
            let timeout = self.config.persona_timeout;

            let handle = join_set.spawn(async move {
                let step =
                    Self::run_persona(&generator, &permits, name, &prompt, max_tokens, timeout)
                        .await;
                (index, step)
            });
            task_slots.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<ReasoningStep>> = vec![None; personas.len()];
        let mut partial = false;

        loop {
            let next = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline.at, join_set.join_next()).await {
                        Ok(next) => next,
                        Err(_) => {
                            warn!(
                                "Request deadline reached with {} persona(s) outstanding",
                                join_set.len()
                            );
                            join_set.abort_all();
                            partial = true;
                            break;
                        }
                    }
                }
                None => join_set.join_next().await,
            };

            let Some(result) = next else {
                break;
            };

            match result {
                Ok((index, step)) => {
                    progress.on_persona_complete(&step.persona_name, step.is_success());
                    slots[index] = Some(step);
                }
                Err(e) => {
                    warn!("Persona task join error: {}", e);
                    // A panicked task still owns its slot
                    if let Some(&index) = task_slots.get(&e.id()) {
                        let step = ReasoningStep::failure(
                            personas[index].name.clone(),
                            GenerationError::Aborted,
                            Duration::ZERO,
                        );
                        progress.on_persona_complete(&step.persona_name, false);
                        slots[index] = Some(step);
                    }
                }
            }
        }

        let steps = slots
            .into_iter()
            .zip(personas)
            .filter_map(|(slot, persona)| match slot {
                Some(step) => Some(step),
                None if partial => None,
                None => Some(ReasoningStep::failure(
                    persona.name.clone(),
                    GenerationError::Aborted,
                    Duration::ZERO,
                )),
            })
            .collect();

        (steps, partial)
    }

    /// One persona invocation; never fails, degrading errors into the step
    async fn run_persona(
        generator: &G,
        permits: &Semaphore,
        persona_name: String,
        prompt: &str,
        max_tokens: u64,
        timeout: Option<Duration>,
    ) -> ReasoningStep {
        // Held until this function returns, on every path
        let Ok(_permit) = permits.acquire().await else {
            return ReasoningStep::failure(persona_name, GenerationError::Aborted, Duration::ZERO);
        };

        let started = Instant::now();
        let result = Self::generate_with_deadline(generator, prompt, max_tokens, timeout).await;
        let elapsed = started.elapsed();

        match result {
            Ok(generation) => {
                debug!(
                    "Persona {} responded ({} tokens, {:?})",
                    persona_name, generation.tokens_consumed, elapsed
                );
                ReasoningStep::success(
                    persona_name,
                    generation.text,
                    generation.tokens_consumed,
                    elapsed,
                )
            }
            Err(e) => {
                warn!("Persona {} failed: {}", persona_name, e);
                ReasoningStep::failure(persona_name, e, elapsed)
            }
        }
    }

    /// Bounded by the per-persona timeout and by whatever is left of the
    /// request deadline
    async fn final_answer(
        &self,
        query: &Query,
        synthesis: &str,
        deadline: Option<RequestDeadline>,
    ) -> String {
        let prompt = final_answer_prompt(query.content(), synthesis);
        let call = Self::generate_with_deadline(
            &self.generator,
            &prompt,
            self.config.final_answer_max_tokens,
            self.config.persona_timeout,
        );
        let result = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline.at, call)
                .await
                .unwrap_or(Err(GenerationError::Timeout(deadline.limit))),
            None => call.await,
        };

        match result {
            Ok(generation) => generation.text,
            Err(e) => {
                warn!("Final answer generation failed: {}", e);
                format!("Error: {}", e)
            }
        }
    }

    async fn generate_with_deadline(
        generator: &G,
        prompt: &str,
        max_tokens: u64,
        timeout: Option<Duration>,
    ) -> Result<Generation, GenerationError> {
        match timeout {
            Some(timeout) => {
                match tokio::time::timeout(timeout, generator.generate(prompt, max_tokens)).await {
                    Ok(result) => result,
                    Err(_) => Err(GenerationError::Timeout(timeout)),
                }
            }
            None => generator.generate(prompt, max_tokens).await,
        }
    }

    fn record_stats(&self, tokens: u64) {
        if let Ok(mut stats) = self.stats.lock() {
            stats.queries_processed += 1;
            stats.total_tokens += tokens;
        }
    }
}

/// Absolute end of one request and the limit it was derived from
#[derive(Debug, Clone, Copy)]
struct RequestDeadline {
    at: Instant,
    limit: Duration,
}

impl RequestDeadline {
    fn starting_at(started: Instant, limit: Duration) -> Self {
        Self {
            at: started + limit,
            limit,
        }
    }
}

/// Prompt for the final-answer call
pub fn final_answer_prompt(query: &str, synthesis: &str) -> String {
    format!(
        "Final answer for: {}\n\n{}\n\nPlease provide a concise final answer.",
        query, synthesis
    )
}
