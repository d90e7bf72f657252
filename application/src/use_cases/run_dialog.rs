//! Run Dialog use case
//!
//! Orchestrates a full dialog simulation: scene setting, greetings, and
//! up to `max_rounds` round-robin discussion rounds.
//!
//! Generation is strictly sequential — every prompt embeds the
//! transcript including the previous reply, so there is nothing to
//! parallelize. Round structure:
//!
//! - the run ends early as soon as no agent has a topic left to offer,
//! - a pending speaker override claims the whole round for its target
//!   (nobody else speaks, the topic round counter is untouched),
//! - otherwise every agent gets a turn in roster order, and `support`
//!   or `confirm` turns credit one discussion round to the owned topic.

use crate::ports::conversation_logger::{ConversationLogger, DialogEvent, NoConversationLogger};
use crate::ports::observer::{DialogObserver, NoObserver};
use crate::ports::text_generator::{GenerationError, GenerationParams, TextGenerator};
use colloquy_domain::{
    ActionKind, AgentProfile, DialogOutcome, DialogPrompts, DrawSource, SessionState, SpeakerId,
    Transcript, Turn, clean_reply, decide_action, preview,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Discussion rounds when the caller does not override them.
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

// Token budgets per turn kind. Topic introductions get room to breathe,
// greetings and end reflections stay short.
const SCENE_TOKENS: u32 = 80;
const GREETING_TOKENS: u32 = 50;
const TOPIC_TOKENS: u32 = 150;
const REFLECT_TOKENS: u32 = 50;
const REPLY_TOKENS: u32 = 100;

/// Errors that can occur during a dialog run
#[derive(Error, Debug)]
pub enum RunDialogError {
    #[error("No agents in the roster")]
    EmptyRoster,

    #[error("Speaker override names unknown agent '{target}'")]
    UnknownOverrideTarget {
        target: SpeakerId,
        /// Turns recorded before the failure.
        partial: Transcript,
    },

    #[error("Generation failed for {speaker}: {source}")]
    Generation {
        speaker: SpeakerId,
        #[source]
        source: GenerationError,
        /// Turns recorded before the failure.
        partial: Transcript,
    },
}

impl RunDialogError {
    /// The transcript as it stood when the run failed, for inspection
    /// or export. Absent only when the run never started.
    pub fn partial_transcript(&self) -> Option<&Transcript> {
        match self {
            RunDialogError::EmptyRoster => None,
            RunDialogError::UnknownOverrideTarget { partial, .. }
            | RunDialogError::Generation { partial, .. } => Some(partial),
        }
    }
}

/// Input for the RunDialog use case
#[derive(Debug, Clone)]
pub struct RunDialogInput {
    /// Participants, in speaking order.
    pub roster: Vec<AgentProfile>,
    /// Upper bound on discussion rounds.
    pub max_rounds: u32,
    /// Base sampling parameters; per-turn token budgets are applied on
    /// top of these.
    pub params: GenerationParams,
}

impl RunDialogInput {
    pub fn new(roster: Vec<AgentProfile>) -> Self {
        Self {
            roster,
            max_rounds: DEFAULT_MAX_ROUNDS,
            params: GenerationParams::default(),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// Why the round loop stopped before producing an outcome.
#[derive(Debug)]
enum Interrupt {
    UnknownOverrideTarget(SpeakerId),
    Generation {
        speaker: SpeakerId,
        source: GenerationError,
    },
}

/// Mutable state of one simulation run.
struct RunState {
    roster: Vec<AgentProfile>,
    session: SessionState,
    transcript: Transcript,
}

impl RunState {
    fn new(roster: Vec<AgentProfile>) -> Self {
        Self {
            roster,
            session: SessionState::new(),
            transcript: Transcript::new(),
        }
    }

    fn any_topics_remaining(&self) -> bool {
        self.roster.iter().any(AgentProfile::has_remaining_topic)
    }

    fn decide(&mut self, idx: usize, rng: &mut dyn DrawSource) -> Option<ActionKind> {
        decide_action(&self.roster[idx], &self.transcript, &mut self.session, rng)
    }

    /// Builds the prompt and token budget for one turn, applying the
    /// action's side effects: a topic change claims ownership and
    /// advances the speaker's queue, a probe places the override.
    fn compose_turn(
        &mut self,
        action: ActionKind,
        idx: usize,
        rng: &mut dyn DrawSource,
    ) -> (String, u32) {
        match action {
            ActionKind::ChangeTopic => {
                let initiator = self.roster[idx].id().clone();
                self.session.begin_topic(initiator);
                self.roster[idx].advance_topic();
                let agent = &self.roster[idx];
                let prompt = match agent.current_topic() {
                    Some(topic) => DialogPrompts::introduce_topic(&self.transcript, agent, topic),
                    None => DialogPrompts::closing(&self.transcript, agent),
                };
                (prompt, TOPIC_TOKENS)
            }
            ActionKind::Support => (
                DialogPrompts::support(&self.transcript, &self.roster[idx]),
                REPLY_TOKENS,
            ),
            ActionKind::Confirm => (
                DialogPrompts::confirm(&self.transcript, &self.roster[idx]),
                REPLY_TOKENS,
            ),
            ActionKind::ReflectEnd => (
                DialogPrompts::reflect_end(&self.transcript, &self.roster[idx]),
                REFLECT_TOKENS,
            ),
            ActionKind::Summary => (
                DialogPrompts::summary(&self.transcript, &self.roster[idx]),
                REPLY_TOKENS,
            ),
            ActionKind::Probe => {
                let target = self.pick_probe_target(idx, rng);
                if let Some(target) = &target {
                    self.session.set_override(target.clone());
                }
                let prompt =
                    DialogPrompts::probe(&self.transcript, &self.roster[idx], target.as_ref());
                (prompt, REPLY_TOKENS)
            }
        }
    }

    /// Picks a probe target uniformly among the other agents. A lone
    /// agent probes the group as a whole and grants no override.
    fn pick_probe_target(&self, idx: usize, rng: &mut dyn DrawSource) -> Option<SpeakerId> {
        let others: Vec<&SpeakerId> = self
            .roster
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, agent)| agent.id())
            .collect();
        if others.is_empty() {
            return None;
        }
        Some(others[rng.pick_index(others.len())].clone())
    }
}

/// Use case for running a dialog simulation
pub struct RunDialogUseCase<G: TextGenerator + 'static> {
    generator: Arc<G>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<G: TextGenerator + 'static> RunDialogUseCase<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute the use case without live output
    pub async fn execute(
        &self,
        input: RunDialogInput,
        rng: &mut dyn DrawSource,
    ) -> Result<DialogOutcome, RunDialogError> {
        self.execute_with_observer(input, rng, &NoObserver).await
    }

    /// Execute the use case with live observer callbacks
    pub async fn execute_with_observer(
        &self,
        input: RunDialogInput,
        rng: &mut dyn DrawSource,
        observer: &dyn DialogObserver,
    ) -> Result<DialogOutcome, RunDialogError> {
        if input.roster.is_empty() {
            return Err(RunDialogError::EmptyRoster);
        }

        info!("Starting dialog with {} agents", input.roster.len());

        let mut state = RunState::new(input.roster);
        let result = self
            .run_simulation(&mut state, input.max_rounds, &input.params, rng, observer)
            .await;
        let RunState {
            session, transcript, ..
        } = state;

        match result {
            Ok(rounds_completed) => {
                let end_signalers = session.end_signalers().clone();
                observer.on_dialog_complete(rounds_completed);
                self.conversation_logger
                    .record(DialogEvent::complete(rounds_completed, &end_signalers));
                info!("Dialog complete after {} rounds", rounds_completed);
                Ok(DialogOutcome {
                    transcript,
                    rounds_completed,
                    end_signalers,
                })
            }
            Err(Interrupt::UnknownOverrideTarget(target)) => {
                Err(RunDialogError::UnknownOverrideTarget {
                    target,
                    partial: transcript,
                })
            }
            Err(Interrupt::Generation { speaker, source }) => Err(RunDialogError::Generation {
                speaker,
                source,
                partial: transcript,
            }),
        }
    }

    async fn run_simulation(
        &self,
        state: &mut RunState,
        max_rounds: u32,
        params: &GenerationParams,
        rng: &mut dyn DrawSource,
        observer: &dyn DialogObserver,
    ) -> Result<u32, Interrupt> {
        let scene = self.open_scene(state, params, observer).await?;
        self.exchange_greetings(state, &scene, params, observer)
            .await?;
        self.run_rounds(state, max_rounds, params, rng, observer)
            .await
    }

    /// Generates the scene description and records it as the narrator's
    /// turn. The scene is used raw, without reply cleanup.
    async fn open_scene(
        &self,
        state: &mut RunState,
        params: &GenerationParams,
        observer: &dyn DialogObserver,
    ) -> Result<String, Interrupt> {
        let names: Vec<&str> = state.roster.iter().map(|a| a.id().as_str()).collect();
        let prompt = DialogPrompts::scene(&names);
        let narrator = SpeakerId::narrator();

        observer.on_generation_start(&narrator);
        let scene = self
            .generate(&prompt, params.with_max_new_tokens(SCENE_TOKENS), &narrator)
            .await?;
        debug!("Scene set: {}", preview(&scene, 80));
        observer.on_scene(&scene);
        self.conversation_logger.record(DialogEvent::scene(&scene));
        state.transcript.push(Turn::new(narrator, scene.clone()));
        Ok(scene)
    }

    /// One greeting per agent, in roster order, anchored to the scene.
    async fn exchange_greetings(
        &self,
        state: &mut RunState,
        scene: &str,
        params: &GenerationParams,
        observer: &dyn DialogObserver,
    ) -> Result<(), Interrupt> {
        for idx in 0..state.roster.len() {
            let agent = &state.roster[idx];
            let prompt = DialogPrompts::greeting(scene, agent);
            let speaker = agent.id().clone();

            observer.on_generation_start(&speaker);
            let raw = self
                .generate(
                    &prompt,
                    params.with_max_new_tokens(GREETING_TOKENS),
                    &speaker,
                )
                .await?;
            let greeting = clean_reply(&raw, &prompt);
            debug!("{} greets: {}", speaker, preview(&greeting, 60));
            observer.on_greeting(&speaker, &greeting);
            self.conversation_logger
                .record(DialogEvent::greeting(&speaker, &greeting));
            state.transcript.push(Turn::new(speaker, greeting));
        }
        Ok(())
    }

    async fn run_rounds(
        &self,
        state: &mut RunState,
        max_rounds: u32,
        params: &GenerationParams,
        rng: &mut dyn DrawSource,
        observer: &dyn DialogObserver,
    ) -> Result<u32, Interrupt> {
        let mut rounds_completed = 0;
        for round in 1..=max_rounds {
            if !state.any_topics_remaining() {
                debug!("Round {}: all topic queues exhausted", round);
                break;
            }
            observer.on_round_start(round);

            if let Some(target) = state.session.pending_override().cloned() {
                let Some(idx) = state.roster.iter().position(|a| *a.id() == target) else {
                    return Err(Interrupt::UnknownOverrideTarget(target));
                };
                // The granted agent gets the round to itself; its turn
                // does not count toward the topic's discussion rounds.
                if let Some(action) = state.decide(idx, rng) {
                    self.take_turn(state, action, idx, round, params, rng, observer)
                        .await?;
                }
                rounds_completed = round;
                continue;
            }

            for idx in 0..state.roster.len() {
                let Some(action) = state.decide(idx, rng) else {
                    continue;
                };
                self.take_turn(state, action, idx, round, params, rng, observer)
                    .await?;
                if matches!(action, ActionKind::Support | ActionKind::Confirm)
                    && state.session.topic_initiator().is_some()
                {
                    state.session.record_topic_round();
                }
            }
            rounds_completed = round;
        }
        Ok(rounds_completed)
    }

    /// Performs one decided turn: compose the prompt (with side
    /// effects), generate, clean, append, and notify.
    async fn take_turn(
        &self,
        state: &mut RunState,
        action: ActionKind,
        idx: usize,
        round: u32,
        params: &GenerationParams,
        rng: &mut dyn DrawSource,
        observer: &dyn DialogObserver,
    ) -> Result<(), Interrupt> {
        let (prompt, budget) = state.compose_turn(action, idx, rng);
        let speaker = state.roster[idx].id().clone();

        observer.on_generation_start(&speaker);
        let raw = self
            .generate(&prompt, params.with_max_new_tokens(budget), &speaker)
            .await?;
        let text = clean_reply(&raw, &prompt);
        debug!(
            "Round {}: {} ({}) {}",
            round,
            speaker,
            action,
            preview(&text, 80)
        );
        observer.on_turn(&speaker, action, &text);
        self.conversation_logger
            .record(DialogEvent::turn(round, &speaker, action, &text));
        state.transcript.push(Turn::new(speaker, text));
        Ok(())
    }

    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
        speaker: &SpeakerId,
    ) -> Result<String, Interrupt> {
        self.generator
            .generate(prompt, &params)
            .await
            .map_err(|source| Interrupt::Generation {
                speaker: speaker.clone(),
                source,
            })
    }
}
