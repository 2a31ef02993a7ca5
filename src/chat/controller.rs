//! The turn state machine that orchestrates one chat interaction.
//!
//! A turn moves through explicit phases, split so the single async
//! provider call happens between sync steps. Callers that share the
//! session behind a lock (the HTTP API) hold it only for `begin`,
//! `resolve`, and `persist`; callers that own the session (the CLI)
//! can use `run_turn`.
use anyhow::Result;

use crate::openai::{CompletionBackend, CompletionOutcome, get_response};
use crate::session::Session;

use super::models::{ChatTurn, Role};
use super::store::HistoryStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InputReceived,
    AwaitingCompletion,
    Rendering,
    Persisted,
}

/// One user interaction from input to persisted transcript.
pub struct Turn {
    phase: Phase,
    user_turn: ChatTurn,
    assistant_turn: Option<ChatTurn>,
    notice: Option<String>,
}

impl Turn {
    /// Accept user input: record the user turn in the session history
    /// and hand control to the provider call.
    pub fn begin(session: &mut Session, text: &str) -> Self {
        let mut turn = Self {
            phase: Phase::Idle,
            user_turn: ChatTurn::now(Role::User, text),
            assistant_turn: None,
            notice: None,
        };
        turn.set_phase(Phase::InputReceived);
        session.history.push(turn.user_turn.clone());
        turn.set_phase(Phase::AwaitingCompletion);
        turn
    }

    /// Record the provider's reply, or the recovered error text that
    /// stands in for it.
    pub fn resolve(&mut self, session: &mut Session, outcome: CompletionOutcome) {
        debug_assert_eq!(self.phase, Phase::AwaitingCompletion);
        let assistant_turn = ChatTurn::now(Role::Assistant, &outcome.text);
        session.history.push(assistant_turn.clone());
        self.assistant_turn = Some(assistant_turn);
        self.notice = outcome.notice;
        self.set_phase(Phase::Rendering);
    }

    /// Cap the transcript to the retention window and write it out.
    /// A save failure propagates and aborts the interaction.
    pub fn persist(&mut self, session: &mut Session, store: &HistoryStore) -> Result<()> {
        debug_assert_eq!(self.phase, Phase::Rendering);
        session.history.truncate_to_recent();
        store.save(&session.history)?;
        self.set_phase(Phase::Persisted);
        self.set_phase(Phase::Idle);
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user_turn(&self) -> &ChatTurn {
        &self.user_turn
    }

    /// The assistant's reply. Only present once the turn has resolved.
    pub fn assistant_turn(&self) -> Option<&ChatTurn> {
        self.assistant_turn.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!("Turn phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

/// The pieces of a completed turn the presentation layer renders.
pub struct TurnOutcome {
    pub user_turn: ChatTurn,
    pub assistant_turn: ChatTurn,
    pub notice: Option<String>,
}

/// Drive a whole turn for a caller that owns the session outright.
pub async fn run_turn(
    session: &mut Session,
    store: &HistoryStore,
    backend: &dyn CompletionBackend,
    system_message: &str,
    text: &str,
) -> Result<TurnOutcome> {
    let mut turn = Turn::begin(session, text);
    let outcome = get_response(backend, system_message, text).await;
    turn.resolve(session, outcome);
    turn.persist(session, store)?;

    let assistant_turn = turn
        .assistant_turn()
        .cloned()
        .unwrap_or_else(|| ChatTurn::now(Role::Assistant, ""));
    Ok(TurnOutcome {
        user_turn: turn.user_turn().clone(),
        assistant_turn,
        notice: turn.notice.take(),
    })
}

/// Empty the in-memory transcript and persist the empty array.
pub fn clear_history(session: &mut Session, store: &HistoryStore) -> Result<()> {
    session.history.clear();
    store.save(&session.history)?;
    Ok(())
}
