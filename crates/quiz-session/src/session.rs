use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quiz_spec::{
    AnswerInput, AnswerMap, Question, Questionnaire, QuestionnaireMode, Summary,
    attach_right_answers, default_questionnaire, evaluate_record, is_completed, summarize,
};

use crate::error::SessionError;
use crate::persistence::Persistence;
use crate::state::{Cursor, SessionState};

pub const LOAD_FAILED_NOTICE: &str = "failed to load questionnaires";

/// Where the questionnaire list adopted by a bootstrap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionnaireSource {
    RemoteList,
    RemoteSingle,
    BuiltIn,
}

/// Result of committing a remote answer hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    /// Remote answers became the live answer map.
    Applied,
    /// Local answers already existed and were kept.
    LocalKept,
    /// The remote store had no answers.
    Missing,
    /// Another questionnaire was activated (or the session closed) meanwhile.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub source: QuestionnaireSource,
    pub hydrate: HydrateOutcome,
}

/// Captured at activation; a hydrate only commits while it is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrateTicket {
    questionnaire_id: String,
    generation: u64,
}

impl HydrateTicket {
    pub fn questionnaire_id(&self) -> &str {
        &self.questionnaire_id
    }
}

/// Read-only view of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub questionnaire_id: String,
    pub title: String,
    pub description: String,
    pub mode: QuestionnaireMode,
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub answers: AnswerMap,
    pub loading: bool,
    pub submitted: bool,
    pub completed: bool,
    pub notice: Option<String>,
}

struct Inner {
    questionnaires: Vec<Questionnaire>,
    active: Questionnaire,
    state: SessionState,
    generation: u64,
    closed: bool,
    notice: Option<String>,
}

impl Inner {
    fn completed(&self) -> bool {
        is_completed(
            &self.active.questions,
            self.active.mode,
            &self.state.cursor().answers,
        )
    }
}

/// Session over one active questionnaire.
///
/// Clones share state. Synchronous operations are atomic; async operations
/// release the state while awaiting the network and re-check the activation
/// generation before committing.
#[derive(Clone)]
pub struct QuestionnaireSession {
    persistence: Persistence,
    inner: Arc<Mutex<Inner>>,
}

impl QuestionnaireSession {
    /// Starts loading with the built-in questionnaire active.
    pub fn new(persistence: Persistence) -> Self {
        Self::with_defaults(persistence, vec![default_questionnaire()])
    }

    /// Starts loading with `defaults` as the bundled list (built-in one when empty).
    pub fn with_defaults(persistence: Persistence, defaults: Vec<Questionnaire>) -> Self {
        let questionnaires = if defaults.is_empty() {
            vec![default_questionnaire()]
        } else {
            defaults
        };
        let active = questionnaires[0].clone();
        let answers = load_reconciled(&persistence, &active);
        Self {
            persistence,
            inner: Arc::new(Mutex::new(Inner {
                questionnaires,
                active,
                state: SessionState::Loading(Cursor::new(answers)),
                generation: 0,
                closed: false,
                notice: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Loads the questionnaire list (list endpoint, then single fallback, then
    /// bundled data) and hydrates the active questionnaire. Loading always ends.
    pub async fn bootstrap(&self) -> BootstrapReport {
        tracing::debug!("loading questionnaires");
        let mut adopted = None;
        let listed = self.persistence.list_questionnaires().await;
        if !listed.is_empty() {
            adopted = Some((listed, QuestionnaireSource::RemoteList));
        } else if let Some(single) = self.persistence.fetch_questionnaire(None).await {
            adopted = Some((vec![single], QuestionnaireSource::RemoteSingle));
        }

        let (source, ticket) = {
            let mut inner = self.lock();
            if inner.closed {
                return BootstrapReport {
                    source: QuestionnaireSource::BuiltIn,
                    hydrate: HydrateOutcome::Stale,
                };
            }
            let source = match adopted {
                Some((questionnaires, source)) => {
                    let keep = questionnaires
                        .iter()
                        .find(|questionnaire| questionnaire.id == inner.active.id)
                        .or_else(|| questionnaires.first())
                        .cloned();
                    inner.questionnaires = questionnaires;
                    inner.notice = None;
                    if let Some(active) = keep {
                        self.activate(&mut inner, active);
                    }
                    source
                }
                None => {
                    tracing::warn!("no remote questionnaires available, using bundled data");
                    inner.notice = Some(LOAD_FAILED_NOTICE.to_string());
                    QuestionnaireSource::BuiltIn
                }
            };
            inner.state.finish_loading();
            tracing::debug!(
                questionnaire_id = %inner.active.id,
                count = inner.questionnaires.len(),
                ?source,
                "questionnaire load complete"
            );
            (source, self.ticket(&inner))
        };

        BootstrapReport {
            source,
            hydrate: self.hydrate(ticket).await,
        }
    }

    /// Re-runs the questionnaire load, e.g. after new content was published.
    pub async fn refresh_questionnaires(&self) -> BootstrapReport {
        self.bootstrap().await
    }

    /// Switches the active questionnaire and hydrates it from the remote store.
    pub async fn set_questionnaire_id(
        &self,
        questionnaire_id: &str,
    ) -> Result<HydrateOutcome, SessionError> {
        let ticket = self.select(questionnaire_id)?;
        Ok(self.hydrate(ticket).await)
    }

    /// Synchronous half of a switch: activates the questionnaire with its cached answers.
    pub fn select(&self, questionnaire_id: &str) -> Result<HydrateTicket, SessionError> {
        let mut inner = self.lock();
        let questionnaire = inner
            .questionnaires
            .iter()
            .find(|questionnaire| questionnaire.id == questionnaire_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownQuestionnaire(questionnaire_id.to_string()))?;
        self.activate(&mut inner, questionnaire);
        Ok(self.ticket(&inner))
    }

    /// Asynchronous half of a switch: applies remote answers unless the
    /// ticket went stale or local answers exist by the time they arrive.
    pub async fn hydrate(&self, ticket: HydrateTicket) -> HydrateOutcome {
        let fetched = self
            .persistence
            .fetch_remote_answers(&ticket.questionnaire_id)
            .await;

        let mut inner = self.lock();
        if inner.closed || inner.generation != ticket.generation {
            tracing::debug!(
                questionnaire_id = %ticket.questionnaire_id,
                "discarding stale answer hydrate"
            );
            return HydrateOutcome::Stale;
        }
        let Some(stored) = fetched.filter(|answers| !answers.is_empty()) else {
            return HydrateOutcome::Missing;
        };
        if !inner.state.cursor().answers.is_empty() {
            return HydrateOutcome::LocalKept;
        }

        let answers = attach_right_answers(stored, &inner.active.questions, inner.active.mode);
        self.persistence.save_local(&ticket.questionnaire_id, &answers);
        inner.state.cursor_mut().answers = answers;
        inner.state.reopen();
        tracing::debug!(
            questionnaire_id = %ticket.questionnaire_id,
            "restored answers from remote store"
        );
        HydrateOutcome::Applied
    }

    /// Records a live edit; never scores it.
    pub fn set_answer(&self, question_id: &str, input: impl Into<AnswerInput>) {
        let mut inner = self.lock();
        let inner = &mut *inner;
        let question = inner.active.question(question_id);
        if question.is_none() {
            tracing::debug!(question_id, "answer for question outside the active questionnaire");
        }
        let answers = &mut inner.state.cursor_mut().answers;
        let record = evaluate_record(
            question,
            Some(input.into()),
            answers.get(question_id),
            false,
            inner.active.mode,
        );
        answers.insert(question_id.to_string(), record);
        self.persistence.save_local(&inner.active.id, answers);
    }

    /// Finalizes the displayed question, then moves forward (clamped).
    pub fn next(&self) {
        let mut inner = self.lock();
        self.finalize_current(&mut inner);
        let last = inner.active.last_index();
        let cursor = inner.state.cursor_mut();
        cursor.index = (cursor.index + 1).min(last);
    }

    pub fn prev(&self) {
        let mut inner = self.lock();
        let cursor = inner.state.cursor_mut();
        cursor.index = cursor.index.saturating_sub(1);
    }

    /// Finalizes the displayed question and pushes all answers to the remote
    /// store. Failures propagate and leave the session unsubmitted.
    pub async fn submit(&self) -> Result<(), SessionError> {
        let (questionnaire_id, answers, generation) = {
            let mut inner = self.lock();
            if inner.state.is_loading() {
                return Err(SessionError::NotReady);
            }
            self.finalize_current(&mut inner);
            let answers = inner.state.cursor().answers.clone();
            self.persistence.save_local(&inner.active.id, &answers);
            (inner.active.id.clone(), answers, inner.generation)
        };

        self.persistence
            .sync_remote(&questionnaire_id, answers)
            .await
            .map_err(|err| {
                tracing::warn!(%questionnaire_id, error = %err, "failed to submit answers");
                SessionError::Submit(err)
            })?;

        let mut inner = self.lock();
        if !inner.closed && inner.generation == generation {
            inner.state.mark_submitted();
        }
        tracing::debug!(%questionnaire_id, "answers submitted");
        Ok(())
    }

    /// Clears answers locally, then best-effort clears them remotely.
    ///
    /// In-flight submits and hydrates no longer commit afterwards.
    pub async fn reset_answers(&self) {
        let questionnaire_id = {
            let mut inner = self.lock();
            let questionnaire_id = inner.active.id.clone();
            self.persistence.clear_local(&questionnaire_id);
            inner.state.restart(Cursor::default());
            inner.generation += 1;
            questionnaire_id
        };

        if let Err(err) = self
            .persistence
            .sync_remote(&questionnaire_id, AnswerMap::new())
            .await
        {
            tracing::warn!(%questionnaire_id, error = %err, "failed to clear remote answers");
        }
    }

    /// Invalidates in-flight operations; their results are discarded.
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        inner.generation += 1;
    }

    pub fn completed(&self) -> bool {
        self.lock().completed()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading()
    }

    pub fn is_submitted(&self) -> bool {
        self.lock().state.is_submitted()
    }

    pub fn current_index(&self) -> usize {
        self.lock().state.cursor().index
    }

    pub fn current_question(&self) -> Option<Question> {
        let inner = self.lock();
        inner
            .active
            .questions
            .get(inner.state.cursor().index)
            .cloned()
    }

    pub fn answers(&self) -> AnswerMap {
        self.lock().state.cursor().answers.clone()
    }

    pub fn questionnaire_id(&self) -> String {
        self.lock().active.id.clone()
    }

    pub fn mode(&self) -> QuestionnaireMode {
        self.lock().active.mode
    }

    pub fn questionnaires(&self) -> Vec<Questionnaire> {
        self.lock().questionnaires.clone()
    }

    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    pub fn summary(&self) -> Summary {
        let inner = self.lock();
        summarize(
            &inner.active.questions,
            inner.active.mode,
            &inner.state.cursor().answers,
        )
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        let cursor = inner.state.cursor();
        SessionSnapshot {
            questionnaire_id: inner.active.id.clone(),
            title: inner.active.title.clone(),
            description: inner.active.description.clone(),
            mode: inner.active.mode,
            questions: inner.active.questions.clone(),
            current_index: cursor.index,
            answers: cursor.answers.clone(),
            loading: inner.state.is_loading(),
            submitted: inner.state.is_submitted(),
            completed: inner.completed(),
            notice: inner.notice.clone(),
        }
    }

    fn activate(&self, inner: &mut Inner, questionnaire: Questionnaire) {
        let answers = load_reconciled(&self.persistence, &questionnaire);
        tracing::debug!(
            questionnaire_id = %questionnaire.id,
            mode = %questionnaire.mode,
            cached = answers.len(),
            "activating questionnaire"
        );
        inner.active = questionnaire;
        inner.state.restart(Cursor::new(answers));
        inner.generation += 1;
    }

    fn ticket(&self, inner: &Inner) -> HydrateTicket {
        HydrateTicket {
            questionnaire_id: inner.active.id.clone(),
            generation: inner.generation,
        }
    }

    /// Stamps correctness on the displayed question of a scored test.
    fn finalize_current(&self, inner: &mut Inner) {
        if inner.active.mode != QuestionnaireMode::ScoredTest {
            return;
        }
        let Some(question) = inner.active.questions.get(inner.state.cursor().index) else {
            return;
        };
        let answers = &mut inner.state.cursor_mut().answers;
        let Some(previous) = answers.get(&question.id).filter(|record| record.has_value()) else {
            return;
        };
        let record = evaluate_record(
            Some(question),
            None,
            Some(previous),
            true,
            QuestionnaireMode::ScoredTest,
        );
        if answers.get(&question.id) != Some(&record) {
            answers.insert(question.id.clone(), record);
            self.persistence.save_local(&inner.active.id, answers);
        }
    }
}

fn load_reconciled(persistence: &Persistence, questionnaire: &Questionnaire) -> AnswerMap {
    attach_right_answers(
        persistence.load_local(&questionnaire.id),
        &questionnaire.questions,
        questionnaire.mode,
    )
}
