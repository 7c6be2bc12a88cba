use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use terraclaim_domain::ActorId;

use crate::infrastructure::ports::{
    FormError, FormResponse, FormsPort, SelectionMenu, TextInputForm, ToggleForm,
};

#[derive(Debug, Clone)]
enum Answer {
    Selection(usize),
    Toggles(Vec<bool>),
    Text(String),
    Cancel,
}

/// Answers forms from a queue. Once the queue runs dry every form is
/// dismissed.
#[derive(Debug, Default)]
pub struct ScriptedForms {
    answers: Mutex<VecDeque<Answer>>,
    shown: AtomicUsize,
}

impl ScriptedForms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(self, index: usize) -> Self {
        self.queue(Answer::Selection(index))
    }

    pub fn toggles(self, values: Vec<bool>) -> Self {
        self.queue(Answer::Toggles(values))
    }

    pub fn text(self, value: &str) -> Self {
        self.queue(Answer::Text(value.to_string()))
    }

    pub fn cancel(self) -> Self {
        self.queue(Answer::Cancel)
    }

    /// Number of forms shown so far.
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    fn queue(self, answer: Answer) -> Self {
        self.answers.lock().expect("forms lock").push_back(answer);
        self
    }

    fn next(&self) -> Option<Answer> {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.answers.lock().expect("forms lock").pop_front()
    }
}

fn mismatch<T>(expected: &str, got: &Answer) -> Result<FormResponse<T>, FormError> {
    Err(FormError::InvalidResponse(format!(
        "expected {expected}, scripted {got:?}"
    )))
}

#[async_trait]
impl FormsPort for ScriptedForms {
    async fn show_selection_menu(
        &self,
        _actor: &ActorId,
        _menu: SelectionMenu,
    ) -> Result<FormResponse<usize>, FormError> {
        match self.next() {
            Some(Answer::Selection(index)) => Ok(FormResponse::Submitted(index)),
            None | Some(Answer::Cancel) => Ok(FormResponse::Cancelled),
            Some(other) => mismatch("selection", &other),
        }
    }

    async fn show_toggle_form(
        &self,
        _actor: &ActorId,
        _form: ToggleForm,
    ) -> Result<FormResponse<Vec<bool>>, FormError> {
        match self.next() {
            Some(Answer::Toggles(values)) => Ok(FormResponse::Submitted(values)),
            None | Some(Answer::Cancel) => Ok(FormResponse::Cancelled),
            Some(other) => mismatch("toggles", &other),
        }
    }

    async fn show_text_input_form(
        &self,
        _actor: &ActorId,
        _form: TextInputForm,
    ) -> Result<FormResponse<String>, FormError> {
        match self.next() {
            Some(Answer::Text(value)) => Ok(FormResponse::Submitted(value)),
            None | Some(Answer::Cancel) => Ok(FormResponse::Cancelled),
            Some(other) => mismatch("text", &other),
        }
    }
}
