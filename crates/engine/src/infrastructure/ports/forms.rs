//! Interactive form collaborator.
//!
//! Forms are answered asynchronously by the actor. A closed or dismissed
//! form is [`FormResponse::Cancelled`], never an error.

use async_trait::async_trait;
use terraclaim_domain::ActorId;

use super::FormError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResponse<T> {
    Submitted(T),
    Cancelled,
}

impl<T> FormResponse<T> {
    pub fn submitted(self) -> Option<T> {
        match self {
            Self::Submitted(value) => Some(value),
            Self::Cancelled => None,
        }
    }
}

/// Button list; answered with the index of the pressed button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMenu {
    pub title: String,
    pub body: String,
    pub options: Vec<String>,
}

/// Labelled toggles; answered with one value per toggle, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleForm {
    pub title: String,
    pub toggles: Vec<(String, bool)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInputForm {
    pub title: String,
    pub label: String,
    pub placeholder: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsPort: Send + Sync {
    async fn show_selection_menu(
        &self,
        actor: &ActorId,
        menu: SelectionMenu,
    ) -> Result<FormResponse<usize>, FormError>;

    async fn show_toggle_form(
        &self,
        actor: &ActorId,
        form: ToggleForm,
    ) -> Result<FormResponse<Vec<bool>>, FormError>;

    async fn show_text_input_form(
        &self,
        actor: &ActorId,
        form: TextInputForm,
    ) -> Result<FormResponse<String>, FormError>;
}
