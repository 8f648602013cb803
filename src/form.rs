// src/form.rs

//! A modal dialog builder, the one collaborator living outside the typed
//! parsing core. Handlers build an [`ActionForm`] from already-resolved
//! values and send it through a host [`FormPresenter`]; if the target actor
//! is busy the form is re-presented up to a bounded retry count.

use thiserror::Error;

use crate::actor::ActorRef;
use crate::constants;

/// Why a presented form came back without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The actor had another modal open; eligible for retry.
    UserBusy,
    /// The actor dismissed the form.
    UserClosed,
}

/// The host's answer to one presentation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResponse {
    /// The actor pressed the button at this index.
    Selected(usize),
    Canceled(CancelReason),
}

/// Read-only view of a button, as shown by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormButtonView {
    pub text: String,
    pub icon: Option<String>,
}

/// Read-only view of a form, handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: Option<String>,
    pub body: Option<String>,
    pub buttons: Vec<FormButtonView>,
}

/// Host capability that renders a form to an actor and reports the outcome.
pub trait FormPresenter {
    fn present(&self, actor: &ActorRef, view: &FormView) -> FormResponse;
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("ActionForm doesn't have required property: buttons")]
    NoButtons,
    #[error("Presenter reported selection {0}, but the form has no such button.")]
    InvalidSelection(usize),
}

type ButtonCallback = Box<dyn Fn(&ActorRef) + Send + Sync>;
type CancelCallback = Box<dyn Fn(&ActorRef, CancelReason) + Send + Sync>;

struct FormButton {
    text: String,
    icon: Option<String>,
    on_press: ButtonCallback,
}

/// A button-list dialog built fluently by a command handler.
#[derive(Default)]
pub struct ActionForm {
    title: Option<String>,
    body: Option<String>,
    buttons: Vec<FormButton>,
    on_cancel: Option<CancelCallback>,
}

impl std::fmt::Debug for ActionForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionForm")
            .field("title", &self.title)
            .field("body", &self.body)
            .field("buttons", &self.buttons.len())
            .finish_non_exhaustive()
    }
}

impl ActionForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, text: &str) -> Self {
        self.title = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn body(mut self, text: &str) -> Self {
        self.body = Some(text.to_string());
        self
    }

    /// Adds a button with an optional icon path and the callback to run
    /// when it is pressed.
    #[must_use]
    pub fn button(
        mut self,
        text: &str,
        icon: Option<&str>,
        on_press: impl Fn(&ActorRef) + Send + Sync + 'static,
    ) -> Self {
        self.buttons.push(FormButton {
            text: text.to_string(),
            icon: icon.map(String::from),
            on_press: Box::new(on_press),
        });
        self
    }

    /// Called when the actor dismisses the form (or the busy retries are
    /// exhausted).
    #[must_use]
    pub fn on_user_cancel(
        mut self,
        callback: impl Fn(&ActorRef, CancelReason) + Send + Sync + 'static,
    ) -> Self {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    fn view(&self) -> FormView {
        FormView {
            title: self.title.clone(),
            body: self.body.clone(),
            buttons: self
                .buttons
                .iter()
                .map(|b| FormButtonView {
                    text: b.text.clone(),
                    icon: b.icon.clone(),
                })
                .collect(),
        }
    }

    /// Sends the form with the default busy-retry budget.
    pub fn send(&self, actor: &ActorRef, presenter: &dyn FormPresenter) -> Result<(), FormError> {
        self.send_with_retries(actor, presenter, constants::FORM_BUSY_RETRIES)
    }

    /// Sends the form, re-presenting while the actor is busy, at most
    /// `max_tries` extra times. The retry budget is plain loop state; once
    /// it runs out a busy response is treated as a cancellation.
    pub fn send_with_retries(
        &self,
        actor: &ActorRef,
        presenter: &dyn FormPresenter,
        max_tries: u32,
    ) -> Result<(), FormError> {
        if self.buttons.is_empty() {
            return Err(FormError::NoButtons);
        }
        let view = self.view();

        let mut tries = 0u32;
        loop {
            match presenter.present(actor, &view) {
                FormResponse::Canceled(CancelReason::UserBusy) if tries < max_tries => {
                    tries += 1;
                    log::debug!("Form target busy, retry {tries}/{max_tries}");
                }
                FormResponse::Canceled(reason) => {
                    if let Some(on_cancel) = &self.on_cancel {
                        on_cancel(actor, reason);
                    }
                    return Ok(());
                }
                FormResponse::Selected(index) => {
                    let button = self
                        .buttons
                        .get(index)
                        .ok_or(FormError::InvalidSelection(index))?;
                    (button.on_press)(actor);
                    return Ok(());
                }
            }
        }
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::test_support::FakeActor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Replays a fixed script of responses, repeating the last one.
    struct ScriptedPresenter {
        script: Mutex<Vec<FormResponse>>,
        presentations: AtomicUsize,
    }

    impl ScriptedPresenter {
        fn new(script: Vec<FormResponse>) -> Self {
            Self {
                script: Mutex::new(script),
                presentations: AtomicUsize::new(0),
            }
        }

        fn shown(&self) -> usize {
            self.presentations.load(Ordering::SeqCst)
        }
    }

    impl FormPresenter for ScriptedPresenter {
        fn present(&self, _actor: &ActorRef, _view: &FormView) -> FormResponse {
            self.presentations.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.remove(0)
            } else {
                *script.first().expect("script must not be empty")
            }
        }
    }

    fn actor() -> ActorRef {
        Arc::new(FakeActor::new("steve"))
    }

    #[test]
    fn form_without_buttons_is_rejected() {
        let form = ActionForm::new().title("empty");
        let presenter = ScriptedPresenter::new(vec![FormResponse::Selected(0)]);
        assert_eq!(
            form.send(&actor(), &presenter),
            Err(FormError::NoButtons)
        );
        assert_eq!(presenter.shown(), 0);
    }

    #[test]
    fn selection_runs_the_matching_button_callback() {
        let pressed = Arc::new(AtomicUsize::new(0));
        let seen = pressed.clone();
        let form = ActionForm::new()
            .title("menu")
            .button("accept", Some("textures/items/paper"), move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .button("cancel", None, |_| {});

        let presenter = ScriptedPresenter::new(vec![FormResponse::Selected(0)]);
        form.send(&actor(), &presenter).unwrap();
        assert_eq!(pressed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn busy_responses_are_retried_until_a_selection() {
        let pressed = Arc::new(AtomicUsize::new(0));
        let seen = pressed.clone();
        let form = ActionForm::new().button("ok", None, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let presenter = ScriptedPresenter::new(vec![
            FormResponse::Canceled(CancelReason::UserBusy),
            FormResponse::Canceled(CancelReason::UserBusy),
            FormResponse::Selected(0),
        ]);
        form.send(&actor(), &presenter).unwrap();
        assert_eq!(presenter.shown(), 3);
        assert_eq!(pressed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn retry_budget_is_bounded() {
        let canceled = Arc::new(AtomicUsize::new(0));
        let seen = canceled.clone();
        let form = ActionForm::new()
            .button("ok", None, |_| {})
            .on_user_cancel(move |_, reason| {
                assert_eq!(reason, CancelReason::UserBusy);
                seen.fetch_add(1, Ordering::SeqCst);
            });

        let presenter =
            ScriptedPresenter::new(vec![FormResponse::Canceled(CancelReason::UserBusy)]);
        form.send_with_retries(&actor(), &presenter, 3).unwrap();

        // One initial presentation plus three retries.
        assert_eq!(presenter.shown(), 4);
        assert_eq!(canceled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn user_close_invokes_the_cancel_hook_without_retrying() {
        let canceled = Arc::new(AtomicUsize::new(0));
        let seen = canceled.clone();
        let form = ActionForm::new()
            .button("ok", None, |_| {})
            .on_user_cancel(move |_, reason| {
                assert_eq!(reason, CancelReason::UserClosed);
                seen.fetch_add(1, Ordering::SeqCst);
            });

        let presenter =
            ScriptedPresenter::new(vec![FormResponse::Canceled(CancelReason::UserClosed)]);
        form.send(&actor(), &presenter).unwrap();
        assert_eq!(presenter.shown(), 1);
        assert_eq!(canceled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        let form = ActionForm::new().button("ok", None, |_| {});
        let presenter = ScriptedPresenter::new(vec![FormResponse::Selected(7)]);
        assert_eq!(
            form.send(&actor(), &presenter),
            Err(FormError::InvalidSelection(7))
        );
    }
}
