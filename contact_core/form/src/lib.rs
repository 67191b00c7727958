use std::{
    collections::BTreeSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use contact_core_dispatch_contracts::ContactDispatchService;
use contact_models::{
    form::{Channel, FormField, FormValues, ParseChannelError},
    validation::{ValidationError, ValidationErrors},
};
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use validation::validate;

#[cfg(test)]
mod tests;
mod validation;

pub const SUCCESS_NOTIFICATION: &str = "Message sent successfully!";
pub const FAILURE_NOTIFICATION: &str = "Failed to send the message. Please try again later.";
pub const CANCELLED_NOTIFICATION: &str = "Sending the message has been cancelled.";

/// State of a single contact form: the entered values, their validation
/// errors, which fields the user has interacted with and whether a submission
/// is in flight.
///
/// Every state transition is published as a [`FormSnapshot`] to the receivers
/// returned by [`ContactForm::subscribe`].
#[derive(Debug)]
pub struct ContactForm<Dispatch> {
    dispatch: Dispatch,
    config: ContactFormConfig,
    state: watch::Sender<FormSnapshot>,
    cancel: Mutex<CancellationToken>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactFormConfig {
    /// Keep values and touched fields after a failed dispatch instead of
    /// resetting the form.
    pub preserve_input_on_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub values: FormValues,
    /// Errors of all fields, derived from `values`.
    pub errors: ValidationErrors,
    pub touched: BTreeSet<FormField>,
    pub is_submitting: bool,
}

impl FormSnapshot {
    fn initial() -> Self {
        let values = FormValues::default();
        Self {
            errors: validate(&values),
            values,
            touched: BTreeSet::new(),
            is_submitting: false,
        }
    }

    fn reset(&mut self) {
        *self = Self {
            is_submitting: self.is_submitting,
            ..Self::initial()
        };
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error to display next to `field`, if the field is invalid and has
    /// been touched.
    pub fn visible_error(&self, field: FormField) -> Option<ValidationError> {
        self.touched
            .contains(&field)
            .then(|| self.errors.get(field))
            .flatten()
    }

    pub fn visible_errors(&self) -> impl Iterator<Item = (FormField, ValidationError)> + '_ {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(field))
    }
}

/// Result of a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failure(String),
    Cancelled,
}

impl SubmitOutcome {
    /// Text of the notification shown to the user once the submission is over.
    pub fn notification(&self) -> &'static str {
        match self {
            Self::Success => SUCCESS_NOTIFICATION,
            Self::Failure(_) => FAILURE_NOTIFICATION,
            Self::Cancelled => CANCELLED_NOTIFICATION,
        }
    }
}

#[derive(Debug, Error)]
#[error("The form is currently being submitted.")]
pub struct FormBusyError;

#[derive(Debug, Error)]
pub enum FormSubmitError {
    #[error(transparent)]
    Busy(#[from] FormBusyError),
    #[error("The form contains {} invalid field(s).", .0.len())]
    Invalid(ValidationErrors),
}

#[derive(Debug, Error)]
pub enum FormSetFieldError {
    #[error(transparent)]
    UnknownChannel(#[from] ParseChannelError),
}

impl<Dispatch> ContactForm<Dispatch> {
    pub fn new(dispatch: Dispatch, config: ContactFormConfig) -> Self {
        let (state, _) = watch::channel(FormSnapshot::initial());
        Self {
            dispatch,
            config,
            state,
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.state.subscribe()
    }

    /// Update the value of `field` and mark it as touched.
    ///
    /// The channel is selected by its name; the empty string clears the
    /// selection.
    pub fn set_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), FormSetFieldError> {
        let value = value.into();
        let channel = match field {
            FormField::Channel if value.is_empty() => None,
            FormField::Channel => Some(value.parse::<Channel>()?),
            _ => None,
        };

        self.state.send_modify(|state| {
            let values = &mut state.values;
            match field {
                FormField::Name => values.name = value,
                FormField::Email => values.email = value,
                FormField::Phone => values.phone = value,
                FormField::Message => values.message = value,
                FormField::Channel => values.channel = channel,
            }
            state.touched.insert(field);
            state.errors = validate(&state.values);
        });

        Ok(())
    }

    pub fn select_channel(&self, channel: Option<Channel>) {
        self.state.send_modify(|state| {
            state.values.channel = channel;
            state.touched.insert(FormField::Channel);
            state.errors = validate(&state.values);
        });
    }

    /// Mark `field` as touched without changing its value, e.g. when it loses
    /// focus.
    pub fn touch(&self, field: FormField) {
        self.state
            .send_if_modified(|state| state.touched.insert(field));
    }

    /// Validate the current values. Errors are reported for all fields,
    /// touched or not.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        self.state.send_if_modified(|state| {
            errors = validate(&state.values);
            let changed = state.errors != errors;
            state.errors.clone_from(&errors);
            changed
        });
        errors
    }

    /// Restore the initial values and forget touched fields.
    pub fn reset(&self) -> Result<(), FormBusyError> {
        let mut busy = false;
        self.state.send_if_modified(|state| {
            busy = state.is_submitting;
            if !busy {
                state.reset();
            }
            !busy
        });
        if busy {
            return Err(FormBusyError);
        }
        Ok(())
    }

    /// Cancel the submission currently in flight, if any. The entered values
    /// are kept.
    pub fn cancel(&self) {
        let token = self.lock_cancel();
        if self.state.borrow().is_submitting {
            debug!("Cancelling contact form submission");
            token.cancel();
        }
    }

    fn lock_cancel(&self) -> MutexGuard<'_, CancellationToken> {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Dispatch> ContactForm<Dispatch>
where
    Dispatch: ContactDispatchService,
{
    /// Validate the form and, if it is valid, dispatch its values.
    ///
    /// All fields are marked as touched, so validation errors become visible.
    /// Only one submission can be in flight at a time.
    pub async fn submit(&self) -> Result<SubmitOutcome, FormSubmitError> {
        let (values, cancel) = {
            let mut token = self.lock_cancel();

            let mut started = Err(FormSubmitError::Busy(FormBusyError));
            self.state.send_if_modified(|state| {
                if state.is_submitting {
                    return false;
                }
                state.touched.extend(FormField::ALL);
                state.errors = validate(&state.values);
                started = if state.errors.is_empty() {
                    state.is_submitting = true;
                    Ok(state.values.clone())
                } else {
                    Err(FormSubmitError::Invalid(state.errors.clone()))
                };
                true
            });

            let values = started.inspect_err(|err| debug!("Contact form not submitted: {err}"))?;
            *token = CancellationToken::new();
            (values, token.clone())
        };

        let guard = SubmissionGuard(Some(&self.state));
        let channel = values.channel;
        info!(?channel, "Submitting contact form");

        let result = tokio::select! {
            result = self.dispatch.dispatch(values) => Some(result),
            () = cancel.cancelled() => None,
        };

        let outcome = match result {
            Some(Ok(())) => {
                info!("Contact form submitted");
                guard.finish(FormSnapshot::reset);
                SubmitOutcome::Success
            }
            Some(Err(err)) => {
                warn!("Failed to submit contact form: {err}");
                let preserve = self.config.preserve_input_on_failure;
                guard.finish(|state| {
                    if !preserve {
                        state.reset();
                    }
                });
                SubmitOutcome::Failure(err.to_string())
            }
            None => {
                info!("Contact form submission cancelled");
                guard.finish(|_| {});
                SubmitOutcome::Cancelled
            }
        };

        Ok(outcome)
    }
}

/// Clears the submitting flag exactly once, either when the submission
/// finishes or when the submit future is dropped.
struct SubmissionGuard<'a>(Option<&'a watch::Sender<FormSnapshot>>);

impl SubmissionGuard<'_> {
    fn finish(mut self, f: impl FnOnce(&mut FormSnapshot)) {
        if let Some(state) = self.0.take() {
            state.send_modify(|state| {
                f(state);
                state.is_submitting = false;
            });
        }
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.0.take() {
            state.send_modify(|state| state.is_submitting = false);
        }
    }
}
