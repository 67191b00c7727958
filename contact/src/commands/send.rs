use anyhow::{bail, Context};
use clap::Args;
use contact_config::Config;
use contact_core_form::{FormSubmitError, SubmitOutcome};
use contact_models::form::FormField;
use tracing::debug;

use crate::environment;

#[derive(Debug, Args)]
pub struct SendCommand {
    /// Your name
    #[arg(long, default_value = "")]
    name: String,
    /// Email address to reply to
    #[arg(long, default_value = "")]
    email: String,
    /// Phone number (optional)
    #[arg(long, default_value = "")]
    phone: String,
    /// The message to send
    #[arg(long, default_value = "")]
    message: String,
    /// Preferred contact method
    #[arg(long, default_value = "email")]
    channel: String,
}

impl SendCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let form = environment::contact_form(&config);

        for (field, value) in [
            (FormField::Name, self.name),
            (FormField::Email, self.email),
            (FormField::Phone, self.phone),
            (FormField::Message, self.message),
            (FormField::Channel, self.channel),
        ] {
            form.set_field(field, value)
                .with_context(|| format!("Invalid value for {field}"))?;
        }

        let mut state = form.subscribe();
        let busy_indicator = tokio::spawn(async move {
            while state.changed().await.is_ok() {
                if state.borrow_and_update().is_submitting {
                    eprintln!("Sending...");
                }
            }
        });

        let result = {
            let submit = form.submit();
            tokio::pin!(submit);
            tokio::select! {
                result = &mut submit => result,
                _ = tokio::signal::ctrl_c() => {
                    debug!("Received ctrl-c");
                    form.cancel();
                    submit.await
                }
            }
        };

        drop(form);
        busy_indicator.await.context("Busy indicator task failed")?;

        match result {
            Ok(outcome @ SubmitOutcome::Success) => {
                println!("{}", outcome.notification());
                Ok(())
            }
            Ok(outcome @ SubmitOutcome::Failure(_)) => {
                eprintln!("{}", outcome.notification());
                bail!("Failed to send message")
            }
            Ok(outcome @ SubmitOutcome::Cancelled) => {
                eprintln!("{}", outcome.notification());
                bail!("Cancelled")
            }
            Err(FormSubmitError::Invalid(errors)) => {
                for (field, error) in errors.iter() {
                    eprintln!("{field}: {error}");
                }
                bail!("The form contains invalid fields")
            }
            Err(err @ FormSubmitError::Busy(_)) => Err(err.into()),
        }
    }
}
