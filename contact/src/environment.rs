use contact_config::Config;
use contact_core_dispatch_impl::{ContactDispatchServiceConfig, ContactDispatchServiceImpl};
use contact_core_form::{ContactForm, ContactFormConfig};
use contact_extern_impl::emailjs::{EmailJsApiServiceConfig, EmailJsApiServiceImpl};
use contact_models::emailjs::EmailJsCredentials;

pub type ContactDispatch = ContactDispatchServiceImpl<EmailJsApiServiceImpl>;
pub type ContactFormImpl = ContactForm<ContactDispatch>;

/// Wire a fresh contact form with its delivery services according to `config`.
pub fn contact_form(config: &Config) -> ContactFormImpl {
    let emailjs_api = EmailJsApiServiceImpl::new(EmailJsApiServiceConfig::new(
        config.emailjs.endpoint_override.clone(),
    ));

    let dispatch = ContactDispatchServiceImpl::new(
        emailjs_api,
        ContactDispatchServiceConfig {
            emailjs: EmailJsCredentials {
                service_id: config.emailjs.service_id.clone(),
                template_id: config.emailjs.template_id.clone(),
                account_id: config.emailjs.account_id.clone(),
                access_token: config.emailjs.access_token.clone().map(Into::into),
            }
            .into(),
            timeout: config.emailjs.timeout.into(),
        },
    );

    ContactForm::new(
        dispatch,
        ContactFormConfig {
            preserve_input_on_failure: config.form.preserve_input_on_failure,
        },
    )
}
