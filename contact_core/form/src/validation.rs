use contact_models::{
    email_address::is_valid_email_address,
    form::{FormField, FormValues},
    validation::{ValidationError, ValidationErrors},
};

/// Check `values` against the rules of the contact form. Every failing field
/// is reported, independent of whether the user has touched it yet.
pub fn validate(values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if values.name.is_empty() {
        errors.insert(FormField::Name, ValidationError::NameRequired);
    }

    if values.email.is_empty() {
        errors.insert(FormField::Email, ValidationError::EmailRequired);
    } else if !is_valid_email_address(&values.email) {
        errors.insert(FormField::Email, ValidationError::EmailInvalid);
    }

    if values.message.is_empty() {
        errors.insert(FormField::Message, ValidationError::MessageRequired);
    }

    if values.channel.is_none() {
        errors.insert(FormField::Channel, ValidationError::ChannelRequired);
    }

    errors
}
