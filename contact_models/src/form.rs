use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fields of the contact form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
    Channel,
}

impl FormField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Message,
        Self::Channel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
            Self::Channel => "channel",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The delivery mechanism the user picked for their message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    Email,
    /// Selectable, but there is no delivery backend for it.
    Whatsapp,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact channel {0:?}")]
pub struct ParseChannelError(pub String);

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "whatsapp" => Ok(Self::Whatsapp),
            _ => Err(ParseChannelError(s.into())),
        }
    }
}

/// The raw values currently entered into the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// `None` if no contact method is selected.
    pub channel: Option<Channel>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            channel: Some(Channel::default()),
        }
    }
}

impl FormValues {
    /// Returns the text of the given field. The channel is rendered as its
    /// name, or the empty string if none is selected.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
            FormField::Channel => self.channel.map(Channel::as_str).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let values = FormValues::default();
        assert_eq!(values.channel, Some(Channel::Email));
        for field in [
            FormField::Name,
            FormField::Email,
            FormField::Phone,
            FormField::Message,
        ] {
            assert_eq!(values.get(field), "");
        }
        assert_eq!(values.get(FormField::Channel), "email");
    }

    #[test]
    fn parse_channel() {
        assert_eq!("email".parse(), Ok(Channel::Email));
        assert_eq!("whatsapp".parse(), Ok(Channel::Whatsapp));
        assert_eq!(
            "sms".parse::<Channel>(),
            Err(ParseChannelError("sms".into()))
        );
        assert_eq!(
            "Email".parse::<Channel>(),
            Err(ParseChannelError("Email".into()))
        );
    }

    #[test]
    fn serialize_field_names() {
        let names = FormField::ALL
            .map(|field| serde_json::to_value(field).unwrap())
            .map(|value| value.as_str().unwrap().to_owned());
        assert_eq!(names, FormField::ALL.map(|field| field.as_str().to_owned()));
    }
}
