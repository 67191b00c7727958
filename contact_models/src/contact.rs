use serde::{Deserialize, Serialize};

use crate::form::FormValues;

/// The message forwarded to a delivery channel. The selected channel itself is
/// not part of the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl From<FormValues> for ContactMessage {
    fn from(value: FormValues) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            message: value.message,
        }
    }
}
