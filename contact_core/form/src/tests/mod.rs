use contact_core_dispatch_contracts::MockContactDispatchService;
use contact_models::form::{Channel, FormField, FormValues};

use crate::{ContactForm, ContactFormConfig};

mod submit;

type Sut = ContactForm<MockContactDispatchService>;

fn make_sut(dispatch: MockContactDispatchService) -> Sut {
    ContactForm::new(dispatch, ContactFormConfig::default())
}

fn jane() -> FormValues {
    FormValues {
        name: "Jane".into(),
        email: "jane@x.com".into(),
        phone: String::new(),
        message: "hi".into(),
        channel: Some(Channel::Email),
    }
}

/// Enter `values` the way a user would, field by field.
fn fill(sut: &Sut, values: &FormValues) {
    for field in FormField::ALL {
        sut.set_field(field, values.get(field)).unwrap();
    }
}
