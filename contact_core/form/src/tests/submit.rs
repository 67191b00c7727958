use contact_core_dispatch_contracts::{ContactDispatchError, MockContactDispatchService};
use contact_models::{
    form::{FormField, FormValues},
    validation::ValidationError,
};
use contact_utils::assert_matches;
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;

use super::{fill, jane, make_sut};
use crate::{
    ContactForm, ContactFormConfig, FormSubmitError, SubmitOutcome, FAILURE_NOTIFICATION,
    SUCCESS_NOTIFICATION,
};

#[tokio::test]
async fn ok() {
    // Arrange
    let dispatch = MockContactDispatchService::new().with_dispatch(jane(), Ok(()));
    let sut = make_sut(dispatch);
    fill(&sut, &jane());

    // Act
    let result = sut.submit().await;

    // Assert
    let outcome = result.unwrap();
    assert_eq!(outcome, SubmitOutcome::Success);
    assert_eq!(outcome.notification(), SUCCESS_NOTIFICATION);

    let snapshot = sut.snapshot();
    assert_eq!(snapshot.values, FormValues::default());
    assert!(snapshot.touched.is_empty());
    assert!(!snapshot.is_submitting);
}

#[tokio::test]
async fn invalid() {
    // Arrange
    let sut = make_sut(MockContactDispatchService::new());
    let values = FormValues {
        name: String::new(),
        email: "bad".into(),
        phone: String::new(),
        message: String::new(),
        channel: None,
    };
    fill(&sut, &values);

    // Act
    let result = sut.submit().await;

    // Assert
    let errors = match result {
        Err(FormSubmitError::Invalid(errors)) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        [
            (FormField::Name, ValidationError::NameRequired),
            (FormField::Email, ValidationError::EmailInvalid),
            (FormField::Message, ValidationError::MessageRequired),
            (FormField::Channel, ValidationError::ChannelRequired),
        ]
    );

    let snapshot = sut.snapshot();
    assert_eq!(snapshot.values, values);
    assert!(!snapshot.is_submitting);
}

#[tokio::test]
async fn invalid_untouched_fields_become_visible() {
    // Arrange
    let sut = make_sut(MockContactDispatchService::new());
    sut.set_field(FormField::Name, "Jane").unwrap();

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Err(FormSubmitError::Invalid(_)));
    assert_eq!(
        sut.snapshot().visible_errors().collect::<Vec<_>>(),
        [
            (FormField::Email, ValidationError::EmailRequired),
            (FormField::Message, ValidationError::MessageRequired),
        ]
    );
}

#[tokio::test]
async fn each_required_field() {
    for field in [
        FormField::Name,
        FormField::Email,
        FormField::Message,
        FormField::Channel,
    ] {
        // Arrange
        let sut = make_sut(MockContactDispatchService::new());
        fill(&sut, &jane());
        sut.set_field(field, "").unwrap();

        // Act
        let result = sut.submit().await;

        // Assert
        assert_matches!(result, Err(FormSubmitError::Invalid(errors)) if errors.contains(field));
    }
}

#[tokio::test]
async fn dispatch_failed() {
    // Arrange
    let dispatch = MockContactDispatchService::new().with_dispatch(
        jane(),
        Err(ContactDispatchError::Rejected("The service ID is invalid".into())),
    );
    let sut = make_sut(dispatch);
    fill(&sut, &jane());

    // Act
    let result = sut.submit().await;

    // Assert
    let outcome = result.unwrap();
    assert_matches!(&outcome, SubmitOutcome::Failure(reason) if reason.contains("service ID"));
    assert_eq!(outcome.notification(), FAILURE_NOTIFICATION);

    let snapshot = sut.snapshot();
    assert_eq!(snapshot.values, FormValues::default());
    assert!(!snapshot.is_submitting);
}

#[tokio::test]
async fn dispatch_failed_preserve_input() {
    // Arrange
    let dispatch = MockContactDispatchService::new().with_dispatch(
        jane(),
        Err(ContactDispatchError::Other(anyhow::anyhow!("connection reset"))),
    );
    let sut = ContactForm::new(
        dispatch,
        ContactFormConfig {
            preserve_input_on_failure: true,
        },
    );
    fill(&sut, &jane());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Ok(SubmitOutcome::Failure(_)));

    let snapshot = sut.snapshot();
    assert_eq!(snapshot.values, jane());
    assert!(!snapshot.is_submitting);
}

#[tokio::test]
async fn retry_after_failure() {
    // Arrange
    let mut dispatch = MockContactDispatchService::new();
    let mut seq = mockall::Sequence::new();
    dispatch
        .expect_dispatch()
        .once()
        .in_sequence(&mut seq)
        .return_once(|_| {
            Box::pin(std::future::ready(Err(ContactDispatchError::Timeout(
                std::time::Duration::from_secs(30),
            ))))
        });
    dispatch
        .expect_dispatch()
        .once()
        .in_sequence(&mut seq)
        .return_once(|_| Box::pin(std::future::ready(Ok(()))));
    let sut = make_sut(dispatch);

    // Act
    fill(&sut, &jane());
    let first = sut.submit().await;
    fill(&sut, &jane());
    let second = sut.submit().await;

    // Assert
    assert_matches!(first, Ok(SubmitOutcome::Failure(_)));
    assert_matches!(second, Ok(SubmitOutcome::Success));
    assert!(!sut.snapshot().is_submitting);
}

#[tokio::test]
async fn already_submitting() {
    // Arrange
    let (tx, rx) = oneshot::channel::<()>();
    let mut dispatch = MockContactDispatchService::new();
    dispatch
        .expect_dispatch()
        .once()
        .withf(|values| *values == jane())
        .return_once(move |_| {
            Box::pin(async move {
                let _ = rx.await;
                Ok(())
            })
        });
    let sut = make_sut(dispatch);
    fill(&sut, &jane());
    let mut state = sut.subscribe();

    // Act
    let first = sut.submit();
    let second = async {
        state.wait_for(|s| s.is_submitting).await.unwrap();
        let result = sut.submit().await;
        tx.send(()).unwrap();
        result
    };
    let (first, second) = tokio::join!(first, second);

    // Assert
    assert_matches!(first, Ok(SubmitOutcome::Success));
    assert_matches!(second, Err(FormSubmitError::Busy(_)));
    assert!(!sut.snapshot().is_submitting);
}

#[tokio::test]
async fn reset_while_submitting() {
    // Arrange
    let (tx, rx) = oneshot::channel::<()>();
    let mut dispatch = MockContactDispatchService::new();
    dispatch.expect_dispatch().once().return_once(move |_| {
        Box::pin(async move {
            let _ = rx.await;
            Ok(())
        })
    });
    let sut = make_sut(dispatch);
    fill(&sut, &jane());
    let mut state = sut.subscribe();

    // Act
    let submit = sut.submit();
    let reset = async {
        state.wait_for(|s| s.is_submitting).await.unwrap();
        let result = sut.reset();
        tx.send(()).unwrap();
        result
    };
    let (submit, reset) = tokio::join!(submit, reset);

    // Assert
    assert_matches!(submit, Ok(SubmitOutcome::Success));
    assert!(reset.is_err());
}
