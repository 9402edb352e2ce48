//! Property-based tests for the Contact Form Validator
//!
//! Tests invariants:
//! - Whitespace-only required fields are always reported
//! - Well-formed addresses pass, addresses without `@` fail
//! - The message threshold counts trimmed characters
//! - A rejected submit leaves the form idle

use proptest::prelude::*;

use crate::core::contact::{
    validate, ContactForm, Field, FieldError, SubmitRejected, SubmitStatus, MIN_MESSAGE_CHARS,
};
use crate::tests::common::create_valid_fields;

proptest! {
    /// Property: blank names and subjects are required, whatever the padding
    #[test]
    fn prop_blank_required_fields(blank in "[ \t\n]{0,6}") {
        let mut fields = create_valid_fields();
        fields.name = blank.clone();
        fields.subject = blank;
        let errors = validate(&fields);
        prop_assert_eq!(errors.get(&Field::Name), Some(&FieldError::Required));
        prop_assert_eq!(errors.get(&Field::Subject), Some(&FieldError::Required));
        prop_assert!(!errors.contains_key(&Field::Email));
        prop_assert!(!errors.contains_key(&Field::Message));
    }

    /// Property: local@domain.tld addresses are accepted
    #[test]
    fn prop_well_formed_email_accepted(email in "[a-z0-9.]{1,10}@[a-z]{1,10}\\.[a-z]{2,4}") {
        let mut fields = create_valid_fields();
        fields.email = email;
        prop_assert!(validate(&fields).is_empty());
    }

    /// Property: a non-empty address without `@` is invalid, not missing
    #[test]
    fn prop_email_without_at_rejected(email in "[a-z0-9. ]{1,20}") {
        let mut fields = create_valid_fields();
        fields.email = email;
        let errors = validate(&fields);
        prop_assert_eq!(errors.get(&Field::Email), Some(&FieldError::Invalid));
    }

    /// Property: the message threshold applies to the trimmed text
    #[test]
    fn prop_message_length_threshold(
        body in "[a-z]{1,20}",
        left in " {0,5}",
        right in " {0,5}",
    ) {
        let mut fields = create_valid_fields();
        fields.message = format!("{left}{body}{right}");
        let error = validate(&fields).get(&Field::Message).copied();
        if body.chars().count() < MIN_MESSAGE_CHARS {
            prop_assert_eq!(error, Some(FieldError::TooShort));
        } else {
            prop_assert_eq!(error, None);
        }
    }

    /// Property: an invalid form never moves to Submitting
    #[test]
    fn prop_rejected_submit_stays_idle(name in "[ ]{0,3}", message in "[a-z]{0,9}") {
        let mut form = ContactForm::new();
        let valid = create_valid_fields();
        form.set_value(Field::Name, name);
        form.set_value(Field::Email, valid.email);
        form.set_value(Field::Subject, valid.subject);
        form.set_value(Field::Message, message);

        let result = form.begin_submit();
        prop_assert!(matches!(result, Err(SubmitRejected::Invalid(_))));
        prop_assert_eq!(form.status(), SubmitStatus::Idle);
        prop_assert!(form.errors().contains_key(&Field::Name));
        prop_assert!(form.errors().contains_key(&Field::Message));
    }
}
