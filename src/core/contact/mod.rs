//! Contact form: field validation and the submit/status lifecycle.

mod submit;
mod validator;

pub use submit::{
    ContactForm, MessageSender, SendError, SimulatedSender, StatusTimer, SubmitRejected,
    SubmitStatus,
};
pub use validator::{
    describe, validate, ContactFields, Field, FieldError, FieldErrors, MIN_MESSAGE_CHARS,
};
