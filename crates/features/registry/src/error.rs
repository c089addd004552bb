use std::borrow::Cow;

/// Errors raised around the roster: sign-up validation and snapshot persistence.
#[rally_derive::rally_error]
pub enum RegistryError {
    #[error("Registrant id must not be empty{}", format_context(.context))]
    EmptyId { context: Option<Cow<'static, str>> },

    #[error("Unknown time slot{}: '{slot}'", format_context(.context))]
    UnknownTimeSlot { slot: String, context: Option<Cow<'static, str>> },

    #[error("Registration is closed{}", format_context(.context))]
    RegistrationClosed { context: Option<Cow<'static, str>> },

    #[error("Roster file I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Roster serialization failure{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal registry error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
