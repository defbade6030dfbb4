use std::any::Any;
use std::borrow::Cow;
use std::fmt::Display;

use thiserror::Error;

/// Top-level error type returned by the assertion generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The accessor table of a value could not be read.
    #[error("failed to introspect `{type_name}`: {source}")]
    Introspection {
        type_name: &'static str,
        #[source]
        source: IntrospectionError,
    },

    /// A value was reached again while it was still being traversed.
    #[error("cyclic object graph: `{path}` refers back to an enclosing `{type_name}`")]
    CyclicGraph { path: String, type_name: &'static str },

    /// The root label must contain at least one non-whitespace character.
    #[error("variable name must not be blank")]
    BlankVariableName,

    /// Writing the rendered tree to a sink failed.
    #[error("failed to write assertions: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised by an `Inspect` implementation that cannot describe its properties.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct IntrospectionError {
    pub message: Cow<'static, str>,
}

impl IntrospectionError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self { message: message.into() }
    }
}

/// Failure of a single accessor. Never fatal: rendered as a comment line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct AccessorError {
    pub description: String,
}

impl AccessorError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Captures the `Display` output of any error-like value.
    pub fn from_display<E: Display>(error: E) -> Self {
        Self::new(error.to_string())
    }

    /// Built from the payload of a panic caught while invoking an accessor.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_string(),
                None => "unknown panic payload".to_string(),
            },
        };
        Self::new(format!("panicked: {message}"))
    }
}

/// Errors raised while loading an [`AssertGeneratorConfig`](crate::AssertGeneratorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type GenerateResult<T> = Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_error_keeps_display_text() {
        let err = AccessorError::from_display("index out of bounds");
        assert_eq!(err.description, "index out of bounds");
        assert_eq!(err.to_string(), "index out of bounds");
    }

    #[test]
    fn panic_payloads_become_descriptions() {
        let err = AccessorError::from_panic(Box::new("index out of bounds"));
        assert_eq!(err.description, "panicked: index out of bounds");

        let err = AccessorError::from_panic(Box::new(format!("bad state {}", 3)));
        assert_eq!(err.description, "panicked: bad state 3");

        let err = AccessorError::from_panic(Box::new(42u8));
        assert_eq!(err.description, "panicked: unknown panic payload");
    }

    #[test]
    fn introspection_error_names_type() {
        let err = GenerateError::Introspection {
            type_name: "app::Order",
            source: IntrospectionError::new("property table unavailable"),
        };
        assert_eq!(
            err.to_string(),
            "failed to introspect `app::Order`: property table unavailable"
        );
    }
}
