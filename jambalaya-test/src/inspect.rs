//! The `Inspect` capability: how the generator sees a value.
//!
//! A value describes itself through its [`Shape`] and, when it is an object,
//! through two accessor tables: [`Inspect::properties`] (the bean-style view)
//! and [`Inspect::methods`] (every zero-argument accessor, used for types
//! whose path matches a scan-all prefix).

use std::any;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use crate::errors::{AccessorError, IntrospectionError};

/// A value that can be walked by the assertion generator.
///
/// Usually implemented with `#[derive(Inspect)]`.
pub trait Inspect {
    /// Fully qualified type path, matched against scan-all prefixes.
    fn type_name(&self) -> &'static str {
        any::type_name::<Self>()
    }

    /// Identity of the value for cycle detection.
    ///
    /// Transparent wrappers (`Box`, `Rc`, `Option`, ...) forward to the wrapped value.
    fn identity(&self) -> Identity {
        Identity::new((self as *const Self).cast::<()>(), self.type_name())
    }

    fn shape(&self) -> Shape<'_>;

    /// Readable properties in declaration order.
    fn properties(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
        Ok(Vec::new())
    }

    /// Every zero-argument accessor: properties plus declared methods.
    fn methods(&self) -> Result<Vec<Accessor<'_>>, IntrospectionError> {
        self.properties()
    }
}

/// Address plus type path. A struct and its first field share an address but
/// never a type, so the pair is unique among live values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    address: usize,
    type_name: &'static str,
}

impl Identity {
    pub fn new(address: *const (), type_name: &'static str) -> Self {
        Self {
            address: address as usize,
            type_name,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// What a value is, as far as assertions are concerned.
pub enum Shape<'a> {
    /// Absent value (`None`, JSON `null`).
    Null,
    /// Not meaningful to assert on; skipped silently.
    Ignored,
    /// Directly comparable literal.
    Scalar(Literal),
    /// Ordered sequence; elements are asserted by index.
    List(Vec<Value<'a>>),
    /// Unordered collection. Never asserted on and never visited.
    Set,
    /// Composite value walked through its accessors.
    Object,
}

impl Shape<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Ignored => "ignored",
            Shape::Scalar(_) => "scalar",
            Shape::List(_) => "list",
            Shape::Set => "set",
            Shape::Object => "object",
        }
    }
}

/// Result of invoking an accessor: either borrowed from the parent or computed.
pub enum Value<'a> {
    Borrowed(&'a (dyn Inspect + 'a)),
    Owned(Box<dyn Inspect + 'a>),
}

impl<'a> Value<'a> {
    pub fn borrowed<T: Inspect + 'a>(value: &'a T) -> Self {
        Value::Borrowed(value)
    }

    pub fn owned<T: Inspect + 'a>(value: T) -> Self {
        Value::Owned(Box::new(value))
    }
}

impl<'a> Deref for Value<'a> {
    type Target = dyn Inspect + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Value::Borrowed(value) => *value,
            Value::Owned(value) => &**value,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Borrowed(value) => f.debug_tuple("Borrowed").field(&value.type_name()).finish(),
            Value::Owned(value) => f.debug_tuple("Owned").field(&value.type_name()).finish(),
        }
    }
}

type Invocation<'a> = Box<dyn FnOnce() -> Result<Value<'a>, AccessorError> + 'a>;

/// A named zero-argument read of a value, invoked lazily by the generator.
pub struct Accessor<'a> {
    name: Cow<'static, str>,
    segment: String,
    invoke: Invocation<'a>,
}

impl<'a> Accessor<'a> {
    /// Accessor rendered as `segment` in assertion paths.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, segment: impl Into<String>, invoke: F) -> Self
    where
        F: FnOnce() -> Result<Value<'a>, AccessorError> + 'a,
    {
        Self {
            name: name.into(),
            segment: segment.into(),
            invoke: Box::new(invoke),
        }
    }

    /// Accessor rendered as a call, `name()`.
    pub fn method<F>(name: impl Into<Cow<'static, str>>, invoke: F) -> Self
    where
        F: FnOnce() -> Result<Value<'a>, AccessorError> + 'a,
    {
        let name = name.into();
        let segment = format!("{name}()");
        Self::new(name, segment, invoke)
    }

    /// Infallible accessor over a borrowed field.
    pub fn field<T: Inspect + 'a>(name: &'static str, value: &'a T) -> Self {
        Self::method(name, move || Ok(Value::borrowed(value)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn invoke(self) -> Result<Value<'a>, AccessorError> {
        (self.invoke)()
    }
}

impl fmt::Debug for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("segment", &self.segment)
            .finish_non_exhaustive()
    }
}

/// Expected value of an equality assertion.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Char(char),
    /// Decimal representation, rendered verbatim.
    Number(String),
    Bool(bool),
    Enum {
        type_name: Cow<'static, str>,
        variant: Cow<'static, str>,
    },
    /// Date/time value in its canonical text form.
    Temporal(String),
}

impl Literal {
    pub fn number(value: impl fmt::Display) -> Self {
        Literal::Number(value.to_string())
    }

    pub fn enum_variant(type_name: impl Into<Cow<'static, str>>, variant: impl Into<Cow<'static, str>>) -> Self {
        Literal::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(text) => write!(f, "{text:?}"),
            Literal::Char(ch) => write!(f, "{ch:?}"),
            Literal::Number(number) => f.write_str(number),
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Enum { type_name, variant } => write!(f, "{type_name}::{variant}"),
            Literal::Temporal(text) => write!(f, "{text:?}"),
        }
    }
}
