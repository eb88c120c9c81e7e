//! Dynamic value type for object properties, arguments and results.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::collections::PVec;
use crate::object::Object;
use crate::types::ValueKind;

/// Dynamic value held by object properties and passed through calls.
///
/// Cloning is cheap for every variant. Objects are shared handles, so a cloned
/// `Value::Object` refers to the same object; arrays use structural sharing.
#[derive(Clone)]
pub enum Value {
    /// A property that exists but holds no value.
    Undefined,
    /// The explicit absence of an object.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value (all numbers are 64-bit floats).
    Number(f64),
    /// String value.
    String(Arc<str>),
    /// Persistent array.
    Array(PVec<Value>),
    /// Shared object reference.
    Object(Object),
    /// Callable value.
    Fn(Function),
    /// Host value of a kind with no dedicated variant.
    Opaque(Opaque),
}

/// Signature of a method body.
///
/// The first argument is the receiver (`this`); calls made through it are
/// dispatched on whatever object the method was invoked on.
pub type MethodFn = dyn Fn(&Object, &[Value]) -> crate::Result<Value> + Send + Sync;

/// Callable property value.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    func: Arc<MethodFn>,
}

impl Function {
    /// Creates a function from a method body.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Object, &[Value]) -> crate::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Returns the function name used for display.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function with `this` as receiver.
    ///
    /// # Errors
    ///
    /// Returns whatever error the function body returns.
    pub fn call(&self, this: &Object, args: &[Value]) -> crate::Result<Value> {
        (self.func)(this, args)
    }

    /// Returns true if both handles refer to the same function body.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name)
    }
}

/// Host value of a kind the classifier does not recognize.
#[derive(Clone)]
pub struct Opaque {
    type_name: &'static str,
    data: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps an arbitrary host value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            data: Arc::new(value),
        }
    }

    /// Returns the Rust type name of the wrapped value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Attempts to view the wrapped value as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<opaque {}>", self.type_name)
    }
}

impl Value {
    /// Creates an array value from anything convertible to values.
    pub fn array<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Creates a function value.
    pub fn function<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&Object, &[Value]) -> crate::Result<Value> + Send + Sync + 'static,
    {
        Self::Fn(Function::new(name, func))
    }

    /// Returns the kind of this value.
    ///
    /// Arrays and null are their own kinds, never `Object`.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Fn(_) => ValueKind::Function,
            Self::Array(_) => ValueKind::Array,
            Self::Null => ValueKind::Null,
            Self::Object(_) => ValueKind::Object,
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Undefined => ValueKind::Undefined,
            Self::Opaque(_) => ValueKind::Unknown,
        }
    }

    /// Returns true if this value can be invoked.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Fn(_))
    }

    /// Returns true if this value is undefined.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if this value is truthy.
    ///
    /// `undefined`, `null`, `false`, `0`, `NaN` and the empty string are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an array reference.
    #[must_use]
    pub const fn as_array(&self) -> Option<&PVec<Value>> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract an object reference.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Attempts to extract a function reference.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Fn(f) => Some(f),
            _ => None,
        }
    }

    /// Extracts a number or reports a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch error if this value is not a number.
    pub fn expect_number(&self) -> crate::Result<f64> {
        self.as_number()
            .ok_or_else(|| crate::Error::type_mismatch(ValueKind::Number, self.kind()))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            // NaN equals itself so recorded results compare reflexively.
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Fn(a), Self::Fn(b)) => a.ptr_eq(b),
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(&a.data, &b.data),
            _ => false,
        }
    }
}

/// Writes a number the way script engines print it (`6`, not `6.0`).
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(v) => write!(f, "{v:?}"),
            Self::Object(o) => write!(f, "{o:?}"),
            Self::Fn(func) => write!(f, "{func:?}"),
            Self::Opaque(o) => write!(f, "{o:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(v) => {
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // Holes print as empty, like a script engine's join.
                    if !matches!(item, Self::Undefined | Self::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(o) => write!(f, "[object {}]", o.class_name().unwrap_or("Object")),
            Self::Fn(func) => write!(f, "function {}()", func.name()),
            Self::Opaque(o) => write!(f, "[{}]", o.type_name()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Undefined
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Fn(f)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Self::Opaque(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Self::Array(v) => serde::Serialize::serialize(v, serializer),
            // Objects may be cyclic, so they serialize as their summary string.
            other => serializer.collect_str(other),
        }
    }
}
