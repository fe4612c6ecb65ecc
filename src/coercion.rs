//! Lenient conversion of untyped [`Value`]s into concrete Rust types.
//!
//! Every conversion comes in two flavours:
//! - [`Coerce::try_coerce`] reports why a value could not be converted,
//! - [`Coerce::coerce`] (and the free `to_*` functions) never fail and fall back
//!   to the target type's zero value instead.
//!
//! Bulk conversions ([`to_mapping`], [`to_sequence`]) convert element-wise and never
//! drop entries: an element that cannot be converted becomes its zero value.

use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;

use crate::value::{Value, ValueKind};


/// Number of fractional digits used when formatting floats as strings.
pub const FLOAT_STRING_PRECISION: usize = 6;


#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("cannot parse {input:?} as {target}")]
    #[diagnostic(code(nestcfg::coercion::unparsable))]
    Unparsable { input: String, target: &'static str },

    #[error("float {value} is not an integral value within the integer range")]
    #[diagnostic(code(nestcfg::coercion::not_integral))]
    NotIntegral { value: f64 },

    #[error("cannot convert a {found} into {target}")]
    #[diagnostic(code(nestcfg::coercion::incompatible))]
    Incompatible {
        found: ValueKind,
        target: &'static str,
    },
}


/// A type an untyped [`Value`] can be coerced into.
pub trait Coerce: Sized + Default {
    /// Human-readable name of the target type, used in errors.
    const TARGET: &'static str;

    /// Strict conversion.
    fn try_coerce(value: &Value) -> Result<Self, CoercionError>;

    /// Lenient conversion: any failure yields `Self::default()`.
    fn coerce(value: &Value) -> Self {
        Self::try_coerce(value).unwrap_or_default()
    }
}

#[inline]
fn incompatible<T: Coerce>(value: &Value) -> CoercionError {
    CoercionError::Incompatible {
        found: value.kind(),
        target: T::TARGET,
    }
}

#[inline]
fn unparsable<T: Coerce>(input: &str) -> CoercionError {
    CoercionError::Unparsable {
        input: input.to_string(),
        target: T::TARGET,
    }
}


impl Coerce for String {
    const TARGET: &'static str = "string";

    fn try_coerce(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::String(string) => Ok(string.clone()),
            Value::Integer(integer) => Ok(integer.to_string()),
            Value::Unsigned(integer) => Ok(integer.to_string()),
            Value::Float(float) => Ok(format_float(*float)),
            Value::Bool(boolean) => Ok(boolean.to_string()),
            other => Err(incompatible::<Self>(other)),
        }
    }
}

/// Fixed-point with [`FLOAT_STRING_PRECISION`] digits. Infinities render as
/// `+Inf`/`-Inf` and NaN as `NaN`.
fn format_float(float: f64) -> String {
    if float.is_nan() {
        "NaN".to_string()
    } else if float.is_infinite() {
        if float.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string()
    } else {
        format!("{:.*}", FLOAT_STRING_PRECISION, float)
    }
}

impl Coerce for i64 {
    const TARGET: &'static str = "integer";

    fn try_coerce(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Integer(integer) => Ok(*integer),
            // Narrowing to the native signed width wraps, like an `as` cast.
            Value::Unsigned(integer) => Ok(*integer as i64),
            Value::Float(float) => {
                integral_float_to_i64(*float).ok_or(CoercionError::NotIntegral { value: *float })
            }
            Value::String(string) => string
                .parse::<i64>()
                .map_err(|_| unparsable::<Self>(string)),
            other => Err(incompatible::<Self>(other)),
        }
    }
}

impl Coerce for f64 {
    const TARGET: &'static str = "float";

    fn try_coerce(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Float(float) => Ok(*float),
            Value::Integer(integer) => Ok(*integer as f64),
            Value::Unsigned(integer) => Ok(*integer as f64),
            Value::String(string) => string
                .parse::<f64>()
                .map_err(|_| unparsable::<Self>(string)),
            other => Err(incompatible::<Self>(other)),
        }
    }
}

impl Coerce for bool {
    const TARGET: &'static str = "boolean";

    fn try_coerce(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Bool(boolean) => Ok(*boolean),
            Value::String(string) if string.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(string) if string.eq_ignore_ascii_case("false") => Ok(false),
            Value::String(string) => Err(unparsable::<Self>(string)),
            other => Err(incompatible::<Self>(other)),
        }
    }
}


/// Returns `Some` only for finite floats without a fractional part
/// that fit into an `i64`.
fn integral_float_to_i64(float: f64) -> Option<i64> {
    // i64::MIN is exactly representable, i64::MAX rounds up to 2^63.
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;

    if float.is_finite() && float.fract() == 0.0 && in_range {
        Some(float as i64)
    } else {
        None
    }
}



#[inline]
pub fn to_string(value: &Value) -> String {
    String::coerce(value)
}

#[inline]
pub fn to_int(value: &Value) -> i64 {
    i64::coerce(value)
}

#[inline]
pub fn to_float(value: &Value) -> f64 {
    f64::coerce(value)
}

#[inline]
pub fn to_bool(value: &Value) -> bool {
    bool::coerce(value)
}

/// Coerces every value of `entries`, keeping all keys and their order.
pub fn to_mapping<T: Coerce>(entries: &IndexMap<String, Value>) -> IndexMap<String, T> {
    entries
        .iter()
        .map(|(key, value)| (key.clone(), T::coerce(value)))
        .collect()
}

/// Coerces every element of `items`, keeping their order.
pub fn to_sequence<T: Coerce>(items: &[Value]) -> Vec<T> {
    items.iter().map(T::coerce).collect()
}
