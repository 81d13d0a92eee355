//! Values produced by constant evaluation.

use std::fmt;

/// A value computed at elaboration time.
///
/// `Invalid` is the default and marks an evaluation that failed; operations
/// on an invalid value stay invalid rather than propagating an error at
/// every step.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ConstantValue {
    /// No usable value; evaluation failed somewhere upstream.
    #[default]
    Invalid,
    /// Integral value.
    Int(i64),
    /// Real (floating-point) value.
    Real(f64),
    /// String value.
    Str(String),
    /// Queue of values, also used for unpacked arrays.
    Queue(Vec<ConstantValue>),
    /// Placeholder an unbounded `$` literal evaluates to when no queue
    /// target is in scope but the evaluation permits it.
    Unbounded,
}

impl ConstantValue {
    /// Check if this is the invalid value.
    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self, ConstantValue::Invalid)
    }

    /// Check if this is the unbounded placeholder.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, ConstantValue::Unbounded)
    }

    /// Get the integral value, if this is one.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstantValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the queue elements, if this is a queue.
    #[inline]
    pub fn as_queue(&self) -> Option<&[ConstantValue]> {
        match self {
            ConstantValue::Queue(elems) => Some(elems),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Invalid => write!(f, "<invalid>"),
            ConstantValue::Int(v) => write!(f, "{v}"),
            ConstantValue::Real(v) => write!(f, "{v}"),
            ConstantValue::Str(s) => write!(f, "\"{s}\""),
            ConstantValue::Queue(elems) => {
                write!(f, "[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, "]")
            }
            ConstantValue::Unbounded => write!(f, "$"),
        }
    }
}

impl From<i64> for ConstantValue {
    fn from(v: i64) -> Self {
        ConstantValue::Int(v)
    }
}

impl From<&str> for ConstantValue {
    fn from(s: &str) -> Self {
        ConstantValue::Str(s.to_owned())
    }
}
