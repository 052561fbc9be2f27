//! Filter predicates over a record's state attribute.

use crate::record::Record;
use std::fmt;
use std::sync::Arc;

/// A reusable filter expression selecting records.
///
/// Predicates are plain values: storage backends can translate them into
/// their own query language, and [`Predicate::matches`] evaluates them
/// against in-memory records.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// The attribute's raw value equals `value`.
    Equals {
        attribute: Arc<str>,
        value: Arc<str>,
    },

    /// The inner predicate's outcome equals `expected`.
    Is {
        predicate: Box<Predicate>,
        expected: bool,
    },

    /// Matches no record.
    Never,
}

impl Predicate {
    pub fn equals(attribute: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        Predicate::Equals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Boolean comparison of this predicate's outcome.
    pub fn is(&self, expected: bool) -> Predicate {
        Predicate::Is {
            predicate: Box::new(self.clone()),
            expected,
        }
    }

    pub fn never() -> Self {
        Predicate::Never
    }

    /// Evaluate the predicate against one record.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Predicate::Equals { attribute, value } => record
                .read_attribute(attribute)
                .is_some_and(|raw| *raw == **value),
            Predicate::Is {
                predicate,
                expected,
            } => predicate.matches(record) == *expected,
            Predicate::Never => false,
        }
    }

    /// Select the records this predicate matches, preserving order.
    pub fn filter<'a, R, I>(&self, records: I) -> Vec<&'a R>
    where
        R: Record,
        I: IntoIterator<Item = &'a R>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .collect()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals { attribute, value } => write!(f, "{attribute} = '{value}'"),
            Predicate::Is {
                predicate,
                expected,
            } => write!(f, "({predicate}) IS {expected}"),
            Predicate::Never => f.write_str("FALSE"),
        }
    }
}

/// Argument to a type-level comparison against a transition.
///
/// Only booleans are meaningful; anything else is carried as its debug
/// representation so it can be reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Comparand {
    Bool(bool),
    Unexpected(String),
}

impl Comparand {
    /// A non-boolean argument, kept as its debug representation.
    pub fn unexpected(value: impl fmt::Debug) -> Self {
        Comparand::Unexpected(format!("{value:?}"))
    }
}

impl From<bool> for Comparand {
    fn from(value: bool) -> Self {
        Comparand::Bool(value)
    }
}

impl From<&str> for Comparand {
    fn from(value: &str) -> Self {
        Comparand::unexpected(value)
    }
}

impl From<String> for Comparand {
    fn from(value: String) -> Self {
        Comparand::unexpected(value)
    }
}

impl From<&String> for Comparand {
    fn from(value: &String) -> Self {
        Comparand::unexpected(value)
    }
}

macro_rules! unexpected_comparand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Comparand {
                fn from(value: $ty) -> Self {
                    Comparand::unexpected(value)
                }
            }
        )*
    };
}

unexpected_comparand!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, (),
);
