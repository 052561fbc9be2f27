//! Record types that carry a state attribute.
//!
//! The engine never owns records. It learns a record type's schema through
//! [`Record::attributes`] and reads the raw state value through
//! [`Record::read_attribute`]; everything about how that value is persisted
//! belongs to the record type.

pub mod error;
pub mod macros;
mod resolve;

pub use error::SetupError;
pub use resolve::resolve_state_attribute;

use std::any::type_name;

/// Semantic kind of a record attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    /// The attribute holding the record's FSM state.
    State,

    /// Any other persisted attribute.
    Column,
}

/// One declared attribute of a record type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
}

impl Attribute {
    pub const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self { name, kind }
    }

    pub const fn state(name: &'static str) -> Self {
        Self::new(name, AttributeKind::State)
    }

    pub const fn column(name: &'static str) -> Self {
        Self::new(name, AttributeKind::Column)
    }

    pub fn is_state(&self) -> bool {
        self.kind == AttributeKind::State
    }
}

/// A persistent record type a state machine can be attached to.
///
/// Usually implemented with [`record_schema!`](crate::record_schema).
/// Exactly one attribute must be of kind [`AttributeKind::State`]; this is
/// checked when the type's registry is first built.
pub trait Record: 'static {
    /// Declared attributes of the record type.
    fn attributes() -> &'static [Attribute];

    /// Read the raw value of an attribute; `None` when unset or unknown.
    fn read_attribute(&self, name: &str) -> Option<String>;

    /// Name used in errors and logs.
    fn record_type() -> &'static str {
        type_name::<Self>()
    }
}

/// Conversion of an attribute's value into its raw string form.
pub trait RawValue {
    fn raw_value(&self) -> Option<String>;
}

impl RawValue for String {
    fn raw_value(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl RawValue for &str {
    fn raw_value(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

impl<T: RawValue> RawValue for Option<T> {
    fn raw_value(&self) -> Option<String> {
        self.as_ref().and_then(RawValue::raw_value)
    }
}

macro_rules! display_raw_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawValue for $ty {
                fn raw_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_raw_value!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
