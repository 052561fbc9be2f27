//! Macros for declaring record schemas.

/// Generate a [`Record`](crate::record::Record) implementation for a struct.
///
/// Each listed field is declared with its attribute kind, `State` or
/// `Column`. Field values are read through
/// [`RawValue`](crate::record::RawValue).
///
/// # Example
///
/// ```
/// use statefield::record::{Record, AttributeKind};
/// use statefield::record_schema;
///
/// struct Invoice {
///     id: u64,
///     status: String,
///     paid_by: Option<String>,
/// }
///
/// record_schema! {
///     Invoice {
///         id: Column,
///         status: State,
///         paid_by: Column,
///     }
/// }
///
/// let invoice = Invoice { id: 7, status: "sent".to_string(), paid_by: None };
///
/// assert_eq!(Invoice::attributes()[1].kind, AttributeKind::State);
/// assert_eq!(invoice.read_attribute("status"), Some("sent".to_string()));
/// assert_eq!(invoice.read_attribute("id"), Some("7".to_string()));
/// assert_eq!(invoice.read_attribute("paid_by"), None);
/// ```
#[macro_export]
macro_rules! record_schema {
    (
        $name:ident {
            $(
                $field:ident : $kind:ident
            ),* $(,)?
        }
    ) => {
        impl $crate::record::Record for $name {
            fn attributes() -> &'static [$crate::record::Attribute] {
                const ATTRIBUTES: &[$crate::record::Attribute] = &[
                    $(
                        $crate::record::Attribute::new(
                            stringify!($field),
                            $crate::record::AttributeKind::$kind,
                        )
                    ),*
                ];
                ATTRIBUTES
            }

            #[allow(unused_variables)]
            fn read_attribute(&self, name: &str) -> Option<String> {
                match name {
                    $(
                        stringify!($field) => $crate::record::RawValue::raw_value(&self.$field),
                    )*
                    _ => None,
                }
            }
        }
    };
}
