use super::{Record, SetupError};

/// Find the single attribute of kind `State` on a record type.
pub fn resolve_state_attribute<R: Record>() -> Result<&'static str, SetupError> {
    let found: Vec<&'static str> = R::attributes()
        .iter()
        .filter(|attribute| attribute.is_state())
        .map(|attribute| attribute.name)
        .collect();

    match found.len() {
        0 => Err(SetupError::NoStateAttribute {
            record_type: R::record_type(),
        }),
        1 => Ok(found[0]),
        _ => Err(SetupError::MultipleStateAttributes {
            record_type: R::record_type(),
            attributes: found,
        }),
    }
}
