use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::placeholder::{PlaceholderDefinition, SourceType};
use crate::pattern::placeholder_literal;

/// Validate internal consistency of the active placeholder definitions.
///
/// This checks:
/// - names are non-empty and unique once wrapped in braces
/// - excel and dropdown sources name a column or list
pub fn validate_definitions(definitions: &[PlaceholderDefinition]) -> Result<()> {
    let mut literals = BTreeSet::new();

    for definition in definitions.iter().filter(|def| def.active) {
        let name = definition.name.trim();
        if name.is_empty() || name == "{}" {
            return Err(Error::InvalidPlaceholder(
                "placeholder name must not be empty".to_string(),
            ));
        }

        if !literals.insert(placeholder_literal(name)) {
            return Err(Error::InvalidPlaceholder(format!(
                "duplicate placeholder name: {name}"
            )));
        }

        let needs_source = matches!(
            definition.source_type,
            SourceType::ExcelColumn | SourceType::DropdownList
        );
        if needs_source && definition.source_value.trim().is_empty() {
            return Err(Error::InvalidPlaceholder(format!(
                "placeholder {name} has no source column or list"
            )));
        }
    }

    Ok(())
}
