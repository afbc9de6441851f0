//! Input checks for presentation surfaces.
//!
//! The store accepts any name, category and duration; front ends run
//! user input through [`validate_new_timer`] first.

use crate::error::ValidationError;

/// Trimmed, checked input for `TimerStore::add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimer {
    pub name: String,
    pub duration: u64,
    pub category: String,
}

pub fn validate_new_timer(
    name: &str,
    duration: u64,
    category: &str,
) -> Result<NewTimer, ValidationError> {
    let name = name.trim();
    let category = category.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: "name" });
    }
    if category.is_empty() {
        return Err(ValidationError::Empty { field: "category" });
    }
    if duration == 0 {
        return Err(ValidationError::NonPositiveDuration);
    }
    Ok(NewTimer {
        name: name.to_string(),
        duration,
        category: category.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        let t = validate_new_timer("  Tea ", 60, " Drinks").unwrap();
        assert_eq!(t.name, "Tea");
        assert_eq!(t.category, "Drinks");
        assert_eq!(t.duration, 60);
    }

    #[test]
    fn rejects_blank_and_zero() {
        assert_eq!(
            validate_new_timer("   ", 60, "x"),
            Err(ValidationError::Empty { field: "name" })
        );
        assert_eq!(
            validate_new_timer("a", 60, ""),
            Err(ValidationError::Empty { field: "category" })
        );
        assert_eq!(
            validate_new_timer("a", 0, "x"),
            Err(ValidationError::NonPositiveDuration)
        );
    }
}
