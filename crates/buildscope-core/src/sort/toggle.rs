//! Column-header sort toggling

use super::spec::{SortField, SortOrder, SortSpec};

/// Column-header sort state.
///
/// Clicking a new field sorts it descending. Clicking the same field again
/// goes Descending -> Ascending -> (no sort while a search is active,
/// otherwise Descending again).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    current: Option<SortSpec>,
}

impl SortState {
    pub fn new(initial: Option<SortSpec>) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Option<&SortSpec> {
        self.current.as_ref()
    }

    pub fn set(&mut self, spec: Option<SortSpec>) {
        self.current = spec;
    }

    /// Advance the state for a click on `field` and return the new spec
    pub fn toggle(&mut self, field: SortField, search_active: bool) -> Option<&SortSpec> {
        let next = match self.current.take() {
            Some(spec) if spec.field == field => match spec.order {
                SortOrder::Descending => Some(SortSpec::ascending(field)),
                SortOrder::Ascending if search_active => None,
                SortOrder::Ascending => Some(SortSpec::descending(field)),
            },
            _ => Some(SortSpec::descending(field)),
        };
        self.current = next;
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_starts_descending() {
        let mut state = SortState::new(Some(SortSpec::ascending(SortField::RawSize)));
        let spec = state.toggle(SortField::AssetFilename, false).cloned();
        assert_eq!(spec, Some(SortSpec::descending(SortField::AssetFilename)));
    }

    #[test]
    fn test_cycle_without_search() {
        let mut state = SortState::default();
        let field = SortField::RawSize;
        assert_eq!(state.toggle(field.clone(), false).map(|s| s.order), Some(SortOrder::Descending));
        assert_eq!(state.toggle(field.clone(), false).map(|s| s.order), Some(SortOrder::Ascending));
        assert_eq!(state.toggle(field, false).map(|s| s.order), Some(SortOrder::Descending));
    }

    #[test]
    fn test_cycle_with_search_reaches_none() {
        let mut state = SortState::default();
        let field = SortField::PercentSize;
        state.toggle(field.clone(), true);
        state.toggle(field.clone(), true);
        assert_eq!(state.toggle(field.clone(), true), None);
        assert_eq!(state.current(), None);
        assert_eq!(state.toggle(field, true).map(|s| s.order), Some(SortOrder::Descending));
    }
}
