use scrapedesk_store::{Company, CompanyId};
use std::collections::HashMap;

/// Tri-state of the "select all" checkbox in the list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl SelectAllState {
    pub fn marker(&self) -> &'static str {
        match self {
            SelectAllState::Unchecked => "[ ]",
            SelectAllState::Indeterminate => "[-]",
            SelectAllState::Checked => "[x]",
        }
    }
}

/// Which rows are checked for bulk actions.
///
/// Ids without an entry count as unselected. The set is owned by the list
/// view and cleared whenever the collection is refetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    entries: HashMap<CompanyId, bool>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &CompanyId) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    /// Flip one row, leaving every other entry untouched.
    pub fn toggle(&mut self, id: &CompanyId) {
        let entry = self.entries.entry(id.clone()).or_insert(false);
        *entry = !*entry;
    }

    pub fn set(&mut self, id: &CompanyId, selected: bool) {
        self.entries.insert(id.clone(), selected);
    }

    /// Replace the whole mapping with `selected` for every visible company.
    pub fn set_all(&mut self, companies: &[Company], selected: bool) {
        self.entries = companies
            .iter()
            .map(|company| (company.id.clone(), selected))
            .collect();
    }

    /// Header checkbox action: select everything, or clear everything when
    /// all rows are already selected.
    pub fn toggle_all(&mut self, companies: &[Company]) {
        let target = !self.all_selected(companies);
        self.set_all(companies, target);
    }

    pub fn all_selected(&self, companies: &[Company]) -> bool {
        !companies.is_empty() && companies.iter().all(|c| self.is_selected(&c.id))
    }

    pub fn none_selected(&self, companies: &[Company]) -> bool {
        companies.iter().all(|c| !self.is_selected(&c.id))
    }

    pub fn indeterminate(&self, companies: &[Company]) -> bool {
        !self.all_selected(companies) && !self.none_selected(companies)
    }

    pub fn state(&self, companies: &[Company]) -> SelectAllState {
        if self.all_selected(companies) {
            SelectAllState::Checked
        } else if self.none_selected(companies) {
            SelectAllState::Unchecked
        } else {
            SelectAllState::Indeterminate
        }
    }

    /// Selected ids of `companies`, in collection order.
    pub fn selected_ids(&self, companies: &[Company]) -> Vec<CompanyId> {
        companies
            .iter()
            .filter(|company| self.is_selected(&company.id))
            .map(|company| company.id.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.entries.values().filter(|selected| **selected).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn companies(ids: &[&str]) -> Vec<Company> {
        ids.iter().map(|id| Company::new(*id)).collect()
    }

    #[test]
    fn test_empty_collection_is_never_all_selected() {
        let selection = SelectionSet::new();
        assert!(!selection.all_selected(&[]));
        assert!(selection.none_selected(&[]));
        assert_eq!(selection.state(&[]), SelectAllState::Unchecked);
    }

    #[test]
    fn test_toggle_leaves_other_rows_alone() {
        let list = companies(&["1", "2", "3"]);
        let mut selection = SelectionSet::new();
        selection.set(&list[2].id, true);

        selection.toggle(&list[0].id);

        assert!(selection.is_selected(&list[0].id));
        assert!(!selection.is_selected(&list[1].id));
        assert!(selection.is_selected(&list[2].id));
        assert_eq!(selection.state(&list), SelectAllState::Indeterminate);
    }

    #[test]
    fn test_false_entries_are_not_selected() {
        let list = companies(&["1", "2"]);
        let mut selection = SelectionSet::new();
        selection.set_all(&list, false);

        assert!(selection.none_selected(&list));
        assert!(!selection.indeterminate(&list));
        assert!(selection.selected_ids(&list).is_empty());
    }
}
