use crate::model::{RepositorySet, SizeSnapshot};

use super::selection::Selectable;

/// ViewModel for the list of discovered repositories
pub struct RepositoriesViewModel {
    paths: Vec<String>,
    selected_index: usize,
    before: SizeSnapshot,
}

impl RepositoriesViewModel {
    pub fn new(repositories: &RepositorySet, before: SizeSnapshot) -> Self {
        let paths = repositories
            .to_sorted_vec()
            .iter()
            .map(|r| r.to_string())
            .collect();
        Self {
            paths,
            selected_index: 0,
            before,
        }
    }

    pub fn empty() -> Self {
        Self {
            paths: Vec::new(),
            selected_index: 0,
            before: SizeSnapshot::new(0, 0),
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn before(&self) -> SizeSnapshot {
        self.before
    }
}

impl Selectable for RepositoriesViewModel {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn selected(&self) -> usize {
        self.selected_index
    }

    fn set_selected(&mut self, index: usize) {
        self.selected_index = index;
    }
}
