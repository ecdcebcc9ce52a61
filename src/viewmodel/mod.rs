mod app_viewmodel;
mod repos_viewmodel;
mod selection;

pub use app_viewmodel::{Action, AppViewModel, ViewMode, WorkerEvent};
pub use repos_viewmodel::RepositoriesViewModel;
pub use selection::Selectable;
