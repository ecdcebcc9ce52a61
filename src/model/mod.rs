mod repository;
mod snapshot;
mod report;

pub use repository::{RepositoryRoot, RepositorySet};
pub use snapshot::{size_delta, SizeSnapshot, SIZE_UNAVAILABLE};
pub use report::{CleaningReport, FormattedSizes, ReportJson};
