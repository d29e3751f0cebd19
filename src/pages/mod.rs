pub mod home;
pub mod results;

pub use home::HomePage;
pub use results::SearchResultsPage;

use thiserror::Error;

/// Fatal calendar-navigation failure: the requested date never became
/// visible within the paging bound. Carries the date so the run's error
/// output identifies what could not be located.
#[derive(Debug, Error)]
#[error("date {date} not found after {advances} month advances")]
pub struct DateNotFound {
    pub date: String,
    pub advances: usize,
}
