pub mod browser;
pub mod error;
pub mod storage;
pub mod types;

pub use browser::{BrowserSession, TableGrid, TableSource};
pub use error::Error;
pub use storage::{RecordSource, RecordStorage};
pub use types::{HemisphereEntry, Locator, MarsRecord};

pub type Result<T> = std::result::Result<T, Error>;
