pub mod detail;
pub mod error;
pub mod list;
pub mod reconcile;
pub mod record;
pub mod route;

#[cfg(test)]
mod testing;

pub use detail::{DetailPhase, DetailView};
pub use error::ViewError;
pub use list::{ListState, ListView};
pub use record::{RecordPhase, RecordView};
pub use route::Route;
