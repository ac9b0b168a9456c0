pub mod adherence;
pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod period;
pub mod state;
pub mod storage;

pub use adherence::aggregate;
pub use app::router;
pub use errors::{AppError, MalformedInputError};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
