mod model;
mod session;
mod status;
mod store;
mod validate;

pub use model::Timer;
pub use session::{load_session, save_session, SESSION_KEY};
pub use status::TimerStatus;
pub use store::{StoreOptions, TimerStore};
pub use validate::{validate_new_timer, NewTimer};
