//! Session ("beacon") entities.

pub mod category;
pub mod model;
pub mod venue;

pub use category::Category;
pub use model::{CreateSession, Session, SessionStatus};
pub use venue::Venue;
