pub mod controller;
pub mod models;
pub mod reveal;
pub mod store;
pub use controller::*;
pub use models::*;
pub use reveal::*;
pub use store::*;
