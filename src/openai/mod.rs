pub mod chat;
pub mod core;
pub use chat::*;
pub use core::*;
