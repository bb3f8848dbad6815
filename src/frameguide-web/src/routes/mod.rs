//! HTTP route handlers

pub mod frame;
pub mod health;
pub mod redirect;

pub use frame::*;
pub use health::*;
pub use redirect::*;
