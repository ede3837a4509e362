//! In-process traffic interception.

mod hub;

pub use hub::InterceptHub;
