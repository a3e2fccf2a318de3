pub mod handler;
pub mod messages;
pub mod notice;

pub use handler::{run, Response, Session};
