pub mod handler;

pub use handler::{InputHandler, KeyAction, describe_key};
