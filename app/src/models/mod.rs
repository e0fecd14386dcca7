pub mod entities;
pub mod todos;

pub use todos::Todo;
