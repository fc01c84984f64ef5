//! Submission boundary: where validated form data leaves the form

mod handlers;
mod traits;

pub use handlers::handler_from_config;
pub use traits::SubmitHandler;

#[cfg(test)]
pub use traits::MockSubmitHandler;
