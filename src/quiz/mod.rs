pub mod handlers;
pub mod models;
pub mod registry;
pub mod service;


pub use handlers::config;
pub use registry::{QuizRegistry, RegistryError};
