mod disk;
mod handler;
mod models;
mod parser;
mod validator;

pub use handler::serve_file;
