pub mod attribution;
pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod extractor;
pub mod gemini;
pub mod i18n;
pub mod mode;
pub mod pipeline;
pub mod selector;
pub mod server;
pub mod text;
pub mod validator;
