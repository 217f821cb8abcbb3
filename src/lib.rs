pub mod assistant;
pub mod banner;
pub mod commands;
pub mod completion;
pub mod config;
pub mod consts;
pub mod error;
pub mod export;
pub mod locale;
pub mod request;
pub mod templates;
