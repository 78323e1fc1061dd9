//! CLI test modules

mod argument_parsing;
mod toml_config;
