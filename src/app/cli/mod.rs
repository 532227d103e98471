//! CLI module containing argument parsing and related functionality

pub mod args;
pub mod config;
pub mod date_parser;
pub mod display;
pub mod validation;

#[cfg(test)]
mod tests;
