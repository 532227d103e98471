//! Tests for the CLI module
//!
//! Argument parsing, configuration merging, date parsing and output formatting.

pub mod date_parser_tests;
