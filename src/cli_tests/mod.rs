//! Tests for the dgrid binary: argument parsing and command helpers.

mod cli;
mod layout;
