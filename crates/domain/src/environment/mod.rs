//! Environment and variable domain types

mod variable;

pub use variable::{DEFAULT_ENVIRONMENT_NAME, Environment, Variable};
