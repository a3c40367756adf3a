//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use workbench_application::variable_resolver::resolve;
//! use workbench_domain::{Environment, Variable};
//!
//! let env = Environment::new("development").with_variable(Variable::new("host", "localhost"));
//!
//! assert_eq!(resolve("http://{{host}}/api", Some(&env)), "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, ResolvedVariable, VariableResolver, resolve};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};
