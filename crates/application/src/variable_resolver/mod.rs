//! Variable resolution module
//!
//! Substitutes `{{variable}}` tokens from the selected environment.
//!
//! # Usage
//!
//! ```
//! use courier_application::variable_resolver::{VariableResolver, resolve};
//! use courier_domain::Environment;
//!
//! let env = Environment::new("1", "dev").with_variable("host", "localhost");
//! assert_eq!(resolve("http://{{host}}/api", Some(&env)), "http://localhost/api");
//!
//! let resolver = VariableResolver::new(Some(&env));
//! let result = resolver.resolve("http://{{host}}/{{path}}");
//! assert_eq!(result.unresolved, vec!["path"]);
//! ```

pub mod engine;
pub mod parser;

pub use engine::{ResolutionResult, VariableResolver, resolve};
pub use parser::{VariableReference, extract_variable_names, has_variables, parse_variables};
