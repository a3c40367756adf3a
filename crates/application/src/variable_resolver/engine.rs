//! Variable resolution engine
//!
//! Substitutes `{{variable}}` references with values from one environment.

use workbench_domain::Environment;

use super::parser::parse_variables;

/// A variable that was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// Variable name as written.
    pub name: String,
    /// Substituted value.
    pub value: String,
}

/// Result of variable resolution for a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// The input with every resolvable reference substituted.
    pub resolved: String,

    /// Variables that were successfully resolved, in order of appearance.
    pub resolved_variables: Vec<ResolvedVariable>,

    /// Variable names that could not be resolved. Left verbatim in `resolved`.
    pub unresolved: Vec<String>,
}

impl ResolutionResult {
    /// Creates a result for input with no variables.
    #[must_use]
    pub fn no_variables(input: &str) -> Self {
        Self {
            resolved: input.to_string(),
            resolved_variables: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Returns true if every reference was resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolves `{{variable}}` references against an optional environment.
///
/// Resolution is a single left-to-right pass over the original text.
/// Substituted values are never rescanned, so a value containing `{{x}}`
/// comes out literally.
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    environment: Option<&'a Environment>,
}

impl<'a> VariableResolver<'a> {
    /// Creates a resolver for the given environment.
    #[must_use]
    pub const fn new(environment: Option<&'a Environment>) -> Self {
        Self { environment }
    }

    /// Returns the environment in use.
    #[must_use]
    pub const fn environment(&self) -> Option<&'a Environment> {
        self.environment
    }

    /// Resolves all variables in the input string, with bookkeeping.
    #[must_use]
    pub fn resolve_detailed(&self, input: &str) -> ResolutionResult {
        let references = parse_variables(input);
        if references.is_empty() {
            return ResolutionResult::no_variables(input);
        }

        let mut resolved_variables = Vec::new();
        let mut unresolved = Vec::new();
        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for var_ref in references {
            result.push_str(&input[last_end..var_ref.span.start]);

            if let Some(value) = self.lookup(&var_ref.name) {
                result.push_str(value);
                resolved_variables.push(ResolvedVariable {
                    name: var_ref.name,
                    value: value.to_string(),
                });
            } else {
                result.push_str(&input[var_ref.span.clone()]);
                unresolved.push(var_ref.name);
            }

            last_end = var_ref.span.end;
        }

        result.push_str(&input[last_end..]);

        ResolutionResult {
            resolved: result,
            resolved_variables,
            unresolved,
        }
    }

    /// Resolves all variables in the input string.
    #[must_use]
    pub fn resolve(&self, input: &str) -> String {
        if self.environment.is_none() {
            return input.to_string();
        }
        self.resolve_detailed(input).resolved
    }

    /// Lists the references in the input that would stay unresolved.
    #[must_use]
    pub fn find_unresolved(&self, input: &str) -> Vec<String> {
        parse_variables(input)
            .into_iter()
            .filter(|r| self.lookup(&r.name).is_none())
            .map(|r| r.name)
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<&'a str> {
        self.environment.and_then(|env| env.resolve(name))
    }
}

/// Resolves `text` against `environment` in one pass.
///
/// With no environment the text is returned unchanged.
#[must_use]
pub fn resolve(text: &str, environment: Option<&Environment>) -> String {
    VariableResolver::new(environment).resolve(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use workbench_domain::Variable;

    fn env() -> Environment {
        Environment::new("Test")
            .with_variable(Variable::new("baseUrl", "http://localhost:3000"))
            .with_variable(Variable::new("id", "42"))
            .with_variable(Variable::disabled("secret", "hidden"))
    }

    #[test]
    fn test_resolve_url() {
        let env = env();
        assert_eq!(
            resolve("{{baseUrl}}/users/{{id}}", Some(&env)),
            "http://localhost:3000/users/42"
        );
    }

    #[test]
    fn test_no_environment_is_identity() {
        assert_eq!(resolve("{{baseUrl}}/users", None), "{{baseUrl}}/users");
    }

    #[test]
    fn test_unknown_and_disabled_stay_verbatim() {
        let env = env();
        let result = VariableResolver::new(Some(&env)).resolve_detailed("{{missing}}-{{secret}}");
        assert_eq!(result.resolved, "{{missing}}-{{secret}}");
        assert_eq!(result.unresolved, vec!["missing", "secret"]);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_single_pass() {
        let env = Environment::new("Nested")
            .with_variable(Variable::new("a", "{{b}}"))
            .with_variable(Variable::new("b", "x"));
        assert_eq!(resolve("{{a}}", Some(&env)), "{{b}}");
    }

    #[test]
    fn test_names_are_matched_exactly() {
        let env = env();
        assert_eq!(resolve("{{ id }}", Some(&env)), "{{ id }}");
        assert_eq!(resolve("{{ID}}", Some(&env)), "{{ID}}");
    }

    #[test]
    fn test_first_enabled_duplicate_wins() {
        let env = Environment::new("Dupes")
            .with_variable(Variable::disabled("host", "off"))
            .with_variable(Variable::new("host", "first"))
            .with_variable(Variable::new("host", "second"));
        assert_eq!(resolve("{{host}}", Some(&env)), "first");
    }

    #[test]
    fn test_resolved_variables_are_reported() {
        let env = env();
        let result = VariableResolver::new(Some(&env)).resolve_detailed("{{id}}");
        assert_eq!(
            result.resolved_variables,
            vec![ResolvedVariable {
                name: "id".to_string(),
                value: "42".to_string(),
            }]
        );
        assert!(result.is_complete());
    }

    #[test]
    fn test_find_unresolved() {
        let env = env();
        let resolver = VariableResolver::new(Some(&env));
        assert_eq!(resolver.find_unresolved("{{id}} {{token}}"), vec!["token"]);
        assert_eq!(
            VariableResolver::new(None).find_unresolved("{{id}}"),
            vec!["id"]
        );
    }
}
