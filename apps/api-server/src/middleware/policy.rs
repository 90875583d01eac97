//! Static authorization rules, evaluated per request.

/// What a rule demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    PermitAll,
    Authenticated,
}

/// Outcome of evaluating a request against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny,
}

/// A path pattern. A trailing `/**` matches the prefix itself and everything below it.
#[derive(Debug, Clone)]
struct Rule {
    pattern: &'static str,
    requirement: Requirement,
}

impl Rule {
    fn matches(&self, path: &str) -> bool {
        match self.pattern.strip_suffix("/**") {
            Some(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => path == self.pattern,
        }
    }
}

/// Ordered rule table; the first matching rule decides.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<Rule>,
}

impl AccessPolicy {
    /// Public auth endpoints, everything else behind a bearer token.
    pub fn standard() -> Self {
        Self::new()
            .rule("/api/auth/**", Requirement::PermitAll)
            .rule("/**", Requirement::Authenticated)
    }

    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, pattern: &'static str, requirement: Requirement) -> Self {
        self.rules.push(Rule {
            pattern,
            requirement,
        });
        self
    }

    /// Decide whether a request for `path` may proceed. Unmatched paths are denied.
    pub fn evaluate(&self, path: &str, authenticated: bool) -> Decision {
        let requirement = self
            .rules
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.requirement);

        match requirement {
            Some(Requirement::PermitAll) => Decision::Permit,
            Some(Requirement::Authenticated) if authenticated => Decision::Permit,
            _ => Decision::Deny,
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
