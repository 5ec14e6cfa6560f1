//! Interpreter configuration.

/// What `Scope::bind` does when the name is already bound in the same frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedefinitionPolicy {
    /// Replace the existing local binding.
    #[default]
    Shadow,
    /// Fail with a "cannot redefine" error.
    Forbid,
}

impl RedefinitionPolicy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "shadow" => Some(Self::Shadow),
            "forbid" => Some(Self::Forbid),
            _ => None,
        }
    }
}

/// Settings fixed at context construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextConfig {
    /// Policy inherited by every scope created from the context.
    pub redefinition: RedefinitionPolicy,
    /// Maximum nesting of procedure calls before evaluation fails.
    pub max_call_depth: usize,
}

impl ContextConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

    /// Environment variable overriding `max_call_depth`.
    pub const MAX_CALL_DEPTH_VAR: &'static str = "VESPER_MAX_CALL_DEPTH";
    /// Environment variable overriding `redefinition` (`shadow` or `forbid`).
    pub const REDEFINITION_VAR: &'static str = "VESPER_REDEFINITION";

    /// Defaults, overridden by `VESPER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for the `VESPER_*`
    /// keys. Unparseable values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::MAX_CALL_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", Self::MAX_CALL_DEPTH_VAR),
            }
        }

        if let Some(raw) = lookup(Self::REDEFINITION_VAR) {
            match RedefinitionPolicy::parse(&raw) {
                Some(policy) => config.redefinition = policy,
                None => tracing::warn!(value = %raw, "ignoring invalid {}", Self::REDEFINITION_VAR),
            }
        }

        config
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            redefinition: RedefinitionPolicy::default(),
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
