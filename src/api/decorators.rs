//! Decorators wrapped around the product routes.
//!
//! Decorators are named cross-cutting layers. The effective list for the
//! product client is computed from four configured lists:
//!
//! ```text
//! effective = (default - excludes) + global + local
//! ```
//!
//! `default` holds the common decorators shared by all JSON API clients,
//! `excludes` removes some of them from the product client, and `global` and
//! `local` add further decorators to it. Duplicates are dropped, keeping the
//! first occurrence. The first decorator of the list wraps the routes
//! directly, the last one is outermost.

use anyhow::{Result, bail};
use axum::{Router, middleware};
use std::fmt;
use std::str::FromStr;

use crate::api::middleware::{access_log, rate_limit, tracing};
use crate::api::middleware::rate_limit::RateLimit;

/// A known decorator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decorator {
    /// HTTP tracing span per request.
    Trace,
    /// Combined-log-format access line per request.
    AccessLog,
    /// Per-IP token bucket.
    RateLimit,
}

impl Decorator {
    pub fn name(&self) -> &'static str {
        match self {
            Decorator::Trace => "trace",
            Decorator::AccessLog => "accesslog",
            Decorator::RateLimit => "ratelimit",
        }
    }
}

impl fmt::Display for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Decorator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Decorator::Trace),
            "accesslog" => Ok(Decorator::AccessLog),
            "ratelimit" => Ok(Decorator::RateLimit),
            other => bail!("Unknown decorator '{other}' (known: trace, accesslog, ratelimit)"),
        }
    }
}

/// Configured decorator name lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoratorConfig {
    pub default: Vec<String>,
    pub excludes: Vec<String>,
    pub global: Vec<String>,
    pub local: Vec<String>,
}

impl DecoratorConfig {
    /// Computes the effective decorator list.
    ///
    /// # Errors
    ///
    /// Returns an error if a list contains an unknown decorator name.
    pub fn resolve(&self) -> Result<Vec<Decorator>> {
        let excludes = parse_all(&self.excludes)?;

        let mut resolved: Vec<Decorator> = Vec::new();
        let common = parse_all(&self.default)?
            .into_iter()
            .filter(|d| !excludes.contains(d));
        let extra = parse_all(&self.global)?
            .into_iter()
            .chain(parse_all(&self.local)?);

        for decorator in common.chain(extra) {
            if !resolved.contains(&decorator) {
                resolved.push(decorator);
            }
        }

        Ok(resolved)
    }
}

fn parse_all(names: &[String]) -> Result<Vec<Decorator>> {
    names.iter().map(|n| n.trim().parse()).collect()
}

/// Wraps `router` with the given decorators.
///
/// # Errors
///
/// Returns an error if the rate limiter cannot be built from `limit`.
pub fn apply<S>(mut router: Router<S>, decorators: &[Decorator], limit: RateLimit) -> Result<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    for decorator in decorators {
        router = match decorator {
            Decorator::Trace => router.layer(tracing::layer()),
            Decorator::AccessLog => router.layer(middleware::from_fn(access_log::layer)),
            Decorator::RateLimit => router.layer(rate_limit::layer(limit)?),
        };
        ::tracing::debug!(decorator = %decorator, "Decorator applied");
    }

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_default_only() {
        let config = DecoratorConfig {
            default: names(&["trace"]),
            ..Default::default()
        };

        assert_eq!(config.resolve().unwrap(), vec![Decorator::Trace]);
    }

    #[test]
    fn test_resolve_excludes_then_adds() {
        let config = DecoratorConfig {
            default: names(&["trace", "accesslog"]),
            excludes: names(&["trace"]),
            global: names(&["ratelimit"]),
            local: names(&["trace", "accesslog"]),
        };

        assert_eq!(
            config.resolve().unwrap(),
            vec![Decorator::AccessLog, Decorator::RateLimit, Decorator::Trace]
        );
    }

    #[test]
    fn test_resolve_unknown_name() {
        let config = DecoratorConfig {
            local: names(&["decorator1"]),
            ..Default::default()
        };

        let err = config.resolve().unwrap_err();
        assert!(err.to_string().contains("decorator1"));
    }

    #[test]
    fn test_decorator_names_are_case_insensitive() {
        assert_eq!("AccessLog".parse::<Decorator>().unwrap(), Decorator::AccessLog);
        assert_eq!(Decorator::RateLimit.to_string(), "ratelimit");
    }
}
