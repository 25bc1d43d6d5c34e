//! Isolated environment for the external fetch tool.
//!
//! The fetch tool resolves its package root from an environment variable
//! (`GOPATH` by default). An [`EnvironmentOverride`] points that variable at
//! the project's staging root. It is applied to each spawned [`Command`] and
//! never written into this process's own environment.

use crate::error::CormError;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationPolicy {
    /// Root variable is the staging root only. Packages already present in
    /// the global root are fetched again into staging.
    #[default]
    Exclusive,
    /// Staging root first, then the previous value. New fetches land in the
    /// staging root; already-global packages resolve from the global root.
    Prepend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentOverride {
    var: String,
    value: OsString,
}

impl EnvironmentOverride {
    pub fn var(&self) -> &str {
        &self.var
    }

    pub fn value(&self) -> &OsStr {
        &self.value
    }

    /// Scope the override to one subprocess.
    pub fn apply<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env(&self.var, &self.value)
    }
}

/// Build the override for `staging_root`.
///
/// `prior` is the current value of `root_var`, only consulted by
/// [`IsolationPolicy::Prepend`].
pub fn isolate(
    staging_root: &Path,
    root_var: &str,
    policy: IsolationPolicy,
    prior: Option<OsString>,
) -> Result<EnvironmentOverride, CormError> {
    let fail = |reason: String| CormError::EnvironmentIsolationFailed {
        var: root_var.to_string(),
        reason,
    };

    if root_var.is_empty() || root_var.contains('=') {
        return Err(fail(format!("invalid variable name {root_var:?}")));
    }
    if !staging_root.is_absolute() {
        return Err(fail(format!(
            "staging root {} is not absolute",
            staging_root.display()
        )));
    }

    let value = match policy {
        IsolationPolicy::Exclusive => staging_root.as_os_str().to_os_string(),
        IsolationPolicy::Prepend => {
            let mut entries: Vec<PathBuf> = vec![staging_root.to_path_buf()];
            if let Some(prior) = prior.as_deref() {
                entries.extend(std::env::split_paths(prior).filter(|p| !p.as_os_str().is_empty()));
            }
            std::env::join_paths(entries).map_err(|e| fail(e.to_string()))?
        }
    };

    tracing::debug!(var = root_var, value = ?value, ?policy, "isolated fetch environment");
    Ok(EnvironmentOverride {
        var: root_var.to_string(),
        value,
    })
}

/// [`isolate`] with `prior` taken from the current process environment.
pub fn isolate_from_env(
    staging_root: &Path,
    root_var: &str,
    policy: IsolationPolicy,
) -> Result<EnvironmentOverride, CormError> {
    isolate(staging_root, root_var, policy, std::env::var_os(root_var))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staging() -> PathBuf {
        std::env::temp_dir().join("proj").join("_corm")
    }

    #[test]
    fn test_exclusive_discards_prior() {
        let env = isolate(
            &staging(),
            "GOPATH",
            IsolationPolicy::Exclusive,
            Some(OsString::from("/home/me/go")),
        )
        .unwrap();
        assert_eq!(env.var(), "GOPATH");
        assert_eq!(env.value(), staging().as_os_str());
    }

    #[test]
    fn test_prepend_keeps_prior_after_staging() {
        let prior = std::env::join_paths(["/home/me/go", "/opt/go"]).unwrap();
        let env = isolate(&staging(), "GOPATH", IsolationPolicy::Prepend, Some(prior)).unwrap();
        let entries: Vec<PathBuf> = std::env::split_paths(env.value()).collect();
        assert_eq!(
            entries,
            vec![
                staging(),
                PathBuf::from("/home/me/go"),
                PathBuf::from("/opt/go")
            ]
        );
    }

    #[test]
    fn test_prepend_without_prior_is_staging_only() {
        let env = isolate(&staging(), "GOPATH", IsolationPolicy::Prepend, None).unwrap();
        assert_eq!(env.value(), staging().as_os_str());
    }

    #[test]
    fn test_relative_staging_root_fails() {
        let err = isolate(
            Path::new("_corm"),
            "GOPATH",
            IsolationPolicy::Exclusive,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CormError::EnvironmentIsolationFailed { .. }));
    }

    #[test]
    fn test_bad_variable_name_fails() {
        let err = isolate(&staging(), "GO=PATH", IsolationPolicy::Exclusive, None).unwrap_err();
        assert!(matches!(err, CormError::EnvironmentIsolationFailed { .. }));
    }

    #[test]
    fn test_apply_does_not_touch_process_env() {
        let var = "CORM_ISOLATE_TEST_ROOT";
        let env = isolate(&staging(), var, IsolationPolicy::Exclusive, None).unwrap();
        let mut cmd = Command::new("true");
        env.apply(&mut cmd);

        let applied: Vec<_> = cmd.get_envs().collect();
        assert_eq!(applied, vec![(OsStr::new(var), Some(staging().as_os_str()))]);
        assert!(std::env::var_os(var).is_none());
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            isolation: IsolationPolicy,
        }
        let w: Wrap = toml::from_str("isolation = \"prepend\"").unwrap();
        assert_eq!(w.isolation, IsolationPolicy::Prepend);
    }
}
