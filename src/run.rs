//! Pass-through execution under the isolated environment.
//!
//! Used by `corm exec`, `corm build` and `corm test`. The child inherits
//! stdin, stdout and stderr.

use crate::error::CormError;
use crate::isolate::EnvironmentOverride;
use std::process::Command;

pub fn run_passthrough(
    program: &str,
    args: &[String],
    env: &EnvironmentOverride,
) -> Result<(), CormError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    env.apply(&mut cmd);

    tracing::debug!(program, ?args, var = env.var(), "running");

    let failed = |reason: String| CormError::CommandFailed {
        command: program.to_string(),
        reason,
    };
    let status = cmd.status().map_err(|e| failed(e.to_string()))?;
    if status.success() {
        Ok(())
    } else {
        Err(failed(status.to_string()))
    }
}

/// Arguments for a tool subcommand such as `go build ./...`.
pub fn tool_args(subcommand: &str, args: &[String]) -> Vec<String> {
    std::iter::once(subcommand.to_string())
        .chain(args.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isolate::{IsolationPolicy, isolate};

    fn env() -> EnvironmentOverride {
        let root = std::env::temp_dir().join("_corm");
        isolate(&root, "CORM_RUN_TEST_ROOT", IsolationPolicy::Exclusive, None).unwrap()
    }

    #[test]
    fn test_tool_args_prefix_subcommand() {
        let args = tool_args("test", &["./...".to_string(), "-v".to_string()]);
        assert_eq!(args, vec!["test", "./...", "-v"]);
    }

    #[test]
    fn test_missing_program_is_command_failure() {
        let err = run_passthrough("corm-definitely-not-a-real-tool", &[], &env()).unwrap_err();
        assert!(matches!(err, CormError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_sees_override() {
        let script = "test \"$CORM_RUN_TEST_ROOT\" = \"$1\"".to_string();
        let expected = env().value().to_string_lossy().into_owned();
        let args = vec!["-c".to_string(), script, "sh".to_string(), expected];
        run_passthrough("sh", &args, &env()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let err = run_passthrough("false", &[], &env()).unwrap_err();
        assert!(err.to_string().starts_with("false failed"));
    }
}
