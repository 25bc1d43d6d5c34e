//! Fetch driver.
//!
//! Runs the external fetch tool once per manifest reference inside the
//! isolated environment. One failing reference never stops the batch.

use crate::config::ToolConfig;
use crate::error::CormError;
use crate::isolate::EnvironmentOverride;
use crate::manifest::PackageReference;
use colored::*;
use std::process::Command;

pub trait Fetcher {
    fn fetch(
        &mut self,
        reference: &PackageReference,
        env: &EnvironmentOverride,
    ) -> Result<(), CormError>;
}

/// Spawns `<program> <fetch_args...> <path>` with inherited stdio.
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: String,
    args: Vec<String>,
}

impl CommandFetcher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(tool: &ToolConfig) -> Self {
        Self::new(tool.program.clone(), tool.fetch_args.clone())
    }

    fn command_line(&self, path: &str) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.args.iter().map(String::as_str));
        parts.push(path);
        parts.join(" ")
    }
}

impl Fetcher for CommandFetcher {
    fn fetch(
        &mut self,
        reference: &PackageReference,
        env: &EnvironmentOverride,
    ) -> Result<(), CormError> {
        println!("{}", self.command_line(&reference.path));

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(&reference.path);
        env.apply(&mut cmd);

        let failed = |reason: String| CormError::FetchFailed {
            path: reference.path.clone(),
            reason,
        };
        let status = cmd.status().map_err(|e| failed(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(failed(status.to_string()))
        }
    }
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub reference: PackageReference,
    pub error: Option<String>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct FetchReport {
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }
}

/// Fetch every reference in order, recording each outcome.
pub fn fetch_all<F: Fetcher>(
    refs: &[PackageReference],
    fetcher: &mut F,
    env: &EnvironmentOverride,
) -> FetchReport {
    let mut report = FetchReport::default();

    for reference in refs {
        if let Some(pin) = &reference.pin {
            eprintln!(
                "{} {}: pin '{}' is recorded but not applied, fetching latest",
                "!".yellow(),
                reference.path,
                pin
            );
        }

        let error = match fetcher.fetch(reference, env) {
            Ok(()) => None,
            Err(e) => {
                eprintln!("{} {}", "x".red(), e);
                Some(e.to_string())
            }
        };
        tracing::debug!(path = %reference.path, ok = error.is_none(), "fetch finished");

        report.outcomes.push(FetchOutcome {
            reference: reference.clone(),
            error,
        });
    }

    report
}
