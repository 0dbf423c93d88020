//! `cgshare policy` — emit score and share directives for a demand batch.

use cgshare_common::config::CgshareConfig;
use cgshare_policy::{PolicyConfig, PolicyEngine};
use clap::Args;

/// Arguments for the `policy` command.
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// Total CPU share budget.
    #[arg(long, env = "CGSHARE_VIRTUAL_CAPACITY")]
    pub virtual_capacity: Option<u64>,

    /// Highest requested share still counted as elastic.
    #[arg(long, env = "CGSHARE_ELASTIC_THRESHOLD")]
    pub elastic_threshold: Option<u64>,

    /// Subsystem segment written into `set_limit` directives.
    #[arg(long, env = "CGSHARE_SUBSYSTEM")]
    pub subsystem: Option<String>,
}

impl PolicyArgs {
    /// Merges these flags over the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting subsystem is not a single path
    /// segment.
    pub fn policy_config(&self, base: &CgshareConfig) -> anyhow::Result<PolicyConfig> {
        let mut merged = base.clone();
        if let Some(capacity) = self.virtual_capacity {
            merged.virtual_capacity = capacity;
        }
        if let Some(threshold) = self.elastic_threshold {
            merged.elastic_threshold = threshold;
        }
        if let Some(ref subsystem) = self.subsystem {
            merged.subsystem.clone_from(subsystem);
        }
        merged.validate()?;
        Ok(PolicyConfig::from(&merged))
    }
}

/// Executes the `policy` command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or stdin/stdout fail.
pub fn execute(args: &PolicyArgs, config: &CgshareConfig) -> anyhow::Result<()> {
    let engine = PolicyEngine::new(args.policy_config(config)?);
    let _ = engine.run(std::io::stdin().lock(), std::io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let base = CgshareConfig {
            virtual_capacity: 3000,
            elastic_threshold: 10,
            ..CgshareConfig::default()
        };
        let args = PolicyArgs {
            elastic_threshold: Some(75),
            ..PolicyArgs::default()
        };
        let config = args.policy_config(&base).expect("should merge");
        assert_eq!(config.virtual_capacity, 3000);
        assert_eq!(config.elastic_threshold, 75);
        assert_eq!(config.subsystem, "cpu");
    }

    #[test]
    fn unsafe_subsystem_is_rejected() {
        let args = PolicyArgs {
            subsystem: Some("a/b".into()),
            ..PolicyArgs::default()
        };
        assert!(args.policy_config(&CgshareConfig::default()).is_err());
    }
}
