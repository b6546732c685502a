//! The external tree-matching tool, behind a capability trait.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use causeway_core::config::TaggerConfig;
use causeway_core::errors::MatcherError;
use causeway_core::PatternType;
use tracing::debug;

/// Captures always requested before the connective captures.
const ARGUMENT_CAPTURES: [&str; 2] = ["cause", "effect"];

/// One pattern to run over one serialized tree file.
#[derive(Debug, Clone, Copy)]
pub struct MatchQuery<'a> {
    pub pattern: &'a str,
    /// Connective capture names to print after cause and effect.
    pub connective_labels: &'a [String],
    pub pattern_type: PatternType,
    /// One bracketed tree per line.
    pub tree_file: &'a Path,
}

/// Runs tree queries and tree rewrites.
///
/// Implementations must be deterministic for a given input: cached output
/// is reused without rerunning the query.
pub trait TreeMatcher: Send + Sync {
    /// Raw matcher output for `query`.
    ///
    /// The output must carry one header line for every tree in
    /// `query.tree_file`, including trees with no match. Empty output is
    /// treated as a failed run and is never cached, so a matcher that
    /// prints nothing for a query without hits reruns it every time.
    fn run_query(&self, query: &MatchQuery<'_>) -> Result<Vec<u8>, MatcherError>;

    /// Apply rewrite scripts, in order, to every tree in `tree_file`.
    /// Returns the rewritten trees, one per line.
    fn rewrite_trees(&self, tree_file: &Path, scripts: &[PathBuf]) -> Result<String, MatcherError>;
}

/// Stanford TRegex / Tsurgeon invoked as subprocesses.
#[derive(Debug, Clone)]
pub struct TregexProcess {
    tregex_dir: PathBuf,
}

impl TregexProcess {
    pub fn new(tregex_dir: impl Into<PathBuf>) -> Self {
        Self {
            tregex_dir: tregex_dir.into(),
        }
    }

    /// Scripts from the configured TRegex directory.
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self::new(config.effective_tregex_dir())
    }

    /// Arguments passed to `tregex.sh` for `query`.
    pub fn query_args(query: &MatchQuery<'_>) -> Vec<String> {
        let mut args: Vec<String> = [query.pattern_type.output_flag(), "-o", "-l", "-N"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let captures = ARGUMENT_CAPTURES
            .iter()
            .map(|s| s.to_string())
            .chain(query.connective_labels.iter().cloned());
        for capture in captures {
            args.push("-h".to_string());
            args.push(capture);
        }
        args.push(query.pattern.to_string());
        args.push(query.tree_file.display().to_string());
        args
    }

    fn run(&self, script: &str, args: &[String]) -> Result<Vec<u8>, MatcherError> {
        let program = self.tregex_dir.join(script);
        let command = program.display().to_string();
        debug!(command = %command, "Running matcher");
        let output = Command::new(&program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| MatcherError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(MatcherError::Failed {
                command,
                status: output.status.to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl TreeMatcher for TregexProcess {
    fn run_query(&self, query: &MatchQuery<'_>) -> Result<Vec<u8>, MatcherError> {
        self.run("tregex.sh", &Self::query_args(query))
    }

    fn rewrite_trees(&self, tree_file: &Path, scripts: &[PathBuf]) -> Result<String, MatcherError> {
        let mut args = vec![
            "-s".to_string(),
            "-treeFile".to_string(),
            tree_file.display().to_string(),
        ];
        args.extend(scripts.iter().map(|s| s.display().to_string()));
        let stdout = self.run("tsurgeon.sh", &args)?;
        String::from_utf8(stdout).map_err(|e| MatcherError::Io {
            message: format!("rewritten trees are not UTF-8: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_arguments_request_all_captures() {
        let labels = vec!["connective_0".to_string(), "connective_1".to_string()];
        let query = MatchQuery {
            pattern: "(A < B)",
            connective_labels: &labels,
            pattern_type: PatternType::Dependency,
            tree_file: Path::new("/tmp/trees"),
        };
        assert_eq!(
            TregexProcess::query_args(&query),
            vec![
                "-u", "-o", "-l", "-N", "-h", "cause", "-h", "effect", "-h", "connective_0", "-h",
                "connective_1", "(A < B)", "/tmp/trees"
            ]
        );
    }

    #[test]
    fn missing_binary_is_a_spawn_failure() {
        let config = TaggerConfig {
            tregex_dir: Some(PathBuf::from("/nonexistent/causeway-tregex")),
            ..TaggerConfig::default()
        };
        let matcher = TregexProcess::from_config(&config);
        let labels = Vec::new();
        let query = MatchQuery {
            pattern: "x",
            connective_labels: &labels,
            pattern_type: PatternType::Constituency,
            tree_file: Path::new("/tmp/none"),
        };
        let err = matcher.run_query(&query).unwrap_err();
        assert!(err.is_fatal());
    }
}
