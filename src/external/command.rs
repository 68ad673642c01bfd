use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::ExternalCycleSource;
use crate::config::ExternalToolConfig;
use crate::constants::external::POLL_INTERVAL;
use crate::core::CycleSource;
use crate::detector::RawCycle;
use crate::error::ExternalToolError;
use crate::paths::PathNormalizer;

/// Runs `<program> <args...> <root>` and parses a JSON array of cycles,
/// each an array of paths relative to `root`, from its stdout.
#[derive(Debug, Clone)]
pub struct ExternalToolCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ExternalToolCommand {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &ExternalToolConfig) -> Self {
        Self::new(
            config.program.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn run(&self, root: &Path) -> Result<String, ExternalToolError> {
        let deadline = Instant::now() + self.timeout;
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExternalToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Drain both pipes off-thread so a chatty child cannot block on a
        // full pipe while we wait for it.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = self.wait_until(&mut child, deadline)?;
        // A grandchild may still hold the pipes open after the child exits,
        // so reading is bounded by the same deadline.
        let stdout = self.collect_output(&stdout, deadline)?;
        let stderr = self.collect_output(&stderr, deadline)?;

        if !status.success() {
            return Err(ExternalToolError::NonZeroExit {
                program: self.program.clone(),
                code: status.code(),
                stderr,
            });
        }

        Ok(stdout)
    }

    fn wait_until(
        &self,
        child: &mut Child,
        deadline: Instant,
    ) -> Result<ExitStatus, ExternalToolError> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.timed_out());
                }
                Ok(None) => thread::sleep(POLL_INTERVAL.min(self.timeout)),
                Err(source) => {
                    let _ = child.kill();
                    return Err(ExternalToolError::Io {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        }
    }

    /// Wait for a reader until `deadline`. A reader that misses it is left
    /// detached.
    fn collect_output(
        &self,
        reader: &Receiver<std::io::Result<String>>,
        deadline: Instant,
    ) -> Result<String, ExternalToolError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match reader.recv_timeout(remaining) {
            Ok(output) => output.map_err(|source| ExternalToolError::Io {
                program: self.program.clone(),
                source,
            }),
            Err(RecvTimeoutError::Timeout) => Err(self.timed_out()),
            Err(RecvTimeoutError::Disconnected) => Err(ExternalToolError::Io {
                program: self.program.clone(),
                source: std::io::Error::other("output reader panicked"),
            }),
        }
    }

    fn timed_out(&self) -> ExternalToolError {
        ExternalToolError::Timeout {
            program: self.program.clone(),
            timeout: self.timeout,
        }
    }

    fn parse(
        &self,
        output: &str,
        root: &Path,
        normalizer: &dyn PathNormalizer,
    ) -> Result<Vec<RawCycle>, ExternalToolError> {
        let reported: Vec<Vec<String>> =
            serde_json::from_str(output.trim()).map_err(|source| {
                ExternalToolError::MalformedOutput {
                    program: self.program.clone(),
                    source,
                }
            })?;

        let cycles: Vec<RawCycle> = reported
            .into_iter()
            .map(|paths| {
                let nodes = paths
                    .iter()
                    .map(|path| normalizer.normalize(&root.join(path).to_string_lossy()))
                    .collect();
                RawCycle::new(nodes, CycleSource::ExternalTool)
            })
            .filter(|cycle| cycle.len() >= 2)
            .collect();

        Ok(cycles)
    }
}

impl ExternalCycleSource for ExternalToolCommand {
    fn name(&self) -> &str {
        &self.program
    }

    fn find_cycles(
        &self,
        root: &Path,
        normalizer: &dyn PathNormalizer,
    ) -> Result<Vec<RawCycle>, ExternalToolError> {
        debug!(program = %self.program, root = %root.display(), "running external cycle detector");
        let output = self.run(root)?;
        self.parse(&output, root, normalizer)
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<std::io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buffer = String::new();
        let result = match pipe {
            Some(mut pipe) => pipe.read_to_string(&mut buffer).map(|_| buffer),
            None => Ok(buffer),
        };
        // The receiver is gone once the deadline has passed
        let _ = tx.send(result);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::LexicalNormalizer;

    fn normalizer() -> LexicalNormalizer {
        LexicalNormalizer::new(Path::new("/"))
    }

    #[test]
    fn test_parse_relative_paths() {
        let tool = ExternalToolCommand::new("madge", vec![], Duration::from_secs(1));
        let cycles = tool
            .parse(
                r#"[["a.ts", "lib/b.ts"], ["x.ts", "y.ts", "z.ts"]]"#,
                Path::new("/repo"),
                &normalizer(),
            )
            .unwrap();

        assert_eq!(cycles.len(), 2);
        assert_eq!(
            cycles[0].nodes(),
            &["/repo/a.ts", "/repo/lib/b.ts", "/repo/a.ts"]
        );
        assert_eq!(cycles[1].len(), 3);
        assert!(cycles.iter().all(|c| c.source() == CycleSource::ExternalTool));
    }

    #[test]
    fn test_parse_drops_degenerate_cycles() {
        let tool = ExternalToolCommand::new("madge", vec![], Duration::from_secs(1));
        let cycles = tool
            .parse(r#"[["a.ts"], []]"#, Path::new("/repo"), &normalizer())
            .unwrap();
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_output() {
        let tool = ExternalToolCommand::new("madge", vec![], Duration::from_secs(1));
        let err = tool
            .parse("Processed 12 files", Path::new("/repo"), &normalizer())
            .unwrap_err();
        assert!(matches!(err, ExternalToolError::MalformedOutput { .. }));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let tool = ExternalToolCommand::new(
            "cycle-radar-definitely-missing-tool",
            vec![],
            Duration::from_secs(1),
        );
        let err = tool.find_cycles(Path::new("/"), &normalizer()).unwrap_err();
        assert!(matches!(err, ExternalToolError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_reads_cycles_from_stdout() {
        let tool = ExternalToolCommand::new(
            "sh",
            vec!["-c".into(), r#"echo '[["a.ts","b.ts"]]'"#.into()],
            Duration::from_secs(10),
        );
        let cycles = tool.find_cycles(Path::new("/repo"), &normalizer()).unwrap();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].nodes(), &["/repo/a.ts", "/repo/b.ts", "/repo/a.ts"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let tool = ExternalToolCommand::new(
            "sh",
            vec!["-c".into(), "echo boom >&2; exit 3".into()],
            Duration::from_secs(10),
        );
        let err = tool.find_cycles(Path::new("/repo"), &normalizer()).unwrap_err();
        match err {
            ExternalToolError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("Expected NonZeroExit, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_the_child() {
        let tool = ExternalToolCommand::new(
            "sh",
            vec!["-c".into(), "sleep 30".into()],
            Duration::from_millis(200),
        );
        let started = Instant::now();
        let err = tool.find_cycles(Path::new("/repo"), &normalizer()).unwrap_err();

        assert!(matches!(err, ExternalToolError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_covers_output_held_open_by_grandchild() {
        // The shell exits at once but the backgrounded sleep keeps stdout open
        let tool = ExternalToolCommand::new(
            "sh",
            vec!["-c".into(), "sleep 8 & echo '[]'".into()],
            Duration::from_millis(500),
        );
        let started = Instant::now();
        let err = tool.find_cycles(Path::new("/repo"), &normalizer()).unwrap_err();

        assert!(matches!(err, ExternalToolError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
