use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Copy programs tried in order when none is configured.
const CANDIDATES: &[&[&str]] = &[
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["pbcopy"],
];

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard program found (install wl-copy, xclip, xsel or pbcopy)")]
    NoProgram,

    #[error("{program} failed: {source}")]
    Spawn {
        program: String,
        #[source]
        source:  std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Status {
        program: String,
        status:  std::process::ExitStatus,
    },
}

/// Pipe `text` into a copy program's stdin and wait for it.
fn pipe_to(argv: &[String], text: &str) -> Result<(), ClipboardError> {
    let (program, args) = argv.split_first().ok_or(ClipboardError::NoProgram)?;
    let spawn_err = |source| ClipboardError::Spawn { program: program.clone(), source };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(spawn_err)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).map_err(spawn_err)?;
    }
    let status = child.wait().map_err(spawn_err)?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::Status { program: program.clone(), status })
    }
}

/// Copy `text` with the configured program, or the first candidate that runs.
pub fn copy(text: &str, configured: &[String]) -> Result<(), ClipboardError> {
    if !configured.is_empty() {
        let res = pipe_to(configured, text);
        match &res {
            Ok(())  => tracing::debug!(program = %configured[0], bytes = text.len(), "copied"),
            Err(e)  => tracing::warn!(error = %e, "clipboard copy failed"),
        }
        return res;
    }

    for candidate in CANDIDATES {
        let argv: Vec<String> = candidate.iter().map(|s| s.to_string()).collect();
        match pipe_to(&argv, text) {
            Ok(()) => {
                tracing::debug!(program = candidate[0], bytes = text.len(), "copied");
                return Ok(());
            }
            Err(ClipboardError::Spawn { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => tracing::debug!(error = %e, "clipboard candidate failed"),
        }
    }
    tracing::warn!("no working clipboard program");
    Err(ClipboardError::NoProgram)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_is_no_program() {
        assert!(matches!(pipe_to(&[], "x"), Err(ClipboardError::NoProgram)));
    }

    #[test]
    fn missing_configured_program_is_spawn_error() {
        let argv = vec!["zplan-no-such-copy-tool".to_string()];
        match copy("x", &argv) {
            Err(ClipboardError::Spawn { program, .. }) => assert_eq!(program, "zplan-no-such-copy-tool"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn configured_program_receives_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("clip.txt");
        let argv = vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("cat > '{}'", out.display()),
        ];
        copy("zpool create tank", &argv).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "zpool create tank");
    }

    #[test]
    fn failing_program_reports_status() {
        let argv = vec!["sh".to_string(), "-c".to_string(), "cat >/dev/null; exit 3".to_string()];
        assert!(matches!(copy("x", &argv), Err(ClipboardError::Status { .. })));
    }
}
