use log::{debug, info};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} not found on PATH")]
    NotFound(&'static str),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("{program} produced non-UTF-8 output")]
    InvalidOutput { program: String },
}

/// 启动时探测到的可选外部命令
#[derive(Debug, Clone)]
pub struct ExternalTools {
    pub docker: Option<PathBuf>,
    pub sensors: Option<PathBuf>,
    pub stress_ng: Option<PathBuf>,
    /// 单次外部命令调用的超时时间
    pub timeout: Duration,
}

impl ExternalTools {
    pub fn discover(timeout: Duration) -> Self {
        let tools = Self {
            docker: find_executable("docker"),
            sensors: find_executable("sensors"),
            stress_ng: find_executable("stress-ng"),
            timeout,
        };

        for (name, path) in [
            ("docker", &tools.docker),
            ("sensors", &tools.sensors),
            ("stress-ng", &tools.stress_ng),
        ] {
            match path {
                Some(p) => info!("✓ Found {} at {}", name, p.display()),
                None => info!("✗ {} not found on PATH, related endpoints will degrade", name),
            }
        }

        tools
    }

    /// 不依赖任何外部命令
    pub fn none(timeout: Duration) -> Self {
        Self {
            docker: None,
            sensors: None,
            stress_ng: None,
            timeout,
        }
    }
}

/// 在 PATH 中查找可执行文件
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    find_executable_in(name, &paths)
}

pub fn find_executable_in(name: &str, paths: &OsStr) -> Option<PathBuf> {
    env::split_paths(paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// 运行外部命令并返回 stdout
///
/// 超时后子进程会被杀掉（`kill_on_drop`）。
pub async fn run_tool(program: &Path, args: &[&str], timeout: Duration) -> Result<String, ToolError> {
    let name = program.display().to_string();

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ToolError::Spawn {
            program: name.clone(),
            source,
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| ToolError::Spawn {
            program: name.clone(),
            source,
        })?,
        Err(_) => {
            debug!("{} did not finish within {:?}, killed", name, timeout);
            return Err(ToolError::Timeout {
                program: name,
                timeout,
            });
        }
    };

    if !output.status.success() {
        return Err(ToolError::Failed {
            program: name,
            status: output.status,
        });
    }

    String::from_utf8(output.stdout).map_err(|_| ToolError::InvalidOutput { program: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn test_find_executable_in_skips_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = env::join_paths([dir.path().join("nope"), PathBuf::from("/bin"), PathBuf::from("/usr/bin")])
            .unwrap();

        let found = find_executable_in("sh", &paths);
        assert!(found.is_some());
        assert!(find_executable_in("definitely-not-a-real-binary", &paths).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("docker"), "#!/bin/sh\n").unwrap();

        let paths = OsString::from(dir.path());
        assert!(find_executable_in("docker", &paths).is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_tool_reports_failures() {
        let sh = find_executable("sh").expect("sh on PATH");

        let out = run_tool(&sh, &["-c", "echo hello"], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.trim(), "hello");

        let err = run_tool(&sh, &["-c", "exit 3"], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Failed { .. }));

        let err = run_tool(&sh, &["-c", "sleep 5"], Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
    }
}
