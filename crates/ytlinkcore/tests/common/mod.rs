//! Shared fixtures for ytlinkcore integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ytlinkcore::core::process::CommandOutput;
use ytlinkcore::{AppError, Config, FetchTool};

/// Builds a config whose download directory is `dir`
pub fn test_config(dir: &Path, domain: &str) -> Arc<Config> {
    test_config_with(dir, domain, &[])
}

pub fn test_config_with(dir: &Path, domain: &str, extra: &[(&str, &str)]) -> Arc<Config> {
    let mut env: HashMap<String, String> = HashMap::new();
    env.insert("DOWNLOAD_DOMAIN".into(), domain.into());
    env.insert("DOWNLOAD_PATH".into(), dir.to_string_lossy().into_owned());
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }
    Arc::new(Config::from_lookup(|key| env.get(key).cloned()).expect("valid test config"))
}

/// Scripted stand-in for yt-dlp.
///
/// The dry-run prints `dry_run_name` (joined onto the download dir) and the
/// real fetch writes `writes` into the download dir before exiting with
/// `fetch_code`.
pub struct StubTool {
    pub dir: PathBuf,
    pub dry_run_code: i32,
    pub dry_run_name: String,
    pub fetch_code: i32,
    pub writes: Vec<(String, usize)>,
    pub calls: Mutex<Vec<Vec<String>>>,
    pub dry_runs: AtomicUsize,
    pub fetches: AtomicUsize,
}

impl StubTool {
    pub fn new(dir: &Path, dry_run_name: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            dry_run_code: 0,
            dry_run_name: dry_run_name.to_string(),
            fetch_code: 0,
            writes: Vec::new(),
            calls: Mutex::new(Vec::new()),
            dry_runs: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn writing(mut self, name: &str, size: usize) -> Self {
        self.writes.push((name.to_string(), size));
        self
    }

    pub fn failing_dry_run(mut self, code: i32) -> Self {
        self.dry_run_code = code;
        self
    }

    pub fn failing_fetch(mut self, code: i32) -> Self {
        self.fetch_code = code;
        self
    }

    pub fn dry_run_count(&self) -> usize {
        self.dry_runs.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FetchTool for StubTool {
    fn name(&self) -> &str {
        "stub-yt-dlp"
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, AppError> {
        self.calls.lock().unwrap().push(args.to_vec());

        if args.iter().any(|a| a == "--get-filename") {
            self.dry_runs.fetch_add(1, Ordering::SeqCst);
            let stdout = if self.dry_run_name.is_empty() {
                String::new()
            } else {
                self.dir.join(&self.dry_run_name).to_string_lossy().into_owned()
            };
            return Ok(CommandOutput {
                code: Some(self.dry_run_code),
                stdout,
                stderr: if self.dry_run_code == 0 {
                    String::new()
                } else {
                    "ERROR: Unsupported URL: not-a-url".into()
                },
            });
        }

        self.fetches.fetch_add(1, Ordering::SeqCst);
        for (name, size) in &self.writes {
            std::fs::write(self.dir.join(name), vec![0u8; *size])?;
        }
        Ok(CommandOutput {
            code: Some(self.fetch_code),
            stdout: String::new(),
            stderr: if self.fetch_code == 0 {
                String::new()
            } else {
                "ERROR: [youtube] abc: Video unavailable".into()
            },
        })
    }
}
