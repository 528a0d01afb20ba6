use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub global: GlobalConfig,
}

impl Config {
    /// Load a job file from YAML
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();

        let contents = fs::read_to_string(path_ref)
            .map_err(|e| format!("Failed to read config file '{}': {}", path_ref.display(), e))?;

        let config: Config = serde_yaml::from_str(&contents).map_err(|e| {
            format!(
                "Failed to parse config file '{}': {}",
                path_ref.display(),
                e
            )
        })?;

        Ok(config)
    }

    /// A config holding the single job described on the command line.
    pub fn single(job: Job) -> Self {
        Self {
            jobs: vec![job],
            global: GlobalConfig::default(),
        }
    }

    /// Check every job and return their targets, in job order.
    pub fn validate(&self) -> Result<Vec<Target<'_>>, String> {
        if self.jobs.is_empty() {
            return Err("Config must have at least one job".to_string());
        }

        self.jobs
            .iter()
            .enumerate()
            .map(|(idx, job)| job.validate().map_err(|e| format!("Job {}: {}", idx, e)))
            .collect()
    }

    pub fn effective_fail_on_invalid(&self, job: &Job) -> bool {
        job.fail_on_invalid.unwrap_or(self.global.fail_on_invalid)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Job {
    pub schema: PathBuf,
    pub dir: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub fail_on_invalid: Option<bool>,
}

/// What a job validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Dir(&'a Path),
    File(&'a Path),
}

impl Job {
    fn validate(&self) -> Result<Target<'_>, String> {
        if self.schema.as_os_str().is_empty() {
            return Err("schema cannot be empty".to_string());
        }

        self.target()
    }

    pub fn target(&self) -> Result<Target<'_>, String> {
        match (&self.dir, &self.file) {
            (Some(dir), None) => Ok(Target::Dir(dir)),
            (None, Some(file)) => Ok(Target::File(file)),
            (Some(_), Some(_)) => Err("dir and file are mutually exclusive".to_string()),
            (None, None) => Err("one of dir or file is required".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    #[serde(default = "default_true")]
    pub fail_on_invalid: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            fail_on_invalid: true,
        }
    }
}

fn default_true() -> bool {
    true
}
