use std::path::{Path, PathBuf};

/// Deployment environment, selected by `APP_ENV`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect environment from APP_ENV or default to Local
    pub fn detect() -> Self {
        Self::from_name(std::env::var("APP_ENV").ok().as_deref())
    }

    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") => Self::Development,
            Some("testing") => Self::Testing,
            Some("local") | Some("") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Suffix used for `.env.{suffix}` files
    pub fn env_file_suffix(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Custom(name) => name.as_str(),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Local or development
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_file_suffix())
    }
}

/// Outcome of `.env` loading, kept until logging is ready
#[derive(Debug)]
pub struct DotenvReport {
    pub environment: Environment,
    pub loaded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl DotenvReport {
    /// Emit what was loaded; call after the subscriber is installed
    pub fn log(&self) {
        for path in &self.loaded {
            tracing::debug!(file = %path.display(), "loaded env file");
        }
        for (path, error) in &self.failed {
            tracing::warn!(file = %path.display(), error = %error, "failed to read env file");
        }
    }
}

/// Load environment variables from .env files with proper precedence
///
/// Precedence (later entries win):
/// 1. .env
/// 2. .env.local
/// 3. .env.{environment}
/// 4. .env.{environment}.local
/// 5. Variables already set in the process environment
pub fn load_dotenv(project_root: &Path) -> DotenvReport {
    load_env_files(project_root, Environment::detect())
}

fn load_env_files(project_root: &Path, environment: Environment) -> DotenvReport {
    let suffix = environment.env_file_suffix();

    // dotenvy never overwrites a variable that is already set, so the most
    // specific file is loaded first.
    let mut files = vec![
        format!(".env.{}.local", suffix),
        format!(".env.{}", suffix),
        ".env.local".to_string(),
        ".env".to_string(),
    ];
    files.dedup();

    let mut report = DotenvReport {
        environment,
        loaded: Vec::new(),
        failed: Vec::new(),
    };

    for file in files {
        let path = project_root.join(file);
        match dotenvy::from_path(&path) {
            Ok(()) => report.loaded.push(path),
            Err(err) if err.not_found() => {}
            Err(err) => report.failed.push((path, err.to_string())),
        }
    }

    report
}

/// Get an environment variable with a default value
///
/// Unset or unparsable values fall back to `default`.
///
/// ```rust,ignore
/// let port: u16 = env("SERVER_PORT", 3000);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Get an optional environment variable
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
