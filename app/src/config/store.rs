//! Todo store selection

use framework::config::env_optional;
use std::fmt;
use std::str::FromStr;

/// Which `TodoStore` adapter backs the application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreDriver {
    /// SeaORM entities and active models
    #[default]
    Orm,
    /// Hand-written SQL statements
    Sql,
}

impl FromStr for StoreDriver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orm" | "entity" => Ok(Self::Orm),
            "sql" | "raw" => Ok(Self::Sql),
            other => Err(format!(
                "unknown TODO_STORE '{}', expected 'orm' or 'sql'",
                other
            )),
        }
    }
}

impl fmt::Display for StoreDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orm => f.write_str("orm"),
            Self::Sql => f.write_str("sql"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub driver: StoreDriver,
}

impl StoreConfig {
    /// Read `TODO_STORE`; unknown values fall back to the ORM adapter
    pub fn from_env() -> Self {
        let driver = match env_optional::<String>("TODO_STORE") {
            Some(name) => name.parse().unwrap_or_else(|err: String| {
                tracing::warn!("{}, using orm", err);
                StoreDriver::default()
            }),
            None => StoreDriver::default(),
        };
        Self { driver }
    }
}
