use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Process-wide config store, one instance per type
static CONFIG_REPOSITORY: OnceLock<RwLock<ConfigRepository>> = OnceLock::new();

/// Typed configuration structs keyed by `TypeId`
#[derive(Default)]
pub struct ConfigRepository {
    configs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the config of type `T`
    pub fn register<T: Any + Send + Sync + 'static>(&mut self, config: T) {
        self.configs.insert(TypeId::of::<T>(), Box::new(config));
    }

    pub fn get<T: Any + Send + Sync + Clone + 'static>(&self) -> Option<T> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .cloned()
    }

    pub fn has<T: Any + 'static>(&self) -> bool {
        self.configs.contains_key(&TypeId::of::<T>())
    }
}

fn repository() -> &'static RwLock<ConfigRepository> {
    CONFIG_REPOSITORY.get_or_init(|| RwLock::new(ConfigRepository::new()))
}

pub fn register<T: Any + Send + Sync + 'static>(config: T) {
    if let Ok(mut repo) = repository().write() {
        repo.register(config);
    }
}

pub fn get<T: Any + Send + Sync + Clone + 'static>() -> Option<T> {
    CONFIG_REPOSITORY.get()?.read().ok()?.get::<T>()
}

pub fn has<T: Any + 'static>() -> bool {
    CONFIG_REPOSITORY
        .get()
        .and_then(|repo| repo.read().ok())
        .map(|repo| repo.has::<T>())
        .unwrap_or(false)
}
