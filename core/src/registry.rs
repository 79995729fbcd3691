//! Process-wide tables shared by every loader: the tile dictionary and the
//! scan-tag table.

use std::sync::{OnceLock, RwLock};

use anyhow::Context;

use crate::config::GameDataConfig;
use crate::error::{FormatError, Result};
use crate::formats::tile_dictionary::TileDictionary;
use crate::formats::{scantag_file, tile_dictionary};
use crate::types::ScanTagTable;

static REGISTRY: OnceLock<RwLock<Option<Registry>>> = OnceLock::new();

fn slot() -> &'static RwLock<Option<Registry>> {
    REGISTRY.get_or_init(|| RwLock::new(None))
}

fn poisoned() -> FormatError {
    FormatError::RegistryState("registry lock poisoned".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    tile_dictionary: TileDictionary,
    scantags: ScanTagTable,
}

impl Registry {
    pub fn new(tile_dictionary: TileDictionary, scantags: ScanTagTable) -> Self {
        Self {
            tile_dictionary,
            scantags,
        }
    }

    /// Reads both tables from the configured data directory. A missing scan
    /// code file means the built-in tags.
    pub fn load(config: &GameDataConfig) -> anyhow::Result<Self> {
        let scancode_path = config.scancode_path();
        let scantags = match scantag_file::load(&scancode_path) {
            Ok(table) => table,
            Err(err) if err.is_not_found() => {
                log::info!(
                    "No scan code file at {}, using built-in tags",
                    scancode_path.display()
                );
                ScanTagTable::defaults()
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to load {}", scancode_path.display()));
            }
        };

        let fans_path = config.fans_path();
        let tile_dictionary = tile_dictionary::load(&fans_path, config.max_tile_defs)
            .with_context(|| format!("Failed to load {}", fans_path.display()))?;

        log::info!(
            "Registry loaded {} tile types and {} scan tags",
            tile_dictionary.loaded_count(),
            scantags.len()
        );
        Ok(Self::new(tile_dictionary, scantags))
    }

    pub fn tile_dictionary(&self) -> &TileDictionary {
        &self.tile_dictionary
    }

    pub fn scantags(&self) -> &ScanTagTable {
        &self.scantags
    }

    // Initialize the global registry
    pub fn init(config: &GameDataConfig) -> anyhow::Result<()> {
        if Self::is_initialized() {
            return Err(FormatError::RegistryState("registry already initialized".to_string()).into());
        }
        let registry = Self::load(config)?;
        Self::install(registry)?;
        Ok(())
    }

    /// Makes `registry` the global one. Fails if one is already installed.
    pub fn install(registry: Registry) -> Result<()> {
        let mut guard = slot().write().map_err(|_| poisoned())?;
        if guard.is_some() {
            return Err(FormatError::RegistryState(
                "registry already initialized".to_string(),
            ));
        }
        *guard = Some(registry);
        log::info!("Registry initialized");
        Ok(())
    }

    /// Clears the global registry. Returns whether one was installed.
    pub fn shutdown() -> bool {
        match slot().write() {
            Ok(mut guard) => {
                let was_set = guard.take().is_some();
                if was_set {
                    log::info!("Registry shut down");
                }
                was_set
            }
            Err(_) => false,
        }
    }

    pub fn is_initialized() -> bool {
        slot().read().map(|guard| guard.is_some()).unwrap_or(false)
    }

    fn with<F, R>(f: F) -> Result<R>
    where
        F: FnOnce(&Registry) -> R,
    {
        let guard = slot().read().map_err(|_| poisoned())?;
        let registry = guard
            .as_ref()
            .ok_or_else(|| FormatError::RegistryState("registry not initialized".to_string()))?;
        Ok(f(registry))
    }

    // Static accessor methods for read-only access
    pub fn with_tile_dictionary<F, R>(f: F) -> Result<R>
    where
        F: FnOnce(&TileDictionary) -> R,
    {
        Self::with(|registry| f(&registry.tile_dictionary))
    }

    pub fn with_scantags<F, R>(f: F) -> Result<R>
    where
        F: FnOnce(&ScanTagTable) -> R,
    {
        Self::with(|registry| f(&registry.scantags))
    }
}
