//! Object directory loading: `data.txt` plus an optional `enchant.txt`.
//!
//! Codec failures never crash a load of a required object. The object comes
//! back with a blank profile and the failure is logged, which keeps a game
//! running when one profile is broken.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::formats::{cap_file, eve_file};
use crate::types::{CapRecord, EveRecord};

pub const CAP_FILE_NAME: &str = "data.txt";
pub const EVE_FILE_NAME: &str = "enchant.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// An override that may be absent.
    Optional,
    /// An asset the caller cannot do without.
    Required,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedObject {
    /// `None` only for an optional object whose `data.txt` is absent.
    pub cap: Option<CapRecord>,
    pub eve: Option<EveRecord>,
}

impl LoadedObject {
    /// True when the profile was read from disk rather than substituted.
    pub fn is_loaded(&self) -> bool {
        self.cap.as_ref().is_some_and(|cap| cap.loaded)
    }
}

fn load_cap(path: &Path, requirement: Requirement) -> anyhow::Result<Option<CapRecord>> {
    match cap_file::load(path) {
        Ok(cap) => Ok(Some(cap)),
        Err(err) => match requirement {
            Requirement::Optional if err.is_not_found() => {
                log::debug!("No optional profile at {}", path.display());
                Ok(None)
            }
            Requirement::Optional => {
                Err(err).with_context(|| format!("Failed to load {}", path.display()))
            }
            Requirement::Required => {
                log::error!(
                    "Failed to load required profile {}: {err}, using a blank one",
                    path.display()
                );
                Ok(Some(CapRecord::default()))
            }
        },
    }
}

fn load_eve(path: &Path, requirement: Requirement) -> anyhow::Result<Option<EveRecord>> {
    match eve_file::load(path) {
        Ok(eve) => Ok(Some(eve)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => match requirement {
            Requirement::Optional => {
                Err(err).with_context(|| format!("Failed to load {}", path.display()))
            }
            Requirement::Required => {
                log::error!("Failed to load enchant {}: {err}, ignoring it", path.display());
                Ok(None)
            }
        },
    }
}

/// Loads the profile files of the object directory `dir`.
pub fn load_object(dir: impl AsRef<Path>, requirement: Requirement) -> anyhow::Result<LoadedObject> {
    let dir = dir.as_ref();

    let cap = load_cap(&dir.join(CAP_FILE_NAME), requirement)?;
    let eve = load_eve(&dir.join(EVE_FILE_NAME), requirement)?;

    if let Some(cap) = &cap {
        log::info!(
            "Loaded object '{}' from {}{}",
            cap.classname,
            dir.display(),
            if eve.is_some() { " with enchant" } else { "" }
        );
    }

    Ok(LoadedObject { cap, eve })
}

/// Writes `data.txt` and, when given, `enchant.txt` into `dir`.
pub fn save_object(
    dir: impl AsRef<Path>,
    cap: &CapRecord,
    eve: Option<&EveRecord>,
) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    cap_file::save(dir.join(CAP_FILE_NAME), cap).context("Failed to save profile")?;
    if let Some(eve) = eve {
        eve_file::save(dir.join(EVE_FILE_NAME), eve).context("Failed to save enchant")?;
    }

    log::info!("Saved object '{}' to {}", cap.classname, dir.display());
    Ok(())
}
