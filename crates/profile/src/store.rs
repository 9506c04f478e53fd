use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};

use crate::builtin::builtin_portfolio;
use crate::types::Portfolio;

pub const PROFILE_DIRECTORY_NAME: &str = "folio";
pub const PROFILE_FILE_NAME: &str = "profile.json";
pub const PROFILE_ENV_PREFIX: &str = "FOLIO_PROFILE_";

/// Read-only holder for the active portfolio profile.
///
/// Loads once at construction from the built-in dataset, optionally layered
/// with a JSON override file and `FOLIO_PROFILE_*` environment variables.
/// Loading never fails: a malformed override is logged and the built-in
/// profile is served instead.
pub struct ProfileStore {
    profile: Arc<ArcSwap<Portfolio>>,
    config_path: PathBuf,
}

impl ProfileStore {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(PROFILE_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".folio"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(PROFILE_FILE_NAME)
    }

    pub fn new(config_path: PathBuf) -> Self {
        let profile = Self::load_from_disk(&config_path);
        Self {
            profile: Arc::new(ArcSwap::from_pointee(profile)),
            config_path,
        }
    }

    pub fn load() -> Self {
        Self::new(Self::default_config_path())
    }

    pub fn profile(&self) -> Arc<Portfolio> {
        self.profile.load_full()
    }

    /// Re-reads the override layers and swaps the active profile.
    pub fn reload(&self) {
        self.profile
            .store(Arc::new(Self::load_from_disk(&self.config_path)));
    }

    fn load_from_disk(path: &Path) -> Portfolio {
        if !path.exists() {
            tracing::info!(
                "profile override not found at {:?}, using built-in profile",
                path
            );
            return extract_profile(base_figment());
        }

        extract_profile(base_figment().merge(Json::file(path)))
    }
}

fn base_figment() -> Figment {
    Figment::from(Serialized::defaults(builtin_portfolio())).merge(Env::prefixed(PROFILE_ENV_PREFIX))
}

fn extract_profile(figment: Figment) -> Portfolio {
    match figment.extract::<Portfolio>() {
        Ok(profile) => profile,
        Err(error) => {
            tracing::warn!(
                "failed to extract profile overrides: {}. using built-in profile",
                error
            );
            builtin_portfolio()
        }
    }
}
