use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use starspeak_config::Config;

/// `STARSPEAK_HOME`, or `.starspeak` in the working directory
fn starspeak_root() -> PathBuf {
    env::var_os("STARSPEAK_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".starspeak"))
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Load a plain config file given with `--config`
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Create the profiles folder and main profile if missing.
/// The seed is plain defaults so env secrets never land on disk.
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    let dir = profiles_dir(root);
    fs::create_dir_all(&dir)?;

    let main_profile = dir.join("main.json");
    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile =
        serde_json::from_str(&data).with_context(|| format!("parsing profile {}", path.display()))?;
    Ok(profile.value)
}

/// Load a profile by name, defaulting to main, then to defaults
pub fn load_profile_from(root: &Path, name: &str) -> anyhow::Result<Config> {
    let dir = profiles_dir(root);
    let profile_file = dir.join(format!("{name}.json"));

    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        Ok(Config::default())
    }
}

/// Resolve the config the app starts with; env overrides win over files
pub fn load_user_profile(name: &str, config_path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match config_path {
        Some(path) => load_config_file(path)?,
        None => {
            let root = starspeak_root();
            init_user_config(&root)?;
            load_profile_from(&root, name)?
        }
    };

    config.apply_env();
    Ok(config)
}
