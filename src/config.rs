//! Startup configuration from the environment and command line.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKFALL_MODE` | mode identifier (`endless`, `lines40`, `lines20`, `rising`, `timeattack`) | `endless` |
//! | `BLOCKFALL_SEED` | RNG seed | derived from the clock |
//! | `BLOCKFALL_KEYS` | path to a JSON key-binding file | built-in bindings |
//! | `BLOCKFALL_BELL` | `0`/`false`/`off` silences the bell | on |
//!
//! A first positional argument overrides `BLOCKFALL_MODE`.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::ModeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: ModeKind,
    pub seed: u32,
    pub keys_path: Option<PathBuf>,
    pub bell: bool,
    /// Problems found while reading settings; defaults were used instead
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), env::args().nth(1))
    }

    /// Build from an arbitrary variable source, for tests
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, mode_arg: Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut warnings = Vec::new();

        let mode = match mode_arg.or_else(|| var("BLOCKFALL_MODE")) {
            Some(id) => ModeKind::from_str(&id).unwrap_or_else(|| {
                warnings.push(format!("unknown mode {id:?}, playing endless"));
                ModeKind::Endless
            }),
            None => ModeKind::Endless,
        };

        let seed = match var("BLOCKFALL_SEED") {
            Some(s) => s.parse().unwrap_or_else(|_| {
                warnings.push(format!("BLOCKFALL_SEED {s:?} is not a u32, using the clock"));
                clock_seed()
            }),
            None => clock_seed(),
        };

        let keys_path = var("BLOCKFALL_KEYS").map(PathBuf::from);

        let bell = !matches!(
            var("BLOCKFALL_BELL").map(|s| s.to_ascii_lowercase()).as_deref(),
            Some("0" | "false" | "off" | "no")
        );

        Self {
            mode,
            seed,
            keys_path,
            bell,
            warnings,
        }
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
