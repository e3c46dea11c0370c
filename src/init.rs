//! Composition entry points
//!
//! Builds a ready, running logger from a slash-separated list of provider
//! type names plus an opaque options payload, mirroring configuration
//! strings like `"file/console"`. Requested types are deduplicated by
//! name in first-encountered order; a single distinct type is used
//! directly without a mix wrapper.

use crate::core::{
    DispatchError, Level, Logger, MixProvider, Provider, ProviderRegistry, Result,
    DEFAULT_QUEUE_CAPACITY,
};
use std::path::Path;

/// Options payload for provider construction: either a literal JSON
/// string or any JSON value (serialized once).
#[derive(Debug, Clone)]
pub enum OptionsPayload {
    Raw(String),
    Value(serde_json::Value),
}

impl OptionsPayload {
    fn into_json(self) -> String {
        match self {
            OptionsPayload::Raw(s) => s,
            OptionsPayload::Value(v) => v.to_string(),
        }
    }
}

impl From<&str> for OptionsPayload {
    fn from(s: &str) -> Self {
        OptionsPayload::Raw(s.to_string())
    }
}

impl From<String> for OptionsPayload {
    fn from(s: String) -> Self {
        OptionsPayload::Raw(s)
    }
}

impl From<serde_json::Value> for OptionsPayload {
    fn from(v: serde_json::Value) -> Self {
        OptionsPayload::Value(v)
    }
}

/// Build and start an async logger from a slash-separated provider type
/// list (e.g. `"file/console"`) and a shared options payload.
///
/// Fails with a configuration error on an empty list or an unregistered
/// type name; in the latter case no provider is constructed at all, so a
/// bad configuration never partially succeeds.
pub fn init(
    registry: &ProviderRegistry,
    provider_types: &str,
    opts: impl Into<OptionsPayload>,
) -> Result<Logger> {
    let opts = opts.into().into_json();

    // Deduplicate by name, preserving first-encountered order.
    let mut types: Vec<&str> = Vec::new();
    for raw in provider_types.split('/') {
        let name = raw.trim();
        if !name.is_empty() && !types.contains(&name) {
            types.push(name);
        }
    }
    if types.is_empty() {
        return Err(DispatchError::EmptyProviders);
    }

    // Resolve every constructor before instantiating anything.
    let mut constructors = Vec::with_capacity(types.len());
    for name in &types {
        let constructor = registry
            .lookup(name)
            .ok_or_else(|| DispatchError::unregistered(*name))?;
        constructors.push(constructor);
    }

    let mut providers = constructors
        .into_iter()
        .map(|constructor| constructor(&opts))
        .collect::<Result<Vec<_>>>()?;

    // Exactly one distinct type: skip the fan-out wrapper entirely.
    let provider: Box<dyn Provider> = if providers.len() == 1 {
        providers.remove(0)
    } else {
        let first = providers.remove(0);
        Box::new(MixProvider::new(first, providers))
    };

    let mut logger = Logger::with_async(provider, DEFAULT_QUEUE_CAPACITY);
    logger.set_level(Level::Info);
    logger.run();
    Ok(logger)
}

/// Start a console-backed logger routing records at or above
/// `to_stderr_level` to stderr.
pub fn init_console(to_stderr_level: Level) -> Result<Logger> {
    let registry = ProviderRegistry::with_builtins();
    init(&registry, "console", console_opts(to_stderr_level))
}

/// Like [`init_console`] with a colored level tag.
pub fn init_colored_console(to_stderr_level: Level) -> Result<Logger> {
    let registry = ProviderRegistry::with_builtins();
    init(&registry, "colored_console", console_opts(to_stderr_level))
}

/// Start a file-backed logger writing to `fullpath`.
pub fn init_file(fullpath: impl AsRef<Path>) -> Result<Logger> {
    let registry = ProviderRegistry::with_builtins();
    init(&registry, "file", file_opts(fullpath.as_ref()))
}

/// Start a multifile logger splitting records by level under `rootdir`.
pub fn init_multi_file(rootdir: impl AsRef<Path>, filename: &str) -> Result<Logger> {
    let registry = ProviderRegistry::with_builtins();
    init(&registry, "multifile", multi_file_opts(rootdir.as_ref(), filename))
}

/// Start a logger fanning out to both a file and the console.
pub fn init_file_and_console(
    fullpath: impl AsRef<Path>,
    to_stderr_level: Level,
) -> Result<Logger> {
    let registry = ProviderRegistry::with_builtins();
    let mut opts = file_opts(fullpath.as_ref());
    merge(&mut opts, console_opts(to_stderr_level));
    init(&registry, "file/console", opts)
}

/// Start a logger fanning out to per-level files and the console.
pub fn init_multi_file_and_console(
    rootdir: impl AsRef<Path>,
    filename: &str,
    to_stderr_level: Level,
) -> Result<Logger> {
    let registry = ProviderRegistry::with_builtins();
    let mut opts = multi_file_opts(rootdir.as_ref(), filename);
    merge(&mut opts, console_opts(to_stderr_level));
    init(&registry, "multifile/console", opts)
}

fn console_opts(to_stderr_level: Level) -> serde_json::Value {
    serde_json::json!({ "tostderrlevel": to_stderr_level })
}

fn file_opts(fullpath: &Path) -> serde_json::Value {
    let dir = fullpath
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());
    let filename = fullpath
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app.log".to_string());
    serde_json::json!({ "dir": dir, "filename": filename })
}

fn multi_file_opts(rootdir: &Path, filename: &str) -> serde_json::Value {
    serde_json::json!({
        "rootdir": rootdir.to_string_lossy(),
        "filename": filename,
    })
}

/// Overlay `extra`'s keys onto `base` (both are JSON objects).
fn merge(base: &mut serde_json::Value, extra: serde_json::Value) {
    if let (Some(base_map), serde_json::Value::Object(extra_map)) = (base.as_object_mut(), extra) {
        for (key, value) in extra_map {
            base_map.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_provider_list() {
        let registry = ProviderRegistry::with_builtins();
        assert!(matches!(
            init(&registry, "", "").unwrap_err(),
            DispatchError::EmptyProviders
        ));
        assert!(matches!(
            init(&registry, "///", "").unwrap_err(),
            DispatchError::EmptyProviders
        ));
    }

    #[test]
    fn test_unknown_type_fails() {
        let registry = ProviderRegistry::with_builtins();
        let err = init(&registry, "syslog", "").unwrap_err();
        assert_eq!(err.to_string(), "unregistered provider type: syslog");
    }

    #[test]
    fn test_file_opts_splits_path() {
        let opts = file_opts(Path::new("./logs/app.log"));
        assert_eq!(opts["dir"], "./logs");
        assert_eq!(opts["filename"], "app.log");

        let opts = file_opts(Path::new("bare.log"));
        assert_eq!(opts["dir"], ".");
        assert_eq!(opts["filename"], "bare.log");
    }

    #[test]
    fn test_merge_overlays_keys() {
        let mut base = serde_json::json!({"dir": "logs"});
        merge(&mut base, serde_json::json!({"tostderrlevel": "ERROR"}));
        assert_eq!(base["dir"], "logs");
        assert_eq!(base["tostderrlevel"], "ERROR");
    }
}
