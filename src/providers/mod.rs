//! Built-in provider implementations

pub mod console;
pub mod file;
pub mod multi_file;
pub mod network;

pub use console::ConsoleProvider;
pub use file::FileProvider;
pub use multi_file::MultiFileProvider;
pub use network::NetworkProvider;

use crate::core::error::{DispatchError, Result};
use crate::core::registry::ProviderRegistry;
use serde::de::DeserializeOwned;

/// Deserialize a typed options struct from an opaque JSON payload.
///
/// An empty payload yields the provider's defaults; unknown keys are
/// ignored so one payload can configure several providers in a mix.
pub(crate) fn parse_options<T>(provider: &'static str, opts: &str) -> Result<T>
where
    T: Default + DeserializeOwned,
{
    let trimmed = opts.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(trimmed).map_err(|e| DispatchError::invalid_options(provider, e))
}

/// Register the built-in provider constructors.
pub fn register_builtins(registry: &mut ProviderRegistry) {
    registry.register("console", |opts| {
        Ok(Box::new(ConsoleProvider::from_options(opts, false)?))
    });
    registry.register("colored_console", |opts| {
        Ok(Box::new(ConsoleProvider::from_options(opts, true)?))
    });
    registry.register("file", |opts| Ok(Box::new(FileProvider::from_options(opts)?)));
    registry.register("multifile", |opts| {
        Ok(Box::new(MultiFileProvider::from_options(opts)?))
    });
    registry.register("network", |opts| {
        Ok(Box::new(NetworkProvider::from_options(opts)?))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct DemoOptions {
        dir: String,
        limit: u32,
    }

    #[test]
    fn test_parse_options_empty_gives_defaults() {
        let opts: DemoOptions = parse_options("demo", "").unwrap();
        assert_eq!(opts, DemoOptions::default());
        let opts: DemoOptions = parse_options("demo", "   ").unwrap();
        assert_eq!(opts, DemoOptions::default());
    }

    #[test]
    fn test_parse_options_ignores_unknown_keys() {
        let opts: DemoOptions =
            parse_options("demo", r#"{"dir":"/tmp","tostderrlevel":4}"#).unwrap();
        assert_eq!(opts.dir, "/tmp");
        assert_eq!(opts.limit, 0);
    }

    #[test]
    fn test_parse_options_invalid_payload() {
        let err = parse_options::<DemoOptions>("demo", "{not json").unwrap_err();
        assert!(err.to_string().contains("invalid options for provider 'demo'"));
    }
}
