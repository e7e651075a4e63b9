//! Encoding and decoding of the environment map.

use std::collections::BTreeMap;

use super::path::ConfigFormat;
use crate::error::EnvError;
use crate::types::EnvEntry;

pub(crate) type EnvMap = BTreeMap<String, EnvEntry>;

/// Decodes a config file body. A blank YAML document or a `null` document
/// is an empty map.
pub(crate) fn decode(bytes: &[u8], format: ConfigFormat) -> Result<EnvMap, EnvError> {
    let invalid = |message: String| EnvError::InvalidFormat { format, message };

    match format {
        ConfigFormat::Yaml => {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(EnvMap::new());
            }
            serde_yaml::from_slice::<Option<EnvMap>>(bytes)
                .map(Option::unwrap_or_default)
                .map_err(|e| invalid(e.to_string()))
        }
        ConfigFormat::Json => serde_json::from_slice::<Option<EnvMap>>(bytes)
            .map(Option::unwrap_or_default)
            .map_err(|e| invalid(e.to_string())),
    }
}

pub(crate) fn encode(envs: &EnvMap, format: ConfigFormat) -> Result<Vec<u8>, EnvError> {
    let encoded = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(envs).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::to_string_pretty(envs).map_err(|e| e.to_string()),
    };
    encoded
        .map(String::into_bytes)
        .map_err(|message| EnvError::Encode { format, message })
}
