//! Generator configuration types

use serde::{Deserialize, Serialize};

/// Configuration consumed by the code generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Name written into the `// Generated by` banner of every unit
    #[serde(default = "default_title")]
    pub title: String,

    /// Prefix of include paths in definition units (`<prefix>/<ns>/<Type>.h`)
    #[serde(default = "default_include_prefix")]
    pub include_prefix: String,

    /// Emit `// Generated from <file>(<line>,<column>)` comments
    #[serde(default = "default_provenance_comments")]
    pub provenance_comments: bool,

    /// Worker threads used to generate top-level types (default: available parallelism)
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Native container and scalar type names
    #[serde(default)]
    pub containers: ContainerNames,
}

/// Native type names used by the field type mapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerNames {
    /// Single-value optional container
    #[serde(default = "default_option")]
    pub option: String,

    /// Ordered sequence container
    #[serde(default = "default_list")]
    pub list: String,

    /// Key to value mapping container
    #[serde(default = "default_map")]
    pub map: String,

    /// String type
    #[serde(default = "default_string")]
    pub string: String,

    /// Byte buffer type
    #[serde(default = "default_bytes")]
    pub bytes: String,
}

fn default_title() -> String {
    "Schemabind External Schema Codegen".to_string()
}

fn default_include_prefix() -> String {
    "ExternalSchemaCodegen".to_string()
}

fn default_provenance_comments() -> bool {
    true
}

fn default_option() -> String {
    "::improbable::TSchemaOption".to_string()
}

fn default_list() -> String {
    "TArray".to_string()
}

fn default_map() -> String {
    "TMap".to_string()
}

fn default_string() -> String {
    "FString".to_string()
}

fn default_bytes() -> String {
    "TArray<uint8>".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            include_prefix: default_include_prefix(),
            provenance_comments: default_provenance_comments(),
            jobs: None,
            containers: ContainerNames::default(),
        }
    }
}

impl Default for ContainerNames {
    fn default() -> Self {
        Self {
            option: default_option(),
            list: default_list(),
            map: default_map(),
            string: default_string(),
            bytes: default_bytes(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Number of worker threads to use for a run over `work_items` top-level types
    pub fn worker_count(&self, work_items: usize) -> usize {
        let requested = self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        requested.clamp(1, work_items.max(1))
    }
}
