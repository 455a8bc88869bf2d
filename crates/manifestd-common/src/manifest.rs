//! The declarative manifest model and its validation rules.
//!
//! A manifest is submitted as
//! `{"metadata":{"name":..},"spec":{"source":{"image":..}}}`. Missing
//! fields decode as empty strings so that [`Manifest::validate`] reports
//! them with a field-specific message instead of a generic decode error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestdError, Result, ValidationError};

/// Identifying metadata of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Registry key and runtime container name.
    #[serde(default)]
    pub name: String,
}

/// Where the workload comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Image reference, e.g. `nginx:latest`.
    #[serde(default)]
    pub image: String,
}

/// Desired state of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSpec {
    /// Image source.
    #[serde(default)]
    pub source: Source,
}

/// A caller-supplied declaration of a named deployable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Identifying metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Desired state.
    #[serde(default)]
    pub spec: ManifestSpec,
}

impl Manifest {
    /// Creates a manifest from a name and an image reference.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            metadata: Metadata { name: name.into() },
            spec: ManifestSpec {
                source: Source {
                    image: image.into(),
                },
            },
        }
    }

    /// Returns the manifest name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Returns the image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.spec.source.image
    }

    /// Checks that the name and the image are present and not blank.
    ///
    /// The name is checked first, so a manifest missing both fields
    /// reports the name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.name().trim().is_empty() {
            return Err(ValidationError::MissingField("metadata.name"));
        }
        if self.image().trim().is_empty() {
            return Err(ValidationError::MissingField("spec.source.image"));
        }
        Ok(())
    }

    /// Parses a manifest from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a JSON manifest.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parses a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a YAML manifest.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Loads a manifest file, choosing the format from its extension.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestdError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_slice(content.as_bytes())
        }
    }
}

/// A registered manifest plus the runtime metadata derived for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredManifest {
    /// The manifest as submitted.
    #[serde(flatten)]
    pub manifest: Manifest,
    /// Host port published for the container, when one was assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// RFC 3339 timestamp of the registration.
    pub registered_at: String,
}

impl StoredManifest {
    /// Wraps a manifest registered now.
    #[must_use]
    pub fn new(manifest: Manifest, port: Option<u16>) -> Self {
        Self {
            manifest,
            port,
            registered_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns the registry key of this record.
    #[must_use]
    pub fn name(&self) -> &str {
        self.manifest.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_manifest_passes() {
        assert_eq!(Manifest::new("web", "nginx:latest").validate(), Ok(()));
    }

    #[test]
    fn blank_name_is_rejected_regardless_of_image() {
        for name in ["", "   ", "\t\n"] {
            for image in ["", "nginx:latest"] {
                assert_eq!(
                    Manifest::new(name, image).validate(),
                    Err(ValidationError::MissingField("metadata.name")),
                    "name {name:?} image {image:?}"
                );
            }
        }
    }

    #[test]
    fn blank_image_is_rejected() {
        for image in ["", " ", "\n"] {
            assert_eq!(
                Manifest::new("web", image).validate(),
                Err(ValidationError::MissingField("spec.source.image"))
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_not_blank() {
        assert!(Manifest::new("  web ", " nginx ").validate().is_ok());
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let m = Manifest::from_json_slice(br#"{"metadata":{"name":"web"}}"#).expect("decode");
        assert_eq!(m.name(), "web");
        assert_eq!(m.image(), "");
        assert!(m.validate().is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Manifest::from_json_slice(b"{malformed-json}").is_err());
    }

    #[test]
    fn yaml_manifest_parses() {
        let m = Manifest::from_yaml_str(
            "metadata:\n  name: web\nspec:\n  source:\n    image: nginx:1.27\n",
        )
        .expect("yaml");
        assert_eq!(m, Manifest::new("web", "nginx:1.27"));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let yaml = dir.path().join("app.yml");
        std::fs::write(&yaml, "metadata:\n  name: a\nspec:\n  source:\n    image: b\n")
            .expect("write yaml");
        let json = dir.path().join("app.json");
        std::fs::write(&json, r#"{"metadata":{"name":"a"},"spec":{"source":{"image":"b"}}}"#)
            .expect("write json");

        assert_eq!(Manifest::load(&yaml).expect("load yaml"), Manifest::new("a", "b"));
        assert_eq!(Manifest::load(&json).expect("load json"), Manifest::new("a", "b"));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Manifest::load(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/manifest.json"));
    }

    #[test]
    fn stored_manifest_flattens_and_omits_missing_port() {
        let stored = StoredManifest::new(Manifest::new("web", "nginx"), None);
        let json = serde_json::to_value(&stored).expect("serialize");
        assert_eq!(json["metadata"]["name"], "web");
        assert_eq!(json["spec"]["source"]["image"], "nginx");
        assert!(json.get("port").is_none());

        let with_port = StoredManifest::new(Manifest::new("web", "nginx"), Some(8081));
        let json = serde_json::to_value(&with_port).expect("serialize");
        assert_eq!(json["port"], 8081);
    }
}
