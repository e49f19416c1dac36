//! Cover page metadata, loaded from a YAML file.
//!
//! A missing file means "no cover" and is distinct from a file that omits
//! some keys. Every key is optional; the Spanish keys written by earlier
//! versions of the notes template (`codigo`, `curso`, `institucion`, `fecha`)
//! are accepted as aliases.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Logo file name, relative to the logo directory
    #[serde(default, deserialize_with = "scalar", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Course or document code, shown above the title
    #[serde(
        default,
        alias = "codigo",
        deserialize_with = "scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<String>,

    #[serde(
        default,
        alias = "curso",
        alias = "title",
        deserialize_with = "scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub course_title: Option<String>,

    #[serde(
        default,
        alias = "institucion",
        deserialize_with = "scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub institution: Option<String>,

    #[serde(
        default,
        alias = "fecha",
        deserialize_with = "scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
}

impl Metadata {
    /// Parse metadata from YAML. An empty document is a record with no keys.
    pub fn from_yaml(contents: &str) -> Result<Metadata> {
        if contents.trim().is_empty() {
            return Ok(Metadata::default());
        }
        serde_yaml::from_str(contents).with_context(|| "Failed to parse metadata YAML")
    }

    /// Load metadata from `path`, returning `None` if the file doesn't exist
    pub fn load(path: &Path) -> Result<Option<Metadata>> {
        if !path.is_file() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata file {}", path.display()))?;
        let metadata = Metadata::from_yaml(&contents)
            .with_context(|| format!("Invalid metadata in {}", path.display()))?;
        Ok(Some(metadata))
    }
}

/// Accept any YAML scalar as a string, so `code: 1234` or `date: 2024-03-01`
/// don't need quoting.
fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, found {other:?}"
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_parse_all_keys() {
        let metadata = Metadata::from_yaml(
            "logo: uni.png\ncode: CS-101\ncourse_title: Operating Systems\ninstitution: Some University\ndate: March 2024\n",
        )
        .expect("can parse metadata");
        assert_eq!(metadata.logo.as_deref(), Some("uni.png"));
        assert_eq!(metadata.code.as_deref(), Some("CS-101"));
        assert_eq!(metadata.course_title.as_deref(), Some("Operating Systems"));
        assert_eq!(metadata.institution.as_deref(), Some("Some University"));
        assert_eq!(metadata.date.as_deref(), Some("March 2024"));
    }

    #[test]
    fn keys_are_independently_optional() {
        let metadata = Metadata::from_yaml("course_title: Notes\n").expect("can parse metadata");
        assert_eq!(metadata.course_title.as_deref(), Some("Notes"));
        assert!(metadata.logo.is_none());
        assert!(metadata.code.is_none());
        assert!(metadata.institution.is_none());
        assert!(metadata.date.is_none());
    }

    #[test]
    fn accepts_spanish_aliases_and_scalars() {
        let metadata = Metadata::from_yaml(
            "codigo: 4021\ncurso: Redes\ninstitucion: Universidad\nfecha: 2024-05-01\nextra: ignored\n",
        )
        .expect("can parse metadata");
        assert_eq!(metadata.code.as_deref(), Some("4021"));
        assert_eq!(metadata.course_title.as_deref(), Some("Redes"));
        assert_eq!(metadata.institution.as_deref(), Some("Universidad"));
        assert_eq!(metadata.date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn empty_document_is_present_but_blank() {
        assert_eq!(Metadata::from_yaml("").unwrap(), Metadata::default());
    }

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let loaded = Metadata::load(&dir.path().join("metadata.yaml")).expect("can load");
        assert!(loaded.is_none());
    }

    #[test]
    fn present_file_is_loaded() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("metadata.yaml");
        std::fs::write(&path, "date: today\n").unwrap();
        let loaded = Metadata::load(&path).expect("can load").expect("is present");
        assert_eq!(loaded.date.as_deref(), Some("today"));
    }
}
