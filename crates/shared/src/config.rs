//! Policy file format

use crate::{RoleDefinition, SchoolGateError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// On-disk representation of a policy table (YAML or JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Free-form policy version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Role id → role definition
    #[serde(default)]
    pub roles: BTreeMap<String, RoleDefinition>,
}

/// Serialization format of a policy file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    Yaml,
    Json,
}

impl PolicyFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            other => Err(SchoolGateError::Config(format!(
                "Unsupported policy file extension {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

impl PolicyConfig {
    /// Load and validate a policy file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let format = PolicyFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = match format {
            PolicyFormat::Yaml => Self::from_yaml_str(&content)?,
            PolicyFormat::Json => Self::from_json_str(&content)?,
        };
        tracing::info!(
            path = %path.display(),
            roles = config.roles.len(),
            "Loaded policy file"
        );
        Ok(config)
    }

    /// Parse and validate YAML
    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validated()
    }

    /// Parse and validate JSON
    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validated()
    }

    /// Serialize in the given format
    pub fn render(&self, format: PolicyFormat) -> crate::Result<String> {
        Ok(match format {
            PolicyFormat::Yaml => serde_yaml::to_string(self)?,
            PolicyFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Reject blank identifiers and fill in missing role labels
    pub fn validated(mut self) -> crate::Result<Self> {
        for (role_id, role) in self.roles.iter_mut() {
            if role_id.trim().is_empty() {
                return Err(SchoolGateError::Config("Role id must not be blank".to_string()));
            }
            for (module, perms) in &role.modules {
                if module.trim().is_empty() {
                    return Err(SchoolGateError::Config(format!(
                        "Role '{}' has a blank module key",
                        role_id
                    )));
                }
                if perms.iter().any(|p| p.trim().is_empty()) {
                    return Err(SchoolGateError::Config(format!(
                        "Role '{}' has a blank permission on module '{}'",
                        role_id, module
                    )));
                }
            }
            if role.name.trim().is_empty() {
                role.name = role_id.clone();
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEACHER_YAML: &str = r#"
version: "1"
roles:
  teacher:
    name: Teacher
    description: Manages classes
    modules:
      students: [view, edit]
      attendance: [view, create]
  visitor:
    modules:
      library: []
"#;

    // ============== Parsing Tests ==============

    #[test]
    fn test_yaml_parse() {
        let config = PolicyConfig::from_yaml_str(TEACHER_YAML).unwrap();

        assert_eq!(config.version.as_deref(), Some("1"));
        assert_eq!(config.roles.len(), 2);
        assert!(config.roles["teacher"].allows("students", "edit"));
        assert!(config.roles["visitor"].has_module("library"));
    }

    #[test]
    fn test_missing_name_defaults_to_id() {
        let config = PolicyConfig::from_yaml_str(TEACHER_YAML).unwrap();
        assert_eq!(config.roles["visitor"].name, "visitor");
    }

    #[test]
    fn test_json_parse() {
        let json = r#"{"roles": {"parent": {"name": "Parent", "modules": {"fees": ["view"]}}}}"#;
        let config = PolicyConfig::from_json_str(json).unwrap();

        assert!(config.version.is_none());
        assert!(config.roles["parent"].allows("fees", "view"));
    }

    #[test]
    fn test_empty_document_has_no_roles() {
        let config = PolicyConfig::from_json_str("{}").unwrap();
        assert!(config.roles.is_empty());
    }

    // ============== Validation Tests ==============

    #[test]
    fn test_blank_role_id_rejected() {
        let json = r#"{"roles": {"  ": {"modules": {}}}}"#;
        let err = PolicyConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, SchoolGateError::Config(_)));
    }

    #[test]
    fn test_blank_module_rejected() {
        let json = r#"{"roles": {"teacher": {"modules": {"": ["view"]}}}}"#;
        let err = PolicyConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("blank module"));
    }

    #[test]
    fn test_blank_permission_rejected() {
        let json = r#"{"roles": {"teacher": {"modules": {"students": ["view", " "]}}}}"#;
        let err = PolicyConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("blank permission on module 'students'"));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let err = PolicyConfig::from_yaml_str("roles: [not, a, map]").unwrap_err();
        assert!(matches!(err, SchoolGateError::Yaml(_)));
    }

    // ============== File Tests ==============

    #[test]
    fn test_from_file_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(TEACHER_YAML.as_bytes()).unwrap();

        let config = PolicyConfig::from_file(file.path()).unwrap();
        assert!(config.roles.contains_key("teacher"));
    }

    #[test]
    fn test_from_file_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = PolicyConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SchoolGateError::Config(_)));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PolicyConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SchoolGateError::Io(_)));
    }

    #[test]
    fn test_render_round_trip_both_formats() {
        let config = PolicyConfig::from_yaml_str(TEACHER_YAML).unwrap();

        let yaml = config.render(PolicyFormat::Yaml).unwrap();
        assert_eq!(PolicyConfig::from_yaml_str(&yaml).unwrap(), config);

        let json = config.render(PolicyFormat::Json).unwrap();
        assert_eq!(PolicyConfig::from_json_str(&json).unwrap(), config);
    }
}
