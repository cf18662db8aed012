//! Core domain layer for Stackgen.
//!
//! This module contains pure logic with no I/O. Loading, persisting and
//! calling the generation service are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Contents
//!
//! - **Entities**: `ProjectDescription`, `ModuleDescription`
//! - **Value objects**: `ModuleKind`, `OutputMode`
//! - **Validation**: `SchemaValidator` producing a `ValidationResult`
//!
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{ModuleDescription, ProjectDescription};
pub use error::DomainError;
pub use validation::{
    DOMAIN_LABEL_MAX_LEN, DOMAIN_MAX_LEN, EMAIL_MAX_LEN, MODULE_ID_MAX_LEN,
    PROJECT_NAME_MAX_LEN, SchemaValidator, ValidationResult,
};
pub use value_objects::{ModuleKind, OutputMode};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn module_kind_parses_exactly() {
        assert_eq!(ModuleKind::from_str("code").unwrap(), ModuleKind::Code);
        assert_eq!(ModuleKind::from_str("vcs").unwrap(), ModuleKind::Vcs);
        assert!(ModuleKind::from_str("Code").is_err());
        assert!(ModuleKind::from_str("plugin").is_err());
    }

    #[test]
    fn module_kind_display_round_trips() {
        for kind in ModuleKind::ALL {
            assert_eq!(ModuleKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn module_kind_expected_list() {
        assert_eq!(ModuleKind::expected_list(), "code, extension, provider, vcs");
    }

    #[test]
    fn unknown_kind_error_suggests_closed_set() {
        let err = ModuleKind::from_str("plugin").unwrap_err();
        assert_eq!(err, DomainError::UnknownModuleKind("plugin".into()));
        assert!(err.suggestions().iter().any(|s| s.contains("extension")));
    }

    #[test]
    fn output_mode_wire_names() {
        assert_eq!(OutputMode::Local.to_string(), "local");
        assert_eq!(OutputMode::Github.to_string(), "github");
        assert_eq!(
            serde_json::to_value(OutputMode::Github).unwrap(),
            serde_json::json!("github")
        );
    }

    #[test]
    fn module_kind_serde_is_lowercase() {
        let json = serde_json::to_string(&ModuleKind::Extension).unwrap();
        assert_eq!(json, "\"extension\"");
    }
}
