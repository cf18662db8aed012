//! Schema validation for project descriptions.
//!
//! The validator never fails: every rule violation becomes a message in a
//! [`ValidationResult`]. Errors block generation, warnings are advisory.
//! Messages embed the field path (`modules[2].moduleId`) and use the word
//! "required" for absent fields so callers can match on substrings.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::{
    entities::{ModuleDescription, ProjectDescription},
    value_objects::ModuleKind,
};

pub const PROJECT_NAME_MAX_LEN: usize = 100;
pub const MODULE_ID_MAX_LEN: usize = 100;
pub const DOMAIN_MAX_LEN: usize = 253;
pub const DOMAIN_LABEL_MAX_LEN: usize = 63;
pub const EMAIL_MAX_LEN: usize = 254;

static PROJECT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{0,99}$").expect("valid regex"));

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,24}$")
        .expect("valid regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$",
    )
    .expect("valid regex")
});

static MODULE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{0,99}$").expect("valid regex"));

/// Outcome of validating a project description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Stateless schema validator.
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a whole project description.
    ///
    /// Rules run in a fixed order so the error list is deterministic:
    /// project name, domain, owner, modules, environments.
    pub fn validate(config: &ProjectDescription) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        Self::check_project_name(config.project_name.as_deref(), &mut errors);
        Self::check_domain(config.domain.as_deref(), &mut errors);
        Self::check_owner(config.owner.as_deref(), &mut errors);
        Self::check_modules(config.modules.as_deref(), &mut errors, &mut warnings);

        if config.environments.is_none() {
            warnings.push("environments not specified - default environments will be used".into());
        }

        ValidationResult::from_findings(errors, warnings)
    }

    /// Validate a single module at position `index`.
    ///
    /// Returns every error for the module; an empty list means the module is
    /// valid as a whole.
    pub fn validate_module(module: &ModuleDescription, index: usize) -> Vec<String> {
        let mut errors = Vec::new();
        let path = format!("modules[{index}]");

        match present(module.kind.as_deref()) {
            None => errors.push(format!(
                "{path}.kind is required (one of: {})",
                ModuleKind::expected_list()
            )),
            Some(kind) if kind.parse::<ModuleKind>().is_err() => errors.push(format!(
                "{path}.kind must be one of: {} (got '{kind}')",
                ModuleKind::expected_list()
            )),
            Some(_) => {}
        }

        if present(module.module_type.as_deref()).is_none() {
            errors.push(format!("{path}.type is required"));
        }

        match present(module.module_id.as_deref()) {
            None => errors.push(format!("{path}.moduleId is required")),
            Some(id) => {
                if !MODULE_ID_RE.is_match(id) {
                    errors.push(format!(
                        "{path}.moduleId must be lowercase, start with a letter, and contain only \
                         letters, numbers, and hyphens (1-{MODULE_ID_MAX_LEN} characters)"
                    ));
                }
                if id.ends_with('-') || id.contains("--") {
                    errors.push(format!(
                        "{path}.moduleId must not end with a hyphen or contain consecutive hyphens"
                    ));
                }
            }
        }

        errors
    }

    // -------------------------------------------------------------------------
    // Rules
    // -------------------------------------------------------------------------

    fn check_project_name(name: Option<&str>, errors: &mut Vec<String>) {
        match present(name) {
            None => errors.push("projectName is required".into()),
            Some(name) if !PROJECT_NAME_RE.is_match(name) => errors.push(format!(
                "projectName must start with a letter and contain only letters, numbers, \
                 hyphens, and underscores (1-{PROJECT_NAME_MAX_LEN} characters)"
            )),
            Some(_) => {}
        }
    }

    /// Grammar, overall length and label length are independent checks.
    fn check_domain(domain: Option<&str>, errors: &mut Vec<String>) {
        let Some(domain) = present(domain) else {
            errors.push("domain is required".into());
            return;
        };

        if !DOMAIN_RE.is_match(domain) {
            errors.push("domain must be a valid domain name (e.g., example.com)".into());
        }
        if domain.len() > DOMAIN_MAX_LEN {
            errors.push(format!(
                "domain must not exceed {DOMAIN_MAX_LEN} characters (got {})",
                domain.len()
            ));
        }
        if domain.split('.').any(|label| label.len() > DOMAIN_LABEL_MAX_LEN) {
            errors.push(format!(
                "domain labels must not exceed {DOMAIN_LABEL_MAX_LEN} characters"
            ));
        }
    }

    fn check_owner(owner: Option<&str>, errors: &mut Vec<String>) {
        let Some(owner) = present(owner) else {
            errors.push("owner is required".into());
            return;
        };

        if !EMAIL_RE.is_match(owner) {
            errors.push("owner must be a valid email address".into());
        }
        if owner.len() > EMAIL_MAX_LEN {
            errors.push(format!(
                "owner must not exceed {EMAIL_MAX_LEN} characters (got {})",
                owner.len()
            ));
        }
    }

    fn check_modules(
        modules: Option<&[ModuleDescription]>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let Some(modules) = modules else {
            errors.push("modules array is required".into());
            return;
        };

        if modules.is_empty() {
            warnings.push("modules array is empty - project will be empty".into());
            return;
        }

        for (index, module) in modules.iter().enumerate() {
            errors.extend(Self::validate_module(module, index));
        }

        // Advisory only: duplicate ids are individually valid.
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (index, module) in modules.iter().enumerate() {
            let Some(id) = present(module.module_id.as_deref()) else {
                continue;
            };
            if let Some(first) = first_seen.get(id) {
                warnings.push(format!(
                    "modules[{index}].moduleId '{id}' duplicates modules[{first}]"
                ));
            } else {
                first_seen.insert(id, index);
            }
        }

        if !modules
            .iter()
            .any(|m| m.parsed_kind() == Some(ModuleKind::Code))
        {
            warnings.push("No code modules defined - project will have no application code".into());
        }
    }
}

/// Empty strings count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_project() -> ProjectDescription {
        ProjectDescription::new("my-shop", "shop.example.com", "dev@example.com")
            .with_module(
                ModuleDescription::new(ModuleKind::Code, "nextjs", "web")
                    .with_layers(["frontend"]),
            )
            .with_environments(["dev", "prod"])
    }

    fn has(list: &[String], needle: &str) -> bool {
        list.iter().any(|m| m.contains(needle))
    }

    // ── whole document ───────────────────────────────────────────────────────

    #[test]
    fn valid_project_has_no_findings() {
        let report = SchemaValidator::validate(&valid_project());
        assert!(report.valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn empty_document_reports_every_required_field_in_order() {
        let report = SchemaValidator::validate(&ProjectDescription::default());
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            [
                "projectName is required",
                "domain is required",
                "owner is required",
                "modules array is required",
            ]
        );
        assert!(has(&report.warnings, "environments"));
    }

    #[test]
    fn validation_does_not_mutate_input() {
        let project = valid_project();
        let before = project.clone();
        let _ = SchemaValidator::validate(&project);
        assert_eq!(project, before);
    }

    // ── projectName ──────────────────────────────────────────────────────────

    #[test]
    fn empty_project_name_is_required() {
        let mut project = valid_project();
        project.project_name = Some(String::new());
        let report = SchemaValidator::validate(&project);
        assert!(has(&report.errors, "projectName is required"));
    }

    #[test]
    fn project_name_grammar() {
        for bad in ["1shop", "-shop", "my shop", "shop!", "a".repeat(101).as_str()] {
            let mut project = valid_project();
            project.project_name = Some(bad.to_string());
            let report = SchemaValidator::validate(&project);
            assert!(has(&report.errors, "projectName"), "accepted: {bad}");
        }
        for good in ["a", "My_Shop-2", "a".repeat(100).as_str()] {
            let mut project = valid_project();
            project.project_name = Some(good.to_string());
            assert!(SchemaValidator::validate(&project).valid, "rejected: {good}");
        }
    }

    // ── domain ───────────────────────────────────────────────────────────────

    #[test]
    fn domain_grammar() {
        for bad in ["localhost", "exa mple.com", "-bad.com", "bad-.com", "example.c", "x.123"] {
            let mut project = valid_project();
            project.domain = Some(bad.to_string());
            let report = SchemaValidator::validate(&project);
            assert!(has(&report.errors, "domain must be a valid"), "accepted: {bad}");
        }
        for good in ["example.com", "Sub.Example.CO.uk", "a-b.io", "x1.dev"] {
            let mut project = valid_project();
            project.domain = Some(good.to_string());
            assert!(SchemaValidator::validate(&project).valid, "rejected: {good}");
        }
    }

    #[test]
    fn overlong_domain_reports_length_even_with_valid_labels() {
        let label = "a".repeat(50);
        let domain = format!("{label}.{label}.{label}.{label}.{label}.com");
        assert!(domain.len() > DOMAIN_MAX_LEN);

        let mut project = valid_project();
        project.domain = Some(domain);
        let report = SchemaValidator::validate(&project);
        assert!(has(&report.errors, "domain must not exceed 253 characters"));
        assert!(!has(&report.errors, "labels"));
    }

    #[test]
    fn overlong_label_reports_grammar_and_label_errors() {
        let mut project = valid_project();
        project.domain = Some(format!("{}.com", "a".repeat(64)));
        let report = SchemaValidator::validate(&project);
        assert!(has(&report.errors, "domain must be a valid"));
        assert!(has(&report.errors, "domain labels must not exceed 63"));
    }

    #[test]
    fn label_of_exactly_63_characters_is_accepted() {
        let mut project = valid_project();
        project.domain = Some(format!("{}.com", "a".repeat(DOMAIN_LABEL_MAX_LEN)));
        let report = SchemaValidator::validate(&project);
        assert!(report.valid, "{:?}", report.errors);
    }

    #[test]
    fn top_level_domain_length_bounds() {
        let mut project = valid_project();
        project.domain = Some(format!("example.{}", "a".repeat(24)));
        assert!(SchemaValidator::validate(&project).valid);

        project.domain = Some(format!("example.{}", "a".repeat(25)));
        let report = SchemaValidator::validate(&project);
        assert!(has(&report.errors, "domain must be a valid"));
        assert!(!has(&report.errors, "labels"));
    }

    // ── owner ────────────────────────────────────────────────────────────────

    #[test]
    fn owner_grammar_and_length() {
        let mut project = valid_project();
        project.owner = Some("not-an-email".into());
        assert!(has(
            &SchemaValidator::validate(&project).errors,
            "owner must be a valid email"
        ));

        project.owner = Some(format!("{}@example.com", "a".repeat(250)));
        let report = SchemaValidator::validate(&project);
        assert!(has(&report.errors, "owner must not exceed 254"));
    }

    #[test]
    fn owner_accepts_plus_addressing() {
        let mut project = valid_project();
        project.owner = Some("first.last+tag@mail.example.org".into());
        assert!(SchemaValidator::validate(&project).valid);
    }

    // ── modules ──────────────────────────────────────────────────────────────

    #[test]
    fn empty_modules_is_valid_with_warning() {
        let mut project = valid_project();
        project.modules = Some(Vec::new());
        let report = SchemaValidator::validate(&project);
        assert!(report.valid);
        assert!(has(&report.warnings, "empty"));
    }

    #[test]
    fn missing_code_module_is_a_warning() {
        let project = ProjectDescription::new("shop", "shop.dev", "a@shop.dev")
            .with_module(ModuleDescription::new(ModuleKind::Provider, "aws", "cloud"))
            .with_environments(["dev"]);
        let report = SchemaValidator::validate(&project);
        assert!(report.valid);
        assert!(has(&report.warnings, "No code modules"));
    }

    #[test]
    fn module_errors_are_indexed() {
        let project = valid_project().with_module(ModuleDescription::default());
        let report = SchemaValidator::validate(&project);
        assert!(!report.valid);
        assert!(has(&report.errors, "modules[1].kind is required"));
        assert!(has(&report.errors, "modules[1].type is required"));
        assert!(has(&report.errors, "modules[1].moduleId is required"));
        assert!(!has(&report.errors, "modules[0]"));
    }

    #[test]
    fn unknown_kind_names_the_closed_set() {
        let module = ModuleDescription {
            kind: Some("plugin".into()),
            module_type: Some("x".into()),
            module_id: Some("x".into()),
            ..Default::default()
        };
        let errors = SchemaValidator::validate_module(&module, 0);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("code, extension, provider, vcs"));
        assert!(errors[0].contains("'plugin'"));
    }

    #[test]
    fn module_id_hyphen_rules() {
        for bad in ["api-", "my--api", "a--", "api---v2"] {
            let module = ModuleDescription::new(ModuleKind::Code, "fastapi", bad);
            let errors = SchemaValidator::validate_module(&module, 3);
            assert!(
                errors.iter().any(|e| e.contains("modules[3].moduleId")),
                "accepted: {bad}"
            );
        }
    }

    #[test]
    fn module_id_grammar() {
        for bad in ["Api", "1api", "api_v2", "a".repeat(101).as_str()] {
            let module = ModuleDescription::new(ModuleKind::Code, "fastapi", bad);
            assert!(
                !SchemaValidator::validate_module(&module, 0).is_empty(),
                "accepted: {bad}"
            );
        }
        for good in ["a", "api-v2", "web3", "a".repeat(100).as_str()] {
            let module = ModuleDescription::new(ModuleKind::Code, "fastapi", good);
            assert!(
                SchemaValidator::validate_module(&module, 0).is_empty(),
                "rejected: {good}"
            );
        }
    }

    #[test]
    fn duplicate_module_ids_warn_without_failing() {
        let project = valid_project()
            .with_module(ModuleDescription::new(ModuleKind::Code, "fastapi", "web"));
        let report = SchemaValidator::validate(&project);
        assert!(report.valid);
        assert!(has(&report.warnings, "modules[1].moduleId 'web' duplicates modules[0]"));
    }

    // ── environments ─────────────────────────────────────────────────────────

    #[test]
    fn missing_environments_is_only_a_warning() {
        let mut project = valid_project();
        project.environments = None;
        let report = SchemaValidator::validate(&project);
        assert!(report.valid);
        assert!(has(&report.warnings, "environments"));
    }
}
