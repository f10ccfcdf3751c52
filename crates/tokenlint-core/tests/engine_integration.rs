//! End-to-end engine tests: document loading, batch validation,
//! contrast analysis, rule cascade, and inheritance resolution working
//! together the way adapters drive them.

use tokenlint_core::{
    analyze_contrast, loader, resolve_brand_tokens, resolve_rules, Config, IssueCode, SourceError,
    TextSize, Token, TokenScope, TokenSource, TokenType, TokenValue, Validator, WcagLevel,
};

const GLOBAL_DOC: &str = r##"{
    "color": {
        "$type": "color",
        "primary": {
            "500": { "$value": "#3b82f6", "$description": "Primary brand blue" }
        },
        "text": { "$value": "{color.primary.500}" }
    },
    "spacing": {
        "$type": "dimension",
        "sm": { "$value": "8px" },
        "md": { "$value": "16px" }
    },
    "motion": {
        "quick": { "$value": "150ms", "$type": "duration" },
        "ease": { "$value": [0.4, 0, 0.2, 1], "$type": "cubic-bezier" }
    }
}"##;

#[test]
fn loaded_document_validates_clean() {
    let tokens = loader::parse_document(GLOBAL_DOC, &TokenScope::Global).expect("parse");
    assert_eq!(tokens.len(), 6);

    let report = Validator::with_defaults().validate_batch(&tokens);
    assert_eq!(report.summary.total, 6);
    assert_eq!(report.summary.invalid, 0, "{:?}", report.results);
}

#[test]
fn bad_document_reports_every_finding_once() {
    let doc = r#"{
        "Spacing": {
            "$type": "dimension",
            "wide": { "$value": "16pt" }
        },
        "color": {
            "lost": { "$value": "{color.gone}", "$type": "color" }
        }
    }"#;

    let tokens = loader::parse_document(doc, &TokenScope::Global).expect("parse");
    let report = Validator::with_defaults().validate_batch(&tokens);

    let codes: Vec<IssueCode> = report.issues().map(|i| i.code).collect();
    assert!(codes.contains(&IssueCode::InvalidSegment));
    assert!(codes.contains(&IssueCode::InvalidDimensionFormat));
    assert!(codes.contains(&IssueCode::BrokenReference));
    assert_eq!(report.summary.invalid, 2);
}

struct DocSource;

impl TokenSource for DocSource {
    fn brand_tokens(&self, brand: &str) -> Result<Vec<Token>, SourceError> {
        let doc = match brand {
            "acme" => r##"{ "color": { "primary": { "500": { "$value": "#8b5cf6", "$type": "color" } } } }"##,
            "globex" => "{}",
            other => return Err(SourceError::UnknownBrand(other.to_string())),
        };
        loader::parse_document(doc, &TokenScope::brand(brand))
            .map_err(|e| SourceError::Backend(e.to_string()))
    }

    fn project_tokens(&self, project: &str) -> Result<Vec<Token>, SourceError> {
        let doc = r##"{ "color": { "primary": { "500": { "$value": "#10b981", "$type": "color" } } } }"##;
        loader::parse_document(doc, &TokenScope::project(project))
            .map_err(|e| SourceError::Backend(e.to_string()))
    }

    fn global_tokens(&self) -> Result<Vec<Token>, SourceError> {
        loader::parse_document(GLOBAL_DOC, &TokenScope::Global)
            .map_err(|e| SourceError::Backend(e.to_string()))
    }

    fn project_of(&self, _brand: &str) -> Result<Option<String>, SourceError> {
        Ok(Some("web".to_string()))
    }
}

#[test]
fn inheritance_resolution_across_tiers() {
    let acme = resolve_brand_tokens(&DocSource, "acme").expect("resolve");
    let primary = acme.get("color.primary.500").expect("present");
    assert_eq!(primary.value, TokenValue::from("#8b5cf6"));
    assert_eq!(primary.source_level.to_string(), "brand");

    // Sibling brand without the override falls to the project tier.
    let globex = resolve_brand_tokens(&DocSource, "globex").expect("resolve");
    let primary = globex.get("color.primary.500").expect("present");
    assert_eq!(primary.value, TokenValue::from("#10b981"));
    assert_eq!(primary.source_level.to_string(), "project");

    // Globals not overridden anywhere survive with their own tier.
    let spacing = globex.get("spacing.md").expect("present");
    assert_eq!(spacing.source_level.to_string(), "global");

    // The surviving alias is flagged, not chased.
    let text = globex.get("color.text").expect("present");
    assert!(text.is_alias());
}

#[test]
fn resolved_set_revalidates_clean() {
    let set = resolve_brand_tokens(&DocSource, "acme").expect("resolve");
    let flat = set.to_tokens();
    let report = Validator::with_defaults().validate_batch(&flat);
    assert_eq!(report.summary.invalid, 0, "{:?}", report.results);
}

#[test]
fn config_rules_cascade_drives_validation() {
    let config = Config::parse(
        r"
[rules.types]
strict = true

[brands.print.rules.types]
strict = false
",
    )
    .expect("config");

    let tokens = vec![Token::new("size.page", TokenType::Dimension, "16pt")];

    // Global rules: bad unit is an error.
    let global_rules = resolve_rules(&config, None, None);
    let report = Validator::new(global_rules).validate_batch(&tokens);
    assert_eq!(report.summary.invalid, 1);

    // Brand-level non-strict rules: same token demotes to a warning.
    let brand_rules = resolve_rules(&config, None, Some("print"));
    let report = Validator::new(brand_rules).validate_batch(&tokens);
    assert_eq!(report.summary.invalid, 0);
    assert_eq!(report.summary.with_warnings, 1);
}

#[test]
fn contrast_properties_hold() {
    let policy = tokenlint_core::ContrastPolicy::default();

    let black_on_white =
        analyze_contrast("#000000", "#FFFFFF", TextSize::Normal, &policy).expect("report");
    assert!((black_on_white.wcag.ratio - 21.0).abs() < 1e-6);
    assert_eq!(black_on_white.wcag.level, WcagLevel::Aaa);

    let white_on_black =
        analyze_contrast("#FFFFFF", "#000000", TextSize::Normal, &policy).expect("report");
    assert!(black_on_white.apca.lc > 0.0);
    assert!(white_on_black.apca.lc < 0.0);
    assert_eq!(black_on_white.apca.band, white_on_black.apca.band);
    assert_eq!(black_on_white.recommended.to_string(), "dark-on-light");
    assert_eq!(white_on_black.recommended.to_string(), "light-on-dark");
}
