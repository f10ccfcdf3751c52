//! Token-document parsing and normalization.
//!
//! Documents arrive in two dialects: W3C-style `$value`/`$type`/
//! `$description` keys and the bare `value`/`type`/`description`
//! spelling. Both normalize to the canonical [`Token`] record here, in
//! exactly one place; the validators never see the difference.

use serde_json::Value as Json;
use thiserror::Error;

use crate::token::{Token, TokenScope, TokenType, TokenValue};

/// Token-document parse failure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document root is not an object.
    #[error("token document root must be an object")]
    RootNotObject,
    /// A leaf value has a shape no token type uses.
    #[error("token `{path}` has an unsupported value shape")]
    BadValue {
        /// Path of the offending token.
        path: String,
    },
}

/// Parses a token document into canonical tokens for one scope.
///
/// Groups nest arbitrarily; a node with a `$value`/`value` key is a
/// leaf. Group-level `$type` is inherited by leaves that declare none;
/// a leaf with no type anywhere is treated as `string`. Path segments
/// join with `.`. Bare scalar and array entries are accepted as
/// shorthand leaves.
///
/// # Errors
///
/// Returns [`LoadError`] on malformed JSON, a non-object root, or a
/// value shape no token uses.
pub fn parse_document(input: &str, scope: &TokenScope) -> Result<Vec<Token>, LoadError> {
    let root: Json = serde_json::from_str(input)?;
    let Json::Object(map) = root else {
        return Err(LoadError::RootNotObject);
    };

    let mut tokens = Vec::new();
    walk_group(&map, "", None, scope, &mut tokens)?;
    tracing::debug!(count = tokens.len(), scope = %scope, "parsed token document");
    Ok(tokens)
}

fn walk_group(
    group: &serde_json::Map<String, Json>,
    prefix: &str,
    inherited_type: Option<&str>,
    scope: &TokenScope,
    out: &mut Vec<Token>,
) -> Result<(), LoadError> {
    let group_type = dual_key_str(group, "$type", "type").or(inherited_type);

    for (key, node) in group {
        if key.starts_with('$') {
            continue;
        }

        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match node {
            Json::Object(obj) if is_leaf(obj) => {
                out.push(build_leaf(obj, path, group_type, scope)?);
            }
            Json::Object(obj) => {
                // "type"/"value" spelled as group names would shadow the
                // dual keys; real documents do not do this.
                walk_group(obj, &path, group_type, scope, out)?;
            }
            // Shorthand leaf: "primary": "#3b82f6"
            other => {
                let value = token_value(other).ok_or(LoadError::BadValue { path: path.clone() })?;
                out.push(Token {
                    path,
                    kind: leaf_type(None, group_type),
                    value,
                    scope: scope.clone(),
                    description: None,
                });
            }
        }
    }

    Ok(())
}

fn is_leaf(obj: &serde_json::Map<String, Json>) -> bool {
    obj.contains_key("$value") || obj.contains_key("value")
}

fn build_leaf(
    obj: &serde_json::Map<String, Json>,
    path: String,
    inherited_type: Option<&str>,
    scope: &TokenScope,
) -> Result<Token, LoadError> {
    let raw = dual_key(obj, "$value", "value").ok_or(LoadError::BadValue { path: path.clone() })?;
    let value = token_value(raw).ok_or(LoadError::BadValue { path: path.clone() })?;

    let declared = dual_key_str(obj, "$type", "type");
    let description = dual_key_str(obj, "$description", "description").map(ToString::to_string);

    Ok(Token {
        path,
        kind: leaf_type(declared, inherited_type),
        value,
        scope: scope.clone(),
        description,
    })
}

fn leaf_type(declared: Option<&str>, inherited: Option<&str>) -> TokenType {
    declared
        .or(inherited)
        .map_or(TokenType::String, TokenType::from)
}

fn dual_key<'a>(obj: &'a serde_json::Map<String, Json>, dollar: &str, bare: &str) -> Option<&'a Json> {
    obj.get(dollar).or_else(|| obj.get(bare))
}

fn dual_key_str<'a>(
    obj: &'a serde_json::Map<String, Json>,
    dollar: &str,
    bare: &str,
) -> Option<&'a str> {
    dual_key(obj, dollar, bare).and_then(Json::as_str)
}

fn token_value(json: &Json) -> Option<TokenValue> {
    match json {
        Json::Number(n) => n.as_f64().map(TokenValue::Number),
        Json::String(s) => Some(TokenValue::Text(s.clone())),
        Json::Array(items) => {
            if let Some(strings) = items
                .iter()
                .map(|i| i.as_str().map(ToString::to_string))
                .collect::<Option<Vec<String>>>()
            {
                return Some(TokenValue::Strings(strings));
            }
            items
                .iter()
                .map(Json::as_f64)
                .collect::<Option<Vec<f64>>>()
                .map(TokenValue::Numbers)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Token> {
        parse_document(input, &TokenScope::Global).expect("parse")
    }

    #[test]
    fn dollar_and_bare_keys_normalize_identically() {
        let dollar = parse(
            r##"{
                "color": {
                    "primary": {
                        "500": { "$value": "#3b82f6", "$type": "color", "$description": "Primary" }
                    }
                }
            }"##,
        );
        let bare = parse(
            r##"{
                "color": {
                    "primary": {
                        "500": { "value": "#3b82f6", "type": "color", "description": "Primary" }
                    }
                }
            }"##,
        );

        assert_eq!(dollar, bare);
        assert_eq!(dollar.len(), 1);
        assert_eq!(dollar[0].path, "color.primary.500");
        assert_eq!(dollar[0].kind, TokenType::Color);
        assert_eq!(dollar[0].description.as_deref(), Some("Primary"));
    }

    #[test]
    fn group_type_inherited_by_untyped_leaves() {
        let tokens = parse(
            r#"{
                "spacing": {
                    "$type": "dimension",
                    "sm": { "$value": "8px" },
                    "md": { "$value": "16px", "$type": "dimension" },
                    "label": { "$value": "roomy", "$type": "string" }
                }
            }"#,
        );

        let sm = tokens.iter().find(|t| t.path == "spacing.sm").expect("sm");
        assert_eq!(sm.kind, TokenType::Dimension);
        let label = tokens.iter().find(|t| t.path == "spacing.label").expect("label");
        assert_eq!(label.kind, TokenType::String);
    }

    #[test]
    fn untyped_leaf_defaults_to_string() {
        let tokens = parse(r#"{ "misc": { "note": { "$value": "hello" } } }"#);
        assert_eq!(tokens[0].kind, TokenType::String);
    }

    #[test]
    fn shorthand_scalar_leaves() {
        let tokens = parse(
            r##"{
                "color": {
                    "$type": "color",
                    "primary": "#3b82f6",
                    "secondary": "#10b981"
                }
            }"##,
        );
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| t.kind == TokenType::Color));
    }

    #[test]
    fn list_values_parse() {
        let tokens = parse(
            r#"{
                "font": {
                    "stack": { "$value": ["Inter", "sans-serif"], "$type": "font-family" },
                    "ease": { "$value": [0.4, 0, 0.2, 1], "$type": "cubic-bezier" }
                }
            }"#,
        );
        assert_eq!(
            tokens.iter().find(|t| t.path == "font.stack").expect("stack").value,
            TokenValue::Strings(vec!["Inter".into(), "sans-serif".into()])
        );
        assert_eq!(
            tokens.iter().find(|t| t.path == "font.ease").expect("ease").value,
            TokenValue::Numbers(vec![0.4, 0.0, 0.2, 1.0])
        );
    }

    #[test]
    fn scope_is_applied() {
        let tokens = parse_document(
            r#"{ "a": { "b": { "$value": "x" } } }"#,
            &TokenScope::brand("acme"),
        )
        .expect("parse");
        assert_eq!(tokens[0].scope, TokenScope::brand("acme"));
    }

    #[test]
    fn malformed_documents_error() {
        assert!(matches!(
            parse_document("[1, 2]", &TokenScope::Global),
            Err(LoadError::RootNotObject)
        ));
        assert!(matches!(
            parse_document("not json", &TokenScope::Global),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            parse_document(
                r#"{ "a": { "b": { "$value": true } } }"#,
                &TokenScope::Global
            ),
            Err(LoadError::BadValue { .. })
        ));
    }
}
