// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Record submission model built from one decoded domain file.
//! Extraction is kept pure so the rule engine never touches raw JSON shapes.

use serde_json::Value;

/// Field names that may carry the routing target, in lookup priority order.
pub const TARGET_ALIASES: [&str; 9] = [
    "content", "value", "target", "url", "cname", "ip", "ipv6", "txt", "mx",
];

/// Record kinds accepted by the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Redirect,
}

impl RecordType {
    pub const ALL: [RecordType; 6] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Txt,
        Self::Mx,
        Self::Redirect,
    ];

    /// Look up an already upper-cased type token.
    pub fn from_canonical(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Self::A),
            "AAAA" => Some(Self::Aaaa),
            "CNAME" => Some(Self::Cname),
            "TXT" => Some(Self::Txt),
            "MX" => Some(Self::Mx),
            "REDIRECT" => Some(Self::Redirect),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Mx => "MX",
            Self::Redirect => "REDIRECT",
        }
    }

    /// Comma-separated list of every accepted kind, for messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(RecordType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The `type` field as written by the submitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredType {
    /// Text exactly as declared, used when echoing it back.
    pub raw: String,
    /// Upper-cased form used for every comparison.
    pub canonical: String,
    /// `None` when the canonical form is not an accepted kind.
    pub kind: Option<RecordType>,
}

impl DeclaredType {
    fn new(raw: String) -> Self {
        let canonical = raw.to_uppercase();
        let kind = RecordType::from_canonical(&canonical);
        Self {
            raw,
            canonical,
            kind,
        }
    }
}

/// Ownership contact block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Owner {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Owner {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                username: map.get("username").and_then(present_text),
                email: map.get("email").and_then(present_text),
            },
            _ => Self::default(),
        }
    }
}

/// One submitted subdomain record, read once and then discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSubmission {
    pub label: String,
    pub declared_type: DeclaredType,
    pub target: Option<String>,
    pub owner: Option<Owner>,
    /// Raw `priority` value; an explicit `null` still counts as declared.
    pub priority: Option<Value>,
}

impl RecordSubmission {
    /// Extract the fields the rule engine cares about from a decoded document.
    ///
    /// Returns `None` when no `type` is declared; nothing else is read in that
    /// case. Non-object documents never declare a type.
    pub fn from_document(label: &str, document: &Value) -> Option<Self> {
        let field = |name: &str| document.get(name);
        let declared_type = field("type").and_then(present_text).map(DeclaredType::new)?;

        Some(Self {
            label: label.to_string(),
            declared_type,
            target: resolve_target(document),
            owner: field("owner")
                .filter(|v| present_text(v).is_some())
                .map(Owner::from_value),
            priority: field("priority").cloned(),
        })
    }

    pub fn record_type(&self) -> Option<RecordType> {
        self.declared_type.kind
    }

    pub fn has_username(&self) -> bool {
        self.owner.as_ref().is_some_and(|o| o.username.is_some())
    }

    pub fn has_email(&self) -> bool {
        self.owner.as_ref().is_some_and(|o| o.email.is_some())
    }
}

/// Probe [`TARGET_ALIASES`] in order and return the first present value.
pub fn resolve_target(document: &Value) -> Option<String> {
    TARGET_ALIASES
        .iter()
        .find_map(|name| document.get(*name).and_then(present_text))
}

/// Text form of a value that counts as present.
///
/// `null`, `false`, numeric zero and the empty string count as absent.
/// Strings are returned verbatim, other values as their JSON text.
pub fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
