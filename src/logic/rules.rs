// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Tiered rule engine for subdomain record submissions.
//!
//! Responsibilities:
//! - Check the label grammar and the declared record type for every tier.
//! - Resolve the routing target from its accepted field aliases.
//! - Apply the policy group selected by the tier (warnings at `loose`,
//!   errors at `normal`, plus target grammars at `strict`).
//!
//! Everything here is pure: findings are returned as data and evaluation
//! order is fixed, so callers may assert on message order.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::models::{Findings, RecordSubmission, RecordType, ValidationTier};
use crate::utils::is_valid_label;

/// Labels kept for infrastructure and official use.
pub const RESERVED_LABELS: [&str; 21] = [
    "www", "api", "blog", "mail", "smtp", "pop", "imap", "support", "admin", "root", "status",
    "billing", "cdn", "test", "dev", "staging", "prod", "official", "security", "ns1", "ns2",
];

/// Substrings that may not appear anywhere in a label (case-sensitive).
pub const BLOCKED_KEYWORDS: [&str; 11] = [
    "porn", "sex", "casino", "gambling", "viagra", "hack", "phishing", "scam", "spam", "vpn",
    "proxy",
];

/// Four dot-separated groups of 1-3 digits. Octet ranges are not checked.
static IPV4_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern is valid")
});

/// Hex digits and colons only. Compression and segment count are not checked.
static IPV6_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F:]+$").expect("IPv6 pattern is valid"));

/// A rule group appends findings for one submission.
type RuleGroup = fn(&RecordSubmission, &mut Findings);

const LOOSE_RULES: &[RuleGroup] = &[loose_rules];
const NORMAL_RULES: &[RuleGroup] = &[policy_rules];
const STRICT_RULES: &[RuleGroup] = &[policy_rules, strict_rules];

/// Rule groups applied after the tier-independent checks, in evaluation order.
pub fn rule_groups(tier: ValidationTier) -> &'static [RuleGroup] {
    match tier {
        ValidationTier::Loose => LOOSE_RULES,
        ValidationTier::Normal => NORMAL_RULES,
        ValidationTier::Strict => STRICT_RULES,
    }
}

/// Validate one decoded submission at the given tier.
///
/// The label check always runs first. A document without a `type` stops
/// right after it with a single "missing type" error and no warnings; every
/// other anomaly is collected and evaluation continues.
///
/// # Examples
///
/// ```rust,ignore
/// let findings = validate("test", &json!({"type": "A", "content": "1.2.3.4"}), ValidationTier::Normal);
/// assert_eq!(findings.errors.len(), 2);
/// ```
pub fn validate(label: &str, document: &Value, tier: ValidationTier) -> Findings {
    let mut findings = Findings::default();

    check_label(label, &mut findings);

    let Some(submission) = RecordSubmission::from_document(label, document) else {
        findings.error(format!(
            "Missing \"type\" field. Allowed: {}.",
            RecordType::allowed_list()
        ));
        return findings;
    };

    check_type(&submission, &mut findings);
    check_target(&submission, &mut findings);

    for group in rule_groups(tier) {
        group(&submission, &mut findings);
    }

    findings
}

/// Label grammar, independent of tier.
pub fn check_label(label: &str, findings: &mut Findings) {
    if !is_valid_label(label) {
        findings.error(
            "Invalid subdomain format. Allowed: lowercase letters, numbers, hyphens. No start/end hyphens. Length 1-63.",
        );
    }
}

/// Declared type must be one of the accepted record kinds.
pub fn check_type(submission: &RecordSubmission, findings: &mut Findings) {
    if submission.record_type().is_none() {
        findings.error(format!(
            "Invalid type \"{}\". Allowed: {}.",
            submission.declared_type.raw,
            RecordType::allowed_list()
        ));
    }
}

/// Some alias must carry a routing target.
pub fn check_target(submission: &RecordSubmission, findings: &mut Findings) {
    if submission.target.is_none() {
        findings.error(format!(
            "Missing routing target for type {}. Please provide a target value (e.g., \"content\": \"...\").",
            submission.declared_type.canonical
        ));
    }
}

/// `loose`: reserved labels and missing ownership are tolerated with a warning.
pub fn loose_rules(submission: &RecordSubmission, findings: &mut Findings) {
    if is_reserved(&submission.label) {
        findings.warn("Warning: This subdomain is reserved. (Allowed in loose mode)");
    }
    if !submission.has_username() {
        findings.warn("Warning: Missing \"owner.username\". (Allowed in loose mode)");
    }
}

/// `normal` and above: naming policy, ownership and redirect scheme are enforced.
pub fn policy_rules(submission: &RecordSubmission, findings: &mut Findings) {
    let label = submission.label.as_str();

    if is_reserved(label) {
        findings.error(format!(
            "The subdomain \"{label}\" is reserved for official use."
        ));
    }
    if contains_blocked_keyword(label) {
        findings.error("Subdomain contains forbidden keywords (Policy Violation).");
    }
    if !submission.has_username() {
        findings.error("Missing \"owner.username\" field. Please provide your GitHub username.");
    }

    if submission.record_type() == Some(RecordType::Redirect)
        && let Some(target) = submission.target.as_deref()
    {
        match Url::parse(target) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(_) => findings.error("Redirect URL must start with http:// or https://"),
            Err(_) => findings.error(format!("Invalid Redirect URL format: \"{target}\"")),
        }
    }
}

/// `strict` only: contact email and per-type target shape.
pub fn strict_rules(submission: &RecordSubmission, findings: &mut Findings) {
    let Some(target) = submission.target.as_deref() else {
        return;
    };

    if !submission.has_email() {
        findings.error("Missing \"owner.email\" field (Required in strict mode).");
    }

    match submission.record_type() {
        Some(RecordType::A) => {
            if !IPV4_SHAPE.is_match(target) {
                findings.error(format!(
                    "Type \"A\" requires a valid IPv4 address. Got: \"{target}\""
                ));
            }
        }
        Some(RecordType::Aaaa) => {
            if !IPV6_SHAPE.is_match(target) || !target.contains(':') {
                findings.error(format!(
                    "Type \"AAAA\" requires a valid IPv6 address. Got: \"{target}\""
                ));
            }
        }
        Some(RecordType::Cname) => {
            if looks_like_url(target) {
                findings.error(format!(
                    "Invalid CNAME target: \"{target}\". It must be a domain name, not a URL."
                ));
            }
        }
        Some(RecordType::Mx) => {
            if looks_like_url(target) {
                findings.error(format!(
                    "Invalid MX target: \"{target}\". It must be a mail server domain, not a URL."
                ));
            }
            if submission.priority.is_none() {
                findings.warn(
                    "Warning: Missing \"priority\" field for MX record. Will automatically default to 10 in deployment.",
                );
            }
        }
        _ => {}
    }
}

pub fn is_reserved(label: &str) -> bool {
    RESERVED_LABELS.contains(&label)
}

pub fn contains_blocked_keyword(label: &str) -> bool {
    BLOCKED_KEYWORDS.iter().any(|kw| label.contains(kw))
}

fn looks_like_url(target: &str) -> bool {
    target.contains("://") || target.contains('/')
}

#[cfg(test)]
mod tests {
    use super::{
        RESERVED_LABELS, contains_blocked_keyword, loose_rules, policy_rules, rule_groups,
        strict_rules, validate,
    };
    use crate::models::{Findings, RecordSubmission, ValidationTier};
    use serde_json::{Value, json};

    const ALL_TIERS: [ValidationTier; 3] = [
        ValidationTier::Loose,
        ValidationTier::Normal,
        ValidationTier::Strict,
    ];

    fn complete_owner() -> Value {
        json!({"username": "octo", "email": "octo@example.com"})
    }

    fn submission(label: &str, doc: Value) -> RecordSubmission {
        RecordSubmission::from_document(label, &doc).unwrap()
    }

    // A missing type yields exactly one error and no warnings, whatever else is set.
    #[test]
    fn validate_stops_at_missing_type_for_every_tier() {
        let doc = json!({"content": "1.2.3.4", "owner": {"username": "x"}, "ip": "nope"});
        for tier in ALL_TIERS {
            let findings = validate("test", &doc, tier);
            assert_eq!(
                findings.errors,
                vec!["Missing \"type\" field. Allowed: A, AAAA, CNAME, TXT, MX, REDIRECT."],
                "tier {tier}"
            );
            assert!(findings.warnings.is_empty(), "tier {tier}");
        }
    }

    // The label check runs before the type check and is kept alongside it.
    #[test]
    fn validate_reports_label_error_before_missing_type() {
        let findings = validate("-bad", &json!({}), ValidationTier::Strict);
        assert_eq!(findings.errors.len(), 2);
        assert!(findings.errors[0].starts_with("Invalid subdomain format."));
        assert!(findings.errors[1].starts_with("Missing \"type\" field."));
    }

    // Label grammar violations are errors in every tier.
    #[test]
    fn validate_flags_label_grammar_in_all_tiers() {
        let doc = json!({"type": "TXT", "txt": "hello", "owner": complete_owner()});
        let long = "a".repeat(64);
        for tier in ALL_TIERS {
            for label in ["MyApp", "-app", "app-", long.as_str()] {
                let findings = validate(label, &doc, tier);
                assert!(
                    findings
                        .errors
                        .iter()
                        .any(|e| e.starts_with("Invalid subdomain format.")),
                    "label {label} tier {tier}"
                );
            }
        }
    }

    #[test]
    fn validate_rejects_unknown_type_but_keeps_checking() {
        let findings = validate(
            "myapp",
            &json!({"type": "srv", "owner": complete_owner()}),
            ValidationTier::Normal,
        );
        assert_eq!(
            findings.errors,
            vec![
                "Invalid type \"srv\". Allowed: A, AAAA, CNAME, TXT, MX, REDIRECT.".to_string(),
                "Missing routing target for type SRV. Please provide a target value (e.g., \"content\": \"...\").".to_string(),
            ]
        );
    }

    // Type matching is case-insensitive.
    #[test]
    fn validate_accepts_lowercase_type() {
        let findings = validate(
            "myapp",
            &json!({"type": "cname", "cname": "host.example.net", "owner": complete_owner()}),
            ValidationTier::Strict,
        );
        assert_eq!(findings, Findings::default());
    }

    // Scenario: reserved label with no owner is only a warning when loose.
    #[test]
    fn loose_tier_warns_for_reserved_label_and_missing_owner() {
        let doc = json!({"type": "A", "content": "1.2.3.4"});
        let findings = validate("test", &doc, ValidationTier::Loose);
        assert!(findings.errors.is_empty());
        assert_eq!(
            findings.warnings,
            vec![
                "Warning: This subdomain is reserved. (Allowed in loose mode)",
                "Warning: Missing \"owner.username\". (Allowed in loose mode)",
            ]
        );
    }

    // Scenario: the same document fails at normal with both findings promoted.
    #[test]
    fn normal_tier_promotes_loose_warnings_to_errors() {
        let doc = json!({"type": "A", "content": "1.2.3.4"});
        let findings = validate("test", &doc, ValidationTier::Normal);
        assert!(findings.warnings.is_empty());
        assert_eq!(
            findings.errors,
            vec![
                "The subdomain \"test\" is reserved for official use.",
                "Missing \"owner.username\" field. Please provide your GitHub username.",
            ]
        );
    }

    // Conditions that block at normal also block at strict.
    #[test]
    fn strict_tier_keeps_every_normal_error() {
        let doc = json!({"type": "A", "content": "1.2.3.4"});
        let normal = validate("hackers", &doc, ValidationTier::Normal);
        let strict = validate("hackers", &doc, ValidationTier::Strict);
        for error in &normal.errors {
            assert!(strict.errors.contains(error), "{error}");
        }
        assert!(strict.errors.len() > normal.errors.len());
    }

    #[test]
    fn normal_tier_blocks_keywords_anywhere_in_label() {
        assert!(contains_blocked_keyword("myvpnbox"));
        assert!(contains_blocked_keyword("casino"));
        assert!(!contains_blocked_keyword("myapp"));

        let findings = validate(
            "freeproxy-list",
            &json!({"type": "CNAME", "content": "x.example.org", "owner": {"username": "a"}}),
            ValidationTier::Normal,
        );
        assert_eq!(
            findings.errors,
            vec!["Subdomain contains forbidden keywords (Policy Violation)."]
        );
    }

    // Scenario: the coarse IPv4 shape accepts out-of-range octets.
    #[test]
    fn strict_tier_ipv4_check_is_shape_only() {
        let doc = json!({"type": "A", "content": "999.1.1.1", "owner": {"username": "x"}});
        let findings = validate("myapp", &doc, ValidationTier::Strict);
        assert_eq!(
            findings.errors,
            vec!["Missing \"owner.email\" field (Required in strict mode)."]
        );
        assert!(findings.warnings.is_empty());
    }

    #[test]
    fn strict_tier_rejects_malformed_ipv4() {
        let doc = json!({"type": "A", "ip": "1.2.3", "owner": complete_owner()});
        let findings = validate("myapp", &doc, ValidationTier::Strict);
        assert_eq!(
            findings.errors,
            vec!["Type \"A\" requires a valid IPv4 address. Got: \"1.2.3\""]
        );
    }

    // Scenario: non-http redirect schemes are rejected.
    #[test]
    fn strict_tier_rejects_ftp_redirect() {
        let doc = json!({
            "type": "REDIRECT",
            "url": "ftp://x.com",
            "owner": {"username": "a", "email": "a@b.com"}
        });
        let findings = validate("go", &doc, ValidationTier::Strict);
        assert_eq!(
            findings.errors,
            vec!["Redirect URL must start with http:// or https://"]
        );
    }

    #[test]
    fn normal_tier_rejects_unparseable_redirect() {
        let doc = json!({"type": "redirect", "url": "example.com/path", "owner": {"username": "a"}});
        let findings = validate("go", &doc, ValidationTier::Normal);
        assert_eq!(
            findings.errors,
            vec!["Invalid Redirect URL format: \"example.com/path\""]
        );

        let ok = json!({"type": "REDIRECT", "url": "https://example.com/", "owner": {"username": "a"}});
        assert!(validate("go", &ok, ValidationTier::Normal).passed());
    }

    // Loose never inspects redirect targets.
    #[test]
    fn loose_tier_ignores_redirect_scheme() {
        let doc = json!({"type": "REDIRECT", "url": "ftp://x.com", "owner": {"username": "a"}});
        assert!(validate("go", &doc, ValidationTier::Loose).passed());
    }

    // Scenario: MX without priority passes with a single warning.
    #[test]
    fn strict_tier_warns_for_mx_without_priority() {
        let doc = json!({
            "type": "MX",
            "content": "mail.example.com",
            "owner": {"username": "a", "email": "a@b.com"}
        });
        let findings = validate("postbox", &doc, ValidationTier::Strict);
        assert!(findings.errors.is_empty());
        assert_eq!(
            findings.warnings,
            vec!["Warning: Missing \"priority\" field for MX record. Will automatically default to 10 in deployment."]
        );

        let with_priority = json!({
            "type": "MX",
            "mx": "mail.example.com",
            "priority": 20,
            "owner": {"username": "a", "email": "a@b.com"}
        });
        assert_eq!(
            validate("postbox", &with_priority, ValidationTier::Strict),
            Findings::default()
        );
    }

    #[test]
    fn strict_tier_rejects_url_shaped_cname_and_mx() {
        let cname = submission(
            "myapp",
            json!({"type": "CNAME", "content": "https://host.example", "owner": complete_owner()}),
        );
        let mx = submission(
            "myapp",
            json!({"type": "MX", "content": "mail.example.com/inbox", "priority": 5, "owner": complete_owner()}),
        );

        let mut findings = Findings::default();
        strict_rules(&cname, &mut findings);
        strict_rules(&mx, &mut findings);
        assert_eq!(
            findings.errors,
            vec![
                "Invalid CNAME target: \"https://host.example\". It must be a domain name, not a URL.",
                "Invalid MX target: \"mail.example.com/inbox\". It must be a mail server domain, not a URL.",
            ]
        );
    }

    // The AAAA check only looks at the character set and requires a colon.
    #[test]
    fn strict_tier_ipv6_check_is_shape_only() {
        let owner = complete_owner();
        for (target, ok) in [
            ("2001:db8::1", true),
            (":::", true),
            ("deadbeef", false),
            ("2001:db8::g", false),
            ("::ffff:1.2.3.4", false),
        ] {
            let doc = json!({"type": "AAAA", "ipv6": target, "owner": owner.clone()});
            let findings = validate("myapp", &doc, ValidationTier::Strict);
            assert_eq!(findings.passed(), ok, "{target}");
        }
    }

    // Without a target the strict group adds nothing, not even the email check.
    #[test]
    fn strict_rules_skip_when_target_missing() {
        let sub = submission("myapp", json!({"type": "A", "owner": {"username": "a"}}));
        let mut findings = Findings::default();
        strict_rules(&sub, &mut findings);
        assert_eq!(findings, Findings::default());

        let full = validate("myapp", &json!({"type": "A", "owner": {"username": "a"}}), ValidationTier::Strict);
        assert_eq!(
            full.errors,
            vec!["Missing routing target for type A. Please provide a target value (e.g., \"content\": \"...\")."]
        );
    }

    // Loose warnings become errors at normal for every reserved label.
    #[test]
    fn reserved_labels_are_warning_then_error() {
        for label in RESERVED_LABELS {
            let sub = submission(label, json!({"type": "TXT", "txt": "v", "owner": {"username": "a"}}));

            let mut loose = Findings::default();
            loose_rules(&sub, &mut loose);
            assert_eq!(loose.warnings.len(), 1, "{label}");
            assert!(loose.errors.is_empty());

            let mut normal = Findings::default();
            policy_rules(&sub, &mut normal);
            assert_eq!(normal.errors.len(), 1, "{label}");
            assert!(normal.warnings.is_empty());
        }
    }

    // Target aliases resolve before tier rules, so the first alias is checked.
    #[test]
    fn validate_checks_first_alias_only() {
        let doc = json!({"type": "A", "content": "1.2.3.4", "ip": "not-an-ip", "owner": complete_owner()});
        assert!(validate("myapp", &doc, ValidationTier::Strict).passed());
    }

    #[test]
    fn rule_groups_grow_with_tier() {
        assert_eq!(rule_groups(ValidationTier::Loose).len(), 1);
        assert_eq!(rule_groups(ValidationTier::Normal).len(), 1);
        assert_eq!(rule_groups(ValidationTier::Strict).len(), 2);
    }
}
