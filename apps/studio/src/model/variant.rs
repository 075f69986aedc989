//! Closed per-kind template variant sets.
//!
//! Variant keys arrive from the host as strings (persisted preferences, URL
//! params). Parsing an unknown key falls back to the designated per-kind
//! default and logs — it never fails the render.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::document::DocumentKind;

/// The four résumé layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumeTemplate {
    /// Clean sans-serif single column (Inter). The default.
    Hacker,
    /// Classic serif, education-first (EB Garamond).
    Researcher,
    /// Skills-forward sans-serif (Lato).
    Operator,
    /// Traditional ATS-safe layout (Computer Modern).
    Classic,
}

/// The two cover-letter layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LetterTemplate {
    /// Full sender/recipient blocks with a subject line. The default.
    Formal,
    /// Condensed header, body-first.
    Compact,
}

/// A template variant, valid only for its own document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateVariant {
    Resume(ResumeTemplate),
    Letter(LetterTemplate),
}

impl TemplateVariant {
    /// Every variant the registry must implement. `TemplateRegistry::validate`
    /// iterates this list at startup and fails loudly on any gap.
    pub const ALL: [TemplateVariant; 6] = [
        TemplateVariant::Resume(ResumeTemplate::Hacker),
        TemplateVariant::Resume(ResumeTemplate::Researcher),
        TemplateVariant::Resume(ResumeTemplate::Operator),
        TemplateVariant::Resume(ResumeTemplate::Classic),
        TemplateVariant::Letter(LetterTemplate::Formal),
        TemplateVariant::Letter(LetterTemplate::Compact),
    ];

    pub fn default_for(kind: DocumentKind) -> TemplateVariant {
        match kind {
            DocumentKind::Resume => TemplateVariant::Resume(ResumeTemplate::Hacker),
            DocumentKind::CoverLetter => TemplateVariant::Letter(LetterTemplate::Formal),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            TemplateVariant::Resume(_) => DocumentKind::Resume,
            TemplateVariant::Letter(_) => DocumentKind::CoverLetter,
        }
    }

    /// Stable string key used in persisted preferences and audit records.
    pub fn key(&self) -> &'static str {
        match self {
            TemplateVariant::Resume(ResumeTemplate::Hacker) => "hacker",
            TemplateVariant::Resume(ResumeTemplate::Researcher) => "researcher",
            TemplateVariant::Resume(ResumeTemplate::Operator) => "operator",
            TemplateVariant::Resume(ResumeTemplate::Classic) => "classic",
            TemplateVariant::Letter(LetterTemplate::Formal) => "formal",
            TemplateVariant::Letter(LetterTemplate::Compact) => "compact",
        }
    }

    /// Resolves a key string against the closed set for `kind`.
    ///
    /// Unknown keys, and keys belonging to the other kind, resolve to the
    /// per-kind default rather than failing the render.
    pub fn parse(kind: DocumentKind, key: &str) -> TemplateVariant {
        let hit = Self::ALL
            .iter()
            .find(|v| v.kind() == kind && v.key() == key)
            .copied();
        match hit {
            Some(v) => v,
            None => {
                let fallback = Self::default_for(kind);
                warn!(
                    kind = kind.key(),
                    requested = key,
                    fallback = fallback.key(),
                    "unknown template variant key, using default"
                );
                fallback
            }
        }
    }

    /// Clamps a variant to the given kind, falling back to the kind's default
    /// when a variant of the other kind was supplied.
    pub fn clamp_to(self, kind: DocumentKind) -> TemplateVariant {
        if self.kind() == kind {
            self
        } else {
            let fallback = Self::default_for(kind);
            warn!(
                kind = kind.key(),
                requested = self.key(),
                fallback = fallback.key(),
                "variant belongs to the other document kind, using default"
            );
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_key() {
        let v = TemplateVariant::parse(DocumentKind::Resume, "operator");
        assert_eq!(v, TemplateVariant::Resume(ResumeTemplate::Operator));
    }

    #[test]
    fn test_parse_unknown_key_falls_back_to_default() {
        let v = TemplateVariant::parse(DocumentKind::Resume, "vaporwave");
        assert_eq!(v, TemplateVariant::default_for(DocumentKind::Resume));
    }

    #[test]
    fn test_parse_wrong_kind_key_falls_back() {
        // "formal" is a letter variant; a resume must not pick it up.
        let v = TemplateVariant::parse(DocumentKind::Resume, "formal");
        assert_eq!(v, TemplateVariant::Resume(ResumeTemplate::Hacker));
    }

    #[test]
    fn test_clamp_keeps_matching_kind() {
        let v = TemplateVariant::Letter(LetterTemplate::Compact);
        assert_eq!(v.clamp_to(DocumentKind::CoverLetter), v);
    }

    #[test]
    fn test_clamp_replaces_mismatched_kind() {
        let v = TemplateVariant::Letter(LetterTemplate::Compact);
        assert_eq!(
            v.clamp_to(DocumentKind::Resume),
            TemplateVariant::Resume(ResumeTemplate::Hacker)
        );
    }

    #[test]
    fn test_all_keys_are_unique_within_kind() {
        for a in TemplateVariant::ALL {
            let dup = TemplateVariant::ALL
                .iter()
                .filter(|b| b.kind() == a.kind() && b.key() == a.key())
                .count();
            assert_eq!(dup, 1, "duplicate key {}", a.key());
        }
    }
}
