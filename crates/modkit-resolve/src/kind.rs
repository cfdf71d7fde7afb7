//! Import kinds and the condition mode they select.

use std::fmt;

/// How a module reference was written in the importing source.
///
/// The tags match the ones bundlers report for each reference, e.g.
/// `import-statement` for `import x from "y"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    EntryPoint,
    ImportStatement,
    RequireCall,
    DynamicImport,
    RequireResolve,
    ImportRule,
    ComposesFrom,
    UrlToken,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::EntryPoint => "entry-point",
            ImportKind::ImportStatement => "import-statement",
            ImportKind::RequireCall => "require-call",
            ImportKind::DynamicImport => "dynamic-import",
            ImportKind::RequireResolve => "require-resolve",
            ImportKind::ImportRule => "import-rule",
            ImportKind::ComposesFrom => "composes-from",
            ImportKind::UrlToken => "url-token",
        }
    }

    /// Parse a kind tag. Unknown and empty tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "entry-point" => ImportKind::EntryPoint,
            "import-statement" => ImportKind::ImportStatement,
            "require-call" => ImportKind::RequireCall,
            "dynamic-import" => ImportKind::DynamicImport,
            "require-resolve" => ImportKind::RequireResolve,
            "import-rule" => ImportKind::ImportRule,
            "composes-from" => ImportKind::ComposesFrom,
            "url-token" => ImportKind::UrlToken,
            _ => return None,
        })
    }

    pub fn condition_mode(&self) -> ConditionMode {
        match self {
            ImportKind::ImportStatement | ImportKind::DynamicImport => ConditionMode::Import,
            _ => ConditionMode::Require,
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which of the two condition sets a resolution uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionMode {
    #[default]
    Require,
    Import,
}

impl ConditionMode {
    /// Mode for an optional kind tag; anything but an ESM kind is `Require`.
    pub fn for_tag(tag: Option<&str>) -> Self {
        tag.and_then(ImportKind::from_tag)
            .map(|kind| kind.condition_mode())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionMode::Require => "require",
            ConditionMode::Import => "import",
        }
    }
}

impl fmt::Display for ConditionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esm_kinds_select_import_conditions() {
        assert_eq!(
            ConditionMode::for_tag(Some("import-statement")),
            ConditionMode::Import
        );
        assert_eq!(
            ConditionMode::for_tag(Some("dynamic-import")),
            ConditionMode::Import
        );
    }

    #[test]
    fn other_kinds_select_require_conditions() {
        assert_eq!(ConditionMode::for_tag(None), ConditionMode::Require);
        assert_eq!(ConditionMode::for_tag(Some("")), ConditionMode::Require);
        assert_eq!(
            ConditionMode::for_tag(Some("require-call")),
            ConditionMode::Require
        );
        assert_eq!(
            ConditionMode::for_tag(Some("import-rule")),
            ConditionMode::Require
        );
        assert_eq!(
            ConditionMode::for_tag(Some("something-else")),
            ConditionMode::Require
        );
    }

    #[test]
    fn tags_round_trip() {
        for kind in [
            ImportKind::EntryPoint,
            ImportKind::ImportStatement,
            ImportKind::RequireCall,
            ImportKind::DynamicImport,
            ImportKind::RequireResolve,
            ImportKind::ImportRule,
            ImportKind::ComposesFrom,
            ImportKind::UrlToken,
        ] {
            assert_eq!(ImportKind::from_tag(kind.as_str()), Some(kind));
        }
    }
}
