/// Semantic operation a filter operator mnemonic maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    /// Equality (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterOrEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessOrEqual,
    /// LIKE pattern matching
    Like,
    /// IN (array of values)
    In,
    /// NOT IN (array of values)
    NotIn,
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
    /// Inclusive BETWEEN (two-element array)
    Between,
}

const REGISTRY: [(&str, PredicateKind); 12] = [
    ("eq", PredicateKind::Equal),
    ("neq", PredicateKind::NotEqual),
    ("gt", PredicateKind::GreaterThan),
    ("gte", PredicateKind::GreaterOrEqual),
    ("lt", PredicateKind::LessThan),
    ("lte", PredicateKind::LessOrEqual),
    ("like", PredicateKind::Like),
    ("in", PredicateKind::In),
    ("notin", PredicateKind::NotIn),
    ("isnull", PredicateKind::IsNull),
    ("isnotnull", PredicateKind::IsNotNull),
    ("between", PredicateKind::Between),
];

impl PredicateKind {
    /// Strict lookup, case-insensitive.
    #[must_use]
    pub fn lookup(mnemonic: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(mnemonic))
            .map(|&(_, kind)| kind)
    }

    /// Permissive lookup used by the compiler: unknown mnemonics compile as equality.
    #[must_use]
    pub fn resolve(mnemonic: &str) -> Self {
        Self::lookup(mnemonic).unwrap_or(Self::Equal)
    }

    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|&&(_, kind)| kind == self)
            .map_or("eq", |&(name, _)| name)
    }

    /// Binary comparisons that get the date-cast treatment.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::NotEqual
                | Self::GreaterThan
                | Self::GreaterOrEqual
                | Self::LessThan
                | Self::LessOrEqual
        )
    }
}

#[must_use]
pub fn is_valid_operator(mnemonic: &str) -> bool {
    PredicateKind::lookup(mnemonic).is_some()
}

#[must_use]
pub fn supported_operators() -> Vec<&'static str> {
    REGISTRY.iter().map(|&(name, _)| name).collect()
}
