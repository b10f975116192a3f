//! Field-name policies of the relay pagination convention
//!
//! A handful of field names change how types and resolver bodies are
//! generated. They are listed here instead of being checked inline.

/// Behaviour attached to a field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// `<X>Connection.edges`: struct lists get an extra indirection and an
    /// unset sequence resolves to an empty one
    PaginationEdges,
    /// `pageInfo`: always behind an indirection, an unset value resolves to
    /// a zero-value wrapper
    PageInfo,
    /// `PageInfo.startCursor` / `PageInfo.endCursor`: returned by reference
    CursorByReference,
}

/// One policy entry
#[derive(Debug, Clone, Copy)]
pub struct FieldPolicy {
    /// Schema field name
    pub field: &'static str,
    /// Owning type the entry is restricted to
    pub owner: Option<&'static str>,
    pub rule: FieldRule,
}

/// Every field-name policy
pub const FIELD_POLICIES: &[FieldPolicy] = &[
    FieldPolicy {
        field: "edges",
        owner: None,
        rule: FieldRule::PaginationEdges,
    },
    FieldPolicy {
        field: "pageInfo",
        owner: None,
        rule: FieldRule::PageInfo,
    },
    FieldPolicy {
        field: "startCursor",
        owner: Some("PageInfo"),
        rule: FieldRule::CursorByReference,
    },
    FieldPolicy {
        field: "endCursor",
        owner: Some("PageInfo"),
        rule: FieldRule::CursorByReference,
    },
];

/// Rule for a field; `owner == None` only matches unrestricted entries
pub fn rule(owner: Option<&str>, field: &str) -> Option<FieldRule> {
    FIELD_POLICIES
        .iter()
        .find(|p| p.field == field && (p.owner.is_none() || p.owner == owner))
        .map(|p| p.rule)
}
