//! Strongly-typed table name wrapper.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Name of a warehouse table, as it appears in generated statements.
    ///
    /// Restricted to plain identifiers so it can be spliced into SQL
    /// unquoted for Redshift.
    pub struct TableName: "a non-empty identifier of letters, digits and underscores"
        where |s| {
            !s.starts_with(|c: char| c.is_ascii_digit())
                && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
}
