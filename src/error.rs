//! Error types for composition and element configuration.

use rollo_reactive::Value;
use thiserror::Error;

/// Errors raised by the composition engine, the element bridges, and the
/// construction façade.
///
/// All of these are configuration errors: they fail fast and synchronously
/// at the call site and are never retried or recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    /// The tag has no native base type in the tag table.
    #[error("unknown tag: `{0}`")]
    UnknownTag(String),

    /// A `create` selector with an empty tag portion.
    #[error("invalid selector: `{0}`")]
    InvalidSelector(String),

    /// An update key matching neither the state marker, a property of the
    /// composed type, nor a style property.
    #[error("invalid key: `{0}`")]
    InvalidKey(String),

    /// An attribute value of a type the attribute bridge cannot represent.
    #[error("invalid attribute value for `{name}`: {value:?}")]
    InvalidAttr {
        /// The attribute name (kebab-cased).
        name: String,
        /// The rejected value.
        value: Value,
    },

    /// A capability factory registered without a name.
    #[error("capability factories must be registered with a non-empty name")]
    UnnamedCapability,
}
