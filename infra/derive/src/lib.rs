#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the Rally workspace.
//!
//! Every crate in the workspace declares exactly one error enum per module with
//! [`macro@rally_error`], so the wiring between upstream errors, human-readable
//! context and the `?` operator looks the same everywhere.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! rally-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting helper**: Emits a module-local `format_context` function for use in
///   `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source field must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use rally_derive::rally_error;
/// use std::borrow::Cow;
///
/// #[rally_error]
/// pub enum RegistryError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, RegistryError> {
///     std::fs::read_to_string(path).context("Reading roster snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn rally_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
