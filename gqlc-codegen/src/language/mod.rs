//! Language-specific abstractions.
//!
//! - [`LanguageTarget`] - Trait implemented by each target language
//! - [`NamingConvention`] - Language-specific naming rules

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::LanguageTarget;
