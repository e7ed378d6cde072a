//! Localized mail body templates.
//!
//! Bodies are plain text files compiled into the binary, one per
//! `(template name, language)` pair, with `{{variable}}` placeholders:
//!
//! ```ignore
//! let store = TemplateStore::new();
//!
//! let params = TemplateParams::from([
//!     ("client_name".to_string(), "Acme".to_string()),
//! ]);
//!
//! let body = store.render("created", Language::Es, &params)?;
//! ```

mod store;
mod substitution;
mod types;

pub use store::TemplateStore;
pub use substitution::substitute_placeholders;
pub use types::{TemplateError, TemplateParams, TemplateResult};
