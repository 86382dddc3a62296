//! Product form session: draft, image source reconciliation, validation and
//! submission payloads. Everything here is pure; the HTTP layer feeds it
//! actions and ships whatever payload it produces.

pub mod draft;
pub mod image;
pub mod payload;
pub mod state;

use std::collections::BTreeMap;

/// Field name → message. Empty means nothing to report.
pub type FormErrors = BTreeMap<String, String>;

pub use draft::ProductDraft;
pub use image::{preview_data_uri, ImageSource, UploadedFile};
pub use payload::{MultipartPayload, Payload};
pub use state::{FormAction, FormState};
