use crate::entities::Product;

use super::{
    draft::ProductDraft,
    image::{preview_data_uri, ImageSource, UploadedFile},
    payload::{format_price, MultipartPayload, Payload},
    FormErrors,
};

pub const IMAGE_REQUIRED: &str = "Image is required";
pub const IMAGE_TYPE_REJECTED: &str = "Please upload an image file";
pub const SUBMISSION_FAILED: &str = "Failed to submit form. Please try again.";

/// User input applied to a form, one field or event at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum FormAction {
    SetTitle(String),
    SetDescription(String),
    /// Raw text from the price input. Anything unparsable becomes `0`.
    SetPrice(String),
    SetCategory(String),
    SetImageUrl(String),
    SelectFile(UploadedFile),
    ClearFile,
    Submit,
    SubmissionFailed,
}

/// State of one product form session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    draft: ProductDraft,
    seed_image: String,
    upload: Option<UploadedFile>,
    preview: Option<String>,
    errors: FormErrors,
}

impl FormState {
    /// Empty draft for a product that does not exist yet.
    pub fn new() -> FormState {
        FormState::default()
    }

    /// Draft seeded from a fetched product.
    pub fn edit(product: Product) -> FormState {
        let seed_image = product.image.clone();

        FormState {
            preview: non_empty(&seed_image),
            draft: product.into(),
            seed_image,
            upload: None,
            errors: FormErrors::new(),
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn upload(&self) -> Option<&UploadedFile> {
        self.upload.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The URL input is disabled while a file is selected.
    pub fn url_enabled(&self) -> bool {
        self.upload.is_none()
    }

    pub fn image_source(&self) -> ImageSource<'_> {
        if let Some(file) = &self.upload {
            return ImageSource::Upload(file);
        }
        if !self.draft.image.is_empty() {
            return ImageSource::Url(&self.draft.image);
        }
        if !self.seed_image.is_empty() {
            return ImageSource::Url(&self.seed_image);
        }
        ImageSource::None
    }

    /// Every violated rule, keyed by field. Empty means submittable.
    pub fn validate(&self) -> FormErrors {
        let mut errors = self.draft.field_errors();

        if self.image_source() == ImageSource::None {
            errors.insert("image".to_string(), IMAGE_REQUIRED.to_string());
        }

        errors
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn reduce(mut self, action: FormAction) -> (FormState, FormErrors) {
        match action {
            FormAction::SetTitle(title) => {
                self.draft.title = title;
                self.errors.remove("title");
            }
            FormAction::SetDescription(description) => {
                self.draft.description = description;
                self.errors.remove("description");
            }
            FormAction::SetPrice(raw) => {
                self.draft.price = parse_price(&raw);
                self.errors.remove("price");
            }
            FormAction::SetCategory(category) => {
                self.draft.category = category;
                self.errors.remove("category");
            }
            FormAction::SetImageUrl(url) => {
                if self.url_enabled() {
                    self.draft.image = url;
                    self.preview = self.fallback_preview();
                    self.errors.remove("image");
                }
            }
            FormAction::SelectFile(file) => {
                if file.is_image() {
                    self.preview = Some(preview_data_uri(&file));
                    self.upload = Some(file);
                    self.errors.remove("image");
                } else {
                    self.errors
                        .insert("image".to_string(), IMAGE_TYPE_REJECTED.to_string());
                }
            }
            FormAction::ClearFile => {
                self.upload = None;
                self.preview = self.fallback_preview();
            }
            FormAction::Submit => {
                self.errors = self.validate();
            }
            FormAction::SubmissionFailed => {
                self.errors
                    .insert("form".to_string(), SUBMISSION_FAILED.to_string());
            }
        }

        let errors = self.errors.clone();
        (self, errors)
    }

    /// Builds what the submission sink receives, or the validation errors.
    pub fn payload(&self) -> Result<Payload, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        match self.image_source() {
            ImageSource::Upload(file) => Ok(Payload::Multipart(MultipartPayload {
                file: file.clone(),
                title: self.draft.title.clone(),
                description: self.draft.description.clone(),
                price: format_price(self.draft.price),
                category: self.draft.category.clone(),
            })),
            ImageSource::Url(url) => {
                let mut record = Product::from(self.draft.clone());
                record.image = url.to_string();
                Ok(Payload::Record(record))
            }
            ImageSource::None => Err(errors),
        }
    }

    fn fallback_preview(&self) -> Option<String> {
        non_empty(&self.draft.image).or_else(|| non_empty(&self.seed_image))
    }
}

fn parse_price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => price,
        _ => 0.0,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
