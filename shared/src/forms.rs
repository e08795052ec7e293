//! Client-side validation for the admin service forms and the booking form.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::{BookingRequest, RawInterviewDate};
use crate::models::InterviewSlot;

pub const MAX_INTERVIEW_DATES: usize = 7;
pub const MIN_MEDIA: usize = 4;
pub const MAX_MEDIA: usize = 10;

pub const IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
pub const VIDEO_TYPES: [&str; 3] = ["video/mp4", "video/quicktime", "video/webm"];
pub const DOCUMENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
pub const CV_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Empty value the rich-text editor produces
const EMPTY_EDITOR_HTML: &str = "<p></p>";

/// File picked in a browser file input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        IMAGE_TYPES.contains(&self.content_type.as_str())
    }

    pub fn is_media(&self) -> bool {
        self.is_image() || VIDEO_TYPES.contains(&self.content_type.as_str())
    }

    pub fn is_document(&self) -> bool {
        DOCUMENT_TYPES.contains(&self.content_type.as_str())
    }
}

/// Rejections raised while files are being added to a form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Invalid image type. Please upload a JPEG, PNG, GIF, or WebP image.")]
    InvalidCoverImage,
    #[error("Invalid file type(s): {}", .0.join(", "))]
    InvalidMediaTypes(Vec<String>),
    #[error("Maximum 10 media files allowed. You tried to add {adding}, but already have {existing}.")]
    TooManyMedia { adding: usize, existing: usize },
    #[error("Maximum 10 media files allowed. You tried to add {adding}, but would have {total}.")]
    MediaTotalExceeded { adding: usize, total: usize },
    #[error("Invalid document type(s): {}", .0.join(", "))]
    InvalidDocumentTypes(Vec<String>),
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "This field is required"));
    }
    Ok(())
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim() == EMPTY_EDITOR_HTML {
        return Err(error("blank", "Description is required"));
    }
    Ok(())
}

fn validate_cover_image(file: &UploadedFile) -> Result<(), ValidationError> {
    if !file.is_image() {
        return Err(error(
            "file_type",
            "Invalid image type. Please upload a JPEG, PNG, GIF, or WebP image.",
        ));
    }
    Ok(())
}

fn validate_media_types(files: &[UploadedFile]) -> Result<(), ValidationError> {
    if files.iter().any(|f| !f.is_media()) {
        return Err(error("file_type", "Media must be images or MP4, MOV or WebM videos"));
    }
    Ok(())
}

fn validate_document_types(files: &[UploadedFile]) -> Result<(), ValidationError> {
    if files.iter().any(|f| !f.is_document()) {
        return Err(error("file_type", "Documents must be PDF, DOC or DOCX files"));
    }
    Ok(())
}

fn validate_interview_dates(dates: &[RawInterviewDate]) -> Result<(), ValidationError> {
    if dates.iter().any(|d| !d.is_complete()) {
        return Err(error(
            "incomplete",
            "All interview dates must have both date and time",
        ));
    }
    if dates.iter().any(|d| InterviewSlot::try_from(d).is_err()) {
        return Err(error(
            "malformed",
            "Interview dates must use YYYY-MM-DD dates and HH:MM times",
        ));
    }
    Ok(())
}

fn validate_cv_file_name(name: &str) -> Result<(), ValidationError> {
    let accepted = name
        .rsplit_once('.')
        .map(|(_, ext)| CV_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !accepted {
        return Err(error("file_type", "CV must be a PDF, DOC or DOCX file"));
    }
    Ok(())
}

fn validate_update_media_total(form: &ServiceUpdateForm) -> Result<(), ValidationError> {
    let total = form.total_media();
    if !(MIN_MEDIA..=MAX_MEDIA).contains(&total) {
        return Err(error(
            "media_count",
            "You must have between 4 to 10 media files",
        ));
    }
    Ok(())
}

fn push_interview_date(dates: &mut Vec<RawInterviewDate>) -> bool {
    if dates.len() >= MAX_INTERVIEW_DATES {
        return false;
    }
    dates.push(RawInterviewDate::default());
    true
}

fn drop_interview_date(dates: &mut Vec<RawInterviewDate>, index: usize) -> bool {
    if dates.len() <= 1 || index >= dates.len() {
        return false;
    }
    dates.remove(index);
    true
}

fn rejected_names(files: &[UploadedFile], accept: impl Fn(&UploadedFile) -> bool) -> Vec<String> {
    files
        .iter()
        .filter(|f| !accept(f))
        .map(|f| f.name.clone())
        .collect()
}

// ============================================================================
// New service
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(custom = "validate_not_blank")]
    pub service_name: String,

    #[validate(custom = "validate_description")]
    pub description: String,

    #[validate(required(message = "Cover image is required"), custom = "validate_cover_image")]
    pub cover_image: Option<UploadedFile>,

    #[validate(
        length(min = 1, max = 7, message = "Add between 1-7 interview dates"),
        custom = "validate_interview_dates"
    )]
    pub interview_dates: Vec<RawInterviewDate>,

    #[validate(
        length(min = 4, max = 10, message = "You must upload between 4 to 10 media files"),
        custom = "validate_media_types"
    )]
    pub media: Vec<UploadedFile>,

    #[validate(custom = "validate_document_types")]
    pub documents: Vec<UploadedFile>,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            description: String::new(),
            cover_image: None,
            interview_dates: vec![RawInterviewDate::default()],
            media: Vec::new(),
            documents: Vec::new(),
        }
    }
}

impl ServiceForm {
    pub fn set_cover_image(&mut self, file: UploadedFile) -> Result<(), FormError> {
        if !file.is_image() {
            return Err(FormError::InvalidCoverImage);
        }
        self.cover_image = Some(file);
        Ok(())
    }

    /// Append media files; the whole batch is rejected if any file is of the
    /// wrong type or the total would exceed the maximum.
    pub fn add_media(&mut self, files: Vec<UploadedFile>) -> Result<(), FormError> {
        let invalid = rejected_names(&files, UploadedFile::is_media);
        if !invalid.is_empty() {
            return Err(FormError::InvalidMediaTypes(invalid));
        }
        if self.media.len() + files.len() > MAX_MEDIA {
            return Err(FormError::TooManyMedia {
                adding: files.len(),
                existing: self.media.len(),
            });
        }
        self.media.extend(files);
        Ok(())
    }

    pub fn add_documents(&mut self, files: Vec<UploadedFile>) -> Result<(), FormError> {
        let invalid = rejected_names(&files, UploadedFile::is_document);
        if !invalid.is_empty() {
            return Err(FormError::InvalidDocumentTypes(invalid));
        }
        self.documents.extend(files);
        Ok(())
    }

    pub fn remove_media(&mut self, index: usize) {
        if index < self.media.len() {
            self.media.remove(index);
        }
    }

    pub fn remove_document(&mut self, index: usize) {
        if index < self.documents.len() {
            self.documents.remove(index);
        }
    }

    /// Add an empty interview date row, up to the maximum
    pub fn add_interview_date(&mut self) -> bool {
        push_interview_date(&mut self.interview_dates)
    }

    /// Remove a row, always keeping at least one
    pub fn remove_interview_date(&mut self, index: usize) -> bool {
        drop_interview_date(&mut self.interview_dates, index)
    }
}

// ============================================================================
// Edit existing service
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_media_total"))]
pub struct ServiceUpdateForm {
    #[validate(custom = "validate_not_blank")]
    pub service_name: String,

    #[validate(custom = "validate_not_blank")]
    pub description: String,

    /// Replacement cover, if any
    #[validate(custom = "validate_cover_image")]
    pub cover_image: Option<UploadedFile>,

    #[validate(
        length(min = 1, max = 7, message = "Add between 1-7 interview dates"),
        custom = "validate_interview_dates"
    )]
    pub interview_dates: Vec<RawInterviewDate>,

    pub existing_media: usize,
    pub media_to_delete: Vec<String>,

    #[validate(custom = "validate_media_types")]
    pub media: Vec<UploadedFile>,

    pub docs_to_delete: Vec<String>,

    #[validate(custom = "validate_document_types")]
    pub documents: Vec<UploadedFile>,
}

impl ServiceUpdateForm {
    /// Media the service will have after the update is applied
    pub fn total_media(&self) -> usize {
        (self.existing_media + self.media.len()).saturating_sub(self.media_to_delete.len())
    }

    /// Queue new media; kept media minus pending deletions count towards the cap.
    pub fn add_media(&mut self, files: Vec<UploadedFile>) -> Result<(), FormError> {
        let invalid = rejected_names(&files, UploadedFile::is_media);
        if !invalid.is_empty() {
            return Err(FormError::InvalidMediaTypes(invalid));
        }
        let total = self.total_media() + files.len();
        if total > MAX_MEDIA {
            return Err(FormError::MediaTotalExceeded {
                adding: files.len(),
                total,
            });
        }
        self.media.extend(files);
        Ok(())
    }

    pub fn add_documents(&mut self, files: Vec<UploadedFile>) -> Result<(), FormError> {
        let invalid = rejected_names(&files, UploadedFile::is_document);
        if !invalid.is_empty() {
            return Err(FormError::InvalidDocumentTypes(invalid));
        }
        self.documents.extend(files);
        Ok(())
    }

    pub fn add_interview_date(&mut self) -> bool {
        push_interview_date(&mut self.interview_dates)
    }

    pub fn remove_interview_date(&mut self, index: usize) -> bool {
        drop_interview_date(&mut self.interview_dates, index)
    }
}

// ============================================================================
// Booking summary
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(required(message = "Please upload your CV"), custom = "validate_cv_file_name")]
    pub cv_file_name: Option<String>,

    #[validate(required(message = "Choose an interview date and time"))]
    pub interview_at: Option<NaiveDateTime>,
}

impl BookingForm {
    /// Validate and turn the form into a submission payload
    pub fn into_request(self, service_id: &str) -> Result<BookingRequest, ValidationErrors> {
        self.validate()?;
        match (self.cv_file_name, self.interview_at) {
            (Some(cv_file_name), Some(interview_at)) => Ok(BookingRequest {
                service_id: service_id.to_string(),
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                cv_file_name,
                interview_at,
            }),
            // validate() already rejects missing values
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// Human-readable messages, ordered by field name
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn image(name: &str) -> UploadedFile {
        UploadedFile::new(name, "image/jpeg")
    }

    fn valid_service_form() -> ServiceForm {
        ServiceForm {
            service_name: "Porto food tour".to_string(),
            description: "<p>Eat well</p>".to_string(),
            cover_image: Some(image("cover.jpg")),
            interview_dates: vec![RawInterviewDate::new("2025-03-10", "09:00")],
            media: (0..4).map(|i| image(&format!("{i}.jpg"))).collect(),
            documents: vec![UploadedFile::new("terms.pdf", "application/pdf")],
        }
    }

    fn messages(result: Result<(), ValidationErrors>) -> Vec<String> {
        error_messages(&result.unwrap_err())
    }

    #[test]
    fn test_valid_service_form_passes() {
        assert!(valid_service_form().validate().is_ok());
    }

    #[test]
    fn test_empty_editor_description_rejected() {
        let mut form = valid_service_form();
        form.description = "<p></p>".to_string();
        assert_eq!(messages(form.validate()), vec!["Description is required"]);
    }

    #[test]
    fn test_missing_cover_and_blank_name() {
        let mut form = valid_service_form();
        form.cover_image = None;
        form.service_name = "   ".to_string();
        assert_eq!(
            messages(form.validate()),
            vec!["Cover image is required", "This field is required"]
        );
    }

    #[test]
    fn test_media_count_bounds() {
        let mut form = valid_service_form();
        form.media.truncate(3);
        assert_eq!(
            messages(form.validate()),
            vec!["You must upload between 4 to 10 media files"]
        );
    }

    #[test]
    fn test_incomplete_and_malformed_interview_dates() {
        let mut form = valid_service_form();
        form.interview_dates.push(RawInterviewDate::new("2025-03-11", ""));
        assert_eq!(
            messages(form.validate()),
            vec!["All interview dates must have both date and time"]
        );

        form.interview_dates[1].time = "9.30".to_string();
        assert_eq!(
            messages(form.validate()),
            vec!["Interview dates must use YYYY-MM-DD dates and HH:MM times"]
        );
    }

    #[test]
    fn test_interview_date_rows_bounded() {
        let mut form = ServiceForm::default();
        assert!(!form.remove_interview_date(0));
        for _ in 1..MAX_INTERVIEW_DATES {
            assert!(form.add_interview_date());
        }
        assert!(!form.add_interview_date());
        assert_eq!(form.interview_dates.len(), MAX_INTERVIEW_DATES);
        assert!(form.remove_interview_date(3));
        assert!(!form.remove_interview_date(42));
    }

    #[test]
    fn test_add_media_checks_type_and_total() {
        let mut form = ServiceForm::default();
        let err = form
            .add_media(vec![image("a.jpg"), UploadedFile::new("b.exe", "application/x-msdownload")])
            .unwrap_err();
        assert_eq!(err, FormError::InvalidMediaTypes(vec!["b.exe".to_string()]));
        assert_eq!(err.to_string(), "Invalid file type(s): b.exe");
        assert!(form.media.is_empty());

        form.add_media((0..8).map(|i| image(&format!("{i}.jpg"))).collect()).unwrap();
        form.add_media(vec![UploadedFile::new("clip.mp4", "video/mp4")]).unwrap();
        let err = form.add_media(vec![image("x.jpg"), image("y.jpg")]).unwrap_err();
        assert_eq!(err, FormError::TooManyMedia { adding: 2, existing: 9 });
        assert_eq!(form.media.len(), 9);

        form.remove_media(0);
        assert_eq!(form.media.len(), 8);
    }

    #[test]
    fn test_cover_and_document_types() {
        let mut form = ServiceForm::default();
        assert_eq!(
            form.set_cover_image(UploadedFile::new("c.svg", "image/svg+xml")),
            Err(FormError::InvalidCoverImage)
        );
        assert!(form.set_cover_image(image("c.png")).is_ok());

        let err = form
            .add_documents(vec![UploadedFile::new("notes.txt", "text/plain")])
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid document type(s): notes.txt");
    }

    #[test]
    fn test_update_form_counts_existing_media() {
        let mut form = ServiceUpdateForm {
            service_name: "Tour".to_string(),
            description: "<p>x</p>".to_string(),
            cover_image: None,
            interview_dates: vec![RawInterviewDate::new("2025-03-10", "09:00")],
            existing_media: 5,
            media_to_delete: vec!["m1".to_string(), "m2".to_string()],
            media: Vec::new(),
            docs_to_delete: Vec::new(),
            documents: Vec::new(),
        };
        assert_eq!(form.total_media(), 3);
        assert!(form.validate().is_err());

        form.media.push(image("new.jpg"));
        assert_eq!(form.total_media(), 4);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_update_form_add_media_counts_kept_and_deleted() {
        let mut form = ServiceUpdateForm {
            service_name: "Tour".to_string(),
            description: "<p>x</p>".to_string(),
            cover_image: None,
            interview_dates: vec![RawInterviewDate::new("2025-03-10", "09:00")],
            existing_media: 8,
            media_to_delete: vec!["m1".to_string()],
            media: Vec::new(),
            docs_to_delete: Vec::new(),
            documents: Vec::new(),
        };

        let err = form
            .add_media((0..4).map(|i| image(&format!("{i}.jpg"))).collect())
            .unwrap_err();
        assert_eq!(err, FormError::MediaTotalExceeded { adding: 4, total: 11 });
        assert_eq!(
            err.to_string(),
            "Maximum 10 media files allowed. You tried to add 4, but would have 11."
        );
        assert!(form.media.is_empty());

        form.add_media((0..3).map(|i| image(&format!("{i}.jpg"))).collect()).unwrap();
        assert_eq!(form.total_media(), 10);

        let err = form
            .add_documents(vec![UploadedFile::new("notes.txt", "text/plain")])
            .unwrap_err();
        assert_eq!(err, FormError::InvalidDocumentTypes(vec!["notes.txt".to_string()]));
        form.add_documents(vec![UploadedFile::new("terms.pdf", "application/pdf")]).unwrap();
        assert_eq!(form.documents.len(), 1);
    }

    #[test]
    fn test_booking_form_into_request() {
        let at = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let form = BookingForm {
            name: " Ana ".to_string(),
            email: "ana@example.com".to_string(),
            cv_file_name: Some("Ana-CV.DOCX".to_string()),
            interview_at: Some(at),
        };
        let request = form.into_request("svc1").unwrap();
        assert_eq!(request.name, "Ana");
        assert_eq!(request.interview_at, at);
        assert_eq!(request.service_id, "svc1");
    }

    #[test]
    fn test_booking_form_rejections() {
        let form = BookingForm {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            cv_file_name: Some("cv.png".to_string()),
            interview_at: None,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            error_messages(&errors),
            vec![
                "CV must be a PDF, DOC or DOCX file",
                "Enter a valid email address",
                "Choose an interview date and time",
            ]
        );
    }
}
