//! Form/submission state machine
//!
//! The whole submission flow lives in this struct, independent of any
//! rendering code: `Idle` until an image is picked, `Ready` while the
//! form can be submitted, `Submitting` for the duration of exactly one
//! in-flight request, and back to `Ready` whether the service answered
//! with an image or an error.
//!
//! On success the response bytes become the next upload source, so the
//! user can chain further operations onto a result without re-picking
//! a file.

use thiserror::Error;

use super::operation::{CropFields, OperationKind, OperationRequest, RotateFields};

/// Where the submission flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No image has been picked yet.
    Idle,
    /// An image is loaded and the form can be submitted.
    Ready,
    /// A process request is in flight.
    Submitting,
}

/// The image that will be sent on the next submission.
///
/// The filename is carried across chained submissions because the
/// service picks the output encoding from its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Pre-submit failures. These block the request entirely; nothing is
/// sent to the service when one of them fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select an image before processing.")]
    MissingFile,
    #[error("Enter a username before processing.")]
    MissingUsername,
    #[error("The {0} field must be a whole number.")]
    InvalidField(&'static str),
    #[error("A request is already in flight.")]
    SubmissionInFlight,
}

/// Everything needed to issue one process call against the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub operation: OperationRequest,
    pub username: String,
}

/// The form state machine.
#[derive(Debug)]
pub struct FormState {
    phase: Phase,
    /// Username scoping the gallery and attached to every submission.
    pub username: String,
    /// Currently selected transform.
    pub operation: OperationKind,
    /// Crop parameter text, retained even while another operation is active.
    pub crop: CropFields,
    /// Rotation parameter text, retained even while another operation is active.
    pub rotate: RotateFields,
    source: Option<SourceImage>,
}

impl FormState {
    /// Create the machine in `Idle` with a restored username.
    pub fn new(username: String) -> Self {
        FormState {
            phase: Phase::Idle,
            username,
            operation: OperationKind::Crop,
            crop: CropFields::default(),
            rotate: RotateFields::default(),
            source: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// Install a freshly picked file as the upload source.
    ///
    /// Moves `Idle` to `Ready` and replaces any previous source.
    pub fn select_source(&mut self, bytes: Vec<u8>, filename: String) {
        self.source = Some(SourceImage { bytes, filename });
        self.phase = Phase::Ready;
    }

    /// Whether the submit control should be armed.
    ///
    /// The username is deliberately not part of this check; submitting
    /// without one surfaces a validation message, exactly like the
    /// original form did.
    pub fn can_submit(&self) -> bool {
        self.source.is_some() && self.phase != Phase::Submitting
    }

    /// Guarded `Ready -> Submitting` transition.
    ///
    /// Validates the source, the username and the active operation's
    /// fields. On success the machine enters `Submitting` and the caller
    /// receives the payload to put on the wire; on failure nothing
    /// changes and no payload exists to send.
    pub fn begin_submit(&mut self) -> Result<ProcessPayload, ValidationError> {
        if self.phase == Phase::Submitting {
            return Err(ValidationError::SubmissionInFlight);
        }

        let source = self.source.as_ref().ok_or(ValidationError::MissingFile)?;

        if self.username.is_empty() {
            return Err(ValidationError::MissingUsername);
        }

        let operation = OperationRequest::from_fields(self.operation, &self.crop, &self.rotate)
            .map_err(ValidationError::InvalidField)?;

        let payload = ProcessPayload {
            bytes: source.bytes.clone(),
            filename: source.filename.clone(),
            operation,
            username: self.username.clone(),
        };

        self.phase = Phase::Submitting;
        Ok(payload)
    }

    /// `Submitting -> Ready` on success.
    ///
    /// The response bytes replace the upload source, re-arming the form
    /// with the processed image so operations can be chained.
    pub fn finish_submit_ok(&mut self, bytes: Vec<u8>) {
        self.phase = Phase::Ready;
        match self.source.as_mut() {
            Some(source) => source.bytes = bytes,
            None => {
                // Unreachable through the normal transitions, but keep the
                // machine consistent rather than dropping the response.
                self.source = Some(SourceImage {
                    bytes,
                    filename: String::from("processed-image.jpg"),
                });
            }
        }
    }

    /// `Submitting -> Ready` on failure. The source is left untouched.
    pub fn finish_submit_err(&mut self) {
        self.phase = Phase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_form() -> FormState {
        let mut form = FormState::new(String::from("alice"));
        form.select_source(vec![1, 2, 3], String::from("cat.png"));
        form
    }

    #[test]
    fn test_starts_idle() {
        let form = FormState::new(String::new());
        assert_eq!(form.phase(), Phase::Idle);
        assert!(!form.can_submit());
    }

    #[test]
    fn test_selection_moves_to_ready() {
        let mut form = FormState::new(String::from("alice"));
        form.select_source(vec![1], String::from("a.png"));

        assert_eq!(form.phase(), Phase::Ready);
        assert!(form.can_submit());

        // A second selection replaces the first source outright.
        form.select_source(vec![9, 9], String::from("b.jpg"));
        let source = form.source().unwrap();
        assert_eq!(source.bytes, vec![9, 9]);
        assert_eq!(source.filename, "b.jpg");
    }

    #[test]
    fn test_submit_without_file_is_blocked() {
        let mut form = FormState::new(String::from("alice"));

        assert_eq!(form.begin_submit(), Err(ValidationError::MissingFile));
        assert_eq!(form.phase(), Phase::Idle);
    }

    #[test]
    fn test_submit_without_username_is_blocked() {
        let mut form = ready_form();
        form.username.clear();

        // No payload is produced, so nothing can reach the network.
        assert_eq!(form.begin_submit(), Err(ValidationError::MissingUsername));
        assert_eq!(form.phase(), Phase::Ready);
    }

    #[test]
    fn test_submit_builds_payload_for_active_operation() {
        let mut form = ready_form();

        let payload = form.begin_submit().unwrap();

        assert_eq!(form.phase(), Phase::Submitting);
        assert!(!form.can_submit());
        assert_eq!(payload.bytes, vec![1, 2, 3]);
        assert_eq!(payload.filename, "cat.png");
        assert_eq!(payload.username, "alice");
        assert_eq!(
            payload.operation,
            OperationRequest::Crop {
                x: 0,
                y: 0,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_switching_operation_drops_inactive_params() {
        let mut form = ready_form();
        form.crop.x = String::from("5");
        form.crop.y = String::from("5");
        form.operation = OperationKind::Rotate;
        form.rotate.angle = String::from("45");

        let payload = form.begin_submit().unwrap();

        assert_eq!(payload.operation, OperationRequest::Rotate { angle: 45 });
        assert!(payload
            .operation
            .form_fields()
            .iter()
            .all(|(name, _)| *name == "angle"));
    }

    #[test]
    fn test_bad_field_is_a_validation_error() {
        let mut form = ready_form();
        form.crop.height = String::from("tall");

        assert_eq!(
            form.begin_submit(),
            Err(ValidationError::InvalidField("height"))
        );
        assert_eq!(form.phase(), Phase::Ready);
    }

    #[test]
    fn test_success_rearms_with_response() {
        let mut form = ready_form();
        form.begin_submit().unwrap();

        form.finish_submit_ok(vec![7, 7, 7]);

        assert_eq!(form.phase(), Phase::Ready);
        assert!(form.can_submit());
        let source = form.source().unwrap();
        assert_eq!(source.bytes, vec![7, 7, 7]);
        // The filename survives so the service keeps the same encoding.
        assert_eq!(source.filename, "cat.png");
    }

    #[test]
    fn test_failure_preserves_source() {
        let mut form = ready_form();
        form.begin_submit().unwrap();

        form.finish_submit_err();

        assert_eq!(form.phase(), Phase::Ready);
        assert!(form.can_submit());
        assert_eq!(form.source().unwrap().bytes, vec![1, 2, 3]);
    }

    #[test]
    fn test_begin_while_submitting_is_refused() {
        let mut form = ready_form();
        form.begin_submit().unwrap();

        assert_eq!(
            form.begin_submit(),
            Err(ValidationError::SubmissionInFlight)
        );
        assert_eq!(form.phase(), Phase::Submitting);
    }
}
