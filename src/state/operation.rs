//! Operation selection and parameters
//!
//! The service understands four transforms: crop, rotate and the two
//! flips. Field text is kept per operation, so switching the selector
//! never clears what the user typed for another operation. Only the
//! fields of the active variant are ever submitted.

use std::fmt;

/// The transform the user has currently selected.
///
/// This is the value driving the operation picker; the wire-level
/// request is built from it (plus the parameter fields) at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Crop,
    Rotate,
    FlipHorizontal,
    FlipVertical,
}

impl OperationKind {
    /// All variants, in the order the selector lists them.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Crop,
        OperationKind::Rotate,
        OperationKind::FlipHorizontal,
        OperationKind::FlipVertical,
    ];
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationKind::Crop => "Crop",
            OperationKind::Rotate => "Rotate",
            OperationKind::FlipHorizontal => "Flip Horizontally",
            OperationKind::FlipVertical => "Flip Vertically",
        };
        write!(f, "{}", label)
    }
}

/// Which crop field an edit targets (used by the UI messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropField {
    X,
    Y,
    Width,
    Height,
}

/// Editable crop parameters, kept as raw field text until submit.
///
/// Defaults match the original form: a 200x200 region at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropFields {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

impl Default for CropFields {
    fn default() -> Self {
        CropFields {
            x: String::from("0"),
            y: String::from("0"),
            width: String::from("200"),
            height: String::from("200"),
        }
    }
}

impl CropFields {
    /// Store an edited value in the targeted field.
    pub fn set(&mut self, field: CropField, value: String) {
        match field {
            CropField::X => self.x = value,
            CropField::Y => self.y = value,
            CropField::Width => self.width = value,
            CropField::Height => self.height = value,
        }
    }
}

/// Editable rotation parameter. Defaults to a quarter turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotateFields {
    pub angle: String,
}

impl Default for RotateFields {
    fn default() -> Self {
        RotateFields {
            angle: String::from("90"),
        }
    }
}

/// A fully parsed transform request, ready to be encoded onto the wire.
///
/// Exactly one variant is active per submission. The angle is an
/// unrestricted signed integer; the service normalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    Crop { x: i32, y: i32, width: i32, height: i32 },
    Rotate { angle: i32 },
    FlipHorizontal,
    FlipVertical,
}

impl OperationRequest {
    /// Parse the active operation's fields into a request.
    ///
    /// Fields belonging to other operations are ignored entirely; stale
    /// text in them can never fail a submission. On a bad value the name
    /// of the offending field is returned.
    pub fn from_fields(
        kind: OperationKind,
        crop: &CropFields,
        rotate: &RotateFields,
    ) -> Result<Self, &'static str> {
        match kind {
            OperationKind::Crop => Ok(OperationRequest::Crop {
                x: parse_int(&crop.x, "x")?,
                y: parse_int(&crop.y, "y")?,
                width: parse_int(&crop.width, "width")?,
                height: parse_int(&crop.height, "height")?,
            }),
            OperationKind::Rotate => Ok(OperationRequest::Rotate {
                angle: parse_int(&rotate.angle, "angle")?,
            }),
            OperationKind::FlipHorizontal => Ok(OperationRequest::FlipHorizontal),
            OperationKind::FlipVertical => Ok(OperationRequest::FlipVertical),
        }
    }

    /// The `operation` field value the service expects.
    pub fn wire_name(&self) -> &'static str {
        match self {
            OperationRequest::Crop { .. } => "crop",
            OperationRequest::Rotate { .. } => "rotate",
            OperationRequest::FlipHorizontal => "flip_h",
            OperationRequest::FlipVertical => "flip_v",
        }
    }

    /// The operation-specific multipart text fields.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            OperationRequest::Crop {
                x,
                y,
                width,
                height,
            } => vec![
                ("x", x.to_string()),
                ("y", y.to_string()),
                ("width", width.to_string()),
                ("height", height.to_string()),
            ],
            OperationRequest::Rotate { angle } => vec![("angle", angle.to_string())],
            OperationRequest::FlipHorizontal | OperationRequest::FlipVertical => Vec::new(),
        }
    }
}

/// Parse a single numeric field, reporting the field name on failure.
fn parse_int(text: &str, field: &'static str) -> Result<i32, &'static str> {
    text.trim().parse::<i32>().map_err(|_| field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_crop_matches_original_form() {
        let request =
            OperationRequest::from_fields(OperationKind::Crop, &CropFields::default(), &RotateFields::default())
                .unwrap();

        assert_eq!(
            request,
            OperationRequest::Crop {
                x: 0,
                y: 0,
                width: 200,
                height: 200
            }
        );
    }

    #[test]
    fn test_wire_names() {
        let crop = OperationRequest::Crop { x: 0, y: 0, width: 1, height: 1 };
        let rotate = OperationRequest::Rotate { angle: 90 };

        assert_eq!(crop.wire_name(), "crop");
        assert_eq!(rotate.wire_name(), "rotate");
        assert_eq!(OperationRequest::FlipHorizontal.wire_name(), "flip_h");
        assert_eq!(OperationRequest::FlipVertical.wire_name(), "flip_v");
    }

    #[test]
    fn test_crop_fields_on_the_wire() {
        let request = OperationRequest::Crop { x: 10, y: -5, width: 200, height: 120 };
        let fields = request.form_fields();

        assert_eq!(
            fields,
            vec![
                ("x", String::from("10")),
                ("y", String::from("-5")),
                ("width", String::from("200")),
                ("height", String::from("120")),
            ]
        );
    }

    #[test]
    fn test_flips_carry_no_fields() {
        assert!(OperationRequest::FlipHorizontal.form_fields().is_empty());
        assert!(OperationRequest::FlipVertical.form_fields().is_empty());
    }

    #[test]
    fn test_rotation_angle_is_unrestricted() {
        let rotate = RotateFields {
            angle: String::from("-720"),
        };
        let request =
            OperationRequest::from_fields(OperationKind::Rotate, &CropFields::default(), &rotate).unwrap();

        assert_eq!(request, OperationRequest::Rotate { angle: -720 });
    }

    #[test]
    fn test_bad_value_names_the_field() {
        let mut crop = CropFields::default();
        crop.set(CropField::Width, String::from("wide"));

        let result =
            OperationRequest::from_fields(OperationKind::Crop, &crop, &RotateFields::default());

        assert_eq!(result, Err("width"));
    }

    #[test]
    fn test_inactive_fields_are_ignored() {
        // Garbage left behind in the crop fields must not affect a rotate
        // submission, and must not appear in its payload.
        let mut crop = CropFields::default();
        crop.set(CropField::X, String::from("not a number"));

        let request =
            OperationRequest::from_fields(OperationKind::Rotate, &crop, &RotateFields::default())
                .unwrap();

        assert_eq!(request, OperationRequest::Rotate { angle: 90 });
        assert_eq!(request.form_fields(), vec![("angle", String::from("90"))]);
    }
}
