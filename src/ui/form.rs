//! Form section widgets
//!
//! File row, username, operation selector, the active operation's
//! parameter fields and the submit button. Crop shows four integer
//! fields, rotate a single angle field, the flips nothing; switching
//! the selector hides fields without clearing their text.

use iced::widget::{button, column, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::form::{FormState, Phase};
use crate::state::operation::{CropField, OperationKind};
use crate::Message;

/// The full form section.
pub fn form_section(form: &FormState) -> Element<'_, Message> {
    let file_label = match form.source() {
        Some(source) => source.filename.clone(),
        None => String::from("No image selected"),
    };

    let file_row = row![
        button("Select Image...").on_press(Message::PickFile).padding(8),
        text(file_label).size(14),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let username_row = row![
        text("Username").size(14),
        text_input("username", &form.username)
            .on_input(Message::UsernameChanged)
            .padding(6)
            .width(Length::Fixed(220.0)),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let operation_row = row![
        text("Operation").size(14),
        pick_list(
            &OperationKind::ALL[..],
            Some(form.operation),
            Message::OperationPicked,
        )
        .padding(6),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    // The button is disarmed while a request is in flight, which is what
    // prevents double submission.
    let submit_label = if form.phase() == Phase::Submitting {
        "Processing..."
    } else {
        "Process Image"
    };
    let submit = button(submit_label)
        .on_press_maybe(form.can_submit().then_some(Message::Submit))
        .padding(10);

    column![
        file_row,
        username_row,
        operation_row,
        parameter_fields(form),
        submit,
    ]
    .spacing(14)
    .into()
}

/// The numeric fields of the active operation. The flips have none.
fn parameter_fields(form: &FormState) -> Element<'_, Message> {
    match form.operation {
        OperationKind::Crop => row![
            numeric_field("X", &form.crop.x, |v| {
                Message::CropFieldEdited(CropField::X, v)
            }),
            numeric_field("Y", &form.crop.y, |v| {
                Message::CropFieldEdited(CropField::Y, v)
            }),
            numeric_field("Width", &form.crop.width, |v| {
                Message::CropFieldEdited(CropField::Width, v)
            }),
            numeric_field("Height", &form.crop.height, |v| {
                Message::CropFieldEdited(CropField::Height, v)
            }),
        ]
        .spacing(12)
        .into(),
        OperationKind::Rotate => {
            numeric_field("Angle (degrees)", &form.rotate.angle, Message::AngleEdited)
        }
        OperationKind::FlipHorizontal | OperationKind::FlipVertical => column![].into(),
    }
}

/// One labeled integer input.
fn numeric_field<'a>(
    label: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    row![
        text(label).size(14),
        text_input("0", value)
            .on_input(on_input)
            .padding(6)
            .width(Length::Fixed(90.0)),
    ]
    .spacing(6)
    .align_y(Alignment::Center)
    .into()
}
