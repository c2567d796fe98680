//! Gallery panel widgets
//!
//! Lists the filenames the server reported for the current username, in
//! server order. Clicking an entry asks the main loop to fetch the
//! asset and display it.

use iced::widget::{button, column, scrollable, text, Column};
use iced::{Element, Length};

use crate::state::gallery::GalleryState;
use crate::Message;

/// The gallery section under the form.
pub fn gallery_section<'a>(gallery: &'a GalleryState, username: &str) -> Element<'a, Message> {
    let mut section: Column<'a, Message> =
        column![text("Previously Processed").size(20)].spacing(8);

    if username.is_empty() {
        section = section.push(text("Enter a username to see previous results.").size(14));
        return section.into();
    }

    if let Some(refreshed) = gallery.last_refreshed() {
        section = section.push(
            text(format!("Refreshed at {}", refreshed.format("%H:%M:%S"))).size(12),
        );
    }

    if gallery.entries().is_empty() {
        section = section.push(text("No processed images yet.").size(14));
        return section.into();
    }

    let mut entries: Column<'a, Message> = column![].spacing(4);
    for filename in gallery.entries() {
        entries = entries.push(
            button(text(filename.as_str()).size(14))
                .on_press(Message::GalleryEntrySelected(filename.clone()))
                .padding(4),
        );
    }

    section = section.push(scrollable(entries).height(Length::Fixed(180.0)));
    section.into()
}
