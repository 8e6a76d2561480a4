/// Upload panel shown above the gallery grid

use iced::widget::{button, checkbox, column, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::state::data::UploadDraft;
use crate::Message;

/// Build the upload panel
pub fn view(draft: &UploadDraft) -> Element<'_, Message> {
    let pick_label = match &draft.file {
        Some(file) => file.filename.as_str(),
        None => "Choose image…",
    };

    let submit_label = if draft.in_flight {
        "Uploading…"
    } else {
        "Upload"
    };

    let controls = row![
        button(text(pick_label).size(14))
            .style(button::secondary)
            .on_press(Message::PickImagePressed)
            .padding(8),
        text_input("Caption (optional)", &draft.caption)
            .on_input(Message::CaptionChanged)
            .padding(8)
            .width(Length::Fill),
        checkbox("Private", draft.is_private).on_toggle(Message::PrivateToggled),
        button(text(submit_label))
            .on_press_maybe((!draft.in_flight).then_some(Message::UploadPressed))
            .padding(8),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut panel = column![controls].spacing(6);

    if let Some(error) = &draft.error {
        panel = panel.push(text(error.as_str()).size(13).style(text::danger));
    }

    panel.into()
}
