/// Gallery grid with scope tabs, spoiler masking and a detail overlay

use std::collections::HashMap;

use iced::widget::{
    button, center, checkbox, column, container, horizontal_space, image as iced_image,
    mouse_area, opaque, row, scrollable, text, Column,
};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::api::models::ImageRecord;
use crate::state::data::Scope;
use crate::state::gallery::{Gallery, LoadStatus};
use crate::Message;

/// Side of one square grid cell
const CELL_SIZE: f32 = 180.0;

/// Width of the detail card image
const DETAIL_WIDTH: f32 = 520.0;

/// Build the gallery body: scope tabs, controls, and the image grid
pub fn view<'a>(
    gallery: &'a Gallery,
    thumbnails: &'a HashMap<String, iced_image::Handle>,
) -> Element<'a, Message> {
    let controls = row![
        scope_tab(Scope::Public, gallery.scope()),
        scope_tab(Scope::Private, gallery.scope()),
        horizontal_space(),
        checkbox("Reveal private", gallery.reveal_spoilers()).on_toggle(Message::SpoilersToggled),
        button(text("Refresh").size(14))
            .style(button::secondary)
            .on_press(Message::RefreshPressed)
            .padding(8),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    let mut body: Column<Message> = column![controls].spacing(16);

    match gallery.status() {
        LoadStatus::Loading if gallery.items().is_empty() => {
            body = body.push(center(text("Loading…").size(16)));
        }
        _ => {
            if gallery.items().is_empty() {
                body = body.push(center(text("No images here yet. Upload one!").size(16)));
            } else {
                let cells: Vec<Element<Message>> = gallery
                    .items()
                    .iter()
                    .map(|image| cell(image, thumbnails.get(&image.id), gallery.reveal_spoilers()))
                    .collect();

                let grid = Wrap::with_elements(cells).spacing(12.0).line_spacing(12.0);

                body = body.push(scrollable(grid).height(Length::Fill).width(Length::Fill));
            }

            if gallery.status() == LoadStatus::LoadFailed {
                body = body.push(
                    text("Couldn't refresh. Showing the last loaded images.")
                        .size(13)
                        .style(text::danger),
                );
            }
        }
    }

    body.height(Length::Fill).into()
}

/// One tab of the public/private switch
fn scope_tab(scope: Scope, active: Scope) -> Element<'static, Message> {
    let style = if scope == active {
        button::primary
    } else {
        button::secondary
    };

    button(text(scope.label()).size(14))
        .style(style)
        .on_press(Message::ScopeSelected(scope))
        .padding(8)
        .into()
}

/// One grid cell: thumbnail or spoiler mask, with the caption underneath
fn cell<'a>(
    image: &'a ImageRecord,
    handle: Option<&iced_image::Handle>,
    reveal: bool,
) -> Element<'a, Message> {
    let masked = image.is_private && !reveal;

    let preview: Element<Message> = if masked {
        container(
            column![text("🔒").size(32), text("Private").size(13)]
                .spacing(4)
                .align_x(Alignment::Center),
        )
        .width(CELL_SIZE)
        .height(CELL_SIZE)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(container::rounded_box)
        .into()
    } else if let Some(handle) = handle {
        container(iced_image(handle.clone()).width(CELL_SIZE).height(CELL_SIZE))
            .style(container::rounded_box)
            .into()
    } else {
        // No decoded payload for this image
        container(text("?").size(32))
            .width(CELL_SIZE)
            .height(CELL_SIZE)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(container::rounded_box)
            .into()
    };

    let label = if image.caption.is_empty() {
        &image.filename
    } else {
        &image.caption
    };

    let content = column![preview, text(label.as_str()).size(13)]
        .spacing(6)
        .width(CELL_SIZE);

    mouse_area(content)
        .on_press(Message::ImageOpened(image.id.clone()))
        .into()
}

/// Detail card for the selected image, shown over the grid.
/// Clicking outside the card closes it.
pub fn detail<'a>(
    image: &'a ImageRecord,
    handle: Option<&iced_image::Handle>,
) -> Element<'a, Message> {
    let preview: Element<Message> = match handle {
        Some(handle) => iced_image(handle.clone()).width(DETAIL_WIDTH).into(),
        None => text("This image could not be decoded").size(14).into(),
    };

    let mut details: Column<Message> = column![preview].spacing(10);

    if !image.caption.is_empty() {
        details = details.push(text(image.caption.as_str()).size(16));
    }

    details = details.push(
        text(format!(
            "{} · {} · {}",
            image.filename,
            human_size(image.file_size),
            image.created_at.format("%b %e, %Y %H:%M"),
        ))
        .size(13),
    );

    if image.is_private {
        details = details.push(text("🔒 Only you can see this image").size(13));
    }

    details = details.push(
        row![
            button(text("Delete").size(14))
                .style(button::danger)
                .on_press(Message::DeleteRequested(image.id.clone()))
                .padding(8),
            horizontal_space(),
            button(text("Close").size(14))
                .style(button::secondary)
                .on_press(Message::DetailClosed)
                .padding(8),
        ]
        .spacing(12),
    );

    let card = container(details.max_width(DETAIL_WIDTH + 40.0))
        .padding(20)
        .style(container::rounded_box);

    opaque(
        mouse_area(center(opaque(card)))
            .on_press(Message::DetailClosed),
    )
}

/// Human-readable file size
fn human_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
