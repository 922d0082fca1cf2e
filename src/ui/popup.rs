/// Detail popup shown over the gallery
///
/// The overlay has two layers: a dimmed scrim covering the window and the
/// detail card in its center. Both report clicks with their `ClickOrigin`
/// so the gallery only closes on clicks that land on the scrim.
use iced::widget::{button, center, column, container, image, mouse_area, opaque, row, scrollable, stack, text, Space};
use iced::{Background, Border, Color, ContentFit, Element, Length, Theme};

use super::card::HEART_COLOR;
use crate::state::data::AnimalRecord;
use crate::state::gallery::ClickOrigin;
use crate::state::images::ImageSlot;
use crate::Message;

/// #F3BFB3
const POPUP_BACKGROUND: Color = Color {
    r: 0.953,
    g: 0.749,
    b: 0.702,
    a: 1.0,
};

const SCRIM: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.75,
};

/// Fields of the selected record as the popup displays them
pub struct DetailView<'a> {
    record: &'a AnimalRecord,
}

impl<'a> DetailView<'a> {
    pub fn new(record: &'a AnimalRecord) -> Self {
        Self { record }
    }

    pub fn description(&self) -> &'a str {
        &self.record.description
    }

    pub fn likes(&self) -> u64 {
        self.record.likes
    }

    pub fn name(&self) -> &'a str {
        &self.record.user.name
    }

    /// `None` when the provider sent its "null" sentinel
    pub fn location(&self) -> Option<&'a str> {
        self.record.location()
    }

    pub fn view(self, image_slot: Option<&'a ImageSlot>) -> Element<'a, Message> {
        let close = button(text("X").size(28).color(Color::BLACK))
            .style(button::text)
            .on_press(Message::CloseDetail);
        let header = row![Space::with_width(Length::Fill), close];

        let picture: Element<'a, Message> = match image_slot {
            Some(ImageSlot::Ready(loaded)) => image(loaded.full.clone())
                .width(Length::Fill)
                .content_fit(ContentFit::ScaleDown)
                .into(),
            Some(ImageSlot::Failed) => text("Image unavailable").into(),
            Some(ImageSlot::Loading) | None => text("Loading image...").into(),
        };

        let mut details = column![
            header,
            picture,
            text(self.description()).size(24),
            text(format!("{} ♥", self.likes())).size(22).color(HEART_COLOR),
            text(format!("Name: {}", self.name())).size(18),
        ]
        .spacing(12)
        .padding(20);

        if let Some(location) = self.location() {
            details = details.push(text(format!("Location: {}", location)).size(18));
        }

        container(scrollable(details))
            .max_width(720.0)
            .style(|_theme: &Theme| container::Style {
                text_color: Some(Color::BLACK),
                background: Some(Background::Color(POPUP_BACKGROUND)),
                border: Border {
                    radius: 24.0.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            })
            .into()
    }
}

/// Stack `popup` over `base` behind a click-to-dismiss scrim
pub fn overlay<'a>(base: Element<'a, Message>, popup: Element<'a, Message>) -> Element<'a, Message> {
    let card = opaque(mouse_area(popup).on_press(Message::ScrimClicked(ClickOrigin::Content)));

    let scrim = mouse_area(center(card).padding(16).style(|_theme: &Theme| container::Style {
        background: Some(Background::Color(SCRIM)),
        ..container::Style::default()
    }))
    .on_press(Message::ScrimClicked(ClickOrigin::Scrim));

    stack![base, opaque(scrim)].into()
}
