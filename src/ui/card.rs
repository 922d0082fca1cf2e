/// Gallery card for a single record
use iced::widget::{button, column, container, image, text};
use iced::{Background, Border, Color, ContentFit, Element, Length, Theme};

use crate::state::data::AnimalRecord;
use crate::state::images::ImageSlot;
use crate::Message;

/// Width of one card in the grid
pub const CARD_WIDTH: f32 = 280.0;
const IMAGE_HEIGHT: f32 = 192.0;

/// #00042a
const CARD_BACKGROUND: Color = Color {
    r: 0.0,
    g: 0.016,
    b: 0.165,
    a: 1.0,
};

/// #e10e35
pub const HEART_COLOR: Color = Color {
    r: 0.882,
    g: 0.055,
    b: 0.208,
    a: 1.0,
};

/// Renders one record and emits `OpenDetail` when pressed
pub struct CardView<'a> {
    record: &'a AnimalRecord,
    image: Option<&'a ImageSlot>,
}

impl<'a> CardView<'a> {
    pub fn new(record: &'a AnimalRecord, image: Option<&'a ImageSlot>) -> Self {
        Self { record, image }
    }

    pub fn likes_label(&self) -> String {
        format!("{} ♥", self.record.likes)
    }

    pub fn view(self) -> Element<'a, Message> {
        let picture: Element<'a, Message> = match self.image {
            Some(ImageSlot::Ready(loaded)) => image(loaded.thumbnail.clone())
                .width(Length::Fill)
                .height(Length::Fixed(IMAGE_HEIGHT))
                .content_fit(ContentFit::Cover)
                .into(),
            Some(ImageSlot::Failed) => placeholder("Image unavailable"),
            Some(ImageSlot::Loading) | None => placeholder("Loading..."),
        };

        let likes = text(self.likes_label()).size(22).color(HEART_COLOR);

        // Two lines of description, the rest is cut off
        let description = container(text(&self.record.description).size(18))
            .height(Length::Fixed(48.0))
            .clip(true);

        let body = container(column![picture, likes, description].spacing(8))
            .padding(12)
            .width(Length::Fixed(CARD_WIDTH))
            .style(|_theme: &Theme| container::Style {
                text_color: Some(Color::WHITE),
                background: Some(Background::Color(CARD_BACKGROUND)),
                border: Border {
                    radius: 12.0.into(),
                    ..Border::default()
                },
                ..container::Style::default()
            });

        button(body)
            .padding(0)
            .style(button::text)
            .on_press(Message::OpenDetail(self.record.clone()))
            .into()
    }
}

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .height(Length::Fixed(IMAGE_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(IMAGE_HEIGHT))
        .into()
}
