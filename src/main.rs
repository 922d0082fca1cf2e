use clap::Parser;
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, scrollable, text};
use iced::{Alignment, Color, Element, Length, Subscription, Task, Theme};
use iced_aw::Wrap;
use tracing_subscriber::EnvFilter;

mod config;
mod remote;
mod state;
mod ui;

use config::Config;
use remote::client::ProviderClient;
use remote::thumbnail;
use state::data::{AnimalRecord, Category};
use state::gallery::{
    CategoryInput, ClickOrigin, CommitOutcome, FetchRequest, FixedPicker, Gallery, Popup,
    RandomPicker, RequestId,
};
use state::images::{ImageCache, LoadedImage};
use ui::card::CardView;
use ui::popup::DetailView;

const ERROR_COLOR: Color = Color {
    r: 0.937,
    g: 0.267,
    b: 0.267,
    a: 1.0,
};

/// One line of status text above the grid
#[derive(Debug, Clone, PartialEq, Eq)]
enum StatusLine {
    Loading,
    Error(String),
}

impl StatusLine {
    fn label(&self) -> String {
        match self {
            StatusLine::Loading => "Loading...".to_string(),
            StatusLine::Error(message) => format!("Error: {}", message),
        }
    }

    fn color(&self) -> Color {
        match self {
            StatusLine::Loading => Color::from_rgb(0.6, 0.6, 0.6),
            StatusLine::Error(_) => ERROR_COLOR,
        }
    }
}

/// What the window shows for a given gallery state
#[derive(Debug, Clone, PartialEq)]
struct Screen<'a> {
    status: Vec<StatusLine>,
    /// Records rendered as cards (no grid when empty)
    cards: &'a [AnimalRecord],
    /// Record shown in the popup stacked over everything
    popup: Option<&'a AnimalRecord>,
}

impl<'a> Screen<'a> {
    fn of(gallery: &'a Gallery) -> Self {
        let mut status = Vec::new();
        if gallery.is_loading() {
            status.push(StatusLine::Loading);
        }
        if let Some(message) = gallery.error_message() {
            status.push(StatusLine::Error(message.to_string()));
        }

        Screen {
            status,
            cards: gallery.records(),
            popup: match gallery.popup() {
                Popup::Open(record) => Some(record),
                Popup::Closed => None,
            },
        }
    }
}

/// Main application state
struct AnimalAlbum {
    /// Category, records and popup state
    gallery: Gallery,
    /// Downloaded images for the records on screen
    images: ImageCache,
    /// Shared HTTP client for records and images
    client: ProviderClient,
    config: Config,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// A category button was pressed (or a category token was handed over)
    SelectCategory(CategoryInput),
    /// A record fetch finished
    RecordsLoaded {
        id: RequestId,
        result: Result<Vec<AnimalRecord>, String>,
    },
    /// A record image finished downloading
    ImageLoaded {
        url: String,
        result: Result<LoadedImage, String>,
    },
    /// A card was clicked
    OpenDetail(AnimalRecord),
    /// The popup's close button was pressed
    CloseDetail,
    /// A click landed somewhere on the popup overlay
    ScrimClicked(ClickOrigin),
    /// Escape while the popup is open
    EscapePressed,
    /// F5: reload the current category
    Refresh,
}

impl AnimalAlbum {
    /// Create a new instance and start loading the startup category
    fn new(config: Config, client: ProviderClient) -> (Self, Task<Message>) {
        let mut gallery = Gallery::new();
        let request = match config.category {
            Some(category) => gallery.start(&mut FixedPicker(category)),
            None => gallery.start(&mut RandomPicker::new()),
        };

        tracing::info!("🐾 Animal Album starting against {}", config.base_url);

        let app = AnimalAlbum {
            gallery,
            images: ImageCache::new(),
            client,
            config,
        };

        let task = match request {
            Some(request) => app.fetch(request),
            None => Task::none(),
        };

        (app, task)
    }

    /// Run one record fetch in the background
    fn fetch(&self, request: FetchRequest) -> Task<Message> {
        let client = self.client.clone();
        let FetchRequest { id, category } = request;

        tracing::info!(%category, ?id, "fetching category");

        Task::perform(
            async move {
                client
                    .fetch_records(category)
                    .await
                    .map_err(|err| err.to_string())
            },
            move |result| Message::RecordsLoaded { id, result },
        )
    }

    /// Download every image the current records need
    fn load_images(&mut self) -> Task<Message> {
        let missing = self
            .images
            .sync(self.gallery.records(), self.gallery.selected_record());
        if missing.is_empty() {
            return Task::none();
        }

        tracing::debug!(count = missing.len(), cached = self.images.len(), "loading images");

        Task::batch(missing.into_iter().map(|url| {
            let client = self.client.clone();
            let size = self.config.thumbnail_size;
            let key = url.clone();

            Task::perform(thumbnail::load_image(client, url, size), move |result| {
                Message::ImageLoaded {
                    url: key.clone(),
                    result: result.map_err(|err| err.to_string()),
                }
            })
        }))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectCategory(input) => match self.gallery.select_category(input) {
                Some(request) => self.fetch(request),
                None => Task::none(),
            },
            Message::Refresh => match self.gallery.refetch() {
                Some(request) => self.fetch(request),
                None => Task::none(),
            },
            Message::RecordsLoaded { id, result } => match self.gallery.commit(id, result) {
                CommitOutcome::Applied => self.load_images(),
                CommitOutcome::Stale => Task::none(),
            },
            Message::ImageLoaded { url, result } => {
                self.images.finish(&url, result);
                Task::none()
            }
            Message::OpenDetail(record) => {
                self.gallery.open_detail(&record);
                Task::none()
            }
            Message::CloseDetail => {
                self.gallery.close_detail();
                Task::none()
            }
            Message::ScrimClicked(origin) => {
                self.gallery.scrim_clicked(origin);
                Task::none()
            }
            Message::EscapePressed => {
                self.gallery.escape_pressed();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let selected = self.gallery.selected_category();
        let buttons: Vec<Element<Message>> = Category::ALL
            .into_iter()
            .map(|category| {
                let style: fn(&Theme, button::Status) -> button::Style =
                    if selected == Some(category) {
                        button::primary
                    } else {
                        button::secondary
                    };

                button(text(category.label()).size(18))
                    .padding([8, 16])
                    .style(style)
                    .on_press(Message::SelectCategory(CategoryInput::Event {
                        value: Some(category.token().to_string()),
                    }))
                    .into()
            })
            .collect();

        let mut content = column![
            text("Animal Album").size(40),
            Wrap::with_elements(buttons).spacing(12.0).line_spacing(12.0),
        ]
        .spacing(24)
        .padding(32)
        .align_x(Alignment::Center);

        let screen = Screen::of(&self.gallery);

        for line in &screen.status {
            content = content.push(text(line.label()).size(16).color(line.color()));
        }

        if !screen.cards.is_empty() {
            let cards: Vec<Element<Message>> = screen
                .cards
                .iter()
                .map(|record| CardView::new(record, self.images.get(&record.image_url)).view())
                .collect();
            content = content.push(Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0));
        }

        let base: Element<Message> = scrollable(
            container(content)
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .height(Length::Fill)
        .into();

        match screen.popup {
            Some(record) => {
                let detail = DetailView::new(record).view(self.images.get(&record.image_url));
                ui::popup::overlay(base, detail)
            }
            None => base,
        }
    }

    /// Keyboard listeners. The Escape listener only exists while the popup
    /// is open, so iced drops it as soon as the popup closes.
    fn subscription(&self) -> Subscription<Message> {
        let refresh = keyboard::on_key_press(refresh_on_f5);

        if self.gallery.is_popup_open() {
            Subscription::batch([refresh, keyboard::on_key_press(close_on_escape)])
        } else {
            refresh
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn close_on_escape(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    matches!(key, Key::Named(Named::Escape)).then_some(Message::EscapePressed)
}

fn refresh_on_f5(key: Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    matches!(key, Key::Named(Named::F5)).then_some(Message::Refresh)
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("animal_album=info")),
        )
        .init();

    let config = Config::parse();

    let client = match ProviderClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(%err, "could not create HTTP client");
            std::process::exit(1);
        }
    };

    iced::application("Animal Album", AnimalAlbum::update, AnimalAlbum::view)
        .subscription(AnimalAlbum::subscription)
        .theme(AnimalAlbum::theme)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || AnimalAlbum::new(config, client))
}
