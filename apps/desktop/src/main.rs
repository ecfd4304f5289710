use chatter_core::{
    BackendConfig, Completion, HttpBackend, LifecycleState, RequestLifecycleController,
    SummaryResult, format_sentiment,
};
use iced::widget::{button, column, container, scrollable, text, text_input};
use iced::{Element, Length, Task};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = BackendConfig::load()?;
    let backend = HttpBackend::new(&config)?;

    iced::application(move || App::new(backend.clone()), App::update, App::view)
        .title("Chatter")
        .run()?;
    Ok(())
}

struct App {
    controller: RequestLifecycleController<HttpBackend>,
    url: String,
    show_chunks: bool,
}

#[derive(Debug, Clone)]
enum Message {
    UrlChanged(String),
    Submit,
    Finished(Completion),
    ToggleChunks,
    SummarizeAnother,
}

impl App {
    fn new(backend: HttpBackend) -> (Self, Task<Message>) {
        (
            Self {
                controller: RequestLifecycleController::new(backend),
                url: String::new(),
                show_chunks: false,
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UrlChanged(url) => self.url = url,
            Message::Submit => match self.controller.begin_submit(&self.url) {
                Ok(in_flight) => return Task::perform(in_flight.run(), Message::Finished),
                Err(rejected) => debug!(%rejected, "submit ignored"),
            },
            Message::Finished(completion) => {
                self.controller.complete(completion);
            }
            Message::ToggleChunks => self.show_chunks = !self.show_chunks,
            Message::SummarizeAnother => {
                self.controller.reset();
                self.url.clear();
                self.show_chunks = false;
            }
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.controller.state() {
            LifecycleState::Ready => self.form(),
            LifecycleState::Loading => text("Working magic...").size(18).into(),
            LifecycleState::Error(message) => column![
                container(text(format!("Failed: {message}"))).padding(10),
                self.form(),
            ]
            .spacing(12)
            .into(),
            LifecycleState::Done(result) => self.summary(result),
        };

        column![text("YouTube Comment Summarizer").size(28), body]
            .padding(20)
            .spacing(16)
            .into()
    }

    fn form(&self) -> Element<'_, Message> {
        let can_submit = !self.url.trim().is_empty();
        let input = text_input("Paste YouTube video URL here...", &self.url)
            .on_input(Message::UrlChanged);
        let input = if can_submit {
            input.on_submit(Message::Submit)
        } else {
            input
        };

        column![
            input,
            button("Summarize").on_press_maybe(can_submit.then_some(Message::Submit)),
        ]
        .spacing(10)
        .into()
    }

    fn summary<'a>(&'a self, result: &'a SummaryResult) -> Element<'a, Message> {
        let mut content = column![
            text("Summary").size(22),
            text(result.summary.as_str()),
            text(format_sentiment(result)),
        ]
        .spacing(10);

        let toggle = if self.show_chunks {
            "Hide Summary Chunks"
        } else {
            "Show Summary Chunks"
        };
        content = content.push(button(toggle).on_press(Message::ToggleChunks));

        if self.show_chunks {
            let chunks = column(
                result
                    .raw_summary_chunks
                    .iter()
                    .map(|chunk| text(chunk.as_str()).into()),
            )
            .spacing(6);
            content = content.push(scrollable(chunks).height(Length::Fixed(220.0)));
        }

        content
            .push(button("Summarize another!").on_press(Message::SummarizeAnother))
            .into()
    }
}
