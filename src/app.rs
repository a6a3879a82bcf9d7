//! Window shell for the flashcards page.
//! Paints the current `PageView`, turns clicks into events and runs effects in the background.

use eframe::egui;
use flashcards_app::models::CardInput;
use flashcards_app::page::{
    CardView, DeckNotice, Effect, Event, PageState, PageView, PaymentView, Route, perform, reduce,
    view,
};
use flashcards_app::services::Services;
use std::f32::consts::PI;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

const CARD_SIZE: egui::Vec2 = egui::vec2(200.0, 200.0);
const FLIP_SECONDS: f32 = 0.6;
const COLUMNS: usize = 3;

/// Main application state
pub struct MyApp {
    state: PageState,
    services: Services,
    runtime: tokio::runtime::Runtime,
    ctx: egui::Context,
    events_tx: UnboundedSender<Event>,
    events_rx: UnboundedReceiver<Event>,

    // Widget-owned input, never part of page state
    card_input: CardInput,
    location: String,
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
        }

        let page = view(&self.state);

        // We store actions to execute after UI rendering to avoid borrowing conflicts
        let mut actions: Vec<Event> = Vec::new();

        egui::TopBottomPanel::top("address_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Location:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.location)
                        .desired_width(320.0)
                        .hint_text("/flashcards?id=deck"),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Go").clicked() || submitted {
                    actions.push(Event::Navigated(Route::parse(&self.location)));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match self.state.identity.active_user() {
                        Some(user) => ui.label(format!("Signed in as {}", user)),
                        None => ui.weak("Signed out"),
                    };
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.heading(page.heading);
                    ui.add_space(24.0);

                    render_notice(ui, &page, &mut actions);
                    render_cards(ui, &page.cards, &mut actions);

                    ui.add_space(32.0);
                    ui.separator();
                    ui.add_space(16.0);

                    render_payment(ui, &page.payment, &mut self.card_input, &mut actions);
                });
            });
        });

        // Execute deferred actions
        for event in actions {
            self.dispatch(event);
        }
    }
}

impl MyApp {
    /// Creates the app and replays the initial navigation and identity into the page
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        services: Services,
        runtime: tokio::runtime::Runtime,
        route: Route,
    ) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let mut app = Self {
            state: PageState::new(services.payments.is_some()),
            location: route.to_location(),
            services,
            runtime,
            ctx: cc.egui_ctx.clone(),
            events_tx,
            events_rx,
            card_input: CardInput::default(),
        };

        app.dispatch(Event::Navigated(route));
        let identity = app.services.identity.current();
        app.dispatch(Event::IdentityChanged(identity));
        app
    }

    fn dispatch(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = reduce(state, event);
        self.state = next;

        for effect in effects {
            self.spawn(effect);
        }
    }

    /// Runs an effect on the runtime; its result comes back through the event channel
    fn spawn(&self, effect: Effect) {
        let services = self.services.clone();
        let tx = self.events_tx.clone();
        let ctx = self.ctx.clone();

        self.runtime.spawn(async move {
            let event = perform(effect, &services).await;
            if tx.send(event).is_err() {
                tracing::debug!("Page closed before effect finished");
            }
            ctx.request_repaint();
        });
    }
}

fn render_notice(ui: &mut egui::Ui, page: &PageView, actions: &mut Vec<Event>) {
    match &page.notice {
        Some(DeckNotice::Loading) => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading flashcards...");
            });
        }
        Some(DeckNotice::Failed(message)) => {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("Could not load flashcards: {}", message),
            );
            if ui.button("Retry").clicked() {
                actions.push(Event::DeckRetryRequested);
            }
        }
        None => {}
    }
}

fn render_cards(ui: &mut egui::Ui, cards: &[CardView], actions: &mut Vec<Event>) {
    if cards.is_empty() {
        return;
    }

    egui::Grid::new("flashcards_grid")
        .spacing(egui::vec2(24.0, 24.0))
        .show(ui, |ui| {
            for (i, card) in cards.iter().enumerate() {
                if flip_card(ui, card).clicked() {
                    actions.push(Event::CardClicked(card.id.clone()));
                }
                if (i + 1) % COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
}

/// Paints one card, squeezing it horizontally while it turns over
fn flip_card(ui: &mut egui::Ui, card: &CardView) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(CARD_SIZE, egui::Sense::click());
    let progress = ui.ctx().animate_bool_with_time(
        egui::Id::new(("flashcard", &card.id)),
        card.flipped,
        FLIP_SECONDS,
    );

    if !ui.is_rect_visible(rect) {
        return response;
    }

    let showing_back = progress > 0.5;
    let width = rect.width() * (progress * PI).cos().abs();
    let face = egui::Rect::from_center_size(rect.center(), egui::vec2(width.max(1.0), rect.height()));

    let visuals = ui.visuals();
    let (fill, text_color, text) = if showing_back {
        (visuals.selection.bg_fill, egui::Color32::WHITE, &card.back)
    } else {
        (visuals.extreme_bg_color, visuals.strong_text_color(), &card.front)
    };
    let stroke = if response.hovered() {
        visuals.widgets.hovered.bg_stroke
    } else {
        visuals.widgets.noninteractive.bg_stroke
    };

    let painter = ui.painter();
    painter.rect(face, egui::Rounding::same(12.0), fill, stroke);

    // Only draw text once the face is wide enough to hold it
    if width > 40.0 {
        let galley = painter.layout(
            text.clone(),
            egui::FontId::proportional(20.0),
            text_color,
            face.width() - 24.0,
        );
        let pos = face.center() - galley.size() / 2.0;
        painter.galley(pos, galley, text_color);
    }

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

fn render_payment(
    ui: &mut egui::Ui,
    payment: &PaymentView,
    card_input: &mut CardInput,
    actions: &mut Vec<Event>,
) {
    match payment {
        PaymentView::Form {
            title,
            button_label,
            button_enabled,
            error,
        } => {
            ui.heading(*title);
            ui.add_space(12.0);

            egui::Frame::group(ui.style())
                .rounding(8.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_max_width(400.0);
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut card_input.number)
                                .desired_width(170.0)
                                .hint_text("Card number"),
                        );
                        ui.add(
                            egui::TextEdit::singleline(&mut card_input.exp_month)
                                .desired_width(32.0)
                                .hint_text("MM"),
                        );
                        ui.add(
                            egui::TextEdit::singleline(&mut card_input.exp_year)
                                .desired_width(32.0)
                                .hint_text("YY"),
                        );
                        ui.add(
                            egui::TextEdit::singleline(&mut card_input.cvc)
                                .desired_width(40.0)
                                .password(true)
                                .hint_text("CVC"),
                        );
                    });
                });

            ui.add_space(8.0);
            let button = egui::Button::new(*button_label).min_size(egui::vec2(400.0, 32.0));
            if ui.add_enabled(*button_enabled, button).clicked() {
                actions.push(Event::PaymentSubmitted(card_input.clone()));
            }

            if let Some(message) = error {
                ui.colored_label(ui.visuals().error_fg_color, message.as_str());
            }
        }
        PaymentView::Success { message } => {
            ui.heading(egui::RichText::new(*message).color(egui::Color32::from_rgb(46, 125, 50)));
        }
    }
}
