//! Pure projection of `PageState` into what the window shows.

use super::state::{DeckStatus, PageState, PaymentState};

pub const HEADING: &str = "Your Flashcards";
pub const PURCHASE_TITLE: &str = "Purchase More Flashcards";
pub const PAY_LABEL: &str = "Pay $9.99";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const SUCCESS_MESSAGE: &str = "Payment Successful! Enjoy your new flashcards.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub front: String,
    pub back: String,
    pub flipped: bool,
}

impl CardView {
    /// Text on the face currently shown.
    pub fn shown(&self) -> &str {
        if self.flipped { &self.back } else { &self.front }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeckNotice {
    Loading,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentView {
    Form {
        title: &'static str,
        button_label: &'static str,
        button_enabled: bool,
        error: Option<String>,
    },
    Success {
        message: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    pub heading: &'static str,
    pub cards: Vec<CardView>,
    pub notice: Option<DeckNotice>,
    pub payment: PaymentView,
}

pub fn view(state: &PageState) -> PageView {
    let (cards, notice) = match &state.deck {
        DeckStatus::Empty => (Vec::new(), None),
        DeckStatus::Loading => (Vec::new(), Some(DeckNotice::Loading)),
        DeckStatus::Failed(message) => (Vec::new(), Some(DeckNotice::Failed(message.clone()))),
        DeckStatus::Loaded(deck) => {
            let cards = deck
                .flashcards
                .iter()
                .map(|card| CardView {
                    id: card.id.clone(),
                    front: card.front.clone(),
                    back: card.back.clone(),
                    flipped: state.flips.is_flipped(&card.id),
                })
                .collect();
            (cards, None)
        }
    };

    let payment = match &state.payment {
        PaymentState::Succeeded { .. } => PaymentView::Success {
            message: SUCCESS_MESSAGE,
        },
        PaymentState::Submitting => PaymentView::Form {
            title: PURCHASE_TITLE,
            button_label: PROCESSING_LABEL,
            button_enabled: false,
            error: None,
        },
        PaymentState::Idle { last_error } => PaymentView::Form {
            title: PURCHASE_TITLE,
            button_label: PAY_LABEL,
            button_enabled: state.tokenizer_ready,
            error: last_error.clone(),
        },
    };

    PageView {
        heading: HEADING,
        cards,
        notice,
        payment,
    }
}
