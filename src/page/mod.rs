//! The flashcards page: navigation, state machine, effects and view projection.

pub mod effects;
pub mod route;
pub mod state;
pub mod view;

pub use effects::perform;
pub use route::Route;
pub use state::{DeckStatus, Effect, Event, PageState, PaymentState, reduce};
pub use view::{CardView, DeckNotice, PageView, PaymentView, view};
