use serde::Serialize;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
/// Anchor of the booking form section on the home page.
pub const APPOINTMENTS_ANCHOR: &str = "/#appointments";

/// What a user-specific screen decided to do before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome<T> {
    Render(T),
    Redirect { location: &'static str },
}

impl<T> ScreenOutcome<T> {
    pub fn to_login() -> Self {
        ScreenOutcome::Redirect { location: LOGIN_PATH }
    }
}

/// Remote listing as a screen shows it: skeleton placeholders while loading,
/// an empty-state message, or the rows in the order the backend sent them.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Listing<T> {
    Loading { placeholders: usize },
    Empty { title: &'static str, message: &'static str },
    Ready { items: Vec<T> },
}

impl<T> Listing<T> {
    pub fn loading(placeholders: usize) -> Self {
        Listing::Loading { placeholders }
    }

    pub fn from_items(items: Vec<T>, empty_title: &'static str, empty_message: &'static str) -> Self {
        if items.is_empty() {
            Listing::Empty {
                title: empty_title,
                message: empty_message,
            }
        } else {
            Listing::Ready { items }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Listing::Loading { .. })
    }

    pub fn items(&self) -> &[T] {
        match self {
            Listing::Ready { items } => items,
            _ => &[],
        }
    }
}

/// Where a "Book Appointment" button leads.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookAction {
    ScrollToAppointments { href: &'static str },
    Login { href: &'static str },
}

impl BookAction {
    pub fn for_visitor(signed_in: bool) -> Self {
        if signed_in {
            BookAction::ScrollToAppointments { href: APPOINTMENTS_ANCHOR }
        } else {
            BookAction::Login { href: LOGIN_PATH }
        }
    }
}
