// Presentation boundary - the only way the synchronizer talks to a UI
//
// The synchronizer always issues a full re-render through these calls; it
// never reads anything back.

use crate::entities::MovementKind;

/// One line of the movement list, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRow {
    /// 1-based position in the displayed order
    pub sequence: usize,
    pub kind: MovementKind,
    pub amount: f64,
    /// Signed amount with currency symbol (e.g., "-306,50 €")
    pub amount_text: String,
    pub date_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTexts {
    pub inflow: String,
    pub outflow: String,
    pub interest: String,
}

/// Output sink for the session view
pub trait Presenter {
    fn set_welcome_text(&mut self, text: &str);

    fn set_balance_text(&mut self, text: &str);

    fn set_summary_texts(&mut self, summary: &SummaryTexts);

    /// Replace the whole movement list
    fn set_movement_rows(&mut self, rows: &[MovementRow]);

    fn set_visible(&mut self, visible: bool);
}

pub const LOGGED_OUT_WELCOME: &str = "Log in to get started";

/// In-memory surface holding whatever was last written
///
/// The terminal UI draws from it; tests inspect it.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub welcome: String,
    pub balance: String,
    pub summary: SummaryTexts,
    pub rows: Vec<MovementRow>,
    pub visible: bool,
    /// Number of times the movement list was replaced
    pub row_renders: usize,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            welcome: LOGGED_OUT_WELCOME.to_string(),
            balance: String::new(),
            summary: SummaryTexts::default(),
            rows: Vec::new(),
            visible: false,
            row_renders: 0,
        }
    }
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for Screen {
    fn set_welcome_text(&mut self, text: &str) {
        self.welcome = text.to_string();
    }

    fn set_balance_text(&mut self, text: &str) {
        self.balance = text.to_string();
    }

    fn set_summary_texts(&mut self, summary: &SummaryTexts) {
        self.summary = summary.clone();
    }

    fn set_movement_rows(&mut self, rows: &[MovementRow]) {
        self.rows = rows.to_vec();
        self.row_renders += 1;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
