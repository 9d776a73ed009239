use crate::prediction::{PredictionForm, PredictionOutcome};
use chrono::{DateTime, Duration, Utc};

/// The result currently on display, with the time it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedPrediction {
    pub outcome: PredictionOutcome,
    pub predicted_at: DateTime<Utc>,
}

/// One user's interaction with the page.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    /// Widget values; the last submitted form, or the defaults.
    pub form: PredictionForm,
    pub current: Option<DisplayedPrediction>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            form: PredictionForm::default(),
            current: None,
            created_at: now,
            last_seen: now,
        }
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some()
    }

    /// True once the session has gone `idle_timeout` without a request.
    pub fn is_idle(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now - self.last_seen >= idle_timeout
    }

    /// Replaces the current result. Previous results are not kept.
    pub fn record(&mut self, form: PredictionForm, outcome: PredictionOutcome) {
        let now = Utc::now();
        self.form = form;
        self.current = Some(DisplayedPrediction {
            outcome,
            predicted_at: now,
        });
        self.last_seen = now;
    }
}
