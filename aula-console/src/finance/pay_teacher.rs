//! Teacher-payout dialog state machine
//!
//! `Idle → AmountEntered → Confirming → Submitting → (Idle | AmountEntered)`.
//! The validation gate sits between `AmountEntered` and `Confirming`; a
//! rejected amount never reaches the confirmation dialog. Submission
//! failure reopens `AmountEntered` with the draft intact so the user can
//! retry or adjust.

use shared::models::{PayMethod, TeacherPayment};

/// Payout details accumulated across the dialog states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayDraft {
    pub payment_id: String,
    /// Billing period of the payment being settled
    pub month: u32,
    pub year: i32,
    /// Ceiling for the payout: `totalAmount - paidAmount` at dialog open
    pub remaining: i64,
    pub amount: i64,
    pub method: PayMethod,
    pub note: Option<String>,
}

/// Dialog state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PayTeacherFlow {
    #[default]
    Idle,
    AmountEntered(PayDraft),
    Confirming(PayDraft),
    Submitting(PayDraft),
}

impl PayTeacherFlow {
    /// Open the dialog for a payment, seeding a zero-amount draft
    pub fn begin(payment: &TeacherPayment) -> Self {
        Self::AmountEntered(PayDraft {
            payment_id: payment.id.clone(),
            month: payment.month,
            year: payment.year,
            remaining: payment.remaining(),
            amount: 0,
            method: PayMethod::default(),
            note: None,
        })
    }

    /// The draft, in any non-idle state
    pub fn draft(&self) -> Option<&PayDraft> {
        match self {
            Self::Idle => None,
            Self::AmountEntered(d) | Self::Confirming(d) | Self::Submitting(d) => Some(d),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Update the entered amount; ignored outside `AmountEntered`
    pub fn set_amount(&mut self, amount: i64) {
        if let Self::AmountEntered(draft) = self {
            draft.amount = amount;
        }
    }

    /// Update the payout method; ignored outside `AmountEntered`
    pub fn set_method(&mut self, method: PayMethod) {
        if let Self::AmountEntered(draft) = self {
            draft.method = method;
        }
    }

    /// Update the note; ignored outside `AmountEntered`
    pub fn set_note(&mut self, note: Option<String>) {
        if let Self::AmountEntered(draft) = self {
            draft.note = note;
        }
    }

    /// Validate the amount and advance to `Confirming`
    ///
    /// A violation leaves the state unchanged and returns the message to
    /// surface as a validation notification.
    pub fn request_confirm(&mut self) -> Result<(), String> {
        let Self::AmountEntered(draft) = self else {
            return Err("No payout in progress".to_string());
        };
        if draft.amount <= 0 {
            return Err("Payout amount must be greater than zero".to_string());
        }
        if draft.amount > draft.remaining {
            return Err(format!(
                "Payout amount exceeds the remaining balance of {}",
                draft.remaining
            ));
        }
        *self = Self::Confirming(draft.clone());
        Ok(())
    }

    /// Advance `Confirming → Submitting`, yielding the draft to send
    pub fn begin_submit(&mut self) -> Option<PayDraft> {
        let Self::Confirming(draft) = self else {
            return None;
        };
        let draft = draft.clone();
        *self = Self::Submitting(draft.clone());
        Some(draft)
    }

    /// Submission failed: reopen `AmountEntered` with the draft intact
    pub fn submit_failed(&mut self) {
        if let Self::Submitting(draft) = self {
            *self = Self::AmountEntered(draft.clone());
        }
    }

    /// Submission succeeded: close the dialog
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }

    /// Cancel from any non-submitting state, discarding the draft
    ///
    /// Returns `false` (and stays put) while a submission is in flight.
    pub fn cancel(&mut self) -> bool {
        if matches!(self, Self::Submitting(_)) {
            return false;
        }
        *self = Self::Idle;
        true
    }
}
