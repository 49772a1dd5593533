//! Other-transaction form state and validation
//!
//! Add and edit share one form object, seeded empty or from the selected
//! record. Validation runs before any network call; a violation surfaces a
//! notification and issues no request.

use chrono::NaiveDate;
use shared::models::{OtherTransaction, PayMethod, TransactionKind, TransactionPayload};

/// Dialog form backing the add/edit transaction flows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    /// Present when editing an existing record
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub amount: i64,
    pub kind: TransactionKind,
    pub category: String,
    /// Defaults to today when left unset on save
    pub date: Option<NaiveDate>,
    pub payment_method: PayMethod,
}

impl TransactionForm {
    /// Empty form for the add flow
    pub fn add() -> Self {
        Self::default()
    }

    /// Form seeded from an existing record for the edit flow
    pub fn edit(transaction: &OtherTransaction) -> Self {
        Self {
            id: Some(transaction.id.clone()),
            title: transaction.title.clone(),
            description: transaction.description.clone().unwrap_or_default(),
            amount: transaction.amount,
            kind: transaction.kind,
            category: transaction.category.clone().unwrap_or_default(),
            date: Some(transaction.date),
            payment_method: transaction.payment_method.unwrap_or_default(),
        }
    }

    /// Validate and lower the form to the wire payload
    ///
    /// `fallback_date` fills an unset date field. The error message is what
    /// the validation notification shows.
    pub fn payload(&self, fallback_date: NaiveDate) -> Result<TransactionPayload, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title must not be empty".to_string());
        }
        if self.amount <= 0 {
            return Err("Amount must be a positive number".to_string());
        }

        let description = self.description.trim();
        let category = self.category.trim();
        Ok(TransactionPayload {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            amount: self.amount,
            kind: self.kind,
            category: (!category.is_empty()).then(|| category.to_string()),
            date: self.date.unwrap_or(fallback_date),
            payment_method: Some(self.payment_method),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let form = TransactionForm {
            title: "   ".to_string(),
            amount: 1_000,
            ..TransactionForm::add()
        };
        assert!(form.payload(today()).is_err());
    }

    #[test]
    fn test_non_positive_amount_is_rejected() {
        let mut form = TransactionForm {
            title: "Rent".to_string(),
            amount: 0,
            ..TransactionForm::add()
        };
        assert!(form.payload(today()).is_err());
        form.amount = -5;
        assert!(form.payload(today()).is_err());
    }

    #[test]
    fn test_valid_form_lowers_to_payload() {
        let form = TransactionForm {
            title: "  Facility rent  ".to_string(),
            description: "".to_string(),
            amount: 12_000_000,
            kind: TransactionKind::Expense,
            category: "facilities".to_string(),
            date: None,
            payment_method: PayMethod::Transfer,
            id: None,
        };
        let payload = form.payload(today()).unwrap();
        assert_eq!(payload.title, "Facility rent");
        assert!(payload.description.is_none());
        assert_eq!(payload.category.as_deref(), Some("facilities"));
        assert_eq!(payload.date, today());
        assert_eq!(payload.payment_method, Some(PayMethod::Transfer));
    }

    #[test]
    fn test_edit_seeds_from_record() {
        let record = OtherTransaction {
            id: "txn-9".to_string(),
            title: "Book sales".to_string(),
            description: Some("June batch".to_string()),
            amount: 1_500_000,
            kind: TransactionKind::Income,
            category: None,
            date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            payment_method: Some(PayMethod::Cash),
        };
        let form = TransactionForm::edit(&record);
        assert_eq!(form.id.as_deref(), Some("txn-9"));
        assert_eq!(form.title, "Book sales");
        assert_eq!(form.description, "June batch");
        assert_eq!(form.category, "");
        assert_eq!(form.date, Some(record.date));

        // Round-trips back to an equivalent payload
        let payload = form.payload(today()).unwrap();
        assert_eq!(payload.amount, 1_500_000);
        assert_eq!(payload.kind, TransactionKind::Income);
        assert_eq!(payload.date, record.date);
    }
}
