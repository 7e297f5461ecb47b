//! Subscription lifecycle rules: billing-period end dates, the displayed
//! status overlay, and the create/edit form session.

use chrono::{Months, NaiveDate};

use crate::api::error::ValidationErrors;
use crate::models::{OfferType, RecordId, SubscriptionInput, SubscriptionStatus};

/// End of the billing period that starts on `start`.
///
/// Adds whole calendar months. When the target month is shorter, the day is
/// clamped to its last day (Jan 31 + 1 month = Feb 29 in a leap year).
pub fn end_date(start: NaiveDate, offer: OfferType) -> NaiveDate {
    start
        .checked_add_months(Months::new(offer.months()))
        .unwrap_or(NaiveDate::MAX)
}

/// Status shown to the user. Never written back to the server.
///
/// Cancelled always stays Cancelled. Any other subscription whose end date
/// lies strictly before `today` is shown as Expired.
pub fn effective_status(
    status: SubscriptionStatus,
    end: NaiveDate,
    today: NaiveDate,
) -> SubscriptionStatus {
    match status {
        SubscriptionStatus::Cancelled => SubscriptionStatus::Cancelled,
        _ if end < today => SubscriptionStatus::Expired,
        stored => stored,
    }
}

/// Days left until `end`; negative once past.
pub fn days_remaining(end: NaiveDate, today: NaiveDate) -> i64 {
    (end - today).num_days()
}

/// Still running but ending within `window_days`.
pub fn is_expiring(
    status: SubscriptionStatus,
    end: NaiveDate,
    today: NaiveDate,
    window_days: i64,
) -> bool {
    effective_status(status, end, today) == SubscriptionStatus::Active
        && (0..=window_days).contains(&days_remaining(end, today))
}

/// A cancelled subscription can only be deleted.
pub fn is_editable(status: SubscriptionStatus) -> bool {
    status != SubscriptionStatus::Cancelled
}

/// Renewal is offered for anything that has not been cancelled.
pub fn is_renewable(status: SubscriptionStatus) -> bool {
    status != SubscriptionStatus::Cancelled
}

/// State of a subscription create/edit/renew form.
///
/// Changing the start date or the offer type recomputes the end date. A
/// manual end date is kept until one of those changes again.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionForm {
    pub client_id: Option<RecordId>,
    pub employee_id: Option<RecordId>,
    pub price: Option<f64>,
    pub status: SubscriptionStatus,
    start_date: NaiveDate,
    offer_type: OfferType,
    end_date: NaiveDate,
    end_date_overridden: bool,
}

impl SubscriptionForm {
    pub fn new(start_date: NaiveDate, offer_type: OfferType) -> Self {
        Self {
            client_id: None,
            employee_id: None,
            price: None,
            status: SubscriptionStatus::Active,
            start_date,
            offer_type,
            end_date: end_date(start_date, offer_type),
            end_date_overridden: false,
        }
    }

    /// Form pre-filled from a stored record; its end date counts as manual.
    pub fn from_existing(input: &SubscriptionInput) -> Self {
        Self {
            client_id: Some(input.client_id),
            employee_id: input.employee_id,
            price: Some(input.price),
            status: input.status,
            start_date: input.start_date,
            offer_type: input.offer_type,
            end_date: input.end_date,
            end_date_overridden: true,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn offer_type(&self) -> OfferType {
        self.offer_type
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn end_date_overridden(&self) -> bool {
        self.end_date_overridden
    }

    pub fn set_start_date(&mut self, start: NaiveDate) {
        self.start_date = start;
        self.recompute();
    }

    pub fn set_offer_type(&mut self, offer: OfferType) {
        self.offer_type = offer;
        self.recompute();
    }

    pub fn set_end_date(&mut self, end: NaiveDate) {
        self.end_date = end;
        self.end_date_overridden = true;
    }

    fn recompute(&mut self) {
        self.end_date = end_date(self.start_date, self.offer_type);
        self.end_date_overridden = false;
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::builder();
        if self.client_id.is_none() {
            errors.add("client_id", "A client is required");
        }
        match self.price {
            None => {
                errors.add("price", "Price is required");
            }
            Some(price) => {
                if let Err(e) = super::validation::validate_price(price) {
                    errors.add("price", e);
                }
            }
        }
        if let Err(e) = super::validation::validate_period(self.start_date, self.end_date) {
            errors.add("end_date", e);
        }
        errors.finish()
    }

    /// Checks for a renewal: the new period as on any form, and a payment
    /// greater than zero.
    pub fn validate_renewal(&self, amount_paid: f64) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::builder();
        if let Err(e) = super::validation::validate_amount(amount_paid) {
            errors.add("amount_paid", e);
        }
        if let Err(e) = super::validation::validate_period(self.start_date, self.end_date) {
            errors.add("end_date", e);
        }
        errors.finish()
    }

    /// Validated payload for create/update.
    pub fn to_input(&self) -> Result<SubscriptionInput, ValidationErrors> {
        self.validate()?;
        Ok(SubscriptionInput {
            client_id: self.client_id.unwrap_or_default(),
            employee_id: self.employee_id,
            offer_type: self.offer_type,
            price: self.price.unwrap_or_default(),
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_date_fixed_periods() {
        let start = date(2024, 1, 15);
        assert_eq!(end_date(start, OfferType::Monthly), date(2024, 2, 15));
        assert_eq!(end_date(start, OfferType::Quarterly), date(2024, 4, 15));
        assert_eq!(end_date(start, OfferType::Semiannual), date(2024, 7, 15));
        assert_eq!(end_date(start, OfferType::Annual), date(2025, 1, 15));
    }

    #[test]
    fn test_end_date_clamps_short_months() {
        assert_eq!(end_date(date(2024, 1, 31), OfferType::Monthly), date(2024, 2, 29));
        assert_eq!(end_date(date(2023, 1, 31), OfferType::Monthly), date(2023, 2, 28));
        assert_eq!(end_date(date(2024, 2, 29), OfferType::Annual), date(2025, 2, 28));
    }

    #[test]
    fn test_effective_status_overlay() {
        let today = date(2024, 6, 10);
        let yesterday = date(2024, 6, 9);

        assert_eq!(
            effective_status(SubscriptionStatus::Active, yesterday, today),
            SubscriptionStatus::Expired
        );
        assert_eq!(
            effective_status(SubscriptionStatus::Suspended, yesterday, today),
            SubscriptionStatus::Expired
        );
        assert_eq!(
            effective_status(SubscriptionStatus::Active, today, today),
            SubscriptionStatus::Active
        );
        for end in [yesterday, today, date(2030, 1, 1)] {
            assert_eq!(
                effective_status(SubscriptionStatus::Cancelled, end, today),
                SubscriptionStatus::Cancelled
            );
        }
    }

    #[test]
    fn test_is_expiring_window() {
        let today = date(2024, 6, 10);
        assert!(is_expiring(SubscriptionStatus::Active, date(2024, 6, 17), today, 7));
        assert!(is_expiring(SubscriptionStatus::Active, today, today, 7));
        assert!(!is_expiring(SubscriptionStatus::Active, date(2024, 6, 18), today, 7));
        assert!(!is_expiring(SubscriptionStatus::Active, date(2024, 6, 9), today, 7));
        assert!(!is_expiring(SubscriptionStatus::Cancelled, date(2024, 6, 12), today, 7));
    }

    #[test]
    fn test_form_manual_end_date_wins_until_inputs_change() {
        let mut form = SubscriptionForm::new(date(2024, 1, 15), OfferType::Monthly);
        assert_eq!(form.end_date(), date(2024, 2, 15));

        form.set_end_date(date(2024, 3, 1));
        assert!(form.end_date_overridden());
        assert_eq!(form.end_date(), date(2024, 3, 1));

        form.set_offer_type(OfferType::Annual);
        assert!(!form.end_date_overridden());
        assert_eq!(form.end_date(), date(2025, 1, 15));

        form.set_end_date(date(2024, 12, 31));
        form.set_start_date(date(2024, 2, 1));
        assert_eq!(form.end_date(), date(2025, 2, 1));
    }

    #[test]
    fn test_form_validation_reports_fields() {
        let mut form = SubscriptionForm::new(date(2024, 1, 15), OfferType::Monthly);
        form.set_end_date(date(2024, 1, 1));

        let errors = form.to_input().unwrap_err();
        assert!(errors.get("client_id").is_some());
        assert!(errors.get("price").is_some());
        assert!(errors.get("end_date").is_some());

        form.client_id = Some(4);
        form.price = Some(150.0);
        form.set_start_date(date(2024, 1, 15));
        let input = form.to_input().unwrap();
        assert_eq!(input.end_date, date(2024, 2, 15));
        assert_eq!(input.client_id, 4);
    }

    #[test]
    fn test_free_subscription_but_paid_renewal() {
        let mut form = SubscriptionForm::new(date(2024, 3, 1), OfferType::Monthly);
        form.client_id = Some(4);
        form.price = Some(0.0);
        assert_eq!(form.to_input().unwrap().price, 0.0);

        let errors = form.validate_renewal(0.0).unwrap_err();
        assert!(errors.get("amount_paid").is_some());
        assert!(form.validate_renewal(300.0).is_ok());
    }

    #[test]
    fn test_cancelled_is_read_only() {
        assert!(!is_editable(SubscriptionStatus::Cancelled));
        assert!(is_editable(SubscriptionStatus::Expired));
        assert!(!is_renewable(SubscriptionStatus::Cancelled));
    }
}
