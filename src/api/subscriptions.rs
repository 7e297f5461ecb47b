//! Subscription (`/abonnements`) endpoints.

use reqwest::Method;
use tracing::info;

use super::{ApiClient, ApiResult, Download};
use crate::models::{
    CancelRequest, Paginated, RecordId, RenewRequest, Subscription, SubscriptionFilter,
    SubscriptionInput,
};

/// Result of a renewal as the view needs it
#[derive(Debug, Clone, PartialEq)]
pub struct RenewOutcome {
    /// Record to display in place of the renewed one
    pub subscription: Subscription,
    /// Set when the server opened the new cycle as a new record
    pub redirect_to: Option<RecordId>,
}

impl ApiClient {
    pub async fn list_subscriptions(
        &self,
        filter: &SubscriptionFilter,
    ) -> ApiResult<Paginated<Subscription>> {
        self.get_page("/abonnements", &filter.query()).await
    }

    pub async fn get_subscription(&self, id: RecordId) -> ApiResult<Subscription> {
        self.get_data(&format!("/abonnements/{}", id), &[]).await
    }

    pub async fn create_subscription(&self, input: &SubscriptionInput) -> ApiResult<Subscription> {
        self.post_data("/abonnements", input).await
    }

    pub async fn update_subscription(
        &self,
        id: RecordId,
        input: &SubscriptionInput,
    ) -> ApiResult<Subscription> {
        self.put_data(&format!("/abonnements/{}", id), input).await
    }

    /// Soft delete; recoverable from the recycle bin.
    pub async fn delete_subscription(&self, id: RecordId) -> ApiResult<()> {
        self.execute(Method::DELETE, &format!("/abonnements/{}", id), &[]).await
    }

    /// Close the current cycle and open a new one with a payment. The
    /// server does all of it; nothing is retried or rolled back here.
    pub async fn renew_subscription(&self, id: RecordId, request: &RenewRequest) -> ApiResult<RenewOutcome> {
        let subscription: Subscription = self
            .post_data(&format!("/abonnements/{}/renew", id), request)
            .await?;
        let redirect_to = (subscription.id != id).then_some(subscription.id);
        info!(subscription = id, renewed_as = subscription.id, "Subscription renewed");
        Ok(RenewOutcome {
            subscription,
            redirect_to,
        })
    }

    /// Mark as Cancelled and fix the end date. The record stays listed.
    pub async fn cancel_subscription(&self, id: RecordId, request: &CancelRequest) -> ApiResult<Subscription> {
        self.post_data(&format!("/abonnements/{}/cancel", id), request)
            .await
    }

    /// Payment receipt as PDF
    pub async fn download_receipt(&self, id: RecordId) -> ApiResult<Download> {
        self.download(&format!("/abonnements/{}/receipt", id), &[]).await
    }
}
