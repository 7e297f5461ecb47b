//! Client endpoints.

use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Client, ClientFilter, ClientInput, Paginated, RecordId};

impl ApiClient {
    pub async fn list_clients(&self, filter: &ClientFilter) -> ApiResult<Paginated<Client>> {
        self.get_page("/clients", &filter.query()).await
    }

    pub async fn get_client(&self, id: RecordId) -> ApiResult<Client> {
        self.get_data(&format!("/clients/{}", id), &[]).await
    }

    pub async fn create_client(&self, input: &ClientInput) -> ApiResult<Client> {
        self.post_data("/clients", input).await
    }

    pub async fn update_client(&self, id: RecordId, input: &ClientInput) -> ApiResult<Client> {
        self.put_data(&format!("/clients/{}", id), input).await
    }

    /// Soft delete; the client moves to the recycle bin.
    pub async fn delete_client(&self, id: RecordId) -> ApiResult<()> {
        self.execute(Method::DELETE, &format!("/clients/{}", id), &[]).await
    }
}
