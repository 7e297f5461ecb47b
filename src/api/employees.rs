//! Employee endpoints (admin only on the server side).

use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::models::{Employee, EmployeeInput, Paginated, RecordId};

impl ApiClient {
    pub async fn list_employees(&self, search: Option<&str>, page: u32) -> ApiResult<Paginated<Employee>> {
        let mut query = vec![("page", page.max(1).to_string())];
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        self.get_page("/employees", &query).await
    }

    pub async fn get_employee(&self, id: RecordId) -> ApiResult<Employee> {
        self.get_data(&format!("/employees/{}", id), &[]).await
    }

    pub async fn create_employee(&self, input: &EmployeeInput) -> ApiResult<Employee> {
        self.post_data("/employees", input).await
    }

    pub async fn update_employee(&self, id: RecordId, input: &EmployeeInput) -> ApiResult<Employee> {
        self.put_data(&format!("/employees/{}", id), input).await
    }

    /// Soft delete. `transfer_to` hands the employee's clients to another
    /// employee; whether deleting without one is allowed is the server's call.
    pub async fn delete_employee(&self, id: RecordId, transfer_to: Option<RecordId>) -> ApiResult<()> {
        let query: Vec<(&'static str, String)> = transfer_to
            .map(|target| vec![("transfer_to", target.to_string())])
            .unwrap_or_default();
        self.execute(Method::DELETE, &format!("/employees/{}", id), &query).await
    }
}
