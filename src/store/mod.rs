//! Per-entity list stores: fetch a page into a [`ListState`] and keep it in
//! step with confirmed mutations.

use async_trait::async_trait;
use tracing::debug;

use crate::api::{ApiClient, ApiResult};
use crate::domain::{AfterRemoval, ListState};
use crate::models::{
    Client, ClientFilter, ClientInput, Employee, EmployeeInput, Identified, Paginated, RecordId,
    Subscription, SubscriptionFilter, SubscriptionInput, TrashResource, TrashedRecord,
};

/// A paginated collection the backend exposes
#[async_trait]
pub trait Resource: Send + Sync {
    type Record: Identified + Send;

    async fn fetch(&self, api: &ApiClient, page: u32) -> ApiResult<Paginated<Self::Record>>;

    async fn delete(&self, api: &ApiClient, id: RecordId) -> ApiResult<()>;
}

/// A collection whose records can also be created and edited
#[async_trait]
pub trait Editable: Resource {
    type Input: Sync;

    async fn create(&self, api: &ApiClient, input: &Self::Input) -> ApiResult<Self::Record>;

    async fn update(&self, api: &ApiClient, id: RecordId, input: &Self::Input) -> ApiResult<Self::Record>;
}

pub struct Clients(pub ClientFilter);

#[async_trait]
impl Resource for Clients {
    type Record = Client;

    async fn fetch(&self, api: &ApiClient, page: u32) -> ApiResult<Paginated<Client>> {
        let filter = ClientFilter {
            page,
            ..self.0.clone()
        };
        api.list_clients(&filter).await
    }

    async fn delete(&self, api: &ApiClient, id: RecordId) -> ApiResult<()> {
        api.delete_client(id).await
    }
}

#[async_trait]
impl Editable for Clients {
    type Input = ClientInput;

    async fn create(&self, api: &ApiClient, input: &ClientInput) -> ApiResult<Client> {
        api.create_client(input).await
    }

    async fn update(&self, api: &ApiClient, id: RecordId, input: &ClientInput) -> ApiResult<Client> {
        api.update_client(id, input).await
    }
}

pub struct Subscriptions(pub SubscriptionFilter);

#[async_trait]
impl Resource for Subscriptions {
    type Record = Subscription;

    async fn fetch(&self, api: &ApiClient, page: u32) -> ApiResult<Paginated<Subscription>> {
        let filter = SubscriptionFilter {
            page,
            ..self.0.clone()
        };
        api.list_subscriptions(&filter).await
    }

    async fn delete(&self, api: &ApiClient, id: RecordId) -> ApiResult<()> {
        api.delete_subscription(id).await
    }
}

#[async_trait]
impl Editable for Subscriptions {
    type Input = SubscriptionInput;

    async fn create(&self, api: &ApiClient, input: &SubscriptionInput) -> ApiResult<Subscription> {
        api.create_subscription(input).await
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: RecordId,
        input: &SubscriptionInput,
    ) -> ApiResult<Subscription> {
        api.update_subscription(id, input).await
    }
}

pub struct Employees {
    pub search: Option<String>,
    /// Receives the deleted employee's clients
    pub transfer_to: Option<RecordId>,
}

#[async_trait]
impl Resource for Employees {
    type Record = Employee;

    async fn fetch(&self, api: &ApiClient, page: u32) -> ApiResult<Paginated<Employee>> {
        api.list_employees(self.search.as_deref(), page).await
    }

    async fn delete(&self, api: &ApiClient, id: RecordId) -> ApiResult<()> {
        api.delete_employee(id, self.transfer_to).await
    }
}

#[async_trait]
impl Editable for Employees {
    type Input = EmployeeInput;

    async fn create(&self, api: &ApiClient, input: &EmployeeInput) -> ApiResult<Employee> {
        api.create_employee(input).await
    }

    async fn update(&self, api: &ApiClient, id: RecordId, input: &EmployeeInput) -> ApiResult<Employee> {
        api.update_employee(id, input).await
    }
}

/// Recycle bin listing; "delete" here is the permanent purge.
pub struct Trash(pub TrashResource);

#[async_trait]
impl Resource for Trash {
    type Record = TrashedRecord;

    async fn fetch(&self, api: &ApiClient, page: u32) -> ApiResult<Paginated<TrashedRecord>> {
        api.list_trash(self.0, page).await
    }

    async fn delete(&self, api: &ApiClient, id: RecordId) -> ApiResult<()> {
        api.force_delete(self.0, id).await
    }
}

pub struct ListStore<R: Resource> {
    resource: R,
    state: ListState<R::Record>,
}

impl<R: Resource> ListStore<R> {
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            state: ListState::new(),
        }
    }

    pub fn state(&self) -> &ListState<R::Record> {
        &self.state
    }

    /// Fetch `page` and overwrite whatever is shown.
    pub async fn load(&mut self, api: &ApiClient, page: u32) -> ApiResult<()> {
        let fetched = self.resource.fetch(api, page.max(1)).await?;
        debug!(
            page = fetched.current_page,
            rows = fetched.data.len(),
            total = fetched.total,
            "List page loaded"
        );
        self.state.apply_page(fetched);
        Ok(())
    }

    /// Delete on the server, then patch the local page. An emptied page
    /// past the first is replaced by the previous one.
    pub async fn delete(&mut self, api: &ApiClient, id: RecordId) -> ApiResult<AfterRemoval> {
        self.resource.delete(api, id).await?;
        let after = self.state.remove(id);
        if let AfterRemoval::Refetch { page } = after {
            self.load(api, page).await?;
        }
        Ok(after)
    }
}

impl<R> ListStore<R>
where
    R: Editable,
    R::Record: Clone,
{
    /// Create on the server; the saved record heads the current page.
    pub async fn create(&mut self, api: &ApiClient, input: &R::Input) -> ApiResult<R::Record> {
        let record = self.resource.create(api, input).await?;
        self.state.prepend(record.clone());
        Ok(record)
    }

    /// Update on the server and swap the server's version into the page
    /// when the record is shown there.
    pub async fn update(
        &mut self,
        api: &ApiClient,
        id: RecordId,
        input: &R::Input,
    ) -> ApiResult<R::Record> {
        let record = self.resource.update(api, id, input).await?;
        if !self.state.replace(record.clone()) {
            debug!(id, "Updated record is not on the current page");
        }
        Ok(record)
    }
}
