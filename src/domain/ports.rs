use crate::domain::model::{Company, ComputerModel};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn headers(&self) -> Option<&HashMap<String, String>>;
    fn concurrent_requests(&self) -> usize;
}

/// CRUD over the companies / computer-models REST resources.
///
/// Reads hydrate at most one hop: a company comes back with its models (whose
/// company stays unset), a model comes back with its company (whose models stay unset).
#[async_trait]
pub trait ComputerDatabase: Send + Sync {
    async fn create_company(&self, company: &Company) -> Result<()>;
    async fn get_company(&self, id: &str) -> Result<Company>;
    async fn update_company(&self, company: &Company) -> Result<()>;
    async fn delete_company(&self, id: &str) -> Result<()>;

    async fn create_computer_model(&self, computer_model: &ComputerModel) -> Result<()>;
    async fn get_computer_model(&self, company_id: &str, model_id: &str) -> Result<ComputerModel>;
    async fn delete_computer_model(&self, company_id: &str, model_id: &str) -> Result<()>;
}
