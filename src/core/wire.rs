//! JSON shapes exchanged with the API.
//!
//! Reads link related entities by URI; writes embed computer models in the
//! company payload and leave the company out of a model payload, since the
//! owner is implied by the request path.

use crate::domain::model::{Company, ComputerModel};
use serde::{Deserialize, Serialize};

/// `GET /companies/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResource {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "computerModels", default)]
    pub computer_models: Vec<String>,
}

/// `GET /companies/{companyId}/computer-models/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerModelResource {
    pub id: String,
    pub name: String,
    pub release: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Body of `POST /companies` and `PUT /companies/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyUpsert {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "computerModels", default)]
    pub computer_models: Vec<ComputerModelUpsert>,
}

/// Body of `POST /companies/{companyId}/computer-models`, also embedded in [`CompanyUpsert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerModelUpsert {
    pub id: String,
    pub name: String,
    pub release: String,
}

impl CompanyResource {
    /// Company without its association; links are resolved by the client.
    pub fn to_company(&self) -> Company {
        Company::new(self.id.clone(), self.name.clone(), self.location.clone())
    }
}

impl ComputerModelResource {
    /// ComputerModel without its owning company.
    pub fn to_computer_model(&self) -> ComputerModel {
        ComputerModel::new(self.id.clone(), self.name.clone(), self.release.clone())
    }

    /// `company` link, ignoring an empty string.
    pub fn company_link(&self) -> Option<&str> {
        self.company.as_deref().filter(|link| !link.is_empty())
    }
}

impl From<&Company> for CompanyUpsert {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id.clone(),
            name: company.name.clone(),
            location: company.location.clone(),
            computer_models: company
                .computer_models()
                .unwrap_or_default()
                .iter()
                .map(ComputerModelUpsert::from)
                .collect(),
        }
    }
}

impl From<&ComputerModel> for ComputerModelUpsert {
    fn from(computer_model: &ComputerModel) -> Self {
        Self {
            id: computer_model.id.clone(),
            name: computer_model.name.clone(),
            release: computer_model.release.clone(),
        }
    }
}

impl CompanyUpsert {
    pub fn into_company(self) -> Company {
        let models = self
            .computer_models
            .into_iter()
            .map(ComputerModelUpsert::into_computer_model)
            .collect();
        Company::new(self.id, self.name, self.location).with_computer_models(models)
    }
}

impl ComputerModelUpsert {
    pub fn into_computer_model(self) -> ComputerModel {
        ComputerModel::new(self.id, self.name, self.release)
    }
}
