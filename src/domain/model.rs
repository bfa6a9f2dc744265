use std::fmt;
use std::sync::Arc;

/// 電腦製造商
///
/// `computer_models` 為 `None` 代表關聯尚未載入，與「沒有任何型號」(`Some(vec![])`) 不同。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub location: String,
    computer_models: Option<Vec<ComputerModel>>,
}

/// 電腦型號
///
/// `company` 只記錄所屬公司，不持有公司的型號集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerModel {
    pub id: String,
    pub name: String,
    /// 自由格式的標籤，不解析為日期
    pub release: String,
    company: Option<Arc<Company>>,
}

impl Company {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            computer_models: None,
        }
    }

    /// 回傳附帶型號集合的新 Company，原值不變
    pub fn with_computer_models(&self, computer_models: Vec<ComputerModel>) -> Company {
        Company {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            computer_models: Some(computer_models),
        }
    }

    pub fn computer_models(&self) -> Option<&[ComputerModel]> {
        self.computer_models.as_deref()
    }
}

impl ComputerModel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            release: release.into(),
            company: None,
        }
    }

    /// 回傳附帶所屬公司的新 ComputerModel，原值不變
    pub fn with_company(&self, company: impl Into<Arc<Company>>) -> ComputerModel {
        ComputerModel {
            id: self.id.clone(),
            name: self.name.clone(),
            release: self.release.clone(),
            company: Some(company.into()),
        }
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_deref()
    }

    /// 所屬公司的識別碼（需已設定且非空）
    pub fn company_id(&self) -> Option<&str> {
        self.company()
            .map(|company| company.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Company {{ id: {}, name: {}, location: {}, computer_models: ",
            self.id, self.name, self.location
        )?;
        match &self.computer_models {
            Some(models) => {
                f.write_str("[")?;
                for (i, model) in models.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", model)?;
                }
                f.write_str("]")?;
            }
            None => f.write_str("<unset>")?,
        }
        f.write_str(" }")
    }
}

impl fmt::Display for ComputerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ComputerModel {{ id: {}, name: {}, release: {}, company: ",
            self.id, self.name, self.release
        )?;
        match &self.company {
            Some(company) => write!(f, "{}", company)?,
            None => f.write_str("<unset>")?,
        }
        f.write_str(" }")
    }
}
