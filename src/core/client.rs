use crate::core::wire::{CompanyResource, CompanyUpsert, ComputerModelResource, ComputerModelUpsert};
use crate::domain::model::{Company, ComputerModel};
use crate::domain::ports::{ComputerDatabase, ConfigProvider};
use crate::utils::error::{CdbError, Result};
use crate::utils::validation::validate_url;
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

/// 讀取時沿關聯載入的深度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydrate {
    /// 載入一層關聯實體，關聯實體本身不再展開
    OneHop,
    /// 只解碼資源本身，不發出後續請求
    Flat,
}

/// 電腦資料庫 REST API 客戶端
///
/// 每個操作依序等待其請求完成，遇到第一個錯誤即回傳；不重試、不快取。
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    concurrent_requests: usize,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base_url(base_url)?,
            concurrent_requests: 1,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = parse_base_url(config.base_url())?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(headers) = config.headers() {
            builder = builder.default_headers(header_map(headers)?);
        }
        let client = builder.build().map_err(|e| CdbError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url,
            concurrent_requests: config.concurrent_requests().max(1),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 以 base URL 加上逐段編碼的路徑；空字串、`.`、`..` 會改變路徑層級，直接拒絕
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(CdbError::InvalidIdentifierError {
                id: segment.to_string(),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CdbError::ConfigError {
                message: format!("Base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 將伺服器回傳的連結轉為 URL
    ///
    /// 絕對連結直接使用；已包含 base 路徑的根相對連結以 base 的主機解析；
    /// 其餘相對連結接在 base URL 之後。
    fn resolve_link(&self, link: &str) -> Result<Url> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) if self.has_base_path(link) => {
                self.base_url
                    .join(link)
                    .map_err(|e| CdbError::InvalidLinkError {
                        link: link.to_string(),
                        reason: e.to_string(),
                    })?
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let joined = format!(
                    "{}/{}",
                    self.base_url.as_str().trim_end_matches('/'),
                    link.trim_start_matches('/')
                );
                Url::parse(&joined).map_err(|e| CdbError::InvalidLinkError {
                    link: link.to_string(),
                    reason: e.to_string(),
                })?
            }
            Err(e) => {
                return Err(CdbError::InvalidLinkError {
                    link: link.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(CdbError::InvalidLinkError {
                link: link.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        }
    }

    fn has_base_path(&self, link: &str) -> bool {
        let base_path = self.base_url.path().trim_end_matches('/');
        !base_path.is_empty()
            && link
                .strip_prefix(base_path)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    async fn execute(&self, request: RequestBuilder, expected: StatusCode) -> Result<Response> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!("📡 {} {}", method, url);
        let response = self.client.execute(request).await?;
        let status = response.status();
        tracing::debug!("📡 {} {} -> {}", method, url, status);

        if status != expected {
            return Err(CdbError::UnexpectedStatusError {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.execute(self.client.get(url), StatusCode::OK).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// 取得公司；`Hydrate::OneHop` 時依連結順序載入其型號（型號本身不再回頭載入公司）
    fn fetch_company(&self, url: Url, hydrate: Hydrate) -> BoxFuture<'_, Result<Company>> {
        Box::pin(async move {
            let resource: CompanyResource = self.get_json(url).await?;
            let company = resource.to_company();
            if hydrate == Hydrate::Flat {
                return Ok(company);
            }

            let links = resource
                .computer_models
                .iter()
                .map(|link| self.resolve_link(link))
                .collect::<Result<Vec<_>>>()?;

            tracing::debug!(
                "📂 Loading {} computer models of company {}",
                links.len(),
                company.id
            );
            let computer_models: Vec<ComputerModel> = stream::iter(links)
                .map(move |url| self.fetch_computer_model(url, Hydrate::Flat))
                .buffered(self.concurrent_requests)
                .try_collect()
                .await?;

            Ok(company.with_computer_models(computer_models))
        })
    }

    /// 取得型號；`Hydrate::OneHop` 時載入所屬公司，失敗則保留未設定而不報錯
    fn fetch_computer_model(
        &self,
        url: Url,
        hydrate: Hydrate,
    ) -> BoxFuture<'_, Result<ComputerModel>> {
        Box::pin(async move {
            let resource: ComputerModelResource = self.get_json(url).await?;
            let computer_model = resource.to_computer_model();
            if hydrate == Hydrate::Flat {
                return Ok(computer_model);
            }

            let Some(link) = resource.company_link() else {
                tracing::debug!("Computer model {} has no company link", computer_model.id);
                return Ok(computer_model);
            };

            let company = match self.resolve_link(link) {
                Ok(url) => self.fetch_company(url, Hydrate::Flat).await,
                Err(e) => Err(e),
            };

            match company {
                Ok(company) => Ok(computer_model.with_company(company)),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Could not load company {} of computer model {}: {}",
                        link,
                        computer_model.id,
                        e
                    );
                    Ok(computer_model)
                }
            }
        })
    }
}

#[async_trait::async_trait]
impl ComputerDatabase for ApiClient {
    async fn create_company(&self, company: &Company) -> Result<()> {
        let url = self.endpoint(&["companies"])?;
        let payload = CompanyUpsert::from(company);

        self.execute(self.client.post(url).json(&payload), StatusCode::CREATED)
            .await?;

        tracing::info!(
            "✅ Created company {} with {} computer models",
            company.id,
            payload.computer_models.len()
        );
        Ok(())
    }

    async fn get_company(&self, id: &str) -> Result<Company> {
        let url = self.endpoint(&["companies", id])?;
        let company = self.fetch_company(url, Hydrate::OneHop).await?;

        tracing::info!(
            "✅ Loaded company {} ({} computer models)",
            company.id,
            company.computer_models().map_or(0, |models| models.len())
        );
        Ok(company)
    }

    async fn update_company(&self, company: &Company) -> Result<()> {
        let url = self.endpoint(&["companies", &company.id])?;
        let payload = CompanyUpsert::from(company);

        self.execute(self.client.put(url).json(&payload), StatusCode::OK)
            .await?;

        tracing::info!("✅ Updated company {}", company.id);
        Ok(())
    }

    async fn delete_company(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&["companies", id])?;

        self.execute(self.client.delete(url), StatusCode::NO_CONTENT)
            .await?;

        tracing::info!("✅ Deleted company {}", id);
        Ok(())
    }

    async fn create_computer_model(&self, computer_model: &ComputerModel) -> Result<()> {
        let company_id =
            computer_model
                .company_id()
                .ok_or_else(|| CdbError::MissingCompanyError {
                    model_id: computer_model.id.clone(),
                })?;

        let url = self.endpoint(&["companies", company_id, "computer-models"])?;
        let payload = ComputerModelUpsert::from(computer_model);

        self.execute(self.client.post(url).json(&payload), StatusCode::CREATED)
            .await?;

        tracing::info!(
            "✅ Created computer model {} in company {}",
            computer_model.id,
            company_id
        );
        Ok(())
    }

    async fn get_computer_model(&self, company_id: &str, model_id: &str) -> Result<ComputerModel> {
        let url = self.endpoint(&["companies", company_id, "computer-models", model_id])?;
        let computer_model = self.fetch_computer_model(url, Hydrate::OneHop).await?;

        tracing::info!(
            "✅ Loaded computer model {} (company {})",
            computer_model.id,
            computer_model.company_id().unwrap_or("<unset>")
        );
        Ok(computer_model)
    }

    async fn delete_computer_model(&self, company_id: &str, model_id: &str) -> Result<()> {
        let url = self.endpoint(&["companies", company_id, "computer-models", model_id])?;

        self.execute(self.client.delete(url), StatusCode::NO_CONTENT)
            .await?;

        tracing::info!(
            "✅ Deleted computer model {} from company {}",
            model_id,
            company_id
        );
        Ok(())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    validate_url("base_url", base_url)?;
    let url = Url::parse(base_url).map_err(|e| CdbError::InvalidConfigValueError {
        field: "base_url".to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(CdbError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

fn header_map(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            CdbError::InvalidConfigValueError {
                field: "headers".to_string(),
                value: key.clone(),
                reason: e.to_string(),
            }
        })?;
        let mut value =
            HeaderValue::from_str(value).map_err(|e| CdbError::InvalidConfigValueError {
                field: format!("headers.{}", key),
                value: "<redacted>".to_string(),
                reason: e.to_string(),
            })?;
        if name == AUTHORIZATION {
            value.set_sensitive(true);
        }
        map.insert(name, value);
    }
    Ok(map)
}
