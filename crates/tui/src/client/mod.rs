use api_types::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, VerifyResponse},
    stats::TransactionStats,
    transaction::{TransactionListResponse, TransactionNew, TransactionUpdate, TransactionView},
};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn expect_json<TResp: for<'de> Deserialize<'de>>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> std::result::Result<TResp, ClientError> {
        let res = req.send().await.map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<TResp>().await.map_err(ClientError::Transport);
        }

        Err(Self::error_from(res).await)
    }

    async fn expect_ok(
        &self,
        req: reqwest::RequestBuilder,
    ) -> std::result::Result<(), ClientError> {
        let res = req.send().await.map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }

        Err(Self::error_from(res).await)
    }

    async fn error_from(res: reqwest::Response) -> ClientError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden,
            StatusCode::NOT_FOUND => ClientError::NotFound,
            StatusCode::CONFLICT => ClientError::Conflict(body),
            StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(body),
            _ => ClientError::Server(body),
        }
    }

    pub async fn register(
        &self,
        payload: &RegisterRequest,
    ) -> std::result::Result<AuthResponse, ClientError> {
        let endpoint = self.endpoint("auth/register")?;
        self.expect_json(self.http.post(endpoint).json(payload)).await
    }

    pub async fn login(
        &self,
        payload: &LoginRequest,
    ) -> std::result::Result<AuthResponse, ClientError> {
        let endpoint = self.endpoint("auth/login")?;
        self.expect_json(self.http.post(endpoint).json(payload)).await
    }

    /// Validates a bearer token against the protected endpoint and returns
    /// the server's fresh user record.
    pub async fn verify(&self, token: &str) -> std::result::Result<VerifyResponse, ClientError> {
        let endpoint = self.endpoint("auth/verify")?;
        self.expect_json(self.http.get(endpoint).bearer_auth(token))
            .await
    }

    pub async fn transactions_list(
        &self,
        token: &str,
    ) -> std::result::Result<TransactionListResponse, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        self.expect_json(self.http.get(endpoint).bearer_auth(token))
            .await
    }

    pub async fn transactions_stats(
        &self,
        token: &str,
    ) -> std::result::Result<TransactionStats, ClientError> {
        let endpoint = self.endpoint("transactions/stats")?;
        self.expect_json(self.http.get(endpoint).bearer_auth(token))
            .await
    }

    pub async fn transaction_create(
        &self,
        token: &str,
        payload: &TransactionNew,
    ) -> std::result::Result<TransactionView, ClientError> {
        let endpoint = self.endpoint("transactions")?;
        self.expect_json(self.http.post(endpoint).bearer_auth(token).json(payload))
            .await
    }

    pub async fn transaction_update(
        &self,
        token: &str,
        id: Uuid,
        payload: &TransactionUpdate,
    ) -> std::result::Result<TransactionView, ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        self.expect_json(self.http.put(endpoint).bearer_auth(token).json(payload))
            .await
    }

    pub async fn transaction_delete(
        &self,
        token: &str,
        id: Uuid,
    ) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("transactions/{id}"))?;
        self.expect_ok(self.http.delete(endpoint).bearer_auth(token))
            .await
    }
}
