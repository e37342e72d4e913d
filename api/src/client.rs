//! HTTP implementation of the API ports

use crate::error::{ApiError, ApiResult};
use crate::ports::{
    AchievementApi, CouponApi, EventApi, NotificationApi, OrderApi, ParticipationApi, ProofFile,
    TicketApi,
};
use crate::types::{
    Badge, Certificate, CheckInRequest, CheckInResponse, CouponValidation, CreateOrderRequest,
    Event, EventTicket, Participation, PaymentProofUploadResponse, TicketOrder, UnreadCount,
    ValidateCouponRequest, ValidateOrderRequest,
};
use futures::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Campus Events API client
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if `base_url` is not an absolute
    /// http(s) URL or the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.into();
        let parsed = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::RequestFailed(format!("invalid base URL {base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::RequestFailed(format!(
                "invalid base URL {base_url}: cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parsed,
            token: None,
        })
    }

    /// Attach a bearer token to every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build a request for the path made of `segments`, each percent-encoded
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base_url.clone();
        // Always Ok: `new` refuses cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        let builder = self.client.request(method, url);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn fetch_json<T>(&self, builder: RequestBuilder) -> BoxFuture<'static, ApiResult<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        Box::pin(async move {
            let response = send(builder).await?;
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
        })
    }
}

/// Send a request and map non-success statuses to `ApiError`
async fn send(builder: RequestBuilder) -> ApiResult<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

    let status = response.status();
    tracing::debug!(url = %response.url(), status = status.as_u16(), "API response");

    match status {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(response.url().path().to_string())),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        },
    }
}

/// Extract `message` from a JSON error body, or fall back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl NotificationApi for ApiClient {
    fn unread_count(&self) -> BoxFuture<'static, ApiResult<UnreadCount>> {
        self.fetch_json(self.request(Method::GET, &["notifications", "unread-count"]))
    }
}

impl EventApi for ApiClient {
    fn list_events(&self) -> BoxFuture<'static, ApiResult<Vec<Event>>> {
        self.fetch_json(self.request(Method::GET, &["events"]))
    }

    fn event_by_id(&self, event_id: &str) -> BoxFuture<'static, ApiResult<Event>> {
        self.fetch_json(self.request(Method::GET, &["events", event_id]))
    }
}

impl ParticipationApi for ApiClient {
    fn participations_by_user(
        &self,
        user_id: &str,
    ) -> BoxFuture<'static, ApiResult<Vec<Participation>>> {
        self.fetch_json(self.request(Method::GET, &["participations", "user", user_id]))
    }
}

impl OrderApi for ApiClient {
    fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> BoxFuture<'static, ApiResult<TicketOrder>> {
        self.fetch_json(self.request(Method::POST, &["orders"]).json(&request))
    }

    fn my_orders(&self) -> BoxFuture<'static, ApiResult<Vec<TicketOrder>>> {
        self.fetch_json(self.request(Method::GET, &["orders", "my"]))
    }

    fn pending_validation_orders(&self) -> BoxFuture<'static, ApiResult<Vec<TicketOrder>>> {
        self.fetch_json(self.request(Method::GET, &["orders", "pending-validation"]))
    }

    fn upload_proof(
        &self,
        order_id: &str,
        file: ProofFile,
    ) -> BoxFuture<'static, ApiResult<String>> {
        let builder = self.request(Method::POST, &["orders", order_id, "payment-proof"]);

        Box::pin(async move {
            let part = Part::bytes(file.bytes.to_vec())
                .file_name(file.file_name)
                .mime_str(&file.content_type)
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

            let response = send(builder.multipart(Form::new().part("file", part))).await?;
            let uploaded = response
                .json::<PaymentProofUploadResponse>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;

            Ok(uploaded.payment_proof_url)
        })
    }

    fn cancel_order(&self, order_id: &str) -> BoxFuture<'static, ApiResult<TicketOrder>> {
        self.fetch_json(self.request(Method::POST, &["orders", order_id, "cancel"]))
    }

    fn validate_order(
        &self,
        order_id: &str,
        request: ValidateOrderRequest,
    ) -> BoxFuture<'static, ApiResult<TicketOrder>> {
        self.fetch_json(
            self.request(Method::POST, &["orders", order_id, "validate"])
                .json(&request),
        )
    }
}

impl TicketApi for ApiClient {
    fn ticket_by_validation_code(
        &self,
        code: &str,
    ) -> BoxFuture<'static, ApiResult<EventTicket>> {
        self.fetch_json(self.request(Method::GET, &["tickets", "validation", code]))
    }

    fn download_ticket(&self, ticket_id: &str) -> BoxFuture<'static, ApiResult<Vec<u8>>> {
        let builder = self.request(Method::GET, &["tickets", ticket_id, "download"]);

        Box::pin(async move {
            let response = send(builder).await?;
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;
            Ok(bytes.to_vec())
        })
    }

    fn check_in(&self, validation_code: &str) -> BoxFuture<'static, ApiResult<CheckInResponse>> {
        let request = CheckInRequest {
            validation_code: validation_code.to_string(),
        };
        self.fetch_json(self.request(Method::POST, &["tickets", "check-in"]).json(&request))
    }
}

impl CouponApi for ApiClient {
    fn validate_coupon(
        &self,
        request: ValidateCouponRequest,
    ) -> BoxFuture<'static, ApiResult<CouponValidation>> {
        self.fetch_json(self.request(Method::POST, &["coupons", "validate"]).json(&request))
    }
}

impl AchievementApi for ApiClient {
    fn my_badges(&self) -> BoxFuture<'static, ApiResult<Vec<Badge>>> {
        self.fetch_json(self.request(Method::GET, &["badges", "my"]))
    }

    fn my_certificates(&self) -> BoxFuture<'static, ApiResult<Vec<Certificate>>> {
        self.fetch_json(self.request(Method::GET, &["certificates", "my"]))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_invalid_base_url_is_refused() {
        for base in ["localhost:8080/api", "not a url", "mailto:staff@campus.dev"] {
            assert!(matches!(
                ApiClient::new(base, Duration::from_secs(5)),
                Err(ApiError::RequestFailed(_))
            ));
        }
    }

    #[test]
    fn test_error_message_from_json_body() {
        assert_eq!(
            error_message(r#"{"message":"Pedido já cancelado","status":409}"#),
            "Pedido já cancelado"
        );
        assert_eq!(error_message(" upstream down \n"), "upstream down");
    }
}
