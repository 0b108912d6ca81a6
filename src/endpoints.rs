//! Conventional routes of the Lettings REST API.
//!
//! [`ApiService`] wraps an [`ApiClient`] with one method per route so call
//! sites don't repeat path strings. Every service behind these routes
//! answers in the envelope shape, so each call runs under
//! [`SuccessPolicy::SuccessFlag`] no matter what the client-wide default is.

use crate::client::{ApiClient, RequestOptions, SuccessPolicy};
use crate::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Route table for the platform's REST services.
pub struct ApiService {
    client: Arc<ApiClient>,
}

impl ApiService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let options = RequestOptions::new(Method::GET).policy(SuccessPolicy::SuccessFlag);
        self.client.request(path, options).await
    }

    async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&Value>,
    ) -> Result<T> {
        let mut options = RequestOptions::new(Method::GET).policy(SuccessPolicy::SuccessFlag);
        if let Some(params) = params {
            options = options.body(params.clone());
        }
        self.client.request(path, options).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let options = RequestOptions::new(method)
            .body(serde_json::to_value(body)?)
            .policy(SuccessPolicy::SuccessFlag);
        self.client.request(path, options).await
    }

    async fn remove<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let options = RequestOptions::new(Method::DELETE).policy(SuccessPolicy::SuccessFlag);
        self.client.request(path, options).await
    }

    // Auth

    pub async fn login_landlord<T: DeserializeOwned>(
        &self,
        credentials: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::POST, "/auth/login/password", credentials).await
    }

    pub async fn login_wechat<T: DeserializeOwned>(&self, payload: &impl Serialize) -> Result<T> {
        self.send(Method::POST, "/auth/login/wechat", payload).await
    }

    pub async fn register_landlord<T: DeserializeOwned>(
        &self,
        details: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::POST, "/auth/register/landlord", details).await
    }

    // Properties

    /// List properties, optionally filtered by an object of query parameters.
    pub async fn properties<T: DeserializeOwned>(&self, params: Option<&Value>) -> Result<T> {
        self.get_query("/properties", params).await
    }

    pub async fn property<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.get(&format!("/properties/{id}")).await
    }

    pub async fn create_property<T: DeserializeOwned>(
        &self,
        listing: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::POST, "/properties", listing).await
    }

    pub async fn update_property<T: DeserializeOwned>(
        &self,
        id: &str,
        changes: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::PUT, &format!("/properties/{id}"), changes).await
    }

    pub async fn delete_property<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.remove(&format!("/properties/{id}")).await
    }

    /// Publish, unpublish, or otherwise move a listing through its lifecycle.
    pub async fn update_property_status<T: DeserializeOwned>(
        &self,
        id: &str,
        status: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::PUT, &format!("/properties/{id}/status"), status).await
    }

    // Inquiries

    pub async fn inquiries<T: DeserializeOwned>(&self, params: Option<&Value>) -> Result<T> {
        self.get_query("/inquiries", params).await
    }

    pub async fn inquiry<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.get(&format!("/inquiries/{id}")).await
    }

    // Appointments

    pub async fn create_appointment<T: DeserializeOwned>(
        &self,
        details: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::POST, "/appointments", details).await
    }

    pub async fn appointments<T: DeserializeOwned>(&self, params: Option<&Value>) -> Result<T> {
        self.get_query("/appointments", params).await
    }

    pub async fn appointment<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.get(&format!("/appointments/{id}")).await
    }

    pub async fn update_appointment_status<T: DeserializeOwned>(
        &self,
        id: &str,
        update: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::PUT, &format!("/appointments/{id}/status"), update).await
    }

    // Assistant

    pub async fn send_chat_message<T: DeserializeOwned>(
        &self,
        message: &impl Serialize,
    ) -> Result<T> {
        self.send(Method::POST, "/ai/chat", message).await
    }

    // Stats

    pub async fn overview_stats<T: DeserializeOwned>(&self) -> Result<T> {
        self.get("/stats/overview").await
    }

    pub async fn property_stats<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        self.get(&format!("/stats/properties/{id}")).await
    }
}
