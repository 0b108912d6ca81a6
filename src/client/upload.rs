//! Multipart file upload.

use crate::client::core::ApiClient;
use crate::client::state::LoadingGuard;
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};
use uuid::Uuid;

impl ApiClient {
    /// Upload a file under the conventional `file` field.
    pub async fn upload_file(
        &self,
        path: &str,
        file: &Path,
        form_fields: &[(&str, &str)],
    ) -> Result<Value> {
        self.upload_file_as(path, file, "file", form_fields).await
    }

    /// Upload a file under a caller-chosen field name.
    ///
    /// The file part carries no explicit content type; the server works it
    /// out from the field and file names. Success bodies are parsed as JSON
    /// when possible and handed back as a plain string otherwise, since some
    /// upload endpoints answer with bare text.
    pub async fn upload_file_as(
        &self,
        path: &str,
        file: &Path,
        field: &str,
        form_fields: &[(&str, &str)],
    ) -> Result<Value> {
        let _guard = LoadingGuard::enter(&self.state);

        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let mut form = reqwest::multipart::Form::new().part(field.to_string(), part);
        for (name, value) in form_fields {
            form = form.text(name.to_string(), value.to_string());
        }

        let url = self.resolve_url(path);
        let request_id = Uuid::new_v4().to_string();
        debug!(url = %url, request_id = %request_id, "uploading file");

        let mut request = self
            .http
            .post(url.as_str())
            .multipart(form)
            .header("x-request-id", request_id.as_str());
        if let Some(token) = self.storage.get(&self.config.token_key).await? {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.network_error(&url, &request_id, e)),
        };

        let code = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(self.network_error(&url, &request_id, e)),
        };

        if (200..300).contains(&code) {
            return Ok(match serde_json::from_str::<Value>(&body) {
                Ok(value) => value,
                Err(_) => Value::String(body),
            });
        }

        let message = format!("upload failed: {code}");
        self.state.record_error(message.clone());
        warn!(http_status = code, request_id = %request_id, error = %message, "upload failed");
        Err(Error::request_failed(code, message))
    }
}
