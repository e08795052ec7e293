use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::api::{ErrorResponse, ServiceResponse};

use crate::config::api_url;

pub struct ApiService;

impl ApiService {
    pub async fn list_services() -> Result<Vec<ServiceResponse>, String> {
        let response = Request::get(&api_url("/api/service"))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        parse(response).await
    }

    pub async fn get_service(id: &str) -> Result<ServiceResponse, String> {
        let response = Request::get(&api_url(&format!("/api/service/{}", id)))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;

        parse(response).await
    }
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        return match response.json::<ErrorResponse>().await {
            Ok(body) => Err(body.message),
            Err(_) => Err(format!("HTTP error: {}", status)),
        };
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {:?}", e))
}
