use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

use super::ApiError;

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, &text));
    }

    Ok(response)
}

async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub async fn get<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, ApiError> {
    let response = send(client.get(url)).await?;
    json_body(response).await
}

/// POST `body` as JSON; `reqwest` sets `Content-Type: application/json`.
pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let response = send(client.post(url).json(body)).await?;
    json_body(response).await
}

pub async fn delete(client: &Client, url: &str) -> Result<(), ApiError> {
    send(client.delete(url)).await?;
    Ok(())
}
