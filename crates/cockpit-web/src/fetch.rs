use gloo_net::http::Request;

#[derive(Debug)]
pub enum FetchError {
    Network(gloo_net::Error),
    Status(u16),
}

/// GET `url` and return the body as text. Non-2xx responses are errors.
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let response = Request::get(url).send().await.map_err(FetchError::Network)?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    response.text().await.map_err(FetchError::Network)
}
