//! `fetch`-based [`DetectionClient`].

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, HtmlFormElement, Request, RequestInit, Response};

use crate::client::DetectionClient;
use crate::constants::REQUESTED_WITH_HEADER;
use crate::error::PageError;
use crate::model::{DashboardStats, DetectionResponse};

use super::dom;

/// Posts upload forms to the detection endpoint.
#[derive(Debug, Clone)]
pub struct FetchClient {
    endpoint: String,
}

impl FetchClient {
    /// A client posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// A client posting to the form's action, or to the page itself when
    /// the form has none.
    pub fn for_form(form: &HtmlFormElement) -> Result<Self, PageError> {
        let action = form.action();
        if !action.is_empty() {
            return Ok(Self::new(action));
        }
        let href = dom::window()?.location().href().map_err(dom::js_error)?;
        Ok(Self::new(href))
    }

    /// Where uploads go.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn network_error(value: wasm_bindgen::JsValue) -> PageError {
    PageError::Network(dom::js_message(&value))
}

fn scripted_headers() -> Result<Headers, PageError> {
    let headers = Headers::new().map_err(dom::js_error)?;
    let (name, value) = REQUESTED_WITH_HEADER;
    headers.set(name, value).map_err(dom::js_error)?;
    Ok(headers)
}

/// Send a request and read the whole body as text.
///
/// The HTTP status is not checked: the service answers failures with a JSON
/// body too, and anything else fails to parse.
async fn fetch_text(request: &Request) -> Result<String, PageError> {
    let reply = JsFuture::from(dom::window()?.fetch_with_request(request))
        .await
        .map_err(network_error)?;
    let response: Response = reply
        .dyn_into()
        .map_err(|_| PageError::Network("fetch did not return a Response".to_string()))?;
    log::debug!("{} {} -> {}", request.method(), response.url(), response.status());

    let body = JsFuture::from(response.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    body.as_string()
        .ok_or_else(|| PageError::Network("Response body is not text".to_string()))
}

impl DetectionClient for FetchClient {
    type Upload = FormData;

    async fn detect(&self, upload: &FormData) -> Result<DetectionResponse, PageError> {
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(upload);
        init.set_headers(&scripted_headers()?);

        let request =
            Request::new_with_str_and_init(&self.endpoint, &init).map_err(dom::js_error)?;
        let body = fetch_text(&request).await?;
        DetectionResponse::from_json(&body)
    }

    async fn fetch_stats(&self, url: &str) -> Result<DashboardStats, PageError> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_headers(&scripted_headers()?);

        let request = Request::new_with_str_and_init(url, &init).map_err(dom::js_error)?;
        let body = fetch_text(&request).await?;
        DashboardStats::from_json(&body)
    }
}
