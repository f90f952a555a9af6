use std::sync::Arc;

use serde_json::json;
use volley_core::{ActionError, Address, HttpClient, HttpRequestParts, Phase, Step};

/// Establishes the request with an arbitrary method.
#[track_caller]
pub fn method(method: impl Into<String>, url: impl Into<String>) -> Step {
    let method = method.into().to_ascii_uppercase();
    let url = url.into();
    let address = Address::default().push("method", vec![json!(method), json!(url)]);
    request_step(address, method, url)
}

macro_rules! method_steps {
    ($($name:ident => $verb:literal),* $(,)?) => {
        $(
            #[doc = concat!("Establishes a `", $verb, "` request to `url`.")]
            #[track_caller]
            pub fn $name(url: impl Into<String>) -> Step {
                let url = url.into();
                let address = Address::default().push(stringify!($name), vec![json!(url)]);
                request_step(address, $verb.to_string(), url)
            }
        )*
    };
}

method_steps! {
    get => "GET",
    post => "POST",
    put => "PUT",
    patch => "PATCH",
    delete => "DELETE",
    head => "HEAD",
    options => "OPTIONS",
}

#[track_caller]
fn request_step(address: Address, method: String, url: String) -> Step {
    Step::addressed(Phase::BeforeSend, address, move |s| {
        let url = url::Url::parse(&url)
            .map_err(|e| ActionError::msg(format!("invalid url {url:?}: {e}")))?;
        s.set_request(HttpRequestParts::new(method, url));
        Ok(())
    })
}

/// Names the script; the text is attached to every failure the run reports.
#[track_caller]
pub fn description(text: impl Into<String>) -> Step {
    let text = text.into();
    Step::new(Phase::BeforeSend, move |s| {
        s.description = text;
        Ok(())
    })
}

/// Replaces the client used for the exchange.
#[track_caller]
pub fn http_client(client: Arc<dyn HttpClient>) -> Step {
    Step::new(Phase::BeforeSend, move |s| {
        s.client = client;
        Ok(())
    })
}
