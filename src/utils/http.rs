use once_cell::sync::Lazy;
use reqwest::Client;

// No client-level timeout: a generate call waits for the provider or the
// transport's own limits.
static HTTP_CLIENT: Lazy<Client> =
    Lazy::new(|| Client::builder().build().expect("Failed to build HTTP client"));

pub fn get_http_client() -> &'static Client {
    &HTTP_CLIENT
}
