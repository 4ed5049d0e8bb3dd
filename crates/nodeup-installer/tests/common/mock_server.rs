//! Mock server helpers for the distribution mirror

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Index page advertising the given versions, plus the usual noise
pub fn index_page(versions: &[&str]) -> String {
    let mut page = String::from(
        "<html><head><title>Index of /dist/</title></head><body><pre>\n\
         <a href=\"../\">../</a>\n\
         <a href=\"latest/\">latest/</a>\n\
         <a href=\"npm/\">npm/</a>\n",
    );
    for version in versions {
        page.push_str(&format!(
            "<a href=\"v{v}/\">v{v}/</a>    01-Jan-2018 00:00    -\n",
            v = version
        ));
    }
    page.push_str("</pre></body></html>\n");
    page
}

/// Serve an index page at `/`
pub async fn mock_index(server: &MockServer, versions: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_page(versions)))
        .mount(server)
        .await;
}

/// Serve an arbitrary body at `/` with the given status
pub async fn mock_index_response(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve an artifact at `url_path`
pub async fn mock_artifact(server: &MockServer, url_path: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(url_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Make `url_path` fail with the given status
pub async fn mock_failing_artifact(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(url_path.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mirror base URL served by `server`, with a trailing slash
pub fn dist_url(server: &MockServer) -> String {
    format!("{}/", server.uri())
}
