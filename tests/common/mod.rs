use ghrest::Client;
use wiremock::MockServer;

/// Mock server plus a client whose base and upload URLs point at it.
pub async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::builder()
        .base_url(format!("{}/", server.uri()))
        .upload_url(format!("{}/", server.uri()))
        .token("test-token")
        .build()
        .unwrap();
    (server, client)
}
