//! Stand-in photo service served by actix-web on a loopback port.
//!
//! Every request gets the same canned reply. Requests are recorded so tests
//! can assert on the method, target, headers, and body the adapter sent.

use std::net::TcpListener;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use url::Url;

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, value)| value.as_str())
    }

    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

enum Reply {
    Canned { status: StatusCode, body: String },
    Stall,
}

struct StubState {
    reply: Reply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A running stub; stopped on drop.
pub struct StubServer {
    base_url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl StubServer {
    /// Answer every request with `status` and `body`.
    pub fn respond(status: u16, body: &str) -> Self {
        Self::start(Reply::Canned {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_owned(),
        })
    }

    /// Accept requests but never answer.
    pub fn stall() -> Self {
        Self::start(Reply::Stall)
    }

    fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        let base_url = Url::parse(&format!("http://{addr}/")).expect("stub url");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            reply,
            requests: Arc::clone(&requests),
        });

        let (handle_tx, handle_rx) = mpsc::channel();
        std::thread::spawn(move || {
            actix_web::rt::System::new().block_on(async move {
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(state.clone())
                        .default_service(web::to(record_and_reply))
                })
                .disable_signals()
                .workers(1)
                .listen(listener)
                .expect("stub listens")
                .run();
                handle_tx.send(server.handle()).expect("stub handle delivered");
                server.await.expect("stub server runs");
            });
        });
        let handle = handle_rx.recv().expect("stub server started");

        Self {
            base_url,
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log").clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        // The stop command is sent eagerly; the completion future is not needed.
        drop(self.handle.stop(false));
    }
}

async fn record_and_reply(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<StubState>,
) -> HttpResponse {
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.path().to_owned(), |target| target.as_str().to_owned());
    let headers = request
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                value.to_str().unwrap_or_default().to_owned(),
            )
        })
        .collect();
    state.requests.lock().expect("request log").push(RecordedRequest {
        method: request.method().to_string(),
        target,
        headers,
        body: body.to_vec(),
    });

    match &state.reply {
        Reply::Canned { status, body } => HttpResponse::build(*status)
            .content_type("application/json")
            .body(body.clone()),
        Reply::Stall => {
            actix_web::rt::time::sleep(Duration::from_secs(30)).await;
            HttpResponse::NoContent().finish()
        }
    }
}
