#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cliq_hub_client::{
    ApiRequest, ClientError, Endpoints, HttpClient, KeyValueStore, MemoryStore, SessionStore,
    StorageError, TemplateStore,
};
use serde_json::Value;
use tokio::sync::oneshot;

pub type Reply = Result<Value, ClientError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// Scripted stand-in for the hub. Replies are handed out in the order
/// requests arrive.
#[derive(Default)]
pub struct FakeHub {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_ok(&self, body: Value) {
        self.push(Scripted::Ready(Ok(body)));
    }

    pub fn reply_status(&self, status: u16, message: &str) {
        self.push(Scripted::Ready(Err(ClientError::Status {
            url: "http://fake-hub".to_string(),
            status,
            message: message.to_string(),
        })));
    }

    pub fn reply_transport_error(&self) {
        self.push(Scripted::Ready(Err(ClientError::Transport {
            url: "http://fake-hub".to_string(),
            message: "connection refused".to_string(),
        })));
    }

    /// The request stays in flight until the returned sender fires.
    pub fn reply_later(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }

    pub async fn wait_for_requests(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.requests.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("requests never arrived");
    }

    fn push(&self, scripted: Scripted) {
        self.replies.lock().unwrap().push_back(scripted);
    }
}

#[async_trait]
impl HttpClient for FakeHub {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();

        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx.await.unwrap_or_else(|_| {
                Err(ClientError::Transport {
                    url: "http://fake-hub".to_string(),
                    message: "reply dropped".to_string(),
                })
            }),
            None => Err(ClientError::Transport {
                url: "http://fake-hub".to_string(),
                message: "no scripted reply".to_string(),
            }),
        }
    }
}

/// Storage that refuses every operation, like a browser with storage disabled.
pub struct BrokenStorage;

impl KeyValueStore for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disabled".to_string()))
    }
}

pub fn session_over(hub: &Arc<FakeHub>, storage: &Arc<MemoryStore>) -> SessionStore {
    SessionStore::new(hub.clone(), storage.clone(), Endpoints::default())
}

pub fn stores(hub: &Arc<FakeHub>) -> (SessionStore, TemplateStore, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let session = session_over(hub, &storage);
    let templates = TemplateStore::new(hub.clone(), session.clone(), Endpoints::default());
    (session, templates, storage)
}
