#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use account_management::{
    AppState, GatewayError, InMemoryGateway, ManagementGateway, build_router,
    models::{Account, NewAccount, NewPhoneNumber, PhoneNumber},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

/// In-memory gateway whose negative signals can be forced per operation.
#[derive(Default)]
pub struct ScriptedGateway {
    pub inner: InMemoryGateway,
    pub null_account_listing: AtomicBool,
    pub fail_account_inserts: AtomicBool,
    pub fail_account_updates: AtomicBool,
    pub fail_phone_number_deletes: AtomicBool,
    pub fail_phone_number_updates: AtomicBool,
    pub panic_on_account_listing: AtomicBool,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn force(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }

    pub async fn seed_account(&self, name: &str, is_active: bool) -> Account {
        self.inner
            .insert_account(NewAccount {
                holder_name: Some(name.to_string()),
                is_active,
            })
            .await
            .expect("seed account")
    }

    pub async fn seed_phone_number(&self, number: &str, account_id: Option<i32>) -> PhoneNumber {
        self.inner
            .insert_phone_number(NewPhoneNumber {
                number: Some(number.to_string()),
                account_id,
            })
            .await
            .expect("seed phone number")
    }
}

#[async_trait]
impl ManagementGateway for ScriptedGateway {
    async fn init(&self) -> Result<(), GatewayError> {
        self.inner.init().await
    }

    async fn find_account(&self, id: Option<i32>) -> Option<Account> {
        self.inner.find_account(id).await
    }

    async fn list_accounts(&self) -> Option<Vec<Account>> {
        if self.panic_on_account_listing.load(Ordering::SeqCst) {
            panic!("account table exploded");
        }
        if self.null_account_listing.load(Ordering::SeqCst) {
            return None;
        }
        self.inner.list_accounts().await
    }

    async fn insert_account(&self, account: NewAccount) -> Option<Account> {
        if self.fail_account_inserts.load(Ordering::SeqCst) {
            return None;
        }
        self.inner.insert_account(account).await
    }

    async fn update_account(&self, account: Account) -> Option<Account> {
        if self.fail_account_updates.load(Ordering::SeqCst) {
            return None;
        }
        self.inner.update_account(account).await
    }

    async fn find_phone_number(&self, id: Option<i32>) -> Option<PhoneNumber> {
        self.inner.find_phone_number(id).await
    }

    async fn list_phone_numbers_by_account(&self, account_id: i32) -> Vec<PhoneNumber> {
        self.inner.list_phone_numbers_by_account(account_id).await
    }

    async fn insert_phone_number(&self, phone_number: NewPhoneNumber) -> Option<PhoneNumber> {
        self.inner.insert_phone_number(phone_number).await
    }

    async fn delete_phone_number(&self, phone_number: &PhoneNumber) -> bool {
        if self.fail_phone_number_deletes.load(Ordering::SeqCst) {
            return false;
        }
        self.inner.delete_phone_number(phone_number).await
    }

    async fn update_phone_number(
        &self,
        phone_number: PhoneNumber,
        account_id: i32,
    ) -> Option<PhoneNumber> {
        if self.fail_phone_number_updates.load(Ordering::SeqCst) {
            return None;
        }
        self.inner.update_phone_number(phone_number, account_id).await
    }
}

pub fn app(gateway: Arc<dyn ManagementGateway>) -> Router {
    build_router(AppState::new(gateway))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, payload: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&body).expect("body should be valid JSON")
    };

    TestResponse {
        status,
        headers,
        body,
    }
}
