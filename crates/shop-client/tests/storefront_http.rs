//! End-to-end behaviour of the storefront client against a mock backend.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use shop_auth::SessionStore;
use shop_auth::store::{KeyValueBackend, MemoryBackend, TOKEN_KEY};
use shop_cache::{CacheError, CacheKey, EntryStatus};
use shop_client::{ApiError, Storefront};
use shop_config::ShopConfig;
use shop_core::entities::UserSummary;
use shop_core::enums::{OrderStatus, PaymentMethod, ProductBrand, ProductCategory, Role};
use shop_core::requests::{NewOrder, NewProduct, ProductPatch, ProductQuery};
use shop_core::resource::ResourceType;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ShopConfig {
    let mut config = ShopConfig::default();
    config.api.base_url = server.uri();
    config
}

fn storefront(server: &MockServer) -> Storefront {
    Storefront::new(&config_for(server), SessionStore::in_memory()).unwrap()
}

fn product_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "price": 49_990.0,
        "category": "split",
        "brand": "daikin",
        "power": 9000,
        "inStock": true,
        "images": []
    })
}

fn page_json(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "data": items, "total": total, "page": 1, "limit": 20 })
}

fn order_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "userId": "u-1",
        "items": [],
        "totalAmount": "99980.00",
        "status": status,
        "shippingAddress": "1 Main St",
        "phone": "+100",
        "paymentMethod": "card"
    })
}

fn alice() -> UserSummary {
    UserSummary {
        id: "u-1".into(),
        username: "alice".into(),
        email: "alice@example.com".into(),
        role: Role::User,
    }
}

fn status_of(sf: &Storefront, key: &CacheKey) -> Option<EntryStatus> {
    sf.cache().entry(key).map(|entry| entry.status)
}

#[tokio::test]
async fn concurrent_reads_share_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json("p-1", "Daikin"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    let (a, b) = tokio::join!(sf.product("p-1"), sf.product("p-1"));
    assert_eq!(a.unwrap(), b.unwrap());

    // Fresh now: served without another request.
    assert_eq!(sf.product("p-1").await.unwrap().name, "Daikin");
}

#[tokio::test]
async fn distinct_filters_are_cached_separately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![product_json("p-1", "A")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    let second = ProductQuery {
        page: Some(2),
        ..ProductQuery::default()
    };
    assert!(sf.products(&second).await.unwrap().data.is_empty());
    assert_eq!(sf.products(&ProductQuery::default()).await.unwrap().data.len(), 1);
    assert_eq!(sf.products(&second).await.unwrap().data.len(), 0);
    assert_eq!(sf.cache().len(), 2);
}

#[tokio::test]
async fn create_product_refetches_lists_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_json(vec![product_json("p-1", "A")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("p-1", "A")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201).set_body_json(product_json("p-2", "B")))
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    let list_key = CacheKey::list(ResourceType::Product);
    let item_key = CacheKey::item(ResourceType::Product, "p-1");
    assert_eq!(sf.products(&ProductQuery::default()).await.unwrap().data.len(), 1);
    sf.product("p-1").await.unwrap();

    let created = sf
        .create_product(&NewProduct {
            name: "B".into(),
            description: String::new(),
            price: 49_990.0,
            category: ProductCategory::Split,
            brand: ProductBrand::Daikin,
            power: 9000,
            in_stock: true,
            images: Vec::new(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "p-2");
    assert_eq!(status_of(&sf, &list_key), Some(EntryStatus::Stale));
    assert_eq!(status_of(&sf, &item_key), Some(EntryStatus::Fresh));

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![
            product_json("p-1", "A"),
            product_json("p-2", "B"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let page = sf.products(&ProductQuery::default()).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(status_of(&sf, &list_key), Some(EntryStatus::Fresh));
    // Still the first response: no second item request.
    assert_eq!(sf.product("p-1").await.unwrap().name, "A");
}

#[tokio::test]
async fn update_order_status_invalidates_that_order_everywhere() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            order_json("o-1", "pending"),
            order_json("o-2", "pending"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/o-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("o-2", "pending")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/o-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("o-1", "pending")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/orders/o-1/status"))
        .and(body_json(json!({ "status": "shipped" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("o-1", "shipped")))
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.auth().set_credentials("jwt", alice()).unwrap();
    assert_eq!(sf.orders().await.unwrap().len(), 2);
    sf.order("o-1").await.unwrap();
    sf.order("o-2").await.unwrap();

    let updated = sf.update_order_status("o-1", OrderStatus::Shipped).await.unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert!((updated.total_amount - 99_980.0).abs() < f64::EPSILON);

    let list = CacheKey::list(ResourceType::Order);
    let o1 = CacheKey::item(ResourceType::Order, "o-1");
    let o2 = CacheKey::item(ResourceType::Order, "o-2");
    assert_eq!(status_of(&sf, &list), Some(EntryStatus::Stale));
    assert_eq!(status_of(&sf, &o1), Some(EntryStatus::Stale));
    assert_eq!(status_of(&sf, &o2), Some(EntryStatus::Fresh));
}

#[tokio::test]
async fn checkout_invalidates_orders_and_cart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_json(json!({
            "shippingAddress": "1 Main St",
            "phone": "+100",
            "paymentMethod": "cash"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(order_json("o-9", "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.auth().set_credentials("jwt", alice()).unwrap();
    sf.cart().await.unwrap();
    sf.orders().await.unwrap();

    let order = sf
        .create_order(&NewOrder {
            shipping_address: "1 Main St".into(),
            phone: "+100".into(),
            payment_method: PaymentMethod::Cash,
        })
        .await
        .unwrap();
    assert_eq!(order.id, "o-9");
    assert!(
        sf.cache()
            .entries()
            .iter()
            .all(|entry| entry.status == EntryStatus::Stale)
    );
}

#[tokio::test]
async fn login_then_logout_leaves_nothing_behind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "alice@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "jwt-1",
            "user": { "id": "u-1", "username": "alice", "email": "alice@example.com", "role": "user" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("authorization", "Bearer jwt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = MemoryBackend::default();
    let sf = Storefront::new(&config_for(&server), SessionStore::new(backend.clone())).unwrap();

    let user = sf.login(" alice@example.com ", "secret").await.unwrap();
    assert_eq!(user.username, "alice");
    assert!(sf.auth().is_authenticated());
    assert_eq!(backend.get(TOKEN_KEY).unwrap().as_deref(), Some("jwt-1"));

    assert!(sf.cart().await.unwrap().is_empty());
    assert_eq!(sf.cache().len(), 1);

    sf.logout();
    assert!(!sf.auth().is_authenticated());
    assert!(backend.is_empty());
    assert!(sf.cache().is_empty());
}

#[tokio::test]
async fn login_discards_anonymous_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "jwt-new",
            "user": { "id": "u-7", "username": "dave", "email": "dave@example.com", "role": "user" }
        })))
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.products(&ProductQuery::default()).await.unwrap();
    assert_eq!(sf.cache().len(), 1);

    sf.register("dave", "dave@example.com", "pw").await.unwrap();
    assert!(sf.cache().is_empty());
    assert_eq!(sf.auth().user().map(|u| u.id), Some("u-7".to_string()));
}

#[tokio::test]
async fn anonymous_requests_carry_no_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("p-1", "A")))
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.product("p-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn status_errors_carry_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "statusCode": 404, "message": "Product not found" })),
        )
        .mount(&server)
        .await;

    let sf = storefront(&server);
    let err = sf.product("missing").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 404,
            message: "Product not found".into()
        }
    );
    assert!(err.is_not_found());
    // Failed first fetch leaves no entry behind.
    assert!(sf.cache().is_empty());
}

#[tokio::test]
async fn non_json_success_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let sf = storefront(&server);
    assert!(matches!(sf.users().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let sf = Storefront::new(&config, SessionStore::in_memory()).unwrap();
    assert!(matches!(sf.product("p-1").await, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn empty_delete_response_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.clear_cart().await.unwrap();
}

#[tokio::test]
async fn unauthorized_with_token_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })))
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.auth().set_credentials("expired", alice()).unwrap();

    let err = sf.cart().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!sf.auth().is_authenticated());
}

#[tokio::test]
async fn unauthorized_keeps_session_when_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.auth.logout_on_unauthorized = false;
    let sf = Storefront::new(&config, SessionStore::in_memory()).unwrap();
    sf.auth().set_credentials("expired", alice()).unwrap();

    let err = sf.cart().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            message: "Unauthorized".into()
        }
    );
    assert!(sf.auth().is_authenticated());
}

#[tokio::test]
async fn invalid_input_never_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    assert!(matches!(sf.add_to_cart("p-1", Some(0)).await, Err(ApiError::Invalid(_))));
    assert!(matches!(sf.update_cart_item("c-1", 0).await, Err(ApiError::Invalid(_))));
    assert!(matches!(sf.login("", "pw").await, Err(ApiError::Invalid(_))));
    assert!(matches!(sf.register("bob", "bob@example.com", "").await, Err(ApiError::Invalid(_))));
    let checkout = NewOrder {
        shipping_address: " ".into(),
        phone: "+100".into(),
        payment_method: PaymentMethod::Card,
    };
    assert!(matches!(sf.create_order(&checkout).await, Err(ApiError::Invalid(_))));
}

#[tokio::test]
async fn add_to_cart_defaults_to_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart"))
        .and(body_json(json!({ "productId": "p-1", "quantity": 1 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c-1",
            "userId": "u-1",
            "productId": "p-1",
            "product": product_json("p-1", "A"),
            "quantity": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.auth().set_credentials("jwt", alice()).unwrap();
    let item = sf.add_to_cart("p-1", None).await.unwrap();
    assert_eq!(item.quantity, 1);
}

#[tokio::test]
async fn disposed_cache_rejects_reads() {
    let server = MockServer::start().await;
    let sf = storefront(&server);
    sf.cache().dispose();
    assert_eq!(
        sf.product("p-1").await.unwrap_err(),
        ApiError::Cache(CacheError::Closed)
    );
}

#[tokio::test]
async fn text_body_delete_succeeds_and_invalidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-1", "username": "alice", "email": "alice@example.com", "role": "user"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.user("u-1").await.unwrap();
    let key = CacheKey::item(ResourceType::User, "u-1");
    assert_eq!(status_of(&sf, &key), Some(EntryStatus::Fresh));

    sf.delete_user("u-1").await.unwrap();
    assert_eq!(status_of(&sf, &key), Some(EntryStatus::Stale));
}

#[tokio::test]
async fn undecodable_mutation_response_still_invalidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json("p-1", "A")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .mount(&server)
        .await;

    let sf = storefront(&server);
    sf.product("p-1").await.unwrap();

    let err = sf
        .update_product("p-1", &ProductPatch { price: Some(1.0), ..ProductPatch::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(
        status_of(&sf, &CacheKey::item(ResourceType::Product, "p-1")),
        Some(EntryStatus::Stale)
    );
}

#[tokio::test]
async fn late_unauthorized_for_replaced_token_keeps_new_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(header("authorization", "Bearer old-token"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let backend = MemoryBackend::default();
    let sf = Storefront::new(&config_for(&server), SessionStore::new(backend.clone())).unwrap();
    sf.auth().set_credentials("old-token", alice()).unwrap();

    let (result, ()) = tokio::join!(sf.orders(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        sf.auth().set_credentials("new-token", alice()).unwrap();
    });

    assert!(result.unwrap_err().is_unauthorized());
    assert!(sf.auth().is_authenticated());
    assert_eq!(sf.auth().token().as_deref(), Some("new-token"));
    assert_eq!(backend.get(TOKEN_KEY).unwrap().as_deref(), Some("new-token"));
}

/// Accepts nothing, so every login fails to persist.
struct RejectingBackend;

impl KeyValueBackend for RejectingBackend {
    fn name(&self) -> &'static str {
        "rejecting"
    }
    fn get(&self, _key: &str) -> Result<Option<String>, shop_auth::AuthError> {
        Ok(None)
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), shop_auth::AuthError> {
        Err(shop_auth::AuthError::SessionStore("read-only filesystem".into()))
    }
    fn remove(&self, _key: &str) -> Result<(), shop_auth::AuthError> {
        Ok(())
    }
}

#[tokio::test]
async fn login_reports_unsaved_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "jwt-1",
            "user": { "id": "u-1", "username": "alice", "email": "alice@example.com", "role": "user" }
        })))
        .mount(&server)
        .await;

    let sf = Storefront::new(&config_for(&server), SessionStore::new(RejectingBackend)).unwrap();
    let err = sf.login("alice@example.com", "secret").await.unwrap_err();

    assert!(matches!(err, ApiError::Session(_)));
    // Signed in for this process even though nothing was saved.
    assert_eq!(sf.auth().token().as_deref(), Some("jwt-1"));
}
