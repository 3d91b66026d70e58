//! Client round trips against an in-process mock gateway.
//!
//! The mock records what each request carried (path, raw query and the three
//! gateway headers) and answers with a canned body per path.

use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};
use std::sync::Mutex;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use yigim::{
    Configuration, GatewayRequest, Language, PaymentCreate, PaymentExecute, PaymentGateway,
    PaymentRefund, PaymentStatus, PaymentStatusCode, PaymentType, ResponseCode, Secure3DStatus,
    YigimClient, YigimError,
};

const MERCHANT: &str = "merchant-1";
const SECRET: &str = "test-secret";

#[derive(Debug, Clone)]
struct Seen {
    path: String,
    query: String,
    merchant: String,
    format: String,
    signature: String,
}

struct MockGateway {
    bodies: HashMap<String, String>,
    seen: Mutex<Vec<Seen>>,
}

impl MockGateway {
    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn respond(req: HttpRequest, state: web::Data<MockGateway>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };
    state.seen.lock().unwrap().push(Seen {
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        merchant: header("X-Merchant"),
        format: header("X-Type"),
        signature: header("X-Signature"),
    });

    match state.bodies.get(req.path()) {
        Some(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body.clone()),
        None => HttpResponse::NotFound().finish(),
    }
}

/// Start a mock gateway answering `bodies` (path -> JSON) on a random port.
fn spawn_gateway(bodies: &[(&str, &str)]) -> (YigimClient, web::Data<MockGateway>) {
    let state = web::Data::new(MockGateway {
        bodies: bodies
            .iter()
            .map(|(path, body)| (path.to_string(), body.to_string()))
            .collect(),
        seen: Mutex::new(Vec::new()),
    });

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .default_service(web::to(respond))
    })
    .workers(1)
    .listen(listener)
    .unwrap()
    .run();
    actix_rt::spawn(server);

    let client = YigimClient::new(Configuration::new(
        format!("http://{addr}"),
        MERCHANT,
        SECRET,
    ));
    (client, state)
}

fn sample_create(reference: String) -> PaymentCreate {
    PaymentCreate {
        reference,
        payment_type: PaymentType::Sms,
        token: String::new(),
        save: true,
        amount: 100,
        currency: "944".to_string(),
        biller: "TEST".to_string(),
        description: "Card linking".to_string(),
        template: "TPL0001".to_string(),
        language: Language::En,
        callback: "http://test.com".to_string(),
        extra: BTreeMap::from([("id".to_string(), "test".to_string())]),
    }
}

fn sample_execute(reference: &str) -> PaymentExecute {
    PaymentExecute {
        reference: reference.to_string(),
        payment_type: PaymentType::Sms,
        token: "tok-1".to_string(),
        amount: 100,
        currency: "944".to_string(),
        biller: "TEST".to_string(),
    }
}

fn assert_signed<R: GatewayRequest>(seen: &Seen, request: &R) {
    let expected = request.encode(SECRET);
    assert_eq!(seen.path, format!("/{}", R::PATH));
    assert_eq!(seen.query, expected.query);
    assert_eq!(seen.signature, expected.signature);
    assert_eq!(seen.merchant, MERCHANT);
    assert_eq!(seen.format, "JSON");
}

#[actix_rt::test]
async fn test_create_sends_signed_request() {
    let (client, gateway) = spawn_gateway(&[(
        "/payment/create",
        r#"{"url":"https://sandbox.pay.yigim.az/payment/ABC123","code":0,"message":"OK (No error)"}"#,
    )]);

    let payment = sample_create(client.get_ref());
    let result = client.create(&payment).await.unwrap();

    assert_eq!(result.code, ResponseCode::Code0);
    assert_eq!(result.message, "OK (No error)");
    assert_eq!(result.url, "https://sandbox.pay.yigim.az/payment/ABC123");

    let seen = gateway.seen();
    assert_eq!(seen.len(), 1);
    assert_signed(&seen[0], &payment);
}

#[actix_rt::test]
async fn test_status_decodes_transaction() {
    let (client, gateway) = spawn_gateway(&[(
        "/payment/status",
        r#"{"reference":"ref-0000000000","datetime":"2024-03-01 12:00:00","type":"SMS",
            "token":"tok-1","pan":"4169********1234","expiry":"2612","amount":1,
            "currency":"AZN","biller":"TEST","system":"VISA","issuer":null,"rrn":"406112345678",
            "3ds":"00","approval":"123456","status":"00","code":0,"message":"OK (No error)",
            "extra":[{"name":"id","value":"test"}]}"#,
    )]);

    let request = PaymentStatus::new("ref-0000000000");
    let result = client.status(&request).await.unwrap();

    assert_eq!(result.payment_type, "SMS");
    assert_eq!(result.amount, 1.0);
    assert_eq!(result.currency, "AZN");
    assert_eq!(result.issuer, None);
    assert_eq!(result.secure3d_status, Some(Secure3DStatus::Status00));
    assert_eq!(result.status, Some(PaymentStatusCode::Approved));

    assert_signed(&gateway.seen()[0], &request);
}

#[actix_rt::test]
async fn test_refund_and_execute_paths() {
    let (client, gateway) = spawn_gateway(&[
        ("/payment/refund", r#"{"code":0,"message":"OK (No error)"}"#),
        (
            "/payment/execute",
            r#"{"reference":"ref-1","type":"SMS","amount":1,"currency":"AZN","status":"00",
                "code":0,"message":"OK (No error)"}"#,
        ),
    ]);

    let execute = sample_execute("ref-1");
    let executed = client.execute(&execute).await.unwrap();
    assert!(executed.code.is_success());
    assert_eq!(executed.pan, None);

    let refund = PaymentRefund::new("ref-1");
    let refunded = client.refund(&refund).await.unwrap();
    assert_eq!(refunded.message, "OK (No error)");

    let seen = gateway.seen();
    assert_eq!(seen.len(), 2);
    assert_signed(&seen[0], &execute);
    assert_signed(&seen[1], &refund);
}

#[actix_rt::test]
async fn test_decline_is_not_an_error() {
    let (client, _gateway) = spawn_gateway(&[(
        "/payment/execute",
        r#"{"code":3,"message":"Invalid token","status":"05"}"#,
    )]);

    let result = client.execute(&sample_execute("ref-2")).await.unwrap();
    assert_eq!(result.code, ResponseCode::Code3);
    assert!(!result.code.is_success());
    assert_eq!(result.status, Some(PaymentStatusCode::InsufficientFunds));
}

#[actix_rt::test]
async fn test_undocumented_codes_are_not_errors() {
    let (client, _gateway) = spawn_gateway(&[(
        "/payment/status",
        r#"{"reference":"ref-8","status":"S6","3ds":"","code":3,"message":null}"#,
    )]);

    let result = client.status(&PaymentStatus::new("ref-8")).await.unwrap();
    assert_eq!(result.code, ResponseCode::Code3);
    assert_eq!(result.status, Some(PaymentStatusCode::Other("S6".to_string())));
    assert_eq!(result.secure3d_status, None);
    assert_eq!(result.message, "");
}

#[actix_rt::test]
async fn test_malformed_body_is_decode_error() {
    let (client, _gateway) = spawn_gateway(&[("/payment/status", "<html>bad gateway</html>")]);

    let err = client
        .status(&PaymentStatus::new("ref-3"))
        .await
        .unwrap_err();
    assert!(matches!(err, YigimError::Decode(_)));
    assert!(err.to_string().starts_with("cannot unmarshal the response"));
}

#[actix_rt::test]
async fn test_http_error_status_is_decoded_not_interpreted() {
    // No body registered for refund: the mock answers 404 with an empty body.
    let (client, gateway) = spawn_gateway(&[]);

    let err = client
        .refund(&PaymentRefund::new("ref-4"))
        .await
        .unwrap_err();
    assert!(matches!(err, YigimError::Decode(_)));
    assert_eq!(gateway.seen().len(), 1);
}

#[actix_rt::test]
async fn test_concurrent_calls_share_one_client() {
    let (client, gateway) = spawn_gateway(&[
        ("/payment/status", r#"{"code":0,"message":"OK","status":"S2"}"#),
        ("/payment/refund", r#"{"code":0,"message":"OK"}"#),
    ]);

    let other = client.clone();
    let (status_a, status_b) = (PaymentStatus::new("ref-a"), PaymentStatus::new("ref-b"));
    let refund_c = PaymentRefund::new("ref-c");
    let (a, b, c) = tokio::join!(
        client.status(&status_a),
        other.status(&status_b),
        client.refund(&refund_c),
    );

    assert_eq!(a.unwrap().status, Some(PaymentStatusCode::S2));
    assert_eq!(b.unwrap().status, Some(PaymentStatusCode::S2));
    assert!(c.unwrap().code.is_success());

    let mut queries: Vec<String> = gateway.seen().into_iter().map(|s| s.query).collect();
    queries.sort();
    assert_eq!(
        queries,
        vec!["reference=ref-a", "reference=ref-b", "reference=ref-c"]
    );
}

/// Merchant-side flow written against the trait rather than the client.
async fn link_card<G: PaymentGateway>(gateway: &G) -> Result<String, YigimError> {
    let result = gateway.create(&sample_create(gateway.get_ref())).await?;
    Ok(result.url)
}

#[actix_rt::test]
async fn test_payment_gateway_trait() {
    let (client, gateway) = spawn_gateway(&[(
        "/payment/create",
        r#"{"url":"https://sandbox.pay.yigim.az/payment/XYZ","code":0,"message":"OK"}"#,
    )]);

    let url = link_card(&client).await.unwrap();
    assert_eq!(url, "https://sandbox.pay.yigim.az/payment/XYZ");
    assert!(gateway.seen()[0].query.contains("reference=ref-"));
}

#[tokio::test]
async fn test_unreachable_gateway_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = YigimClient::new(Configuration::new(
        format!("http://127.0.0.1:{port}"),
        MERCHANT,
        SECRET,
    ));

    let err = client
        .status(&PaymentStatus::new("ref-5"))
        .await
        .unwrap_err();
    assert!(matches!(err, YigimError::Transport(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_truncated_body_is_body_read_error() {
    // Promise 100 bytes, send a few, then hang up.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let _ = stream.read(&mut buf).unwrap();
        stream
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"code\":0")
            .unwrap();
        stream.flush().unwrap();
    });

    let client = YigimClient::new(Configuration::new(format!("http://{addr}"), MERCHANT, SECRET));
    let err = client
        .status(&PaymentStatus::new("ref-7"))
        .await
        .unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, YigimError::BodyRead(_)), "got {err:?}");
    assert!(err.to_string().starts_with("cannot read the body"));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_malformed_address_fails_before_network() {
    let client = YigimClient::new(Configuration::new("::not a url::", MERCHANT, SECRET));

    let err = client
        .create(&sample_create("ref-6".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, YigimError::RequestBuild(_)));
}
