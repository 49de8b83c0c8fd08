use turbosms::{AuthError, KnownReply, SendSms, SmsSender, TurboSmsError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_OK: &str = "Сообщения успешно отправлены";

fn envelope(procedure: &str, result: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="http://turbosms.in.ua/api/Turbo">
<SOAP-ENV:Body><ns1:{procedure}Response><ns1:{procedure}Result>{result}</ns1:{procedure}Result></ns1:{procedure}Response></SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
}

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml; charset=utf-8")
        .set_body_string(body)
}

async fn mount(server: &MockServer, procedure: &str, body: String, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/soap.html"))
        .and(header(
            "SOAPAction",
            format!("\"http://turbosms.in.ua/api/Turbo/{procedure}\"").as_str(),
        ))
        .and(body_string_contains(format!("<ns1:{procedure}")))
        .respond_with(xml(body))
        .expect(times)
        .mount(server)
        .await;
}

fn sender_for(server: &MockServer) -> SmsSender {
    SmsSender::builder("shop", "s3cret", "Shop")
        .endpoint(format!("{}/api/soap.html", server.uri()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn sends_through_soap_endpoint() {
    let server = MockServer::start().await;
    mount(
        &server,
        "Auth",
        envelope("Auth", KnownReply::AuthSuccess.as_str()),
        1,
    )
    .await;
    mount(&server, "GetCreditBalance", envelope("GetCreditBalance", "10"), 2).await;
    mount(
        &server,
        "SendSMS",
        envelope(
            "SendSMS",
            &format!("<ns1:ResultArray>{SEND_OK}</ns1:ResultArray><ns1:ResultArray>id-1</ns1:ResultArray>"),
        ),
        2,
    )
    .await;

    let mut sender = sender_for(&server);
    sender
        .send(SendSms::new(["0501234567"], "hi"))
        .await
        .unwrap();
    assert_eq!(sender.last_results(), [SEND_OK.to_owned(), "id-1".to_owned()]);

    sender
        .send(SendSms::new(["+380671112233"], "again").with_sender("Other"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let bodies: Vec<String> = requests
        .iter()
        .map(|req| String::from_utf8_lossy(&req.body).into_owned())
        .collect();
    assert!(bodies[2].contains("<ns1:destination>+380501234567</ns1:destination>"));
    assert!(bodies[4].contains("<ns1:sender>Other</ns1:sender>"));
}

#[tokio::test]
async fn wrong_credentials_surface_as_auth_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "Auth",
        envelope("Auth", KnownReply::AuthWrongCredentials.as_str()),
        1,
    )
    .await;

    let mut sender = sender_for(&server);
    let err = sender
        .send(SendSms::new(["+380501234567"], "hi"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TurboSmsError::Auth(AuthError::WrongCredentials)
    ));
    assert!(!sender.is_connected());
}

#[tokio::test]
async fn debug_sender_makes_no_requests() {
    let server = MockServer::start().await;
    let mut sender = SmsSender::builder("shop", "s3cret", "Shop")
        .endpoint(server.uri())
        .debug(true)
        .build()
        .unwrap();

    sender
        .send(SendSms::new(["+380501234567"], "hi"))
        .await
        .unwrap();

    assert_eq!(
        sender.last_results(),
        [KnownReply::DebugSendSuccess.as_str().to_owned()]
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}
