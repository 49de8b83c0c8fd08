use quick_xml::escape::escape;
use quick_xml::{Reader, events::BytesStart, events::Event};

/// Target namespace of the TurboSMS SOAP service.
pub const NAMESPACE: &str = "http://turbosms.in.ua/api/Turbo";

const SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("response has no <{element}> element")]
    MissingResult { element: String },

    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("expected a single string in <{element}>, got a list")]
    UnexpectedList { element: String },
}

/// Payload of a `<{Procedure}Result>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapValue {
    Text(String),
    List(Vec<String>),
}

/// `SOAPAction` header value for a procedure.
pub fn soap_action(procedure: &str) -> String {
    format!("\"{NAMESPACE}/{procedure}\"")
}

/// Wrap a procedure call in a SOAP 1.1 envelope. Parameter values are
/// XML-escaped; parameter names are trusted.
pub fn encode_envelope(procedure: &str, params: &[(&str, &str)]) -> String {
    let mut body = String::with_capacity(256);
    body.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    body.push_str(&format!(
        r#"<soap:Envelope xmlns:soap="{SOAP_ENV}" xmlns:ns1="{NAMESPACE}"><soap:Body>"#
    ));

    if params.is_empty() {
        body.push_str(&format!("<ns1:{procedure}/>"));
    } else {
        body.push_str(&format!("<ns1:{procedure}>"));
        for (name, value) in params {
            body.push_str(&format!("<ns1:{name}>{}</ns1:{name}>", escape(*value)));
        }
        body.push_str(&format!("</ns1:{procedure}>"));
    }

    body.push_str("</soap:Body></soap:Envelope>");
    body
}

/// Extract the `<{procedure}Result>` payload from a response envelope.
///
/// A result with child elements (`ResultArray` items) is a list; a result
/// with only text is a string. Without a result element, a SOAP fault is
/// reported if the body carries one.
pub fn decode_result(xml: &str, procedure: &str) -> Result<SoapValue, TransportError> {
    let element = format!("{procedure}Result");
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside_result = false;
    let mut in_item = false;
    let mut saw_item = false;
    let mut text = String::new();
    let mut item = String::new();
    let mut items = Vec::<String>::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if inside_result {
                    in_item = true;
                    saw_item = true;
                    item.clear();
                } else if is_named(&e, &element) {
                    inside_result = true;
                }
            }
            Event::Empty(e) => {
                if inside_result {
                    saw_item = true;
                    items.push(String::new());
                } else if is_named(&e, &element) {
                    return Ok(SoapValue::Text(String::new()));
                }
            }
            Event::Text(e) if inside_result => {
                let value = e.unescape()?;
                if in_item {
                    item.push_str(&value);
                } else {
                    text.push_str(&value);
                }
            }
            Event::CData(e) => {
                let value = String::from_utf8_lossy(&e);
                if in_item {
                    item.push_str(&value);
                } else if inside_result {
                    text.push_str(&value);
                }
            }
            Event::End(e) => {
                if inside_result && e.local_name().as_ref() == element.as_bytes() {
                    if saw_item {
                        return Ok(SoapValue::List(items));
                    }
                    return Ok(SoapValue::Text(text));
                }
                if in_item {
                    items.push(std::mem::take(&mut item));
                    in_item = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((code, message)) = decode_fault(xml) {
        return Err(TransportError::Fault { code, message });
    }

    Err(TransportError::MissingResult { element })
}

/// `faultcode` and `faultstring` of a SOAP fault envelope, if `xml` is one.
pub fn decode_fault(xml: &str) -> Option<(String, String)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut field = None::<FaultField>;
    let mut code = None::<String>;
    let mut message = None::<String>;

    loop {
        match reader.read_event().ok()? {
            Event::Start(e) => field = FaultField::from_start(&e),
            Event::Text(e) => {
                let value = e.unescape().ok()?.into_owned();
                match field {
                    Some(FaultField::Code) => code = Some(value),
                    Some(FaultField::Message) => message = Some(value),
                    None => {}
                }
            }
            Event::End(_) => field = None,
            Event::Eof => break,
            _ => {}
        }
    }

    if code.is_none() && message.is_none() {
        return None;
    }
    Some((code.unwrap_or_default(), message.unwrap_or_default()))
}

/// Decode a result that must be a single string.
pub fn decode_text_result(xml: &str, procedure: &str) -> Result<String, TransportError> {
    match decode_result(xml, procedure)? {
        SoapValue::Text(text) => Ok(text),
        SoapValue::List(_) => Err(TransportError::UnexpectedList {
            element: format!("{procedure}Result"),
        }),
    }
}

#[derive(Debug, Clone, Copy)]
enum FaultField {
    Code,
    Message,
}

impl FaultField {
    fn from_start(e: &BytesStart<'_>) -> Option<Self> {
        match e.local_name().as_ref() {
            b"faultcode" => Some(Self::Code),
            b"faultstring" => Some(Self::Message),
            _ => None,
        }
    }
}

fn is_named(e: &BytesStart<'_>, local: &str) -> bool {
    e.local_name().as_ref() == local.as_bytes()
}
