//! SOAP envelope reading and writing
//!
//! Only the `CreateProduct` operation is understood. Element prefixes are
//! ignored, so SOAP 1.1 and 1.2 envelopes parse the same way.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use mercato_core::Product;

pub const SOAP_ENV_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const SERVICE_NS: &str = "http://localhost:8000/products";

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("request is not a SOAP envelope")]
    NotAnEnvelope,

    #[error("SOAP body does not contain a CreateProduct element")]
    MissingOperation,
}

/// Raw `CreateProduct` arguments, as text
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CreateProductArgs {
    pub name: Option<String>,
    pub about: Option<String>,
    pub price: Option<String>,
}

#[derive(Clone, Copy)]
enum Arg {
    Name,
    About,
    Price,
}

impl CreateProductArgs {
    fn push(&mut self, arg: Arg, text: &str) {
        let slot = match arg {
            Arg::Name => &mut self.name,
            Arg::About => &mut self.about,
            Arg::Price => &mut self.price,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }
}

/// Pull the `CreateProduct` arguments out of a request envelope.
pub fn parse_create_product(xml: &str) -> Result<CreateProductArgs, EnvelopeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut envelope = false;
    let mut in_body = false;
    let mut in_operation = false;
    let mut found = false;
    let mut current: Option<Arg> = None;
    let mut args = CreateProductArgs::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"Envelope" => envelope = true,
                    b"Body" if envelope => in_body = true,
                    b"CreateProduct" if in_body => {
                        in_operation = true;
                        found = true;
                    }
                    b"name" if in_operation => current = Some(Arg::Name),
                    b"about" if in_operation => current = Some(Arg::About),
                    b"price" if in_operation => current = Some(Arg::Price),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if in_body && e.local_name().as_ref() == b"CreateProduct" {
                    found = true;
                }
            }
            Event::Text(t) => {
                if let Some(arg) = current {
                    args.push(arg, &t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(arg) = current {
                    args.push(arg, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"name" | b"about" | b"price" => current = None,
                b"CreateProduct" => in_operation = false,
                b"Body" => in_body = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !envelope {
        return Err(EnvelopeError::NotAnEnvelope);
    }
    if !found {
        return Err(EnvelopeError::MissingOperation);
    }
    Ok(args)
}

/// Successful `CreateProduct` reply carrying the stored product.
pub fn create_product_response(product: &Product) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:soap="{env}" xmlns:tns="{svc}">"#,
            "<soap:Body><tns:CreateProductResponse>",
            "<tns:id>{id}</tns:id>",
            "<tns:name>{name}</tns:name>",
            "<tns:about>{about}</tns:about>",
            "<tns:price>{price}</tns:price>",
            "</tns:CreateProductResponse></soap:Body></soap:Envelope>"
        ),
        env = SOAP_ENV_NS,
        svc = SERVICE_NS,
        id = product.id,
        name = escape(product.name.as_str()),
        about = escape(product.about.as_str()),
        price = product.price,
    )
}
