//! AMQP round trip
//!
//! One connection, one session, one dynamically-addressed receiver and one
//! sender to `$management` per invocation. Exactly one request goes out and
//! exactly one reply is awaited; timeouts and cancellation are left to the
//! AMQP library. Any failure here is fatal for the invocation.

use fe2o3_amqp::connection::OpenError;
use fe2o3_amqp::link::{
    DetachError, ReceiverAttachError, RecvError, SendError, SenderAttachError,
};
use fe2o3_amqp::link::receiver::CreditMode;
use fe2o3_amqp::sasl_profile::SaslProfile;
use fe2o3_amqp::session::BeginError;
use fe2o3_amqp::{Connection, Receiver, Sender, Session};
use fe2o3_amqp_types::messaging::{
    AmqpValue, ApplicationProperties, Body, MessageId, Properties, Source,
};
use fe2o3_amqp_types::primitives::{OrderedMap, SimpleValue, Value};
use thiserror::Error;

use crate::mgmt::query::QueryRequest;
use crate::mgmt::response::RawResponse;

/// Address of the router's management node.
const MANAGEMENT_ADDRESS: &str = "$management";

/// One request, one response: a fixed correlation id suffices.
const CORRELATION_ID: u64 = 1;

/// Router replies can be large; match the original client's unlimited frame.
const MAX_FRAME_SIZE: u32 = u32::MAX;

const RECEIVER_CREDIT: u32 = 10;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {source}")]
    Connect { url: String, source: OpenError },

    #[error("failed to create session: {0}")]
    Session(#[from] BeginError),

    #[error("failed to create receiver: {0}")]
    ReceiverAttach(#[from] ReceiverAttachError),

    #[error("failed to create sender: {0}")]
    SenderAttach(#[from] SenderAttachError),

    #[error("router granted no dynamic reply address")]
    NoReplyAddress,

    #[error("could not send request: {0}")]
    Send(#[from] SendError),

    #[error("failed to receive response: {0}")]
    Receive(#[from] RecvError),

    #[error("failed to settle response: {0}")]
    Settle(String),

    #[error("failed to detach link: {0}")]
    Detach(#[from] DetachError),

    #[error("teardown failed: {0}")]
    Close(String),
}

/// SASL PLAIN when both credentials are given, ANONYMOUS otherwise.
fn sasl_profile(username: &str, password: &str) -> SaslProfile {
    if !username.is_empty() && !password.is_empty() {
        SaslProfile::Plain {
            username: username.to_string(),
            password: password.to_string(),
        }
    } else {
        SaslProfile::Anonymous
    }
}

fn request_message(
    request: &QueryRequest,
    reply_to: String,
) -> fe2o3_amqp_types::messaging::Message<AmqpValue<Value>> {
    let mut body: OrderedMap<Value, Value> = OrderedMap::new();
    body.insert(
        Value::String("attributeNames".to_string()),
        Value::List(
            request
                .attribute_names
                .iter()
                .cloned()
                .map(Value::String)
                .collect(),
        ),
    );

    fe2o3_amqp_types::messaging::Message::builder()
        .properties(
            Properties::builder()
                .reply_to(reply_to)
                .correlation_id(MessageId::Ulong(CORRELATION_ID))
                .build(),
        )
        .application_properties(
            ApplicationProperties::builder()
                .insert(
                    "operation",
                    SimpleValue::String(request.operation.to_string()),
                )
                .insert(
                    "entityType",
                    SimpleValue::String(request.entity_type.clone()),
                )
                .build(),
        )
        .value(Value::Map(body))
        .build()
}

/// Perform the management exchange: connect, send the query, await the single
/// reply, and hand back its relevant pieces.
pub async fn execute(
    url: &str,
    username: &str,
    password: &str,
    request: &QueryRequest,
) -> Result<RawResponse, TransportError> {
    let mut connection = Connection::builder()
        .container_id("qdrls")
        .max_frame_size(MAX_FRAME_SIZE)
        .sasl_profile(sasl_profile(username, password))
        .open(url)
        .await
        .map_err(|source| TransportError::Connect {
            url: url.to_string(),
            source,
        })?;

    let mut session = Session::begin(&mut connection).await?;

    let mut receiver = Receiver::builder()
        .name("qdrls-receiver")
        .source(Source::builder().dynamic(true).build())
        .credit_mode(CreditMode::Auto(RECEIVER_CREDIT))
        .attach(&mut session)
        .await?;

    let reply_to = receiver
        .source()
        .as_ref()
        .and_then(|source| source.address.clone())
        .ok_or(TransportError::NoReplyAddress)?;

    let mut sender = Sender::attach(&mut session, "qdrls-sender", MANAGEMENT_ADDRESS).await?;

    sender.send(request_message(request, reply_to)).await?;
    sender.close().await?;

    let delivery = receiver.recv::<Body<Value>>().await?;
    receiver
        .accept(&delivery)
        .await
        .map_err(|e| TransportError::Settle(e.to_string()))?;

    let message = delivery.into_message();

    let props = message.application_properties.as_ref();
    let status_code = props.and_then(|p| p.0.get("statusCode").cloned());
    let status_description = props.and_then(|p| match p.0.get("statusDescription") {
        Some(SimpleValue::String(s)) => Some(s.clone()),
        _ => None,
    });
    let body = match message.body {
        Body::Value(AmqpValue(value)) => Some(value),
        _ => None,
    };

    receiver.close().await?;
    session
        .end()
        .await
        .map_err(|e| TransportError::Close(e.to_string()))?;
    connection
        .close()
        .await
        .map_err(|e| TransportError::Close(e.to_string()))?;

    Ok(RawResponse {
        status_code,
        status_description,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sasl_plain_requires_both_credentials() {
        assert!(matches!(
            sasl_profile("admin", "secret"),
            SaslProfile::Plain { .. }
        ));
        assert!(matches!(sasl_profile("admin", ""), SaslProfile::Anonymous));
        assert!(matches!(sasl_profile("", "secret"), SaslProfile::Anonymous));
        assert!(matches!(sasl_profile("", ""), SaslProfile::Anonymous));
    }

    #[test]
    fn test_request_message_shape() {
        let request = QueryRequest {
            operation: "QUERY",
            entity_type: "org.apache.qpid.dispatch.router.link".to_string(),
            attribute_names: vec!["linkType".to_string(), "capacity".to_string()],
        };
        let message = request_message(&request, "replies/1".to_string());

        let properties = message.properties.as_ref().unwrap();
        assert_eq!(properties.reply_to.as_deref(), Some("replies/1"));

        let app = message.application_properties.as_ref().unwrap();
        assert_eq!(
            app.0.get("operation"),
            Some(&SimpleValue::String("QUERY".to_string()))
        );
        assert_eq!(
            app.0.get("entityType"),
            Some(&SimpleValue::String(
                "org.apache.qpid.dispatch.router.link".to_string()
            ))
        );

        let AmqpValue(Value::Map(body)) = &message.body else {
            panic!("body is not a map");
        };
        assert_eq!(
            body.get(&Value::String("attributeNames".to_string())),
            Some(&Value::List(vec![
                Value::String("linkType".to_string()),
                Value::String("capacity".to_string()),
            ]))
        );
    }
}
