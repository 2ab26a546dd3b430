use crate::api::client::{check_status, ApiClient};
use crate::api::error::ApiError;
use crate::api::event_stream::{EventStreamParser, ServerEvent};
use crate::models::VideoRecord;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, ReadableStreamDefaultReader};
use yew::Callback;

pub const VIDEO_PROCESSED: &str = "video-processed";

/// Handle to the open `/videos/events` connection. Dropping it does nothing;
/// call [`EventSubscription::close`] when the view goes away.
pub struct EventSubscription {
    controller: AbortController,
}

impl EventSubscription {
    pub fn close(&self) {
        self.controller.abort();
    }
}

/// Opens the push channel and reports every `video-processed` record through
/// `on_processed`. The fetch API is used instead of `EventSource` so the bearer
/// token can travel in a header.
pub fn subscribe_processed(
    client: &ApiClient,
    on_processed: Callback<VideoRecord>,
    on_error: Callback<ApiError>,
) -> Result<EventSubscription, ApiError> {
    let controller = AbortController::new()
        .map_err(|_| ApiError::Transport("AbortController unavailable".into()))?;
    let signal = controller.signal();
    let client = client.clone();

    wasm_bindgen_futures::spawn_local(async move {
        match read_events(&client, &signal, &on_processed).await {
            Ok(()) => log::info!("Event stream closed by server"),
            Err(_) if signal.aborted() => log::debug!("Event stream aborted"),
            Err(e) => {
                log::error!("Event stream failed: {}", e);
                on_error.emit(e);
            }
        }
    });

    Ok(EventSubscription { controller })
}

async fn read_events(
    client: &ApiClient,
    signal: &AbortSignal,
    on_processed: &Callback<VideoRecord>,
) -> Result<(), ApiError> {
    let url = client.config().endpoint("videos/events");
    let response = client
        .get(&url)
        .header("Accept", "text/event-stream")
        .abort_signal(Some(signal))
        .send()
        .await?;
    let response = check_status(response, false).await?;

    let body = response
        .body()
        .ok_or_else(|| ApiError::Transport("Event stream has no body".into()))?;
    let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();
    let mut parser = EventStreamParser::new();

    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| ApiError::Transport(format!("{e:?}")))?;

        let done = Reflect::get(&chunk, &"done".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            if let Some(ms) = parser.retry_ms() {
                log::debug!("Server suggested reconnecting after {} ms", ms);
            }
            return Ok(());
        }

        let value = Reflect::get(&chunk, &"value".into())
            .map_err(|e| ApiError::Transport(format!("{e:?}")))?;
        let bytes = Uint8Array::new(&value).to_vec();

        for event in parser.feed(&bytes) {
            // anything still buffered once the view has gone is thrown away
            if signal.aborted() {
                return Ok(());
            }
            handle_event(event, on_processed);
        }
    }
}

fn handle_event(event: ServerEvent, on_processed: &Callback<VideoRecord>) {
    match decode_processed(&event) {
        Some(Ok(record)) => {
            log::debug!("Video {} processed", record.id);
            on_processed.emit(record);
        }
        Some(Err(e)) => log::warn!("Ignoring malformed {} event: {}", VIDEO_PROCESSED, e),
        None => log::debug!("Ignoring '{}' event (id {:?})", event.event, event.id),
    }
}

/// `None` for events of other types.
pub fn decode_processed(event: &ServerEvent) -> Option<Result<VideoRecord, serde_json::Error>> {
    (event.event == VIDEO_PROCESSED).then(|| serde_json::from_str(&event.data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoId;

    fn event(name: &str, data: &str) -> ServerEvent {
        ServerEvent {
            event: name.into(),
            data: data.into(),
            id: None,
        }
    }

    #[test]
    fn processed_events_decode_to_records() {
        let decoded = decode_processed(&event(
            VIDEO_PROCESSED,
            r#"{"id":"1","title":"A","isProcessed":true}"#,
        ))
        .unwrap()
        .unwrap();
        assert_eq!(decoded.id, VideoId::from("1"));
        assert!(decoded.is_processed);
    }

    #[test]
    fn other_events_are_skipped() {
        assert!(decode_processed(&event("message", r#"{"id":"1"}"#)).is_none());
        assert!(decode_processed(&event("heartbeat", "")).is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(decode_processed(&event(VIDEO_PROCESSED, "not json"))
            .unwrap()
            .is_err());
    }
}
