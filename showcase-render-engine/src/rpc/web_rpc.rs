use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::narrative_manifest::NarrativeManifest;
use crate::engine::camera::camera_tween::{CameraRig, TweenPolicy};
use crate::engine::scroll::scroll_state::{PauseState, ScrollSample};
use crate::engine::scroll::section_resolver::{ActiveSection, SectionChanged};
use crate::engine::scroll::visibility::NarrativeMode;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC communication between the page and
/// the engine. Handles both request-response patterns and notification
/// broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the parent page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the WebRPC communication layer for iframe-based
/// deployment, plus the outgoing state notifications.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_section_changed,
                    notify_narrative_state,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap pre-filter before the real JSON parse on the ECS side.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the parent page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut scroll_samples: EventWriter<ScrollSample>,
    mut pause: ResMut<PauseState>,
    mut rig: ResMut<CameraRig>,
    mode: Res<NarrativeMode>,
    active: Res<ActiveSection>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                let result = dispatch_rpc_method(
                    &request,
                    &diagnostics,
                    &mut scroll_samples,
                    &mut pause,
                    &mut rig,
                    &mode,
                    &active,
                );

                // Side effects run for notifications too; only requests
                // carrying an id get a response back.
                if let Some(id) = request.id.clone() {
                    let response = match result {
                        Ok(result_value) => RpcResponse {
                            jsonrpc: "2.0".to_string(),
                            result: Some(result_value),
                            error: None,
                            id: Some(id),
                        },
                        Err(error) => RpcResponse {
                            jsonrpc: "2.0".to_string(),
                            result: None,
                            error: Some(error),
                            id: Some(id),
                        },
                    };
                    rpc_interface.queue_response(response);
                } else if let Err(error) = result {
                    warn!("RPC notification '{}' failed: {}", request.method, error.message);
                }
            }
            Err(parse_error) => {
                warn!("Discarding unparseable RPC message: {}", parse_error);
            }
        }
    }
}

/// Run one RPC method. Called for requests and notifications alike.
fn dispatch_rpc_method(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    scroll_samples: &mut EventWriter<ScrollSample>,
    pause: &mut PauseState,
    rig: &mut CameraRig,
    mode: &NarrativeMode,
    active: &ActiveSection,
) -> Result<serde_json::Value, RpcError> {
    match request.method.as_str() {
        "scroll_update" => handle_scroll_update(&request.params, scroll_samples),
        "set_paused" => handle_set_paused(&request.params, pause),
        "set_tween_policy" => handle_set_tween_policy(&request.params, rig),
        "get_narrative_state" => handle_get_narrative_state(mode, active, pause, rig),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({"method": request.method})),
            })
        }
    }
}

/// Fold a page scroll tick into the engine's scroll state.
fn handle_scroll_update(
    params: &serde_json::Value,
    scroll_samples: &mut EventWriter<ScrollSample>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ScrollUpdateParams {
        offset_px: f32,
        viewport_height_px: f32,
    }

    let parsed = serde_json::from_value::<ScrollUpdateParams>(params.clone()).map_err(|_| {
        RpcError::invalid_params("Expected 'offset_px' and 'viewport_height_px' parameters")
    })?;

    if !parsed.offset_px.is_finite() || !parsed.viewport_height_px.is_finite() {
        return Err(RpcError::invalid_params("Scroll values must be finite"));
    }

    scroll_samples.write(ScrollSample {
        offset_px: parsed.offset_px,
        viewport_height_px: parsed.viewport_height_px,
    });

    Ok(serde_json::json!({ "success": true }))
}

fn handle_set_paused(
    params: &serde_json::Value,
    pause: &mut PauseState,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetPausedParams {
        paused: bool,
    }

    let parsed = serde_json::from_value::<SetPausedParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'paused' parameter"))?;

    pause.paused = parsed.paused;
    info!("Showcase paused: {}", pause.paused);

    Ok(serde_json::json!({ "success": true, "paused": pause.paused }))
}

fn handle_set_tween_policy(
    params: &serde_json::Value,
    rig: &mut CameraRig,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SetTweenPolicyParams {
        policy: String,
    }

    let parsed = serde_json::from_value::<SetTweenPolicyParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'policy' parameter"))?;

    let policy = TweenPolicy::from_str(&parsed.policy).ok_or_else(|| {
        RpcError::invalid_params(&format!(
            "Unknown policy '{}', expected 'drop' or 'latest'",
            parsed.policy
        ))
    })?;

    rig.set_policy(policy);

    Ok(serde_json::json!({ "success": true, "policy": policy.as_str() }))
}

/// Snapshot of the gate flags and camera state for the page overlays.
fn handle_get_narrative_state(
    mode: &NarrativeMode,
    active: &ActiveSection,
    pause: &PauseState,
    rig: &CameraRig,
) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "in_scroll_mode": mode.is_in_scroll_mode,
        "should_render_scene": mode.should_render_scene,
        "scene_visible": mode.is_scene_visible,
        "active_section": active.index(),
        "paused": pause.paused,
        "tween_policy": rig.policy().as_str(),
        "tween_running": rig.is_running(),
    }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Forward section changes to the page so it can swap its text overlays.
/// The payload carries the section copy so the page needs no manifest of
/// its own.
fn notify_section_changed(
    mut changes: EventReader<SectionChanged>,
    manifest: Option<Res<NarrativeManifest>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for change in changes.read() {
        let mut params = serde_json::json!({ "index": change.index });
        if let Some(section) = manifest.as_ref().and_then(|m| m.section(change.index)) {
            params = serde_json::json!({
                "index": change.index,
                "id": section.id,
                "title": section.title,
                "stat_value": section.stat_value,
                "stat_label": section.stat_label,
            });
        }
        rpc_interface.send_notification("section_changed", params);
    }
}

/// Announce gate flag flips so the page can mount and fade its canvas.
fn notify_narrative_state(mode: Res<NarrativeMode>, mut rpc_interface: ResMut<WebRpcInterface>) {
    if !mode.is_changed() || mode.is_added() {
        return;
    }

    rpc_interface.send_notification(
        "narrative_state_changed",
        serde_json::json!({
            "in_scroll_mode": mode.is_in_scroll_mode,
            "should_render_scene": mode.should_render_scene,
            "scene_visible": mode.is_scene_visible,
        }),
    );
}

/// Send queued notifications and responses to the parent page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses after notifications to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_parse_with_and_without_ids() {
        let with_id: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"get_fps","params":{},"id":7}"#,
        )
        .unwrap();
        assert_eq!(with_id.method, "get_fps");
        assert!(with_id.id.is_some());

        let notification: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"scroll_update","params":{"offset_px":1850.0,"viewport_height_px":1000.0}}"#,
        )
        .unwrap();
        assert!(notification.id.is_none());
        assert_eq!(notification.params["offset_px"], 1850.0);
    }

    #[test]
    fn params_default_to_null_when_omitted() {
        let bare: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_narrative_state","id":1}"#)
                .unwrap();
        assert!(bare.params.is_null());
    }

    #[test]
    fn notifications_serialize_without_an_id_field() {
        let mut interface = WebRpcInterface::default();
        interface.send_notification("section_changed", serde_json::json!({ "index": 2 }));

        let json = serde_json::to_string(&interface.outgoing_notifications[0]).unwrap();
        assert!(json.contains(r#""method":"section_changed""#));
        assert!(!json.contains(r#""id""#));
    }
}
