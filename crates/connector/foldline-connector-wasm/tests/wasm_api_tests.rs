#![cfg(target_arch = "wasm32")]
use foldline_connector_wasm::{abi_version, build_path, compute_reveal, FoldlineConnector};
use serde_json::{json, Value};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_js(v: &Value) -> JsValue {
    use serde::Serialize;
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn from_js(v: JsValue) -> Value {
    serde_wasm_bindgen::from_value(v).unwrap()
}

fn layout(container_top: f64) -> Value {
    json!({
        "container": { "left": 0.0, "top": container_top, "width": 400.0, "height": 1000.0 },
        "viewport_height": 1000.0,
        "anchors": {
            "mockup-1": { "left": 50.0, "top": container_top + 50.0, "width": 100.0, "height": 100.0 },
            "mockup-2": { "left": 250.0, "top": container_top + 450.0, "width": 100.0, "height": 100.0 },
            "mockup-3": { "left": 50.0, "top": container_top + 850.0, "width": 100.0, "height": 100.0 }
        }
    })
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    assert!(FoldlineConnector::new(JsValue::UNDEFINED).is_ok());
}

#[wasm_bindgen_test]
fn construct_rejects_bad_config() {
    let cfg = to_js(&json!({ "anchor_ids": ["only-one"] }));
    assert!(FoldlineConnector::new(cfg).is_err());
}

#[wasm_bindgen_test]
fn activate_then_scroll() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    let out = from_js(c.dispatch(JsValue::from_str("activated"), to_js(&layout(400.0))).unwrap());
    assert_eq!(out["handled"], true);
    assert!(out["path"].as_str().unwrap().starts_with("M 100 100"));
    assert!((out["fraction"].as_f64().unwrap() - 0.4).abs() < 1e-9);
    assert_eq!(out["lifecycle"]["state"], "revealed");

    let out = from_js(c.dispatch(JsValue::from_str("scroll"), to_js(&layout(100.0))).unwrap());
    assert!(out.get("path").is_none());
    assert!((out["fraction"].as_f64().unwrap() - 0.7).abs() < 1e-9);
    assert!(c.total_length().unwrap() > 0.0);
}

#[wasm_bindgen_test]
fn scroll_before_activation_is_ignored() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    let out = from_js(c.dispatch(JsValue::from_str("scroll"), to_js(&layout(0.0))).unwrap());
    assert_eq!(out["handled"], false);
    assert_eq!(out["fraction"], 0.0);
}

#[wasm_bindgen_test]
fn queue_and_flush() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    c.queue(JsValue::from_str("activated")).unwrap();
    c.queue(JsValue::from_str("scroll")).unwrap();
    let out = from_js(c.flush(to_js(&layout(400.0))).unwrap());
    assert!((out["fraction"].as_f64().unwrap() - 0.4).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn unknown_signal_is_error() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    assert!(c.dispatch(JsValue::from_str("zoom"), JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn free_functions() {
    let anchors = to_js(&json!([{ "x": 0.0, "y": 0.0 }, { "x": 100.0, "y": 300.0 }, { "x": 0.0, "y": 600.0 }]));
    let built = from_js(build_path(anchors, None).unwrap());
    assert_eq!(built["d"], "M 0 0 C 0 200, 100 100, 100 300 C 100 500, 0 400, 0 600");
    assert!(build_path(to_js(&json!([])), None).unwrap().is_null());
    assert_eq!(compute_reveal(-2000.0, 1000.0, 1000.0, 500.0), 1.05);
}

/// Callbacks that append their arguments to `globalThis[key]`.
fn recorder(key: &str, params: &str) -> Function {
    Reflect::set(&js_sys::global(), &JsValue::from_str(key), &Array::new()).unwrap();
    Function::new_with_args(
        params,
        &format!("globalThis[\"{key}\"].push(Array.from(arguments));"),
    )
}

fn recorded(key: &str) -> Value {
    from_js(Reflect::get(&js_sys::global(), &JsValue::from_str(key)).unwrap())
}

#[wasm_bindgen_test]
fn renderer_receives_paths_and_dash() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    c.attach_renderer(
        recorder("fl_paths_a", "track, d"),
        recorder("fl_dash_a", "total, hidden"),
    );
    let out = from_js(c.dispatch(JsValue::from_str("activated"), to_js(&layout(400.0))).unwrap());
    let d = out["path"].as_str().unwrap();

    let paths = recorded("fl_paths_a");
    assert_eq!(
        paths,
        json!([["background", d], ["active", d], ["mask", d]])
    );

    let total = c.total_length().unwrap();
    let dash = recorded("fl_dash_a");
    assert_eq!(dash.as_array().unwrap().len(), 1);
    assert!((dash[0][0].as_f64().unwrap() - total).abs() < 1e-9);
    assert!((dash[0][1].as_f64().unwrap() - total * 0.6).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn queued_reactivation_ends_with_drawn_tracks() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    c.dispatch(JsValue::from_str("activated"), to_js(&layout(400.0)))
        .unwrap();
    c.attach_renderer(
        recorder("fl_paths_b", "track, d"),
        recorder("fl_dash_b", "total, hidden"),
    );
    c.queue(JsValue::from_str("deactivated")).unwrap();
    c.queue(JsValue::from_str("activated")).unwrap();
    c.flush(to_js(&layout(400.0))).unwrap();

    let paths = recorded("fl_paths_b");
    let calls = paths.as_array().unwrap();
    assert_eq!(calls.len(), 6);
    assert!(calls[..3].iter().all(|call| call[1] == ""));
    let d = c.path_descriptor().unwrap();
    assert!(calls[3..].iter().all(|call| call[1] == d.as_str()));
}

#[wasm_bindgen_test]
fn detached_renderer_is_not_called() {
    let mut c = FoldlineConnector::new(JsValue::NULL).unwrap();
    c.attach_renderer(
        recorder("fl_paths_c", "track, d"),
        recorder("fl_dash_c", "total, hidden"),
    );
    c.detach_renderer();
    c.dispatch(JsValue::from_str("activated"), to_js(&layout(400.0)))
        .unwrap();
    assert_eq!(recorded("fl_paths_c"), json!([]));
}
