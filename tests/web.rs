#![cfg(target_arch = "wasm32")]

use reversi_engine::wasm::ReversiEngine;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

fn new_engine() -> ReversiEngine {
    ReversiEngine::new(JsValue::UNDEFINED)
        .ok()
        .expect("default config must be accepted")
}

#[wasm_bindgen_test]
fn engine_accepts_opening_move_and_reports_flips() {
    let mut engine = new_engine();

    let outcome = engine.submit_move(2, 3).ok().unwrap();

    assert_eq!(field(&outcome, "accepted").as_bool(), Some(true));
    let flips = js_sys::Array::from(&field(&outcome, "flips"));
    assert_eq!(flips.length(), 1);
}

#[wasm_bindgen_test]
fn busy_engine_rejects_second_submission() {
    let mut engine = new_engine();
    engine.submit_move(2, 3).ok().unwrap();

    let outcome = engine.submit_move(2, 2).ok().unwrap();

    assert_eq!(field(&outcome, "accepted").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn out_of_range_submission_throws() {
    let mut engine = new_engine();

    assert!(engine.submit_move(8, 0).is_err());
}
