#![warn(missing_docs)]
//! IBRP - In Browser Route Planning

mod backend;
mod debug;
mod geo_types;
mod polyline;
mod routing;

extern crate console_error_panic_hook;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
/// Sets up hooks so that panics are forwarded to console.error.
///
/// If you want this behaviour, call the function one time in your code.
pub fn init_hooks() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}
