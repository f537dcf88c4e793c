//! Iris Bloom core crate.
//!
//! A greeting page in three stages: an iris icon waits for a click, a seed
//! falls, then a field of flowers blooms one by one while a message types
//! itself out. The state machine (`bloom`) and its timer abstraction (`timer`)
//! are plain Rust and run natively; `page` mounts it into the browser and is
//! driven from JS via `start_greeting()`.

use wasm_bindgen::prelude::*;

pub mod bloom;
pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod rng;
pub mod timer;

pub use bloom::{DecorativeElement, Event, Greeting, Headless, Stage, Update};
pub use config::GreetingConfig;
pub use error::PageError;
pub use page::{
    greeting_armed_timers, greeting_stage, set_greeting_message, start_greeting, stop_greeting,
};

#[cfg(feature = "serde_json")]
pub use page::start_greeting_with_config;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(logging::default_level());
}
