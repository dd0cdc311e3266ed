pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod path_resolver;
pub mod validation;
