//! Text generation backends implementing the `TextGenerator` port.

mod http;
mod scripted;

pub use http::HttpTextGenerator;
pub use scripted::ScriptedTextGenerator;
