//! Helpers shared by the console services.
//!
//! - [`url_input`] - URL checks for the create form and short-link formatting

pub mod url_input;
