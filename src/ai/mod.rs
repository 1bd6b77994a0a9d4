pub mod advisory;
pub mod gemini_service;
