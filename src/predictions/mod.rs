//! The predictor's pages: the match form, the prediction it produces, and
//! the spreadsheet export of that prediction.
//!
//! Every request is handled on its own; nothing about a previous prediction
//! is remembered. The export form carries the selection back to the server,
//! which predicts again (the model is deterministic) and writes the result.

pub mod export;
pub mod form;
pub mod result;
