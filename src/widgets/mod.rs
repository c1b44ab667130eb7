//! This module contains user interface components which are reused between
//! the form page and the prediction fragment.

pub mod alert;
pub mod team_card;
