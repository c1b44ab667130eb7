//! A web form that predicts the winner of an IPL match from a pre-trained
//! tree-ensemble model.

pub mod artifacts;
pub mod config;
pub mod features;
pub mod model;
pub mod predict;
pub mod predictions;
pub mod state;
pub mod teams;
pub mod template;
pub mod util_resp;
pub mod validation;
pub mod widgets;

#[cfg(test)]
mod test;
