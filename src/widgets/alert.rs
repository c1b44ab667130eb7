use hypertext::prelude::*;

pub struct ErrorAlert<S> {
    pub msg: S,
}

impl<S: ToString> Renderable for ErrorAlert<S> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud!({
            div class="alert alert-danger" role="alert" {
                (self.msg.to_string())
            }
        })
        .render_to(buffer);
    }
}

#[derive(Clone, Copy)]
pub enum AlertKind {
    Success,
    Info,
}

/// A highlighted result line, e.g. the predicted winner.
pub struct ResultAlert<S> {
    pub kind: AlertKind,
    pub label: &'static str,
    pub value: S,
}

impl<S: ToString> Renderable for ResultAlert<S> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        let class = match self.kind {
            AlertKind::Success => "alert alert-success",
            AlertKind::Info => "alert alert-info",
        };
        maud! {
            div class=(class) role="alert" {
                strong { (self.label) ": " }
                (self.value.to_string())
            }
        }
        .render_to(buffer);
    }
}
