//! Templating code.
//!
//! This defines the [`Page`] item, which wraps every full page the predictor
//! serves.

use hypertext::prelude::*;

/// htmx normally refuses to swap error responses; the form relies on error
/// alerts being swapped in like any other result.
const HTMX_CONFIG: &str =
    r#"{"responseHandling": [{"code": "204", "swap": false}, {"code": "...", "swap": true}]}"#;

pub struct Page<R: Renderable> {
    body: Option<R>,
}

impl<R: Renderable> Default for Page<R> {
    fn default() -> Self {
        Page { body: None }
    }
}

impl<R: Renderable> Page<R> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn body(mut self, body: R) -> Self {
        self.body = Some(body);
        self
    }
}

impl<R: Renderable> Renderable for Page<R> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud! {
            html {
                head {
                    title { "IPL Predictor" }
                    link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet";
                    script src="https://cdn.jsdelivr.net/npm/htmx.org@2.0.7/dist/htmx.min.js" integrity="sha384-ZBXiYtYQ6hJ2Y0ZNoYuI+Nq5MqWBr+chMrS/RkXpNzQCApHEhOt2aY8EJgqwHLkJ" crossorigin="anonymous" {
                    }
                    meta name="htmx-config" content=(HTMX_CONFIG);
                    meta
                        name="viewport"
                        content="width=device-width, initial-scale=1";
                }
                body {
                    div class="container py-4" style="max-width: 720px;" {
                        h1 class="text-center" { "🏏 IPL Winning Team Predictor" }
                        hr;
                        @if let Some(body) = &self.body {
                            (body)
                        }
                    }
                }
            }
        }
        .render_to(buffer);
    }
}
