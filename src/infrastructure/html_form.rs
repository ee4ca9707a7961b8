use crate::domain::ports::RedirectNavigator;
use crate::domain::redirect::RedirectForm;
use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::sync::Mutex;

/// Renders the redirect as a self-submitting HTML form.
///
/// The form targets `_blank` so the provider page opens in a new browsing
/// context and the storefront stays loaded.
pub struct HtmlFormNavigator<W: Write + Send> {
    sink: Mutex<W>,
}

impl<W: Write + Send> HtmlFormNavigator<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

pub fn render(form: &RedirectForm) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<body onload=\"document.forms[0].submit()\">\n");
    html.push_str(&format!(
        "<form method=\"POST\" action=\"{}\" target=\"_blank\">\n",
        escape(&form.endpoint)
    ));
    for (name, value) in &form.fields {
        html.push_str(&format!(
            "  <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            escape(name),
            escape(value)
        ));
    }
    html.push_str("</form>\n</body>\n</html>\n");
    html
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl<W: Write + Send> RedirectNavigator for HtmlFormNavigator<W> {
    async fn submit(&self, form: &RedirectForm) -> Result<()> {
        let mut sink = self.sink.lock().await;
        sink.write_all(render(form).as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}
