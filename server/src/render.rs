use crate::form::INPUTS;

pub const TITLE: &str = "🏠 House Price Prediction App";
pub const SUBTITLE: &str = "Enter property details to estimate the sale price.";

/// A message shown under the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice<'a> {
    /// The formatted estimate.
    Estimate(&'a str),
    Error(&'a str),
}

/// Renders the prediction page with the inputs holding `values`, in `INPUTS` order.
pub fn page(values: &[String; 3], notice: Option<Notice<'_>>) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(TITLE)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(TITLE)));
    html.push_str(&format!("<p>{}</p>\n", escape(SUBTITLE)));
    html.push_str("<form method=\"post\" action=\"/predict\">\n");

    for (input, value) in INPUTS.iter().zip(values) {
        html.push_str(&format!(
            "<p><label for=\"{name}\">{label}</label><br>\
             <input type=\"number\" id=\"{name}\" name=\"{name}\" \
             min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{value}\" required></p>\n",
            name = escape(input.name),
            label = escape(input.label),
            min = input.min,
            max = input.max,
            value = escape(value),
        ));
    }

    html.push_str("<button type=\"submit\">Predict Price</button>\n</form>\n");

    match notice {
        Some(Notice::Estimate(price)) => html.push_str(&format!(
            "<div class=\"success\">Estimated Sale Price: {}</div>\n",
            escape(price)
        )),
        Some(Notice::Error(msg)) => {
            html.push_str(&format!("<div class=\"error\">{}</div>\n", escape(msg)))
        }
        None => {}
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escapes the characters HTML gives meaning to.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
