use super::format::{escape_html, format_currency, format_range};
use crate::{
    prediction::{
        BATHROOM_CHOICES, BEDROOM_CHOICES, Location, PredictionForm, SQFT_RANGE, SQFT_STEP,
        YEAR_BUILT_RANGE,
    },
    session::{DisplayedPrediction, Session},
};
use std::fmt::Write;

// Presentation constants. None of these are computed from the response.
pub const CONFIDENCE_LABEL: &str = "92%";
pub const MODEL_LABEL: &str = "XGBoost";
pub const PREDICTION_TIME_LABEL: &str = "0.12 sec";
pub const TOP_FACTORS: [&str; 3] = ["Square Footage", "Location", "Bathrooms"];

pub const PLACEHOLDER: &str =
    "Fill out the form and click <strong>Predict Price</strong> to view results.";

const STYLE: &str = r#"
body { margin: 0; background-color: #f8fafc; font-family: "Inter", -apple-system, BlinkMacSystemFont, sans-serif; color: #0f172a; }
main { max-width: 1200px; margin: 0 auto; padding: 32px; }
h1 { font-weight: 800; }
.lead { font-size: 16px; color: #64748b; max-width: 720px; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 32px; }
.card { background: #ffffff; border-radius: 14px; padding: 26px; box-shadow: 0 8px 28px rgba(15, 23, 42, 0.06); border: 1px solid #e5e7eb; }
.row { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-top: 16px; }
label { display: block; font-weight: 700; margin: 14px 0 6px; }
input[type=range], select { width: 100%; }
button { width: 100%; margin-top: 22px; background: linear-gradient(135deg, #2563eb, #1d4ed8); color: white; border-radius: 12px; height: 48px; font-size: 16px; font-weight: 600; border: none; cursor: pointer; }
button:hover { background: linear-gradient(135deg, #1d4ed8, #1e40af); }
button:disabled { opacity: 0.6; cursor: wait; }
.error { color: #b91c1c; margin-top: 12px; }
.prediction-value { font-size: 46px; font-weight: 900; color: #2563eb; text-align: center; margin: 24px 0; }
.info-card { background: #f9fafb; border-radius: 12px; padding: 16px; border: 1px solid #e5e7eb; text-align: center; }
.info-label { font-size: 13px; color: #64748b; margin-bottom: 6px; }
.info-value { font-size: 18px; font-weight: 600; }
.top-factors { background: #f1f5f9; padding: 16px; border-radius: 12px; margin-top: 22px; border-left: 4px solid #2563eb; }
.placeholder { height: 300px; display: flex; align-items: center; justify-content: center; color: #64748b; }
footer { text-align: center; color: #64748b; margin-top: 20px; }
"#;

// Disables the button while the POST is in flight.
const BUSY_SCRIPT: &str = r#"
document.getElementById("predict-form").addEventListener("submit", function () {
  var button = document.getElementById("predict-button");
  button.disabled = true;
  button.textContent = "Calculating prediction...";
});
"#;

/// Renders the whole page for `session`. `error` is shown under the form when input was rejected.
pub fn render_page(session: &Session, error: Option<&str>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>House Price Predictor</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<main>\n");

    html.push_str("<h1>&#127969; House Price Prediction</h1>\n");
    html.push_str(
        "<p class=\"lead\">A production-style <strong>MLOps demonstration</strong> showcasing \
         real-time house price prediction using a deployed machine learning model and REST API.</p>\n",
    );

    html.push_str("<div class=\"columns\">\n");
    render_form(&mut html, &session.id, &session.form, error);
    render_results(&mut html, session.current.as_ref());
    html.push_str("</div>\n");

    html.push_str(
        "<hr>\n<footer>\n<p><strong>Built for MLOps Learning</strong></p>\n\
         <p>by <a href=\"https://www.ksaurav.com.np\" target=\"_blank\">Saurav Karki</a></p>\n</footer>\n",
    );

    let _ = writeln!(html, "</main>\n<script>{}</script>\n</body>\n</html>", BUSY_SCRIPT);
    html
}

fn render_form(html: &mut String, session_id: &str, form: &PredictionForm, error: Option<&str>) {
    html.push_str("<section class=\"card\">\n");
    html.push_str("<form id=\"predict-form\" method=\"post\" action=\"/\">\n");
    let _ = writeln!(
        html,
        "<input type=\"hidden\" name=\"session_id\" value=\"{}\">",
        escape_html(session_id)
    );

    let (min_sqft, max_sqft) = SQFT_RANGE;
    let _ = writeln!(
        html,
        "<label for=\"sqft\">Square Footage</label>\n\
         <input type=\"range\" id=\"sqft\" name=\"sqft\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" \
         oninput=\"this.nextElementSibling.value = this.value\">\
         <output>{}</output>",
        min_sqft, max_sqft, SQFT_STEP, form.sqft, form.sqft
    );

    html.push_str("<div class=\"row\">\n<div>\n<label for=\"bedrooms\">Bedrooms</label>\n");
    html.push_str("<select id=\"bedrooms\" name=\"bedrooms\">\n");
    for choice in BEDROOM_CHOICES {
        push_option(html, &choice.to_string(), &choice.to_string(), choice == form.bedrooms);
    }
    html.push_str("</select>\n</div>\n<div>\n<label for=\"bathrooms\">Bathrooms</label>\n");
    html.push_str("<select id=\"bathrooms\" name=\"bathrooms\">\n");
    for choice in BATHROOM_CHOICES {
        push_option(html, &choice.to_string(), &choice.to_string(), choice == form.bathrooms);
    }
    html.push_str("</select>\n</div>\n</div>\n");

    html.push_str("<label for=\"location\">Location</label>\n");
    html.push_str("<select id=\"location\" name=\"location\">\n");
    for location in Location::ALL {
        push_option(html, location.label(), location.label(), location == form.location);
    }
    html.push_str("</select>\n");

    let (min_year, max_year) = YEAR_BUILT_RANGE;
    let _ = writeln!(
        html,
        "<label for=\"year_built\">Year Built</label>\n\
         <input type=\"range\" id=\"year_built\" name=\"year_built\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\" \
         oninput=\"this.nextElementSibling.value = this.value\">\
         <output>{}</output>",
        min_year, max_year, form.year_built, form.year_built
    );

    html.push_str("<button id=\"predict-button\" type=\"submit\">Predict Price</button>\n");

    if let Some(error) = error {
        let _ = writeln!(html, "<p class=\"error\">{}</p>", escape_html(error));
    }

    html.push_str("</form>\n</section>\n");
}

fn push_option(html: &mut String, value: &str, label: &str, selected: bool) {
    let _ = writeln!(
        html,
        "<option value=\"{}\"{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    );
}

fn render_results(html: &mut String, current: Option<&DisplayedPrediction>) {
    html.push_str("<section class=\"card\">\n<h2>Prediction Results</h2>\n");

    match current {
        None => {
            let _ = writeln!(html, "<div class=\"placeholder\">{}</div>", PLACEHOLDER);
        }
        Some(displayed) => {
            let result = displayed.outcome.result();

            let _ = writeln!(
                html,
                "<div class=\"prediction-value\">{}</div>",
                format_currency(result.predicted_price)
            );

            html.push_str("<div class=\"row\">\n");
            push_info_card(html, "Confidence Score", CONFIDENCE_LABEL);
            push_info_card(html, "Model Used", MODEL_LABEL);
            html.push_str("</div>\n<div class=\"row\">\n");
            push_info_card(html, "Price Range", &format_range(result.confidence_interval));
            push_info_card(html, "Prediction Time", PREDICTION_TIME_LABEL);
            html.push_str("</div>\n");

            html.push_str("<div class=\"top-factors\">\n<strong>Top Factors Affecting Price</strong>\n<ul>\n");
            for factor in TOP_FACTORS {
                let _ = writeln!(html, "<li>{}</li>", factor);
            }
            html.push_str("</ul>\n</div>\n");
        }
    }

    html.push_str("</section>\n");
}

fn push_info_card(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<div class=\"info-card\"><p class=\"info-label\">{}</p><p class=\"info-value\">{}</p></div>",
        label,
        escape_html(value)
    );
}
