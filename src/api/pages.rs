//! HTML pages. Self-contained, no external resources.
//!
//! Every value that came from a client or from OCR goes through
//! `html_escape` before it is interpolated.

use crate::config::APP_NAME;
use crate::models::{Biomarker, PatientMetadata};
use crate::pipeline::ReportOutcome;

const STYLE: &str = r#"<style>
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         background: #f5f7fa; color: #1a1a2e; min-height: 100vh; padding: 24px 16px; }
  .container { max-width: 760px; margin: 0 auto; }
  h1 { font-size: 1.6rem; margin-bottom: 4px; }
  h2 { font-size: 1.15rem; margin: 24px 0 12px; }
  .subtitle { color: #666; margin-bottom: 24px; }
  .card { background: #fff; border-radius: 12px; padding: 20px; margin-bottom: 16px;
          box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
  label { display: block; font-weight: 600; margin: 12px 0 4px; font-size: 0.9rem; }
  input, select { width: 100%; padding: 10px; border: 1px solid #ccd; border-radius: 8px; font-size: 1rem; }
  button, .button { display: inline-block; margin-top: 20px; padding: 12px 20px; border: none;
                    border-radius: 8px; background: #c0392b; color: #fff; font-size: 1rem;
                    text-decoration: none; cursor: pointer; }
  button:disabled { background: #aaa; }
  .error { color: #c0392b; margin-top: 12px; }
  pre { white-space: pre-wrap; font-size: 0.85rem; background: #fafafa; padding: 12px; border-radius: 8px; }
  dl { display: grid; grid-template-columns: max-content 1fr; gap: 6px 16px; }
  dt { font-weight: 600; }
  .biomarker { border-left: 6px solid #999; }
  .biomarker.normal { border-left-color: #27ae60; }
  .biomarker.moderate { border-left-color: #f39c12; }
  .biomarker.critical { border-left-color: #c0392b; }
  .status { font-size: 0.8rem; text-transform: uppercase; font-weight: 700; }
  .muted { color: #888; font-size: 0.8rem; }
</style>"#;

const INDEX_BODY: &str = r#"<div class="container">
  <h1>BloodSense</h1>
  <p class="subtitle">Upload a photo or scan of your blood test report.</p>
  <div class="card">
    <form id="upload-form">
      <label for="file">Report image (PNG, JPG, JPEG)</label>
      <input type="file" id="file" name="file" accept=".png,.jpg,.jpeg,image/png,image/jpeg" required>
      <button type="submit" id="submit">Upload</button>
      <p class="error" id="error"></p>
    </form>
  </div>
</div>
<script>
  document.getElementById('upload-form').addEventListener('submit', async (e) => {
    e.preventDefault();
    const button = document.getElementById('submit');
    const error = document.getElementById('error');
    error.textContent = '';
    button.disabled = true;
    try {
      const data = new FormData();
      data.append('file', document.getElementById('file').files[0]);
      const res = await fetch('/upload', { method: 'POST', body: data });
      const body = await res.json();
      if (!res.ok) throw new Error(body.error || 'Upload failed');
      window.location.href = '/form?file_path=' + encodeURIComponent(body.file_path);
    } catch (err) {
      error.textContent = err.message;
      button.disabled = false;
    }
  });
</script>"#;

pub fn index_page() -> String {
    layout(APP_NAME, INDEX_BODY)
}

/// Metadata form bound to one stored upload.
pub fn form_page(file_path: &str) -> String {
    let text_input = |name: &str, label: &str, kind: &str| {
        format!(
            r#"<label for="{name}">{label}</label><input type="{kind}" id="{name}" name="{name}" required>"#
        )
    };
    let select = |name: &str, label: &str, options: &[&str]| {
        let opts: String = options
            .iter()
            .map(|o| format!(r#"<option value="{o}">{o}</option>"#))
            .collect();
        format!(r#"<label for="{name}">{label}</label><select id="{name}" name="{name}" required>{opts}</select>"#)
    };

    let fields = [
        text_input("name", "Full name", "text"),
        text_input("age", "Age", "number"),
        select("gender", "Gender", &["Male", "Female", "Other"]),
        text_input("height", "Height (cm)", "number"),
        text_input("weight", "Weight (kg)", "number"),
        select("diet", "Diet", &["Vegetarian", "Non-Vegetarian", "Vegan", "Eggetarian"]),
        select("activity", "Activity level", &["Sedentary", "Light", "Moderate", "Active", "Very Active"]),
        select("smoke", "Do you smoke?", &["No", "Occasionally", "Yes"]),
        select("drink", "Do you drink alcohol?", &["No", "Occasionally", "Yes"]),
    ]
    .join("\n      ");

    let body = format!(
        r#"<div class="container">
  <h1>Tell us about yourself</h1>
  <p class="subtitle">These details are printed on your report.</p>
  <div class="card">
    <form method="post" action="/result">
      <input type="hidden" name="file_path" value="{file_path}">
      {fields}
      <button type="submit">Generate report</button>
    </form>
  </div>
</div>"#,
        file_path = html_escape(file_path),
    );
    layout(&format!("{APP_NAME} - Details"), &body)
}

/// Result page: patient details, extracted text, analysis, biomarker
/// cards and the download link.
pub fn result_page(outcome: &ReportOutcome) -> String {
    let download_href = format!(
        "/download_report?path={}",
        urlencoding::encode(&outcome.report_path.to_string_lossy())
    );
    let cards: String = outcome.biomarkers.iter().map(biomarker_card).collect();

    let body = format!(
        r#"<div class="container">
  <h1>Your BloodSense report</h1>
  <p class="muted">Generated {generated}</p>
  <div class="card">
    <h2>Patient information</h2>
    {patient}
  </div>
  <div class="card">
    <h2>Health analysis</h2>
    <p>{analysis}</p>
  </div>
  <h2>Biomarkers</h2>
  {cards}
  <div class="card">
    <h2>Extracted report text</h2>
    <pre>{report_text}</pre>
  </div>
  <a class="button" href="{download_href}">Download PDF report</a>
</div>"#,
        generated = outcome.generated_at.format("%Y-%m-%d %H:%M UTC"),
        patient = patient_list(&outcome.patient),
        analysis = html_escape(&outcome.analysis),
        report_text = html_escape(&outcome.report_text),
        download_href = html_escape(&download_href),
    );
    layout(&format!("{APP_NAME} - Report"), &body)
}

fn patient_list(patient: &PatientMetadata) -> String {
    let rows: String = patient
        .report_lines()
        .into_iter()
        .map(|(label, value)| format!("<dt>{label}</dt><dd>{}</dd>", html_escape(value)))
        .collect();
    format!("<dl>{rows}</dl>")
}

fn biomarker_card(marker: &Biomarker) -> String {
    let mut advice = String::new();
    if let Some(nutrition) = &marker.nutrition_recommendation {
        advice.push_str(&format!("<p><strong>Nutrition:</strong> {}</p>", html_escape(nutrition)));
    }
    if let Some(fitness) = &marker.fitness_recommendation {
        advice.push_str(&format!("<p><strong>Fitness:</strong> {}</p>", html_escape(fitness)));
    }

    format!(
        r#"<div class="card biomarker {status}">
    <span class="status">{status}</span>
    <h3>{name}</h3>
    <p>{value} <span class="muted">(reference {range})</span></p>
    {advice}
  </div>"#,
        status = marker.status,
        name = html_escape(&marker.name),
        value = html_escape(&marker.display_value()),
        range = html_escape(&marker.reference_range),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{STYLE}
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BiomarkerStatus;
    use std::path::PathBuf;

    fn outcome() -> ReportOutcome {
        ReportOutcome {
            patient: PatientMetadata {
                name: "<script>alert(1)</script>".into(),
                age: "40".into(),
                gender: "Female".into(),
                height: "165".into(),
                weight: "60".into(),
                diet: "Vegan".into(),
                activity: "Active".into(),
                smoke: "No".into(),
                drink: "No".into(),
            },
            report_text: "Hemoglobin 13.5 g/dL".into(),
            analysis: "Basic report generated without GPT.".into(),
            report_path: PathBuf::from("temp/report_A B.pdf"),
            biomarkers: vec![Biomarker::new(
                "LDL Cholesterol",
                165.0,
                "mg/dL",
                "< 130 mg/dL",
                BiomarkerStatus::Critical,
            )
            .with_recommendations("Eat oats.", "Walk daily.")],
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            html_escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn index_posts_to_upload_and_navigates_to_form() {
        let page = index_page();
        assert!(page.contains("fetch('/upload'"));
        assert!(page.contains("/form?file_path="));
    }

    #[test]
    fn form_page_carries_escaped_file_path_and_all_fields() {
        let page = form_page(r#"uploads/a".png"#);
        assert!(page.contains(r#"value="uploads/a&quot;.png""#));
        for field in crate::models::REQUIRED_FIELDS {
            assert!(page.contains(&format!(r#"name="{field}""#)), "missing {field}");
        }
    }

    #[test]
    fn result_page_escapes_patient_data() {
        let page = result_page(&outcome());
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn result_page_links_encoded_report_path() {
        let page = result_page(&outcome());
        assert!(page.contains("/download_report?path=temp%2Freport_A%20B.pdf"));
    }

    #[test]
    fn result_page_renders_biomarker_cards() {
        let page = result_page(&outcome());
        assert!(page.contains("biomarker critical"));
        assert!(page.contains("LDL Cholesterol"));
        assert!(page.contains("Eat oats."));
        assert!(page.contains("Hemoglobin 13.5 g/dL"));
    }
}
