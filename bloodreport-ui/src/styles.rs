#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-bloodreport-ui]";

/// Default CSS for the report app along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --report-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --report-bg: #fdf2f2;
  --report-card-bg: #ffffff;
  --report-card-border: rgba(148, 163, 184, 0.28);
  --report-radius: 14px;
  --report-text: #1f2933;
  --report-muted: #52606d;
  --report-primary: #b42318;
  --report-primary-gradient: linear-gradient(135deg, #b42318 0%, #e0475a 100%);
  --report-status-normal: #067647;
  --report-status-low: #dc6803;
  --report-status-high: #b42318;
  --report-info: #0b5394;
  --report-info-bg: rgba(11, 83, 148, 0.08);
  --report-warning-bg: rgba(220, 104, 3, 0.1);
}

.report-root {
  font-family: var(--report-font-family);
  background: var(--report-bg);
  color: var(--report-text);
  min-height: 100vh;
}

.report-hero {
  background: var(--report-primary-gradient);
  color: #ffffff;
  text-align: center;
  padding: 72px 16px;
}

.report-hero h1 {
  font-size: 2.6rem;
  margin: 0 0 12px;
}

.report-hero p {
  font-size: 1.2rem;
  opacity: 0.9;
  max-width: 48rem;
  margin: 0 auto;
}

.report-card,
.report-page {
  max-width: 64rem;
  margin: 32px auto;
}

.report-card {
  background: var(--report-card-bg);
  border: 1px solid var(--report-card-border);
  border-radius: var(--report-radius);
  box-shadow: 0 12px 32px rgba(15, 23, 42, 0.08);
  overflow: hidden;
}

.report-card-header {
  padding: 20px 24px;
}

.report-card-header h2 {
  margin: 0;
  font-size: 1.35rem;
}

.report-card-header p {
  margin: 6px 0 0;
  color: var(--report-muted);
}

.report-card-header.accent {
  background: var(--report-primary-gradient);
  color: #ffffff;
}

.report-card-header.accent p {
  color: rgba(255, 255, 255, 0.9);
}

.report-form {
  padding: 24px;
  display: flex;
  flex-direction: column;
  gap: 24px;
}

.form-grid {
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 20px;
}

.form-field {
  display: flex;
  flex-direction: column;
  gap: 8px;
  font-size: 0.9rem;
  font-weight: 600;
}

.form-label {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.range-hint {
  font-weight: 400;
  font-size: 0.75rem;
  border: 1px solid var(--report-card-border);
  border-radius: 999px;
  padding: 2px 8px;
}

.form-field input,
.form-field select {
  font: inherit;
  font-weight: 400;
  padding: 10px 12px;
  border: 1px solid var(--report-card-border);
  border-radius: 8px;
}

.unit-input {
  position: relative;
}

.unit-input input {
  width: 100%;
  box-sizing: border-box;
  padding-right: 96px;
}

.unit-suffix {
  position: absolute;
  right: 12px;
  top: 50%;
  transform: translateY(-50%);
  color: var(--report-muted);
  font-weight: 400;
}

.form-error {
  color: var(--report-status-high);
  margin: 0;
}

.primary-button {
  background: var(--report-primary-gradient);
  color: #ffffff;
  border: none;
  border-radius: 8px;
  padding: 14px;
  font-weight: 600;
  cursor: pointer;
}

.primary-button:disabled {
  opacity: 0.6;
  cursor: progress;
}

.outline-button {
  background: transparent;
  border: 1px solid var(--report-primary);
  color: var(--report-primary);
  border-radius: 8px;
  padding: 10px 18px;
  font-weight: 600;
  cursor: pointer;
}

.report-page-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.patient-grid {
  display: grid;
  grid-template-columns: repeat(4, minmax(0, 1fr));
  gap: 16px;
  padding: 24px;
  margin: 0;
}

.patient-grid dt {
  font-size: 0.85rem;
  color: var(--report-muted);
}

.patient-grid dd {
  margin: 4px 0 0;
  font-size: 1.1rem;
  font-weight: 600;
}

.result-list,
.recommendation-list {
  list-style: none;
  margin: 0;
  padding: 0 24px 24px;
  display: flex;
  flex-direction: column;
  gap: 12px;
}

.result-row {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 16px;
  border: 1px solid var(--report-card-border);
  border-radius: 10px;
}

.result-heading {
  display: flex;
  align-items: center;
  gap: 12px;
}

.result-name {
  font-weight: 600;
}

.result-interpretation {
  margin: 4px 0 0;
  font-size: 0.9rem;
  color: var(--report-muted);
}

.result-value {
  display: flex;
  flex-direction: column;
  align-items: flex-end;
}

.result-number {
  font-size: 1.1rem;
  font-weight: 600;
  font-variant-numeric: tabular-nums;
}

.result-range {
  font-size: 0.75rem;
  color: var(--report-muted);
}

.status-badge {
  font-size: 0.72rem;
  font-weight: 700;
  color: #ffffff;
  border-radius: 999px;
  padding: 2px 10px;
}

.status-badge[data-status='normal'] {
  background: var(--report-status-normal);
}

.status-badge[data-status='low'] {
  background: var(--report-status-low);
}

.status-badge[data-status='high'] {
  background: var(--report-status-high);
}

.recommendation-list li {
  position: relative;
  padding-left: 18px;
}

.recommendation-list li::before {
  content: '';
  position: absolute;
  left: 0;
  top: 0.55em;
  width: 8px;
  height: 8px;
  border-radius: 50%;
  background: var(--report-info);
}

.report-alert {
  border-radius: 10px;
  padding: 14px 18px;
  margin: 0 24px 24px;
  font-size: 0.9rem;
}

.report-alert.warning {
  margin: 24px 0;
  border: 1px solid var(--report-status-low);
  background: var(--report-warning-bg);
}

.report-alert.info {
  border: 1px solid var(--report-info);
  background: var(--report-info-bg);
}

@media (max-width: 720px) {
  .form-grid,
  .patient-grid {
    grid-template-columns: minmax(0, 1fr);
  }

  .result-row,
  .report-page-header {
    flex-direction: column;
    align-items: flex-start;
    gap: 12px;
  }

  .result-value {
    align-items: flex-start;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-bloodreport-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
