//! Blood report form and report view for WebAssembly.

pub mod display;
pub mod form;

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::display::{format_generated_at, format_test_date};
    use crate::form::FormState;
    use crate::styles;
    use bloodreport_core::{
        rule_for, AnalysisConfig, AnalysisResult, BloodReport, Parameter, PatientInfo, Status,
    };
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, HtmlInputElement, HtmlSelectElement, Window};
    use yew::events::{Event, InputEvent, SubmitEvent};
    use yew::prelude::*;
    use yew::TargetCast;

    /// Scheduled analysis. Dropping it cancels the timeout.
    struct PendingAnalysis {
        handle: i32,
        _callback: Closure<dyn FnMut()>,
    }

    impl Drop for PendingAnalysis {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(self.handle);
            }
        }
    }

    fn schedule(delay_ms: u32, task: impl FnOnce() + 'static) -> Result<PendingAnalysis, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let callback = Closure::once(task);
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        )?;
        Ok(PendingAnalysis {
            handle,
            _callback: callback,
        })
    }

    #[derive(Properties, PartialEq)]
    pub struct ReportAppProps {
        pub config: AnalysisConfig,
    }

    #[function_component(ReportApp)]
    fn report_app(props: &ReportAppProps) -> Html {
        let form = use_state(FormState::default);
        let analyzing = use_state(|| false);
        let report = use_state(|| None::<BloodReport>);
        let error = use_state(|| None::<String>);
        let pending = use_mut_ref(|| None::<PendingAnalysis>);

        {
            let pending = pending.clone();
            use_effect_with((), move |_| {
                if let Some(window) = web_sys::window() {
                    if let Some(document) = window.document() {
                        if let Err(err) = styles::ensure_styles(&document) {
                            console::error_1(&err);
                        }
                    }
                }
                move || {
                    pending.borrow_mut().take();
                }
            });
        }

        let on_submit = {
            let form = form.clone();
            let analyzing = analyzing.clone();
            let report = report.clone();
            let error = error.clone();
            let pending = pending.clone();
            let config = props.config.clone();
            Callback::from(move |event: SubmitEvent| {
                event.prevent_default();
                if *analyzing {
                    return;
                }
                analyzing.set(true);
                error.set(None);

                let submission = form.to_submission();
                let task = {
                    let analyzing = analyzing.clone();
                    let report = report.clone();
                    let error = error.clone();
                    let config = config.clone();
                    move || {
                        match bloodreport_intake::analyze_submission_value(&submission, &config) {
                            Ok(done) => report.set(Some(done)),
                            Err(err) => error.set(Some(err.to_string())),
                        }
                        analyzing.set(false);
                    }
                };

                match schedule(config.processing_delay_ms, task) {
                    Ok(scheduled) => *pending.borrow_mut() = Some(scheduled),
                    Err(err) => {
                        console::error_1(&err);
                        analyzing.set(false);
                    }
                }
            })
        };

        let on_new_report = {
            let form = form.clone();
            let analyzing = analyzing.clone();
            let report = report.clone();
            let error = error.clone();
            let pending = pending.clone();
            Callback::from(move |_| {
                pending.borrow_mut().take();
                analyzing.set(false);
                report.set(None);
                error.set(None);
                form.set(FormState::default());
            })
        };

        html! {
            <div class="report-root">
                <header class="report-hero">
                    <h1>{"AI Blood Report Generator"}</h1>
                    <p>{"Advanced artificial intelligence analysis for comprehensive blood test interpretation"}</p>
                </header>
                {
                    match (*report).as_ref() {
                        None => render_form_page(form.clone(), *analyzing, (*error).clone(), on_submit),
                        Some(done) => render_report_page(done, on_new_report),
                    }
                }
            </div>
        }
    }

    fn render_form_page(
        form: UseStateHandle<FormState>,
        analyzing: bool,
        error: Option<String>,
        on_submit: Callback<SubmitEvent>,
    ) -> Html {
        let state = (*form).clone();

        let on_text = |apply: fn(&mut FormState, String)| {
            let form = form.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                let mut next = (*form).clone();
                apply(&mut next, input.value());
                form.set(next);
            })
        };

        let on_gender = {
            let form = form.clone();
            Callback::from(move |event: Event| {
                let select: HtmlSelectElement = event.target_unchecked_into();
                let mut next = (*form).clone();
                next.gender = select.value();
                form.set(next);
            })
        };

        html! {
            <section class="report-card">
                <header class="report-card-header accent">
                    <h2>{"Blood Test Parameters"}</h2>
                    <p>{"Enter the blood test values to generate an AI-powered analysis report"}</p>
                </header>
                <form class="report-form" onsubmit={on_submit}>
                    <div class="form-grid">
                        <label class="form-field">
                            <span>{"Patient Name"}</span>
                            <input type="text" value={state.name.clone()}
                                oninput={on_text(|f, v| f.name = v)} required=true />
                        </label>
                        <label class="form-field">
                            <span>{"Age"}</span>
                            <input type="number" min="0" value={state.age.clone()}
                                oninput={on_text(|f, v| f.age = v)} required=true />
                        </label>
                        <label class="form-field">
                            <span>{"Gender"}</span>
                            <select onchange={on_gender} required=true>
                                <option value="" selected={state.gender.is_empty()}>{"Select gender"}</option>
                                <option value="male" selected={state.gender == "male"}>{"Male"}</option>
                                <option value="female" selected={state.gender == "female"}>{"Female"}</option>
                                <option value="other" selected={state.gender == "other"}>{"Other"}</option>
                            </select>
                        </label>
                        <label class="form-field">
                            <span>{"Test Date"}</span>
                            <input type="date" value={state.test_date.clone()}
                                oninput={on_text(|f, v| f.test_date = v)} required=true />
                        </label>
                        { for Parameter::ALL.into_iter().map(|parameter| render_measurement_input(form.clone(), parameter)) }
                    </div>
                    { error.map(|text| html! { <p class="form-error" role="alert">{ text }</p> }).unwrap_or_default() }
                    <button type="submit" class="primary-button" disabled={analyzing}>
                        { if analyzing { "Analyzing..." } else { "Generate AI Report" } }
                    </button>
                </form>
            </section>
        }
    }

    fn render_measurement_input(form: UseStateHandle<FormState>, parameter: Parameter) -> Html {
        let rule = rule_for(parameter);
        let value = form.measurement(parameter).to_string();
        let oninput = {
            let form = form.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                form.set(form.with_measurement(parameter, input.value()));
            })
        };

        html! {
            <label class="form-field">
                <span class="form-label">
                    { parameter.label() }
                    <span class="range-hint">{ format!("Normal: {} {}", rule.normal_range, rule.unit) }</span>
                </span>
                <div class="unit-input">
                    <input
                        type="number"
                        step="0.1"
                        value={value}
                        oninput={oninput}
                        placeholder={format!("Enter {}", parameter.label().to_lowercase())}
                        required=true
                    />
                    <span class="unit-suffix">{ rule.unit }</span>
                </div>
            </label>
        }
    }

    fn render_report_page(report: &BloodReport, on_new_report: Callback<MouseEvent>) -> Html {
        html! {
            <div class="report-page">
                <div class="report-page-header">
                    <div>
                        <h2>{"Your Blood Test Analysis"}</h2>
                        <p>{"AI-generated comprehensive report and recommendations"}</p>
                    </div>
                    <button type="button" class="outline-button" onclick={on_new_report}>{"New Report"}</button>
                </div>
                { render_patient(&report.patient) }
                <section class="report-card">
                    <header class="report-card-header">
                        <h2>{"AI Analysis Report"}</h2>
                        <p>{ format_generated_at(report.generated_at) }</p>
                    </header>
                    <ul class="result-list">
                        { for report.results.iter().map(render_result) }
                    </ul>
                </section>
                {
                    if report.needs_attention() {
                        html! {
                            <div class="report-alert warning" role="alert">
                                <strong>{"Attention Required: "}</strong>
                                { format!(
                                    "{} parameter(s) outside normal range. Please consult with a healthcare professional for proper interpretation and guidance.",
                                    report.abnormal_count
                                ) }
                            </div>
                        }
                    } else {
                        Html::default()
                    }
                }
                <section class="report-card">
                    <header class="report-card-header">
                        <h2>{"AI Recommendations"}</h2>
                    </header>
                    <ul class="recommendation-list">
                        { for report.recommendations.iter().map(|text| html! { <li>{ text.clone() }</li> }) }
                    </ul>
                    <div class="report-alert info">
                        <strong>{"Disclaimer: "}</strong>{ report.disclaimer.clone() }
                    </div>
                </section>
            </div>
        }
    }

    fn render_patient(patient: &PatientInfo) -> Html {
        html! {
            <section class="report-card">
                <header class="report-card-header accent">
                    <h2>{"Patient Information"}</h2>
                </header>
                <dl class="patient-grid">
                    <div><dt>{"Patient Name"}</dt><dd>{ patient.name.clone() }</dd></div>
                    <div><dt>{"Age"}</dt><dd>{ format!("{} years", patient.age) }</dd></div>
                    <div><dt>{"Gender"}</dt><dd>{ patient.gender.label() }</dd></div>
                    <div><dt>{"Test Date"}</dt><dd>{ format_test_date(patient.test_date) }</dd></div>
                </dl>
            </section>
        }
    }

    fn render_result(result: &AnalysisResult) -> Html {
        html! {
            <li class="result-row">
                <div class="result-main">
                    <div class="result-heading">
                        <span class="result-name">{ result.label.clone() }</span>
                        <span class="status-badge" data-status={status_level(result.status)}>
                            { status_level(result.status).to_uppercase() }
                        </span>
                    </div>
                    <p class="result-interpretation">{ result.interpretation.clone() }</p>
                </div>
                <div class="result-value">
                    <span class="result-number">{ format!("{} {}", result.value, result.unit) }</span>
                    <span class="result-range">{ format!("Normal: {}", result.normal_range) }</span>
                </div>
            </li>
        }
    }

    fn status_level(status: Status) -> &'static str {
        match status {
            Status::Low => "low",
            Status::Normal => "normal",
            Status::High => "high",
        }
    }

    #[wasm_bindgen]
    pub fn mount_report_app(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Document is not accessible"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches selector"))?;

        let config: AnalysisConfig = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => from_value(value)?,
            _ => AnalysisConfig::default(),
        };

        yew::Renderer::<ReportApp>::with_root_and_props(target, ReportAppProps { config })
            .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_report_app;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_report_app(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "bloodreport-ui only supports the wasm32 target",
    ))
}
