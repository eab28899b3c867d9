//! 診断結果の表示とPDFダウンロード

use crate::export::pdf_wasm::download_report;
use leaf_ai_common::report::{
    ANALYSIS_DESCRIPTION, ANALYSIS_HEADING, PREDICTION_HEADING, REPORT_DESCRIPTION, REPORT_HEADING,
};
use leaf_ai_common::PredictionView;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 画像化の対象になる要素ID
const REPORT_ELEMENT_ID: &str = "report-content";

#[component]
pub fn PredictionResult(result: PredictionView) -> impl IntoView {
    let (is_exporting, set_is_exporting) = signal(false);
    let (export_error, set_export_error) = signal(None::<String>);

    let file_name = result.file_name.clone();
    let on_download = move |_| {
        let file_name = file_name.clone();
        set_is_exporting.set(true);
        set_export_error.set(None);
        spawn_local(async move {
            if let Err(e) = download_report(REPORT_ELEMENT_ID, &file_name).await {
                log::error!("PDF export failed: {}", e);
                set_export_error.set(Some(e));
            }
            set_is_exporting.set(false);
        });
    };

    let percent = result.confidence_percent;
    let confidence_text = result.confidence_text();
    let report_card = result.report.clone().map(|report| {
        view! {
            <details class="card" open=true>
                <summary>
                    <h3>"📄 " {REPORT_HEADING}</h3>
                    <p class="card-description">{REPORT_DESCRIPTION}</p>
                </summary>
                <div class="report-body">{report}</div>
            </details>
        }
    });

    view! {
        <div class="prediction-result">
            <div id=REPORT_ELEMENT_ID>
                <div class="card">
                    <h2>
                        {result.healthy.then_some("✨ ")}
                        {result.title.clone()}
                    </h2>
                    <p class="card-description">{PREDICTION_HEADING}</p>
                    <div class="confidence">
                        <span class="text-muted">"Confidence"</span>
                        <strong>{confidence_text.clone()}</strong>
                    </div>
                    <div
                        class="confidence-bar"
                        role="progressbar"
                        aria-label=format!("{} confidence", confidence_text)
                    >
                        <div class="confidence-fill" style=format!("width: {}%", percent) />
                    </div>
                </div>

                <div class="card">
                    <h3>"🧠 " {ANALYSIS_HEADING}</h3>
                    <p class="card-description">{ANALYSIS_DESCRIPTION}</p>
                    <p>{result.reasoning.clone()}</p>
                </div>

                {report_card}
            </div>

            <button
                class="btn"
                disabled=move || is_exporting.get()
                on:click=on_download
            >
                {move || if is_exporting.get() { "Preparing PDF..." } else { "⬇ Download Report as PDF" }}
            </button>
            {move || export_error.get().map(|e| view! { <p class="error-banner">{e}</p> })}
        </div>
    }
}
