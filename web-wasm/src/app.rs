//! メインアプリケーションコンポーネント

use crate::api::gemini::WasmGeminiClient;
use crate::components::{
    header::Header,
    loading_skeleton::LoadingSkeleton,
    notice::{Notice, NoticeToast},
    prediction_result::PredictionResult,
    settings_panel::SettingsPanel,
    upload_area::UploadArea,
};
use gloo::file::futures::read_as_data_url;
use gloo::timers::callback::Timeout;
use leaf_ai_common::pipeline::{FILE_READ_ERROR_MESSAGE, KEY_FIELD_CREDENTIAL_ERROR_MESSAGE};
use leaf_ai_common::report::DISCLAIMER;
use leaf_ai_common::upload::{INVALID_FILE_TYPE_MESSAGE, INVALID_FILE_TYPE_TITLE};
use leaf_ai_common::{DiagnosisOutcome, ImageDataUri, LeafDiagnoser, PredictionView};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

/// 通知の表示時間
const NOTICE_DURATION_MS: u32 = 4_000;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (api_key, set_api_key) = signal(String::new());
    let (preview, set_preview) = signal(None::<String>);
    let (result, set_result) = signal(None::<PredictionView>);
    let (is_loading, set_is_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<Notice>);
    // リセット後に届いた古い診断結果を捨てるための世代番号
    let (generation, set_generation) = signal(0u32);

    let on_file = move |file: File| {
        set_is_loading.set(true);
        set_error.set(None);
        set_result.set(None);
        let current = generation.get_untracked();
        let key = api_key.get_untracked();

        spawn_local(async move {
            let is_current = move || generation.get_untracked() == current;

            let data_url = match read_as_data_url(&gloo::file::File::from(file)).await {
                Ok(url) => url,
                Err(e) => {
                    log::error!("failed to read image: {}", e);
                    if is_current() {
                        set_error.set(Some(FILE_READ_ERROR_MESSAGE.to_string()));
                        set_is_loading.set(false);
                    }
                    return;
                }
            };
            if !is_current() {
                return;
            }
            set_preview.set(Some(data_url.clone()));

            let outcome = match ImageDataUri::parse(data_url) {
                Ok(photo) => {
                    LeafDiagnoser::new(WasmGeminiClient::new(&key))
                        .with_credential_message(KEY_FIELD_CREDENTIAL_ERROR_MESSAGE)
                        .diagnose(&photo)
                        .await
                }
                Err(e) => {
                    log::error!("unreadable data URI: {}", e);
                    DiagnosisOutcome::Failure {
                        error: FILE_READ_ERROR_MESSAGE.to_string(),
                    }
                }
            };

            if !is_current() {
                return;
            }
            match outcome {
                DiagnosisOutcome::Success { prediction, diagnosis } => {
                    set_result.set(Some(PredictionView::new(&prediction, &diagnosis)));
                }
                DiagnosisOutcome::Failure { error } => set_error.set(Some(error)),
            }
            set_is_loading.set(false);
        });
    };

    let on_invalid = move |_: ()| {
        set_notice.set(Some(Notice {
            title: INVALID_FILE_TYPE_TITLE.to_string(),
            message: INVALID_FILE_TYPE_MESSAGE.to_string(),
        }));
        Timeout::new(NOTICE_DURATION_MS, move || set_notice.set(None)).forget();
    };

    let on_reset = move |_| {
        set_generation.update(|g| *g += 1);
        set_preview.set(None);
        set_result.set(None);
        set_is_loading.set(false);
        set_error.set(None);
    };

    view! {
        <div class="page">
            <Header />

            <main class="main">
                <SettingsPanel api_key=api_key set_api_key=set_api_key />

                <Show
                    when=move || preview.get().is_none()
                    fallback=move || view! {
                        <div class="preview">
                            <img src=move || preview.get().unwrap_or_default() alt="Uploaded leaf" />
                            <button class="btn reset" title="Remove image" on:click=on_reset>
                                "✕"
                                <span class="hidden">"Remove image"</span>
                            </button>
                        </div>
                    }
                >
                    <div class="intro">
                        <h2>"Identify Plant Leaf Diseases Instantly"</h2>
                        <p class="text-muted">
                            "Upload an image of a plant leaf, and our AI will analyze it for diseases."
                        </p>
                        <UploadArea disabled=is_loading on_file=on_file on_invalid=on_invalid />
                    </div>
                </Show>

                <Show when=move || is_loading.get()>
                    <LoadingSkeleton />
                </Show>

                {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

                {move || {
                    if is_loading.get() {
                        None
                    } else {
                        result.get().map(|prediction| view! { <PredictionResult result=prediction /> })
                    }
                }}
            </main>

            <footer class="footer">
                <p>{DISCLAIMER}</p>
            </footer>

            <NoticeToast notice=notice />
        </div>
    }
}
