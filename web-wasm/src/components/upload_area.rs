//! アップロードエリアコンポーネント
//!
//! 状態遷移とMIMEタイプ検証は leaf_ai_common::upload に任せ、
//! ここではDOMイベントの配線だけを行う。

use leaf_ai_common::upload::select_first;
use leaf_ai_common::UploadGate;
use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, FileList, HtmlInputElement, KeyboardEvent};

#[component]
pub fn UploadArea<F, N>(
    disabled: ReadSignal<bool>,
    on_file: F,
    on_invalid: N,
) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
    N: Fn(()) + 'static + Clone,
{
    let (gate, set_gate) = signal(UploadGate::new(disabled.get_untracked()));
    let input_ref: NodeRef<Input> = NodeRef::new();

    Effect::new(move |_| {
        let is_disabled = disabled.get();
        set_gate.update(|g| g.set_disabled(is_disabled));
    });

    // 先頭の1件のみ扱う
    let handle_files = move |files: Option<FileList>| {
        let first = files
            .and_then(|list| list.get(0))
            .map(|file| {
                let mime_type = file.type_();
                (file, mime_type)
            });

        match select_first(first) {
            Some(Ok(file)) => on_file(file),
            Some(Err(e)) => {
                log::warn!("upload rejected: {}", e);
                on_invalid(());
            }
            None => {}
        }
    };

    let open_picker = move || {
        if gate.get_untracked().can_browse() {
            if let Some(input) = input_ref.get() {
                input.click();
            }
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            ev.stop_propagation();

            let accept = set_gate.try_update(UploadGate::drop_files).unwrap_or(false);
            if accept {
                handle_files(ev.data_transfer().and_then(|dt| dt.files()));
            }
        }
    };

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_gate.update(|g| g.drag_enter());
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
    };

    let on_dragleave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_gate.update(|g| g.drag_leave());
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let key = ev.key();
        if key == "Enter" || key == " " {
            ev.prevent_default();
            open_picker();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        handle_files(input.files());
        // 同じファイルを再選択できるようにする
        input.set_value("");
    };

    view! {
        <div class="upload-wrapper">
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                class="hidden"
                disabled=move || disabled.get()
                on:change=on_change
            />
            <div
                class=move || format!("upload-area {}", gate.get().state().as_str())
                role="button"
                tabindex=move || if gate.get().is_disabled() { "-1" } else { "0" }
                aria-disabled=move || if gate.get().is_disabled() { "true" } else { "false" }
                aria-label="Image uploader with drag and drop"
                on:dragenter=on_dragenter
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
                on:click=move |_| open_picker()
                on:keydown=on_keydown
            >
                <div class="upload-icon">"☁️"</div>
                <p><strong>"Drag & drop an image here"</strong></p>
                <p class="text-muted">"or click to select a file"</p>
                <p class="text-muted">"PNG, JPG, GIF up to 10MB"</p>
            </div>
        </div>
    }
}
