//! 一時的な通知（トースト）

use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

#[component]
pub fn NoticeToast(notice: ReadSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            view! {
                <div class="notice" role="alert">
                    <strong>{n.title}</strong>
                    <p>{n.message}</p>
                </div>
            }
        })
    }
}
