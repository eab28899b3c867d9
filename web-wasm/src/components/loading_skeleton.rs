//! 診断中のプレースホルダー

use leptos::prelude::*;

#[component]
pub fn LoadingSkeleton() -> impl IntoView {
    view! {
        <div class="loading" aria-busy="true" aria-label="Analyzing image">
            <div class="skeleton" style="height: 2.5rem; width: 75%; margin: 0 auto;" />
            <div class="skeleton" style="height: 8rem;" />
            <div class="skeleton" style="height: 8rem;" />
            <div class="skeleton" style="height: 8rem;" />
        </div>
    }
}
