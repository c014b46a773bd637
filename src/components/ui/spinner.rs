use leptos::prelude::*;

/// Full-width loading indicator tinted with the theme accent.
#[component]
pub fn PageSpinner(#[prop(into)] accent: Signal<&'static str>) -> impl IntoView {
    view! {
        <div class="flex h-64 items-center justify-center">
            <div
                class=move || format!(
                    "h-12 w-12 animate-spin rounded-full border-t-2 border-b-2 border-{}-600",
                    accent.get()
                )
                role="status"
                aria-label="Loading"
            />
        </div>
    }
}
