use crate::pages::{
    CountriesPage, CountryDetailPage, MyNotesPage, NotFoundPage, RequireAuth, SignInPage,
    SignUpPage,
};
use crate::routing::ViewRestorer;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{path, NavigateOptions};

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::browser()));

    // Router hooks require a <Router> context, so view restoration lives inside it.
    view! {
        <Router>
            <ViewRestoration />
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("signin") view=SignInPage />
                <Route path=path!("signup") view=SignUpPage />
                <Route path=path!("countries") view=move || view! {
                    <RequireAuth>
                        <CountriesPage />
                    </RequireAuth>
                } />
                <Route path=path!("country/:name") view=move || view! {
                    <RequireAuth>
                        <CountryDetailPage />
                    </RequireAuth>
                } />
                <Route path=path!("my-notes") view=move || view! {
                    <RequireAuth>
                        <MyNotesPage />
                    </RequireAuth>
                } />
                <Route path=path!("") view=SignInPage />
            </Routes>
        </Router>
    }
}

/// Records each visited route and, once per load, returns the visitor to
/// the route they were on before a reload.
#[component]
fn ViewRestoration() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let location = use_location();
    let navigate = use_navigate();
    let restorer = StoredValue::new(ViewRestorer::default());

    Effect::new(move |_| {
        let current = location.pathname.get();
        let authenticated = app_state.0.auth.with_untracked(|a| a.is_authenticated());
        let store = app_state.0.persistence();

        let target = restorer
            .try_update_value(|r| r.on_route_change(&store, &current, authenticated))
            .flatten();

        if let Some(target) = target {
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}
