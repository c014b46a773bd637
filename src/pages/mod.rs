use crate::api::ResolvedCountry;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, CountryTile, ErrorAlert, Input, Label, NoteTile, PageSpinner, Textarea,
};
use crate::filter::{filter_countries, languages, regions, FilterState};
use crate::models::{Country, Note, NoteColor, Theme};
use crate::notes::{NoteDraft, NoteEditor, NotesBoard};
use crate::routing::{COUNTRIES_PATH, NOTES_PATH, SIGNIN_PATH, SIGNUP_PATH};
use crate::state::{AppContext, AppState};
use crate::util::{
    country_path, format_population, google_maps_url, google_search_url, wikipedia_url, NoteStamp,
};
use icons::{ArrowLeft, Globe, Heart, LogOut, MapPin, Moon, Palette, Pencil, Pin, Plus, Printer, Search, Sun, Trash2};
use leptos::ev;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;
use leptos_router::NavigateOptions;
use strum::IntoEnumIterator;

fn replace_history() -> NavigateOptions {
    NavigateOptions {
        replace: true,
        ..Default::default()
    }
}

const LINK_BUTTON_CLASS: &str = "inline-flex h-10 items-center gap-2 rounded-lg border border-gray-300 px-4 text-sm font-medium text-gray-800 transition-all duration-300 hover:bg-gray-100";

fn accent_button_class(accent: &str) -> String {
    format!(
        "inline-flex h-10 items-center gap-2 rounded-lg px-4 text-sm font-medium text-white shadow-md transition-all duration-300 hover:shadow-lg bg-{accent}-600 hover:bg-{accent}-700"
    )
}

fn heart_class(favorite: bool) -> &'static str {
    if favorite {
        "text-red-500 [&_svg]:fill-current"
    } else {
        "text-gray-400 hover:text-red-400"
    }
}

/// Auth screens share one backdrop so both forms look alike.
#[component]
fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center bg-gradient-to-br from-purple-600 to-indigo-700 px-4 py-10">
            <div class="w-full max-w-md">{children()}</div>
        </div>
    }
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if app_state.0.login(&username.get_untracked(), &password.get_untracked()) {
            error.set(None);
            navigate.with_value(|nav| nav(COUNTRIES_PATH, replace_history()));
        } else {
            error.set(Some("Invalid username or password".to_string()));
        }
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader>
                    <CardTitle class="text-purple-700">"Welcome Back"</CardTitle>
                    <CardDescription>"Sign in to explore countries around the world."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="username">"Username"</Label>
                            <Input id="username" placeholder="Enter your username" bind_value=username required=true />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="Enter your password"
                                bind_value=password
                                required=true
                            />
                        </div>

                        <ErrorAlert message=error />

                        <Button class="w-full" size=ButtonSize::Lg>
                            "Sign In"
                        </Button>
                    </form>
                </CardContent>

                <CardFooter class="text-gray-600">
                    "Don't have an account?"
                    <a class="font-semibold text-purple-600 hover:underline" href=SIGNUP_PATH>"Sign Up"</a>
                </CardFooter>
            </Card>
        </AuthLayout>
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let agreed: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let last_search = move || app_state.0.preferences.with(|p| p.last_search.clone());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if !agreed.get_untracked() {
            error.set(Some("Please agree to the Terms & Conditions".to_string()));
            return;
        }

        if app_state.0.signup(&username.get_untracked(), &password.get_untracked()) {
            error.set(None);
            navigate.with_value(|nav| nav(SIGNIN_PATH, Default::default()));
        } else {
            error.set(Some("Username already exists".to_string()));
        }
    };

    view! {
        <AuthLayout>
            <Card>
                <CardHeader>
                    <CardTitle class="text-purple-700">"Create Account"</CardTitle>
                    <CardDescription>"Join to save favorite countries and keep notes."</CardDescription>
                </CardHeader>

                <CardContent>
                    {move || last_search().map(|name| view! {
                        <p class="rounded-lg bg-purple-50 px-3 py-2 text-center text-sm text-purple-700">
                            "Last viewed: " <span class="font-semibold">{name}</span>
                        </p>
                    })}

                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="username">"Username"</Label>
                            <Input id="username" placeholder="Choose a username" bind_value=username required=true />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="Choose a password"
                                bind_value=password
                                required=true
                            />
                        </div>

                        <Label html_for="terms" class="font-normal text-gray-600">
                            <input
                                id="terms"
                                type="checkbox"
                                class="h-4 w-4 accent-purple-600"
                                prop:checked=move || agreed.get()
                                on:change=move |ev| agreed.set(event_target_checked(&ev))
                            />
                            "I agree to the Terms & Conditions"
                        </Label>

                        <ErrorAlert message=error />

                        <Button class="w-full" size=ButtonSize::Lg>
                            "Sign Up"
                        </Button>
                    </form>
                </CardContent>

                <CardFooter class="text-gray-600">
                    "Already have an account?"
                    <a class="font-semibold text-purple-600 hover:underline" href=SIGNIN_PATH>"Sign In"</a>
                </CardFooter>
            </Card>
        </AuthLayout>
    }
}

/// Renders `children` for a signed-in user, otherwise sends the visitor to sign in.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=|| view! { <RedirectToSignIn /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
fn RedirectToSignIn() -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move |_| navigate(SIGNIN_PATH, replace_history()));
}

/// Clears `open` on Escape until the current owner is cleaned up.
fn close_on_escape(open: RwSignal<bool>) {
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            open.set(false);
        }
    });
    on_cleanup(move || key_handle.remove());
}

/// Theme picker and dark mode switch shown in every signed-in header.
#[component]
fn ThemeControls() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let menu_open = RwSignal::new(false);

    close_on_escape(menu_open);

    let control = move || {
        app.preferences.with(|p| {
            format!(
                "rounded-full p-2 shadow-md transition-all duration-300 hover:scale-110 hover:shadow-lg {}",
                p.control_class()
            )
        })
    };

    view! {
        <div class="relative">
            <button
                class=control
                aria-label="Toggle Theme"
                title="Theme"
                on:click=move |_| menu_open.update(|v| *v = !*v)
            >
                <Palette class="h-5 w-5" />
            </button>

            <Show when=move || menu_open.get() fallback=|| ().into_view()>
                <div class="absolute right-0 z-20 mt-2 w-44 rounded-lg bg-white p-2 shadow-xl">
                    <div class="grid grid-cols-2 gap-2">
                        {Theme::iter()
                            .map(|theme| {
                                view! {
                                    <button
                                        class=format!(
                                            "rounded-md px-2 py-1 text-sm text-white shadow-sm transition-all duration-300 hover:scale-105 {}",
                                            theme.swatch_class()
                                        )
                                        aria-label=format!("{} Theme", theme.label())
                                        on:click=move |_| {
                                            app.set_theme(theme);
                                            menu_open.set(false);
                                        }
                                    >
                                        {theme.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </Show>
        </div>

        <button
            class=control
            aria-label="Toggle Dark Mode"
            title="Dark mode"
            on:click=move |_| app.toggle_dark_mode()
        >
            {move || {
                if app.preferences.with(|p| p.dark_mode) {
                    view! { <Sun class="h-5 w-5" /> }.into_any()
                } else {
                    view! { <Moon class="h-5 w-5" /> }.into_any()
                }
            }}
        </button>
    }
}

#[component]
fn LogoutButton() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());

    let on_logout = move |_| {
        app.logout();
        navigate.with_value(|nav| nav(SIGNIN_PATH, replace_history()));
    };

    view! {
        <button
            class=move || app.preferences.with(|p| format!(
                "rounded-full p-2 shadow-md transition-all duration-300 hover:scale-110 hover:shadow-lg {}",
                p.control_class()
            ))
            aria-label="Log Out"
            title="Log out"
            on:click=on_logout
        >
            <LogOut class="h-5 w-5" />
        </button>
    }
}

fn page_class(app: AppState) -> String {
    app.preferences.with(|p| {
        format!(
            "min-h-screen p-6 transition-colors duration-300 {} {}",
            p.page_background(),
            p.text_class()
        )
    })
}

#[component]
pub fn CountriesPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());

    let saved = FilterState::load(&app.persistence());
    let search_term = RwSignal::new(saved.search_term);
    let region: RwSignal<Option<String>> = RwSignal::new(saved.region);
    let language: RwSignal<Option<String>> = RwSignal::new(saved.language);
    let show_favorites_only = RwSignal::new(saved.show_favorites_only);

    let loading = RwSignal::new(!app.catalog_loaded.get_untracked());
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);

    let filter_state = Memo::new(move |_| FilterState {
        search_term: search_term.get(),
        region: region.get(),
        language: language.get(),
        show_favorites_only: show_favorites_only.get(),
    });

    // Every filter change is persisted, including the restored one.
    Effect::new(move |_| {
        let state = filter_state.get();
        state.save(&app.persistence());
    });

    let visible = Memo::new(move |_| {
        let state = filter_state.get();
        app.catalog
            .with(|catalog| app.favorites.with(|favorites| filter_countries(catalog, &state, favorites)))
    });
    let region_options = Memo::new(move |_| app.catalog.with(|c| regions(c)));
    let language_options = Memo::new(move |_| app.catalog.with(|c| languages(c)));

    if !app.catalog_loaded.get_untracked() {
        let client = app.api();
        spawn_local(async move {
            match client.fetch_all().await {
                Ok(countries) => {
                    log!("[countries] loaded {} countries", countries.len());
                    app.catalog.set(countries);
                    app.catalog_loaded.set(true);
                }
                Err(e) => {
                    error!("[countries] catalog fetch failed: {e}");
                    load_error.set(Some(format!("Failed to load countries: {e}")));
                }
            }
            loading.set(false);
        });
    }

    let accent = Signal::derive(move || app.preferences.with(|p| p.accent()));
    let welcome = move || format!("Welcome, {}!", app.username().unwrap_or_default());

    let on_region = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        region.set((!value.is_empty()).then_some(value));
    };
    let on_language = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        language.set((!value.is_empty()).then_some(value));
    };

    let select_class = move || {
        format!(
            "rounded-full border-2 border-{a}-300 bg-{a}-100 px-4 py-2 text-gray-800 shadow-sm outline-none",
            a = accent.get()
        )
    };

    view! {
        <div class=move || page_class(app)>
            <div class="mx-auto max-w-7xl">
                <header class="mb-6 flex flex-wrap items-center justify-between gap-4">
                    <div>
                        <h1 class=move || format!("text-3xl font-bold text-{}-500", accent.get())>
                            "Country Explorer"
                        </h1>
                        <p class="text-sm opacity-80">{welcome}</p>
                    </div>
                    <div class="flex items-center gap-3">
                        <button
                            class=move || accent_button_class(accent.get())
                            on:click=move |_| navigate.with_value(|nav| nav(NOTES_PATH, Default::default()))
                        >
                            <Plus class="h-4 w-4" />
                            "My Notes"
                        </button>
                        <ThemeControls />
                        <LogoutButton />
                    </div>
                </header>

                <div class=move || format!(
                    "mb-4 flex items-center rounded-full border-2 border-{a}-300 bg-{a}-200 px-4 py-2 shadow-sm",
                    a = accent.get()
                )>
                    <div class=move || format!("mr-3 rounded-full bg-{}-600 p-2", accent.get())>
                        <Search class="h-5 w-5 text-white" />
                    </div>
                    <Input
                        placeholder="Search for a country..."
                        bind_value=search_term
                        class="border-0 bg-transparent px-0 py-1 focus:border-transparent placeholder:text-gray-600"
                    />
                </div>

                <div class="mb-6 flex flex-wrap items-center gap-3">
                    <select class=select_class aria-label="Filter by region" on:change=on_region>
                        <option value="" selected=move || region.get().is_none()>"All Regions"</option>
                        {move || region_options.get().into_iter().map(|name| {
                            let value = name.clone();
                            let current = name.clone();
                            view! {
                                <option
                                    value=value
                                    selected=move || region.with(|r| r.as_deref() == Some(current.as_str()))
                                >
                                    {name}
                                </option>
                            }
                        }).collect_view()}
                    </select>

                    <select class=select_class aria-label="Filter by language" on:change=on_language>
                        <option value="" selected=move || language.get().is_none()>"All Languages"</option>
                        {move || language_options.get().into_iter().map(|name| {
                            let value = name.clone();
                            let current = name.clone();
                            view! {
                                <option
                                    value=value
                                    selected=move || language.with(|l| l.as_deref() == Some(current.as_str()))
                                >
                                    {name}
                                </option>
                            }
                        }).collect_view()}
                    </select>

                    <button
                        class=move || {
                            if show_favorites_only.get() {
                                "inline-flex items-center gap-2 rounded-full bg-red-500 px-4 py-2 text-white shadow-md transition-all duration-300".to_string()
                            } else {
                                format!(
                                    "inline-flex items-center gap-2 rounded-full bg-{a}-100 px-4 py-2 text-{a}-800 shadow-md transition-all duration-300 hover:bg-{a}-200",
                                    a = accent.get()
                                )
                            }
                        }
                        aria-pressed=move || show_favorites_only.get().to_string()
                        on:click=move |_| show_favorites_only.update(|v| *v = !*v)
                    >
                        <Heart class="h-4 w-4" />
                        {move || format!("Favorites ({})", app.favorites.with(|f| f.count()))}
                    </button>

                    <Show when=move || filter_state.with(|f| f.is_active()) fallback=|| ().into_view()>
                        <Button
                            variant=ButtonVariant::Ghost
                            on:click=move |_| {
                                search_term.set(String::new());
                                region.set(None);
                                language.set(None);
                                show_favorites_only.set(false);
                            }
                        >
                            "Clear filters"
                        </Button>
                    </Show>

                    <span class="ml-auto text-sm opacity-80">
                        {move || format!("{} countries", visible.with(|v| v.len()))}
                    </span>
                </div>

                <ErrorAlert message=load_error />

                {move || {
                    if loading.get() {
                        return view! { <PageSpinner accent=accent /> }.into_any();
                    }

                    let countries = visible.get();
                    if countries.is_empty() {
                        return view! {
                            <div class="py-16 text-center text-lg opacity-80">"No countries found."</div>
                        }
                        .into_any();
                    }

                    view! {
                        <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                            {countries
                                .into_iter()
                                .map(|country| view! { <CountryCard country=country /> })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn CountryCard(country: Country) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());

    let path = country_path(&country.name);
    let name_for_toggle = country.name.clone();
    let name_for_check = country.name.clone();
    let is_favorite = move || app.favorites.with(|f| f.is_favorite(&name_for_check));
    let capital = country.capital().unwrap_or("N/A").to_string();
    let flag_alt = format!("Flag of {}", country.name);

    view! {
        <CountryTile on:click=move |_| navigate.with_value(|nav| nav(&path, Default::default()))>
            <img src=country.flag_url alt=flag_alt class="h-40 w-full object-cover" loading="lazy" />
            <div class="flex flex-col gap-1 p-4 text-gray-800">
                <h2 class="text-lg font-bold">{country.name}</h2>
                <p class="text-sm">"Region: " {country.region}</p>
                <p class="text-sm">"Capital: " {capital}</p>
                <p class="text-sm">"Population: " {format_population(country.population)}</p>
            </div>
            <button
                class=move || format!("absolute top-2 right-2 rounded-full bg-white/90 p-2 shadow-md transition-transform hover:scale-110 {}", heart_class(is_favorite()))
                aria-label="Toggle Favorite"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    app.toggle_favorite(&name_for_toggle);
                }
            >
                <Heart class="h-5 w-5" />
            </button>
        </CountryTile>
    }
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct CountryRouteParams {
    pub name: Option<String>,
}

#[component]
pub fn CountryDetailPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let params = use_params::<CountryRouteParams>();

    // Use a closure so params access happens inside a reactive tracking context.
    let country_name = move || {
        params
            .get()
            .ok()
            .and_then(|p| p.name)
            .unwrap_or_default()
    };

    let resolved: RwSignal<Option<ResolvedCountry>> = RwSignal::new(None);
    let loading = RwSignal::new(true);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);
    let favorite_names: RwSignal<Vec<String>> = RwSignal::new(Vec::new());

    // Only the newest lookup may write results.
    let request_id = RwSignal::new(0u64);

    Effect::new(move |_| {
        let name = country_name();
        let id = request_id.get_untracked() + 1;
        request_id.set(id);

        if name.trim().is_empty() {
            resolved.set(None);
            load_error.set(Some("No country name provided.".to_string()));
            loading.set(false);
            return;
        }

        loading.set(true);
        load_error.set(None);

        let client = app.api();
        spawn_local(async move {
            let result = client.resolve_country(&name).await;
            if request_id.get_untracked() != id {
                log!("[country] dropping stale response for {name}");
                return;
            }

            match result {
                Ok(found) => {
                    app.set_last_search(&found.detail.country.name);
                    resolved.set(Some(found));
                }
                Err(e) => {
                    error!("[country] lookup for {name} failed: {e}");
                    resolved.set(None);
                    load_error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    });

    Effect::new(move |_| {
        let names: Vec<String> = app
            .favorites
            .with(|f| f.names().map(str::to_string).collect());
        if names.is_empty() {
            favorite_names.set(Vec::new());
            return;
        }

        let client = app.api();
        spawn_local(async move {
            match client.fetch_names(&names).await {
                Ok(found) => favorite_names.set(found),
                Err(e) => {
                    warn!("[country] favorites lookup failed: {e}");
                    favorite_names.set(Vec::new());
                }
            }
        });
    });

    let accent = Signal::derive(move || app.preferences.with(|p| p.accent()));

    view! {
        <div class=move || page_class(app)>
            <div class="mx-auto max-w-5xl">
                <header class="mb-6 flex items-center justify-between gap-4">
                    <a
                        href=COUNTRIES_PATH
                        class=move || format!(
                            "inline-flex items-center gap-2 rounded-full bg-{a}-600 px-4 py-2 text-white shadow-md hover:bg-{a}-700",
                            a = accent.get()
                        )
                    >
                        <ArrowLeft class="h-4 w-4" />
                        "Back to Countries"
                    </a>
                    <div class="flex items-center gap-3">
                        <ThemeControls />
                        <LogoutButton />
                    </div>
                </header>

                {move || {
                    if loading.get() {
                        return view! { <PageSpinner accent=accent /> }.into_any();
                    }
                    if let Some(message) = load_error.get() {
                        return view! { <MissingCountry message=message /> }.into_any();
                    }
                    match resolved.get() {
                        Some(found) => view! {
                            <CountryProfile resolved=found favorite_names=favorite_names />
                        }
                        .into_any(),
                        None => view! { <MissingCountry message="Country not found." /> }.into_any(),
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn MissingCountry(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <Card class="items-center text-center">
            <CardTitle class="text-red-600">{message}</CardTitle>
            <a class="font-semibold text-purple-600 hover:underline" href=COUNTRIES_PATH>
                "Return to the country list"
            </a>
        </Card>
    }
}

#[component]
fn CountryProfile(resolved: ResolvedCountry, favorite_names: RwSignal<Vec<String>>) -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let ResolvedCountry { detail, borders } = resolved;
    let country = detail.country;

    let name = country.name.clone();
    let name_for_toggle = name.clone();
    let name_for_check = name.clone();
    let is_favorite = move || app.favorites.with(|f| f.is_favorite(&name_for_check));

    let capital = country.capital().unwrap_or("N/A").to_string();
    let languages = {
        let names: Vec<&str> = country.language_names().collect();
        if names.is_empty() {
            "N/A".to_string()
        } else {
            names.join(", ")
        }
    };
    let coordinates = detail
        .latlng
        .map(|(lat, lng)| format!("{lat:.2}, {lng:.2}"))
        .unwrap_or_else(|| "N/A".to_string());
    let code = detail.code.clone().unwrap_or_else(|| "N/A".to_string());

    let search_url = google_search_url(&name);
    let maps_url = google_maps_url(&name);
    let wiki_url = wikipedia_url(&name);

    let on_print = move |_| {
        if let Err(e) = window().print() {
            warn!("[country] print failed: {e:?}");
        }
    };

    view! {
        <Card class="gap-6 p-0 overflow-hidden">
            <div class="relative">
                <img src=country.flag_url alt=format!("Flag of {name}") class="h-64 w-full object-cover" />
                <button
                    class=move || format!("absolute top-4 right-4 rounded-full bg-white/90 p-3 shadow-md transition-transform hover:scale-110 {}", heart_class(is_favorite()))
                    aria-label="Toggle Favorite"
                    on:click=move |_| {
                        app.toggle_favorite(&name_for_toggle);
                    }
                >
                    <Heart class="h-6 w-6" />
                </button>
            </div>

            <div class="flex flex-col gap-6 px-8 pb-8">
                <div>
                    <h1 class="text-4xl font-bold">{name.clone()}</h1>
                    <p class="text-gray-500">{format!("{capital}, {}", country.region)}</p>
                </div>

                <dl class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                    <ProfileField label="Region" value=country.region.clone() />
                    <ProfileField label="Capital" value=capital.clone() />
                    <ProfileField label="Population" value=format_population(country.population) />
                    <ProfileField label="Languages" value=languages />
                    <ProfileField label="Coordinates" value=coordinates />
                    <ProfileField label="Country Code" value=code />
                </dl>

                <section class="flex flex-col gap-3">
                    <h2 class="text-xl font-semibold">"Border Countries"</h2>
                    {if borders.is_empty() {
                        view! { <p class="text-gray-500">"No bordering countries."</p> }.into_any()
                    } else {
                        view! {
                            <div class="flex flex-wrap gap-3">
                                {borders.into_iter().map(|border| {
                                    let title = format!(
                                        "Capital: {}",
                                        border.capitals.first().map(String::as_str).unwrap_or("N/A")
                                    );
                                    let href = country_path(&border.name);
                                    view! {
                                        <a
                                            href=href
                                            title=title
                                            class="inline-flex items-center gap-2 rounded-full bg-gray-100 px-3 py-1 text-sm hover:bg-gray-200"
                                        >
                                            <img src=border.flag_url alt="" class="h-4 w-6 rounded-sm object-cover" />
                                            {border.name}
                                        </a>
                                    }
                                }).collect_view()}
                            </div>
                        }
                        .into_any()
                    }}
                </section>

                <Show when=move || favorite_names.with(|n| !n.is_empty()) fallback=|| ().into_view()>
                    <section class="flex flex-col gap-3">
                        <h2 class="text-xl font-semibold">"Your Favorites"</h2>
                        <div class="flex flex-wrap gap-2">
                            {move || favorite_names.get().into_iter().map(|fav| {
                                let href = country_path(&fav);
                                view! {
                                    <a
                                        href=href
                                        class="rounded-full bg-red-50 px-3 py-1 text-sm text-red-600 hover:bg-red-100"
                                    >
                                        {fav}
                                    </a>
                                }
                            }).collect_view()}
                        </div>
                    </section>
                </Show>

                <div class="flex flex-wrap gap-3">
                    <a class=LINK_BUTTON_CLASS href=search_url target="_blank" rel="noopener noreferrer">
                        <Search class="h-4 w-4" />
                        "Search"
                    </a>
                    <a class=LINK_BUTTON_CLASS href=maps_url target="_blank" rel="noopener noreferrer">
                        <MapPin class="h-4 w-4" />
                        "Map"
                    </a>
                    <a class=LINK_BUTTON_CLASS href=wiki_url target="_blank" rel="noopener noreferrer">
                        <Globe class="h-4 w-4" />
                        "Wikipedia"
                    </a>
                    <Button variant=ButtonVariant::Outline on:click=on_print>
                        <Printer class="h-4 w-4" />
                        "Print"
                    </Button>
                </div>
            </div>
        </Card>
    }
}

#[component]
fn ProfileField(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="rounded-lg bg-gray-50 p-4">
            <dt class="text-sm text-gray-500">{label}</dt>
            <dd class="text-lg font-semibold">{value}</dd>
        </div>
    }
}

#[component]
pub fn MyNotesPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let username = app.username().unwrap_or_default();

    let board = RwSignal::new(NotesBoard::load(&app.persistence(), &username, &NoteStamp::now()));
    let editor = RwSignal::new(NoteEditor::default());

    // Form fields mirror `editor.draft` while the form is open.
    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let color = RwSignal::new(NoteColor::default());
    let pinned = RwSignal::new(false);

    let fill_form = move || {
        editor.with_untracked(|e| {
            title.set(e.draft.title.clone());
            content.set(e.draft.content.clone());
            color.set(e.draft.color);
            pinned.set(e.draft.pinned);
        });
    };

    let on_add = move |_| {
        editor.update(|e| e.open_new());
        fill_form();
    };

    let on_edit = move |note: Note| {
        editor.update(|e| e.open_edit(&note));
        fill_form();
    };

    let on_delete = move |id: String| {
        board.update(|b| {
            b.delete(&app.persistence(), &id);
        });
        editor.update(|e| e.note_deleted(&id));
    };

    let on_pin = move |id: String| {
        board.update(|b| {
            b.toggle_pin(&app.persistence(), &id);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let mut current = editor.get_untracked();
        current.draft = NoteDraft {
            title: title.get_untracked(),
            content: content.get_untracked(),
            color: color.get_untracked(),
            pinned: pinned.get_untracked(),
        };
        let store = app.persistence();
        let stamp = NoteStamp::now();
        board.update(|b| current.submit(b, &store, &stamp));
        editor.set(current);
    };

    let accent = Signal::derive(move || app.preferences.with(|p| p.accent()));

    let go_back = move |_| {
        let went_back = window().history().and_then(|h| h.back());
        if let Err(e) = went_back {
            warn!("[notes] history back failed: {e:?}");
        }
    };

    view! {
        <div class=move || page_class(app)>
            <div class="mx-auto max-w-6xl">
                <header class="mb-6 flex flex-wrap items-center justify-between gap-4">
                    <div class="flex items-center gap-3">
                        <Button variant=ButtonVariant::Ghost size=ButtonSize::Icon attr:aria-label="Go Back" on:click=go_back>
                            <ArrowLeft class="h-5 w-5" />
                        </Button>
                        <h1 class=move || format!("text-3xl font-bold text-{}-500", accent.get())>"My Notes"</h1>
                    </div>
                    <div class="flex items-center gap-3">
                        <button class=move || accent_button_class(accent.get()) on:click=on_add>
                            <Plus class="h-4 w-4" />
                            "Add Note"
                        </button>
                        <ThemeControls />
                    </div>
                </header>

                <Show when=move || editor.with(|e| e.is_open()) fallback=|| ().into_view()>
                    <Card class="mb-8 p-6">
                        <CardTitle class="text-left text-xl">
                            {move || if editor.with(|e| e.editing_id().is_some()) { "Edit Note" } else { "New Note" }}
                        </CardTitle>
                        <form class="flex flex-col gap-4" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="note-title">"Title"</Label>
                                <Input id="note-title" placeholder="Note title" bind_value=title />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="note-content">"Content"</Label>
                                <Textarea id="note-content" placeholder="Write your note..." rows=5 bind_value=content />
                            </div>

                            <div class="flex flex-wrap items-center gap-3">
                                <span class="text-sm font-medium">"Color"</span>
                                {NoteColor::iter().map(|swatch| view! {
                                    <button
                                        type="button"
                                        class=move || {
                                            let ring = if color.get() == swatch { "ring-2 ring-gray-700 ring-offset-2" } else { "" };
                                            format!("h-8 w-8 rounded-full border-2 {} {ring}", swatch.class())
                                        }
                                        aria-label=format!("{swatch} note color")
                                        on:click=move |_| color.set(swatch)
                                    />
                                }).collect_view()}
                            </div>

                            <Label html_for="note-pinned" class="font-normal">
                                <input
                                    id="note-pinned"
                                    type="checkbox"
                                    class="h-4 w-4"
                                    prop:checked=move || pinned.get()
                                    on:change=move |ev| pinned.set(event_target_checked(&ev))
                                />
                                "Pin this note"
                            </Label>

                            <div class="flex justify-end gap-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    on:click=move |ev: web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        editor.update(|e| e.close());
                                    }
                                >
                                    "Cancel"
                                </Button>
                                <button type="submit" class=move || accent_button_class(accent.get())>
                                    {move || if editor.with(|e| e.editing_id().is_some()) { "Update Note" } else { "Save Note" }}
                                </button>
                            </div>
                        </form>
                    </Card>
                </Show>

                {move || {
                    let notes = board.with(|b| b.display_order());
                    if notes.is_empty() {
                        return view! {
                            <div class="py-16 text-center text-lg opacity-80">
                                "No notes yet. Click \"Add Note\" to create one."
                            </div>
                        }
                        .into_any();
                    }

                    view! {
                        <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3">
                            {notes.into_iter().map(|note| {
                                let id_for_pin = note.id.clone();
                                let id_for_delete = note.id.clone();
                                let note_for_edit = note.clone();
                                let (pin_class, pin_label) = if note.pinned {
                                    ("text-gray-800 [&_svg]:fill-current", "Unpin note")
                                } else {
                                    ("text-gray-400 hover:text-gray-700", "Pin note")
                                };

                                view! {
                                    <NoteTile class=note.color.class()>
                                        <div class="flex items-start justify-between gap-2">
                                            <h3 class="text-lg font-bold text-gray-800 break-words">{note.title.clone()}</h3>
                                            <div class="flex shrink-0 items-center gap-1">
                                                <button
                                                    class=format!("rounded-full p-1 hover:bg-black/10 {pin_class}")
                                                    aria-label=pin_label
                                                    on:click=move |_| on_pin(id_for_pin.clone())
                                                >
                                                    <Pin class="h-4 w-4" />
                                                </button>
                                                <button
                                                    class="rounded-full p-1 text-gray-600 hover:bg-black/10"
                                                    aria-label="Edit note"
                                                    on:click=move |_| on_edit(note_for_edit.clone())
                                                >
                                                    <Pencil class="h-4 w-4" />
                                                </button>
                                                <button
                                                    class="rounded-full p-1 text-red-500 hover:bg-black/10"
                                                    aria-label="Delete note"
                                                    on:click=move |_| on_delete(id_for_delete.clone())
                                                >
                                                    <Trash2 class="h-4 w-4" />
                                                </button>
                                            </div>
                                        </div>
                                        <p class="flex-1 whitespace-pre-wrap text-gray-700">{note.content.clone()}</p>
                                        <p class="text-xs text-gray-500">{format!("{} · {}", note.date, note.time)}</p>
                                    </NoteTile>
                                }
                            }).collect_view()}
                        </div>
                    }
                    .into_any()
                }}

                <Show when=move || board.with(|b| !b.is_empty()) fallback=|| ().into_view()>
                    <p class="mt-6 text-center text-sm opacity-70">
                        {move || format!("{} notes", board.with(|b| b.len()))}
                    </p>
                </Show>
            </div>
        </div>
    }
}

/// Shown by the router for unknown paths.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <AuthLayout>
            <Card class="items-center">
                <CardTitle>"Page not found"</CardTitle>
                <a class="font-semibold text-purple-600 hover:underline" href=SIGNIN_PATH>"Go to sign in"</a>
            </Card>
        </AuthLayout>
    }
}
