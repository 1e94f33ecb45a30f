mod api;
mod charts;
mod filters;
mod flash;
mod format;
mod models;
mod pages;
mod state;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use models::User;
use pages::auth::AuthScreen;
use pages::budgets::BudgetsPage;
use pages::dashboard::DashboardPage;
use pages::expenses::ExpensesPage;
use pages::upload::UploadPage;

#[derive(Clone, Copy, PartialEq)]
enum Page {
    Dashboard,
    Expenses,
    Budgets,
    Upload,
}

impl Page {
    fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Expenses => "Expenses",
            Page::Budgets => "Budgets",
            Page::Upload => "Import CSV",
        }
    }
}

/// The session gate. Nothing behind it renders until the check
/// endpoint has answered.
#[derive(Clone, PartialEq)]
enum AuthState {
    Checking,
    SignedIn(User),
    SignedOut,
}

fn icon_base(path: Html) -> Html {
    html! {
        <svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            { path }
        </svg>
    }
}

fn icon_dashboard() -> Html {
    icon_base(html! {
        <>
            <rect x="3" y="3" width="7" height="9"></rect>
            <rect x="14" y="3" width="7" height="5"></rect>
            <rect x="14" y="12" width="7" height="9"></rect>
            <rect x="3" y="16" width="7" height="5"></rect>
        </>
    })
}

fn icon_expenses() -> Html {
    icon_base(html! {
        <>
            <line x1="12" y1="1" x2="12" y2="23"></line>
            <path d="M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6"></path>
        </>
    })
}

fn icon_budgets() -> Html {
    icon_base(html! {
        <>
            <path d="M21.21 15.89A10 10 0 1 1 8 2.83"></path>
            <path d="M22 12A10 10 0 0 0 12 2v10z"></path>
        </>
    })
}

fn icon_upload() -> Html {
    icon_base(html! {
        <>
            <path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"></path>
            <polyline points="17 8 12 3 7 8"></polyline>
            <line x1="12" y1="3" x2="12" y2="15"></line>
        </>
    })
}

fn icon_logout() -> Html {
    icon_base(html! {
        <>
            <path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"></path>
            <polyline points="16 17 21 12 16 7"></polyline>
            <line x1="21" y1="12" x2="9" y2="12"></line>
        </>
    })
}

fn page_icon(page: Page) -> Html {
    match page {
        Page::Dashboard => icon_dashboard(),
        Page::Expenses => icon_expenses(),
        Page::Budgets => icon_budgets(),
        Page::Upload => icon_upload(),
    }
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    current: Page,
    username: String,
    on_navigate: Callback<Page>,
    on_logout: Callback<()>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    const PAGES: [Page; 4] = [Page::Dashboard, Page::Expenses, Page::Budgets, Page::Upload];

    let nav_item = |page: Page| {
        let active = props.current == page;
        let class = if active {
            "flex items-center gap-3 px-4 py-2.5 rounded-[10px] bg-[#173E63] text-white text-sm font-semibold w-full"
        } else {
            "flex items-center gap-3 px-4 py-2.5 rounded-[10px] text-muted-foreground hover:bg-secondary text-sm font-semibold w-full"
        };
        let on_navigate = props.on_navigate.clone();
        html! {
            <button class={class} onclick={Callback::from(move |_| on_navigate.emit(page))}>
                { page_icon(page) }
                <span>{ page.label() }</span>
            </button>
        }
    };

    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <aside class="w-60 shrink-0 bg-card border-r border-border min-h-screen flex flex-col p-4">
            <div class="px-4 py-5">
                <h2 class="text-xl font-bold text-[#173E63] tracking-tight">{"Expense Tracker"}</h2>
            </div>
            <nav class="flex flex-col gap-1 flex-1">
                { for PAGES.iter().copied().map(nav_item) }
            </nav>
            <button
                class="flex items-center gap-3 px-4 py-2.5 rounded-[10px] text-muted-foreground hover:bg-secondary text-sm font-semibold"
                onclick={on_logout}
            >
                { icon_logout() }
                <span>{ format!("Logout ({})", props.username) }</span>
            </button>
        </aside>
    }
}

#[function_component(App)]
fn app() -> Html {
    let auth = use_state(|| AuthState::Checking);
    let page = use_state(|| Page::Dashboard);

    {
        let auth = auth.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api::check_auth().await {
                        Ok(check) if check.authenticated => {
                            if let Some(user) = check.user {
                                auth.set(AuthState::SignedIn(user));
                            } else {
                                auth.set(AuthState::SignedOut);
                            }
                        }
                        _ => auth.set(AuthState::SignedOut),
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_authenticated = {
        let auth = auth.clone();
        let page = page.clone();
        Callback::from(move |user: User| {
            page.set(Page::Dashboard);
            auth.set(AuthState::SignedIn(user));
        })
    };

    let on_logout = {
        let auth = auth.clone();
        Callback::from(move |_| {
            let auth = auth.clone();
            spawn_local(async move {
                // The local session ends even if the server call fails.
                let _ = api::logout().await;
                auth.set(AuthState::SignedOut);
            });
        })
    };

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| page.set(next))
    };

    let on_imported = {
        let page = page.clone();
        Callback::from(move |_| page.set(Page::Expenses))
    };

    match &*auth {
        AuthState::Checking => html! {
            <div class="min-h-screen flex items-center justify-center bg-background">
                <p class="text-sm text-muted-foreground">{"Loading..."}</p>
            </div>
        },
        AuthState::SignedOut => html! {
            <AuthScreen on_authenticated={on_authenticated} />
        },
        AuthState::SignedIn(user) => {
            let content = match *page {
                Page::Dashboard => html! { <DashboardPage /> },
                Page::Expenses => html! { <ExpensesPage /> },
                Page::Budgets => html! { <BudgetsPage /> },
                Page::Upload => html! { <UploadPage on_imported={on_imported} /> },
            };
            html! {
                <div class="flex min-h-screen bg-background">
                    <Sidebar
                        current={*page}
                        username={user.username.clone()}
                        on_navigate={on_navigate}
                        on_logout={on_logout}
                    />
                    <main class="flex-1 overflow-y-auto">
                        { content }
                    </main>
                </div>
            }
        }
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
