//! Login / register screen shown while no session exists.

use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use crate::api;
use crate::flash::{Flash, FlashBanner};
use crate::models::User;

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub on_authenticated: Callback<User>,
}

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let is_login = use_state(|| true);
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let flash = use_state(|| None::<Flash>);
    let pending = use_state(|| false);

    let on_submit = {
        let is_login = is_login.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let flash = flash.clone();
        let pending = pending.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let username_val = (*username).clone();
            let email_val = (*email).clone();
            let password_val = (*password).clone();
            let confirm_val = (*confirm_password).clone();

            if username_val.is_empty() || password_val.is_empty() {
                flash.set(Some(Flash::error("Username and password are required")));
                return;
            }
            // Mismatched passwords never reach the network.
            if !*is_login && password_val != confirm_val {
                flash.set(Some(Flash::error("Passwords do not match")));
                return;
            }

            pending.set(true);
            flash.set(None);

            let login_mode = *is_login;
            let flash = flash.clone();
            let pending = pending.clone();
            let on_authenticated = on_authenticated.clone();
            spawn_local(async move {
                let result = if login_mode {
                    api::login(&username_val, &password_val).await
                } else {
                    api::register(&username_val, &email_val, &password_val, &confirm_val).await
                };

                match result {
                    Ok(_) => {
                        // The check endpoint is the source of truth for the
                        // signed-in user record.
                        match api::check_auth().await {
                            Ok(check) if check.authenticated => {
                                if let Some(user) = check.user {
                                    on_authenticated.emit(user);
                                }
                            }
                            _ => {
                                flash.set(Some(Flash::error("Session could not be established")));
                            }
                        }
                    }
                    Err(err) => {
                        let fallback = if login_mode { "Login failed" } else { "Registration failed" };
                        let text = match err {
                            api::ApiError::Backend(msg) => msg,
                            api::ApiError::Network(_) => fallback.to_string(),
                        };
                        flash.set(Some(Flash::error(text)));
                    }
                }
                pending.set(false);
            });
        })
    };

    let toggle_mode = {
        let is_login = is_login.clone();
        let flash = flash.clone();
        Callback::from(move |_| {
            flash.set(None);
            is_login.set(!*is_login);
        })
    };

    let on_dismiss = {
        let flash = flash.clone();
        Callback::from(move |_| flash.set(None))
    };

    let text_input = |label: &'static str,
                      kind: &'static str,
                      handle: UseStateHandle<String>| {
        html! {
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{ label }</label>
                <input
                    type={kind}
                    class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                    value={(*handle).clone()}
                    oninput={Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        handle.set(input.value());
                    })}
                />
            </div>
        }
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if *is_login { "Welcome back" } else { "Create account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if *is_login { "Sign in to continue." } else { "Start tracking your expenses." } }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    { text_input("Username", "text", username.clone()) }

                    if !*is_login {
                        { text_input("Email", "email", email.clone()) }
                    }

                    { text_input("Password", "password", password.clone()) }

                    if !*is_login {
                        { text_input("Confirm Password", "password", confirm_password.clone()) }
                    }

                    <FlashBanner flash={(*flash).clone()} on_dismiss={on_dismiss} />

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*pending}
                    >
                        { if *pending { "Please wait..." } else if *is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if *is_login { "No account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-primary font-semibold" onclick={toggle_mode}>
                        { if *is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
