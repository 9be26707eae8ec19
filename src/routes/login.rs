//! Login route. Requests a magic sign-in link or starts Google OAuth, and, when
//! mounted at `/auth/callback`, finishes the OAuth return for both login and
//! signup. An existing session skips straight to the dashboard.

use crate::{
    components::{Alert, AlertKind, AuthCard, Button, ButtonStyle, Spinner},
    features::auth::{
        state::{FormStatus, current_origin, use_auth_flow},
        submit::{start_oauth, submit_login},
        types::OAuthProvider,
        view::AuthFlow,
    },
    routes::paths,
};
use leptos::{
    ev::{MouseEvent, SubmitEvent},
    prelude::*,
    task::spawn_local,
};
use leptos_router::components::A;

const INPUT_CLASS: &str = "block w-full rounded-xl border border-white/20 bg-white/10 p-3 text-sm text-white placeholder-slate-400 focus:border-amber-400 focus:ring-amber-400 disabled:opacity-60";

/// Renders the magic-link login form.
#[component]
pub fn LoginPage() -> impl IntoView {
    let status = FormStatus::new();
    let auth = use_auth_flow(AuthFlow::Login, status);
    let (email, set_email) = signal(String::new());

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let identity = auth.identity();
        let email = email.get_untracked();
        spawn_local(async move {
            submit_login(&*identity, &status, &email).await;
        });
    };

    let on_google = move |_: MouseEvent| {
        let identity = auth.identity();
        spawn_local(async move {
            start_oauth(
                &*identity,
                &status,
                AuthFlow::Login,
                OAuthProvider::Google,
                &current_origin(),
            )
            .await;
        });
    };

    view! {
        <AuthCard title="Welcome back" subtitle="Sign in to manage your reservations">
            <form class="space-y-5" on:submit=on_submit>
                <div>
                    <label class="mb-2 block text-sm font-medium text-slate-200" for="email">
                        "Email address"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class=INPUT_CLASS
                        autocomplete="email"
                        placeholder="guest@example.com"
                        required
                        prop:value=move || email.get()
                        prop:disabled=move || status.loading.get()
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <Button button_type="submit" disabled=status.loading>
                    {move || status.loading.get().then(|| view! { <Spinner /> })}
                    "Send magic link"
                </Button>
            </form>

            <div class="my-6 flex items-center gap-3 text-xs uppercase text-slate-400">
                <span class="h-px flex-1 bg-white/20"></span>
                "or"
                <span class="h-px flex-1 bg-white/20"></span>
            </div>

            <Button style=ButtonStyle::Provider disabled=status.loading on_click=on_google>
                "Continue with Google"
            </Button>

            <div class="mt-6 space-y-4">
                {move || {
                    status
                        .error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
                {move || {
                    status
                        .success
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Success message=message /> })
                }}
            </div>

            <p class="mt-6 text-center text-sm text-slate-300">
                "New to GrandéStay? "
                <A href=paths::SIGNUP {..} class="font-semibold text-amber-400 hover:underline">
                    "Create an account"
                </A>
            </p>
            <p class="mt-2 text-center text-xs text-slate-400">
                "By signing in you agree to our "
                <A href=paths::TERMS {..} class="underline hover:text-slate-200">
                    "Terms & Conditions"
                </A>
            </p>
        </AuthCard>
    }
}
