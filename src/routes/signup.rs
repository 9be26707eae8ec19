//! Signup route. Collects the guest profile, validates it locally, and requests
//! a magic sign-up link carrying the profile as user metadata. Google OAuth asks
//! for offline access and forces the consent screen.
//!
//! Flow Overview: validate, request the link, show the confirmation, then clear
//! the form after a short delay.

use crate::{
    components::{Alert, AlertKind, AuthCard, Button, ButtonStyle, Spinner},
    features::auth::{
        signup_fields::SignupFields,
        state::{FormStatus, current_origin, use_auth_flow},
        submit::{FORM_RESET_DELAY_MS, SubmitOutcome, start_oauth, submit_signup},
        types::OAuthProvider,
        validation::MAX_PHONE_CHARS,
        view::AuthFlow,
    },
    routes::paths,
};
use gloo_timers::callback::Timeout;
use leptos::{
    ev::{MouseEvent, SubmitEvent},
    prelude::*,
    task::spawn_local,
};
use leptos_router::components::A;

const INPUT_CLASS: &str = "block w-full rounded-xl border border-white/20 bg-white/10 p-3 text-sm text-white placeholder-slate-400 focus:border-amber-400 focus:ring-amber-400 disabled:opacity-60";
const LABEL_CLASS: &str = "mb-2 block text-sm font-medium text-slate-200";

/// Renders the registration form.
#[component]
pub fn SignUpPage() -> impl IntoView {
    let status = FormStatus::new();
    let auth = use_auth_flow(AuthFlow::Signup, status);
    let fields = SignupFields::new();

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let identity = auth.identity();
        let form = fields.snapshot();
        spawn_local(async move {
            let outcome = submit_signup(&*identity, &status, &form, &current_origin()).await;
            if outcome == SubmitOutcome::Sent {
                Timeout::new(FORM_RESET_DELAY_MS, move || fields.reset()).forget();
            }
        });
    };

    let on_google = move |_: MouseEvent| {
        let identity = auth.identity();
        spawn_local(async move {
            start_oauth(
                &*identity,
                &status,
                AuthFlow::Signup,
                OAuthProvider::Google,
                &current_origin(),
            )
            .await;
        });
    };

    let disabled = move || status.loading.get();

    view! {
        <AuthCard title="Create your account" subtitle="Join GrandéStay and book your next stay">
            <Button style=ButtonStyle::Provider disabled=status.loading on_click=on_google>
                "Continue with Google"
            </Button>

            <div class="my-6 flex items-center gap-3 text-xs uppercase text-slate-400">
                <span class="h-px flex-1 bg-white/20"></span>
                "or sign up with email"
                <span class="h-px flex-1 bg-white/20"></span>
            </div>

            <form class="space-y-4" on:submit=on_submit>
                <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                    <div>
                        <label class=LABEL_CLASS for="first-name">"First name *"</label>
                        <input
                            id="first-name"
                            type="text"
                            class=INPUT_CLASS
                            autocomplete="given-name"
                            prop:value=move || fields.first_name.get()
                            prop:disabled=disabled
                            on:input=move |event| fields.first_name.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="last-name">"Last name *"</label>
                        <input
                            id="last-name"
                            type="text"
                            class=INPUT_CLASS
                            autocomplete="family-name"
                            prop:value=move || fields.last_name.get()
                            prop:disabled=disabled
                            on:input=move |event| fields.last_name.set(event_target_value(&event))
                        />
                    </div>
                </div>
                <div>
                    <label class=LABEL_CLASS for="email">"Email address *"</label>
                    <input
                        id="email"
                        type="email"
                        class=INPUT_CLASS
                        autocomplete="email"
                        placeholder="guest@example.com"
                        prop:value=move || fields.email.get()
                        prop:disabled=disabled
                        on:input=move |event| fields.email.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="phone">"Phone"</label>
                    <input
                        id="phone"
                        type="tel"
                        class=INPUT_CLASS
                        autocomplete="tel"
                        placeholder="(555) 123-4567"
                        maxlength=MAX_PHONE_CHARS.to_string()
                        prop:value=move || fields.phone.get()
                        prop:disabled=disabled
                        on:input=move |event| fields.set_phone(&event_target_value(&event))
                    />
                </div>
                <div>
                    <label class=LABEL_CLASS for="address">"Address"</label>
                    <input
                        id="address"
                        type="text"
                        class=INPUT_CLASS
                        autocomplete="street-address"
                        prop:value=move || fields.address.get()
                        prop:disabled=disabled
                        on:input=move |event| fields.address.set(event_target_value(&event))
                    />
                </div>
                <div class="grid grid-cols-1 gap-4 sm:grid-cols-2">
                    <div>
                        <label class=LABEL_CLASS for="city">"City"</label>
                        <input
                            id="city"
                            type="text"
                            class=INPUT_CLASS
                            autocomplete="address-level2"
                            prop:value=move || fields.city.get()
                            prop:disabled=disabled
                            on:input=move |event| fields.city.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label class=LABEL_CLASS for="zip-code">"Zip code"</label>
                        <input
                            id="zip-code"
                            type="text"
                            class=INPUT_CLASS
                            autocomplete="postal-code"
                            prop:value=move || fields.zip_code.get()
                            prop:disabled=disabled
                            on:input=move |event| fields.zip_code.set(event_target_value(&event))
                        />
                    </div>
                </div>
                <label class="flex items-start gap-3 text-sm text-slate-300">
                    <input
                        type="checkbox"
                        class="mt-0.5 h-4 w-4 rounded border-white/30 bg-white/10 text-amber-500 focus:ring-amber-400"
                        prop:checked=move || fields.accept_terms.get()
                        prop:disabled=disabled
                        on:change=move |event| fields.accept_terms.set(event_target_checked(&event))
                    />
                    <span>
                        "I accept the "
                        <A href=paths::TERMS {..} class="font-semibold text-amber-400 hover:underline">
                            "Terms & Conditions"
                        </A>
                        " *"
                    </span>
                </label>
                <Button button_type="submit" disabled=status.loading>
                    {move || status.loading.get().then(|| view! { <Spinner /> })}
                    "Create account"
                </Button>
            </form>

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
                "Already have an account? "
                <A href=paths::LOGIN {..} class="font-semibold text-amber-400 hover:underline">
                    "Sign in"
                </A>
            </p>
        </AuthCard>
    }
}
