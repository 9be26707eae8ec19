use crate::{components::AuthCard, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

/// Placeholder for the Terms & Conditions linked from both auth forms.
#[component]
pub fn TermsPage() -> impl IntoView {
    view! {
        <AuthCard title="Terms & Conditions" subtitle="Please read before booking">
            <div class="space-y-3 text-sm text-slate-300">
                <p>
                    "By creating an account you agree to receive sign-in links by email and to our booking and cancellation policies."
                </p>
                <p>"The full terms will be published here before launch."</p>
            </div>
            <div class="mt-6 flex justify-center gap-6 text-sm">
                <A href=paths::SIGNUP {..} class="text-amber-400 hover:underline">"Create an account"</A>
                <A href=paths::LOGIN {..} class="text-amber-400 hover:underline">"Sign in"</A>
            </div>
        </AuthCard>
    }
}
