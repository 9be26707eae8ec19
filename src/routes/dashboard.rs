//! Post-sign-in landing page. Bookings are not wired up yet; the page only
//! confirms the sign-in worked and never renders session details.

use crate::{components::AuthCard, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <AuthCard title="You're signed in" subtitle="Your reservations will appear here">
            <A href=paths::LOGIN {..} class="block text-center text-sm text-amber-400 hover:underline">
                "Back to sign in"
            </A>
        </AuthCard>
    }
}
