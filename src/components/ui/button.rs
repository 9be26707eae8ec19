use leptos::{ev::MouseEvent, prelude::*};

#[derive(Clone, Copy, Default)]
pub enum ButtonStyle {
    #[default]
    Primary,
    /// White button used for third-party sign-in.
    Provider,
}

#[component]
pub fn Button(
    #[prop(optional)] button_type: Option<&'static str>,
    #[prop(optional)] style: ButtonStyle,
    #[prop(optional, into, default = Signal::from(false))] disabled: Signal<bool>,
    #[prop(optional, into)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let button_type = button_type.unwrap_or("button");
    let class = match style {
        ButtonStyle::Primary => {
            "flex w-full items-center justify-center gap-2 rounded-xl bg-amber-500 px-5 py-3 text-sm font-semibold text-slate-900 shadow-lg transition hover:bg-amber-400 focus:outline-none focus:ring-4 focus:ring-amber-300/50"
        }
        ButtonStyle::Provider => {
            "flex w-full items-center justify-center gap-3 rounded-xl border border-white/30 bg-white px-5 py-3 text-sm font-medium text-slate-800 shadow transition hover:bg-slate-100 focus:outline-none focus:ring-4 focus:ring-white/40"
        }
    };

    view! {
        <button
            type=button_type
            class=class
            class:cursor-not-allowed=move || disabled.get()
            class:opacity-70=move || disabled.get()
            disabled=move || disabled.get()
            on:click=move |event| {
                if let Some(on_click) = on_click {
                    on_click.run(event);
                }
            }
        >
            {children()}
        </button>
    }
}
