//! Leptos application: one guarded catch-all route.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use frontdesk_auth::{Identity, ModeResolver};
use frontdesk_core::Role;
use leptos::*;
use leptos_router::*;

use crate::browser::BrowserSessionStorage;
use crate::context::TabContext;

pub type SharedContext = Rc<RefCell<TabContext<BrowserSessionStorage>>>;

#[derive(Clone)]
struct Shell {
    ctx: SharedContext,
    notice: RwSignal<Option<String>>,
}

fn shell() -> Shell {
    expect_context::<Shell>()
}

/// Main application component.
#[component]
pub fn App(ctx: SharedContext) -> impl IntoView {
    provide_context(Shell {
        ctx,
        notice: create_rw_signal(None),
    });

    view! {
        <Router>
            <Header/>
            <NoticeBanner/>
            <main>
                <Routes>
                    <Route path="/*any" view=GuardedPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Runs the guard on every location change before anything renders.
#[component]
fn GuardedPage() -> impl IntoView {
    let Shell { ctx, notice } = shell();
    let location = use_location();

    move || {
        let requested = location.pathname.get();
        let nav = ctx.borrow_mut().settle(&requested);
        if nav.notice.is_some() {
            notice.set(nav.notice.clone());
        }

        if nav.redirected {
            return view! { <Redirect path=nav.path/> }.into_view();
        }

        let page = {
            let ctx = ctx.borrow();
            let routes = ctx.guard().routes();
            routes
                .resolve(&nav.path)
                .map(|route| (routes.is_login(route), route.meta.role))
        };
        match page {
            Some((true, _)) => view! { <LoginPage/> }.into_view(),
            Some((false, Some(role))) => view! { <RolePage role=role/> }.into_view(),
            _ => view! { <p>"Page not found"</p> }.into_view(),
        }
    }
}

#[component]
fn Header() -> impl IntoView {
    let Shell { ctx, .. } = shell();
    let clock = Arc::clone(ctx.borrow().clock());
    let now = create_rw_signal(clock.now());

    set_interval(move || now.set(clock.now()), Duration::from_secs(1));

    view! {
        <header>
            <h1>"Front Desk"</h1>
            <span class="clock">{move || now.get().format("%Y-%m-%d %H:%M:%S").to_string()}</span>
        </header>
    }
}

/// Dismissible access notice.
#[component]
fn NoticeBanner() -> impl IntoView {
    let Shell { notice, .. } = shell();

    move || {
        notice.get().map(|text| {
            view! {
                <div class="notice" role="alert">
                    <span>{text}</span>
                    <button on:click=move |_| notice.set(None)>"Dismiss"</button>
                </div>
            }
        })
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    let Shell { ctx, notice } = shell();
    let roles: Vec<Role> = ctx
        .borrow()
        .guard()
        .mode()
        .allowed_roles()
        .into_iter()
        .collect();
    let role = create_rw_signal(roles.first().copied().unwrap_or(Role::Guest));
    let username = create_rw_signal(String::new());
    let navigate = use_navigate();

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let identity = Identity::new(role.get()).with_username(username.get());
        let nav = ctx.borrow_mut().login(identity);
        notice.set(nav.notice);
        navigate(&nav.path, Default::default());
    };

    view! {
        <div class="login">
            <h2>"Sign in"</h2>
            <form on:submit=submit>
                <select on:change=move |ev| {
                    if let Ok(selected) = event_target_value(&ev).parse::<Role>() {
                        role.set(selected);
                    }
                }>
                    {roles
                        .iter()
                        .map(|r| {
                            let r = *r;
                            view! {
                                <option value=r.as_str() selected=move || role.get() == r>
                                    {title(r)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Name or room number"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <button type="submit">"Log in"</button>
            </form>
        </div>
    }
}

#[component]
fn RolePage(role: Role) -> impl IntoView {
    let Shell { ctx, .. } = shell();
    let navigate = use_navigate();
    let username = ctx
        .borrow()
        .session()
        .current_user()
        .and_then(|user| user.username().map(str::to_owned))
        .unwrap_or_default();

    let logout = move |_| {
        let to = ctx.borrow_mut().logout();
        navigate(to, Default::default());
    };

    view! {
        <section class=format!("page {}", role.as_str())>
            <h2>{format!("{} workspace", title(role))}</h2>
            <p class="user">{username}</p>
            <button on:click=logout>"Log out"</button>
        </section>
    }
}

fn title(role: Role) -> &'static str {
    match role {
        Role::Guest => "Guest",
        Role::Clerk => "Front desk",
        Role::Manager => "Manager",
    }
}
