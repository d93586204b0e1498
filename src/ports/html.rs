// src/ports/html.rs
use crate::domain::Companion;
use crate::ports::library::{EMPTY_MESSAGE, ERROR_GUIDANCE, ERROR_MESSAGE};
use crate::ports::{LibraryPage, LibraryState};
use crate::ui::delete_control::DELETE_FAILED_NOTICE;
use crate::ui::menu::CLOSE_ANIMATION;
use crate::ui::{DeleteControl, FilterControl, FilterKind, NavMenu, NAV_ITEMS};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use tracing::instrument;

pub const LIBRARY_PATH: &str = "/companions";
const EMPTY_LIST_MESSAGE: &str = "No recent sessions found";

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 1200px;
            margin: 0 auto;
            padding: 0 1rem 2rem;
        }
        .navbar { display: flex; justify-content: space-between; align-items: center; padding: 1rem 0; }
        .navbar nav a { margin-left: 2rem; color: inherit; text-decoration: none; }
        .navbar nav a.active { font-weight: 600; color: #fe5933; }
        .btn-signin { border: 1px solid black; border-radius: 9999px; padding: 0.25rem 1.25rem; }
        .library-header { display: flex; justify-content: space-between; gap: 1rem; flex-wrap: wrap; }
        .filters { display: flex; gap: 1rem; }
        .filters select, .filters input { border: 1px solid black; border-radius: 0.5rem; padding: 0.25rem 0.5rem; }
        .companions-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1rem; margin-top: 2rem; }
        .companion-card { border: 1px solid black; border-radius: 1rem; padding: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
        .subject-badge { background: black; color: white; border-radius: 1rem; padding: 0.1rem 0.75rem; width: fit-content; font-size: 0.875rem; }
        .subject-icon { display: flex; align-items: center; justify-content: center; border-radius: 0.5rem; width: 72px; height: 72px; }
        .state-message { text-align: center; padding: 2rem 0; grid-column: 1 / -1; }
        .state-message .guidance { font-size: 0.875rem; color: #6b7280; }
        .delete-control { display: flex; gap: 0.5rem; }
        .delete-control button { border-radius: 0.375rem; padding: 0.25rem 0.75rem; border: 1px solid #dc2626; }
        .delete-control [data-action="request"] { background: #dc2626; color: white; }
        .delete-control [data-action="cancel"] { background: white; color: black; border-color: #d1d5db; }
        .delete-control[data-state="deleting"] button { opacity: 0.6; cursor: progress; }
        table { width: 100%; border-collapse: collapse; }
        th, td { padding: 0.75rem; border-bottom: 1px solid #eee; text-align: left; }
        .text-right { text-align: right; }
        .menu-toggle { display: none; flex-direction: column; justify-content: center; gap: 0.375rem; width: 2rem; height: 2rem; background: none; border: 0; cursor: pointer; z-index: 60; }
        .menu-toggle span { display: block; width: 1.5rem; height: 2px; background: black; transition: all 0.3s ease-in-out; }
        .menu-toggle.open span:nth-child(1) { transform: translateY(0.5rem) rotate(45deg); }
        .menu-toggle.open span:nth-child(2) { opacity: 0; }
        .menu-toggle.open span:nth-child(3) { transform: translateY(-0.5rem) rotate(-45deg); }
        .menu-overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.2); z-index: 40; }
        @keyframes menu-slide-down { from { transform: translateY(-100%); } to { transform: translateY(0); } }
        @keyframes menu-slide-up { from { transform: translateY(0); } to { transform: translateY(-100%); } }
        @media (max-width: 1023px) {
            .menu-toggle { display: flex; }
            .navbar nav { display: none; }
            .navbar nav[data-open="true"] { display: flex; flex-direction: column; gap: 1rem; position: fixed; top: 0; left: 0; right: 0; padding: 4rem 1.5rem 1.5rem; background: rgba(255, 255, 255, 0.95); z-index: 50; animation: menu-slide-down 0.3s ease-out; }
            .navbar nav[data-animating="true"] { animation: menu-slide-up 0.3s ease-in forwards; }
            .navbar nav a { margin-left: 0; }
        }
"#;

/// Client half of the mobile menu; mirrors `ui::NavMenu`. Following a link
/// is a route change and closes an open menu.
const MENU_SCRIPT: &str = r#"
        (function () {
            var nav = document.getElementById('nav-menu');
            var toggle = document.querySelector('.menu-toggle');
            var overlay = document.querySelector('.menu-overlay');
            if (!nav || !toggle || !overlay) { return; }
            var closeMs = parseInt(nav.dataset.closeMs, 10);
            var isOpen = nav.dataset.open === 'true';
            var isAnimating = nav.dataset.animating === 'true';
            function paint() {
                nav.dataset.open = String(isOpen);
                nav.dataset.animating = String(isAnimating);
                toggle.setAttribute('aria-expanded', String(isOpen));
                toggle.classList.toggle('open', isOpen);
                overlay.hidden = !isOpen;
            }
            function close() {
                if (isAnimating) { return; }
                isAnimating = true; paint();
                setTimeout(function () { isOpen = false; isAnimating = false; paint(); }, closeMs);
            }
            toggle.addEventListener('click', function () {
                if (!isAnimating) { isOpen = !isOpen; paint(); }
            });
            overlay.addEventListener('click', close);
            nav.querySelectorAll('a').forEach(function (link) {
                link.addEventListener('click', function () { if (isOpen) { close(); } });
            });
        })();
"#;

/// Client half of the delete control; mirrors `ui::DeleteControl`.
const DELETE_SCRIPT: &str = r#"
        document.querySelectorAll('.delete-control').forEach(function (el) {
            var state = 'idle';
            var id = el.dataset.companionId;
            var name = el.dataset.companionName;
            var primary = el.querySelector('[data-action="request"]');
            var cancel = el.querySelector('[data-action="cancel"]');
            function paint() {
                el.dataset.state = state;
                primary.textContent = state === 'idle' ? 'Delete'
                    : state === 'deleting' ? 'Deleting...' : 'Delete "' + name + '"';
                primary.disabled = state === 'deleting';
                cancel.hidden = state === 'idle';
                cancel.disabled = state === 'deleting';
            }
            primary.addEventListener('click', function () {
                if (state === 'idle') { state = 'confirm'; paint(); return; }
                if (state !== 'confirm') { return; }
                state = 'deleting'; paint();
                fetch('/api/companions/' + encodeURIComponent(id), { method: 'DELETE' })
                    .then(function (r) { if (!r.ok) { throw new Error(r.status); } window.location.reload(); })
                    .catch(function () { state = 'idle'; paint(); alert(el.dataset.failedNotice); });
            });
            cancel.addEventListener('click', function () {
                if (state === 'confirm') { state = 'idle'; paint(); }
            });
        });
"#;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Full library page for one of the three list states
    #[instrument(level = "debug", skip(self, page), fields(signed_in = page.signed_in))]
    pub fn render_library(&self, page: &LibraryPage) -> String {
        let (filters, grid) = match &page.state {
            LibraryState::Populated(companions) => (
                self.render_filters(&page.query),
                companions
                    .iter()
                    .map(|c| self.render_card(c, page.signed_in))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            LibraryState::Empty => (
                self.render_filters(&page.query),
                format!(r#"<div class="state-message"><p>{EMPTY_MESSAGE}</p></div>"#),
            ),
            LibraryState::Failed => (
                r#"<div class="filters">Filters</div>"#.to_string(),
                format!(
                    r#"<div class="state-message error"><p>{ERROR_MESSAGE}</p><p class="guidance">{ERROR_GUIDANCE}</p></div>"#
                ),
            ),
        };

        let body = format!(
            r#"{navbar}
    <main>
        <section class="library-header">
            <h1>Companion Library</h1>
            {filters}
        </section>
        <section class="companions-grid">
{grid}
        </section>
    </main>"#,
            navbar = self.render_navbar(LIBRARY_PATH, page.signed_in),
        );

        document("Companion Library", &body)
    }

    /// Table of companions, optionally with a delete control per row
    pub fn render_companions_list(
        &self,
        title: &str,
        companions: &[Companion],
        show_delete_buttons: bool,
    ) -> String {
        let actions_head = if show_delete_buttons {
            r#"<th class="text-right">Actions</th>"#
        } else {
            ""
        };

        let rows = if companions.is_empty() {
            let colspan = if show_delete_buttons { 4 } else { 3 };
            format!(
                r#"<tr><td colspan="{colspan}" class="state-message">{EMPTY_LIST_MESSAGE}</td></tr>"#
            )
        } else {
            companions
                .iter()
                .map(|c| {
                    let actions = if show_delete_buttons {
                        format!(
                            r#"<td class="text-right">{}</td>"#,
                            self.render_delete_control(&DeleteControl::new(&c.id, &c.name))
                        )
                    } else {
                        String::new()
                    };
                    format!(
                        r#"<tr>
                <td><a href="/companions/{id}"><div class="subject-icon" style="background-color: {color}"><img src="{icon}" alt="{subject}" width="35" height="35"></div><p><strong>{name}</strong></p><p>{topic}</p></a></td>
                <td><div class="subject-badge">{subject}</div></td>
                <td class="text-right">{duration} mins</td>
                {actions}
            </tr>"#,
                        id = attr(&c.id),
                        color = c.subject.color(),
                        icon = c.subject.icon_path(),
                        subject = c.subject,
                        name = text(&c.name),
                        topic = text(&c.topic),
                        duration = c.duration,
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            r#"<article class="companion-list">
    <h2>{title}</h2>
    <table>
        <thead><tr><th>Lessons</th><th>Subject</th><th class="text-right">Duration</th>{actions_head}</tr></thead>
        <tbody>
            {rows}
        </tbody>
    </table>
</article>"#,
            title = text(title),
        )
    }

    /// Standalone document wrapping the companions table
    pub fn render_list_document(&self, title: &str, companions: &[Companion]) -> String {
        document(title, &self.render_companions_list(title, companions, false))
    }

    /// Markup for a delete control in its current state
    pub fn render_delete_control(&self, control: &DeleteControl) -> String {
        let view = control.view();
        let state = match control.state() {
            crate::ui::DeleteState::Idle => "idle",
            crate::ui::DeleteState::ConfirmPending => "confirm",
            crate::ui::DeleteState::Deleting => "deleting",
        };

        format!(
            r#"<div class="delete-control" data-state="{state}" data-companion-id="{id}" data-companion-name="{name}" data-failed-notice="{notice}" aria-busy="{busy}">
                <button type="button" data-action="request"{primary_disabled}>{label}</button>
                <button type="button" data-action="cancel"{cancel_hidden}{cancel_disabled}>Cancel</button>
            </div>"#,
            id = attr(control.companion_id()),
            name = attr(control.companion_name()),
            notice = attr(DELETE_FAILED_NOTICE),
            busy = view.busy,
            primary_disabled = if view.primary_disabled { " disabled" } else { "" },
            label = text(&view.primary_label),
            cancel_hidden = if view.show_cancel { "" } else { " hidden" },
            cancel_disabled = if view.cancel_disabled { " disabled" } else { "" },
        )
    }

    fn render_card(&self, companion: &Companion, show_delete: bool) -> String {
        let delete = if show_delete {
            self.render_delete_control(&DeleteControl::new(&companion.id, &companion.name))
        } else {
            String::new()
        };

        format!(
            r#"<article class="companion-card" style="background-color: {color}">
                <div class="subject-badge">{subject}</div>
                <h2>{name}</h2>
                <p>{topic}</p>
                <p><img src="/icons/clock.svg" alt="duration" width="13.5" height="13.5"> {duration} mins</p>
                <a href="/companions/{id}">Launch Lesson</a>
                {delete}
            </article>"#,
            color = companion.subject.color(),
            subject = companion.subject,
            name = text(&companion.name),
            topic = text(&companion.topic),
            duration = companion.duration,
            id = attr(&companion.id),
        )
    }

    /// Filter form; the server canonicalizes whatever it submits
    fn render_filters(&self, query: &str) -> String {
        let controls = [FilterControl::topic(), FilterControl::subject()]
            .iter()
            .map(|control| {
                let current = control.displayed(query);
                match &control.kind {
                    FilterKind::Search => format!(
                        r#"<input type="search" name="{key}" value="{value}" placeholder="{placeholder}">"#,
                        key = control.key,
                        value = attr(&current),
                        placeholder = attr(control.placeholder),
                    ),
                    FilterKind::Select { options } => {
                        let options = options
                            .iter()
                            .map(|o| {
                                let selected = if o.value == current { " selected" } else { "" };
                                format!(
                                    r#"<option value="{}"{selected}>{}</option>"#,
                                    attr(&o.value),
                                    text(&o.label)
                                )
                            })
                            .collect::<Vec<_>>()
                            .join("");
                        format!(
                            r#"<select name="{key}" aria-label="{placeholder}" onchange="this.form.submit()">{options}</select>"#,
                            key = control.key,
                            placeholder = attr(control.placeholder),
                        )
                    }
                }
            })
            .collect::<Vec<_>>()
            .join("\n                ");

        format!(
            r#"<form class="filters" method="get" action="{LIBRARY_PATH}">
                {controls}
            </form>"#
        )
    }

    fn render_navbar(&self, pathname: &str, signed_in: bool) -> String {
        self.render_navbar_with_menu(pathname, signed_in, &NavMenu::default())
    }

    /// Navbar with the mobile menu toggle and overlay in `menu`'s state
    pub fn render_navbar_with_menu(&self, pathname: &str, signed_in: bool, menu: &NavMenu) -> String {
        let links = NAV_ITEMS
            .iter()
            .map(|item| {
                let class = if item.is_active(pathname) { r#" class="active""# } else { "" };
                format!(r#"<a href="{}"{class}>{}</a>"#, item.href, item.label)
            })
            .collect::<Vec<_>>()
            .join("");
        let session = if signed_in {
            r#"<span class="user">Signed in</span>"#
        } else {
            r#"<a class="btn-signin" href="/sign-in">Sign In</a>"#
        };

        format!(
            r#"<header class="navbar">
        <a href="/"><img src="/images/logo.svg" alt="logo" width="46" height="44"></a>
        <button type="button" class="menu-toggle{toggle_class}" aria-label="Toggle menu" aria-controls="nav-menu" aria-expanded="{open}"><span></span><span></span><span></span></button>
        <nav id="nav-menu" data-open="{open}" data-animating="{animating}" data-close-ms="{close_ms}">{links}{session}</nav>
        <div class="menu-overlay"{overlay_hidden}></div>
    </header>"#,
            open = menu.is_open(),
            animating = menu.is_animating(),
            close_ms = CLOSE_ANIMATION.as_millis(),
            toggle_class = if menu.is_open() { " open" } else { "" },
            overlay_hidden = if menu.is_open() { "" } else { " hidden" },
        )
    }
}

fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {body}
    <script>{DELETE_SCRIPT}{MENU_SCRIPT}</script>
</body>
</html>"#,
        title = text(title),
    )
}
