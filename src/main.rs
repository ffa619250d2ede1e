mod api;
mod card;
mod content;
mod content_view;
mod dates;
mod models;
mod sanitize;
mod session;
mod theme;

#[cfg(test)]
mod scroll_tests;

use std::sync::Arc;
use std::time::Duration;

use api::{ApiConfig, ApiError, ArticlesClient};
use card::{ArticleCard, ArticleDetail, ViewerContext};
use gpui::prelude::*;
use gpui::{
    div, hsla, img, point, px, rems, size, App, AppContext, AsyncWindowContext, Bounds, ElementId,
    FocusHandle, FontWeight, IntoElement, ObjectFit, Render, Task, TitlebarOptions, ViewContext,
    WeakView, WindowBounds, WindowOptions,
};
use models::Article;
use reqwest_client::ReqwestClient;
use session::SessionStore;
use theme::Theme;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Hauteur réservée aux "traffic lights" macOS.
const TITLEBAR_HEIGHT: f32 = 38.0;
const SIDEBAR_WIDTH: f32 = 56.0;
const LIST_PANE_WIDTH: f32 = 380.0;
const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Accueil,
    Blog,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Accueil => "Accueil",
            Section::Blog => "Blog",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Section::Accueil => "À la une",
            Section::Blog => "Gestion des actualités",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Section::Accueil => "Æ",
            Section::Blog => "✎",
        }
    }

    fn is_home(self) -> bool {
        self == Section::Accueil
    }
}

/// One load cycle of the article list. Every view activation starts a fresh
/// cycle; terminal states are `Ready`, `Empty` or `Error`.
enum ListState {
    Loading { indicator_visible: bool },
    Ready,
    Empty,
    Error(ApiError),
}

struct DetailSession {
    id: String,
    state: DetailState,
}

enum DetailState {
    Loading { indicator_visible: bool },
    Ready(Box<ArticleDetail>),
    Error(ApiError),
}

#[derive(Clone)]
struct PendingDelete {
    id: String,
    title: String,
}

// Application State
struct AppState {
    theme: Theme,
    section: Section,
    articles: Vec<Article>,
    cards: Vec<ArticleCard>,
    list_state: ListState,
    /// Monotonic load-cycle id. Timers and responses from a superseded cycle
    /// compare against it and drop themselves instead of touching the view.
    load_cycle: usize,
    /// Dropping these aborts the in-flight requests and pending timers of the
    /// cycle they belong to; reassigning them is the cancellation.
    load_task: Option<Task<()>>,
    indicator_task: Option<Task<()>>,
    detail: Option<DetailSession>,
    detail_task: Option<Task<()>>,
    detail_indicator_task: Option<Task<()>>,
    pending_delete: Option<PendingDelete>,
    notice: Option<String>,
    notice_epoch: usize,
    session: SessionStore,
    session_token: Option<String>,
    client: Arc<ArticlesClient>,
    focus_handle: FocusHandle,
}

impl AppState {
    fn new(cx: &mut ViewContext<Self>) -> Self {
        let focus_handle = cx.focus_handle();
        let http_client = cx.app().http_client();
        let session = SessionStore::from_env();
        let session_token = session.get_token();
        Self {
            theme: Theme::default(),
            section: Section::Accueil,
            articles: Vec::new(),
            cards: Vec::new(),
            list_state: ListState::Loading {
                indicator_visible: false,
            },
            load_cycle: 0,
            load_task: None,
            indicator_task: None,
            detail: None,
            detail_task: None,
            detail_indicator_task: None,
            pending_delete: None,
            notice: None,
            notice_epoch: 0,
            session,
            session_token,
            client: Arc::new(ArticlesClient::new(http_client, ApiConfig::from_env())),
            focus_handle,
        }
    }

    fn viewer_context(&self) -> ViewerContext {
        ViewerContext {
            is_authenticated: self.session_token.is_some(),
            is_home_view: self.section.is_home(),
        }
    }

    fn rebuild_cards(&mut self) {
        let viewer = self.viewer_context();
        self.cards = self
            .articles
            .iter()
            .map(|article| card::build_card(article, viewer))
            .collect();
    }

    fn select_section(&mut self, section: Section, cx: &mut ViewContext<Self>) {
        if self.section == section {
            return;
        }
        self.section = section;
        self.detail = None;
        self.detail_task = None;
        self.detail_indicator_task = None;
        self.pending_delete = None;
        self.load_articles(cx);
    }

    fn load_articles(&mut self, cx: &mut ViewContext<Self>) {
        self.load_cycle += 1;
        let cycle = self.load_cycle;
        self.articles.clear();
        self.cards.clear();
        self.list_state = ListState::Loading {
            indicator_visible: false,
        };
        cx.notify();

        let client = self.client.clone();
        let loading_delay = client.config().loading_delay;
        let request_timeout = client.config().request_timeout;

        // Delayed "Chargement…" indicator: only shown when the fetch has not
        // resolved within the delay window, so fast responses never flicker.
        self.indicator_task = Some(cx.spawn(
            |this: WeakView<Self>, mut cx: AsyncWindowContext| async move {
                cx.background_executor().timer(loading_delay).await;
                let _ = this.update(&mut cx, |this: &mut Self, cx: &mut ViewContext<Self>| {
                    if this.load_cycle != cycle {
                        return;
                    }
                    if let ListState::Loading { indicator_visible } = &mut this.list_state {
                        *indicator_visible = true;
                        cx.notify();
                    }
                });
            },
        ));

        self.load_task = Some(cx.spawn(
            |this: WeakView<Self>, mut cx: AsyncWindowContext| async move {
                let deadline = cx.background_executor().timer(request_timeout);
                let result = api::with_timeout(client.fetch_articles(), deadline).await;
                let _ = this.update(&mut cx, |this: &mut Self, cx: &mut ViewContext<Self>| {
                    if this.load_cycle != cycle {
                        return;
                    }
                    // The indicator is pointless once the cycle resolved.
                    this.indicator_task = None;
                    match result {
                        Ok(mut articles) => {
                            dates::sort_newest_first(&mut articles);
                            this.articles = articles;
                            this.rebuild_cards();
                            this.list_state = if this.cards.is_empty() {
                                ListState::Empty
                            } else {
                                ListState::Ready
                            };
                        }
                        Err(error) => {
                            tracing::error!(%error, "échec de récupération des actualités");
                            this.list_state = ListState::Error(error);
                        }
                    }
                    cx.notify();
                });
            },
        ));
    }

    fn open_detail(&mut self, id: Option<String>, cx: &mut ViewContext<Self>) {
        // The detail view cannot render without an id: close it and stay on
        // the list, without issuing any request.
        let Some(id) = id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
        else {
            self.close_detail(cx);
            return;
        };

        self.detail = Some(DetailSession {
            id: id.clone(),
            state: DetailState::Loading {
                indicator_visible: false,
            },
        });
        cx.notify();

        let client = self.client.clone();
        let loading_delay = client.config().loading_delay;
        let request_timeout = client.config().request_timeout;
        let indicator_id = id.clone();

        self.detail_indicator_task = Some(cx.spawn(
            |this: WeakView<Self>, mut cx: AsyncWindowContext| async move {
                cx.background_executor().timer(loading_delay).await;
                let _ = this.update(&mut cx, |this: &mut Self, cx: &mut ViewContext<Self>| {
                    let Some(session) = this.detail.as_mut() else {
                        return;
                    };
                    if session.id != indicator_id {
                        return;
                    }
                    if let DetailState::Loading { indicator_visible } = &mut session.state {
                        *indicator_visible = true;
                        cx.notify();
                    }
                });
            },
        ));

        self.detail_task = Some(cx.spawn(
            |this: WeakView<Self>, mut cx: AsyncWindowContext| async move {
                let deadline = cx.background_executor().timer(request_timeout);
                let result = api::with_timeout(client.fetch_article(&id), deadline).await;
                let _ = this.update(&mut cx, |this: &mut Self, cx: &mut ViewContext<Self>| {
                    let Some(session) = this.detail.as_mut() else {
                        return;
                    };
                    if session.id != id {
                        return;
                    }
                    this.detail_indicator_task = None;
                    session.state = match result {
                        Ok(article) => DetailState::Ready(Box::new(card::build_detail(&article))),
                        Err(error) => DetailState::Error(error),
                    };
                    cx.notify();
                });
            },
        ));
    }

    fn close_detail(&mut self, cx: &mut ViewContext<Self>) {
        self.detail = None;
        // Abort whatever the closed session still had in flight.
        self.detail_task = None;
        self.detail_indicator_task = None;
        cx.notify();
    }

    fn request_delete(&mut self, id: String, cx: &mut ViewContext<Self>) {
        if self.session_token.is_none() {
            self.show_notice(
                "Vous devez être connecté pour supprimer.".to_string(),
                cx,
            );
            return;
        }
        let title = self
            .cards
            .iter()
            .find(|card| card.id.as_deref() == Some(id.as_str()))
            .map(|card| card.title.clone())
            .unwrap_or_else(|| card::PLACEHOLDER_TITLE.to_string());
        self.pending_delete = Some(PendingDelete { id, title });
        cx.notify();
    }

    fn cancel_delete(&mut self, cx: &mut ViewContext<Self>) {
        self.pending_delete = None;
        cx.notify();
    }

    fn confirm_delete(&mut self, cx: &mut ViewContext<Self>) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        let Some(token) = self.session_token.clone() else {
            self.show_notice("Votre session a expiré.".to_string(), cx);
            return;
        };
        cx.notify();

        let client = self.client.clone();
        let request_timeout = client.config().request_timeout;

        cx.spawn(
            |this: WeakView<Self>, mut cx: AsyncWindowContext| async move {
                let deadline = cx.background_executor().timer(request_timeout);
                let result =
                    api::with_timeout(client.delete_article(&pending.id, &token), deadline).await;
                let _ = this.update(&mut cx, |this: &mut Self, cx: &mut ViewContext<Self>| {
                    match result {
                        Ok(()) => this.remove_article(&pending.id, cx),
                        Err(error) => {
                            tracing::warn!(id = %pending.id, %error, "échec de la suppression");
                            this.show_notice(delete_error_message(&error), cx);
                        }
                    }
                });
            },
        )
        .detach();
    }

    /// Incremental removal after a successful DELETE: exactly one card goes
    /// away, the list is never refetched, and draining the last card lands
    /// in the `Empty` state.
    fn remove_article(&mut self, id: &str, cx: &mut ViewContext<Self>) {
        if let Some(ix) = self
            .cards
            .iter()
            .position(|card| card.id.as_deref() == Some(id))
        {
            self.cards.remove(ix);
            self.articles.remove(ix);
        }
        if matches!(self.list_state, ListState::Ready) && self.cards.is_empty() {
            self.list_state = ListState::Empty;
        }
        if self.detail.as_ref().is_some_and(|session| session.id == id) {
            self.detail = None;
            self.detail_task = None;
            self.detail_indicator_task = None;
        }
        cx.notify();
    }

    fn show_notice(&mut self, message: String, cx: &mut ViewContext<Self>) {
        self.notice_epoch += 1;
        let epoch = self.notice_epoch;
        self.notice = Some(message);
        cx.notify();

        cx.spawn(
            |this: WeakView<Self>, mut cx: AsyncWindowContext| async move {
                cx.background_executor().timer(NOTICE_TTL).await;
                let _ = this.update(&mut cx, |this: &mut Self, cx: &mut ViewContext<Self>| {
                    if this.notice_epoch == epoch {
                        this.notice = None;
                        cx.notify();
                    }
                });
            },
        )
        .detach();
    }

    fn logout(&mut self, cx: &mut ViewContext<Self>) {
        self.session.clear_token();
        self.session_token = None;
        self.pending_delete = None;
        self.rebuild_cards();
        cx.notify();
    }
}

fn list_error_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::Timeout => "Temps de réponse dépassé. Réessaie plus tard.",
        _ => "Impossible de récupérer les actualités. Réessayez plus tard.",
    }
}

fn detail_error_message(error: &ApiError, id: &str) -> String {
    match error {
        ApiError::Timeout => "Temps de réponse dépassé. Réessaie plus tard.".to_string(),
        _ => format!("Impossible de charger l'article (ID={id})."),
    }
}

fn delete_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Timeout => "Suppression impossible : temps de réponse dépassé.".to_string(),
        ApiError::Http(status @ (401 | 403)) => {
            format!("Suppression refusée (HTTP {status}). Votre session n'est plus valide.")
        }
        ApiError::Http(404) => "Article introuvable.".to_string(),
        ApiError::Http(status) => format!("Suppression impossible (HTTP {status})."),
        _ => "Erreur réseau pendant la suppression.".to_string(),
    }
}

impl Render for AppState {
    fn render(&mut self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .size_full()
            .relative()
            .flex()
            .flex_row()
            .bg(theme.bg_primary)
            .text_color(theme.text_primary)
            .font_family(".SystemUIFont")
            .track_focus(&self.focus_handle)
            // Sidebar
            .child(self.render_sidebar(cx))
            // Article list
            .child(self.render_list_pane(cx))
            // Detail panel
            .child(self.render_detail_panel(cx))
            // Delete confirmation
            .when_some(self.pending_delete.clone(), |this, pending| {
                this.child(self.render_confirm_overlay(&pending, cx))
            })
    }
}

impl AppState {
    fn render_sidebar(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let hover_bg = theme.bg_hover;

        div()
            .w(px(SIDEBAR_WIDTH))
            .h_full()
            .flex()
            .flex_col()
            .items_center()
            .bg(theme.bg_secondary)
            .border_r_1()
            .border_color(theme.border_subtle)
            // Space for the traffic lights
            .child(div().h(px(TITLEBAR_HEIGHT)).w_full().flex_shrink_0())
            .child(self.render_section_button(Section::Accueil, cx))
            .child(self.render_section_button(Section::Blog, cx))
            .child(div().flex_1())
            .when(self.session_token.is_some(), |this| {
                this.child(
                    div()
                        .id("logout-btn")
                        .mb_4()
                        .w(px(40.))
                        .h(px(40.))
                        .flex()
                        .items_center()
                        .justify_center()
                        .rounded_lg()
                        .cursor_pointer()
                        .text_color(theme.text_secondary)
                        .hover(move |s| s.bg(hover_bg))
                        .on_click(cx.listener(|this, _event, cx| this.logout(cx)))
                        .child("⎋"),
                )
            })
    }

    fn render_section_button(
        &self,
        section: Section,
        cx: &mut ViewContext<Self>,
    ) -> impl IntoElement {
        let theme = &self.theme;
        let is_selected = self.section == section;
        let bg = if is_selected {
            theme.accent
        } else {
            theme.bg_tertiary
        };
        let fg = if is_selected {
            hsla(0., 0., 1., 1.0)
        } else {
            theme.text_secondary
        };
        let hover_bg = theme.bg_hover;

        div()
            .id(ElementId::Name(format!("section-{}", section.name()).into()))
            .mt_2()
            .w(px(40.))
            .h(px(40.))
            .flex()
            .items_center()
            .justify_center()
            .rounded_lg()
            .bg(bg)
            .text_color(fg)
            .text_lg()
            .font_weight(FontWeight::BOLD)
            .cursor_pointer()
            .when(!is_selected, |this| this.hover(move |s| s.bg(hover_bg)))
            .on_click(cx.listener(move |this, _event, cx| {
                this.select_section(section, cx);
            }))
            .child(section.icon())
    }

    fn render_list_pane(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .w(px(LIST_PANE_WIDTH))
            .flex_shrink_0()
            .h_full()
            .flex()
            .flex_col()
            .bg(theme.bg_secondary)
            .border_r_1()
            .border_color(theme.border_subtle)
            // Header with titlebar spacing
            .child(
                div()
                    .w_full()
                    .h(px(TITLEBAR_HEIGHT + 52.))
                    .flex()
                    .flex_col()
                    .border_b_1()
                    .border_color(theme.border_subtle)
                    .child(div().h(px(TITLEBAR_HEIGHT)).w_full().flex_shrink_0())
                    .child(
                        div()
                            .flex_1()
                            .flex()
                            .items_center()
                            .justify_between()
                            .px_4()
                            .child(
                                div()
                                    .text_base()
                                    .font_weight(FontWeight::SEMIBOLD)
                                    .child(self.section.title()),
                            )
                            .child(if self.session_token.is_some() {
                                div()
                                    .text_xs()
                                    .text_color(theme.success)
                                    .child("Connecté")
                            } else {
                                div()
                                    .text_xs()
                                    .text_color(theme.text_muted)
                                    .child("Lecture seule")
                            }),
                    ),
            )
            // Transient notice (delete failures, auth hints)
            .when_some(self.notice.clone(), |this, notice| {
                this.child(
                    div()
                        .w_full()
                        .px_4()
                        .py_2()
                        .bg(theme.warning)
                        .text_color(hsla(0., 0., 0.12, 1.0))
                        .text_sm()
                        .whitespace_normal()
                        .child(notice),
                )
            })
            // Cards, or the current cycle status
            .child(
                div()
                    .id("article-list")
                    .flex_1()
                    .overflow_y_scroll()
                    .children(match &self.list_state {
                        ListState::Loading { indicator_visible } => {
                            if *indicator_visible {
                                vec![self.render_loading_indicator().into_any_element()]
                            } else {
                                Vec::new()
                            }
                        }
                        ListState::Empty => vec![self
                            .render_status("Aucune actualité disponible.", theme.text_muted)
                            .into_any_element()],
                        ListState::Error(error) => vec![self
                            .render_status(list_error_message(error), theme.error)
                            .into_any_element()],
                        ListState::Ready => self
                            .cards
                            .iter()
                            .enumerate()
                            .map(|(ix, card)| self.render_card_row(ix, card, cx).into_any_element())
                            .collect(),
                    }),
            )
    }

    fn render_status(&self, message: &'static str, color: gpui::Hsla) -> impl IntoElement {
        div()
            .w_full()
            .px_4()
            .py_4()
            .text_sm()
            .text_color(color)
            .whitespace_normal()
            .child(message)
    }

    fn render_loading_indicator(&self) -> impl IntoElement {
        let theme = &self.theme;

        let skeleton_bar = |max_w: f32, h: f32| {
            div()
                .h(px(h))
                .w_full()
                .max_w(px(max_w))
                .rounded(px(3.))
                .bg(theme.bg_tertiary)
        };

        let placeholders: Vec<_> = (0..8)
            .map(|i| {
                let title_max_w = match i % 3 {
                    0 => 300.0,
                    1 => 250.0,
                    _ => 210.0,
                };

                div()
                    .w_full()
                    .px_4()
                    .py_3()
                    .border_b_1()
                    .border_color(theme.border_subtle)
                    .child(
                        div()
                            .w_full()
                            .flex()
                            .flex_col()
                            .gap_2()
                            .child(skeleton_bar(title_max_w, 14.0))
                            .child(div().w_full().flex().gap_2().children(vec![
                                skeleton_bar(110.0, 10.0).into_any_element(),
                                skeleton_bar(80.0, 10.0).into_any_element(),
                            ])),
                    )
                    .into_any_element()
            })
            .collect();

        div()
            .w_full()
            .h_full()
            .flex()
            .flex_col()
            .child(
                div()
                    .w_full()
                    .px_4()
                    .py_4()
                    .flex()
                    .items_center()
                    .gap_2()
                    .text_color(theme.text_muted)
                    .child("⏳")
                    .child("Chargement…"),
            )
            .children(placeholders)
    }

    fn render_card_row(
        &self,
        ix: usize,
        card: &ArticleCard,
        cx: &mut ViewContext<Self>,
    ) -> impl IntoElement {
        let theme = &self.theme;
        // The card id is the stable handle used by the delete flow; a card
        // without one still gets a distinct element id from its position.
        let element_id = match &card.id {
            Some(id) => format!("article-{id}"),
            None => format!("article-ix-{ix}"),
        };
        let is_selected = match (&self.detail, &card.id) {
            (Some(session), Some(id)) => session.id == *id,
            _ => false,
        };

        let bg_color = if is_selected {
            theme.bg_selected
        } else {
            theme.bg_secondary
        };
        let hover_bg = theme.bg_hover;
        let text_muted = theme.text_muted;

        let card_id = card.id.clone();
        let action_id = card.id.clone();
        let title = card.title.clone();
        let date = card.date.clone();
        let excerpt = card.excerpt.clone();
        let body = card.body.clone();
        let show_actions = card.show_actions;
        let opens_detail = card.opens_detail();

        div()
            .id(ElementId::Name(element_id.into()))
            .w_full()
            .px_4()
            .py_3()
            .bg(bg_color)
            .border_b_1()
            .border_color(theme.border_subtle)
            .when(opens_detail, |this| {
                let card_id = card_id.clone();
                this.cursor_pointer()
                    .hover(move |s| s.bg(hover_bg))
                    .on_click(cx.listener(move |this, _event, cx| {
                        this.open_detail(card_id.clone(), cx);
                    }))
            })
            .child(
                div()
                    .w_full()
                    .overflow_hidden()
                    .flex()
                    .flex_col()
                    .gap_1()
                    // Title: plain heading when there is no id to navigate to
                    .child(
                        div()
                            .w_full()
                            .text_sm()
                            .font_weight(FontWeight::MEDIUM)
                            .line_height(rems(1.4))
                            .whitespace_normal()
                            .child(title),
                    )
                    // Excerpt
                    .children(
                        excerpt
                            .iter()
                            .enumerate()
                            .map(|(i, block)| content_view::render_content_block(theme, block, i)),
                    )
                    // Body
                    .children(
                        body.iter().enumerate().map(|(i, block)| {
                            content_view::render_content_block(theme, block, excerpt.len() + i)
                        }),
                    )
                    // Date row, only when a field resolved
                    .when_some(date, |this, date| {
                        this.child(
                            div()
                                .flex()
                                .items_center()
                                .gap_1()
                                .text_xs()
                                .text_color(text_muted)
                                .child("Publié le")
                                .child(
                                    div()
                                        .font_weight(FontWeight::SEMIBOLD)
                                        .child(date.human.clone()),
                                ),
                        )
                    })
                    // Owner actions
                    .when(show_actions, |this| {
                        this.when_some(action_id, |this, id| {
                            this.child(self.render_card_actions(id, cx))
                        })
                    }),
            )
    }

    fn render_card_actions(&self, id: String, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let theme = &self.theme;
        let accent = theme.accent;
        let accent_hover = theme.accent_hover;
        let error = theme.error;
        let edit_id = id.clone();
        let delete_id = id.clone();

        div()
            .flex()
            .items_center()
            .gap_3()
            .mt_1()
            .text_xs()
            .child(
                div()
                    .id(ElementId::Name(format!("edit-{id}").into()))
                    .cursor_pointer()
                    .text_color(accent)
                    .hover(move |s| s.text_color(accent_hover))
                    .on_click(cx.listener(move |this, _event, cx| {
                        cx.stop_propagation();
                        this.open_detail(Some(edit_id.clone()), cx);
                    }))
                    .child("Modifier"),
            )
            .child(
                div()
                    .id(ElementId::Name(format!("delete-{id}").into()))
                    .cursor_pointer()
                    .text_color(error)
                    .on_click(cx.listener(move |this, _event, cx| {
                        cx.stop_propagation();
                        this.request_delete(delete_id.clone(), cx);
                    }))
                    .child("Supprimer"),
            )
    }

    fn render_detail_panel(&self, cx: &mut ViewContext<Self>) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .flex_1()
            .min_w(px(0.))
            .h_full()
            .flex()
            .flex_col()
            .bg(theme.bg_primary)
            .overflow_hidden()
            .child(div().h(px(TITLEBAR_HEIGHT)).w_full().flex_shrink_0())
            .child(match self.detail.as_ref() {
                Some(session) => self.render_detail_session(session, cx).into_any_element(),
                None => self.render_empty_state().into_any_element(),
            })
    }

    fn render_empty_state(&self) -> impl IntoElement {
        let theme = &self.theme;

        div()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .text_color(theme.text_muted)
            .child("Sélectionnez une actualité")
    }

    fn render_detail_session(
        &self,
        session: &DetailSession,
        cx: &mut ViewContext<Self>,
    ) -> impl IntoElement {
        let theme = &self.theme;
        let text_secondary = theme.text_secondary;
        let text_primary = theme.text_primary;

        let content = match &session.state {
            DetailState::Loading { indicator_visible } => {
                if *indicator_visible {
                    self.render_detail_loading().into_any_element()
                } else {
                    div().flex_1().into_any_element()
                }
            }
            DetailState::Error(error) => self
                .render_detail_error(error, &session.id, cx)
                .into_any_element(),
            DetailState::Ready(detail) => self.render_article_detail(detail).into_any_element(),
        };

        div()
            .id("detail-pane")
            .flex_1()
            .min_h(px(0.))
            .w_full()
            .min_w(px(0.))
            .flex()
            .flex_col()
            .overflow_hidden()
            .child(
                div()
                    .w_full()
                    .flex_shrink_0()
                    .px_6()
                    .py_4()
                    .bg(theme.bg_secondary)
                    .border_b_1()
                    .border_color(theme.border)
                    .child(
                        div()
                            .id("detail-back")
                            .cursor_pointer()
                            .text_sm()
                            .text_color(text_secondary)
                            .hover(move |s| s.text_color(text_primary))
                            .on_click(cx.listener(|this, _event, cx| {
                                this.close_detail(cx);
                            }))
                            .child("← Retour aux actualités"),
                    ),
            )
            .child(content)
    }

    fn render_detail_loading(&self) -> impl IntoElement {
        let theme = &self.theme;

        let skeleton_bar = |max_w: f32, h: f32| {
            div()
                .h(px(h))
                .w_full()
                .max_w(px(max_w))
                .rounded(px(3.))
                .bg(theme.bg_tertiary)
        };

        let placeholders: Vec<_> = (0..8)
            .map(|i| {
                let line_w = match i % 4 {
                    0 => 640.0,
                    1 => 720.0,
                    2 => 680.0,
                    _ => 560.0,
                };
                skeleton_bar(line_w, 12.0).into_any_element()
            })
            .collect();

        div()
            .flex_1()
            .w_full()
            .flex()
            .justify_center()
            .child(
                div()
                    .w_full()
                    .max_w(px(760.))
                    .px_8()
                    .py_10()
                    .flex()
                    .flex_col()
                    .gap_6()
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .text_color(theme.text_muted)
                            .child("⏳")
                            .child("Chargement…"),
                    )
                    .child(
                        div()
                            .w_full()
                            .flex()
                            .flex_col()
                            .gap_3()
                            .children(placeholders),
                    ),
            )
    }

    fn render_detail_error(
        &self,
        error: &ApiError,
        id: &str,
        cx: &mut ViewContext<Self>,
    ) -> impl IntoElement {
        let theme = &self.theme;
        let accent_hover = theme.accent_hover;
        let retry_id = id.to_string();
        let message = detail_error_message(error, id);

        div()
            .flex_1()
            .w_full()
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .w_full()
                    .max_w(px(480.))
                    .p_8()
                    .bg(theme.bg_secondary)
                    .rounded_xl()
                    .border_1()
                    .border_color(theme.border_subtle)
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap_4()
                    .child(
                        div()
                            .text_lg()
                            .font_weight(FontWeight::SEMIBOLD)
                            .child("Impossible de charger l'article"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.text_secondary)
                            .whitespace_normal()
                            .child(message),
                    )
                    .child(
                        div()
                            .id("detail-retry")
                            .cursor_pointer()
                            .rounded_md()
                            .px_4()
                            .py_2()
                            .bg(theme.accent)
                            .text_color(hsla(0., 0., 1., 1.0))
                            .text_sm()
                            .font_weight(FontWeight::MEDIUM)
                            .hover(move |s| s.bg(accent_hover))
                            .on_click(cx.listener(move |this, _event, cx| {
                                this.open_detail(Some(retry_id.clone()), cx);
                            }))
                            .child("Réessayer"),
                    ),
            )
    }

    fn render_article_detail(&self, detail: &ArticleDetail) -> impl IntoElement {
        let theme = &self.theme;
        let text_muted = theme.text_muted;
        let border_subtle = theme.border_subtle;

        let excerpt = detail.excerpt.clone();
        let body = detail.body.clone();
        let gallery = detail.gallery.clone();

        div()
            .id("article-detail-scroll")
            .flex_1()
            .min_h(px(0.))
            .w_full()
            .min_w(px(0.))
            .overflow_y_scroll()
            .overflow_x_hidden()
            .child(
                div().w_full().min_w(px(0.)).flex().justify_center().child(
                    div()
                        .w_full()
                        .min_w(px(0.))
                        .max_w(px(760.))
                        .px_8()
                        .py_10()
                        .flex()
                        .flex_col()
                        .gap_6()
                        .overflow_hidden()
                        .child(
                            div()
                                .flex()
                                .flex_col()
                                .gap_2()
                                .child(
                                    div()
                                        .text_xl()
                                        .font_weight(FontWeight::SEMIBOLD)
                                        .line_height(rems(1.3))
                                        .whitespace_normal()
                                        .child(detail.title.clone()),
                                )
                                .when_some(detail.date.clone(), |this, date| {
                                    this.child(
                                        div()
                                            .flex()
                                            .items_center()
                                            .gap_1()
                                            .text_sm()
                                            .text_color(text_muted)
                                            .child("Publié le")
                                            .child(
                                                div()
                                                    .font_weight(FontWeight::SEMIBOLD)
                                                    .child(date.human.clone()),
                                            ),
                                    )
                                }),
                        )
                        .children(
                            excerpt.iter().enumerate().map(|(i, block)| {
                                content_view::render_content_block(theme, block, i)
                            }),
                        )
                        .when_some(detail.cover.clone(), |this, url| {
                            this.child(
                                img(url)
                                    .w_full()
                                    .max_h(px(420.))
                                    .rounded_md()
                                    .border_1()
                                    .border_color(border_subtle)
                                    .object_fit(ObjectFit::Contain),
                            )
                        })
                        .children(body.iter().enumerate().map(|(i, block)| {
                            content_view::render_content_block(theme, block, excerpt.len() + i)
                        }))
                        .when(!gallery.is_empty(), |this| {
                            this.child(div().w_full().flex().flex_wrap().gap_3().children(
                                gallery.into_iter().map(|url| {
                                    img(url)
                                        .w(px(220.))
                                        .max_h(px(160.))
                                        .rounded_md()
                                        .border_1()
                                        .border_color(border_subtle)
                                        .object_fit(ObjectFit::Contain)
                                        .into_any_element()
                                }),
                            ))
                        }),
                ),
            )
    }

    fn render_confirm_overlay(
        &self,
        pending: &PendingDelete,
        cx: &mut ViewContext<Self>,
    ) -> impl IntoElement {
        let theme = &self.theme;
        let hover_bg = theme.bg_hover;
        let error = theme.error;

        div()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(hsla(0., 0., 0., 0.4))
            .child(
                div()
                    .w(px(420.))
                    .p_6()
                    .bg(theme.bg_primary)
                    .rounded_xl()
                    .border_1()
                    .border_color(theme.border)
                    .flex()
                    .flex_col()
                    .gap_4()
                    .child(
                        div()
                            .text_lg()
                            .font_weight(FontWeight::SEMIBOLD)
                            .child("Supprimer cet article ?"),
                    )
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.text_secondary)
                            .whitespace_normal()
                            .child(format!(
                                "« {} » sera définitivement supprimé.",
                                pending.title
                            )),
                    )
                    .child(
                        div()
                            .flex()
                            .justify_end()
                            .gap_3()
                            .child(
                                div()
                                    .id("delete-cancel")
                                    .cursor_pointer()
                                    .rounded_md()
                                    .px_4()
                                    .py_2()
                                    .border_1()
                                    .border_color(theme.border)
                                    .text_sm()
                                    .hover(move |s| s.bg(hover_bg))
                                    .on_click(cx.listener(|this, _event, cx| {
                                        this.cancel_delete(cx);
                                    }))
                                    .child("Annuler"),
                            )
                            .child(
                                div()
                                    .id("delete-confirm")
                                    .cursor_pointer()
                                    .rounded_md()
                                    .px_4()
                                    .py_2()
                                    .bg(error)
                                    .text_color(hsla(0., 0., 1., 1.0))
                                    .text_sm()
                                    .font_weight(FontWeight::MEDIUM)
                                    .on_click(cx.listener(|this, _event, cx| {
                                        this.confirm_delete(cx);
                                    }))
                                    .child("Supprimer"),
                            ),
                    ),
            )
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() {
    init_logging();

    App::new()
        .with_http_client(Arc::new(ReqwestClient::new()))
        .run(|cx: &mut AppContext| {
            let options = WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                    None,
                    size(px(1200.), px(800.)),
                    cx,
                ))),
                titlebar: Some(TitlebarOptions {
                    title: Some("AgenceEco".into()),
                    appears_transparent: true,
                    traffic_light_position: Some(point(px(12.), px(12.))),
                }),
                ..Default::default()
            };

            cx.open_window(options, |cx| {
                cx.new_view(|cx| {
                    let mut state = AppState::new(cx);
                    state.load_articles(cx);
                    state
                })
            })
            .unwrap();
        });
}
