use crate::{content::ContentBlock, theme::Theme};
use gpui::prelude::*;
use gpui::{div, px, rems, AnyElement, ElementId};

/// Opens an article link in the system browser. Only http(s) URLs are ever
/// followed; anything else coming out of editorial markup is refused.
pub(crate) fn open_external(raw: &str) {
    match url::Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            if let Err(error) = open::that(url.as_str()) {
                tracing::warn!(%url, %error, "impossible d'ouvrir le lien");
            }
        }
        _ => tracing::warn!(link = raw, "lien refusé (schéma non http/https)"),
    }
}

pub(crate) fn render_content_block(theme: &Theme, block: &ContentBlock, ix: usize) -> AnyElement {
    match block {
        ContentBlock::Paragraph(text) => div()
            .w_full()
            .text_base()
            .line_height(rems(1.75))
            .text_color(theme.text_primary)
            .whitespace_normal()
            .child(text.clone())
            .into_any_element(),
        ContentBlock::Quote(text) => div()
            .w_full()
            .pl_4()
            .pr_4()
            .py_3()
            .bg(theme.bg_secondary)
            .rounded_md()
            .border_l_2()
            .border_color(theme.border)
            .text_base()
            .line_height(rems(1.7))
            .text_color(theme.text_secondary)
            .whitespace_normal()
            .child(text.clone())
            .into_any_element(),
        ContentBlock::List { ordered, items } => div()
            .w_full()
            .flex()
            .flex_col()
            .gap_2()
            .children(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let marker = if *ordered {
                            format!("{}.", i + 1)
                        } else {
                            "•".to_string()
                        };

                        div()
                            .w_full()
                            .flex()
                            .items_start()
                            .gap_3()
                            .child(div().w(px(28.)).text_color(theme.text_muted).child(marker))
                            .child(
                                div()
                                    .flex_1()
                                    .min_w(px(0.))
                                    .text_base()
                                    .line_height(rems(1.7))
                                    .text_color(theme.text_primary)
                                    .whitespace_normal()
                                    .child(item.clone()),
                            )
                            .into_any_element()
                    })
                    .collect::<Vec<_>>(),
            )
            .into_any_element(),
        ContentBlock::Code(text) => div()
            .w_full()
            .min_w(px(0.))
            .px_4()
            .py_3()
            .bg(theme.bg_secondary)
            .rounded_md()
            .border_1()
            .border_color(theme.border_subtle)
            .font_family("Menlo")
            .text_sm()
            .line_height(rems(1.55))
            .text_color(theme.text_primary)
            .whitespace_normal()
            .overflow_x_hidden()
            .child(text.clone())
            .into_any_element(),
        ContentBlock::Link { text, href } => {
            let href = href.clone();
            div()
                .id(ElementId::Name(format!("content-link-{ix}").into()))
                .w_full()
                .cursor_pointer()
                .text_sm()
                .text_color(theme.accent)
                .whitespace_normal()
                .on_click(move |_event, _cx| open_external(&href))
                .child(format!("{text} ↗"))
                .into_any_element()
        }
        ContentBlock::Rule => div()
            .w_full()
            .h(px(1.))
            .bg(theme.border_subtle)
            .into_any_element(),
    }
}
