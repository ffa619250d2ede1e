use crate::content::{self, ContentBlock};
use crate::dates::{self, ResolvedDate};
use crate::models::Article;
use crate::sanitize;

pub const PLACEHOLDER_TITLE: &str = "Sans titre";

/// Who is looking at the list: owner actions are only offered to an
/// authenticated viewer outside the home section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub is_authenticated: bool,
    pub is_home_view: bool,
}

/// Display unit for one article row, derived once per record so rendering
/// stays a pure function of this value. `id` doubles as the card's stable
/// identity: the delete flow removes exactly the card whose id matches, and
/// a card without an id offers no detail navigation at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub id: Option<String>,
    pub title: String,
    pub excerpt: Vec<ContentBlock>,
    pub body: Vec<ContentBlock>,
    pub date: Option<ResolvedDate>,
    pub show_actions: bool,
}

impl ArticleCard {
    pub fn opens_detail(&self) -> bool {
        self.id.is_some()
    }
}

pub fn build_card(article: &Article, viewer: ViewerContext) -> ArticleCard {
    ArticleCard {
        id: article.id.clone(),
        title: article
            .title
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
        excerpt: inline_blocks(article.description.as_deref()),
        body: block_blocks(article.content.as_deref()),
        date: dates::resolve(article),
        show_actions: viewer.is_authenticated && !viewer.is_home_view,
    }
}

/// Display projection for the detail pane. Every optional field hides its
/// whole UI region when absent; alternate source keys are resolved at the
/// model layer (`titre`, `cover`, `excerpt`, `body`, …).
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDetail {
    pub title: String,
    pub date: Option<ResolvedDate>,
    pub excerpt: Vec<ContentBlock>,
    pub cover: Option<String>,
    pub gallery: Vec<String>,
    pub body: Vec<ContentBlock>,
}

pub fn build_detail(article: &Article) -> ArticleDetail {
    ArticleDetail {
        title: article
            .title
            .clone()
            .unwrap_or_else(|| format!("({PLACEHOLDER_TITLE})")),
        date: dates::resolve(article),
        excerpt: inline_blocks(article.description.as_deref()),
        cover: article.image.clone(),
        gallery: article.images.clone().unwrap_or_default(),
        body: block_blocks(article.content.as_deref()),
    }
}

fn inline_blocks(raw: Option<&str>) -> Vec<ContentBlock> {
    raw.map(|text| content::parse_blocks(&sanitize::format_inline(text)))
        .unwrap_or_default()
}

fn block_blocks(raw: Option<&str>) -> Vec<ContentBlock> {
    raw.map(|text| content::parse_blocks(&sanitize::format_block(text)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: Option<&str>, title: Option<&str>) -> Article {
        Article {
            id: id.map(str::to_string),
            title: title.map(str::to_string),
            ..Article::default()
        }
    }

    const OWNER: ViewerContext = ViewerContext {
        is_authenticated: true,
        is_home_view: false,
    };

    #[test]
    fn title_falls_back_to_a_placeholder() {
        let card = build_card(&article(None, None), ViewerContext::default());
        assert_eq!(card.title, PLACEHOLDER_TITLE);

        let card = build_card(&article(None, Some("Une")), ViewerContext::default());
        assert_eq!(card.title, "Une");
    }

    #[test]
    fn card_without_id_offers_no_navigation() {
        assert!(!build_card(&article(None, Some("t")), OWNER).opens_detail());
        assert!(build_card(&article(Some("7"), Some("t")), OWNER).opens_detail());
    }

    #[test]
    fn actions_require_authentication_outside_home() {
        let a = article(Some("7"), Some("t"));
        for (is_authenticated, is_home_view, expected) in [
            (true, false, true),
            (true, true, false),
            (false, false, false),
            (false, true, false),
        ] {
            let card = build_card(
                &a,
                ViewerContext {
                    is_authenticated,
                    is_home_view,
                },
            );
            assert_eq!(card.show_actions, expected);
        }
    }

    #[test]
    fn date_row_is_absent_when_no_field_resolves() {
        let card = build_card(&article(None, None), OWNER);
        assert!(card.date.is_none());

        let mut dated = article(None, None);
        dated.publication_date = Some("2024-06-01".to_string());
        let card = build_card(&dated, OWNER);
        assert_eq!(card.date.unwrap().machine, "2024-06-01");
    }

    #[test]
    fn body_and_excerpt_are_sanitized_into_blocks() {
        let mut a = article(Some("1"), Some("t"));
        a.description = Some("résumé\nsur deux lignes".to_string());
        a.content = Some("<script>x</script>".to_string());
        let card = build_card(&a, OWNER);

        assert_eq!(
            card.excerpt,
            vec![ContentBlock::Paragraph("résumé\nsur deux lignes".into())]
        );
        // The script tag is escaped, never kept as executable markup.
        assert_eq!(
            card.body,
            vec![ContentBlock::Paragraph("<script>x</script>".into())]
        );
    }

    #[test]
    fn detail_hides_absent_regions() {
        let detail = build_detail(&article(None, None));
        assert!(detail.date.is_none());
        assert!(detail.excerpt.is_empty());
        assert!(detail.cover.is_none());
        assert!(detail.gallery.is_empty());
        assert!(detail.body.is_empty());
    }

    #[test]
    fn detail_projects_cover_and_gallery() {
        let mut a = article(Some("1"), Some("t"));
        a.image = Some("https://cdn.example/une.jpg".to_string());
        a.images = Some(vec!["https://cdn.example/2.jpg".to_string()]);
        let detail = build_detail(&a);
        assert_eq!(detail.cover.as_deref(), Some("https://cdn.example/une.jpg"));
        assert_eq!(detail.gallery, vec!["https://cdn.example/2.jpg".to_string()]);
    }
}
