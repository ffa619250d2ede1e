use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::Article;

/// Publication date of an article once a usable field has been found.
///
/// `machine` is the sortable `YYYY-MM-DD` form, `human` the French display
/// form, mirroring the `datetime` attribute / visible text split of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    pub timestamp: NaiveDateTime,
    pub machine: String,
    pub human: String,
}

impl ResolvedDate {
    fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            machine: timestamp.format("%Y-%m-%d").to_string(),
            human: timestamp.format("%d/%m/%Y").to_string(),
            timestamp,
        }
    }
}

/// Picks the first date field that parses, in fixed priority order:
/// `publicationDate`, `publishedAt`, `createdAt`, `date`. A field holding an
/// unparseable value falls through to the next candidate; when none parses
/// the article simply has no date (the date row is not rendered).
pub fn resolve(article: &Article) -> Option<ResolvedDate> {
    [
        article.publication_date.as_deref(),
        article.published_at.as_deref(),
        article.created_at.as_deref(),
        article.date.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_value)
    .map(ResolvedDate::new)
}

fn parse_value(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Stable descending sort by resolved date. Articles without a resolvable
/// date come after every dated article, keeping their original relative
/// order (`Reverse(None)` sorts after every `Reverse(Some)`).
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by_cached_key(|article| Reverse(resolve(article).map(|d| d.timestamp)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_dates(
        publication_date: Option<&str>,
        published_at: Option<&str>,
        created_at: Option<&str>,
        date: Option<&str>,
    ) -> Article {
        Article {
            publication_date: publication_date.map(str::to_string),
            published_at: published_at.map(str::to_string),
            created_at: created_at.map(str::to_string),
            date: date.map(str::to_string),
            ..Article::default()
        }
    }

    #[test]
    fn publication_date_wins_over_later_candidates() {
        let article = with_dates(
            Some("2024-03-01"),
            Some("2024-02-01"),
            Some("2024-01-01"),
            Some("2023-12-01"),
        );
        assert_eq!(resolve(&article).unwrap().machine, "2024-03-01");
    }

    #[test]
    fn unparseable_candidate_falls_through() {
        let article = with_dates(Some("bientôt"), Some("2024-02-01"), None, None);
        assert_eq!(resolve(&article).unwrap().machine, "2024-02-01");

        let article = with_dates(Some("???"), None, None, Some("15/01/2024"));
        let resolved = resolve(&article).unwrap();
        assert_eq!(resolved.machine, "2024-01-15");
        assert_eq!(resolved.human, "15/01/2024");
    }

    #[test]
    fn no_usable_field_resolves_to_none() {
        assert!(resolve(&Article::default()).is_none());
        assert!(resolve(&with_dates(Some("n/a"), Some(""), None, Some("jamais"))).is_none());
    }

    #[test]
    fn accepts_common_timestamp_shapes() {
        for raw in [
            "2024-05-10",
            "2024-05-10T08:30:00Z",
            "2024-05-10T08:30:00.250+02:00",
            "2024-05-10T08:30:00",
            "2024-05-10 08:30:00",
            "10/05/2024",
        ] {
            let article = with_dates(Some(raw), None, None, None);
            assert_eq!(resolve(&article).unwrap().machine, "2024-05-10", "{raw}");
        }
    }

    #[test]
    fn human_form_is_french() {
        let article = with_dates(Some("2024-05-10T08:30:00Z"), None, None, None);
        assert_eq!(resolve(&article).unwrap().human, "10/05/2024");
    }

    #[test]
    fn sort_is_descending_with_undated_last_in_original_order() {
        let mut articles = vec![
            Article {
                title: Some("sans date A".into()),
                ..Article::default()
            },
            Article {
                title: Some("ancien".into()),
                date: Some("2023-01-01".into()),
                ..Article::default()
            },
            Article {
                title: Some("sans date B".into()),
                publication_date: Some("un jour".into()),
                ..Article::default()
            },
            Article {
                title: Some("récent".into()),
                publication_date: Some("2024-06-01".into()),
                ..Article::default()
            },
        ];
        sort_newest_first(&mut articles);
        let titles = articles
            .iter()
            .map(|a| a.title.as_deref().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(titles, ["récent", "ancien", "sans date A", "sans date B"]);
    }

    #[test]
    fn sort_keeps_original_order_for_equal_dates() {
        let mut articles = vec![
            Article {
                id: Some("1".into()),
                date: Some("2024-06-01".into()),
                ..Article::default()
            },
            Article {
                id: Some("2".into()),
                date: Some("2024-06-01".into()),
                ..Article::default()
            },
        ];
        sort_newest_first(&mut articles);
        let ids = articles
            .iter()
            .map(|a| a.id.as_deref().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["1", "2"]);
    }
}
