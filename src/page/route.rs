//! Navigation location of the page. Only the `id` query parameter matters.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub deck_id: Option<String>,
}

impl Route {
    pub fn deck(deck_id: impl Into<String>) -> Self {
        Self {
            deck_id: Some(deck_id.into()),
        }
    }

    /// Parses `/flashcards?id=deck1`, `?id=deck1` or a bare `id=deck1`.
    /// The first `id` wins; an empty value counts as absent.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let query = match location.split_once('?') {
            Some((_, q)) => q,
            None if location.contains('=') => location,
            None => "",
        };
        let query = query.split('#').next().unwrap_or_default();

        let deck_id = query
            .split('&')
            .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
            .find(|(key, _)| decode(key) == "id")
            .map(|(_, value)| decode(value))
            .filter(|v| !v.is_empty());

        Self { deck_id }
    }

    pub fn to_location(&self) -> String {
        match &self.deck_id {
            Some(id) => format!("/flashcards?id={}", urlencoding::encode(id)),
            None => "/flashcards".to_string(),
        }
    }
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Route::parse("/flashcards?id=deck1"), Route::deck("deck1"));
        assert_eq!(Route::parse("?id=deck1"), Route::deck("deck1"));
        assert_eq!(Route::parse("id=deck1"), Route::deck("deck1"));
        assert_eq!(Route::parse("/flashcards?x=1&id=deck1#top"), Route::deck("deck1"));
    }

    #[test]
    fn test_absent_or_empty_id() {
        assert_eq!(Route::parse("/flashcards"), Route::default());
        assert_eq!(Route::parse("/flashcards?id="), Route::default());
        assert_eq!(Route::parse("/flashcards?other=deck1"), Route::default());
        assert_eq!(Route::parse(""), Route::default());
    }

    #[test]
    fn test_decoding() {
        assert_eq!(Route::parse("?id=my%20deck"), Route::deck("my deck"));
        assert_eq!(Route::parse("?id=my+deck"), Route::deck("my deck"));
    }

    #[test]
    fn test_location_round_trip() {
        let route = Route::deck("my deck");
        assert_eq!(route.to_location(), "/flashcards?id=my%20deck");
        assert_eq!(Route::parse(&route.to_location()), route);
    }
}
