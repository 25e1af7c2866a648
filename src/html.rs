//! Small helpers on top of scraper shared by the HTML based probes.

use scraper::{ElementRef, Selector};

use crate::CheckError;

pub(crate) fn selector(css: &str) -> Result<Selector, CheckError> {
    Selector::parse(css).map_err(|err| CheckError::Config(format!("invalid selector {css}: {err}")))
}

/// Text content of an element, trimmed and unwrapped from the `i18n("...")` calls the modem pages
/// use to render their labels.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    unwrap_i18n(text.trim()).to_owned()
}

fn unwrap_i18n(text: &str) -> &str {
    text.trim_end_matches(';')
        .trim_end()
        .strip_prefix("i18n(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(|inner| inner.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .unwrap_or(text)
}

/// Parses the leading number of a cell such as ` 3.2 dBmV`.
pub(crate) fn leading_number(text: &str) -> Option<f64> {
    text.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn test_text_of_unwraps_i18n() {
        let doc = Html::parse_fragment(
            r#"<table><tr><td id="a"> <script>i18n("Locked")</script> </td><td id="b">OK</td></tr></table>"#,
        );
        let a = doc.select(&selector("#a").unwrap()).next().unwrap();
        let b = doc.select(&selector("#b").unwrap()).next().unwrap();

        assert_eq!(text_of(a), "Locked");
        assert_eq!(text_of(b), "OK");
    }

    #[test]
    fn test_unwrap_i18n() {
        assert_eq!(unwrap_i18n("i18n('Operational')"), "Operational");
        assert_eq!(unwrap_i18n("i18n(\"Locked\");"), "Locked");
        assert_eq!(unwrap_i18n("plain"), "plain");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number(" 3.2 dBmV"), Some(3.2));
        assert_eq!(leading_number("-1.5 dBmV"), Some(-1.5));
        assert_eq!(leading_number("38.9 dB"), Some(38.9));
        assert_eq!(leading_number("n/a"), None);
        assert_eq!(leading_number(""), None);
    }
}
