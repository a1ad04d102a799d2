//! Query normalization used for document targeting.

/// Lower-case `query`, strip any trailing qualifiers (repeatedly), and trim.
///
/// Qualifiers are compared case-insensitively and only at the end of the
/// query, so `"薪資單.pdf 的摘要"` becomes `"薪資單.pdf"` while a qualifier
/// in the middle of a sentence is left alone.
pub fn normalize(query: &str, qualifiers: &[String]) -> String {
    let lowered = query.to_lowercase();
    let qualifiers: Vec<String> = qualifiers
        .iter()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .collect();

    let mut current = lowered.trim_end();
    loop {
        let stripped = qualifiers
            .iter()
            .find_map(|q| current.strip_suffix(q.as_str()));
        match stripped {
            Some(rest) => current = rest.trim_end(),
            None => break,
        }
    }
    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualifiers() -> Vec<String> {
        vec!["的摘要".to_string(), "summary".to_string()]
    }

    #[test]
    fn strips_trailing_summary_qualifier() {
        assert_eq!(normalize("薪資單.pdf 的摘要", &qualifiers()), "薪資單.pdf");
        assert_eq!(normalize("薪資單的摘要", &qualifiers()), "薪資單");
    }

    #[test]
    fn qualifier_match_ignores_case() {
        assert_eq!(normalize("Payroll SUMMARY", &qualifiers()), "payroll");
    }

    #[test]
    fn strips_stacked_qualifiers() {
        assert_eq!(normalize("報告 的摘要 summary ", &qualifiers()), "報告");
    }

    #[test]
    fn query_that_is_only_a_qualifier_becomes_empty() {
        assert_eq!(normalize(" 的摘要 ", &qualifiers()), "");
    }

    #[test]
    fn empty_qualifiers_only_lowercase_and_trim() {
        assert_eq!(normalize("  Hello World ", &[String::new()]), "hello world");
    }
}
